// rtc_bridge/src/router/event_kind.rs

macro_rules! event_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Every notification the engine can raise, keyed by the name hosts
        /// register handlers under.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EventKind {
            $($variant),*
        }

        impl EventKind {
            pub const ALL: &'static [EventKind] = &[$(EventKind::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(EventKind::$variant => $name),*
                }
            }

            pub fn from_name(name: &str) -> Option<EventKind> {
                match name {
                    $($name => Some(EventKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

event_kinds! {
    Error => "onError",
    Warning => "onWarning",
    ReleasedHwResources => "onReleasedHwResources",
    JoinChannel => "onJoinChannel",
    ConnectionStateChange => "onConnectionStateChange",
    ReconnectingStart => "onReconnectingStart",
    RejoinChannel => "onRejoinChannel",
    LeaveChannel => "onLeaveChannel",
    Disconnect => "onDisconnect",
    ClientRoleChanged => "onClientRoleChanged",
    UserJoined => "onUserJoined",
    UserLeft => "onUserLeft",
    UserAudioStart => "onUserAudioStart",
    UserAudioStop => "onUserAudioStop",
    UserVideoStart => "onUserVideoStart",
    UserVideoStop => "onUserVideoStop",
    UserSubStreamVideoStart => "onUserSubStreamVideoStart",
    UserSubStreamVideoStop => "onUserSubStreamVideoStop",
    UserVideoProfileUpdate => "onUserVideoProfileUpdate",
    UserAudioMute => "onUserAudioMute",
    UserVideoMute => "onUserVideoMute",
    AudioDeviceStateChanged => "onAudioDeviceStateChanged",
    AudioDefaultDeviceChanged => "onAudioDefaultDeviceChanged",
    VideoDeviceStateChanged => "onVideoDeviceStateChanged",
    FirstAudioDataReceived => "onFirstAudioDataReceived",
    FirstVideoDataReceived => "onFirstVideoDataReceived",
    FirstAudioFrameDecoded => "onFirstAudioFrameDecoded",
    FirstVideoFrameDecoded => "onFirstVideoFrameDecoded",
    CaptureVideoFrame => "onCaptureVideoFrame",
    AudioMixingStateChanged => "onAudioMixingStateChanged",
    AudioMixingTimestampUpdate => "onAudioMixingTimestampUpdate",
    AudioEffectFinished => "onAudioEffectFinished",
    LocalAudioVolumeIndication => "onLocalAudioVolumeIndication",
    RemoteAudioVolumeIndication => "onRemoteAudioVolumeIndication",
    AddLiveStreamTask => "onAddLiveStreamTask",
    UpdateLiveStreamTask => "onUpdateLiveStreamTask",
    RemoveLiveStreamTask => "onRemoveLiveStreamTask",
    LiveStreamState => "onLiveStreamState",
    AudioHowling => "onAudioHowling",
    RecvSeiMsg => "onRecvSEIMsg",
    PullExternalAudioFrame => "onPullExternalAudioFrame",
    RtcStats => "onRtcStats",
    LocalAudioStats => "onLocalAudioStats",
    RemoteAudioStats => "onRemoteAudioStats",
    LocalVideoStats => "onLocalVideoStats",
    RemoteVideoStats => "onRemoteVideoStats",
    NetworkQuality => "onNetworkQuality",
}

impl EventKind {
    /// Kinds the bridge never dispatches.
    pub fn is_implemented(&self) -> bool {
        !matches!(self, EventKind::CaptureVideoFrame)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
