// rtc_bridge/src/router/event.rs
use crate::payload::deep_copy::{LocalVideoStats, RemoteVideoStats};
use crate::payload::external_frame::ExternalFrame;
use crate::payload::payload_buffer::PayloadBuffer;
use crate::marshal::host_value::HostValue;
use crate::marshal::to_host::ToHostValue;
use crate::router::event_kind::EventKind;
use crate::engine::types::*;

/// An engine notification captured on the producer thread. Scalars are held
/// by value; arrays live in payload buffers the event owns.
#[derive(Debug)]
pub enum Event {
    Error { code: ErrorCode, message: String },
    Warning { code: ErrorCode, message: String },
    ReleasedHwResources { result: ErrorCode },
    JoinChannel { cid: ChannelId, uid: Uid, result: ErrorCode, elapsed: u64 },
    ConnectionStateChange { state: u32, reason: u32 },
    ReconnectingStart { cid: ChannelId, uid: Uid },
    RejoinChannel { cid: ChannelId, uid: Uid, result: ErrorCode, elapsed: u64 },
    LeaveChannel { result: ErrorCode },
    Disconnect { reason: ErrorCode },
    ClientRoleChanged { old_role: u32, new_role: u32 },
    UserJoined { uid: Uid, user_name: String },
    UserLeft { uid: Uid, reason: u32 },
    UserAudioStart { uid: Uid },
    UserAudioStop { uid: Uid },
    UserVideoStart { uid: Uid, max_profile: u32 },
    UserVideoStop { uid: Uid },
    UserSubStreamVideoStart { uid: Uid, max_profile: u32 },
    UserSubStreamVideoStop { uid: Uid },
    UserVideoProfileUpdate { uid: Uid, max_profile: u32 },
    UserAudioMute { uid: Uid, mute: bool },
    UserVideoMute { uid: Uid, mute: bool },
    AudioDeviceStateChanged { device_id: String, device_type: u32, device_state: u32 },
    AudioDefaultDeviceChanged { device_id: String, device_type: u32 },
    VideoDeviceStateChanged { device_id: String, device_type: u32, device_state: u32 },
    FirstAudioDataReceived { uid: Uid },
    FirstVideoDataReceived { uid: Uid },
    FirstAudioFrameDecoded { uid: Uid },
    FirstVideoFrameDecoded { uid: Uid, width: u32, height: u32 },
    AudioMixingStateChanged { state: u32, error_code: u32 },
    AudioMixingTimestampUpdate { timestamp_ms: u64 },
    AudioEffectFinished { effect_id: u32 },
    LocalAudioVolumeIndication { volume: i32 },
    RemoteAudioVolumeIndication { speakers: PayloadBuffer<AudioVolumeInfo>, total_volume: i32 },
    AddLiveStreamTask { task_id: String, url: String, error_code: ErrorCode },
    UpdateLiveStreamTask { task_id: String, url: String, error_code: ErrorCode },
    RemoveLiveStreamTask { task_id: String, error_code: ErrorCode },
    LiveStreamState { task_id: String, url: String, state: u32 },
    AudioHowling { howling: bool },
    RecvSeiMsg { uid: Uid, message: String, size: u32 },
    PullExternalAudioFrame { frame: ExternalFrame },
    RtcStats(RtcStats),
    LocalAudioStats(AudioSendStats),
    RemoteAudioStats(PayloadBuffer<AudioRecvStats>),
    LocalVideoStats(LocalVideoStats),
    RemoteVideoStats(PayloadBuffer<RemoteVideoStats>),
    NetworkQuality(PayloadBuffer<NetworkQualityInfo>),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Error { .. } => EventKind::Error,
            Event::Warning { .. } => EventKind::Warning,
            Event::ReleasedHwResources { .. } => EventKind::ReleasedHwResources,
            Event::JoinChannel { .. } => EventKind::JoinChannel,
            Event::ConnectionStateChange { .. } => EventKind::ConnectionStateChange,
            Event::ReconnectingStart { .. } => EventKind::ReconnectingStart,
            Event::RejoinChannel { .. } => EventKind::RejoinChannel,
            Event::LeaveChannel { .. } => EventKind::LeaveChannel,
            Event::Disconnect { .. } => EventKind::Disconnect,
            Event::ClientRoleChanged { .. } => EventKind::ClientRoleChanged,
            Event::UserJoined { .. } => EventKind::UserJoined,
            Event::UserLeft { .. } => EventKind::UserLeft,
            Event::UserAudioStart { .. } => EventKind::UserAudioStart,
            Event::UserAudioStop { .. } => EventKind::UserAudioStop,
            Event::UserVideoStart { .. } => EventKind::UserVideoStart,
            Event::UserVideoStop { .. } => EventKind::UserVideoStop,
            Event::UserSubStreamVideoStart { .. } => EventKind::UserSubStreamVideoStart,
            Event::UserSubStreamVideoStop { .. } => EventKind::UserSubStreamVideoStop,
            Event::UserVideoProfileUpdate { .. } => EventKind::UserVideoProfileUpdate,
            Event::UserAudioMute { .. } => EventKind::UserAudioMute,
            Event::UserVideoMute { .. } => EventKind::UserVideoMute,
            Event::AudioDeviceStateChanged { .. } => EventKind::AudioDeviceStateChanged,
            Event::AudioDefaultDeviceChanged { .. } => EventKind::AudioDefaultDeviceChanged,
            Event::VideoDeviceStateChanged { .. } => EventKind::VideoDeviceStateChanged,
            Event::FirstAudioDataReceived { .. } => EventKind::FirstAudioDataReceived,
            Event::FirstVideoDataReceived { .. } => EventKind::FirstVideoDataReceived,
            Event::FirstAudioFrameDecoded { .. } => EventKind::FirstAudioFrameDecoded,
            Event::FirstVideoFrameDecoded { .. } => EventKind::FirstVideoFrameDecoded,
            Event::AudioMixingStateChanged { .. } => EventKind::AudioMixingStateChanged,
            Event::AudioMixingTimestampUpdate { .. } => EventKind::AudioMixingTimestampUpdate,
            Event::AudioEffectFinished { .. } => EventKind::AudioEffectFinished,
            Event::LocalAudioVolumeIndication { .. } => EventKind::LocalAudioVolumeIndication,
            Event::RemoteAudioVolumeIndication { .. } => EventKind::RemoteAudioVolumeIndication,
            Event::AddLiveStreamTask { .. } => EventKind::AddLiveStreamTask,
            Event::UpdateLiveStreamTask { .. } => EventKind::UpdateLiveStreamTask,
            Event::RemoveLiveStreamTask { .. } => EventKind::RemoveLiveStreamTask,
            Event::LiveStreamState { .. } => EventKind::LiveStreamState,
            Event::AudioHowling { .. } => EventKind::AudioHowling,
            Event::RecvSeiMsg { .. } => EventKind::RecvSeiMsg,
            Event::PullExternalAudioFrame { .. } => EventKind::PullExternalAudioFrame,
            Event::RtcStats(_) => EventKind::RtcStats,
            Event::LocalAudioStats(_) => EventKind::LocalAudioStats,
            Event::RemoteAudioStats(_) => EventKind::RemoteAudioStats,
            Event::LocalVideoStats(_) => EventKind::LocalVideoStats,
            Event::RemoteVideoStats(_) => EventKind::RemoteVideoStats,
            Event::NetworkQuality(_) => EventKind::NetworkQuality,
        }
    }

    /// Marshals the event into the argument list its handler receives.
    pub fn to_args(&self) -> Vec<HostValue> {
        use HostValue as V;

        match self {
            Event::Error { code, message } | Event::Warning { code, message } => {
                vec![V::from(*code), V::from(message.as_str())]
            }
            Event::ReleasedHwResources { result } | Event::LeaveChannel { result } => {
                vec![V::from(*result)]
            }
            Event::JoinChannel { cid, uid, result, elapsed }
            | Event::RejoinChannel { cid, uid, result, elapsed } => {
                vec![V::from(*cid), V::from(*uid), V::from(*result), V::from(*elapsed)]
            }
            Event::ConnectionStateChange { state, reason } => vec![V::from(*state), V::from(*reason)],
            Event::ReconnectingStart { cid, uid } => vec![V::from(*cid), V::from(*uid)],
            Event::Disconnect { reason } => vec![V::from(*reason)],
            Event::ClientRoleChanged { old_role, new_role } => {
                vec![V::from(*old_role), V::from(*new_role)]
            }
            Event::UserJoined { uid, user_name } => vec![V::from(*uid), V::from(user_name.as_str())],
            Event::UserLeft { uid, reason } => vec![V::from(*uid), V::from(*reason)],
            Event::UserAudioStart { uid }
            | Event::UserAudioStop { uid }
            | Event::UserVideoStop { uid }
            | Event::UserSubStreamVideoStop { uid }
            | Event::FirstAudioDataReceived { uid }
            | Event::FirstVideoDataReceived { uid }
            | Event::FirstAudioFrameDecoded { uid } => vec![V::from(*uid)],
            Event::UserVideoStart { uid, max_profile }
            | Event::UserSubStreamVideoStart { uid, max_profile }
            | Event::UserVideoProfileUpdate { uid, max_profile } => {
                vec![V::from(*uid), V::from(*max_profile)]
            }
            Event::UserAudioMute { uid, mute } | Event::UserVideoMute { uid, mute } => {
                vec![V::from(*uid), V::from(*mute)]
            }
            Event::AudioDeviceStateChanged { device_id, device_type, device_state }
            | Event::VideoDeviceStateChanged { device_id, device_type, device_state } => vec![
                V::from(device_id.as_str()),
                V::from(*device_type),
                V::from(*device_state),
            ],
            Event::AudioDefaultDeviceChanged { device_id, device_type } => {
                vec![V::from(device_id.as_str()), V::from(*device_type)]
            }
            Event::FirstVideoFrameDecoded { uid, width, height } => {
                vec![V::from(*uid), V::from(*width), V::from(*height)]
            }
            Event::AudioMixingStateChanged { state, error_code } => {
                vec![V::from(*state), V::from(*error_code)]
            }
            Event::AudioMixingTimestampUpdate { timestamp_ms } => vec![V::from(*timestamp_ms)],
            Event::AudioEffectFinished { effect_id } => vec![V::from(*effect_id)],
            Event::LocalAudioVolumeIndication { volume } => vec![V::from(*volume)],
            Event::RemoteAudioVolumeIndication { speakers, total_volume } => vec![
                speakers.to_host_value(),
                V::from(speakers.len() as u64),
                V::from(*total_volume),
            ],
            Event::AddLiveStreamTask { task_id, url, error_code }
            | Event::UpdateLiveStreamTask { task_id, url, error_code } => vec![
                V::from(task_id.as_str()),
                V::from(url.as_str()),
                V::from(*error_code),
            ],
            Event::RemoveLiveStreamTask { task_id, error_code } => {
                vec![V::from(task_id.as_str()), V::from(*error_code)]
            }
            Event::LiveStreamState { task_id, url, state } => vec![
                V::from(task_id.as_str()),
                V::from(url.as_str()),
                V::from(*state),
            ],
            Event::AudioHowling { howling } => vec![V::from(*howling)],
            Event::RecvSeiMsg { uid, message, size } => {
                vec![V::from(*uid), V::from(message.as_str()), V::from(*size)]
            }
            Event::PullExternalAudioFrame { frame } => vec![V::from(frame.clone())],
            Event::RtcStats(stats) => vec![stats.to_host_value()],
            Event::LocalAudioStats(stats) => vec![stats.to_host_value()],
            Event::LocalVideoStats(stats) => vec![stats.to_host_value()],
            Event::RemoteAudioStats(stats) => counted(stats),
            Event::RemoteVideoStats(stats) => counted(stats),
            Event::NetworkQuality(infos) => counted(infos),
        }
    }
}

/// `(count, [records...])`, the shape of the per-user stats events.
fn counted<T: ToHostValue>(buffer: &PayloadBuffer<T>) -> Vec<HostValue> {
    vec![HostValue::from(buffer.len() as u64), buffer.to_host_value()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ledger::BufferLedger;
    use HostValue as V;

    #[test]
    fn join_channel_args_in_order() {
        let event = Event::JoinChannel { cid: 42, uid: 7, result: 0, elapsed: 1500 };
        assert_eq!(
            event.to_args(),
            [V::UInt(42), V::UInt(7), V::Int(0), V::UInt(1500)]
        );
    }

    #[test]
    fn volume_indication_puts_speakers_first() {
        let ledger = BufferLedger::new();
        let speakers = PayloadBuffer::from_vec(&ledger, vec![AudioVolumeInfo { uid: 3, volume: 80 }]);
        let args = Event::RemoteAudioVolumeIndication { speakers, total_volume: 120 }.to_args();

        assert_eq!(args.len(), 3);
        assert_eq!(args[0].as_seq().unwrap()[0].get("volume"), Some(&V::UInt(80)));
        assert_eq!(args[1], V::UInt(1));
        assert_eq!(args[2], V::Int(120));
    }

    #[test]
    fn empty_stats_keep_both_arguments() {
        let ledger = BufferLedger::new();
        let args = Event::NetworkQuality(PayloadBuffer::empty(&ledger)).to_args();
        assert_eq!(args, [V::UInt(0), V::Seq(Vec::new())]);
    }
}
