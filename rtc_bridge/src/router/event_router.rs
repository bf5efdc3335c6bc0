// rtc_bridge/src/router/event_router.rs
use crate::engine::handler::{RtcEngineEventHandler, RtcMediaStatsObserver};
use crate::payload::deep_copy::{DeepCopy, copy_records};
use crate::payload::external_frame::ExternalFrame;
use crate::dispatch::policy::{EnqueueOutcome, RejectReason};
use crate::dispatch::dispatcher::DispatchHandle;
use crate::engine::raw::{RawSlice, c_string, count_u32, fixed_str};
use crate::payload::ledger::BufferLedger;
use crate::router::event_kind::EventKind;
use crate::error::{BridgeError, BridgeResult};
use crate::router::event::Event;
use crate::dispatch::task::Task;
use crate::engine::types::*;
use std::ffi::CStr;
use std::sync::Once;

static CAPTURE_FRAME_NOTICE: Once = Once::new();

/// Producer-side entry points. Each engine callback copies its arguments
/// into bridge-owned memory and queues the event for the consumer thread.
/// Nothing here calls into the host or returns an error to the engine.
pub struct EventRouter {
    dispatch: DispatchHandle<Task>,
    ledger: BufferLedger,
}

impl EventRouter {
    pub fn new(dispatch: DispatchHandle<Task>, ledger: BufferLedger) -> Self {
        Self { dispatch, ledger }
    }

    /// Ledger counting every payload buffer this router has allocated.
    pub fn ledger(&self) -> &BufferLedger {
        &self.ledger
    }

    pub fn dispatch(&self) -> &DispatchHandle<Task> {
        &self.dispatch
    }

    /// Queues an already captured event.
    pub fn post(&self, event: Event) -> EnqueueOutcome {
        let kind = event.kind();
        let outcome = self.dispatch.enqueue(Task::Event(event));
        match outcome {
            EnqueueOutcome::Queued => {}
            EnqueueOutcome::QueuedEvictedOldest => {
                crate::bridge_warn!("Queue full, evicted the oldest task to admit '{}'.", kind);
            }
            EnqueueOutcome::Rejected(reason) => {
                let err = BridgeError::from(reason);
                match reason {
                    // Expected while shutting down.
                    RejectReason::Closed => crate::bridge_debug!("Dropped '{}': {}", kind, err),
                    RejectReason::TimedOut => crate::bridge_warn!("Dropped '{}': {}", kind, err),
                }
            }
        }
        outcome
    }

    /// Posts the event built by `capture`, or logs and skips it when the copy
    /// could not be made.
    fn capture<F>(&self, kind: EventKind, capture: F)
    where
        F: FnOnce(&BufferLedger) -> BridgeResult<Event>,
    {
        match capture(&self.ledger) {
            Ok(event) => {
                self.post(event);
            }
            Err(e) => crate::bridge_error!("Delivery of '{}' skipped: {}", kind, e),
        }
    }
}

impl RtcEngineEventHandler for EventRouter {
    fn on_error(&self, code: ErrorCode, msg: Option<&CStr>) {
        self.post(Event::Error { code, message: c_string(msg) });
    }

    fn on_warning(&self, code: ErrorCode, msg: Option<&CStr>) {
        self.post(Event::Warning { code, message: c_string(msg) });
    }

    fn on_released_hw_resources(&self, result: ErrorCode) {
        self.post(Event::ReleasedHwResources { result });
    }

    fn on_join_channel(&self, cid: ChannelId, uid: Uid, result: ErrorCode, elapsed: u64) {
        self.post(Event::JoinChannel { cid, uid, result, elapsed });
    }

    fn on_connection_state_change(&self, state: u32, reason: u32) {
        self.post(Event::ConnectionStateChange { state, reason });
    }

    fn on_reconnecting_start(&self, cid: ChannelId, uid: Uid) {
        self.post(Event::ReconnectingStart { cid, uid });
    }

    fn on_rejoin_channel(&self, cid: ChannelId, uid: Uid, result: ErrorCode, elapsed: u64) {
        self.post(Event::RejoinChannel { cid, uid, result, elapsed });
    }

    fn on_leave_channel(&self, result: ErrorCode) {
        self.post(Event::LeaveChannel { result });
    }

    fn on_disconnect(&self, reason: ErrorCode) {
        self.post(Event::Disconnect { reason });
    }

    fn on_client_role_changed(&self, old_role: u32, new_role: u32) {
        self.post(Event::ClientRoleChanged { old_role, new_role });
    }

    fn on_user_joined(&self, uid: Uid, user_name: Option<&CStr>) {
        self.post(Event::UserJoined { uid, user_name: c_string(user_name) });
    }

    fn on_user_left(&self, uid: Uid, reason: u32) {
        self.post(Event::UserLeft { uid, reason });
    }

    fn on_user_audio_start(&self, uid: Uid) {
        self.post(Event::UserAudioStart { uid });
    }

    fn on_user_audio_stop(&self, uid: Uid) {
        self.post(Event::UserAudioStop { uid });
    }

    fn on_user_video_start(&self, uid: Uid, max_profile: u32) {
        self.post(Event::UserVideoStart { uid, max_profile });
    }

    fn on_user_video_stop(&self, uid: Uid) {
        self.post(Event::UserVideoStop { uid });
    }

    fn on_user_sub_stream_video_start(&self, uid: Uid, max_profile: u32) {
        self.post(Event::UserSubStreamVideoStart { uid, max_profile });
    }

    fn on_user_sub_stream_video_stop(&self, uid: Uid) {
        self.post(Event::UserSubStreamVideoStop { uid });
    }

    fn on_user_video_profile_update(&self, uid: Uid, max_profile: u32) {
        self.post(Event::UserVideoProfileUpdate { uid, max_profile });
    }

    fn on_user_audio_mute(&self, uid: Uid, mute: bool) {
        self.post(Event::UserAudioMute { uid, mute });
    }

    fn on_user_video_mute(&self, uid: Uid, mute: bool) {
        self.post(Event::UserVideoMute { uid, mute });
    }

    fn on_audio_device_state_changed(&self, device_id: &DeviceId, device_type: u32, device_state: u32) {
        self.post(Event::AudioDeviceStateChanged {
            device_id: fixed_str(device_id),
            device_type,
            device_state,
        });
    }

    fn on_audio_default_device_changed(&self, device_id: &DeviceId, device_type: u32) {
        self.post(Event::AudioDefaultDeviceChanged { device_id: fixed_str(device_id), device_type });
    }

    fn on_video_device_state_changed(&self, device_id: &DeviceId, device_type: u32, device_state: u32) {
        self.post(Event::VideoDeviceStateChanged {
            device_id: fixed_str(device_id),
            device_type,
            device_state,
        });
    }

    fn on_first_audio_data_received(&self, uid: Uid) {
        self.post(Event::FirstAudioDataReceived { uid });
    }

    fn on_first_video_data_received(&self, uid: Uid) {
        self.post(Event::FirstVideoDataReceived { uid });
    }

    fn on_first_audio_frame_decoded(&self, uid: Uid) {
        self.post(Event::FirstAudioFrameDecoded { uid });
    }

    fn on_first_video_frame_decoded(&self, uid: Uid, width: u32, height: u32) {
        self.post(Event::FirstVideoFrameDecoded { uid, width, height });
    }

    /// Raw frame capture is not bridged. The frame is neither copied nor
    /// dispatched.
    fn on_capture_video_frame(&self, _frame: &CaptureVideoFrame<'_>) {
        CAPTURE_FRAME_NOTICE.call_once(|| {
            crate::bridge_debug!("'{}' is not bridged, frames are ignored.", EventKind::CaptureVideoFrame);
        });
    }

    fn on_audio_mixing_state_changed(&self, state: u32, error_code: u32) {
        self.post(Event::AudioMixingStateChanged { state, error_code });
    }

    fn on_audio_mixing_timestamp_update(&self, timestamp_ms: u64) {
        self.post(Event::AudioMixingTimestampUpdate { timestamp_ms });
    }

    fn on_audio_effect_finished(&self, effect_id: u32) {
        self.post(Event::AudioEffectFinished { effect_id });
    }

    fn on_local_audio_volume_indication(&self, volume: i32) {
        self.post(Event::LocalAudioVolumeIndication { volume });
    }

    fn on_remote_audio_volume_indication(&self, speakers: RawSlice<'_, AudioVolumeInfo>, total_volume: i32) {
        let kind = EventKind::RemoteAudioVolumeIndication;
        self.capture(kind, |ledger| {
            Ok(Event::RemoteAudioVolumeIndication {
                speakers: copy_records(speakers, ledger, kind.as_str())?,
                total_volume,
            })
        });
    }

    fn on_add_live_stream_task(&self, task_id: Option<&CStr>, url: Option<&CStr>, error_code: ErrorCode) {
        self.post(Event::AddLiveStreamTask {
            task_id: c_string(task_id),
            url: c_string(url),
            error_code,
        });
    }

    fn on_update_live_stream_task(&self, task_id: Option<&CStr>, url: Option<&CStr>, error_code: ErrorCode) {
        self.post(Event::UpdateLiveStreamTask {
            task_id: c_string(task_id),
            url: c_string(url),
            error_code,
        });
    }

    fn on_remove_live_stream_task(&self, task_id: Option<&CStr>, error_code: ErrorCode) {
        self.post(Event::RemoveLiveStreamTask { task_id: c_string(task_id), error_code });
    }

    fn on_live_stream_state(&self, task_id: Option<&CStr>, url: Option<&CStr>, state: u32) {
        self.post(Event::LiveStreamState {
            task_id: c_string(task_id),
            url: c_string(url),
            state,
        });
    }

    fn on_audio_howling(&self, howling: bool) {
        self.post(Event::AudioHowling { howling });
    }

    fn on_recv_sei_msg(&self, uid: Uid, data: RawSlice<'_, u8>) {
        let bytes = data.as_slice();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.post(Event::RecvSeiMsg {
            uid,
            message: String::from_utf8_lossy(&bytes[..end]).into_owned(),
            size: count_u32(bytes.len()),
        });
    }

    fn on_pull_external_audio_frame(&self, frame: ExternalFrame) {
        self.post(Event::PullExternalAudioFrame { frame });
    }
}

impl RtcMediaStatsObserver for EventRouter {
    fn on_rtc_stats(&self, stats: &RtcStats) {
        self.post(Event::RtcStats(*stats));
    }

    fn on_local_audio_stats(&self, stats: &AudioSendStats) {
        self.post(Event::LocalAudioStats(*stats));
    }

    fn on_remote_audio_stats(&self, stats: RawSlice<'_, AudioRecvStats>) {
        let kind = EventKind::RemoteAudioStats;
        self.capture(kind, |ledger| {
            Ok(Event::RemoteAudioStats(copy_records(stats, ledger, kind.as_str())?))
        });
    }

    fn on_local_video_stats(&self, stats: &VideoSendStats<'_>) {
        let kind = EventKind::LocalVideoStats;
        self.capture(kind, |ledger| {
            Ok(Event::LocalVideoStats(stats.deep_copy(ledger, kind.as_str())?))
        });
    }

    fn on_remote_video_stats(&self, stats: RawSlice<'_, VideoRecvStats<'_>>) {
        let kind = EventKind::RemoteVideoStats;
        self.capture(kind, |ledger| {
            Ok(Event::RemoteVideoStats(copy_records(stats, ledger, kind.as_str())?))
        });
    }

    fn on_network_quality(&self, infos: RawSlice<'_, NetworkQualityInfo>) {
        let kind = EventKind::NetworkQuality;
        self.capture(kind, |ledger| {
            Ok(Event::NetworkQuality(copy_records(infos, ledger, kind.as_str())?))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatcher::dispatch_queue;
    use crate::dispatch::policy::QueuePolicy;
    use crate::payload::payload_buffer::PayloadBuffer;
    use crate::engine::raw::to_fixed;

    fn router() -> (EventRouter, crate::dispatch::dispatcher::DrainQueue<Task>) {
        let (handle, drain) = dispatch_queue(QueuePolicy::Unbounded);
        (EventRouter::new(handle, BufferLedger::new()), drain)
    }

    fn drained(drain: &crate::dispatch::dispatcher::DrainQueue<Task>) -> Vec<Event> {
        let mut events = Vec::new();
        drain.drain_pending(|task| {
            if let Task::Event(event) = task {
                events.push(event);
            }
        });
        events
    }

    #[test]
    fn null_strings_become_empty() {
        let (router, drain) = router();
        router.on_user_joined(5, None);

        let events = drained(&drain);
        assert_eq!(events[0].to_args()[1].as_str(), Some(""));
    }

    #[test]
    fn unterminated_device_id_is_bounded() {
        let (router, drain) = router();
        let device: DeviceId = [b'a' as std::ffi::c_char; MAX_DEVICE_ID_LENGTH];
        router.on_audio_default_device_changed(&device, 1);

        match &drained(&drain)[0] {
            Event::AudioDefaultDeviceChanged { device_id, .. } => {
                assert_eq!(device_id.len(), MAX_DEVICE_ID_LENGTH)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn device_id_stops_at_terminator() {
        let (router, drain) = router();
        let device: DeviceId = to_fixed("{0.0.1.00000000}.{mic}");
        router.on_video_device_state_changed(&device, 3, 1);

        let args = drained(&drain)[0].to_args();
        assert_eq!(args[0].as_str(), Some("{0.0.1.00000000}.{mic}"));
    }

    #[test]
    fn user_uids_keep_all_64_bits() {
        let (router, drain) = router();
        router.on_user_left(u64::MAX, 1);
        router.on_user_video_start(1 << 63, 0);

        let events = drained(&drain);
        assert_eq!(events[0].to_args()[0].as_u64(), Some(u64::MAX));
        assert_eq!(events[1].to_args()[0].as_u64(), Some(1 << 63));
    }

    #[test]
    fn sei_message_is_bounded_by_size() {
        let (router, drain) = router();
        let data = b"hello\0trailing";
        router.on_recv_sei_msg(9, RawSlice::from(&data[..]));

        let args = drained(&drain)[0].to_args();
        assert_eq!(args[1].as_str(), Some("hello"));
        assert_eq!(args[2].as_u64(), Some(data.len() as u64));
    }

    #[test]
    fn null_stats_with_count_become_empty() {
        let (router, drain) = router();
        let stats = unsafe { RawSlice::<AudioRecvStats>::from_raw_parts(std::ptr::null(), 4) };
        router.on_remote_audio_stats(stats);

        let args = drained(&drain)[0].to_args();
        assert_eq!(args[0].as_u64(), Some(0));
        assert_eq!(args[1].as_seq().map(|s| s.len()), Some(0));
    }

    #[test]
    fn capture_frame_is_not_queued() {
        let (router, drain) = router();
        let pixels = [0u8; 16];
        let frame = CaptureVideoFrame {
            data: pixels.as_ptr().cast(),
            video_type: 0,
            width: 4,
            height: 4,
            count: 1,
            offset: [0; MAX_PLANE_COUNT],
            stride: [4, 0, 0, 0],
            rotation: 0,
            _marker: std::marker::PhantomData,
        };
        router.on_capture_video_frame(&frame);
        router.on_capture_video_frame(&frame);

        assert!(drained(&drain).is_empty());
        assert_eq!(router.ledger().allocated(), 0);
    }

    #[test]
    fn failed_capture_queues_nothing_and_releases_partial_copies() {
        let (router, drain) = router();
        router.capture(EventKind::RemoteAudioStats, |ledger| {
            let _partial = PayloadBuffer::from_vec(ledger, vec![AudioRecvStats::default()]);
            Err(BridgeError::Allocation { event: "onRemoteAudioStats", requested: usize::MAX })
        });

        assert_eq!(drain.stats().enqueued, 0);
        assert!(drained(&drain).is_empty());
        assert_eq!(router.ledger().allocated(), 1);
        assert_eq!(router.ledger().live(), 0);
    }

    #[test]
    fn closed_queue_releases_the_copy() {
        let (router, drain) = router();
        drain.close();
        let stats = [NetworkQualityInfo::default()];
        router.on_network_quality(RawSlice::from(&stats));

        assert_eq!(router.ledger().allocated(), 1);
        assert_eq!(router.ledger().live(), 0);
    }
}
