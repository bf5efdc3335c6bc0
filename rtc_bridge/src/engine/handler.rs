// rtc_bridge/src/engine/handler.rs
//! Observer interfaces the engine calls into. Every method may be called from
//! any engine thread, concurrently, and its arguments are only valid until it
//! returns. Unhandled notifications default to no-ops.
use crate::payload::external_frame::ExternalFrame;
use crate::engine::raw::RawSlice;
use crate::engine::types::*;
use std::ffi::CStr;

#[allow(unused_variables)]
pub trait RtcEngineEventHandler: Send + Sync {
    fn on_error(&self, code: ErrorCode, msg: Option<&CStr>) {}
    fn on_warning(&self, code: ErrorCode, msg: Option<&CStr>) {}
    fn on_released_hw_resources(&self, result: ErrorCode) {}

    fn on_join_channel(&self, cid: ChannelId, uid: Uid, result: ErrorCode, elapsed: u64) {}
    fn on_connection_state_change(&self, state: u32, reason: u32) {}
    fn on_reconnecting_start(&self, cid: ChannelId, uid: Uid) {}
    fn on_rejoin_channel(&self, cid: ChannelId, uid: Uid, result: ErrorCode, elapsed: u64) {}
    fn on_leave_channel(&self, result: ErrorCode) {}
    fn on_disconnect(&self, reason: ErrorCode) {}
    fn on_client_role_changed(&self, old_role: u32, new_role: u32) {}

    fn on_user_joined(&self, uid: Uid, user_name: Option<&CStr>) {}
    fn on_user_left(&self, uid: Uid, reason: u32) {}
    fn on_user_audio_start(&self, uid: Uid) {}
    fn on_user_audio_stop(&self, uid: Uid) {}
    fn on_user_video_start(&self, uid: Uid, max_profile: u32) {}
    fn on_user_video_stop(&self, uid: Uid) {}
    fn on_user_sub_stream_video_start(&self, uid: Uid, max_profile: u32) {}
    fn on_user_sub_stream_video_stop(&self, uid: Uid) {}
    fn on_user_video_profile_update(&self, uid: Uid, max_profile: u32) {}
    fn on_user_audio_mute(&self, uid: Uid, mute: bool) {}
    fn on_user_video_mute(&self, uid: Uid, mute: bool) {}

    fn on_audio_device_state_changed(&self, device_id: &DeviceId, device_type: u32, device_state: u32) {}
    fn on_audio_default_device_changed(&self, device_id: &DeviceId, device_type: u32) {}
    fn on_video_device_state_changed(&self, device_id: &DeviceId, device_type: u32, device_state: u32) {}

    fn on_first_audio_data_received(&self, uid: Uid) {}
    fn on_first_video_data_received(&self, uid: Uid) {}
    fn on_first_audio_frame_decoded(&self, uid: Uid) {}
    fn on_first_video_frame_decoded(&self, uid: Uid, width: u32, height: u32) {}
    fn on_capture_video_frame(&self, frame: &CaptureVideoFrame<'_>) {}

    fn on_audio_mixing_state_changed(&self, state: u32, error_code: u32) {}
    fn on_audio_mixing_timestamp_update(&self, timestamp_ms: u64) {}
    fn on_audio_effect_finished(&self, effect_id: u32) {}
    fn on_local_audio_volume_indication(&self, volume: i32) {}
    fn on_remote_audio_volume_indication(&self, speakers: RawSlice<'_, AudioVolumeInfo>, total_volume: i32) {}

    fn on_add_live_stream_task(&self, task_id: Option<&CStr>, url: Option<&CStr>, error_code: ErrorCode) {}
    fn on_update_live_stream_task(&self, task_id: Option<&CStr>, url: Option<&CStr>, error_code: ErrorCode) {}
    fn on_remove_live_stream_task(&self, task_id: Option<&CStr>, error_code: ErrorCode) {}
    fn on_live_stream_state(&self, task_id: Option<&CStr>, url: Option<&CStr>, state: u32) {}

    fn on_audio_howling(&self, howling: bool) {}
    fn on_recv_sei_msg(&self, uid: Uid, data: RawSlice<'_, u8>) {}
    fn on_pull_external_audio_frame(&self, frame: ExternalFrame) {}
}

/// Periodic statistics observer.
#[allow(unused_variables)]
pub trait RtcMediaStatsObserver: Send + Sync {
    fn on_rtc_stats(&self, stats: &RtcStats) {}
    fn on_local_audio_stats(&self, stats: &AudioSendStats) {}
    fn on_remote_audio_stats(&self, stats: RawSlice<'_, AudioRecvStats>) {}
    fn on_local_video_stats(&self, stats: &VideoSendStats<'_>) {}
    fn on_remote_video_stats(&self, stats: RawSlice<'_, VideoRecvStats<'_>>) {}
    fn on_network_quality(&self, infos: RawSlice<'_, NetworkQualityInfo>) {}
}
