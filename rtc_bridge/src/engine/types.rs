// rtc_bridge/src/engine/types.rs
//! Records as the engine lays them out. Everything here is borrowed from the
//! engine for the duration of one callback.
use crate::engine::raw::{RawSlice, count_u32};
use std::ffi::c_char;
use std::ffi::c_void;
use std::marker::PhantomData;

pub type ChannelId = u64;
pub type Uid = u64;
pub type ErrorCode = i32;

pub const MAX_DEVICE_ID_LENGTH: usize = 256;
pub const MAX_CODEC_NAME_LENGTH: usize = 64;
pub const MAX_PLANE_COUNT: usize = 4;

/// Device identifier as the engine passes it.
pub type DeviceId = [c_char; MAX_DEVICE_ID_LENGTH];
pub type CodecName = [c_char; MAX_CODEC_NAME_LENGTH];

/// Session-wide statistics, reported every two seconds.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RtcStats {
    pub cpu_app_usage: u32,
    pub cpu_idle_usage: u32,
    pub cpu_total_usage: u32,
    pub memory_app_usage: u32,
    pub memory_total_usage: u32,
    pub memory_app_kbytes: u32,
    pub total_duration: i32,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_audio_bytes: u64,
    pub tx_video_bytes: u64,
    pub rx_audio_bytes: u64,
    pub rx_video_bytes: u64,
    pub tx_audio_kbitrate: i32,
    pub rx_audio_kbitrate: i32,
    pub tx_video_kbitrate: i32,
    pub rx_video_kbitrate: i32,
    pub up_rtt: i32,
    pub down_rtt: i32,
    pub tx_audio_packet_loss_rate: i32,
    pub tx_video_packet_loss_rate: i32,
    pub tx_audio_packet_loss_sum: i32,
    pub tx_video_packet_loss_sum: i32,
    pub tx_audio_jitter: i32,
    pub tx_video_jitter: i32,
    pub rx_audio_packet_loss_rate: i32,
    pub rx_video_packet_loss_rate: i32,
    pub rx_audio_packet_loss_sum: i32,
    pub rx_video_packet_loss_sum: i32,
    pub rx_audio_jitter: i32,
    pub rx_video_jitter: i32,
}

/// Local audio uplink statistics.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioSendStats {
    pub num_channels: i32,
    pub sent_sample_rate: i32,
    pub sent_bitrate: i32,
    pub audio_loss_rate: i32,
    pub rtt: i64,
    pub volume: u32,
}

/// Per remote user audio statistics.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioRecvStats {
    pub uid: Uid,
    pub received_bitrate: i32,
    pub total_frozen_time: i32,
    pub frozen_rate: i32,
    pub audio_loss_rate: i32,
    pub volume: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoLayerSendStats {
    pub layer_type: i32,
    pub width: i32,
    pub height: i32,
    pub capture_frame_rate: i32,
    pub render_frame_rate: i32,
    pub encoder_frame_rate: i32,
    pub sent_frame_rate: i32,
    pub sent_bitrate: i32,
    pub target_bitrate: i32,
    pub encoder_bitrate: i32,
    pub codec_name: CodecName,
}

impl Default for VideoLayerSendStats {
    fn default() -> Self {
        Self {
            layer_type: 0,
            width: 0,
            height: 0,
            capture_frame_rate: 0,
            render_frame_rate: 0,
            encoder_frame_rate: 0,
            sent_frame_rate: 0,
            sent_bitrate: 0,
            target_bitrate: 0,
            encoder_bitrate: 0,
            codec_name: [0; MAX_CODEC_NAME_LENGTH],
        }
    }
}

/// Local video statistics with one entry per encoded layer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VideoSendStats<'a> {
    video_layers_list: *const VideoLayerSendStats,
    video_layers_count: u32,
    _marker: PhantomData<&'a [VideoLayerSendStats]>,
}

impl<'a> VideoSendStats<'a> {
    pub fn new(layers: RawSlice<'a, VideoLayerSendStats>) -> Self {
        let slice = layers.as_slice();
        Self {
            video_layers_list: slice.as_ptr(),
            video_layers_count: count_u32(slice.len()),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// Same contract as [`RawSlice::from_raw_parts`].
    pub unsafe fn from_raw_parts(list: *const VideoLayerSendStats, count: u32) -> Self {
        Self { video_layers_list: list, video_layers_count: count, _marker: PhantomData }
    }

    pub fn layers(&self) -> RawSlice<'a, VideoLayerSendStats> {
        // SAFETY: built by `new` from a valid slice or by `from_raw_parts`
        // under the engine's validity contract.
        unsafe { RawSlice::from_raw_parts(self.video_layers_list, self.video_layers_count as usize) }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoLayerRecvStats {
    pub layer_type: i32,
    pub width: i32,
    pub height: i32,
    pub received_bitrate: i32,
    pub fps: i32,
    pub packet_loss_rate: i32,
    pub decoder_frame_rate: i32,
    pub render_frame_rate: i32,
    pub total_frozen_time: i32,
    pub frozen_rate: i32,
    pub codec_name: CodecName,
}

impl Default for VideoLayerRecvStats {
    fn default() -> Self {
        Self {
            layer_type: 0,
            width: 0,
            height: 0,
            received_bitrate: 0,
            fps: 0,
            packet_loss_rate: 0,
            decoder_frame_rate: 0,
            render_frame_rate: 0,
            total_frozen_time: 0,
            frozen_rate: 0,
            codec_name: [0; MAX_CODEC_NAME_LENGTH],
        }
    }
}

/// Per remote user video statistics with one entry per received layer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VideoRecvStats<'a> {
    pub uid: Uid,
    video_layers_list: *const VideoLayerRecvStats,
    video_layers_count: u32,
    _marker: PhantomData<&'a [VideoLayerRecvStats]>,
}

impl<'a> VideoRecvStats<'a> {
    pub fn new(uid: Uid, layers: RawSlice<'a, VideoLayerRecvStats>) -> Self {
        let slice = layers.as_slice();
        Self {
            uid,
            video_layers_list: slice.as_ptr(),
            video_layers_count: count_u32(slice.len()),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// Same contract as [`RawSlice::from_raw_parts`].
    pub unsafe fn from_raw_parts(uid: Uid, list: *const VideoLayerRecvStats, count: u32) -> Self {
        Self { uid, video_layers_list: list, video_layers_count: count, _marker: PhantomData }
    }

    pub fn layers(&self) -> RawSlice<'a, VideoLayerRecvStats> {
        // SAFETY: see `VideoSendStats::layers`.
        unsafe { RawSlice::from_raw_parts(self.video_layers_list, self.video_layers_count as usize) }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkQualityInfo {
    pub uid: Uid,
    pub tx_quality: u32,
    pub rx_quality: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioVolumeInfo {
    pub uid: Uid,
    pub volume: u32,
}

/// A captured video frame as handed to `on_capture_video_frame`.
#[derive(Debug, Clone, Copy)]
pub struct CaptureVideoFrame<'a> {
    pub data: *const c_void,
    pub video_type: u32,
    pub width: u32,
    pub height: u32,
    pub count: u32,
    pub offset: [u32; MAX_PLANE_COUNT],
    pub stride: [u32; MAX_PLANE_COUNT],
    pub rotation: u32,
    pub _marker: PhantomData<&'a [u8]>,
}
