// rtc_bridge/src/marshal/to_host.rs
//! Conversions from owned engine records to host values. Field names follow
//! the engine structs, in declaration order.
use crate::payload::deep_copy::{LocalVideoStats, RemoteVideoStats};
use crate::marshal::host_value::{HostValue, RecordBuilder};
use crate::payload::payload_buffer::PayloadBuffer;
use crate::engine::raw::fixed_str;
use crate::engine::types::*;

pub trait ToHostValue {
    fn to_host_value(&self) -> HostValue;
}

impl<T: ToHostValue> ToHostValue for PayloadBuffer<T> {
    fn to_host_value(&self) -> HostValue {
        HostValue::Seq(self.iter().map(ToHostValue::to_host_value).collect())
    }
}

impl ToHostValue for RtcStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("cpu_app_usage", self.cpu_app_usage)
            .field("cpu_idle_usage", self.cpu_idle_usage)
            .field("cpu_total_usage", self.cpu_total_usage)
            .field("memory_app_usage", self.memory_app_usage)
            .field("memory_total_usage", self.memory_total_usage)
            .field("memory_app_kbytes", self.memory_app_kbytes)
            .field("total_duration", self.total_duration)
            .field("tx_bytes", self.tx_bytes)
            .field("rx_bytes", self.rx_bytes)
            .field("tx_audio_bytes", self.tx_audio_bytes)
            .field("tx_video_bytes", self.tx_video_bytes)
            .field("rx_audio_bytes", self.rx_audio_bytes)
            .field("rx_video_bytes", self.rx_video_bytes)
            .field("tx_audio_kbitrate", self.tx_audio_kbitrate)
            .field("rx_audio_kbitrate", self.rx_audio_kbitrate)
            .field("tx_video_kbitrate", self.tx_video_kbitrate)
            .field("rx_video_kbitrate", self.rx_video_kbitrate)
            .field("up_rtt", self.up_rtt)
            .field("down_rtt", self.down_rtt)
            .field("tx_audio_packet_loss_rate", self.tx_audio_packet_loss_rate)
            .field("tx_video_packet_loss_rate", self.tx_video_packet_loss_rate)
            .field("tx_audio_packet_loss_sum", self.tx_audio_packet_loss_sum)
            .field("tx_video_packet_loss_sum", self.tx_video_packet_loss_sum)
            .field("tx_audio_jitter", self.tx_audio_jitter)
            .field("tx_video_jitter", self.tx_video_jitter)
            .field("rx_audio_packet_loss_rate", self.rx_audio_packet_loss_rate)
            .field("rx_video_packet_loss_rate", self.rx_video_packet_loss_rate)
            .field("rx_audio_packet_loss_sum", self.rx_audio_packet_loss_sum)
            .field("rx_video_packet_loss_sum", self.rx_video_packet_loss_sum)
            .field("rx_audio_jitter", self.rx_audio_jitter)
            .field("rx_video_jitter", self.rx_video_jitter)
            .finish()
    }
}

impl ToHostValue for AudioSendStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("num_channels", self.num_channels)
            .field("sent_sample_rate", self.sent_sample_rate)
            .field("sent_bitrate", self.sent_bitrate)
            .field("audio_loss_rate", self.audio_loss_rate)
            .field("rtt", self.rtt)
            .field("volume", self.volume)
            .finish()
    }
}

impl ToHostValue for AudioRecvStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("uid", self.uid)
            .field("received_bitrate", self.received_bitrate)
            .field("total_frozen_time", self.total_frozen_time)
            .field("frozen_rate", self.frozen_rate)
            .field("audio_loss_rate", self.audio_loss_rate)
            .field("volume", self.volume)
            .finish()
    }
}

impl ToHostValue for VideoLayerSendStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("layer_type", self.layer_type)
            .field("width", self.width)
            .field("height", self.height)
            .field("capture_frame_rate", self.capture_frame_rate)
            .field("render_frame_rate", self.render_frame_rate)
            .field("encoder_frame_rate", self.encoder_frame_rate)
            .field("sent_frame_rate", self.sent_frame_rate)
            .field("sent_bitrate", self.sent_bitrate)
            .field("target_bitrate", self.target_bitrate)
            .field("encoder_bitrate", self.encoder_bitrate)
            .field("codec_name", fixed_str(&self.codec_name))
            .finish()
    }
}

impl ToHostValue for VideoLayerRecvStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("layer_type", self.layer_type)
            .field("width", self.width)
            .field("height", self.height)
            .field("received_bitrate", self.received_bitrate)
            .field("fps", self.fps)
            .field("packet_loss_rate", self.packet_loss_rate)
            .field("decoder_frame_rate", self.decoder_frame_rate)
            .field("render_frame_rate", self.render_frame_rate)
            .field("total_frozen_time", self.total_frozen_time)
            .field("frozen_rate", self.frozen_rate)
            .field("codec_name", fixed_str(&self.codec_name))
            .finish()
    }
}

impl ToHostValue for LocalVideoStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("video_layers_list", self.layers.to_host_value())
            .finish()
    }
}

impl ToHostValue for RemoteVideoStats {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("uid", self.uid)
            .field("video_layers_list", self.layers.to_host_value())
            .finish()
    }
}

impl ToHostValue for NetworkQualityInfo {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("uid", self.uid)
            .field("tx_quality", self.tx_quality)
            .field("rx_quality", self.rx_quality)
            .finish()
    }
}

impl ToHostValue for AudioVolumeInfo {
    fn to_host_value(&self) -> HostValue {
        RecordBuilder::new()
            .field("uid", self.uid)
            .field("volume", self.volume)
            .finish()
    }
}
