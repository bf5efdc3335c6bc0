// rtc_lua/src/simulator.rs
use rtc_bridge::engine::handler::{RtcEngineEventHandler, RtcMediaStatsObserver};
use rtc_bridge::payload::external_frame::ExternalFrame;
use rtc_bridge::router::event_router::EventRouter;
use rtc_bridge::engine::raw::{RawSlice, to_fixed};
use rtc_bridge::engine::types::*;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use std::sync::Arc;

const CHANNEL: ChannelId = 1001;
const LOCAL_UID: Uid = 7;
const REMOTE_UIDS: [Uid; 2] = [21, 22];

/// Plays a short call session from a background thread, the way the engine
/// would: join, a few stats rounds, leave. Closes the queue when done so a
/// blocking drain loop returns.
pub fn spawn_session(router: Arc<EventRouter>, rounds: u32, interval: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        play_session(&router, rounds, interval);
        router.dispatch().close();
    })
}

pub fn play_session(router: &EventRouter, rounds: u32, interval: Duration) {
    router.on_join_channel(CHANNEL, LOCAL_UID, 0, 420);
    router.on_user_joined(REMOTE_UIDS[0], Some(c"alice"));
    router.on_user_joined(REMOTE_UIDS[1], Some(c"bob"));
    router.on_audio_default_device_changed(&to_fixed("{0.0.1.00000000}.{mic}"), 1);

    // One 10 ms silence frame, lent to every pull.
    let silence: Arc<dyn AsRef<[u8]> + Send + Sync> = Arc::new(vec![0u8; 320]);

    for round in 0..rounds {
        let tick = round as u64 + 1;

        router.on_rtc_stats(&RtcStats {
            total_duration: (tick * 2) as i32,
            tx_bytes: tick * 48_000,
            rx_bytes: tick * 96_000,
            up_rtt: 30,
            down_rtt: 32,
            ..Default::default()
        });

        let audio: Vec<AudioRecvStats> = REMOTE_UIDS
            .iter()
            .map(|&uid| AudioRecvStats { uid, received_bitrate: 32, volume: 120, ..Default::default() })
            .collect();
        router.on_remote_audio_stats(RawSlice::from(audio.as_slice()));

        let layers = [VideoLayerRecvStats {
            layer_type: 1,
            width: 640,
            height: 360,
            received_bitrate: 600,
            fps: 15,
            codec_name: to_fixed("H264"),
            ..Default::default()
        }];
        // The second user has no video yet.
        let video = [
            VideoRecvStats::new(REMOTE_UIDS[0], RawSlice::from(&layers)),
            VideoRecvStats::new(REMOTE_UIDS[1], RawSlice::empty()),
        ];
        router.on_remote_video_stats(RawSlice::from(&video));

        let quality: Vec<NetworkQualityInfo> = REMOTE_UIDS
            .iter()
            .map(|&uid| NetworkQualityInfo { uid, tx_quality: 1, rx_quality: 2 })
            .collect();
        router.on_network_quality(RawSlice::from(quality.as_slice()));

        let speakers = [AudioVolumeInfo { uid: REMOTE_UIDS[0], volume: 180 }];
        router.on_remote_audio_volume_indication(RawSlice::from(&speakers), 180);

        router.on_pull_external_audio_frame(ExternalFrame::from_shared(Arc::clone(&silence)));

        thread::sleep(interval);
    }

    router.on_user_left(REMOTE_UIDS[1], 0);
    router.on_leave_channel(0);
}
