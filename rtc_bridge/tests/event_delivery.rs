// rtc_bridge/tests/event_delivery.rs
use rtc_bridge::engine::handler::{RtcEngineEventHandler, RtcMediaStatsObserver};
use rtc_bridge::host::native_host::{NativeContext, NativeFn, NativeHost};
use rtc_bridge::marshal::host_value::HostValue;
use rtc_bridge::dispatch::policy::QueuePolicy;
use rtc_bridge::engine::raw::{RawSlice, to_fixed};
use rtc_bridge::dispatch::task::Task;
use rtc_bridge::engine::types::*;
use rtc_bridge::bridge::Bridge;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

type Calls = Arc<Mutex<Vec<(ThreadId, Vec<HostValue>)>>>;

fn recorder() -> (NativeFn, Calls) {
    let calls: Calls = Arc::default();
    let sink = Arc::clone(&calls);
    let handler = NativeHost::function(move |_, args| {
        sink.lock().unwrap().push((thread::current().id(), args.to_vec()));
        Ok(())
    });
    (handler, calls)
}

fn bridge() -> Bridge<NativeHost> {
    Bridge::new(NativeHost, QueuePolicy::Unbounded)
}

fn args_of(calls: &Calls) -> Vec<Vec<HostValue>> {
    calls.lock().unwrap().iter().map(|(_, args)| args.clone()).collect()
}

#[test]
fn join_channel_reaches_handler_on_consumer_thread() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onJoinChannel", handler, NativeHost::no_context());

    let router = bridge.router();
    thread::spawn(move || router.on_join_channel(42, 7, 0, 1500))
        .join()
        .unwrap();

    assert_eq!(bridge.pump(), 1);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, thread::current().id());
    assert_eq!(
        calls[0].1,
        [HostValue::UInt(42), HostValue::UInt(7), HostValue::Int(0), HostValue::UInt(1500)]
    );
}

#[test]
fn context_is_handed_back() {
    let bridge = bridge();
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let handler = NativeHost::function(move |ctx: &NativeContext, _| {
        *sink.lock().unwrap() = ctx.downcast_ref::<u32>().copied();
        Ok(())
    });
    bridge.register("onLeaveChannel", handler, Arc::new(99u32));

    bridge.router().on_leave_channel(0);
    bridge.pump();

    assert_eq!(*seen.lock().unwrap(), Some(99));
}

#[test]
fn remote_audio_stats_arrive_in_order() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onRemoteAudioStats", handler, NativeHost::no_context());

    let stats: Vec<AudioRecvStats> = (1..=3)
        .map(|uid| AudioRecvStats { uid, received_bitrate: uid as i32 * 10, ..Default::default() })
        .collect();
    bridge.router().on_remote_audio_stats(RawSlice::from(stats.as_slice()));
    drop(stats);
    bridge.pump();

    let args = &args_of(&calls)[0];
    assert_eq!(args[0], HostValue::UInt(3));
    let records = args[1].as_seq().unwrap();
    let uids: Vec<_> = records.iter().map(|r| r.get("uid").and_then(HostValue::as_u64)).collect();
    assert_eq!(uids, [Some(1), Some(2), Some(3)]);
    assert_eq!(records[2].get("received_bitrate"), Some(&HostValue::Int(30)));
    assert_eq!(bridge.ledger().live(), 0);
}

#[test]
fn remote_video_user_without_layers_has_empty_list() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onRemoteVideoStats", handler, NativeHost::no_context());

    let layers = [VideoLayerRecvStats {
        width: 640,
        height: 360,
        codec_name: to_fixed("VP8"),
        ..Default::default()
    }];
    let users = [
        VideoRecvStats::new(11, RawSlice::empty()),
        VideoRecvStats::new(12, RawSlice::from(&layers)),
    ];
    bridge.router().on_remote_video_stats(RawSlice::from(&users));
    bridge.pump();

    let args = &args_of(&calls)[0];
    assert_eq!(args[0], HostValue::UInt(2));
    let users = args[1].as_seq().unwrap();
    assert_eq!(users[0].get("uid"), Some(&HostValue::UInt(11)));
    assert_eq!(users[0].get("video_layers_list"), Some(&HostValue::Seq(Vec::new())));

    let second = users[1].get("video_layers_list").and_then(HostValue::as_seq).unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].get("codec_name").and_then(HostValue::as_str), Some("VP8"));
    assert_eq!(bridge.ledger().live(), 0);
}

#[test]
fn zero_count_gives_empty_sequence() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onNetworkQuality", handler, NativeHost::no_context());

    bridge.router().on_network_quality(RawSlice::empty());
    bridge.pump();

    assert_eq!(args_of(&calls)[0], [HostValue::UInt(0), HostValue::Seq(Vec::new())]);
}

#[test]
fn unregistered_events_are_released() {
    let bridge = bridge();
    let router = bridge.router();
    let before = bridge.ledger().live();

    let infos = [NetworkQualityInfo { uid: 1, tx_quality: 2, rx_quality: 3 }];
    router.on_network_quality(RawSlice::from(&infos));
    let speakers = [AudioVolumeInfo { uid: 1, volume: 10 }];
    router.on_remote_audio_volume_indication(RawSlice::from(&speakers), 10);
    assert_eq!(bridge.ledger().live(), 2);

    assert_eq!(bridge.pump(), 2);
    assert_eq!(bridge.ledger().live(), before);
    assert_eq!(bridge.ledger().allocated(), bridge.ledger().released());
}

#[test]
fn single_producer_order_is_kept() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onUserAudioStart", handler, NativeHost::no_context());

    let router = bridge.router();
    for uid in [1u64, 2, 3] {
        router.on_user_audio_start(uid);
    }
    bridge.pump();

    assert_eq!(
        args_of(&calls),
        [[HostValue::UInt(1)], [HostValue::UInt(2)], [HostValue::UInt(3)]]
    );
}

#[test]
fn concurrent_producers_do_not_mix_fields() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onFirstVideoFrameDecoded", handler, NativeHost::no_context());

    let producers: Vec<_> = (0..2u32)
        .map(|p| {
            let router = bridge.router();
            thread::spawn(move || {
                for i in 0..500u32 {
                    // width and height both encode the producer and sequence.
                    let tag = p * 10_000 + i;
                    router.on_first_video_frame_decoded(p as u64, tag, tag);
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    bridge.pump();

    let all = args_of(&calls);
    assert_eq!(all.len(), 1000);
    let mut next = [0u32; 2];
    for args in all {
        let p = args[0].as_u64().unwrap() as usize;
        let width = args[1].as_u64().unwrap() as u32;
        assert_eq!(args[2].as_u64(), Some(width as u64));
        assert_eq!(width, p as u32 * 10_000 + next[p]);
        next[p] += 1;
    }
    assert_eq!(next, [500, 500]);
}

#[test]
fn re_registration_replaces_handler() {
    let bridge = bridge();
    let (first, first_calls) = recorder();
    let (second, second_calls) = recorder();

    assert!(!bridge.register("onAudioHowling", first, NativeHost::no_context()));
    assert!(bridge.register("onAudioHowling", second, NativeHost::no_context()));

    bridge.router().on_audio_howling(true);
    bridge.pump();

    assert!(first_calls.lock().unwrap().is_empty());
    assert_eq!(args_of(&second_calls), [[HostValue::Bool(true)]]);
}

#[test]
fn unregister_stops_delivery() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onUserVideoStop", handler, NativeHost::no_context());
    assert!(bridge.unregister("onUserVideoStop"));
    assert!(!bridge.unregister("onUserVideoStop"));

    bridge.router().on_user_video_stop(3);
    bridge.pump();

    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn failing_handler_does_not_stop_later_events() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register(
        "onRemoteAudioStats",
        NativeHost::function(|_, _| Err("boom".to_string())),
        NativeHost::no_context(),
    );
    bridge.register(
        "onUserJoined",
        NativeHost::function(|_, _| panic!("handler bug")),
        NativeHost::no_context(),
    );
    bridge.register("onUserLeft", handler, NativeHost::no_context());

    let router = bridge.router();
    let stats = [AudioRecvStats::default(); 2];
    router.on_remote_audio_stats(RawSlice::from(&stats));
    router.on_user_joined(1, Some(c"alice"));
    router.on_user_left(1, 0);
    assert_eq!(bridge.pump(), 3);

    assert_eq!(args_of(&calls), [[HostValue::UInt(1), HostValue::UInt(0)]]);
    assert_eq!(bridge.ledger().live(), 0);
}

#[test]
fn capture_frame_never_dispatches() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onCaptureVideoFrame", handler, NativeHost::no_context());

    let pixels = [0u8; 64];
    let frame = CaptureVideoFrame {
        data: pixels.as_ptr().cast(),
        video_type: 0,
        width: 8,
        height: 8,
        count: 1,
        offset: [0; MAX_PLANE_COUNT],
        stride: [8, 0, 0, 0],
        rotation: 0,
        _marker: std::marker::PhantomData,
    };
    bridge.router().on_capture_video_frame(&frame);

    assert_eq!(bridge.pump(), 0);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn external_frame_is_forwarded_without_copy() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onPullExternalAudioFrame", handler, NativeHost::no_context());

    let frame = rtc_bridge::payload::external_frame::ExternalFrame::new(vec![1u8, 2, 3, 4]);
    bridge.router().on_pull_external_audio_frame(frame.clone());
    bridge.pump();

    match &args_of(&calls)[0][0] {
        HostValue::Bytes(received) => assert!(received.same_frame(&frame)),
        other => panic!("expected bytes, got {:?}", other),
    }
    assert_eq!(bridge.ledger().allocated(), 0);
}

#[test]
fn custom_tasks_run_on_consumer() {
    let bridge = bridge();
    let ran = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&ran);

    let router = bridge.router();
    let outcome = thread::spawn(move || {
        router
            .dispatch()
            .enqueue(Task::custom(move || *sink.lock().unwrap() = Some(thread::current().id())))
    })
    .join()
    .unwrap();
    assert!(outcome.is_queued());
    bridge.pump();

    assert_eq!(*ran.lock().unwrap(), Some(thread::current().id()));
}

#[test]
fn panicking_custom_task_does_not_stop_the_drain() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onLeaveChannel", handler, NativeHost::no_context());

    let router = bridge.router();
    router.dispatch().enqueue(Task::custom(|| panic!("task failed")));
    router.on_leave_channel(0);

    assert_eq!(bridge.pump(), 2);
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(bridge.stats().executed, 2);
    assert_eq!(bridge.stats().depth, 0);
}

#[test]
fn run_returns_after_shutdown_from_producer() {
    let bridge = bridge();
    let (handler, calls) = recorder();
    bridge.register("onDisconnect", handler, NativeHost::no_context());

    let router = bridge.router();
    let producer = thread::spawn(move || {
        for reason in 0..10 {
            router.on_disconnect(reason);
        }
        router.dispatch().close();
    });

    assert_eq!(bridge.run(), 10);
    producer.join().unwrap();
    assert_eq!(calls.lock().unwrap().len(), 10);
}
