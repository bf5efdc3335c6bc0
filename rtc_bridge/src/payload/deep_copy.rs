// rtc_bridge/src/payload/deep_copy.rs
use crate::payload::payload_buffer::PayloadBuffer;
use crate::payload::ledger::BufferLedger;
use crate::engine::raw::RawSlice;
use crate::error::BridgeResult;
use crate::engine::types::*;

/// Engine records that can be copied into memory the bridge owns.
pub trait DeepCopy {
    type Owned: Send + 'static;

    fn deep_copy(&self, ledger: &BufferLedger, event: &'static str) -> BridgeResult<Self::Owned>;
}

macro_rules! impl_flat_copy {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepCopy for $ty {
                type Owned = $ty;

                fn deep_copy(&self, _ledger: &BufferLedger, _event: &'static str) -> BridgeResult<$ty> {
                    Ok(*self)
                }
            }
        )*
    };
}

impl_flat_copy!(
    AudioRecvStats,
    NetworkQualityInfo,
    AudioVolumeInfo,
    VideoLayerSendStats,
    VideoLayerRecvStats,
);

/// Owned copy of [`VideoSendStats`].
#[derive(Debug)]
pub struct LocalVideoStats {
    pub layers: PayloadBuffer<VideoLayerSendStats>,
}

/// Owned copy of [`VideoRecvStats`].
#[derive(Debug)]
pub struct RemoteVideoStats {
    pub uid: Uid,
    pub layers: PayloadBuffer<VideoLayerRecvStats>,
}

impl DeepCopy for VideoSendStats<'_> {
    type Owned = LocalVideoStats;

    fn deep_copy(&self, ledger: &BufferLedger, event: &'static str) -> BridgeResult<LocalVideoStats> {
        Ok(LocalVideoStats { layers: copy_records(self.layers(), ledger, event)? })
    }
}

impl DeepCopy for VideoRecvStats<'_> {
    type Owned = RemoteVideoStats;

    fn deep_copy(&self, ledger: &BufferLedger, event: &'static str) -> BridgeResult<RemoteVideoStats> {
        Ok(RemoteVideoStats {
            uid: self.uid,
            layers: copy_records(self.layers(), ledger, event)?,
        })
    }
}

/// Deep-copies every record of an engine array into a fresh buffer.
///
/// A null source copies nothing even if the engine declared a count. On
/// failure whatever was already copied is released before returning.
pub fn copy_records<T: DeepCopy>(
    records: RawSlice<'_, T>,
    ledger: &BufferLedger,
    event: &'static str,
) -> BridgeResult<PayloadBuffer<T::Owned>> {
    if records.is_null() && records.declared_len() > 0 {
        log::debug!(
            "'{}' declared {} records behind a null pointer, copying none.",
            event,
            records.declared_len()
        );
    }

    let source = records.as_slice();
    let mut buffer = PayloadBuffer::try_with_capacity(ledger, source.len(), event)?;
    for record in source {
        buffer.push(record.deep_copy(ledger, event)?);
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::raw::to_fixed;

    fn layer(width: i32) -> VideoLayerRecvStats {
        VideoLayerRecvStats {
            width,
            height: width / 2,
            codec_name: to_fixed("H264"),
            ..Default::default()
        }
    }

    #[test]
    fn copies_flat_records_in_order() {
        let ledger = BufferLedger::new();
        let src = [
            AudioRecvStats { uid: 1, volume: 10, ..Default::default() },
            AudioRecvStats { uid: 2, volume: 20, ..Default::default() },
        ];
        let copy = copy_records(RawSlice::from(&src), &ledger, "onRemoteAudioStats").unwrap();
        assert_eq!(copy.as_slice(), &src);
        assert_eq!(ledger.live(), 1);
    }

    #[test]
    fn zero_records_give_an_empty_buffer() {
        let ledger = BufferLedger::new();
        let copy = copy_records::<NetworkQualityInfo>(RawSlice::empty(), &ledger, "onNetworkQuality").unwrap();
        assert!(copy.is_empty());
        assert_eq!(ledger.live(), 1);
    }

    #[test]
    fn null_layers_with_a_count_copy_as_empty() {
        let ledger = BufferLedger::new();
        let user = unsafe { VideoRecvStats::from_raw_parts(9, std::ptr::null(), 4) };
        let copy = user.deep_copy(&ledger, "onRemoteVideoStats").unwrap();
        assert_eq!(copy.uid, 9);
        assert!(copy.layers.is_empty());
    }

    #[test]
    fn nested_copy_survives_the_source() {
        let ledger = BufferLedger::new();
        let copy = {
            let layers = vec![layer(640), layer(320)];
            let users = vec![
                VideoRecvStats::new(5, RawSlice::from(layers.as_slice())),
                VideoRecvStats::new(6, RawSlice::empty()),
            ];
            copy_records(RawSlice::from(users.as_slice()), &ledger, "onRemoteVideoStats").unwrap()
        };

        assert_eq!(copy.len(), 2);
        assert_eq!(copy[0].layers.len(), 2);
        assert_eq!(copy[0].layers[1].width, 320);
        assert!(copy[1].layers.is_empty());
        // outer + one per user
        assert_eq!(ledger.live(), 3);

        drop(copy);
        assert_eq!(ledger.live(), 0);
    }
}
