// Malformed compressed input:
// * garbage, truncation, bit flips and trailing bytes return the sentinel
// * no panic escapes, no scratch is left unerased

mod common;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use codec_core::{
        boundary::{Boundary, BoundaryConfig},
        compression::CompressionCodec,
    };

    use super::common::{HostValue, MemoryHost, all_byte_values};

    const CODECS: [CompressionCodec; 2] = [CompressionCodec::Zstd, CompressionCodec::Deflate];

    fn boundary(codec: CompressionCodec) -> Boundary {
        Boundary::from_config(BoundaryConfig::with_codec(codec))
    }

    fn compressed(boundary: &Boundary, host: &MemoryHost, data: &[u8]) -> Vec<u8> {
        let out = boundary.compress(host, Some(&HostValue::bytes(data)));
        out.output().to_vec()
    }

// # 1. Concrete scenario: three garbage bytes

    #[test]
    fn garbage_stream_yields_sentinel() {
        let host = MemoryHost::new();
        for codec in CODECS {
            let result = boundary(codec).decompress(&host, Some(&HostValue::bytes(vec![0xFF, 0x00, 0x01])));
            assert!(host.is_failed(&result), "{codec:?}");
        }
    }

// # 2. Every truncation of a valid stream fails

    #[test]
    fn every_truncation_fails() {
        let host = MemoryHost::new();
        for codec in CODECS {
            let b = boundary(codec);
            let full = compressed(&b, &host, &all_byte_values().repeat(4));

            for cut in 0..full.len() {
                let result = b.decompress(&host, Some(&HostValue::bytes(&full[..cut])));
                assert!(host.is_failed(&result), "{codec:?} truncated to {cut} of {}", full.len());
            }
            let snap = b.telemetry();
            assert!(snap.sanity_check(), "{codec:?}: {snap:?}");
            assert_eq!(snap.outputs_registered, 1);
        }
    }

// # 3. Trailing bytes after a valid stream fail

    #[test]
    fn trailing_bytes_fail() {
        let host = MemoryHost::new();
        for codec in CODECS {
            let b = boundary(codec);
            let mut data = compressed(&b, &host, b"payload payload payload");
            data.push(0x00);

            let result = b.decompress(&host, Some(&HostValue::bytes(data)));
            assert!(host.is_failed(&result), "{codec:?}");
        }
    }

// # 4. Single-bit flips in the payload are caught by the checksum

    #[test]
    fn payload_bit_flips_fail() {
        let host = MemoryHost::new();
        for codec in CODECS {
            let b = boundary(codec);
            let original = all_byte_values();
            let good = compressed(&b, &host, &original);

            for idx in 0..good.len() {
                let mut bad = good.clone();
                bad[idx] ^= 0x01;
                let result = b.decompress(&host, Some(&HostValue::bytes(bad)));
                // A flip in an ignored header bit may still decode, but only to the original.
                if !host.is_failed(&result) {
                    assert_eq!(result.output().as_slice(), &original[..], "{codec:?} flip at {idx}");
                }
            }
            assert!(b.telemetry().sanity_check());
        }
    }

// # 5. Forged size header above the configured bound

    #[test]
    fn forged_length_above_limit_fails_before_allocation() {
        let host = MemoryHost::new();
        let b = Boundary::from_config(BoundaryConfig::new(Some(CompressionCodec::Deflate), Some(1024)));

        let mut forged = vec![0u8; 16];
        forged[..4].copy_from_slice(&u32::MAX.to_le_bytes());
        let result = b.decompress(&host, Some(&HostValue::bytes(forged)));

        assert!(host.is_failed(&result));
        let snap = b.telemetry();
        assert_eq!(snap.size_failures, 1);
        assert_eq!(snap.scratch_allocated, 0);
    }

// # 6. Skippable zstd frame is not compressed data

    #[test]
    fn skippable_frame_yields_sentinel() {
        let host = MemoryHost::new();
        let b = Boundary::default();

        let skippable = vec![0x50, 0x2A, 0x4D, 0x18, 0x00, 0x00, 0x00, 0x00];
        let result = b.decompress(&host, Some(&HostValue::bytes(skippable)));

        assert!(host.is_failed(&result));
        let snap = b.telemetry();
        assert_eq!(snap.size_failures, 1);
        assert_eq!(snap.outputs_registered, 0);
    }

// # 7. Forged size headers under the default limit never allocate

    #[test]
    fn forged_zstd_content_size_fails_before_allocation() {
        let host = MemoryHost::new();
        let b = Boundary::default();

        // 16-byte frame declaring 512 MiB, body is one empty raw block.
        let mut forged = vec![0x28, 0xB5, 0x2F, 0xFD, 0xE0];
        forged.extend_from_slice(&(512u64 << 20).to_le_bytes());
        forged.extend_from_slice(&[0x01, 0x00, 0x00]);
        let result = b.decompress(&host, Some(&HostValue::bytes(forged)));

        assert!(host.is_failed(&result));
        let snap = b.telemetry();
        assert_eq!(snap.size_failures, 1);
        assert_eq!(snap.scratch_allocated, 0);
        assert_eq!(snap.scratch_bytes_wiped, 0);
    }

    #[test]
    fn forged_deflate_length_fails_before_allocation() {
        let host = MemoryHost::new();
        let b = boundary(CompressionCodec::Deflate);

        for body in [0usize, 8, 64] {
            let mut forged = vec![0u8; 8 + body];
            forged[..4].copy_from_slice(&0x3FFF_FFFFu32.to_le_bytes());
            let result = b.decompress(&host, Some(&HostValue::bytes(forged)));
            assert!(host.is_failed(&result), "body {body}");
        }

        let snap = b.telemetry();
        assert_eq!(snap.size_failures, 3);
        assert_eq!(snap.scratch_allocated, 0);
    }

// # 8. Property: arbitrary bytes never panic and never leak scratch

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_arbitrary_input_is_contained(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let host = MemoryHost::new();
            for codec in CODECS {
                let b = boundary(codec);
                let result = b.decompress(&host, Some(&HostValue::bytes(data.clone())));
                drop(result);
                let snap = b.telemetry();
                prop_assert!(snap.sanity_check());
                prop_assert_eq!(snap.outstanding_outputs(), 0);
            }
        }
    }
}
