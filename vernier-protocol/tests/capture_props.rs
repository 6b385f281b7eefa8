//! Property tests for frame capture and decoding

use proptest::prelude::*;
use vernier_protocol::{decode, FrameCapture, RawFrame, FRAME_BITS};

fn feed(capture: &mut FrameCapture, value: u32) {
    for i in 0..FRAME_BITS {
        capture.process_bit((value >> i) & 1 != 0);
    }
}

proptest! {
    #[test]
    fn captured_bytes_match_fed_value(value in 0u32..(1 << 24)) {
        let mut capture = FrameCapture::new();
        feed(&mut capture, value);
        prop_assert!(capture.frame_ready());
        prop_assert_eq!(RawFrame::from_bytes(capture.raw_bytes()).value(), value);
    }

    #[test]
    fn trailing_bits_never_alter_frame(value in 0u32..(1 << 24), extra in proptest::collection::vec(any::<bool>(), 1..32)) {
        let mut capture = FrameCapture::new();
        feed(&mut capture, value);
        let latched = capture.raw_bytes();
        for bit in extra {
            capture.process_bit(bit);
        }
        prop_assert_eq!(capture.raw_bytes(), latched);
    }

    #[test]
    fn decoded_value_is_multiple_of_ten(bytes in any::<[u8; 3]>()) {
        let m = decode(bytes);
        prop_assert_eq!(m.relative_um % 10, 0);
        prop_assert!(m.relative_um.unsigned_abs() <= 655_350);
        prop_assert_eq!(m.absolute_um, 0);
    }

    #[test]
    fn sign_bit_only_flips_sign(counter in any::<u16>()) {
        let positive = RawFrame::new(counter as u32).micrometres();
        let negative = RawFrame::new(counter as u32 | 1 << 20).micrometres();
        prop_assert_eq!(positive, -negative);
    }
}
