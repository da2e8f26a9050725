// GloveLink — Frame Codec
//
// One byte per transmission cycle carries the whole gesture state. The hub
// decodes with the inverse of exactly this layout, so encode and decode live
// side by side here.
//
// Bit layout (bit 0 = LSB):
//   7        hand side: 0 = left-hand unit, 1 = right-hand unit
//   6..5     motion: bit 5 carries the bit (0 = forward, 1 = backward),
//            bit 6 is reserved and always 0
//   4..2     speed gear 0–5
//   1        left taps present (count > 0)
//   0        right taps present (count > 0)
//
// Tap counts are deliberately collapsed to presence bits on the wire; the
// full 0–5 count only drives the local auto-reset window and is never sent.

use super::flex::Motion;
use super::gear::GEAR_MAX;

const BIT_RIGHT_TAP: u8 = 0;
const BIT_LEFT_TAP: u8 = 1;
const SPEED_SHIFT: u8 = 2;
const SPEED_MASK: u8 = 0b111;
const BIT_MOTION: u8 = 5;
const BIT_HAND: u8 = 7;

/// Which hand this unit is worn on, encoded into bit 7 of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// Snapshot of the gesture state for one transmission cycle. Rebuilt from
/// the live state machines before every encode; carries no identity of its
/// own beyond that cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureFrame {
    pub hand: Hand,
    pub motion: Motion,
    pub speed: u8,
    pub left_taps: u8,
    pub right_taps: u8,
}

impl GestureFrame {
    /// Pack the frame into its wire byte. Total and side-effect-free;
    /// out-of-domain speed or tap counts are clamped before packing.
    pub fn encode(&self) -> u8 {
        let mut byte = 0u8;
        if self.hand == Hand::Right {
            byte |= 1 << BIT_HAND;
        }
        if self.motion == Motion::Backward {
            byte |= 1 << BIT_MOTION;
        }
        byte |= (self.speed.min(GEAR_MAX) & SPEED_MASK) << SPEED_SHIFT;
        if self.left_taps > 0 {
            byte |= 1 << BIT_LEFT_TAP;
        }
        if self.right_taps > 0 {
            byte |= 1 << BIT_RIGHT_TAP;
        }
        byte
    }
}

/// Hub-side view of a frame. Tap magnitude is lossy on the wire, so the
/// decoder reports presence only.
#[allow(dead_code)] // hub-side half of the contract, exercised by the tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    pub hand: Hand,
    pub motion: Motion,
    pub speed: u8,
    pub left_taps_present: bool,
    pub right_taps_present: bool,
}

/// Invert [`GestureFrame::encode`]. Total over all 256 byte values.
#[allow(dead_code)] // hub-side half of the contract, exercised by the tests
pub fn decode(byte: u8) -> DecodedFrame {
    DecodedFrame {
        hand: if byte & (1 << BIT_HAND) != 0 {
            Hand::Right
        } else {
            Hand::Left
        },
        motion: if byte & (1 << BIT_MOTION) != 0 {
            Motion::Backward
        } else {
            Motion::Forward
        },
        speed: (byte >> SPEED_SHIFT) & SPEED_MASK,
        left_taps_present: byte & (1 << BIT_LEFT_TAP) != 0,
        right_taps_present: byte & (1 << BIT_RIGHT_TAP) != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_frame_bit_pattern() {
        // motion=forward, speed=2, no left taps, one right tap:
        // bit0=1, bits2-4=010, everything else 0.
        let frame = GestureFrame {
            hand: Hand::Left,
            motion: Motion::Forward,
            speed: 2,
            left_taps: 0,
            right_taps: 1,
        };
        assert_eq!(frame.encode(), 0b0000_1001);
    }

    #[test]
    fn backward_motion_sets_bit_five_only() {
        let frame = GestureFrame {
            hand: Hand::Left,
            motion: Motion::Backward,
            speed: 0,
            left_taps: 0,
            right_taps: 0,
        };
        assert_eq!(frame.encode(), 0b0010_0000);
    }

    #[test]
    fn right_hand_unit_sets_bit_seven() {
        let frame = GestureFrame {
            hand: Hand::Right,
            motion: Motion::Forward,
            speed: 0,
            left_taps: 0,
            right_taps: 0,
        };
        assert_eq!(frame.encode(), 0b1000_0000);
    }

    #[test]
    fn round_trip_preserves_tap_presence_not_count() {
        let frame = GestureFrame {
            hand: Hand::Left,
            motion: Motion::Backward,
            speed: 3,
            left_taps: 2,
            right_taps: 0,
        };
        let decoded = decode(frame.encode());
        assert_eq!(decoded.motion, Motion::Backward);
        assert_eq!(decoded.speed, 3);
        assert!(decoded.left_taps_present);
        assert!(!decoded.right_taps_present);
        assert_eq!(decoded.hand, Hand::Left);
    }

    #[test]
    fn out_of_domain_speed_is_clamped() {
        let frame = GestureFrame {
            hand: Hand::Left,
            motion: Motion::Forward,
            speed: 9,
            left_taps: 0,
            right_taps: 0,
        };
        assert_eq!(decode(frame.encode()).speed, GEAR_MAX);
    }

    #[test]
    fn every_gear_survives_the_round_trip() {
        for speed in 0..=GEAR_MAX {
            let frame = GestureFrame {
                hand: Hand::Left,
                motion: Motion::Forward,
                speed,
                left_taps: 0,
                right_taps: 0,
            };
            assert_eq!(decode(frame.encode()).speed, speed);
        }
    }
}
