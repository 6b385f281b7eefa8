//! GPIO pin abstractions
//!
//! The caliper clock/data lines are read through [`InputPin`]; the display
//! latch and status LED are driven through [`OutputPin`].

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
///
/// Takes `&mut self` so that implementations backed by `embedded-hal` 1.0
/// (whose input reads are `&mut`) fit without interior mutability.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch {
        high: bool,
    }

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }
    }

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state_dispatches() {
        let mut latch = Latch { high: false };
        latch.set_state(true);
        assert!(latch.high);
        latch.set_state(false);
        assert!(!latch.high);
    }

    #[test]
    fn test_is_low_default() {
        assert!(Level(false).is_low());
        assert!(!Level(true).is_low());
    }
}
