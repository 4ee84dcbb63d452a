//! Digital pin access for the H-bridge.
//!
//! The motor controller addresses its four control lines by number through the
//! [`PinDriver`] capability. [`PinBank`] implements it on top of a fixed set of
//! `embedded-hal` output pins so any HAL can be plugged in.

use core::fmt;

use embedded_hal::digital::{OutputPin, PinState};

/// Numeric identifier of a digital pin.
pub type PinId = u8;

/// Abstract digital output interface.
pub trait PinDriver {
    type Error: fmt::Debug;

    /// Set up `pin` as a digital output.
    fn configure_output(
        &mut self,
        pin: PinId,
    ) -> Result<(), Self::Error>;

    /// Drive `pin` to `level`.
    fn write(
        &mut self,
        pin: PinId,
        level: PinState,
    ) -> Result<(), Self::Error>;
}

/// Errors raised by [`PinBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError<E> {
    /// No pin with this id exists in the bank.
    UnknownPin(PinId),
    /// The pin was written before `configure_output`.
    NotConfigured(PinId),
    /// The underlying HAL pin failed.
    Pin(E),
}

impl<E: fmt::Debug> fmt::Display for BankError<E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            BankError::UnknownPin(pin) => write!(f, "pin {} is not in the bank", pin),
            BankError::NotConfigured(pin) => write!(f, "pin {} is not configured as output", pin),
            BankError::Pin(e) => write!(f, "pin error: {:?}", e),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for BankError<E> {}

/// A bank of `N` output pins addressed by their index.
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
    configured: [bool; N],
}

impl<P, E, const N: usize> PinBank<P, N>
where
    P: OutputPin<Error = E>,
    E: fmt::Debug,
{
    /// Wrap `pins`; pin `i` answers to id `i`. No pin is configured yet.
    pub fn new(pins: [P; N]) -> Self {
        PinBank {
            pins,
            configured: [false; N],
        }
    }

    /// Whether `pin` has been configured as an output.
    pub fn is_configured(
        &self,
        pin: PinId,
    ) -> bool {
        self.configured
            .get(usize::from(pin))
            .copied()
            .unwrap_or(false)
    }

    /// Give the HAL pins back.
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn pin_mut(
        &mut self,
        pin: PinId,
    ) -> Result<&mut P, BankError<E>> {
        self.pins
            .get_mut(usize::from(pin))
            .ok_or(BankError::UnknownPin(pin))
    }
}

impl<P, E, const N: usize> PinDriver for PinBank<P, N>
where
    P: OutputPin<Error = E>,
    E: fmt::Debug,
{
    type Error = BankError<E>;

    /// Marks `pin` as an output and drives it low, so the line starts coasting.
    fn configure_output(
        &mut self,
        pin: PinId,
    ) -> Result<(), Self::Error> {
        self.pin_mut(pin)?.set_low().map_err(BankError::Pin)?;
        self.configured[usize::from(pin)] = true;
        tracing::debug!(pin, "configured as output");
        Ok(())
    }

    fn write(
        &mut self,
        pin: PinId,
        level: PinState,
    ) -> Result<(), Self::Error> {
        if !self.is_configured(pin) {
            // Unknown ids are reported as such, not as unconfigured.
            self.pin_mut(pin)?;
            return Err(BankError::NotConfigured(pin));
        }
        self.pin_mut(pin)?.set_state(level).map_err(BankError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct LatchPin {
        high: bool,
        writes: usize,
    }

    impl embedded_hal::digital::ErrorType for LatchPin {
        type Error = Infallible;
    }

    impl OutputPin for LatchPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    fn bank() -> PinBank<LatchPin, 4> {
        PinBank::new(Default::default())
    }

    #[test]
    fn test_configure_drives_low() {
        let mut bank = bank();
        bank.configure_output(2).unwrap();
        assert!(bank.is_configured(2));
        assert!(!bank.is_configured(1));
        let pins = bank.release();
        assert!(!pins[2].high);
        assert_eq!(pins[2].writes, 1);
    }

    #[test]
    fn test_write_sets_level() {
        let mut bank = bank();
        bank.configure_output(1).unwrap();
        bank.write(1, PinState::High).unwrap();
        assert!(bank.release()[1].high);
    }

    #[test]
    fn test_write_unconfigured_is_rejected() {
        let mut bank = bank();
        assert_eq!(
            bank.write(0, PinState::High),
            Err(BankError::NotConfigured(0))
        );
        assert_eq!(bank.release()[0].writes, 0);
    }

    #[test]
    fn test_unknown_pin() {
        let mut bank = bank();
        assert_eq!(bank.configure_output(4), Err(BankError::UnknownPin(4)));
        assert_eq!(bank.write(200, PinState::Low), Err(BankError::UnknownPin(200)));
        assert!(!bank.is_configured(200));
    }
}
