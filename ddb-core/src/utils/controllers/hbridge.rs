//! Timed motion primitives for a two-motor H-bridge chassis.
//!
//! Each motor is wired to two control lines. Opposite levels spin the motor
//! (A high is forward), equal levels stop it: both high brakes, both low coasts.
//! Motions engage both motors, block for a calibrated time and then brake.

use core::fmt;

use embedded_hal::{delay::DelayNs, digital::PinState};

use crate::utils::{
    config::Config,
    controllers::{
        pins::{PinDriver, PinId},
        MotionCommand,
    },
    math::timing,
};

/// One side of the differential drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motor {
    Left,
    Right,
}

/// In-place rotation direction, seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Positive durations turn clockwise, everything else counter-clockwise.
    pub fn from_millis(millis: i32) -> Self {
        if millis > 0 {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }
}

/// A pin write failed while driving the motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveError<E> {
    Pin { pin: PinId, source: E },
}

impl<E: fmt::Debug> fmt::Display for DriveError<E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            DriveError::Pin { pin, source } => write!(f, "pin {} failed: {:?}", pin, source),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for DriveError<E> {}

/// Motor controller for an H-bridge driven differential chassis.
///
/// Borrows its [`Config`] for its whole life and never changes it. `init` must
/// run once before any motion.
pub struct HBridge<'a, D, T> {
    config: &'a Config,
    pins: D,
    delay: T,
}

impl<'a, D, T> HBridge<'a, D, T>
where
    D: PinDriver,
    T: DelayNs,
{
    /// Create a controller over the given pin driver and blocking delay.
    pub fn new(
        config: &'a Config,
        pins: D,
        delay: T,
    ) -> Self {
        HBridge {
            config,
            pins,
            delay,
        }
    }

    /// The wiring and calibration this controller was built with.
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Configure all four control lines as digital outputs.
    pub fn init(&mut self) -> Result<(), DriveError<D::Error>> {
        for pin in self.config.all_pins() {
            self.pins
                .configure_output(pin)
                .map_err(|source| DriveError::Pin { pin, source })?;
        }
        tracing::info!(pins = ?self.config.all_pins(), "H-bridge initialized");
        Ok(())
    }

    /// Spin `motor` forward (A high, B low) or in reverse (A low, B high).
    pub fn motor_on(
        &mut self,
        motor: Motor,
        reverse: bool,
    ) -> Result<(), DriveError<D::Error>> {
        let (a, b) = if reverse {
            (PinState::Low, PinState::High)
        } else {
            (PinState::High, PinState::Low)
        };
        self.set_lines(motor, a, b)
    }

    /// Stop `motor`: both lines high to brake, both low to coast.
    pub fn motor_off(
        &mut self,
        motor: Motor,
        brake: bool,
    ) -> Result<(), DriveError<D::Error>> {
        let level = PinState::from(brake);
        self.set_lines(motor, level, level)
    }

    /// Stop both motors, left first.
    pub fn stop(
        &mut self,
        brake: bool,
    ) -> Result<(), DriveError<D::Error>> {
        let left = self.motor_off(Motor::Left, brake);
        let right = self.motor_off(Motor::Right, brake);
        left.and(right)
    }

    /// Rotate in place for `|millis|` ms, clockwise when `millis` is positive.
    ///
    /// Blocks for the whole duration, then brakes both motors.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn turn(
        &mut self,
        millis: i32,
    ) -> Result<(), DriveError<D::Error>> {
        let rotation = Rotation::from_millis(millis);
        let engage = match rotation {
            Rotation::Clockwise => [(Motor::Left, false), (Motor::Right, true)],
            Rotation::CounterClockwise => [(Motor::Right, false), (Motor::Left, true)],
        };

        let duration = timing::magnitude(millis);
        tracing::info!(?rotation, duration, "turning");
        self.drive_for(engage, duration, [Motor::Left, Motor::Right])
    }

    /// Rotate by `times` quarter-turns; negative is counter-clockwise.
    pub fn turn_90_degrees(
        &mut self,
        times: i8,
    ) -> Result<(), DriveError<D::Error>> {
        if times == 0 {
            return Ok(());
        }
        self.turn(timing::turn_duration(self.config.turn_millis, times))
    }

    /// Drive `units` steps straight ahead, or backwards when negative.
    ///
    /// Blocks for the whole duration, then brakes both motors.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn move_straight(
        &mut self,
        units: i8,
    ) -> Result<(), DriveError<D::Error>> {
        if units == 0 {
            return Ok(());
        }
        let reverse = units < 0;

        let duration = timing::straight_duration(self.config.step_millis, units);
        tracing::info!(reverse, duration, "moving straight");
        self.drive_for(
            [(Motor::Right, reverse), (Motor::Left, reverse)],
            duration,
            [Motor::Right, Motor::Left],
        )
    }

    /// Execute a high-level `MotionCommand`.
    pub fn execute_command(
        &mut self,
        command: MotionCommand,
    ) -> Result<(), DriveError<D::Error>> {
        match command {
            MotionCommand::Turn { ms } => self.turn(ms),
            MotionCommand::Quarter { n } => self.turn_90_degrees(n),
            MotionCommand::Straight { n } => self.move_straight(n),
            MotionCommand::Stop { brake } => self.stop(brake),
        }
    }

    /// Hand back the pin driver and delay.
    pub fn release(self) -> (D, T) {
        (self.pins, self.delay)
    }

    /// Engage the motors in order, sleep `duration` ms, then brake in `brake` order.
    ///
    /// Both motors are braked even when a write fails; the sleep is skipped if
    /// engaging failed. The first error is returned.
    fn drive_for(
        &mut self,
        engage: [(Motor, bool); 2],
        duration: u32,
        brake: [Motor; 2],
    ) -> Result<(), DriveError<D::Error>> {
        let engaged = engage
            .iter()
            .try_for_each(|&(motor, reverse)| self.motor_on(motor, reverse));
        match &engaged {
            Ok(()) => self.delay.delay_ms(duration),
            Err(e) => tracing::error!(%e, "engaging motors failed, braking"),
        }

        let braked = brake.map(|motor| self.motor_off(motor, true));
        engaged?;
        for result in braked {
            result?;
        }
        Ok(())
    }

    /// Write both lines of `motor`, attempting the second even if the first fails.
    fn set_lines(
        &mut self,
        motor: Motor,
        a: PinState,
        b: PinState,
    ) -> Result<(), DriveError<D::Error>> {
        let (pin_a, pin_b) = self.config.pins(motor);
        tracing::debug!(?motor, ?a, ?b, "set lines");
        let first = self.write(pin_a, a);
        let second = self.write(pin_b, b);
        first.and(second)
    }

    fn write(
        &mut self,
        pin: PinId,
        level: PinState,
    ) -> Result<(), DriveError<D::Error>> {
        self.pins
            .write(pin, level)
            .map_err(|source| DriveError::Pin { pin, source })
    }
}
