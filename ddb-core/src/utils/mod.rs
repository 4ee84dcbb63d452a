//! Utility re-exports and helper macros for the differential drive bot.
//!
//! - `config`: pin assignments and timing calibration
//! - `controllers`: H-bridge motor controller, pin drivers and command dispatch
//! - `math`: motion duration calculations
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod config;
pub mod controllers;
pub mod math;

pub use config::Config;
pub use controllers::{HBridge, MotionCommand, Motor};

#[macro_export]
/// Initialize a no-std static cell and write the given value into it.
///
/// This macro creates a `static_cell::StaticCell` for type `$t` and initializes
/// it with `$val`, returning a mutable reference to the stored value.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
