//! Core drivers and utilities for a two-motor differential drive bot on no-std
//! embedded platforms.
//!
//! For a runnable host demo, see `ddb-app/mock-mcu`.
#![cfg_attr(not(test), no_std)]

pub mod utils;
