//! Hardware driver implementations
//!
//! Concrete collaborators for the core logic, written against the
//! `vernier-hal` traits:
//!
//! - Caliper clock/data port (feeds the frame capture)
//! - 74HC595 shift-register segment display
//! - SHT31 ambient temperature/humidity sensor

#![no_std]
#![deny(unsafe_code)]

pub mod caliper;
pub mod display;
pub mod sensor;
