//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod caliper;
pub mod display;
pub mod readout;
pub mod sensor;
pub mod watchdog;

pub use caliper::caliper_task;
pub use display::display_task;
pub use readout::readout_task;
pub use sensor::sensor_task;
pub use watchdog::watchdog_task;
