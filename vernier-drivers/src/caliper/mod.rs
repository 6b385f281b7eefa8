//! Caliper link drivers

pub mod port;

pub use port::CaliperPort;
