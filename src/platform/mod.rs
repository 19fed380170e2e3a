//! Host-side services for running the simulation without a watch: a timer
//! table driven by the main loop and a battery that drains over time.

pub mod battery;
pub mod headless;
