//! Seeded headless drafting over the core draft API.

mod action;
mod config;
mod error;
mod simulator;
mod stats;
mod trace;

pub use action::*;
pub use config::*;
pub use error::*;
pub use simulator::*;
pub use stats::*;
pub use trace::*;
