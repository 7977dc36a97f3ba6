//! Draft engine: leader pick, keg generation and deck accumulation. Keep this crate free of IO.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod draft;
pub mod events;
pub mod keg;
pub mod rng;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use deck::*;
pub use draft::*;
pub use events::*;
pub use keg::*;
pub use rng::*;
