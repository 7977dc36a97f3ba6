//! Loading and validation of the card catalog and draft configuration.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
