//! Domain models for the STK Manager yard tool

mod record;
mod summary;
mod updates;

pub use record::*;
pub use summary::*;
pub use updates::*;

pub(crate) use record::non_blank;
