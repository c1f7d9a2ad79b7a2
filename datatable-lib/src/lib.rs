//! Client-side data table engine
//!
//! Sorting, filtering and pagination over in-memory record sets, driven by
//! column descriptors that address record fields by dotted path or by a
//! computed accessor.

pub mod error;
pub mod model;
pub mod table;

pub use table::*;
