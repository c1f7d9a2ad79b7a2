//! Table engine: columns, view state, derivation and layout.
//!
//! - [`Column`] - addresses a row field by dotted path or accessor
//! - [`TableState`] - page, sort and filter state plus its actions
//! - [`derive_view`] - pure filter → sort → paginate derivation
//! - [`TableEngine`] - owns rows, columns, config and state together
//! - [`ColumnLayout`] - user column visibility and order

mod column;
mod config;
mod engine;
mod path;
mod preferences;
mod sort;
mod state;
mod view;

pub use column::*;
pub use config::*;
pub use engine::TableEngine;
pub use path::*;
pub use preferences::*;
pub use sort::*;
pub use state::TableState;
pub use view::*;
