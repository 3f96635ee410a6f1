//! Reusable widget components.

pub mod detail;
pub mod field;
pub mod filter;
pub mod popup;
pub mod status;

pub use detail::{DetailField, DetailPanel};
pub use field::render_field;
pub use filter::{FilterBar, FilterOption};
pub use popup::{centered_rect, Popup};
pub use status::StatusBadge;
