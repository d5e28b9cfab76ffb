//! Alert group to chat message translation.

pub(crate) mod compose;
pub(crate) mod diff;
pub(crate) mod render;

pub use compose::{FormattedMessage, compose};
pub use diff::{DiffKeySet, diff};
pub use render::render;
