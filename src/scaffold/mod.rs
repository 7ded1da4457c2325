//! The scaffolding core: selector translation, repetition, tree walk.

pub mod multiplier;
pub mod translate;
pub mod walk;

pub use translate::translate;
pub use walk::{targets_before_after, walk};
