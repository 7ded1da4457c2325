//! Generated markup: node model and HTML serializer.

pub mod element;
pub mod serialize;

pub use element::{Attribute, Element, MarkupNode};
pub use serialize::serialize;
