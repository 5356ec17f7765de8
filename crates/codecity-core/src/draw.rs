//! Output and composition types for city geometry.
//!
//! - [`Primitive`] - one positioned, colored volume or label produced by a layout
//! - [`Shape`] - an extent plus a rotation and position, composed by street layouts
//! - [`LabelFont`] - the font used for container labels, possibly unavailable

mod label;
mod primitive;
mod shape;

pub use label::{FontFace, LabelFont};
pub use primitive::{Primitive, PrimitiveKind};
pub use shape::Shape;
