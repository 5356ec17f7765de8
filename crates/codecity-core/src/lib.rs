//! CodeCity Core Types and Definitions
//!
//! This crate provides the foundational types shared by the CodeCity layout
//! engine and its front ends. It includes:
//!
//! - **Geometry**: Planar footprints, 3D vectors, sizes and transforms ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Elements**: The structural tree consumed by the layout ([`element`] module)
//! - **Draw**: Output primitives, composable shapes and label fonts ([`draw`] module)

pub mod color;
pub mod draw;
pub mod element;
pub mod geometry;
