pub mod district;
pub mod engines;
pub mod extrude;
pub mod hierarchy;
pub mod palette;
pub mod policy;
pub mod street;
pub mod synth;
pub mod treemap;
pub mod weight;

pub use engines::{CityEngine, EngineBuilder};
