//! Layout engine selection.
//!
//! Each [`LayoutMode`] maps to one [`CityEngine`]. [`EngineBuilder`] collects
//! the settings all engines draw from and builds the one a mode asks for.

use codecity_core::draw::Primitive;

use super::{
    district::StreetEngine, extrude::VerticalExtruder, hierarchy::Hierarchy,
    palette::ColorEncoder, synth::LabelStyle, synth::PrimitiveSynthesizer,
    treemap::TreemapPartitioner,
};
use crate::config::{AppConfig, LayoutMode};

/// Turns a hierarchy into primitives.
pub trait CityEngine {
    /// Lays out `hierarchy`, recording intermediate results on its nodes,
    /// and returns the primitives to draw.
    fn calculate(&self, hierarchy: &mut Hierarchy<'_>, encoder: &ColorEncoder) -> Vec<Primitive>;
}

/// Nested treemap rectangles, each extruded on top of its parent.
#[derive(Debug, Clone)]
pub struct TreemapEngine {
    partitioner: TreemapPartitioner,
    extruder: VerticalExtruder,
    synthesizer: PrimitiveSynthesizer,
}

impl TreemapEngine {
    pub fn new(partitioner: TreemapPartitioner, synthesizer: PrimitiveSynthesizer) -> Self {
        Self {
            partitioner,
            extruder: VerticalExtruder::new(),
            synthesizer,
        }
    }
}

impl CityEngine for TreemapEngine {
    fn calculate(&self, hierarchy: &mut Hierarchy<'_>, encoder: &ColorEncoder) -> Vec<Primitive> {
        self.partitioner.partition(hierarchy);
        self.extruder.extrude(hierarchy);
        self.synthesizer.synthesize(hierarchy, encoder)
    }
}

/// Builder for layout engines.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    canvas_size: f32,
    outer_padding: f32,
    inner_padding: f32,
    road_width: f32,
    road_height: f32,
    footprint_scale: f32,
    labels: LabelStyle,
}

impl EngineBuilder {
    pub fn new(canvas_size: f32) -> Self {
        Self {
            canvas_size,
            outer_padding: 0.0,
            inner_padding: 0.0,
            road_width: 0.0,
            road_height: 0.0,
            footprint_scale: 1.0,
            labels: LabelStyle::disabled(),
        }
    }

    /// Takes every setting from `config`, except the label style, which
    /// needs parsed colors.
    pub fn from_config(config: &AppConfig) -> Self {
        let layout = config.layout();
        let street = config.street();
        Self::new(layout.canvas_size())
            .with_padding(layout.outer_padding(), layout.inner_padding())
            .with_road(street.road_width(), street.road_height())
            .with_footprint_scale(street.footprint_scale())
    }

    pub fn with_padding(mut self, outer: f32, inner: f32) -> Self {
        self.outer_padding = outer;
        self.inner_padding = inner;
        self
    }

    pub fn with_road(mut self, width: f32, height: f32) -> Self {
        self.road_width = width;
        self.road_height = height;
        self
    }

    pub fn with_footprint_scale(mut self, scale: f32) -> Self {
        self.footprint_scale = scale;
        self
    }

    pub fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }

    pub fn canvas_size(&self) -> f32 {
        self.canvas_size
    }

    pub fn build(&self, mode: LayoutMode) -> Box<dyn CityEngine> {
        match mode {
            LayoutMode::Treemap => Box::new(TreemapEngine::new(
                TreemapPartitioner::new(self.canvas_size)
                    .with_outer_padding(self.outer_padding)
                    .with_inner_padding(self.inner_padding),
                PrimitiveSynthesizer::new(self.canvas_size, self.labels.clone()),
            )),
            LayoutMode::Street => Box::new(StreetEngine::new(
                self.road_width,
                self.road_height,
                self.footprint_scale,
            )),
        }
    }
}
