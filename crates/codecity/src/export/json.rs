use log::info;

use super::{Error, Exporter};
use crate::city::CityLayout;

/// Writes the layout as JSON, for viewers that build their own scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Exporter for JsonExporter {
    fn render(&self, layout: &CityLayout) -> Result<String, Error> {
        let json = if self.pretty {
            serde_json::to_string_pretty(layout)
        } else {
            serde_json::to_string(layout)
        }
        .map_err(Error::Json)?;

        info!(primitives = layout.len(), bytes = json.len(); "Layout serialized");
        Ok(json)
    }
}
