pub mod json;
pub mod svg;

use crate::city::CityLayout;

// A single Exporter trait for every output format
pub trait Exporter {
    fn render(&self, layout: &CityLayout) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}
