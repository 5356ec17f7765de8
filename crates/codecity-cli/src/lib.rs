//! CodeCity CLI library
//!
//! This module contains the core CLI logic for the CodeCity layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, ModeArg, OutputFormat};

use std::fs;

use log::{debug, info, warn};

use codecity::{CityBuilder, CodeCityError, city::VisibilityFilter, input::Selection};

/// Run the CodeCity CLI application
///
/// This function reads the input file, lays out the selected element tree
/// and writes the resulting SVG plan or JSON primitive list to the output
/// file.
///
/// # Errors
///
/// Returns `CodeCityError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input parsing and history selection errors
/// - Malformed element trees
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CodeCityError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing city"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(mode) = args.mode {
        app_config = app_config.with_layout_mode(mode.into());
    }
    if args.no_labels {
        app_config = app_config.with_labels(false);
    }
    info!(
        mode:? = app_config.layout().mode(),
        labels = app_config.label().enabled(),
        mode_overridden = args.mode.is_some();
        "Layout configured"
    );

    let mut selection = Selection::new();
    if let Some(root) = &args.root {
        selection = selection.with_root_path(root);
    }
    if let Some(snapshot) = args.snapshot {
        selection = selection.with_version(snapshot);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = CityBuilder::new(app_config);
    let root = builder.parse(&source, &selection)?;
    debug!(root = root.name(), elements = root.count(); "Element tree selected");
    let city = builder.layout(&root)?;
    info!(mode:? = city.mode(), primitives = city.len(); "City laid out");

    let rendered = match args.format {
        OutputFormat::Svg => {
            let filter = if args.only.is_empty() {
                VisibilityFilter::all()
            } else {
                VisibilityFilter::only(args.only.iter().cloned())
            };
            builder.render_svg_filtered(&city, filter)?
        }
        OutputFormat::Json => {
            if !args.only.is_empty() {
                warn!(
                    only:? = args.only;
                    "--only filters the SVG plan and is ignored for JSON output"
                );
            }
            builder.render_json(&city)?
        }
    };

    fs::write(&args.output, rendered)?;

    info!(output_file = args.output, format:? = args.format; "City exported successfully");

    Ok(())
}
