//! CLI logic for the VisualNN diagram tool.
//!
//! This module contains the core CLI logic: load the configuration, build
//! the scene for the selected subcommand and write it out as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::fs;

use log::info;

use visualnn::{VisualNnError, Visualizer, model::ModelSpec, scene::SceneGraph};

/// Run the VisualNN CLI application
///
/// # Errors
///
/// Returns `VisualNnError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed model descriptions or neuron parameters
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), VisualNnError> {
    info!(output_path = args.output; "Processing diagram");

    let app_config = config::load_config(args.config.as_ref())?;
    let visualizer = Visualizer::new(app_config);

    let scene = build_scene(&visualizer, &args.command)?;
    let svg = visualizer.render_svg(&scene)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

fn build_scene(visualizer: &Visualizer, command: &Command) -> Result<SceneGraph, VisualNnError> {
    match command {
        Command::Model { input } => {
            info!(input_path = input; "Loading model description");
            let model = ModelSpec::from_path(input)?;
            visualizer.from_model(&model)
        }
        Command::Neuron {
            inputs,
            weights,
            threshold,
            fps,
        } => {
            let inputs = triple(inputs, "inputs")?;
            let weights = triple(weights, "weights")?;
            visualizer.neuron(inputs, weights, *threshold, *fps)
        }
        Command::Mlp { sizes } => visualizer.perceptron(sizes),
    }
}

fn triple(values: &[f64], name: &str) -> Result<[f64; 3], VisualNnError> {
    <[f64; 3]>::try_from(values).map_err(|_| {
        VisualNnError::InvalidParameter(format!(
            "expected exactly 3 {name}, got {}",
            values.len()
        ))
    })
}
