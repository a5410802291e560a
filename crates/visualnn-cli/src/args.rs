//! Command-line argument definitions for the VisualNN CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand picks the diagram family; the global options
//! control the output path, configuration file selection and logging
//! verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the VisualNN diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg", global = true)]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Diagram to draw.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw a network from a TOML or JSON model description
    Model {
        /// Path to the model description
        input: String,
    },

    /// Animate a three-input McCulloch-Pitts neuron
    Neuron {
        /// Input values, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        inputs: Vec<f64>,

        /// Weights, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        weights: Vec<f64>,

        /// Firing threshold
        #[arg(long, allow_hyphen_values = true)]
        threshold: f64,

        /// Frames per edge, overrides the configuration
        #[arg(long)]
        fps: Option<usize>,
    },

    /// Draw a multilayer perceptron from layer sizes
    Mlp {
        /// Neurons per layer, input first
        #[arg(required = true)]
        sizes: Vec<usize>,
    },
}
