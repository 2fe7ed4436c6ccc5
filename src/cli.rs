//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Inspect and derive Vega-Lite chart themes.
#[derive(Debug, Parser)]
#[command(name = "vega-themes", version)]
pub struct Args {
    /// Path to config file (default: ./vega-themes.toml or
    /// ~/.config/vega-themes/vega-themes.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// List registered themes, marking the active one.
    List,
    /// Print a theme's value as JSON.
    Show {
        /// Theme to show (default: the configured active theme).
        name: Option<String>,
        /// Multiply every known font size by this factor first.
        #[arg(long = "font-scale", value_name = "FACTOR")]
        font_scale: Option<f64>,
    },
}
