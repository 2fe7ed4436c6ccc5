//! CLI entry point for vega-themes.

mod cli;

use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;
use vega_themes::config::load_config;
use vega_themes::error::AppError;
use vega_themes::theme::overrides::{apply_config, select_theme};
use vega_themes::theme::ThemeRegistry;

/// Env var holding the tracing filter directive.
const LOG_ENV: &str = "VEGA_THEMES_LOG";

fn main() {
    let args = cli::Args::parse();
    init_logging();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &cli::Args) -> Result<(), AppError> {
    let config = load_config(args.config.as_deref())?;
    let registry = ThemeRegistry::with_builtins();
    apply_config(&registry, &config)?;

    match &args.command {
        cli::Command::List => {
            let active = registry.active()?;
            for name in registry.names() {
                if name == active {
                    let marker = if args.no_color {
                        "*".to_string()
                    } else {
                        "*".green().to_string()
                    };
                    println!("{marker} {name}");
                } else {
                    println!("  {name}");
                }
            }
        }
        cli::Command::Show { name, font_scale } => {
            select_theme(&registry, &config, name.as_deref(), *font_scale)?;
            let theme = registry.active_theme()?;
            println!("{}", serde_json::to_string_pretty(&theme)?);
        }
    }
    Ok(())
}
