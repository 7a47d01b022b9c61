//! Command-line interface for tfdemo-rs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run a bundled TensorFlow graph on fixed inputs.
#[derive(Parser, Debug)]
#[command(name = "tfdemo-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to optional YAML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the graph, feed [1, 3], and log each output element.
    Click {
        /// Directory holding the bundled assets.
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Asset URI of the graph (defaults to the bundled model).
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Load the graph and print its interface.
    Info {
        /// Directory holding the bundled assets.
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Asset URI of the graph (defaults to the bundled model).
        #[arg(short, long)]
        model: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_click_with_overrides() {
        let cli = Cli::try_parse_from([
            "tfdemo-rs",
            "click",
            "--assets",
            "/bundle",
            "--model",
            "other.pb",
        ])
        .unwrap();
        match cli.command {
            Commands::Click { assets, model } => {
                assert_eq!(assets, Some(PathBuf::from("/bundle")));
                assert_eq!(model.as_deref(), Some("other.pb"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn config_is_global() {
        let cli = Cli::try_parse_from(["tfdemo-rs", "info", "-c", "demo.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("demo.yaml")));
        assert!(matches!(cli.command, Commands::Info { assets: None, model: None }));
    }
}
