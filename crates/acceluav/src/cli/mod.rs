//! Command-line interface for acceluav.
//!
//! This module provides the CLI structure and output rendering for the
//! `acceluav` binary.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AssetKindArg, ConfigCommand, ModuleArg, PointCloudArg, QuoteCommand, RatesCommand,
    SearchCommand, SelectionArgs, ServeCommand, ServiceArg, SpectralArg, UrlCommand,
};
pub use output::{
    format_amount, render_config, render_quote, render_rates, render_search, RateCardView,
};

use crate::logging::Verbosity;

/// acceluav - AccelUAV site tooling
///
/// Price geospatial survey work from tiered rate cards, search the site
/// catalog, and serve the site's 3D models, images and videos.
#[derive(Debug, Parser)]
#[command(name = "acceluav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price survey data for an area
    Quote(QuoteCommand),

    /// Show rate cards
    Rates(RatesCommand),

    /// Search products, careers, people, posts and events
    Search(SearchCommand),

    /// Run the asset server
    Serve(ServeCommand),

    /// Resolve the public URL of an asset
    Url(UrlCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use crate::pricing::{Module, ServiceSelection};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "acceluav");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["acceluav", "-q", "search", "x"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["acceluav", "search", "x"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["acceluav", "-v", "search", "x"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["acceluav", "-vv", "search", "x"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_quote_defaults() {
        let cli = parse(&["acceluav", "quote", "5"]);
        let Command::Quote(cmd) = cli.command else {
            panic!("expected quote");
        };
        let request = cmd.selection.request(cmd.area);
        assert_eq!(request.area, 5.0);
        assert_eq!(request.selection, ServiceSelection::ThreeDTwin);
        assert!(!cmd.json);
    }

    #[test]
    fn test_parse_quote_custom() {
        let cli = parse(&[
            "acceluav",
            "quote",
            "1",
            "--service",
            "custom",
            "--point-cloud",
            "lidar",
            "-m",
            "point-cloud",
            "--module",
            "3d-twin",
            "--json",
        ]);
        let Command::Quote(cmd) = cli.command else {
            panic!("expected quote");
        };
        let request = cmd.selection.request(cmd.area);
        assert_eq!(request.selection, ServiceSelection::Custom);
        assert_eq!(request.modules, vec![Module::PointCloud, Module::ThreeDTwin]);
        assert!(cmd.json);
    }

    #[test]
    fn test_parse_quote_negative_area() {
        let cli = parse(&["acceluav", "quote", "-3"]);
        let Command::Quote(cmd) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(cmd.area, -3.0);
    }

    #[test]
    fn test_parse_rates_with_area() {
        let cli = parse(&["acceluav", "rates", "--service", "ortho", "--area", "12"]);
        let Command::Rates(cmd) = cli.command else {
            panic!("expected rates");
        };
        assert_eq!(cmd.area, Some(12.0));
        assert_eq!(cmd.selection.service, ServiceArg::Ortho);
    }

    #[test]
    fn test_parse_serve() {
        let cli = parse(&["acceluav", "serve", "--port", "8080", "--public-dir", "/srv"]);
        let Command::Serve(cmd) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(cmd.port, Some(8080));
        assert_eq!(cmd.public_dir, Some(PathBuf::from("/srv")));
        assert!(cmd.bind.is_none());
    }

    #[test]
    fn test_parse_url() {
        let cli = parse(&["acceluav", "url", "videos", "intro.mp4"]);
        let Command::Url(cmd) = cli.command else {
            panic!("expected url");
        };
        assert_eq!(cmd.kind, AssetKindArg::Videos);
        assert_eq!(cmd.name, "intro.mp4");
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["acceluav", "config", "validate", "--file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["acceluav", "-c", "/custom/config.toml", "search", "vtol"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_unknown_service_rejected() {
        assert!(Cli::try_parse_from(["acceluav", "quote", "5", "--service", "lidar"]).is_err());
    }
}
