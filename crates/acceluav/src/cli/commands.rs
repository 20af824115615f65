//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::assets::AssetKind;
use crate::config::Config;
use crate::pricing::{Module, PointCloudKind, QuoteRequest, ServiceSelection, SpectralKind};

/// Service selection shared by `quote` and `rates`.
#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    /// What to price
    #[arg(short, long, value_enum, default_value = "3d-twin")]
    pub service: ServiceArg,

    /// Point cloud kind
    #[arg(long, value_enum, default_value = "low")]
    pub point_cloud: PointCloudArg,

    /// Spectral imaging kind
    #[arg(long, value_enum, default_value = "multi")]
    pub spectral: SpectralArg,

    /// Module to include in a custom build (repeatable)
    #[arg(short, long = "module", value_enum)]
    pub modules: Vec<ModuleArg>,
}

impl SelectionArgs {
    /// Build a calculator request for `area` hectares.
    #[must_use]
    pub fn request(&self, area: f64) -> QuoteRequest {
        QuoteRequest {
            area,
            selection: self.service.into(),
            point_cloud: self.point_cloud.into(),
            spectral: self.spectral.into(),
            modules: self.modules.iter().copied().map(Module::from).collect(),
        }
    }
}

/// Quote command arguments.
#[derive(Debug, Args)]
pub struct QuoteCommand {
    /// Area in hectares
    #[arg(allow_negative_numbers = true)]
    pub area: f64,

    /// What to price.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Rate card file to price with (JSON or TOML)
    #[arg(long, value_name = "FILE")]
    pub rates: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Rates command arguments.
#[derive(Debug, Args)]
pub struct RatesCommand {
    /// What to price.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Area in hectares; marks the tier that applies
    #[arg(short, long)]
    pub area: Option<f64>,

    /// Rate card file to show (JSON or TOML)
    #[arg(long, value_name = "FILE")]
    pub rates: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Text to look for (case-insensitive)
    pub query: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Serve command arguments.
#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Address to listen on
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding the site's public assets
    #[arg(long, value_name = "DIR")]
    pub public_dir: Option<PathBuf>,
}

impl ServeCommand {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.public_dir {
            config.server.public_dir.clone_from(dir);
        }
    }
}

/// Url command arguments.
#[derive(Debug, Args)]
pub struct UrlCommand {
    /// Kind of asset
    #[arg(value_enum)]
    pub kind: AssetKindArg,

    /// Asset file name
    pub name: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Service argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    /// 3D digital twin
    #[value(name = "3d-twin")]
    ThreeDTwin,
    /// Orthomosaic and report
    Ortho,
    /// Point cloud (see --point-cloud)
    PointCloud,
    /// Spectral imaging (see --spectral)
    Spectral,
    /// Discounted all-in-one bundle
    All,
    /// Custom build (see --module)
    Custom,
}

impl From<ServiceArg> for ServiceSelection {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::ThreeDTwin => Self::ThreeDTwin,
            ServiceArg::Ortho => Self::Ortho,
            ServiceArg::PointCloud => Self::PointCloud,
            ServiceArg::Spectral => Self::Spectral,
            ServiceArg::All => Self::All,
            ServiceArg::Custom => Self::Custom,
        }
    }
}

/// Point cloud kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PointCloudArg {
    /// Photogrammetric, low density
    Low,
    /// LiDAR
    Lidar,
}

impl From<PointCloudArg> for PointCloudKind {
    fn from(arg: PointCloudArg) -> Self {
        match arg {
            PointCloudArg::Low => Self::Low,
            PointCloudArg::Lidar => Self::Lidar,
        }
    }
}

/// Spectral kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpectralArg {
    /// Multispectral
    Multi,
    /// Hyperspectral
    Hyper,
}

impl From<SpectralArg> for SpectralKind {
    fn from(arg: SpectralArg) -> Self {
        match arg {
            SpectralArg::Multi => Self::Multi,
            SpectralArg::Hyper => Self::Hyper,
        }
    }
}

/// Custom build module argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleArg {
    /// 3D digital twin
    #[value(name = "3d-twin")]
    ThreeDTwin,
    /// Orthomosaic and report
    Ortho,
    /// Point cloud
    PointCloud,
    /// Spectral imaging
    Spectral,
}

impl From<ModuleArg> for Module {
    fn from(arg: ModuleArg) -> Self {
        match arg {
            ModuleArg::ThreeDTwin => Self::ThreeDTwin,
            ModuleArg::Ortho => Self::Ortho,
            ModuleArg::PointCloud => Self::PointCloud,
            ModuleArg::Spectral => Self::Spectral,
        }
    }
}

/// Asset kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetKindArg {
    /// glTF models
    Models,
    /// Images
    Images,
    /// Videos
    Videos,
}

impl From<AssetKindArg> for AssetKind {
    fn from(arg: AssetKindArg) -> Self {
        match arg {
            AssetKindArg::Models => Self::Models,
            AssetKindArg::Images => Self::Images,
            AssetKindArg::Videos => Self::Videos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(service: ServiceArg) -> SelectionArgs {
        SelectionArgs {
            service,
            point_cloud: PointCloudArg::Lidar,
            spectral: SpectralArg::Hyper,
            modules: vec![ModuleArg::Spectral, ModuleArg::Ortho],
        }
    }

    #[test]
    fn test_service_arg_conversion() {
        assert_eq!(
            ServiceSelection::from(ServiceArg::ThreeDTwin),
            ServiceSelection::ThreeDTwin
        );
        assert_eq!(ServiceSelection::from(ServiceArg::All), ServiceSelection::All);
        assert_eq!(
            ServiceSelection::from(ServiceArg::Custom),
            ServiceSelection::Custom
        );
    }

    #[test]
    fn test_kind_arg_conversion() {
        assert_eq!(PointCloudKind::from(PointCloudArg::Lidar), PointCloudKind::Lidar);
        assert_eq!(SpectralKind::from(SpectralArg::Multi), SpectralKind::Multi);
        assert_eq!(Module::from(ModuleArg::ThreeDTwin), Module::ThreeDTwin);
        assert_eq!(AssetKind::from(AssetKindArg::Images), AssetKind::Images);
    }

    #[test]
    fn test_service_arg_value_names() {
        let value = ServiceArg::ThreeDTwin.to_possible_value().unwrap();
        assert_eq!(value.get_name(), "3d-twin");
        let value = ServiceArg::PointCloud.to_possible_value().unwrap();
        assert_eq!(value.get_name(), "point-cloud");
    }

    #[test]
    fn test_selection_request() {
        let request = selection(ServiceArg::Custom).request(12.5);
        assert_eq!(request.area, 12.5);
        assert_eq!(request.selection, ServiceSelection::Custom);
        assert_eq!(request.point_cloud, PointCloudKind::Lidar);
        assert_eq!(request.spectral, SpectralKind::Hyper);
        assert_eq!(request.modules, vec![Module::Spectral, Module::Ortho]);
    }

    #[test]
    fn test_serve_apply_overrides() {
        let mut config = Config::default();
        let cmd = ServeCommand {
            bind: Some("127.0.0.1".to_string()),
            port: Some(8080),
            public_dir: None,
        };
        cmd.apply(&mut config);

        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_serve_apply_nothing() {
        let mut config = Config::default();
        ServeCommand::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
