//! `acceluav` - CLI for the AccelUAV site
//!
//! This binary prices survey work, searches the site catalog and runs the
//! static asset server.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use clap::Parser;
use serde_json::json;

use acceluav::assets::{self, AssetKind, AssetServerConfig};
use acceluav::cli::{
    render_config, render_quote, render_rates, render_search, Cli, Command, ConfigCommand,
    QuoteCommand, RateCardView, RatesCommand, SearchCommand, ServeCommand, UrlCommand,
};
use acceluav::pricing::{PricingModel, Service, ServiceSelection};
use acceluav::{init_logging, Config, Site};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Quote(cmd) => handle_quote(&config, &cmd),
        Command::Rates(cmd) => handle_rates(&config, &cmd),
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Serve(cmd) => handle_serve(config, &cmd),
        Command::Url(cmd) => {
            handle_url(&config, &cmd);
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// The rate card from `--rates`, else the configured one.
fn pricing_model(config: &Config, rates: Option<&Path>) -> acceluav::Result<PricingModel> {
    match rates {
        Some(path) => PricingModel::from_file(path),
        None => config.pricing_model(),
    }
}

fn handle_quote(config: &Config, cmd: &QuoteCommand) -> Result<(), Box<dyn std::error::Error>> {
    let model = pricing_model(config, cmd.rates.as_deref())?;
    let request = cmd.selection.request(cmd.area);
    let quote = request.evaluate(&model);

    if cmd.json {
        let output = json!({
            "request": request,
            "quote": quote,
            "payable": quote.payable(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_quote(&request, &quote));
    }
    Ok(())
}

fn handle_rates(config: &Config, cmd: &RatesCommand) -> Result<(), Box<dyn std::error::Error>> {
    let model = pricing_model(config, cmd.rates.as_deref())?;
    let request = cmd.selection.request(cmd.area.unwrap_or_default());

    // The bundle shows no cards of its own; list every card instead.
    let cards: Vec<RateCardView<'_>> = if request.selection == ServiceSelection::All {
        model
            .cards()
            .map(|(key, tiers)| {
                let label = Service::from_key(key).map_or_else(|| key.to_string(), Service::label);
                RateCardView::new(key.to_string(), label, tiers, cmd.area)
            })
            .collect()
    } else {
        request
            .rate_cards(&model)
            .into_iter()
            .map(|(service, tiers)| {
                RateCardView::new(service.key().to_string(), service.label(), tiers, cmd.area)
            })
            .collect()
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else if cards.is_empty() {
        println!("No rate cards selected.");
    } else {
        print!("{}", render_rates(&cards));
    }
    Ok(())
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> Result<(), Box<dyn std::error::Error>> {
    let site = Site::seeded(config.pricing_model()?)?;
    let results = site.search(&cmd.query);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render_search(&cmd.query, &results));
    }
    Ok(())
}

fn handle_serve(mut config: Config, cmd: &ServeCommand) -> Result<(), Box<dyn std::error::Error>> {
    cmd.apply(&mut config);
    config.validate()?;

    let addr = config.listen_addr();
    let server_config = AssetServerConfig::from(&config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(assets::serve(server_config, &addr))?;
    Ok(())
}

fn handle_url(config: &Config, cmd: &UrlCommand) {
    let kind = AssetKind::from(cmd.kind);
    println!("{}", config.asset_urls().resolve(kind, &cmd.name));
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                print!("{}", render_config(config));
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::validate_file(&path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
