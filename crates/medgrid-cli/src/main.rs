mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use medgrid_client::ApiClient;
use output::print_error;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let profile = &cli.profile;
    let format = resolve_format(&cli)?;

    match &cli.command {
        Commands::List(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            commands::list::list(ApiClient::new(&server), args, format).await?;
        }
        Commands::Get(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            commands::crud::get(ApiClient::new(&server), args.id, format).await?;
        }
        Commands::Create(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            let client = ApiClient::new(&server);
            commands::crud::create(&client, &args.file, format).await?;
        }
        Commands::Update(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            let client = ApiClient::new(&server);
            commands::crud::update(&client, args.id, &args.file, format).await?;
        }
        Commands::Delete(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            let client = ApiClient::new(&server);
            commands::crud::delete(&client, args.id).await?;
        }
        Commands::Search(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            let client = ApiClient::new(&server);
            commands::search::search(&client, args, format).await?;
        }
        Commands::Status => {
            let server = config::resolve_server(&cli.server, profile)?;
            let client = ApiClient::new(&server);
            commands::server::status(&client, &server).await?;
        }
        Commands::About => {
            let server = config::resolve_server(&cli.server, profile).ok();
            commands::server::about(server.as_deref());
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(profile)?;
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Server".cyan(),
                    cfg.server.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "{}: {}",
                    "Format".cyan(),
                    cfg.format.as_deref().unwrap_or("table")
                );
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(profile)?;
                match set_args.key.as_str() {
                    "server" => cfg.server = Some(set_args.value.clone()),
                    "format" => {
                        if OutputFormat::from_config(&set_args.value).is_none() {
                            anyhow::bail!(
                                "Unknown format: {}. Valid formats: table, json, yaml",
                                set_args.value
                            );
                        }
                        cfg.format = Some(set_args.value.clone());
                    }
                    other => {
                        anyhow::bail!("Unknown config key: {other}. Valid keys: server, format")
                    }
                }
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
    }

    Ok(())
}

fn resolve_format(cli: &Cli) -> Result<OutputFormat> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    let cfg = config::load_profile(&cli.profile)?;
    Ok(cfg
        .format
        .as_deref()
        .and_then(OutputFormat::from_config)
        .unwrap_or_default())
}
