// Whimsy Server - Main Entry Point
// Copyright 2026 Joseph Stone - All Rights Reserved
//
// CLI and MCP stdio server.
// Usage:
//   whimsy-server serve                        # Run MCP server (stdio)
//   whimsy-server call <tool> <args-json>      # One-shot tool call
//   whimsy-server tools                        # Print tool definitions
//   whimsy-server strategy                     # Draw one oblique strategy
//   whimsy-server status                       # Show effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use whimsy_server::{
    config::ServerConfig,
    dispatch::{Dispatcher, ToolCallRequest},
    mcp, paths,
    schema::{self, ToolProfile},
    strategy::StrategyPicker,
};

#[derive(Parser)]
#[command(name = "whimsy-server")]
#[command(author = "Joseph Stone")]
#[command(version)]
#[command(about = "Whimsy Server - MCP tool server with schema-validated thinking tools")]
struct Cli {
    /// Config file (JSON). Missing file = defaults.
    #[arg(short, long, default_value = "whimsy.json")]
    config: PathBuf,

    /// Tool surface to expose (overrides config)
    #[arg(long, value_enum)]
    profile: Option<ToolProfile>,

    /// Oblique strategies file (overrides WHIMSY_STRATEGIES and config)
    #[arg(long)]
    strategies: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run MCP server (stdio JSON-RPC)
    Serve,

    /// One-shot tool call: prints the response envelope
    Call {
        /// Tool name (set_level, get_guidance, oblique_strategy, thinking)
        tool: String,

        /// Arguments as JSON string
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Print tool definitions as advertised by tools/list
    Tools,

    /// Draw one oblique strategy
    Strategy,

    /// Show effective configuration
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is JSON-RPC)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();

    let cli = Cli::parse();

    let mut config = ServerConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    let env_strategies = std::env::var(paths::STRATEGIES_ENV).ok();
    let strategies_path = paths::resolve_strategies_path(
        cli.strategies.as_deref(),
        env_strategies.as_deref(),
        config.strategies_path.as_deref(),
    );
    let picker = StrategyPicker::new(strategies_path);

    match &cli.command {
        Commands::Serve => {
            log::info!("Strategies: {:?}", picker.path());
            if mcp::run(Dispatcher::new(config, picker)).await? == mcp::Shutdown::Interrupted {
                // Skip runtime teardown: it would wait on the pending stdin read
                std::process::exit(0);
            }
        }

        Commands::Call { tool, args } => {
            let args: serde_json::Value = serde_json::from_str(args)
                .with_context(|| format!("Invalid args JSON: {}", args))?;

            let mut dispatcher = Dispatcher::new(config, picker);
            let response = dispatcher.handle(&ToolCallRequest::new(tool.as_str(), args));

            println!("{}", serde_json::to_string_pretty(&response)?);

            if response.is_error {
                std::process::exit(1);
            }
        }

        Commands::Tools => {
            let tools = schema::tool_definitions(config.profile);
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }

        Commands::Strategy => match picker.pick() {
            Ok(strategy) => println!("{}", strategy),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },

        Commands::Status => {
            println!("{} v{}", mcp::SERVER_NAME, mcp::SERVER_VERSION);
            println!("Config: {:?}", cli.config);
            println!("Profile: {:?}", config.profile);
            println!("Initial level: {}", config.initial_level.label());
            println!("Default style: {}", config.default_style.as_str());
            println!("Strategies: {:?}", picker.path());
            println!();
            println!("Tools:");
            for tool in config.profile.tools() {
                println!("  {:<18} {}", tool.name, tool.description);
            }
        }
    }

    Ok(())
}
