use std::process;

use clap::{Parser, Subcommand};
use colored::*;
use realworlded_cli::config::Config;
use realworlded_cli::demo::{create_demo_user, DemoUser};
use realworlded_core::constants::{DEMO_USER_EMAIL, DEMO_USER_PASSWORD};
use realworlded_storage::DbState;

#[derive(Parser)]
#[command(name = "realworlded")]
#[command(about = "RealWorldEd - AI mentors, clients, and evaluators for hands-on learning")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server (default)
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Interface to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
    },
    /// Create the demo account if it does not exist yet
    CreateDemoUser,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Option<Commands>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    match command.unwrap_or(Commands::Serve {
        port: None,
        host: None,
    }) {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                if port == 0 {
                    anyhow::bail!("Port 0 is out of valid range (1-65535)");
                }
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            realworlded_cli::run_server(config).await
        }
        Commands::CreateDemoUser => {
            let db = DbState::init(&config.database_url).await?;
            match create_demo_user(&db).await? {
                DemoUser::Created(user) => {
                    println!("{} Demo user created", "✓".green().bold());
                    println!("  Email:    {}", user.email);
                    println!("  Password: {}", DEMO_USER_PASSWORD);
                }
                DemoUser::AlreadyExists => {
                    println!(
                        "{} Demo user already exists ({})",
                        "•".cyan(),
                        DEMO_USER_EMAIL
                    );
                }
            }
            Ok(())
        }
    }
}
