use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gsync")]
#[command(about = "GST identity sync CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> site -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Whether the invoice-numbering headline applies to a doctype
    Banner {
        /// Doctype, e.g. "Sales Invoice" or SalesInvoice
        #[arg(long)]
        kind: String,

        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// Check the format and check digit of a GST transporter id
    CheckTransporterId { id: String },

    /// Open a session against the configured host and replay field edits
    Replay {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        /// Record JSON (must carry "doctype")
        #[arg(long)]
        record: String,

        /// JSON array of {"field": ..., "value": ...}
        #[arg(long)]
        events: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist; deployments inject env vars directly.
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let cfg = commands::load_config(&paths)?;
            println!("config_hash={}", cfg.config_hash);
            println!("{}", cfg.canonical_json);
        }

        Commands::Banner { kind, config_paths } => {
            let kind = commands::parse_kind(&kind)?;
            let cfg = commands::load_config(&config_paths)?;
            match gsync_rules::invoice_no_banner(kind, &cfg.settings) {
                Some(headline) => {
                    println!("invoice_no_banner=true");
                    println!("message={}", headline.message);
                    if let Some(link) = &headline.link {
                        println!("link={}", link.url);
                    }
                }
                None => println!("invoice_no_banner=false"),
            }
        }

        Commands::CheckTransporterId { id } => {
            gsync_rules::validate_transporter_id(&id).map_err(|e| anyhow!(e))?;
            println!("transporter_id_ok={}", id.trim().to_ascii_uppercase());
        }

        Commands::Replay {
            config_paths,
            record,
            events,
        } => {
            commands::replay::run(&config_paths, &record, &events).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
