//! pan_session CLI - Inspect drive paths with an automatically refreshed token.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pan_session::client::DEFAULT_API_BASE;
use pan_session::config::CONFIG_ENV;
use pan_session::exchange::DEFAULT_AUTH_BASE;
use pan_session::gate::{parse_expire_time, zone_from_hours, DEFAULT_ZONE_OFFSET_HOURS};
use pan_session::{
    escape, path, resolver, wildcard, ConfigStore, DriveClient, FileConfigStore, Freshness,
    GateConfig, HttpDriveClient, HttpTokenExchange, IdGenerator, Session, TokenGate,
};

/// CLI tool for resolving cloud-drive paths.
#[derive(Parser)]
#[command(name = "pan_session")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the account config file.
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Base URL of the drive API.
    #[arg(long, env = "PAN_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Base URL of the auth service.
    #[arg(long, env = "PAN_AUTH_BASE", default_value = DEFAULT_AUTH_BASE)]
    auth_base: String,

    /// Hours east of UTC that token expiry times are written in.
    #[arg(long, env = "PAN_TOKEN_ZONE", default_value_t = DEFAULT_ZONE_OFFSET_HOURS, allow_hyphen_values = true)]
    zone_offset_hours: i32,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata for one or more paths.
    Stat {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List entries matching shell patterns (e.g. `docs/*.pdf`).
    Ls {
        #[arg(default_value = ".")]
        patterns: Vec<String>,
    },

    /// Print every directory from the root down to a path.
    Ancestors {
        path: String,
    },

    /// Show token expiry and refresh it if needed.
    Token,

    /// Percent-encode (or decode) a path segment.
    Escape {
        value: String,

        #[arg(long, short = 'd')]
        decode: bool,
    },

    /// Generate a random identifier.
    RandomId {
        #[arg(long, short = 'n', default_value_t = 8)]
        length: usize,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Everything a remote command needs.
struct Remote {
    store: FileConfigStore,
    client: Arc<HttpDriveClient>,
    session: Session,
}

fn connect(cli: &Cli) -> Result<Remote> {
    let store = match &cli.config {
        Some(path) => FileConfigStore::new(path),
        None => FileConfigStore::default_location()?,
    };
    let record = store
        .active_user()
        .with_context(|| format!("Failed to load active user from {:?}", store.path()))?;

    let client = Arc::new(HttpDriveClient::new(&cli.api_base));
    let session = Session::new(record).with_client(client.clone());

    Ok(Remote {
        store,
        client,
        session,
    })
}

fn token_zone(cli: &Cli) -> Result<FixedOffset> {
    zone_from_hours(cli.zone_offset_hours)
        .with_context(|| format!("Invalid zone offset: {}", cli.zone_offset_hours))
}

/// Run the token gate and persist a newly minted token for sibling processes.
async fn gate(cli: &Cli, ctx: &mut Remote) -> Result<Freshness> {
    let zone = token_zone(cli)?;
    let gate = TokenGate::new(GateConfig {
        zone,
        ..GateConfig::default()
    });
    let exchange = HttpTokenExchange::new(&cli.auth_base).with_zone(zone);

    let freshness = gate.ensure_fresh(&mut ctx.session, &exchange, &ctx.store).await;
    if freshness == Freshness::Refreshed {
        if let Err(e) = ctx.store.upsert_user(&ctx.session.record) {
            warn!(error = %e, "could not save refreshed token");
        }
    }
    Ok(freshness)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Stat { paths } => {
            let mut ctx = connect(&cli)?;
            gate(&cli, &mut ctx).await?;

            let drive_id = ctx.session.record.file_drive_id.clone();
            let lookup = resolver::file_info_by_paths(
                &ctx.session,
                ctx.client.as_ref(),
                &drive_id,
                paths.as_slice(),
            )
            .await
            .context("Failed to look up paths")?;

            for file in &lookup.resolved {
                println!("{}", file);
            }
            for failed in &lookup.failed {
                eprintln!("Not found: {}", failed);
            }
            if lookup.resolved.is_empty() {
                anyhow::bail!("None of the given paths exist");
            }
        }

        Commands::Ls { patterns } => {
            let mut ctx = connect(&cli)?;
            gate(&cli, &mut ctx).await?;
            let drive_id = ctx.session.record.file_drive_id.clone();

            for pattern in patterns {
                if wildcard::is_pattern(pattern) {
                    let matched = resolver::match_paths(
                        &ctx.session,
                        ctx.client.as_ref(),
                        &drive_id,
                        std::slice::from_ref(pattern),
                    )
                    .await;
                    if matched.is_empty() {
                        eprintln!("No entries matched: {}", pattern);
                    }
                    for entry in matched {
                        println!("{}", entry);
                    }
                    continue;
                }

                let dir = ctx.session.path_join(&drive_id, pattern);
                let entry = ctx
                    .client
                    .lookup_by_path(&drive_id, &dir)
                    .await
                    .with_context(|| format!("Failed to look up {}", dir))?;
                if !entry.is_folder() {
                    println!("{}", entry);
                    continue;
                }

                let children = ctx
                    .client
                    .list_by_path(&drive_id, &dir)
                    .await
                    .with_context(|| format!("Failed to list {}", dir))?;
                for child in children {
                    println!("{}", child);
                }
            }
        }

        Commands::Ancestors { path: user_path } => {
            let canonical = match connect(&cli) {
                Ok(ctx) => ctx
                    .session
                    .path_join(&ctx.session.record.file_drive_id, user_path),
                Err(e) => {
                    warn!(error = %e, "no usable config, resolving from root");
                    path::join(path::ROOT, user_path)
                }
            };
            for dir in path::ancestors(&canonical) {
                println!("{}", dir);
            }
        }

        Commands::Token => {
            let mut ctx = connect(&cli)?;
            let before = ctx.session.web_token().expire_time.clone();
            let freshness = gate(&cli, &mut ctx).await?;
            let token = ctx.session.web_token();

            let remaining = parse_expire_time(&token.expire_time, token_zone(&cli)?)
                .map(|t| (t - Utc::now()).num_minutes())
                .ok();

            info!(?freshness, "token gate finished");
            println!("User:     {}", ctx.session.record.user_id);
            println!("Status:   {:?}", freshness);
            println!("Expires:  {} (was {})", token.expire_time, before);
            match remaining {
                Some(minutes) => println!("Remaining: {} min", minutes),
                None => println!("Remaining: unknown"),
            }
        }

        Commands::Escape { value, decode } => {
            if *decode {
                println!("{}", escape::unescape(value));
            } else {
                println!("{}", escape::escape(value));
            }
        }

        Commands::RandomId { length } => {
            let mut generator = IdGenerator::new();
            println!("{}", generator.generate(*length));
        }
    }

    Ok(())
}
