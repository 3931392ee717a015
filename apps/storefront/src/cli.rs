//! # Command Line
//!
//! `novatime` subcommands. Each one bootstraps a session, runs one or more
//! commands, and closes the database.
//!
//! ```bash
//! # Serve a view process over stdin/stdout
//! novatime ipc
//!
//! # Log in with a demo account (persists across invocations)
//! novatime login -e admin@novatime.com -p admin123
//! novatime whoami
//!
//! # Database, migration and session summary
//! novatime status
//!
//! # Browse the catalog against a throwaway database
//! novatime --db /tmp/novatime.db catalog
//!
//! # Write a default storefront.toml to edit
//! novatime init-config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::io::BufReader;
use tracing::info;

use crate::commands::{auth, catalog};
use crate::error::ApiError;
use crate::ipc;
use crate::state::{BootstrapError, ConfigError, StoreConfig, Storefront};
use novatime_db::migrations;

#[derive(Debug, Parser)]
#[command(name = "novatime")]
#[command(author, version, about = "NovaTime watch storefront")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "NOVATIME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file (overrides config and NOVATIME_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve JSON-lines requests on stdin, responses on stdout
    Ipc,

    /// Log in with an account from the credential directory
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create a shopper account and log in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// End the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List the catalog
    Catalog,

    /// Show database health, migrations and the session
    Status,

    /// Write the default configuration to the config file
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Failures surfaced to the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A login, register or init-config attempt was refused.
    #[error("{0}")]
    Rejected(String),
}

/// Runs one CLI invocation.
pub async fn execute(cli: Cli) -> Result<(), CliError> {
    let command = match cli.command {
        Command::InitConfig { force } => return init_config(cli.config, cli.db, force),
        command => command,
    };

    let mut config = StoreConfig::load(cli.config)?;
    if let Some(db) = cli.db {
        config.database.path = Some(db);
    }

    let storefront = Storefront::bootstrap(config).await?;
    let result = run_command(&storefront, command).await;
    storefront.shutdown().await;
    result
}

async fn run_command(storefront: &Storefront, command: Command) -> Result<(), CliError> {
    let scope = storefront.scope();

    match command {
        Command::Ipc => {
            let handled = ipc::serve(
                scope,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
            info!(handled, "IPC session finished");
        }
        Command::Login { email, password } => {
            let response = auth::login(scope, auth::LoginArgs { email, password }).await?;
            report(response)?;
        }
        Command::Register {
            name,
            email,
            password,
            confirm,
        } => {
            let confirm_password = confirm.unwrap_or_else(|| password.clone());
            let response = auth::register(
                scope,
                auth::RegisterArgs {
                    name,
                    email,
                    password,
                    confirm_password,
                },
            )
            .await?;
            report(response)?;
        }
        Command::Logout => {
            auth::logout(scope).await?;
            println!("{}", auth::MSG_LOGGED_OUT);
        }
        Command::Whoami => match auth::get_session(scope).user {
            Some(user) => println!("{} <{}> ({:?})", user.name, user.email, user.role),
            None => println!("Not logged in"),
        },
        Command::Catalog => {
            let config = scope.state::<StoreConfig>();
            for dto in catalog::list_watches(scope) {
                println!("{}", catalog_line(config, &dto));
            }
        }
        Command::Status => {
            let db = storefront.database();
            let health = if db.health_check().await { "ok" } else { "unreachable" };
            let (total, applied) = migrations::migration_status(db.pool())
                .await
                .map_err(ApiError::from)?;
            let path = scope.state::<StoreConfig>().database_path()?;

            println!("database:   {} ({})", path.display(), health);
            println!("migrations: {}/{}", applied, total);
            match auth::get_session(scope).user {
                Some(user) => println!("session:    {} ({:?})", user.email, user.role),
                None => println!("session:    none"),
            }
        }
        Command::InitConfig { .. } => {
            return Err(CliError::Rejected(
                "init-config does not run inside a session".to_string(),
            ));
        }
    }

    Ok(())
}

fn init_config(path: Option<PathBuf>, db: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = match path {
        Some(path) => path,
        None => StoreConfig::default_config_path().ok_or(ConfigError::NoPlatformDirs)?,
    };

    if path.exists() && !force {
        return Err(CliError::Rejected(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }

    let mut config = StoreConfig::default();
    config.database.path = db;
    config.save(&path)?;

    println!("Wrote {}", path.display());
    Ok(())
}

fn report(response: auth::AuthResponse) -> Result<(), CliError> {
    if !response.success {
        return Err(CliError::Rejected(response.message));
    }

    println!("{}", response.message);
    if let Some(user) = response.user {
        println!("{} <{}> ({:?})", user.name, user.email, user.role);
    }
    Ok(())
}

fn catalog_line(config: &StoreConfig, dto: &catalog::WatchDto) -> String {
    let watch = &dto.watch;
    let mut line = format!(
        "#{:<4} {:<32} {:>10}",
        watch.id,
        watch.name,
        config.format_price(watch.price())
    );
    if dto.discount_percent > 0 {
        line.push_str(&format!("  -{}%", dto.discount_percent));
    }
    if !watch.in_stock {
        line.push_str("  (agotado)");
    }
    line
}
