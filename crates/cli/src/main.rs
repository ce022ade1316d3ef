//! E-Paket CLI - Database migrations and domain directory tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! ep-cli migrate
//!
//! # Register, list, and remove store domains
//! ep-cli domain add --store-name "Diamond Luxe" diamond.example
//! ep-cli domain add --store-id 1 diamond-luxe.epaket.app
//! ep-cli domain list
//! ep-cli domain remove diamond.example
//!
//! # Seed the directory from a YAML file
//! ep-cli seed domains stores.yaml --clear
//!
//! # Check what a hostname resolves to
//! ep-cli resolve www.diamond.example
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ep-cli")]
#[command(author, version, about = "E-Paket CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Manage the domain directory
    Domain {
        #[command(subcommand)]
        action: DomainAction,
    },
    /// Seed the database from a file
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Resolve a hostname to its store, as the storefront would
    Resolve {
        /// Hostname to resolve (e.g. www.example.com)
        hostname: String,

        /// Directory query timeout in milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },
}

#[derive(Subcommand)]
enum DomainAction {
    /// Register a domain for a new store, or for an existing one with --store-id
    Add {
        /// Display name for a new store
        #[arg(short = 'n', long, required_unless_present = "store_id")]
        store_name: Option<String>,

        /// Attach the domain to this existing store instead
        #[arg(long, conflicts_with = "store_name")]
        store_id: Option<String>,

        /// Domain to register (normalized before storing)
        domain: String,
    },
    /// Remove a registered domain
    Remove {
        /// Domain to remove
        domain: String,
    },
    /// List registered domains
    List,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed store domains from a YAML file
    Domains {
        /// Path to the YAML file
        file: String,

        /// Remove every existing store first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Domain { action } => match action {
            DomainAction::Add {
                store_name,
                store_id,
                domain,
            } => match (store_id, store_name) {
                (Some(store_id), _) => commands::domain::attach(&store_id, &domain).await?,
                (None, Some(store_name)) => commands::domain::add(&store_name, &domain).await?,
                (None, None) => return Err("either --store-name or --store-id is required".into()),
            },
            DomainAction::Remove { domain } => commands::domain::remove(&domain).await?,
            DomainAction::List => commands::domain::list().await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Domains { file, clear } => commands::seed::domains(&file, clear).await?,
        },
        Commands::Resolve {
            hostname,
            timeout_ms,
        } => commands::resolve::hostname(&hostname, timeout_ms).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_domain_add() {
        let cli = Cli::try_parse_from([
            "ep-cli",
            "domain",
            "add",
            "--store-name",
            "Acme",
            "acme.example",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(
            cli.command,
            Commands::Domain {
                action: DomainAction::Add { store_name: Some(ref store_name), store_id: None, ref domain }
            } if store_name == "Acme" && domain == "acme.example"
        ));
    }

    #[test]
    fn test_parse_domain_add_to_existing_store() {
        let cli = Cli::try_parse_from(["ep-cli", "domain", "add", "--store-id", "42", "alias.example"])
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(
            cli.command,
            Commands::Domain {
                action: DomainAction::Add { store_name: None, store_id: Some(ref id), .. }
            } if id == "42"
        ));
    }

    #[test]
    fn test_domain_add_requires_a_store() {
        assert!(Cli::try_parse_from(["ep-cli", "domain", "add", "alias.example"]).is_err());
        assert!(
            Cli::try_parse_from([
                "ep-cli", "domain", "add", "-n", "Acme", "--store-id", "42", "alias.example",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_resolve_default_timeout() {
        let cli = Cli::try_parse_from(["ep-cli", "resolve", "localhost"])
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(
            cli.command,
            Commands::Resolve { timeout_ms: 5000, .. }
        ));
    }
}
