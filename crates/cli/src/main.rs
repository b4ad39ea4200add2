//! Serelix CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the database schema (including the session table)
//! serelix-cli migrate
//!
//! # Create a user, optionally as administrator
//! serelix-cli user create -e ada@example.com -n "Ada Lovelace" --admin
//!
//! # Grant administrator rights to an existing user
//! serelix-cli user promote -e ada@example.com
//!
//! # List users
//! serelix-cli user list
//!
//! # Give a user a handful of demo clients
//! serelix-cli seed -e ada@example.com
//! ```
//!
//! The database is taken from `CRM_DATABASE_URL` (or `DATABASE_URL`), the
//! same variables the server reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "serelix-cli")]
#[command(author, version, about = "Serelix CRM CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Add demo clients to a user's account
    Seed {
        /// Email of the user who will own the demo clients
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (read from `CRM_USER_PASSWORD` when not given)
        #[arg(short, long, env = "CRM_USER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Company name
        #[arg(short, long)]
        company: Option<String>,

        /// Grant administrator rights
        #[arg(long)]
        admin: bool,
    },
    /// Grant administrator rights to an existing user
    Promote {
        /// Email of the user to promote
        #[arg(short, long)]
        email: String,
    },
    /// List all users
    List,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                password,
                company,
                admin,
            } => {
                commands::user::create(email, name, password, company, admin).await?;
            }
            UserAction::Promote { email } => commands::user::promote(&email).await?,
            UserAction::List => commands::user::list().await?,
        },
        Commands::Seed { email } => commands::seed::demo_clients(&email).await?,
    }
    Ok(())
}
