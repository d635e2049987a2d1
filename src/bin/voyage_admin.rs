//! Admin account maintenance.
//!
//! - `create` - Add an admin with a bcrypt-hashed password
//! - `delete` - Remove an admin by email

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;

use voyage_api::config::Settings;
use voyage_api::db::mongo::{create_mongo_client, MongoStore};
use voyage_api::services::admin_accounts::{self, CreateOutcome};

/// Manage API administrator accounts.
#[derive(Parser)]
#[command(name = "voyage-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// MongoDB connection string (defaults to MONGODB_URI)
    #[arg(global = true, long)]
    uri: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin unless the email is already registered
    Create {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Delete the admin with the given email
    Delete {
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let settings = Settings::from_lookup(|key| match (key, &cli.uri) {
        ("MONGODB_URI", Some(uri)) => Some(uri.clone()),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| e.to_string())?;

    let client = create_mongo_client(&settings.mongo_uri)
        .await
        .map_err(|e| e.to_string())?;
    let store = MongoStore::new(client, settings.database_name.as_deref());

    match cli.command {
        Commands::Create { email, password } => {
            match admin_accounts::create_admin(
                &store,
                &email,
                &password,
                settings.bcrypt_cost,
            )
            .await
            .map_err(|e| e.to_string())?
            {
                CreateOutcome::Created(id) => println!("Admin created successfully ({id})."),
                CreateOutcome::AlreadyExists => println!("Admin already exists."),
            }
        }
        Commands::Delete { email } => {
            if admin_accounts::delete_admin(&store, &email)
                .await
                .map_err(|e| e.to_string())?
            {
                println!("Admin deleted successfully.");
            } else {
                println!("Admin not found.");
            }
        }
    }
    Ok(())
}
