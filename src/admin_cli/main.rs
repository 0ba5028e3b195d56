use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use jobboard::config::Config;
use jobboard::database;
use jobboard::services::{admin, PasswordHasher};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, verbatim_doc_comment)]
/// Administration utility for the job board.
/// Manages the schema, demo data and admin accounts.
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Schema and data commands.
    Db {
        #[command(subcommand)]
        db_command: DbCommand,
    },
    /// Creates an account with the admin role. Signup never grants it.
    CreateAdmin {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Falls back to the ADMIN_PASSWORD environment variable.
        #[arg(short, long, env = "ADMIN_PASSWORD")]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommand {
    /// Creates missing tables.
    Init,
    /// Creates missing tables and fills empty companies/categories with demo rows.
    Seed,
    /// Drops every table. Use with care!
    Wipe {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();
    let config = Config::from_env().context("Could not load configuration")?;
    let db = database::connect_with_settings(&config.database_settings()).await?;

    match &cli.command {
        Commands::Db { db_command } => match db_command {
            DbCommand::Init => {
                database::create_schema(&db).await?;
                println!("Schema created.");
            }
            DbCommand::Seed => {
                database::create_schema(&db).await?;
                let report = admin::seed_demo_data(&db).await?;
                println!(
                    "Seed applied: {} companies, {} categories inserted.",
                    report.companies, report.categories
                );
            }
            DbCommand::Wipe { yes } => {
                if !yes {
                    bail!("Refusing to drop tables without --yes");
                }
                database::drop_schema(&db).await?;
                println!("All tables dropped.");
            }
        },
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => {
            let hasher = PasswordHasher::new(config.effective_bcrypt_cost());
            let id = admin::create_admin(&db, hasher, name, email, password).await?;
            println!("Admin account created with id {}.", id);
        }
    }

    Ok(())
}
