use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "server")]
use rapport::config::ServerConfig;
use rapport::database::entities::unsubscribe_tokens::ReminderType;
use rapport::database::{self, MigrateDirection};
use rapport::services::UnsubscribeService;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[cfg(feature = "server")]
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        cors_origin: Option<String>,
        /// TOML file with server settings; flags take precedence
        #[clap(short, long)]
        config: Option<String>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    Token {
        #[clap(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, default_value = "rapport.db")]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long, default_value = "rapport.db")]
        database: String,
    },
    /// Create a demo user with a small network of people
    Seed {
        #[clap(short, long, default_value = "rapport.db")]
        database: String,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommands {
    /// Issue an unsubscribe token for one reminder
    Issue {
        #[clap(short, long)]
        user: String,
        #[clap(short, long, default_value = "IMPORTANT_DATE")]
        reminder_type: ReminderType,
        #[clap(short, long)]
        entity: String,
        #[clap(short, long, default_value = "rapport.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        #[cfg(feature = "server")]
        Commands::Serve {
            port,
            database,
            cors_origin,
            config,
        } => {
            let mut server_config = match config {
                Some(path) => ServerConfig::from_file(path)?,
                None => ServerConfig::default(),
            };
            if let Some(port) = port {
                server_config.port = port;
            }
            if let Some(database) = database {
                server_config.database = database;
            }
            if cors_origin.is_some() {
                server_config.cors_origin = cors_origin;
            }

            info!("Starting server on port {}", server_config.port);
            rapport::server::start_server(server_config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                database::migrate_database(&database, MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                database::migrate_database(&database, direction).await?;
            }
            DbCommands::Seed { database } => {
                let db = open_database(&database).await?;
                let summary = database::seed_data::create_demo_network(&db).await?;
                println!("user:    {}", summary.user_id);
                println!("person:  {}", summary.focal_person_id);
                println!("session: {}", summary.session_token);
            }
        },
        Commands::Token { command } => match command {
            TokenCommands::Issue {
                user,
                reminder_type,
                entity,
                database,
            } => {
                let db = open_database(&database).await?;
                let token = UnsubscribeService::new(db)
                    .create_token(&user, reminder_type, &entity)
                    .await?;
                println!("{}", token);
            }
        },
    }

    Ok(())
}

async fn open_database(database: &str) -> Result<sea_orm::DatabaseConnection> {
    let db = database::establish_connection(&database::get_database_url(Some(database))).await?;
    database::setup_database(&db).await?;
    Ok(db)
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .without_time()
        .init();
}
