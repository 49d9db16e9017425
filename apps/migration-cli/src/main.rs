use clap::{Parser, ValueEnum};
use db_infra::{connect, orchestrate_migration, PoolSettings, StorageCredentials};
use migration::MigrationCommand;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Policy simulation database migration tool")]
#[command(after_help = "Storage is read from STORAGE_URL and STORAGE_SERVICE_KEY.")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let creds = match StorageCredentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    if matches!(creds.db_kind(), Ok(db_infra::DbKind::SqliteMemory)) {
        eprintln!("❌ In-memory SQLite is not supported for CLI operations.");
        eprintln!("   Each CLI run would migrate a fresh database that vanishes on exit.");
        eprintln!("   Use a postgres endpoint or a sqlite file, e.g. STORAGE_URL=sqlite://./sim.db");
        std::process::exit(1);
    }

    let settings = match PoolSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let pool = match connect(&creds, settings).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = orchestrate_migration(&pool, &creds, args.command.into()).await {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
