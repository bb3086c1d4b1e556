use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use roster::{RosterSource, WeeklyRefresh, WynncraftClient, client::DEFAULT_API_URL};
use storage::models::{Leaderboard, LockRecord};
use storage::repository::LockRepository;
use storage::services::{LockEngine, LockPolicy};
use storage::{Database, MemorySnapshotStore, SnapshotStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(about = "Guild weekly XP leaderboard tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "GUILD_NAME")]
    guild: String,

    #[arg(long, env = "WYNNCRAFT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "LOCK_ROW_ID", default_value_t = 1)]
    lock_row_id: i32,

    #[arg(long, env = "ROSTER_TIMEOUT_SECS", default_value_t = 10)]
    roster_timeout_secs: u64,

    #[arg(long, env = "STORE_TIMEOUT_SECS", default_value_t = 5)]
    store_timeout_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the live leaderboard
    Current {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the weekly refresh and print XP gained since the last lock
    Weekly {
        /// Dry run against an in-memory store; nothing is persisted
        #[arg(long)]
        memory: bool,

        #[arg(long)]
        compare_and_swap: bool,
    },
    /// Create the locked leaderboard row if it does not exist
    Seed {
        /// Seed with an empty leaderboard instead of the live roster
        #[arg(long)]
        empty: bool,

        /// Lock time in epoch milliseconds (defaults to now)
        #[arg(long)]
        at: Option<i64>,
    },
    /// Print a player's profile
    Player { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "leaderboard={},roster={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = Arc::new(WynncraftClient::with_options(
        cli.guild.as_str(),
        &cli.api_url,
        Duration::from_secs(cli.roster_timeout_secs),
    )?);

    match &cli.command {
        Commands::Current { limit } => handle_current(client, *limit).await?,
        Commands::Weekly {
            memory,
            compare_and_swap,
        } => handle_weekly(&cli, client, *memory, *compare_and_swap).await?,
        Commands::Seed { empty, at } => handle_seed(&cli, client, *empty, *at).await?,
        Commands::Player { name } => handle_player(client, name).await?,
    }

    Ok(())
}

async fn handle_current(
    client: Arc<WynncraftClient>,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = client.fetch_roster().await?;
    let leaderboard = roster::compute_current_leaderboard(&payload)?;
    let shown = match limit {
        Some(n) => roster::top_members(&leaderboard, n),
        None => leaderboard,
    };

    tracing::info!("{} ({} members shown)", client.guild(), shown.len());
    for (idx, member) in shown.iter().enumerate() {
        tracing::info!("{:>3}. {:<20} {:>14} XP", idx + 1, member.username, member.xp);
    }

    Ok(())
}

async fn handle_weekly(
    cli: &Cli,
    client: Arc<WynncraftClient>,
    memory: bool,
    compare_and_swap: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = chrono::Utc::now().timestamp_millis();

    let store: Arc<dyn SnapshotStore> = if memory {
        tracing::info!("Dry run: using an empty in-memory lock");
        Arc::new(MemorySnapshotStore::with_record(LockRecord::new(
            Leaderboard::default(),
            now,
        )))
    } else {
        Arc::new(connect_store(cli).await?)
    };

    let policy = if compare_and_swap {
        LockPolicy::CompareAndSwap
    } else {
        LockPolicy::LastWriteWins
    };
    let engine = LockEngine::new(store)
        .with_policy(policy)
        .with_store_timeout(Duration::from_secs(cli.store_timeout_secs));

    let weekly = WeeklyRefresh::new(client, engine).refresh(now).await?;

    tracing::info!("Last weekly reset: {}", format_millis(weekly.last_locked_time));
    tracing::info!("Next weekly reset: {}", format_millis(weekly.next_reset_at));
    for (idx, entry) in weekly.difference_leaderboard.iter().enumerate() {
        tracing::info!("{:>3}. {:<20} {:>+14} XP", idx + 1, entry.username, entry.difference);
    }

    Ok(())
}

async fn handle_seed(
    cli: &Cli,
    client: Arc<WynncraftClient>,
    empty: bool,
    at: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let at = at.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    if at < 0 {
        return Err("lock time must not be negative".into());
    }

    let leaderboard = if empty {
        Leaderboard::default()
    } else {
        let payload = client.fetch_roster().await?;
        roster::compute_current_leaderboard(&payload)?
    };

    let store = connect_store(cli).await?;
    let created = store
        .seed(&LockRecord::new(leaderboard.clone(), at))
        .await?;

    if created {
        tracing::info!(
            "✓ Seeded lock row {} with {} members at {}",
            store.row_id(),
            leaderboard.len(),
            format_millis(at)
        );
    } else {
        tracing::warn!("Lock row {} already exists, left unchanged", store.row_id());
    }

    Ok(())
}

async fn handle_player(
    client: Arc<WynncraftClient>,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = client.fetch_player(name).await?;

    tracing::info!("{}", profile.username);
    tracing::info!("  Rank:        {}", profile.rank.as_deref().unwrap_or("-"));
    tracing::info!(
        "  Total level: {}",
        profile.level.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string())
    );
    tracing::info!(
        "  Playtime:    {} minutes",
        profile.playtime.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
    );
    tracing::info!("  First join:  {}", profile.first_join.as_deref().unwrap_or("-"));
    tracing::info!("  Last join:   {}", profile.last_join.as_deref().unwrap_or("-"));

    Ok(())
}

async fn connect_store(cli: &Cli) -> Result<LockRepository, Box<dyn std::error::Error>> {
    let database_url = cli
        .database_url
        .as_deref()
        .ok_or("DATABASE_URL is required for this command")?;

    tracing::info!("Connecting to database...");
    let db = Database::with_timeout(database_url, Duration::from_secs(cli.store_timeout_secs)).await?;
    db.run_migrations().await?;

    Ok(LockRepository::with_row_id(db.pool().clone(), cli.lock_row_id))
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
