//! raftstore Inspect Binary
//!
//! Offline inspection and repair of a raftstore database file.

use std::process;

use clap::{Parser, Subcommand};
use raftstore::{
    Config, DiskLogStore, DiskStableStore, Durability, LogStore, StableStore, Storage,
};
use tracing_subscriber::{fmt, EnvFilter};

/// raftstore Inspect
#[derive(Parser, Debug)]
#[command(name = "raftstore-inspect")]
#[command(about = "Inspect and edit a raftstore log database")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(short, long, default_value = "./raftstore.redb")]
    path: String,

    /// Commit durability [low, medium, high]
    #[arg(short, long, default_value = "high")]
    durability: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print first/last index and entry count
    Stats,

    /// Print the log entry at an index
    Get {
        /// The log index
        index: u64,
    },

    /// Print a stable value
    GetKey {
        /// The key
        key: String,

        /// Decode the value as a u64
        #[arg(long)]
        u64: bool,
    },

    /// Set a stable value
    SetKey {
        /// The key
        key: String,

        /// The value
        value: String,
    },

    /// Delete log entries in [min, max]
    DeleteRange {
        /// Lowest index to delete
        min: u64,

        /// Highest index to delete
        max: u64,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,raftstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("raftstore-inspect v{}", raftstore::VERSION);

    let durability: Durability = match args.durability.parse() {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(2);
        }
    };

    let config = Config::builder()
        .path(&args.path)
        .durability(durability)
        .build();

    let storage = match Storage::open(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open storage: {}", e);
            process::exit(1);
        }
    };

    let result = run(&storage, args.command);
    storage.close();

    if let Err(e) = result {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(storage: &Storage, command: Commands) -> raftstore::Result<()> {
    let logs = DiskLogStore::new(storage.clone());
    let stable = DiskStableStore::new(storage.clone());

    match command {
        Commands::Stats => {
            println!("first_index: {}", logs.first_index()?);
            println!("last_index:  {}", logs.last_index()?);
            println!("entries:     {}", logs.len()?);
        }
        Commands::Get { index } => {
            let entry = logs.get_log(index)?;
            println!("index: {}", entry.index);
            println!("term:  {}", entry.term);
            println!("kind:  {:?}", entry.kind);
            println!("data:  {}", String::from_utf8_lossy(&entry.data));
        }
        Commands::GetKey { key, u64 } => {
            if u64 {
                println!("{}", stable.get_u64(key.as_bytes())?);
            } else {
                let value = stable.get(key.as_bytes())?;
                println!("{}", String::from_utf8_lossy(&value));
            }
        }
        Commands::SetKey { key, value } => {
            stable.set(key.as_bytes(), value.as_bytes())?;
            println!("OK");
        }
        Commands::DeleteRange { min, max } => {
            logs.delete_range(min, max)?;
            println!("OK");
        }
    }

    Ok(())
}
