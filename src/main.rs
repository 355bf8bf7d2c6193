use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use history_mapper::cli::{
    handle_history_command, handle_record_command, HistoryCommands, RecordCommands,
};
use history_mapper::config::{HistoryPaths, Settings};
use history_mapper::storage::Storage;

#[derive(Parser)]
#[command(
    name = "history",
    version,
    about = "Record persistence with automatic revision history",
    long_about = "history-mapper stores JSON records and writes one history row for \
                  every create, update and delete: who changed the record and which \
                  values were added or removed."
)]
struct Cli {
    /// Identity recorded as the author of changes
    #[arg(short, long, global = true, env = "HISTORY_MAPPER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Record(RecordCommands),

    #[command(flatten)]
    History(HistoryCommands),

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = HistoryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Record(cmd)) => {
            let storage = Storage::new(paths, &settings)?;
            handle_record_command(&storage, &settings, cli.user.as_deref(), cmd)?;
        }
        Some(Commands::History(cmd)) => {
            let storage = Storage::new(paths, &settings)?;
            handle_history_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing history-mapper at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to {}", paths.settings_file().display());
            println!("Run 'history save <entity> <json>' to store a first record.");
        }
        Some(Commands::Config) => {
            println!("history-mapper Configuration");
            println!("============================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!(
                "History directory: {}",
                paths
                    .history_dir(settings.history_database.as_deref())
                    .display()
            );
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Path separator: {:?}", settings.path_separator);
            println!("  History table:  {}", settings.history_table);
            println!(
                "  Default actor:  {}",
                settings.default_actor.as_deref().unwrap_or("(none)")
            );
            if settings.entities.is_empty() {
                println!("  Entities:       (none configured)");
            } else {
                println!("  Entities:");
                for entity in &settings.entities {
                    println!(
                        "    {} (table: {}, key: {})",
                        entity.name,
                        entity.table(),
                        entity.primary_key
                    );
                }
            }
        }
        None => {
            println!("history-mapper - record persistence with revision history");
            println!();
            println!("Run 'history --help' for usage information.");
        }
    }

    Ok(())
}
