use clap::{Parser, Subcommand};
use rescue_backend::models::data_store::DataStore;
use rescue_backend::models::db_operations::admin_db_operations;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "seed_cli", author, version, about = "Inspect and export the built-in seed data.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand, Debug)]
enum SeedAction {
    /// Writes a fresh seed snapshot in the admin export format.
    Export {
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Prints statistics for a freshly seeded store.
    Stats,
}

fn main() {
    let cli = Cli::parse();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    match &cli.command {
        Commands::Seed { action } => match action {
            SeedAction::Export { out } => export_seed(out),
            SeedAction::Stats => print_seed_stats(),
        },
    }
}

fn export_seed(out: &Path) {
    let store = DataStore::seeded();
    let snapshot = admin_db_operations::export_data(&store);

    let json = match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("❌ Error serialising seed snapshot: {}", e);
            return;
        }
    };

    if let Some(parent_dir) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent_dir) {
            eprintln!("❌ Error creating directory '{}': {}", parent_dir.display(), e);
            return;
        }
    }

    match fs::write(out, json) {
        Ok(_) => println!(
            "✅ Exported {} posts and {} profiles to '{}'.",
            snapshot.posts.len(),
            snapshot.profiles.len(),
            out.display()
        ),
        Err(e) => eprintln!("❌ Error writing '{}': {}", out.display(), e),
    }
}

fn print_seed_stats() {
    let store = DataStore::seeded();
    match serde_json::to_string_pretty(&admin_db_operations::detailed_stats(&store)) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("❌ Error serialising seed statistics: {}", e),
    }
}
