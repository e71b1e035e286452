// src/bin/gatectl.rs
//! Admin CLI for job requirement configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use eligibility_gate::database::{DatabaseConfig, RequirementRepository};
use eligibility_gate::requirements::ProfileRequirementKey;
use std::collections::BTreeSet;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "gatectl")]
#[command(about = "Manage per-job profile requirement configuration")]
struct GateCli {
    #[command(subcommand)]
    command: GateCommand,

    #[arg(long, default_value = "data/applygate.db")]
    database_path: PathBuf,
}

#[derive(Subcommand)]
enum GateCommand {
    /// Show the requirement set configured for a job
    Show { job_id: Uuid },
    /// Replace a job's requirement set (full replace, no merge)
    Set {
        job_id: Uuid,
        /// Requirement keys, e.g. BASIC_PHONE RESUME SKILLS
        keys: Vec<String>,
    },
    /// Clear a job's requirement set (gate becomes inactive)
    Clear { job_id: Uuid },
    /// List every job with a configured requirement set
    List,
    /// Print the requirement key catalog with labels
    Keys,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = GateCli::parse();

    let mut db_config = DatabaseConfig::new(cli.database_path.clone());
    db_config.init_pool().await?;
    db_config.migrate().await?;

    let pool = db_config.pool()?;
    let repo = RequirementRepository::new(pool);

    match cli.command {
        GateCommand::Show { job_id } => match repo.get(job_id).await? {
            Some(config) => {
                println!("Job: {}", config.job_id);
                println!(
                    "Updated: {}",
                    config.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                if config.requirement_keys.is_empty() {
                    println!("No requirement keys (gate inactive)");
                } else {
                    println!("Requirement keys:");
                    for key in &config.requirement_keys {
                        println!("  {:<28} {}", key.as_str(), key.label());
                    }
                }
            }
            None => {
                println!("❌ No requirement configuration for job: {}", job_id);
            }
        },

        GateCommand::Set { job_id, keys } => {
            let mut requirement_keys = BTreeSet::new();
            for raw in &keys {
                match ProfileRequirementKey::parse(raw) {
                    Some(key) => {
                        requirement_keys.insert(key);
                    }
                    None => {
                        println!("❌ Unknown requirement key: {}", raw);
                        println!("   Run 'gatectl keys' for the full catalog");
                        return Ok(());
                    }
                }
            }

            repo.upsert(job_id, &requirement_keys).await?;
            println!(
                "✅ Saved {} requirement keys for job {}",
                requirement_keys.len(),
                job_id
            );
        }

        GateCommand::Clear { job_id } => {
            repo.upsert(job_id, &BTreeSet::new()).await?;
            println!("✅ Cleared requirement set for job {} (gate inactive)", job_id);
        }

        GateCommand::List => {
            let configs = repo.list().await?;
            if configs.is_empty() {
                println!("No jobs have a configured requirement set.");
            } else {
                println!("{:<38} {:<6} {:<20}", "Job", "Keys", "Updated");
                println!("{}", "-".repeat(64));
                for config in configs {
                    println!(
                        "{:<38} {:<6} {:<20}",
                        config.job_id,
                        config.requirement_keys.len(),
                        config.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }

        GateCommand::Keys => {
            println!("{:<28} {:<12} {}", "Key", "Group", "Label");
            println!("{}", "-".repeat(64));
            for key in ProfileRequirementKey::ALL {
                println!(
                    "{:<28} {:<12} {}",
                    key.as_str(),
                    format!("{:?}", key.group()).to_lowercase(),
                    key.label()
                );
            }
        }
    }

    Ok(())
}
