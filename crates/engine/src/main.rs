//! Document source CLI - main entry point.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsource_engine::infrastructure::memory::{HostSnapshot, MemoryHost};
use docsource_engine::App;

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsource_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let snapshot = if cli.snapshot.exists() {
        HostSnapshot::load(&cli.snapshot).await?
    } else {
        tracing::warn!(
            path = %cli.snapshot.display(),
            "Snapshot not found, starting from an empty host"
        );
        HostSnapshot::default()
    };
    let host = Arc::new(MemoryHost::from_snapshot(snapshot));
    let app = App::new(host.services());

    tracing::info!(kind = %cli.kind, source = %cli.source, "Resolving collection");
    let collection = app.collection(cli.kind, cli.source.clone());
    let mutating = cli.command.is_mutating();

    match cli.command {
        Command::List => print_json(&collection.enumerate().await?)?,
        Command::Get { id } => match collection.get(id).await? {
            Some(result) => print_json(&result)?,
            None => anyhow::bail!("{} {} not found at {}", cli.kind, id, cli.source),
        },
        Command::Query { criteria } => {
            print_json(&collection.query(cli::criteria(criteria)).await?)?
        }
        Command::Create { records } => {
            let records = read_records(&records).await?;
            print_json(&collection.create_many(records).await?)?
        }
        Command::Destroy { id } => {
            collection.destroy(id).await?;
            tracing::info!(%id, "Destroyed entry");
        }
    }

    if mutating {
        host.snapshot().save(&cli.snapshot).await?;
        tracing::info!(path = %cli.snapshot.display(), "Snapshot saved");
    }

    Ok(())
}

async fn read_records(path: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
