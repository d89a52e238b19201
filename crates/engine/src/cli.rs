use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docsource_domain::{Criteria, DocumentId, EntryKind, SourceDescriptor};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Read and write entries of one kind at one document source",
    long_about = "Resolves a source descriptor against a host snapshot and runs one CRUD operation."
)]
pub struct Cli {
    #[arg(
        long,
        env = "DOCSOURCE_SNAPSHOT",
        default_value = "host_snapshot.json",
        value_name = "FILE",
        help = "Host snapshot to load; mutating commands write it back"
    )]
    pub snapshot: PathBuf,

    #[arg(
        short = 'k',
        long,
        value_name = "KIND",
        help = "Entry kind, e.g. skill, pilot, npc_feature"
    )]
    pub kind: EntryKind,

    #[arg(
        short = 's',
        long,
        default_value = r#"{"source":"world"}"#,
        value_parser = parse_source,
        value_name = "JSON",
        help = "Source descriptor as JSON, e.g. {\"source\":\"world_actor\",\"actor_id\":\"...\"}"
    )]
    pub source: SourceDescriptor,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "List every entry of the kind")]
    List,
    #[command(about = "Fetch one entry by id")]
    Get { id: DocumentId },
    #[command(about = "List entries whose data matches all criteria")]
    Query {
        #[arg(
            long = "where",
            value_name = "KEY=VALUE",
            value_parser = parse_criterion,
            help = "Equality criterion; VALUE is parsed as JSON, falling back to a string"
        )]
        criteria: Vec<(String, Value)>,
    },
    #[command(about = "Create entries from a JSON array of records")]
    Create { records: PathBuf },
    #[command(about = "Delete one entry by id")]
    Destroy { id: DocumentId },
}

impl Command {
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::Create { .. } | Command::Destroy { .. })
    }
}

pub fn criteria(pairs: Vec<(String, Value)>) -> Criteria {
    pairs.into_iter().collect()
}

fn parse_source(s: &str) -> Result<SourceDescriptor, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid source descriptor: {}", e))
}

fn parse_criterion(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
