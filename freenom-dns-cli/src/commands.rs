//! 子命令执行

use std::path::Path;

use anyhow::{Context, Result};
use freenom_dns_provider::{ProviderConfig, ProviderError, Record, RecordProvider, create_provider};
use serde::Serialize;

use crate::{Cli, Commands};

/// How a command ended when no error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    /// The panel confirmed fewer records than were requested.
    Partial,
}

/// JSON result of a mutating command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MutationReport<'a> {
    zone: &'a str,
    requested: &'a [Record],
    confirmed: &'a [Record],
    /// Requested records the panel did not confirm.
    missing: Vec<&'a Record>,
}

impl<'a> MutationReport<'a> {
    fn new(zone: &'a str, requested: &'a [Record], confirmed: &'a [Record]) -> Self {
        let mut remaining: Vec<&Record> = confirmed.iter().collect();
        let missing = requested
            .iter()
            .filter(|wanted| match remaining.iter().position(|c| c == wanted) {
                Some(i) => {
                    remaining.swap_remove(i);
                    false
                }
                None => true,
            })
            .collect();
        Self {
            zone,
            requested,
            confirmed,
            missing,
        }
    }

    fn outcome(&self) -> Outcome {
        if self.missing.is_empty() {
            Outcome::Complete
        } else {
            Outcome::Partial
        }
    }
}

fn load_config(path: Option<&Path>, base_url: Option<String>) -> Result<ProviderConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<ProviderConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ProviderConfig::from_env().context("reading credentials from environment")?,
    };

    Ok(match base_url {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url),
        _ => config,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Record-changing subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Add,
    Set,
    Delete,
}

impl Mutation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }

    async fn apply(
        self,
        provider: &dyn RecordProvider,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, ProviderError> {
        match self {
            Self::Add => provider.append_records(zone, records).await,
            Self::Set => provider.set_records(zone, records).await,
            Self::Delete => provider.delete_records(zone, records).await,
        }
    }
}

async fn mutate(
    provider: &dyn RecordProvider,
    mutation: Mutation,
    zone: &str,
    records: &[Record],
) -> Result<Outcome> {
    let confirmed = mutation
        .apply(provider, zone, records)
        .await
        .with_context(|| format!("{} on {zone}", mutation.as_str()))?;

    let report = MutationReport::new(zone, records, &confirmed);
    for record in &report.missing {
        tracing::warn!("not confirmed: {record}");
    }
    print_json(&report)?;
    Ok(report.outcome())
}

pub async fn run(cli: Cli) -> Result<Outcome> {
    let config = load_config(cli.config.as_deref(), cli.base_url)?;
    let provider = create_provider(config)?;

    match cli.command {
        Commands::Zones => {
            let zones = provider.list_zones().await.context("listing zones")?;
            print_json(&zones)?;
            Ok(Outcome::Complete)
        }
        Commands::List { zone } => {
            let records = provider
                .list_records(&zone)
                .await
                .with_context(|| format!("listing records of {zone}"))?;
            print_json(&records)?;
            Ok(Outcome::Complete)
        }
        Commands::Add { zone, records } => {
            mutate(provider.as_ref(), Mutation::Add, &zone, &records).await
        }
        Commands::Set { zone, records } => {
            mutate(provider.as_ref(), Mutation::Set, &zone, &records).await
        }
        Commands::Delete { zone, records } => {
            mutate(provider.as_ref(), Mutation::Delete, &zone, &records).await
        }
    }
}
