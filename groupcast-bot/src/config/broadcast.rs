//! Broadcast settings: operator id, destination groups, fan-out width.

use anyhow::{Context, Result};
use std::env;

use crate::registry::GroupRegistry;

pub const DEFAULT_BROADCAST_CONCURRENCY: usize = 1;

#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// OPERATOR_ID
    pub operator_id: i64,
    /// GROUP_IDS paired with GROUP_NAMES
    pub registry: GroupRegistry,
    /// BROADCAST_CONCURRENCY
    pub concurrency: usize,
}

impl BroadcastConfig {
    pub fn new(operator_id: i64, registry: GroupRegistry, concurrency: usize) -> Self {
        Self {
            operator_id,
            registry,
            concurrency,
        }
    }

    /// Reads OPERATOR_ID, GROUP_IDS, GROUP_NAMES (required) and BROADCAST_CONCURRENCY (optional).
    pub fn from_env() -> Result<Self> {
        let operator_id = parse_operator_id(&required("OPERATOR_ID")?)?;
        let ids = parse_group_ids(&required("GROUP_IDS")?)?;
        let names = parse_group_names(&required("GROUP_NAMES")?);
        let registry = GroupRegistry::from_pairs(ids, names)?;
        let concurrency = match env::var("BROADCAST_CONCURRENCY") {
            Ok(raw) => parse_concurrency(&raw)?,
            Err(_) => DEFAULT_BROADCAST_CONCURRENCY,
        };
        Ok(Self::new(operator_id, registry, concurrency))
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} not set", name))
}

pub fn parse_operator_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("OPERATOR_ID is not a numeric user id: {}", raw))
}

/// Comma-separated chat ids; surrounding whitespace is ignored.
pub fn parse_group_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("GROUP_IDS entry is not a numeric chat id: {}", s))
        })
        .collect()
}

/// Comma-separated display names, positionally matching GROUP_IDS.
pub fn parse_group_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_concurrency(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("BROADCAST_CONCURRENCY is not a number: {}", raw))?;
    if value == 0 {
        anyhow::bail!("BROADCAST_CONCURRENCY must be at least 1");
    }
    Ok(value)
}
