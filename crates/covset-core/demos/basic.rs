//! Basic covset Example
//!
//! Builds a bounded record set, merges an overlapping batch, appends a
//! conflicting record and round-trips the result through JSON.
//!
//! Run with: cargo run -p covset-core --example basic [config.toml]

use covset_core::{Codec, CollisionSignal, Record, RecordSet, RecordSetConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RecordSetConfig::load(&path)?,
        None => RecordSetConfig::new(10),
    }
    .apply_env()?;
    info!(max_size = config.max_size, "Creating record set");

    let mut set = RecordSet::from_config(&config);

    let seed: Vec<Record> = (0..10)
        .map(|i| Record::new(format!("hash{}", i), 78.1234 + i as f64 * 0.0001))
        .collect();
    report("replace", set.replace(seed));

    let batch = vec![
        Record::new("hash0", 78.1244),
        Record::new("hash1", 78.1245),
        Record::new("other", 43.1231),
        Record::new("other", 93.2),
    ];
    report("merge", set.merge(batch));
    report("append", set.append(Record::new("hash5", 12.5)));

    let raw = set.encode(Codec::Json)?;
    println!("{}", String::from_utf8_lossy(&raw));

    let mut restored = RecordSet::from_config(&config);
    report("decode", restored.decode(Codec::Json, &raw)?);
    info!(equal = (restored == set), len = restored.len(), "Round trip complete");

    Ok(())
}

fn report(op: &str, signal: CollisionSignal) {
    if let Err(e) = signal.into_result() {
        warn!(op, error = %e, "Duplicate hashes resolved");
    } else {
        info!(op, "No collisions");
    }
}
