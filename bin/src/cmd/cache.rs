//! Cache maintenance command implementation.

use anyhow::{Context, Result};
use quarry_http::{CacheStore, Settings};

/// Remove entries older than the configured TTL.
pub(crate) fn prune(settings: &Settings) -> Result<()> {
    let cache = CacheStore::from_settings(settings);
    let removed = cache
        .prune_expired()
        .with_context(|| format!("failed to prune {}", cache.dir().display()))?;
    println!(
        "Removed {removed} expired entries from {} (ttl {}s)",
        cache.dir().display(),
        cache.ttl().as_secs()
    );
    Ok(())
}

/// Remove every cached response.
pub(crate) fn clear(settings: &Settings) -> Result<()> {
    let cache = CacheStore::from_settings(settings);
    let removed = cache
        .clear()
        .with_context(|| format!("failed to clear {}", cache.dir().display()))?;
    println!("Removed {removed} entries from {}", cache.dir().display());
    Ok(())
}
