use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::client::{Client, ClientRegistry};
use crate::store::client_cache::{read_cached_client, write_cached_client};
use tracing::debug;

/// Pick the client for this invocation: explicit name, then the cached
/// last client, then the configured default. The winner is cached.
pub fn resolve_client<'r>(
    explicit: Option<&str>,
    cfg: &Config,
    registry: &'r ClientRegistry,
) -> AppResult<&'r Client> {
    let cache = cfg.client_cache_file();

    let name = match explicit.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => n.to_string(),
        None => match read_cached_client(&cache)? {
            Some(cached) => {
                debug!(client = %cached, "using cached client name");
                cached
            }
            None => cfg
                .default_client
                .clone()
                .ok_or(AppError::NoClientSpecified)?,
        },
    };

    let client = registry.get(&name)?;
    write_cached_client(&cache, &client.name)?;
    Ok(client)
}
