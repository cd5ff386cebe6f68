//! Configuration validation functionality.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;

/// Validate every configured field against its allowed range.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(url) = config.quote_url.as_deref()
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        anyhow::bail!("quote_url must be an http:// or https:// URL (got '{}')", url);
    }

    if let Some(timeout) = config.request_timeout
        && !(MINIMUM_REQUEST_TIMEOUT..=MAXIMUM_REQUEST_TIMEOUT).contains(&timeout)
    {
        anyhow::bail!(
            "request_timeout ({} s) must be between {} and {} seconds",
            timeout,
            MINIMUM_REQUEST_TIMEOUT,
            MAXIMUM_REQUEST_TIMEOUT
        );
    }

    if let Some(location) = config.location.as_deref()
        && location.trim().is_empty()
    {
        anyhow::bail!("location must not be empty (remove the key to use the default)");
    }

    if let Some(name) = config.timezone.as_deref() {
        crate::time_source::parse_timezone(name)?;
    }

    Ok(())
}
