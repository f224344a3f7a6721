// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    match config.validate() {
        Ok(()) => {
            log::info!("Config OK");
            log::info!("    User agent: {}", config.crawler.user_agent);
            log::info!("    Timeout: {}s", config.crawler.timeout_secs);
            log::info!("    Request delay: {}ms", config.crawler.request_delay_ms);
            log::info!("    Listing URL: {}", config.site.listing_url);
            log::info!("    Detail base URL: {}", config.site.base_url);
            Ok(())
        }
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            Err(e)
        }
    }
}
