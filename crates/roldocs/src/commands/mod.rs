pub mod build;
pub mod check;
pub mod init;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use roldocs_config::SiteConfig;

/// Load and validate the site config, shared by `build` and `check`.
pub fn load_site(path: &Path) -> Result<Arc<SiteConfig>> {
    let site = SiteConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(Arc::new(site))
}
