//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use roldocs_static::{BuildConfig, StaticBuilder};

use super::load_site;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let site = load_site(config_path)?;

    let deploy = site.deploy();
    if let (Some(organization), Some(project)) = (&deploy.organization, &deploy.project) {
        tracing::debug!("Deploy target: {}/{} ({})", organization, project, deploy.branch);
    }

    let mut config = BuildConfig::from_site(&site);
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }

    let result = StaticBuilder::new(site, config).build().await?;

    tracing::info!(
        "Built {} pages ({} docs, {} locales, {} static files) in {}ms",
        result.pages,
        result.docs,
        result.locales,
        result.static_files,
        result.duration_ms
    );
    if !result.broken_links.is_empty() {
        tracing::info!("{} broken link(s) reported", result.broken_links.len());
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
