//! Link check command.

use std::path::Path;

use anyhow::{bail, Result};
use roldocs_static::{BuildConfig, StaticBuilder};

use super::load_site;

/// Run the check command. Fails when a build would fail.
pub async fn run(config_path: &Path) -> Result<()> {
    let site = load_site(config_path)?;
    let config = BuildConfig::from_site(&site);

    let report = StaticBuilder::new(site, config).check()?;

    if report.fatal > 0 {
        bail!(
            "{} of {} broken link(s) would fail the build",
            report.fatal,
            report.broken_links.len()
        );
    }

    tracing::info!(
        "Checked {} pages: {} broken link(s)",
        report.pages,
        report.broken_links.len()
    );

    Ok(())
}
