//! `archscan config` handler

use crate::config::Settings;
use anyhow::Result;

pub fn run(audit: Option<&str>, git: Option<&str>) -> Result<()> {
    let mut settings = Settings::load()?;
    let mut changed = false;

    if let Some(value) = audit {
        settings.audit = value == "on";
        changed = true;
    }
    if let Some(value) = git {
        settings.git = value == "on";
        changed = true;
    }

    if changed {
        settings.save()?;
    }

    println!("audit = {}", if settings.audit { "on" } else { "off" });
    println!("git = {}", if settings.git { "on" } else { "off" });
    if let Some(path) = Settings::path() {
        println!("config file: {}", path.display());
    }
    Ok(())
}
