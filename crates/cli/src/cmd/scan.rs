//! One-shot listing of what the watcher sees

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use cli_lib::config::WatchConfig;
use watcher::IgnoreRules;

pub fn run(config: &WatchConfig) -> Result<()> {
    let ignore = IgnoreRules::from_patterns(&config.watch_directory, &config.ignore)?;
    let snapshot = watcher::capture(&config.watch_directory, &ignore)
        .context("Cannot scan directory")?;

    for name in snapshot.sorted_names() {
        if let Some(mtime) = snapshot.get(name) {
            let modified: DateTime<Local> = mtime.into();
            println!("{}  {}", modified.format("%Y-%m-%d %H:%M:%S"), name);
        }
    }

    println!("{} files", snapshot.len());
    Ok(())
}
