use loveos_core::content::make_boot_lines;
use loveos_core::dates::days_online;
use loveos_core::progress::passcode_hash;
use loveos_core::Config;
use serde_json::json;

use super::{open_desktop, print_json, CliResult};

pub fn status() -> CliResult {
    let desktop = open_desktop()?;
    print_json(&desktop.snapshot())
}

pub fn key() -> CliResult {
    let config = Config::load()?;
    print_json(&json!({
        "key": loveos_core::progress_key(&config.passcode),
        "hash": passcode_hash(&config.passcode),
        "persist_progress": config.persist_progress,
    }))
}

pub fn boot() -> CliResult {
    let config = Config::load()?;
    let lines = make_boot_lines(days_online(config.start_date), &config.her_name);
    print_json(&lines)
}

pub fn reset() -> CliResult {
    let desktop = open_desktop()?;
    let key = desktop.key().to_string();
    desktop.forget()?;
    print_json(&json!({ "type": "ProgressReset", "key": key }))
}
