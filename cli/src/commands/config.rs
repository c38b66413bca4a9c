use crate::utils::settings::{Settings, SettingsView};
use anyhow::Result;
use colored::*;

/// Print the effective configuration with the signing secret withheld.
pub fn show(settings: &Settings, format: String) -> Result<()> {
    let view = settings.view();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        "yaml" => {
            print!("{}", serde_yaml::to_string(&view)?);
        }
        _ => {
            print_settings_text(&view);
        }
    }

    Ok(())
}

fn print_settings_text(view: &SettingsView) {
    println!("{}", "=== Job Board Configuration ===".bold());
    println!();

    let rows = [
        ("DATA_PATH", view.data_path.clone()),
        ("DATABASE_PATH", view.database_path.clone()),
        (
            "DATABASE_MAX_CONNECTIONS",
            view.database_max_connections.to_string(),
        ),
        ("API_PORT", view.api_port.to_string()),
        ("JWT_SECRET", view.jwt_secret.clone()),
        ("JWT_TTL_SECONDS", view.jwt_ttl_seconds.to_string()),
        ("SEED_DEMO_DATA", view.seed_demo_data.to_string()),
    ];

    for (name, value) in rows {
        println!("  {:<26} {}", name.cyan(), value);
    }
}
