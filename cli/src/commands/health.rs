use crate::utils::settings::Settings;
use anyhow::Result;
use colored::*;
use jobs::JobStore;
use serde_json::{json, Value};
use user::store::UserStore;

/// Execute the health check command
pub async fn execute(settings: &Settings, format: String) -> Result<()> {
    let health_status = check_system_health(settings).await;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&health_status)?);
        }
        _ => {
            print_health_status_text(&health_status);
        }
    }

    Ok(())
}

async fn check_system_health(settings: &Settings) -> Value {
    let database = check_database_health(settings).await;
    let overall = if database["status"] == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    json!({
        "status": overall,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": {
            "database": database,
        }
    })
}

/// Connect to an existing database file, ping it and count its rows. A
/// missing file is reported, not created.
async fn check_database_health(settings: &Settings) -> Value {
    let db_path = &settings.database_path;

    if !db_path.exists() {
        return json!({
            "status": "not_initialized",
            "message": "Database file does not exist yet",
            "path": db_path.display().to_string()
        });
    }

    let config = settings.database_config().with_create_tables(false);
    let db = match database::initialize_database(config).await {
        Ok(db) => db,
        Err(e) => {
            return json!({
                "status": "unhealthy",
                "message": format!("Database exists but cannot be opened: {}", e),
                "path": db_path.display().to_string()
            });
        }
    };

    if let Err(e) = db.ping().await {
        return json!({
            "status": "unhealthy",
            "message": format!("Database does not answer queries: {}", e),
            "path": db_path.display().to_string()
        });
    }

    let users = UserStore::new(db.get_pool()).count().await;
    let jobs = JobStore::new(db.get_pool()).count().await;

    match (users, jobs) {
        (Ok(users), Ok(jobs)) => json!({
            "status": "healthy",
            "message": "Database is reachable",
            "path": db_path.display().to_string(),
            "users": users,
            "jobs": jobs
        }),
        (Err(e), _) => json!({
            "status": "unhealthy",
            "message": format!("Failed to count users: {}", e),
            "path": db_path.display().to_string()
        }),
        (_, Err(e)) => json!({
            "status": "unhealthy",
            "message": format!("Failed to count jobs: {}", e),
            "path": db_path.display().to_string()
        }),
    }
}

fn colored_status(status: &str) -> ColoredString {
    match status {
        "healthy" => status.green().bold(),
        "degraded" | "not_initialized" => status.yellow().bold(),
        _ => status.red().bold(),
    }
}

fn print_health_status_text(status: &Value) {
    println!("{}", "=== Job Board Health Check ===".bold());
    println!();
    println!(
        "Overall Status: {}",
        colored_status(status["status"].as_str().unwrap_or("unknown"))
    );
    println!("Version: {}", status["version"].as_str().unwrap_or(""));
    println!("Timestamp: {}", status["timestamp"].as_str().unwrap_or(""));
    println!();

    println!("{}", "Components:".bold());
    println!("{}", "─".repeat(50));

    if let Some(components) = status["components"].as_object() {
        for (name, component) in components {
            println!(
                "{}: {}",
                name.bold(),
                colored_status(component["status"].as_str().unwrap_or("unknown"))
            );
            if let Some(message) = component["message"].as_str() {
                println!("  {}", message);
            }
            if let Some(path) = component["path"].as_str() {
                println!("  Path: {}", path);
            }
            if let (Some(users), Some(jobs)) =
                (component["users"].as_i64(), component["jobs"].as_i64())
            {
                println!("  Users: {}  Jobs: {}", users, jobs);
            }
            println!();
        }
    }
}
