use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const SETTINGS_VARS: [&str; 7] = [
    "DATA_PATH",
    "DATABASE_PATH",
    "DATABASE_MAX_CONNECTIONS",
    "API_PORT",
    "JWT_SECRET",
    "JWT_TTL_SECONDS",
    "SEED_DEMO_DATA",
];

/// A `jobboard` command running in `dir` with no inherited settings.
fn jobboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jobboard").unwrap();
    cmd.current_dir(dir.path());
    for var in SETTINGS_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();

    jobboard(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();

    jobboard(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_show_json_redacts_secret() {
    let dir = TempDir::new().unwrap();

    let output = jobboard(&dir)
        .args(["config", "show", "--format", "json"])
        .env("JWT_SECRET", "super-secret-value")
        .env("API_PORT", "9100")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("super-secret-value"));

    let config = stdout_json(&output);
    assert_eq!(config["api_port"], 9100);
    assert_eq!(config["jwt_secret"], "<redacted>");
    assert_eq!(config["database_max_connections"], 5);
    assert!(config["database_path"]
        .as_str()
        .unwrap()
        .ends_with("jobboard.db"));
}

#[test]
fn test_config_show_yaml_and_text() {
    let dir = TempDir::new().unwrap();

    jobboard(&dir)
        .args(["config", "show", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_port: 8080"))
        .stdout(predicate::str::contains("jwt_ttl_seconds: 86400"));

    jobboard(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DATABASE_PATH"))
        .stdout(predicate::str::contains("<development default>"));
}

#[test]
fn test_env_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "API_PORT=9200\n").unwrap();

    let output = jobboard(&dir)
        .args(["config", "show", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["api_port"], 9200);
}

#[test]
fn test_invalid_setting_fails() {
    let dir = TempDir::new().unwrap();

    jobboard(&dir)
        .args(["config", "show"])
        .env("API_PORT", "not-a-port")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API_PORT"));
}

#[test]
fn test_health_without_database() {
    let dir = TempDir::new().unwrap();

    let output = jobboard(&dir)
        .args(["health", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let health = stdout_json(&output);
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["components"]["database"]["status"], "not_initialized");
    assert!(!dir.path().join("data").join("jobboard.db").exists());
}

#[tokio::test]
async fn test_health_with_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data").join("jobboard.db");
    let db = database::initialize_database(database::DatabaseConfig::new_with_path(
        db_path.clone(),
    ))
    .await
    .unwrap();
    db.get_pool().close().await;

    let output = jobboard(&dir)
        .args(["health", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let health = stdout_json(&output);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["components"]["database"]["users"], 0);
    assert_eq!(health["components"]["database"]["jobs"], 0);
}

#[test]
fn test_health_reports_unreadable_database() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("jobboard.db"), "not a sqlite file\n".repeat(128)).unwrap();

    let output = jobboard(&dir)
        .args(["health", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let health = stdout_json(&output);
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["components"]["database"]["status"], "unhealthy");
    assert!(health["components"]["database"]["users"].is_null());
}

#[test]
fn test_health_text_output() {
    let dir = TempDir::new().unwrap();

    jobboard(&dir)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("Job Board Health Check"))
        .stdout(predicate::str::contains("database"));
}

#[test]
fn test_logs_are_written_under_data_dir() {
    let dir = TempDir::new().unwrap();

    jobboard(&dir).args(["config", "show"]).assert().success();

    assert!(dir.path().join("data").join("logs").is_dir());
}
