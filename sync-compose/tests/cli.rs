//! CLI integration tests for sync-compose

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a config with two accounts
fn setup_test_env() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config_content = r#"
[compose]
allow_empty = false

[search]
base_url = "http://127.0.0.1:9"

[[accounts]]
id = "ig-1"
platform = "instagram"
display_name = "Musharof"
avatar_url = "/images/user/owner.jpg"

[[accounts]]
id = "fb-1"
platform = "facebook"
display_name = "Brand Page"
avatar_url = "/images/user/user-01.jpg"
"#;

    fs::write(&config_path, config_content).unwrap();

    (temp_dir, config_path.to_string_lossy().to_string())
}

fn compose_cmd(config_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("sync-compose").unwrap();
    cmd.env("SOCIALSYNC_CONFIG", config_path)
        .env_remove("SOCIALSYNC_UNSPLASH_KEY")
        .env_remove("SOCIALSYNC_LOG_FORMAT")
        .env_remove("SOCIALSYNC_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag_output() {
    let mut cmd = Command::cargo_bin("sync-compose").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compose a social media post"))
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("--account"))
        .stdout(predicate::str::contains("--panel"))
        .stdout(predicate::str::contains("EXIT CODES"));
}

#[test]
fn test_list_accounts_text() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .arg("--list-accounts")
        .assert()
        .success()
        .stdout(predicate::str::contains("ig-1 | instagram | Musharof"))
        .stdout(predicate::str::contains("fb-1 | facebook | Brand Page"));
}

#[test]
fn test_list_accounts_json() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = compose_cmd(&config_path)
        .args(["--list-accounts", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["platform"], "facebook");
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    compose_cmd(&missing.to_string_lossy())
        .arg("--list-accounts")
        .assert()
        .success()
        .stdout(predicate::str::contains("tw-1 | twitter | Brand Account"))
        .stdout(predicate::str::contains("li-1 | linkedin | Company Page"));
}

#[test]
fn test_invalid_config_exits_with_config_code() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[search\nbroken").unwrap();

    compose_cmd(&config_path.to_string_lossy())
        .arg("--list-accounts")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error: Configuration error"));
}

#[test]
fn test_submit_without_accounts_fails() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .arg("Hello world")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("no post accounts selected"));
}

#[test]
fn test_submit_now_json() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = compose_cmd(&config_path)
        .args(["Hello world", "-a", "ig-1", "-a", "fb-1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["text"], "Hello world");
    assert_eq!(json["mode"], "now");
    assert_eq!(json["content_type"], "post");
    assert!(json["schedule"].is_null());
    assert_eq!(json["account_ids"], serde_json::json!(["ig-1", "fb-1"]));
    assert!(!json["id"].as_str().unwrap().is_empty());
}

#[test]
fn test_repeated_account_toggles_off() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Hello", "-a", "ig-1", "-a", "ig-1"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_reel_uses_reel_audience() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Behind the scenes", "--reel", "-a", "ig-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type: reel"))
        .stdout(predicate::str::contains("accounts: ig-1"));
}

#[test]
fn test_text_from_stdin() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["-a", "fb-1"])
        .write_stdin("Piped text\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("text: Piped text"));
}

#[test]
fn test_empty_draft_rejected_by_policy() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["-a", "fb-1"])
        .write_stdin("")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("draft has no text and no images"));
}

#[test]
fn test_scheduled_submit_text() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Launch", "--date", "2099-03-15", "--time", "14:05", "-a", "ig-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: scheduled (Sun, Mar 15, 2099 at 2:05 PM)"));
}

#[test]
fn test_past_schedule_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Launch", "--date", "2020-01-01", "--time", "10:00", "-a", "ig-1"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Please select a future date and time"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_date_without_time_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Launch", "--date", "2099-01-01", "-a", "ig-1"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Please select a time"));
}

#[test]
fn test_image_search_without_key_posts_without_image() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Golden hour", "--image", "sunset", "-a", "ig-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text: Golden hour"))
        .stdout(predicate::str::contains("accounts: ig-1"))
        .stdout(predicate::str::contains("images:").not())
        .stderr(predicate::str::contains("image search unavailable"));
}

#[test]
fn test_unreachable_search_provider_posts_without_image() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = compose_cmd(&config_path)
        .env("SOCIALSYNC_UNSPLASH_KEY", "test-key")
        .args(["Golden hour", "--image", "sunset", "-a", "ig-1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["text"], "Golden hour");
    assert_eq!(json["images"], serde_json::json!([]));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("image search failed, showing no results"));
    assert!(stderr.contains("no images found, posting without an image"));
}

#[test]
fn test_pick_zero_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Golden hour", "--image", "sunset", "--pick", "0", "-a", "ig-1"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("--pick is 1-based"));
}

#[test]
fn test_panel_tools_text() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Hello", "--panel", "tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== Tools =="))
        .stdout(predicate::str::contains("- Hashtag Generator"))
        .stdout(predicate::str::contains("Characters: 5"));
}

#[test]
fn test_panel_preview_json() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = compose_cmd(&config_path)
        .args(["Hello", "--panel", "preview", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tab"], "preview");
    assert_eq!(json["text"], "Hello");
}

#[test]
fn test_invalid_panel_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Hello", "--panel", "analytics"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid panel"));
}

#[test]
fn test_invalid_format_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    compose_cmd(&config_path)
        .args(["Hello", "-a", "ig-1", "--format", "xml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid format 'xml'"));
}
