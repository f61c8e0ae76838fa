use assert_cmd::prelude::*;
use predicates::prelude::*;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn token_for(username: &str, email: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = serde_json::json!({
        "userName": username,
        "email": email,
        "nombreCompleto": "Ana Torres",
        "exp": (chrono::Utc::now() + chrono::Duration::hours(2)).timestamp(),
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

fn write_token(dir: &Path, token: &str) {
    let contents = serde_json::json!({ "token": token }).to_string();
    fs::write(dir.join("storage.json"), contents).expect("failed to write storage");
}

fn stored_token(dir: &Path) -> Option<String> {
    let contents = fs::read_to_string(dir.join("storage.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    value["token"].as_str().map(str::to_string)
}

/// `stocknet` isolated to `dir` for config and storage
fn stocknet(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stocknet"));
    cmd.arg("--config")
        .arg(dir.join("config.yaml"))
        .arg("--storage")
        .arg(dir.join("storage.json"))
        .env_remove("STOCKNET_API_URL")
        .env_remove("STOCKNET_FORMAT")
        .env_remove("STOCKNET_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("stocknet"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn status_without_session_reports_signed_out() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    let assert = stocknet(temp.path()).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Not signed in"));
    assert!(stdout.contains("storage.json"));

    Ok(())
}

#[test]
fn status_json_reads_identity_from_stored_token() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_token(temp.path(), &token_for("ana", "ana@stocknet.io"));

    let assert = stocknet(temp.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();

    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(parsed["data"]["authenticated"], true);
    assert_eq!(parsed["data"]["user"]["username"], "ana");
    assert_eq!(parsed["data"]["user"]["full_name"], "Ana Torres");
    assert!(parsed["data"]["expires_at"].is_string());

    Ok(())
}

#[test]
fn logout_removes_token_and_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_token(temp.path(), &token_for("ana", "ana@stocknet.io"));

    let first = stocknet(temp.path()).arg("logout").assert().success();
    let stdout = String::from_utf8_lossy(&first.get_output().stdout);
    assert!(stdout.contains("Signed out"));
    assert_eq!(stored_token(temp.path()), None);

    let second = stocknet(temp.path()).arg("logout").assert().success();
    let stdout = String::from_utf8_lossy(&second.get_output().stdout);
    assert!(stdout.contains("No active session"));

    Ok(())
}

#[test]
fn open_guarded_route_without_session_redirects_to_login() -> Result<(), Box<dyn std::error::Error>>
{
    let temp = tempdir()?;

    let assert = stocknet(temp.path())
        .args(["open", "/profile", "--format", "json"])
        .assert()
        .success();

    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(parsed["data"]["entered"], false);
    assert_eq!(parsed["data"]["location"], "/login");

    Ok(())
}

#[test]
fn open_unknown_route_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    stocknet(temp.path())
        .args(["open", "/admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("/admin")));

    Ok(())
}

#[test]
fn config_set_url_persists() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    stocknet(temp.path())
        .args(["config", "set-url", "https://stocknet.example.com/api"])
        .assert()
        .success();

    let saved = fs::read_to_string(temp.path().join("config.yaml"))?;
    assert!(saved.contains("https://stocknet.example.com/api/"));

    let assert = stocknet(temp.path())
        .args(["config", "show", "--format", "json"])
        .assert()
        .success();
    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(parsed["data"]["api_url"], "https://stocknet.example.com/api/");

    Ok(())
}

#[test]
fn config_set_url_rejects_non_http() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    stocknet(temp.path())
        .args(["config", "set-url", "ftp://stocknet"])
        .assert()
        .failure();

    assert!(!temp.path().join("config.yaml").exists());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_stores_token_from_server() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let token = token_for("ana", "ana@stocknet.io");

    let _login = server
        .mock("POST", "/api/Auth/login")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "email": "ana@stocknet.io",
            "passWord": "secret"
        })))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "success": true,
                "message": "Bienvenido",
                "data": { "token": token }
            })
            .to_string(),
        )
        .create();

    let temp = tempdir()?;

    let assert = stocknet(temp.path())
        .args(["login", "--email", "ana@stocknet.io", "--password", "secret"])
        .arg("--api-url")
        .arg(format!("{}/api/", server.url()))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Signed in as"));
    assert!(stdout.contains("Ana Torres"));
    assert_eq!(stored_token(temp.path()), Some(token));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_rejection_reports_server_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _login = server
        .mock("POST", "/api/Auth/login")
        .with_status(200)
        .with_body(r#"{"success": false, "message": "Credenciales inválidas"}"#)
        .create();

    let temp = tempdir()?;

    let assert = stocknet(temp.path())
        .args(["login", "--email", "ana@stocknet.io", "--password", "wrong"])
        .arg("--api-url")
        .arg(format!("{}/api/", server.url()))
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("Credenciales inválidas"));
    assert_eq!(stored_token(temp.path()), None);

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_with_opaque_token_stores_it_and_warns() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _login = server
        .mock("POST", "/api/Auth/login")
        .with_status(200)
        .with_body(r#"{"success": true, "data": {"token": "abc.def.ghi"}}"#)
        .create();

    let temp = tempdir()?;

    let assert = stocknet(temp.path())
        .args(["login", "--email", "ana@stocknet.io", "--password", "secret"])
        .arg("--api-url")
        .arg(format!("{}/api/", server.url()))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Signed in"));
    assert!(stdout.contains("no readable identity"));
    assert_eq!(stored_token(temp.path()).as_deref(), Some("abc.def.ghi"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_unauthorized_reports_server_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _login = server
        .mock("POST", "/api/Auth/login")
        .with_status(401)
        .with_body(r#"{"success": false, "message": "Credenciales inválidas"}"#)
        .create();

    let temp = tempdir()?;

    let assert = stocknet(temp.path())
        .args(["login", "--email", "ana@stocknet.io", "--password", "wrong"])
        .arg("--api-url")
        .arg(format!("{}/api/", server.url()))
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("Credenciales inválidas"));
    assert!(!stderr.contains("Session expired"));
    assert_eq!(stored_token(temp.path()), None);

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn profile_show_requires_valid_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _validate = server
        .mock("GET", "/api/Auth/validateToken")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .create();

    let temp = tempdir()?;
    write_token(temp.path(), &token_for("ana", "ana@stocknet.io"));

    let assert = stocknet(temp.path())
        .args(["profile", "show"])
        .arg("--api-url")
        .arg(format!("{}/api/", server.url()))
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("stocknet login"));
    assert_eq!(stored_token(temp.path()), None);

    Ok(())
}
