use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run sealpost isolated from any user config, with a cheap scrypt cost.
fn sealpost(dir: &assert_fs::TempDir) -> Command {
    let config = dir.child("sealpost.toml");
    if !config.exists() {
        config.write_str("[scrypt]\nwork_factor = 10\n").unwrap();
    }
    let mut cmd = cargo_bin_cmd!("sealpost");
    cmd.current_dir(dir.path())
        .env_remove("SEALPOST_PASSPHRASE")
        .env("XDG_CONFIG_HOME", dir.path())
        .env("SEALPOST_CONFIG", config.path());
    cmd
}

fn handle_ok(dir: &assert_fs::TempDir, path: &str, body: &str) -> serde_json::Value {
    let output = sealpost(dir)
        .args(["handle", path, "-"])
        .write_stdin(body.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("status: 200"))
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn unknown_path_is_404_with_empty_body() {
    let dir = assert_fs::TempDir::new().unwrap();

    sealpost(&dir)
        .args(["handle", "/health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("status: 404"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn keygen_without_body() {
    let dir = assert_fs::TempDir::new().unwrap();

    let output = sealpost(&dir)
        .args(["handle", "/keygen"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let pair: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(pair["PublicKey"].as_str().unwrap().starts_with("age1"));
}

#[test]
fn encrypt_and_decrypt_requests() {
    let dir = assert_fs::TempDir::new().unwrap();

    let pair = handle_ok(&dir, "/keygen", "");
    let encrypted = handle_ok(
        &dir,
        "/encrypt",
        &serde_json::json!({
            "Recipients": [pair["PublicKey"]],
            "Binary": false,
            "Content": "hello",
            "Passphrase": ""
        })
        .to_string(),
    );
    assert_eq!(encrypted["Recipients"][0], pair["PublicKey"]);

    let decrypted = handle_ok(
        &dir,
        "/decrypt",
        &serde_json::json!({
            "Identities": [pair["PrivateKey"]],
            "Binary": false,
            "Content": encrypted["Content"],
            "Passphrase": ""
        })
        .to_string(),
    );
    assert_eq!(decrypted["Content"], "hello");
    assert_eq!(decrypted["Identities"][0], pair["PublicKey"]);
}

#[test]
fn passphrase_request_from_body_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("encrypt.json")
        .write_str(r#"{"Recipients":[],"Content":"pw","Passphrase":"open sesame"}"#)
        .unwrap();

    let output = sealpost(&dir)
        .args(["handle", "/encrypt", "encrypt.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let encrypted: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(encrypted["Recipients"][0], "scrypt");
    assert!(encrypted.get("Passphrase").is_none());

    let decrypted = handle_ok(
        &dir,
        "/decrypt",
        &serde_json::json!({
            "Identities": [],
            "Content": encrypted["Content"],
            "Passphrase": "open sesame"
        })
        .to_string(),
    );
    assert_eq!(decrypted["Content"], "pw");
}

#[test]
fn malformed_json_is_500_with_raw_text() {
    let dir = assert_fs::TempDir::new().unwrap();

    sealpost(&dir)
        .args(["handle", "/decrypt", "-"])
        .write_stdin("{oops")
        .assert()
        .failure()
        .stderr(predicate::str::contains("status: 500"))
        .stdout(predicate::str::starts_with("Serialization error"));
}

#[test]
fn tampered_ciphertext_is_500() {
    let dir = assert_fs::TempDir::new().unwrap();

    let pair = handle_ok(&dir, "/keygen", "");
    let encrypted = handle_ok(
        &dir,
        "/encrypt",
        &serde_json::json!({ "Recipients": [pair["PublicKey"]], "Content": "x" }).to_string(),
    );
    let content = encrypted["Content"].as_str().unwrap();
    let tampered = content.replacen("-----BEGIN AGE ENCRYPTED FILE-----", "", 1);

    sealpost(&dir)
        .args(["handle", "/decrypt", "-"])
        .write_stdin(
            serde_json::json!({ "Identities": [pair["PrivateKey"]], "Content": tampered })
                .to_string(),
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("status: 500"))
        .stdout(predicate::str::contains("Malformed envelope"));
}
