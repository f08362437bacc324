use assert_cmd::Command;

fn adboard() -> Command {
    let mut cmd = Command::cargo_bin("adboard").unwrap();
    // Keep the developer's config directory and .env out of the picture.
    let empty = std::env::temp_dir().join("adboard-cli-test-config");
    cmd.current_dir(std::env::temp_dir())
        .env("ADBOARD_CONFIG_DIR", &empty)
        .env_remove("ADBOARD_ENV")
        .env_remove("PORT")
        .env_remove("CONNECTION_STRING");
    cmd
}

#[test]
fn settings_prints_defaults() {
    let output = adboard().arg("settings").output().unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 4700);
    assert_eq!(settings["store"]["backend"], "memory");
    assert_eq!(settings["environment"], "local");
}

#[test]
fn legacy_port_variable_is_honoured() {
    let output = adboard()
        .env("PORT", "5100")
        .arg("settings")
        .output()
        .unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 5100);
}

#[test]
fn unknown_backend_is_rejected() {
    adboard()
        .args(["serve", "--backend", "redis"])
        .assert()
        .failure();
}
