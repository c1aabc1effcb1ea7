use assert_cmd::Command;
use mouseclick::config::Config;
use predicates::prelude::*;

fn mouseclick() -> Command {
    let mut cmd = Command::cargo_bin("mouseclick").expect("binary should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn x_without_y_is_an_argument_error() {
    mouseclick()
        .args(["--x", "100"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Error: Both --x and --y must be provided together, or neither.",
        ));
}

#[test]
fn y_without_x_is_an_argument_error() {
    for value in ["0", "250", "-3"] {
        mouseclick()
            .args(["--y", value])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Both --x and --y"));
    }
}

#[test]
fn unknown_button_is_a_usage_error() {
    mouseclick()
        .args(["--button", "side"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("side"));
}

#[test]
fn non_numeric_clicks_is_a_usage_error() {
    mouseclick().args(["--clicks", "many"]).assert().code(2);
}

#[test]
fn help_lists_click_flags() {
    mouseclick()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--show-position")
                .and(predicate::str::contains("--interval"))
                .and(predicate::str::contains("--delay"))
                .and(predicate::str::contains("serve")),
        );
}

#[test]
fn template_writes_default_config() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = temp.path().join("mouseclick.yaml");

    mouseclick()
        .args(["template", "--output"])
        .arg(&path)
        .assert()
        .success();

    let config = Config::load(&path).expect("template should parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.server.port, 8765);
}

#[test]
fn unreadable_config_fails_before_clicking() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mouseclick()
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .args(["--x", "1", "--y", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("io error"));
}

#[test]
fn global_options_can_precede_a_subcommand() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let config_path = temp.path().join("in.yaml");
    let output_path = temp.path().join("out.yaml");
    Config::create_template(&config_path).expect("config should be written");

    mouseclick()
        .arg("--config")
        .arg(&config_path)
        .args(["--log-level", "warn", "template", "--output"])
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.exists(), "template should be written");
}

#[test]
fn click_options_conflict_with_a_subcommand() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mouseclick()
        .args(["--x", "1", "--y", "1", "template", "--output"])
        .arg(temp.path().join("out.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined with a subcommand"));

    assert!(!temp.path().join("out.yaml").exists());
}
