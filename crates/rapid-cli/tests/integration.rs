#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn rapid(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rapid").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RAPID_ROOT")
        .env("RAPID_FRAMEWORK_DIR", dir.path().join("no-framework"));
    cmd
}

fn read_config(dir: &TempDir) -> serde_yaml::Value {
    let raw = std::fs::read_to_string(dir.path().join(".ai-workflow.yaml")).unwrap();
    serde_yaml::from_str(&raw).unwrap()
}

// ---------------------------------------------------------------------------
// rapid init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_config_and_directories() {
    let dir = TempDir::new().unwrap();
    rapid(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("project type: generic"))
        .stdout(predicate::str::contains("ai tool:      copilot"));

    assert!(dir.path().join("docs/discovery").is_dir());
    assert!(dir.path().join("docs/plans").is_dir());

    let cfg = read_config(&dir);
    assert_eq!(cfg["project"]["type"], "generic");
    assert_eq!(
        cfg["project"]["name"],
        dir.path().file_name().unwrap().to_str().unwrap()
    );
    assert_eq!(cfg["project"]["architecture"], serde_yaml::Value::Sequence(vec![]));
    assert_eq!(cfg["ai_tools"][0], "copilot");
    let story = &cfg["workflows"]["story_analysis"];
    assert_eq!(story["timeout_seconds"], 120);
    assert_eq!(
        story["output_path_templates"][1],
        "docs/plans/{epic}-{story}-plan.md"
    );
    assert!(story.get("timeout").is_none());
}

#[test]
fn init_detects_flutter() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pubspec.yaml"), "name: app\n").unwrap();
    std::fs::write(dir.path().join("go.mod"), "module x\n").unwrap();

    rapid(&dir).args(["init", "--ai", "claude"]).assert().success();

    let cfg = read_config(&dir);
    assert_eq!(cfg["project"]["type"], "flutter");
    assert_eq!(cfg["project"]["architecture"][0], "bloc");
    assert_eq!(cfg["project"]["architecture"][1], "drift");
    assert_eq!(cfg["ai_tools"][0], "claude");
}

#[test]
fn init_detects_react_from_dev_dependencies() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"devDependencies": {"react": "^18.0.0"}}"#,
    )
    .unwrap();

    rapid(&dir).arg("init").assert().success();
    assert_eq!(read_config(&dir)["project"]["type"], "react");
}

#[test]
fn init_explicit_type_skips_detection() {
    let dir = TempDir::new().unwrap();
    // Would be fatal under auto-detection.
    std::fs::write(dir.path().join("package.json"), "not json").unwrap();

    rapid(&dir)
        .args(["init", "--type", "python"])
        .assert()
        .success();
    assert_eq!(read_config(&dir)["project"]["type"], "python");
}

#[test]
fn init_fails_on_malformed_package_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("package.json"), "{ broken").unwrap();

    rapid(&dir)
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to parse"));
    assert!(!dir.path().join(".ai-workflow.yaml").exists());
}

#[test]
fn init_rejects_unknown_type() {
    let dir = TempDir::new().unwrap();
    rapid(&dir)
        .args(["init", "--type", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid project type"));
}

#[test]
fn init_overwrites_existing_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".ai-workflow.yaml"),
        "hand_edited: true\nai_tools: [gpt4]\n",
    )
    .unwrap();

    rapid(&dir).args(["init", "-a", "claude"]).assert().success();
    rapid(&dir).args(["init", "-a", "copilot"]).assert().success();

    let cfg = read_config(&dir);
    assert!(cfg.get("hand_edited").is_none());
    assert_eq!(cfg["ai_tools"].as_sequence().unwrap().len(), 1);
    assert_eq!(cfg["ai_tools"][0], "copilot");
}

#[test]
fn init_json_reports_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("go.mod"), "module x\n").unwrap();

    let out = rapid(&dir)
        .args(["init", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["config"]["project"]["type"], "go");
    assert_eq!(report["dirs"][0]["path"], "docs/discovery");
    assert_eq!(report["dirs"][0]["created"], true);
}

#[test]
fn root_flag_targets_other_directory() {
    let cwd = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    rapid(&cwd)
        .arg("init")
        .arg("--root")
        .arg(target.path())
        .assert()
        .success();

    assert!(target.path().join(".ai-workflow.yaml").exists());
    assert!(!cwd.path().join(".ai-workflow.yaml").exists());
}

#[test]
fn dot_root_uses_directory_basename() {
    let dir = TempDir::new().unwrap();
    rapid(&dir).args(["--root", ".", "init"]).assert().success();

    assert_eq!(
        read_config(&dir)["project"]["name"],
        dir.path().file_name().unwrap().to_str().unwrap()
    );
}

#[test]
fn relative_root_env_uses_directory_basename() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("mobile-app")).unwrap();

    rapid(&dir)
        .env("RAPID_ROOT", "mobile-app/..")
        .arg("init")
        .assert()
        .success();

    assert_eq!(
        read_config(&dir)["project"]["name"],
        dir.path().file_name().unwrap().to_str().unwrap()
    );
}

#[test]
fn rust_log_enables_debug_output() {
    let dir = TempDir::new().unwrap();
    rapid(&dir)
        .env("RUST_LOG", "debug")
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("detected project type"));
}

#[test]
fn default_log_level_is_quiet() {
    let dir = TempDir::new().unwrap();
    rapid(&dir)
        .env_remove("RUST_LOG")
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// rapid analyze / plan / setup
// ---------------------------------------------------------------------------

#[cfg(unix)]
mod scripts {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const LOCAL_SCRIPTS: &str = "ai-dev-workflow/core/scripts";

    /// Script that appends its name and each argument (one per line) to
    /// `calls.log` in the working directory, then exits with `code`.
    fn install_script(dir: &Path, name: &str, code: i32) {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        let body = format!(
            "#!/bin/sh\necho \"== {name}\" >> calls.log\nfor a in \"$@\"; do printf '%s\\n' \"$a\" >> calls.log; done\nexit {code}\n"
        );
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn install_local(dir: &TempDir, discovery_code: i32, planning_code: i32) {
        let scripts = dir.path().join(LOCAL_SCRIPTS);
        install_script(&scripts, "ai-discovery.sh", discovery_code);
        install_script(&scripts, "ai-implementation-plan.sh", planning_code);
    }

    fn calls(dir: &TempDir) -> Vec<String> {
        std::fs::read_to_string(dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn analyze_passes_default_output() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 0, 0);

        rapid(&dir)
            .args(["analyze", "1", "2", "User can log in"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Analyzing Story 1.2: User can log in"));

        assert_eq!(
            calls(&dir),
            vec![
                "== ai-discovery.sh",
                "1",
                "2",
                "User can log in",
                "docs/discovery/story-1-2-discovery.md",
            ]
        );
    }

    #[test]
    fn analyze_keeps_title_quoting_intact() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 0, 0);

        let title = r#"Fix "quoted" $HOME; rm -rf /"#;
        rapid(&dir)
            .args(["analyze", "1", "2", title, "--output", "out.md"])
            .assert()
            .success();

        let log = calls(&dir);
        assert_eq!(log[3], title);
        assert_eq!(log[4], "out.md");
    }

    #[test]
    fn analyze_failure_exits_one() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 4, 0);

        rapid(&dir)
            .args(["analyze", "1", "2", "T"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("discovery failed"))
            .stderr(predicate::str::contains("exit code 4"));
    }

    #[test]
    fn analyze_without_scripts_reports_not_found() {
        let dir = TempDir::new().unwrap();
        rapid(&dir)
            .args(["analyze", "1", "2", "T"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("script not found: ai-discovery.sh"));
    }

    #[test]
    fn relative_root_resolves_scripts() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        let scripts = sub.join(LOCAL_SCRIPTS);
        install_script(&scripts, "ai-discovery.sh", 0);

        rapid(&dir)
            .args(["--root", "sub", "analyze", "1", "2", "T"])
            .assert()
            .success();

        // The script runs inside the root, so its log lands there.
        let log = std::fs::read_to_string(sub.join("calls.log")).unwrap();
        assert!(log.starts_with("== ai-discovery.sh\n1\n2\nT\n"));
        assert!(!dir.path().join("calls.log").exists());
    }

    #[test]
    fn framework_scripts_take_precedence() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 9, 9);
        let framework = TempDir::new().unwrap();
        install_script(
            &framework.path().join("core/scripts"),
            "ai-discovery.sh",
            0,
        );

        rapid(&dir)
            .env("RAPID_FRAMEWORK_DIR", framework.path())
            .args(["analyze", "5", "6", "T"])
            .assert()
            .success();
    }

    #[test]
    fn plan_defaults_and_overrides() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 0, 0);

        rapid(&dir)
            .args(["plan", "2", "3", "Sync"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Creating implementation plan for Story 2.3"));
        rapid(&dir)
            .args(["plan", "2", "3", "Sync", "-d", "d.md", "-o", "p.md"])
            .assert()
            .success();

        assert_eq!(
            calls(&dir),
            vec![
                "== ai-implementation-plan.sh",
                "2",
                "3",
                "Sync",
                "docs/discovery/story-2-3-discovery.md",
                "docs/plans/story-2-3-plan.md",
                "== ai-implementation-plan.sh",
                "2",
                "3",
                "Sync",
                "d.md",
                "p.md",
            ]
        );
    }

    #[test]
    fn setup_runs_discovery_then_planning() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 0, 0);

        rapid(&dir)
            .args(["setup", "1", "2", "Title"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Step 1: Running discovery analysis..."))
            .stdout(predicate::str::contains("Step 2: Generating implementation plan..."))
            .stdout(predicate::str::contains("Complete setup finished."));

        let log = calls(&dir);
        assert_eq!(log[0], "== ai-discovery.sh");
        assert_eq!(log[5], "== ai-implementation-plan.sh");
        assert_eq!(log[9], "docs/discovery/story-1-2-discovery.md");
        assert_eq!(log[10], "docs/plans/story-1-2-plan.md");
    }

    #[test]
    fn setup_stops_when_discovery_fails() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 1, 0);

        rapid(&dir)
            .args(["setup", "1", "2", "Title"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("Step 2").not())
            .stderr(predicate::str::contains("discovery failed"));

        let log = calls(&dir);
        assert!(log.iter().all(|l| l != "== ai-implementation-plan.sh"));
    }

    #[test]
    fn setup_reports_planning_failure() {
        let dir = TempDir::new().unwrap();
        install_local(&dir, 0, 2);

        rapid(&dir)
            .args(["setup", "1", "2", "Title"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("Complete setup finished.").not())
            .stderr(predicate::str::contains("planning failed"));
    }
}
