use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a `docket` command against the given database,
/// isolated from configuration in the caller's environment
fn docket_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docket").expect("Failed to find docket binary");
    for var in [
        "DOCKET_DATABASE_FILE",
        "MAX_NUMBER_OF_PROJECTS",
        "MAX_NUMBER_OF_TASKS",
        "ALLOWED_STATUSES",
        "PROJECT_NAME_COLLATION",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn create_project(db_path: &Path, name: &str) {
    docket_cmd(db_path)
        .args(["project", "create", name])
        .assert()
        .success();
}

#[test]
fn test_cli_create_project_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["project", "create", "  Work  ", "--description", "Day job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project with ID: 1"))
        .stdout(predicate::str::contains("# 1. Work"))
        .stdout(predicate::str::contains("Day job"));
}

#[test]
fn test_cli_no_command_lists_projects() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));

    create_project(&db_path, "Work");

    docket_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Work"));
}

#[test]
fn test_cli_duplicate_name_exit_code() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");

    docket_cmd(&db_path)
        .args(["project", "create", "WORK"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_project_ceiling_from_flag() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["--max-projects", "1", "project", "create", "Work"])
        .assert()
        .success();

    docket_cmd(&db_path)
        .args(["--max-projects", "1", "project", "create", "Home"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Maximum number of projects reached (1)"));
}

#[test]
fn test_cli_project_ceiling_from_environment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");

    docket_cmd(&db_path)
        .env("MAX_NUMBER_OF_PROJECTS", "1")
        .args(["project", "create", "Home"])
        .assert()
        .code(4);
}

#[test]
fn test_cli_show_missing_project_exit_code() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["project", "show", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Project with ID 42 not found"));
}

#[test]
fn test_cli_empty_name_is_validation_error() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["project", "create", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_cli_edit_and_delete_project() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");
    docket_cmd(&db_path)
        .args(["task", "add", "1", "Write report"])
        .assert()
        .success();

    docket_cmd(&db_path)
        .args(["project", "edit", "1", "--name", "Office"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated project with ID: 1"))
        .stdout(predicate::str::contains("- name"))
        .stdout(predicate::str::contains("# 1. Office"));

    docket_cmd(&db_path)
        .args(["project", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted project 'Office' (ID: 1) and 1 task(s)",
        ));

    docket_cmd(&db_path)
        .args(["task", "list", "1"])
        .assert()
        .code(3);
}

#[test]
fn test_cli_task_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");

    docket_cmd(&db_path)
        .args([
            "task",
            "add",
            "1",
            "Write spec",
            "--deadline",
            "2030-01-01",
            "--description",
            "First draft",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1"))
        .stdout(predicate::str::contains("### 1. Write spec"))
        .stdout(predicate::str::contains("- Deadline:"));

    docket_cmd(&db_path)
        .args(["task", "status", "1", "DONE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done"))
        .stdout(predicate::str::contains("- Closed:"));

    docket_cmd(&db_path)
        .args(["task", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Write spec"));

    docket_cmd(&db_path)
        .args(["task", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted task 'Write spec' (ID: 1) from project 1",
        ));

    docket_cmd(&db_path)
        .args(["task", "delete", "1"])
        .assert()
        .code(3);
}

#[test]
fn test_cli_invalid_status_and_deadline() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");

    docket_cmd(&db_path)
        .args(["task", "add", "1", "Write spec", "--status", "blocked"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid status 'blocked'"));

    docket_cmd(&db_path)
        .args(["task", "add", "1", "Write spec", "--deadline", "next week"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid deadline"));
}

#[test]
fn test_cli_custom_statuses() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");

    docket_cmd(&db_path)
        .args([
            "--allowed-statuses",
            "todo,doing,done,blocked",
            "task",
            "add",
            "1",
            "Write spec",
            "--status",
            "Blocked",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("blocked"));
}

#[test]
fn test_cli_invalid_configuration_exit_code() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["--name-collation", "fuzzy", "project", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("PROJECT_NAME_COLLATION"));
}

#[test]
fn test_cli_autoclose_dry_run_then_close() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");
    docket_cmd(&db_path)
        .args(["task", "add", "1", "Late", "--deadline", "2020-01-01"])
        .assert()
        .success();

    docket_cmd(&db_path)
        .args(["task", "overdue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Late"));

    docket_cmd(&db_path)
        .args(["maintenance", "autoclose", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would close 1 overdue task(s):"));

    docket_cmd(&db_path)
        .args(["maintenance", "autoclose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed 1 overdue task(s):"))
        .stdout(predicate::str::contains("- 1. Late (project 1)"));

    docket_cmd(&db_path)
        .args(["maintenance", "autoclose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No overdue tasks."));
}

#[test]
fn test_cli_schedule_rejects_zero_interval() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["maintenance", "schedule", "--interval-minutes", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_schedule_rejects_interval_over_a_week() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    docket_cmd(&db_path)
        .args(["maintenance", "schedule", "--interval-minutes", "10081"])
        .assert()
        .failure()
        .code(2);

    docket_cmd(&db_path)
        .args([
            "maintenance",
            "schedule",
            "--interval-minutes",
            "18446744073709551615",
        ])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_cli_export_import_round_trip() {
    let temp_dir = create_cli_test_environment();
    let source_db = temp_dir.path().join("source.db");
    let target_db = temp_dir.path().join("target.db");
    let snapshot = temp_dir.path().join("snapshot.json");

    create_project(&source_db, "Work");
    docket_cmd(&source_db)
        .args(["task", "add", "1", "Write spec"])
        .assert()
        .success();

    docket_cmd(&source_db)
        .arg("export")
        .arg("--output")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 project(s) and 1 task(s)"));

    docket_cmd(&target_db)
        .arg("import")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 project(s) and 1 task(s)"));

    docket_cmd(&target_db)
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Work"))
        .stdout(predicate::str::contains("### 1. Write spec"));

    docket_cmd(&target_db)
        .arg("import")
        .arg(&snapshot)
        .assert()
        .code(2);
}

#[test]
fn test_cli_export_to_stdout_is_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_project(&db_path, "Work");

    let output = docket_cmd(&db_path)
        .arg("export")
        .output()
        .expect("Failed to run export");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Export should be JSON");
    assert_eq!(json["version"], 1);
    assert_eq!(json["projects"][0]["name"], "Work");
}
