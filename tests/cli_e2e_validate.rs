//! End-to-end tests for `--validate` mode.
//!
//! These tests invoke the actual CLI binary and check that validation-only
//! runs report problems and never touch the target directory.

mod common;
use common::prelude::*;

#[test]
fn test_validate_valid_inputs() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture
        .install_command()
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 GitHub URLs"))
        .stdout(predicate::str::contains("Path validation: Path is valid"))
        .stdout(predicate::str::contains("[OK] Validation successful!"));

    // Validation never stages anything.
    assert!(!fixture.custom_nodes().join("comfy-repos.txt").exists());
    assert!(!fixture.custom_nodes().join("clone-custom-nodes.py").exists());
}

#[test]
fn test_validate_short_flag() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture
        .install_command()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation successful!"));
}

#[test]
fn test_validate_reports_invalid_urls() {
    let fixture = TestFixture::new().with_repo_list(urls::MIXED);

    fixture
        .install_command()
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid GitHub URLs found:"))
        .stderr(predicate::str::contains("not-a-url"))
        .stdout(predicate::str::contains("Validation successful!").not());
}

#[test]
fn test_validate_invalid_url_hint() {
    let fixture = TestFixture::new().with_repo_list("git@github.com:foo/bar.git\n");

    fixture
        .install_command()
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "hint: git@github.com:foo/bar.git: SSH URLs are not supported",
        ));
}

#[test]
fn test_validate_blank_file() {
    let fixture = TestFixture::new().with_repo_list(urls::BLANK);

    fixture
        .install_command()
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No URLs found in the file"));
}

#[test]
fn test_validate_missing_file() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("--file")
        .arg("missing.txt")
        .arg("--dir")
        .arg(fixture.custom_nodes())
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found: missing.txt"));
}

#[test]
fn test_validate_wrong_directory_name() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);
    fixture.child("ComfyUI/models").create_dir_all().unwrap();

    fixture
        .command()
        .arg("--file")
        .arg(fixture.repo_list())
        .arg("--dir")
        .arg(fixture.path().join("ComfyUI/models"))
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Directory must be named 'custom_nodes'",
        ));
}

#[test]
fn test_validate_parent_directory_suggests_custom_nodes() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture
        .command()
        .arg("--file")
        .arg(fixture.repo_list())
        .arg("--dir")
        .arg(fixture.path().join("ComfyUI"))
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("hint: Did you mean"))
        .stderr(predicate::str::contains("custom_nodes"));
}

#[test]
fn test_validate_missing_marker() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);
    fixture.child("elsewhere/custom_nodes").create_dir_all().unwrap();

    fixture
        .command()
        .arg("--file")
        .arg(fixture.repo_list())
        .arg("--dir")
        .arg(fixture.path().join("elsewhere/custom_nodes"))
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "main.py not found in parent directory",
        ));
}

#[test]
fn test_validate_nonexistent_directory() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture
        .command()
        .arg("--file")
        .arg(fixture.repo_list())
        .arg("--dir")
        .arg(fixture.path().join("nope/custom_nodes"))
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn test_validate_reads_directory_from_stdin() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture
        .command()
        .arg("--file")
        .arg(fixture.repo_list())
        .arg("--validate")
        .write_stdin(format!("  \"{}\"  \n", fixture.custom_nodes().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the path to your ComfyUI custom_nodes directory"))
        .stdout(predicate::str::contains("Validation successful!"));
}

#[test]
fn test_validate_empty_directory_answer() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture
        .command()
        .arg("--file")
        .arg(fixture.repo_list())
        .arg("--validate")
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path cannot be empty!"));
}

#[test]
fn test_validate_writes_run_log() {
    let fixture = TestFixture::new().with_repo_list(urls::VALID);

    fixture.install_command().arg("--validate").assert().success();

    let logs = fixture.log_files();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("installer_") && name.ends_with(".log"));
}
