//! Command line behaviour of the `central_bundle` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;

fn write_project(dir: &std::path::Path) {
    std::fs::write(
        dir.join("pom.xml"),
        "<project><groupId>com.example</groupId><artifactId>widget</artifactId><version>1.0.0</version></project>",
    )
    .unwrap();
    std::fs::write(dir.join("widget-1.0.0.jar"), b"jar").unwrap();
}

fn central_bundle() -> Command {
    let mut cmd = Command::cargo_bin("central_bundle").unwrap();
    cmd.env_remove("GPG_PASSPHRASE")
        .env_remove("GPG_EXECUTABLE")
        .env_remove("GPG_KEYNAME");
    cmd
}

#[test]
fn builds_unsigned_bundle() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    central_bundle()
        .current_dir(dir.path())
        .args(["--pom-file", "pom.xml", "--artifact", "widget-1.0.0.jar"])
        .args(["--gpg-sign", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bundle:"))
        .stdout(predicate::str::contains("widget-1.0.0.jar (unsigned, 3 checksums)"));

    let bundle = dir.path().join("target/central-publishing/central-bundle.zip");
    let archive = zip::ZipArchive::new(File::open(bundle).unwrap()).unwrap();
    assert!(archive
        .file_names()
        .any(|n| n == "com/example/widget/1.0.0/widget-1.0.0.pom.sha1"));
}

#[test]
fn json_report_lists_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    central_bundle()
        .current_dir(dir.path())
        .args(["-p", "pom.xml", "-a", "widget-1.0.0.jar", "--gpg-sign", "false", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"artifactId\": \"widget\""))
        .stdout(predicate::str::contains("\"archivePath\""));
}

#[test]
fn config_file_supplies_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());
    std::fs::write(
        dir.path().join("central-bundle.toml"),
        "pomFile = \"pom.xml\"\nartifactFiles = [\"widget-1.0.0.jar\"]\nbuildDirectory = \"out\"\ngpgSign = false\n",
    )
    .unwrap();

    central_bundle()
        .args(["--config"])
        .arg(dir.path().join("central-bundle.toml"))
        .assert()
        .success();

    assert!(dir
        .path()
        .join("out/central-publishing/central-bundle.zip")
        .is_file());
}

#[test]
fn missing_coordinate_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pom.xml"),
        "<project><groupId>com.example</groupId><artifactId>widget</artifactId></project>",
    )
    .unwrap();

    central_bundle()
        .current_dir(dir.path())
        .args(["--pom-file", "pom.xml", "--gpg-sign", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing: version"));

    assert!(!dir.path().join("target/central-staging/com").exists());
}

#[test]
fn pom_file_is_required() {
    let dir = tempfile::tempdir().unwrap();

    central_bundle()
        .current_dir(dir.path())
        .args(["--gpg-sign", "false"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--pom-file"));
}

#[test]
fn missing_signing_tool_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    central_bundle()
        .current_dir(dir.path())
        .args(["--pom-file", "pom.xml", "--gpg-executable", "no-such-gpg-binary"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("was not found in PATH"));
}
