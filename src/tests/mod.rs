
use crate::cli::{handle_cli_to, Cli};
use crate::error::Error;
use clap::Parser;
use std::fs;
use std::path::Path;

fn disk_with_os_release(body: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("etc")).unwrap();
    fs::write(dir.path().join("etc/os-release"), body).unwrap();
    dir
}

fn run(args: &[&str]) -> (crate::Result<()>, String) {
    let mut argv = vec!["import-precheck"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let res = handle_cli_to(cli, &mut out);
    (res, String::from_utf8(out).unwrap())
}

fn root_arg(p: &Path) -> String {
    p.display().to_string()
}

#[test]
fn supported_disk_passes() {
    let disk = disk_with_os_release("ID=centos\nVERSION_ID=\"7.9\"\n");
    let root = root_arg(disk.path());
    let (res, out) = run(&["check", "--root", &root, "--arch", "x86_64"]);
    assert!(res.is_ok(), "{:?}", res);
    assert_eq!(out, "OS Version Check -- PASSED\n  [INFO] Detected system: centos-7\n");
}

#[test]
fn unsupported_disk_exits_with_unsupported() {
    let disk = disk_with_os_release("ID=centos\nVERSION_ID=\"6.10\"\n");
    let root = root_arg(disk.path());
    let (res, out) = run(&["check", "--root", &root, "--arch", "x86_64"]);
    let err = res.unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
    assert_eq!(err.exit_code(), 10);
    assert!(out.contains("[FATAL] centos-6 is not supported for import."));
}

#[test]
fn generic_linux_is_skipped_unless_strict() {
    let disk = disk_with_os_release("NAME=\"Something\"\nVERSION_ID=5.4\n");
    let root = root_arg(disk.path());

    let (res, out) = run(&["check", "--root", &root]);
    assert!(res.is_ok());
    assert!(out.starts_with("OS Version Check -- SKIPPED\n"));
    assert!(out.contains("Detected generic Linux system."));

    let (res, _) = run(&["check", "--root", &root, "--strict"]);
    assert_eq!(res.unwrap_err().exit_code(), 20);
}

#[test]
fn overrides_take_precedence_over_detection() {
    let disk = tempfile::tempdir().unwrap();
    let root = root_arg(disk.path());
    let (res, out) = run(&[
        "--json",
        "check",
        "--root",
        &root,
        "--short-name",
        "windows",
        "--os-version",
        "10.0",
        "--arch",
        "x64",
    ]);
    assert!(res.is_ok(), "{:?}", res);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v[0]["name"], "OS Version Check");
    assert_eq!(v[0]["result"], "passed");
    assert_eq!(v[0]["infos"][1], "Detected Windows version number: NT 10.0");
}

#[test]
fn catalog_override_changes_decision() {
    let disk = disk_with_os_release("ID=debian\nVERSION_ID=\"12\"\n");
    let root = root_arg(disk.path());
    let catalog = disk.path().join("catalog.json");
    fs::write(&catalog, r#"{"os_ids": ["debian-12-byol"]}"#).unwrap();
    let catalog = catalog.display().to_string();

    let (res, out) = run(&["check", "--root", &root, "--arch", "amd64", "--catalog", &catalog]);
    assert!(res.is_ok(), "{:?}", res);
    assert!(out.contains("Detected system: debian-12"));

    let (res, out) = run(&["list-supported", "--catalog", &catalog]);
    assert!(res.is_ok());
    assert_eq!(out, "debian-12-byol\n");
}

#[test]
fn bad_catalog_is_an_error() {
    let (res, _) = run(&["list-supported", "--catalog", "/nonexistent/catalog.json"]);
    assert_eq!(res.unwrap_err().exit_code(), 30);
}

#[test]
fn list_supported_json() {
    let (res, out) = run(&["--json", "list-supported"]);
    assert!(res.is_ok());
    let ids: Vec<String> = serde_json::from_str(&out).unwrap();
    assert!(ids.contains(&"rhel-9-byol".to_string()));
    assert!(!ids.contains(&"rhel-9".to_string()));
}

#[test]
fn mixed_case_windows_override_reports_nt_version() {
    let disk = tempfile::tempdir().unwrap();
    let root = root_arg(disk.path());
    let (res, out) = run(&[
        "check",
        "--root",
        &root,
        "--short-name",
        "Windows",
        "--os-version",
        "10.0",
        "--arch",
        "x64",
    ]);
    assert!(res.is_ok(), "{:?}", res);
    assert!(out.contains("[INFO] Detected Windows system."));
    assert!(out.contains("[INFO] Detected Windows version number: NT 10.0"));
    assert!(!out.contains("Detected system:"));
}

#[test]
fn foreign_disk_without_binaries_asks_for_arch() {
    let disk = disk_with_os_release("ID=centos\nVERSION_ID=\"7.9\"\n");
    let root = root_arg(disk.path());
    let (res, out) = run(&["check", "--root", &root]);
    assert!(res.is_ok(), "{:?}", res);
    assert!(out.starts_with("OS Version Check -- SKIPPED\n"));
    assert!(out.contains("architecture is required for centos; pass --arch"));
}
