//! End-to-end runs of the `certinv` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use std::path::Path;
use tempfile::TempDir;

/// Lay out a scan root with one leaf, one CA and one unrelated file.
fn populate(dir: &Path) {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::default();
    let mut dn = rcgen::DistinguishedName::new();
    dn.push(DnType::CommonName, "Fixture CA");
    ca_params.distinguished_name = dn;
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let ca = ca_params.self_signed(&ca_key).unwrap();

    let leaf_key = KeyPair::generate().unwrap();
    let mut leaf_params = CertificateParams::new(vec!["leaf.internal".to_string()]).unwrap();
    let mut dn = rcgen::DistinguishedName::new();
    dn.push(DnType::CommonName, "leaf.internal");
    leaf_params.distinguished_name = dn;
    let leaf = leaf_params.signed_by(&leaf_key, &ca, &ca_key).unwrap();

    std::fs::write(dir.join("leaf.pem"), leaf.pem()).unwrap();
    std::fs::write(dir.join("ca.crt"), ca.pem()).unwrap();
    std::fs::write(dir.join("notes.txt"), "not a certificate").unwrap();
}

fn write_config(dir: &Path, scan_root: &Path, destination: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!(
            "[sources.filesystem]\nscan_paths = [{root:?}]\n\n[agent]\nhostname = \"test-node\"\n\n{destination}\n",
            root = scan_root.display().to_string()
        ),
    )
    .unwrap();
    path
}

#[test]
fn list_prints_inventory() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let conf_dir = TempDir::new().unwrap();
    let config = write_config(conf_dir.path(), root.path(), "");

    let output = Command::cargo_bin("certinv")
        .unwrap()
        .env_remove("CERTINV_CONFIG")
        .args(["--config", config.to_str().unwrap(), "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let inventory: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let certs = inventory["sources"]["certificates"].as_array().unwrap();
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0]["source"], "filesystem");
    assert_eq!(certs[0]["subject"]["commonName"], "leaf.internal");
    assert_eq!(certs[0]["issuer"]["commonName"], "Fixture CA");
    assert_eq!(certs[0]["fingerprint"].as_str().unwrap().len(), 64);
    assert_eq!(inventory["senderInfo"]["hostname"], "test-node");
    assert_eq!(
        inventory["senderInfo"]["clientVersion"],
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn count_prints_per_source_totals() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let conf_dir = TempDir::new().unwrap();
    let config = write_config(conf_dir.path(), root.path(), "");

    Command::cargo_bin("certinv")
        .unwrap()
        .env_remove("CERTINV_CONFIG")
        .args(["--no-color", "--config", config.to_str().unwrap(), "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filesystem   1"))
        .stdout(predicate::str::contains("remote-api   0"));
}

#[test]
fn scan_delivers_to_file() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let conf_dir = TempDir::new().unwrap();
    let out = conf_dir.path().join("inventory.json");
    let config = write_config(
        conf_dir.path(),
        root.path(),
        &format!(
            "[destination]\nkind = \"file\"\npath = {:?}\n",
            out.display().to_string()
        ),
    );

    Command::cargo_bin("certinv")
        .unwrap()
        .env_remove("CERTINV_CONFIG")
        .args(["--config", config.to_str().unwrap(), "scan"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(written["scanSummary"]["collected"], 1);
}

#[test]
fn missing_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("certinv")
        .unwrap()
        .env_remove("CERTINV_CONFIG")
        .args([
            "--config",
            dir.path().join("nope.toml").to_str().unwrap(),
            "list",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error loading config"));
}
