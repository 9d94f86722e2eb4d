//! End-to-end CLI tests for the loc-retriever binary.

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retrieve a single volume"))
        .stdout(predicate::str::contains("--key"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("loc-retriever"));
}

/// Test that a missing --key causes non-zero exit with a usage hint.
#[test]
fn test_binary_missing_key_returns_error() {
    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--key"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.args(["-k", "x", "--invalid-flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that a missing config file aborts with a readable error.
#[test]
fn test_binary_missing_config_file_returns_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.args([
        "-k",
        "ann_arbor_1925",
        "-c",
        temp_dir.path().join("absent.yml").to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot read config file"));
}

fn sample_config() -> &'static str {
    r#"protocol: https
subdomain: tile
domain: loc.gov
service_path:
  jpg: image-services/iiif/service
maps:
  ann_arbor_1925:
    digital_id: sanborn04006_008
    manifest: https://www.loc.gov/item/sanborn04006_008/manifest.json
    filename_segments:
      name: [sanborn, ann_arbor]
      year: 1925
      vol: null
    path_segments:
      - gmd: g4114m:g4114am
        id_prefix: ct0008
        part: null
        index:
          start: 1
          stop: 3
          zfill_width: 3
"#
}

/// Test that an unknown collection key aborts before any retrieval and
/// names the configured keys.
#[test]
fn test_binary_unknown_collection_key_lists_available() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    std::fs::write(&config_path, sample_config()).unwrap();

    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.args(["-k", "detroit_1950", "-c", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("detroit_1950"))
        .stderr(predicate::str::contains("ann_arbor_1925"));
}

/// Test that a format without a service path aborts before any retrieval.
#[test]
fn test_binary_unconfigured_format_fails_fast() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    std::fs::write(&config_path, sample_config()).unwrap();

    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.args([
        "-k",
        "ann_arbor_1925",
        "-f",
        "png",
        "-c",
        config_path.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no service path configured"));
}

/// Test that a missing output directory aborts when the run log cannot be
/// created (directories are never created on demand).
#[test]
fn test_binary_missing_output_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    std::fs::write(&config_path, sample_config()).unwrap();

    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    cmd.args([
        "-k",
        "ann_arbor_1925",
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        temp_dir.path().join("absent").to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Cannot open run log"));
}

/// Full run against a mock image service: every configured index is
/// retrieved under its derived name, and the run log records the whole run
/// both on disk and on standard output.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_end_to_end_retrieves_volume() {
    let mock_server = MockServer::start().await;
    let temp_dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(
            "/iiif/service:g4114m:g4114am:ct0008001/full/pct:25/0/default.jpg",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"sheet one".to_vec()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/iiif/service:g4114m:g4114am:ct0008002/full/pct:25/0/default.jpg",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"sheet two".to_vec()))
        .mount(&mock_server)
        .await;

    let host = mock_server
        .uri()
        .strip_prefix("http://")
        .expect("mock server uri is http")
        .to_string();
    let (subdomain, domain) = host
        .split_once('.')
        .map(|(s, d)| (s.to_string(), d.to_string()))
        .expect("mock server address contains a dot");

    let config_yaml = format!(
        r#"protocol: http
subdomain: "{subdomain}"
domain: "{domain}"
service_path:
  jpg: iiif/service
maps:
  ann_arbor_1925:
    digital_id: sanborn04006_008
    manifest: https://www.loc.gov/item/sanborn04006_008/manifest.json
    filename_segments:
      name: [sanborn, ann_arbor]
      year: 1925
      vol: null
    path_segments:
      - gmd: g4114m:g4114am
        id_prefix: ct0008
        part: null
        index:
          start: 1
          stop: 3
          zfill_width: 3
"#
    );
    let config_path = temp_dir.path().join("config.yml");
    std::fs::write(&config_path, config_yaml).unwrap();
    let output_dir = temp_dir.path().join("output");
    std::fs::create_dir(&output_dir).unwrap();

    let mut cmd = Command::cargo_bin("loc-retriever").unwrap();
    let assert = cmd
        .args([
            "-k",
            "ann_arbor_1925",
            "-c",
            config_path.to_str().unwrap(),
            "-o",
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    // Both images land under their derived names with the fetched bytes.
    assert_eq!(
        std::fs::read(output_dir.join("sanborn-ann_arbor-1925-0001.jpg")).unwrap(),
        b"sheet one"
    );
    assert_eq!(
        std::fs::read(output_dir.join("sanborn-ann_arbor-1925-0002.jpg")).unwrap(),
        b"sheet two"
    );

    // The log file records the run from start to end, in order.
    let log = std::fs::read_to_string(output_dir.join("sanborn-ann_arbor-1925.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 8, "log lines: {lines:#?}");
    assert!(lines[0].starts_with("INFO: Start run: "), "got: {}", lines[0]);
    assert_eq!(lines[1], "INFO: Digital Id: sanborn04006_008");
    assert_eq!(
        lines[2],
        "INFO: Manifest: https://www.loc.gov/item/sanborn04006_008/manifest.json"
    );
    assert!(lines[3].starts_with("INFO: Target URL: "), "got: {}", lines[3]);
    assert!(lines[3].ends_with("ct0008001/full/pct:25/0/default.jpg"), "got: {}", lines[3]);
    assert_eq!(lines[4], "INFO: Image renamed to sanborn-ann_arbor-1925-0001.jpg");
    assert!(lines[5].ends_with("ct0008002/full/pct:25/0/default.jpg"), "got: {}", lines[5]);
    assert_eq!(lines[6], "INFO: Image renamed to sanborn-ann_arbor-1925-0002.jpg");
    assert!(lines[7].starts_with("INFO: End run: "), "got: {}", lines[7]);

    // Every log line is mirrored to standard output.
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("INFO: Digital Id: sanborn04006_008"));
    assert!(stdout.contains("INFO: Image renamed to sanborn-ann_arbor-1925-0002.jpg"));
}
