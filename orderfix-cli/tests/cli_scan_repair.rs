//! End-to-end CLI tests over real snapshot files.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn orderfix() -> Command {
    Command::cargo_bin("orderfix").expect("orderfix binary")
}

fn write_snapshot(dir: &Path, blocks: Value) -> PathBuf {
    let path = dir.join("blocks.json");
    let doc = json!({ "schema": "orderfix.snapshot.v1", "blocks": blocks });
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    path
}

/// card1 declares an unknown block and is missing child2.
fn broken_blocks() -> Value {
    json!([
        { "id": "board1", "type": "board", "createAt": 0 },
        { "id": "card1", "parentId": "board1", "type": "card",
          "createAt": 1, "updateAt": 100,
          "fields": { "contentOrder": ["ghost", "child1"] } },
        { "id": "child1", "parentId": "card1", "type": "text", "createAt": 2 },
        { "id": "child2", "parentId": "card1", "type": "text", "createAt": 3 }
    ])
}

fn clean_blocks() -> Value {
    json!([
        { "id": "board1", "type": "board", "createAt": 0 },
        { "id": "card1", "parentId": "board1", "type": "card",
          "createAt": 1, "updateAt": 100,
          "fields": { "contentOrder": ["child1", "child2"] } },
        { "id": "child1", "parentId": "card1", "type": "text", "createAt": 2 },
        { "id": "child2", "parentId": "card1", "type": "text", "createAt": 3 }
    ])
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn block<'a>(snapshot: &'a Value, id: &str) -> &'a Value {
    snapshot["blocks"]
        .as_array()
        .expect("blocks array")
        .iter()
        .find(|b| b["id"] == id)
        .expect("block by id")
}

#[test]
fn test_help_lists_subcommands() {
    orderfix()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("orderfix"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("repair"));
}

#[test]
fn test_version_prints_the_package_version() {
    orderfix()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orderfix"));
}

#[test]
fn test_unknown_subcommand_fails() {
    orderfix()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid").or(predicate::str::contains("unrecognized")));
}

#[test]
fn test_scan_requires_a_snapshot() {
    orderfix()
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--snapshot"));
}

#[test]
fn test_scan_clean_snapshot_exits_zero() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), clean_blocks());
    let out_dir = temp.path().join("out");

    orderfix()
        .arg("scan")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let report = read_json(&out_dir.join("scan.json"));
    assert_eq!(report["schema"], json!("orderfix.scan.v1"));
    assert_eq!(report["cards_scanned"], json!(1));
    assert_eq!(report["cards_with_issues"], json!(0));

    let diff = fs::read_to_string(out_dir.join("orders.diff")).unwrap();
    assert_eq!(diff, "");
}

#[test]
fn test_scan_broken_snapshot_exits_two() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), broken_blocks());
    let out_dir = temp.path().join("out");
    let before = fs::read_to_string(&snapshot).unwrap();

    orderfix()
        .arg("scan")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .code(2);

    let report = read_json(&out_dir.join("scan.json"));
    assert_eq!(report["cards_scanned"], json!(1));
    assert_eq!(report["cards_with_issues"], json!(1));
    assert_eq!(report["findings"][0]["card_id"], json!("card1"));
    assert_eq!(report["findings"][0]["orphaned_ids"], json!(["ghost"]));
    assert_eq!(report["findings"][0]["missing_ids"], json!(["child2"]));

    let markdown = fs::read_to_string(out_dir.join("scan.md")).unwrap();
    assert!(markdown.contains("# orderfix scan"));
    assert!(markdown.contains("card1"));

    let diff = fs::read_to_string(out_dir.join("orders.diff")).unwrap();
    assert!(diff.contains("diff --git a/cards/card1/contentOrder.json"));
    assert!(diff.contains("ghost"));

    // A scan never touches the snapshot.
    let after = fs::read_to_string(&snapshot).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_repair_rewrites_a_broken_snapshot() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), broken_blocks());
    let out_dir = temp.path().join("out");

    orderfix()
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let saved = read_json(&snapshot);
    let card = block(&saved, "card1");
    assert_eq!(card["fields"]["contentOrder"], json!(["child1", "child2"]));
    assert_eq!(card["modifiedBy"], json!("orderfix"));
    assert_ne!(card["updateAt"], json!(100));

    let report = read_json(&out_dir.join("repair.json"));
    assert_eq!(report["schema"], json!("orderfix.repair.v1"));
    assert_eq!(report["actor_id"], json!("orderfix"));
    assert_eq!(report["dry_run"], json!(false));
    assert_eq!(report["summary"]["attempted"], json!(1));
    assert_eq!(report["summary"]["repaired"], json!(1));
}

#[test]
fn test_repair_then_scan_is_clean() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), broken_blocks());

    orderfix()
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(temp.path().join("repair-out"))
        .assert()
        .success();

    orderfix()
        .arg("scan")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(temp.path().join("scan-out"))
        .assert()
        .success();
}

#[test]
fn test_repair_clean_snapshot_leaves_the_file_alone() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), clean_blocks());
    let out_dir = temp.path().join("out");
    let before = fs::read_to_string(&snapshot).unwrap();

    orderfix()
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let after = fs::read_to_string(&snapshot).unwrap();
    assert_eq!(before, after);

    let report = read_json(&out_dir.join("repair.json"));
    assert_eq!(report["summary"]["unchanged"], json!(1));
    assert_eq!(report["summary"]["repaired"], json!(0));
}

#[test]
fn test_repair_dry_run_previews_without_writing() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), broken_blocks());
    let out_dir = temp.path().join("out");
    let before = fs::read_to_string(&snapshot).unwrap();

    orderfix()
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--dry-run")
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let after = fs::read_to_string(&snapshot).unwrap();
    assert_eq!(before, after);

    let report = read_json(&out_dir.join("repair.json"));
    assert_eq!(report["dry_run"], json!(true));
    assert_eq!(report["summary"]["skipped"], json!(1));
    assert_eq!(report["summary"]["repaired"], json!(0));

    // The preview diff still shows what would change.
    let diff = fs::read_to_string(out_dir.join("orders.diff")).unwrap();
    assert!(diff.contains("ghost"));
}

#[test]
fn test_repair_scopes_to_one_card() {
    let temp = TempDir::new().unwrap();
    let blocks = json!([
        { "id": "board1", "type": "board", "createAt": 0 },
        { "id": "card1", "parentId": "board1", "type": "card",
          "createAt": 1, "updateAt": 100,
          "fields": { "contentOrder": ["ghost", "child1"] } },
        { "id": "card2", "parentId": "board1", "type": "card",
          "createAt": 2, "updateAt": 100,
          "fields": { "contentOrder": ["ghost2"] } },
        { "id": "child1", "parentId": "card1", "type": "text", "createAt": 3 },
        { "id": "child2", "parentId": "card1", "type": "text", "createAt": 4 },
        { "id": "child3", "parentId": "card2", "type": "text", "createAt": 5 }
    ]);
    let snapshot = write_snapshot(temp.path(), blocks);
    let out_dir = temp.path().join("out");

    orderfix()
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--card")
        .arg("card1")
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let saved = read_json(&snapshot);
    assert_eq!(
        block(&saved, "card1")["fields"]["contentOrder"],
        json!(["child1", "child2"])
    );
    assert_eq!(
        block(&saved, "card2")["fields"]["contentOrder"],
        json!(["ghost2"])
    );

    let report = read_json(&out_dir.join("repair.json"));
    assert_eq!(report["summary"]["attempted"], json!(1));
    assert_eq!(report["cards"][0]["card_id"], json!("card1"));
}

#[test]
fn test_repair_unknown_card_fails() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), clean_blocks());

    orderfix()
        .env("RUST_LOG", "error")
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--card")
        .arg("nope")
        .arg("--out-dir")
        .arg(temp.path().join("out"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_repair_rejects_non_cards() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), clean_blocks());

    orderfix()
        .env("RUST_LOG", "error")
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--card")
        .arg("child1")
        .arg("--out-dir")
        .arg(temp.path().join("out"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is not a card"));
}

#[test]
fn test_repair_records_a_custom_actor() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), broken_blocks());
    let out_dir = temp.path().join("out");

    orderfix()
        .arg("repair")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--actor")
        .arg("alice")
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let saved = read_json(&snapshot);
    assert_eq!(block(&saved, "card1")["modifiedBy"], json!("alice"));

    let report = read_json(&out_dir.join("repair.json"));
    assert_eq!(report["actor_id"], json!("alice"));
}

#[test]
fn test_scan_missing_snapshot_file_fails() {
    let temp = TempDir::new().unwrap();

    orderfix()
        .env("RUST_LOG", "error")
        .arg("scan")
        .arg("--snapshot")
        .arg(temp.path().join("missing.json"))
        .arg("--out-dir")
        .arg(temp.path().join("out"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("load snapshot"));
}
