//! Tests du binaire station-pack sur un dataset temporaire

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("station-pack-cli-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(root: &Path, relative: &str, value: Value) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, value.to_string()).unwrap();
}

/// Écrit `<root>/main` avec une station et une ligne
fn write_dataset(root: &Path) {
    let main = root.join("main");
    write(
        &main,
        "station.json",
        json!([{
            "code": 100,
            "id": "a",
            "name": "函館",
            "original_name": "函館",
            "name_kana": "はこだて",
            "lat": 41.773709,
            "lng": 140.726413,
            "prefecture": 1,
            "lines": [1000],
            "postal_code": "040-0063",
            "address": "北海道函館市若松町１２-１３",
            "voronoi": {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[140.7, 41.7], [140.8, 41.7], [140.8, 41.8]]
                },
                "properties": {}
            }
        }]),
    );
    write(
        &main,
        "line.json",
        json!([{
            "code": 1000, "id": "L", "name": "A線", "name_kana": "えーせん",
            "station_size": 1, "closed": false
        }]),
    );
    write(
        &main,
        "line/1000.json",
        json!({
            "code": 1000, "id": "L", "name": "A線", "name_kana": "えーせん",
            "station_size": 1, "closed": false,
            "station_list": [{"code": 100, "id": "a"}]
        }),
    );
    write(
        &main,
        "delaunay.json",
        json!([{"code": 100, "name": "函館", "lat": 41.77, "lng": 140.72, "next": []}]),
    );
    write(
        &main,
        "tree.json",
        json!({"name": "root", "root": 100, "node_list": [{"code": 100}]}),
    );
}

fn station_pack() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_station-pack"));
    command
        .env_remove("STATION_DATABASE_ROOT")
        .env_remove("STATION_DATABASE_DATASET")
        .env_remove("STATION_DATABASE_OUTPUT");
    command
}

#[test]
fn test_build_then_decode() {
    let dir = temp_dir("build");
    write_dataset(&dir);
    let artifact = dir.join("station_database.msgpack");
    let report = dir.join("report.json");
    let decoded = dir.join("station_database.json");

    let status = station_pack()
        .arg("--root")
        .arg(&dir)
        .arg("--output")
        .arg(&artifact)
        .arg("--report")
        .arg(&report)
        .arg("-q")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(artifact.exists());

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    // polyline absente : warning, build réussi
    assert_eq!(report["status"], "SuccessWithWarnings");
    assert_eq!(report["stations"], 1);
    assert_eq!(report["voronoi_converted"], 1);
    assert_eq!(report["checksum"].as_str().map(str::len), Some(64));

    let status = station_pack()
        .arg("decode")
        .arg("--input")
        .arg(&artifact)
        .arg("--output")
        .arg(&decoded)
        .status()
        .unwrap();
    assert!(status.success());

    let json = std::fs::read_to_string(&decoded).unwrap();
    assert!(json.starts_with("{\n    \"station\": ["));
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["station"][0]["voronoi"]["geometry"]["type"], "Polygon");
    assert_eq!(value["line"][0]["station_list"], json!(["a"]));
    assert_eq!(value["tree"]["root"], "a");

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_dataset_fails() {
    let dir = temp_dir("missing");
    let artifact = dir.join("station_database.msgpack");

    let output = station_pack()
        .arg("--root")
        .arg(&dir)
        .arg("--dataset")
        .arg("extra")
        .arg("--output")
        .arg(&artifact)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("station_database not found"));
    assert!(!artifact.exists());

    std::fs::remove_dir_all(dir).ok();
}
