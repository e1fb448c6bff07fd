//! Sérialisation du document en MessagePack
//!
//! Les structures sont écrites en maps à clés nommées (`to_vec_named`), dans
//! l'ordre de déclaration des champs : le format reste auto-descriptif et
//! décodable sans connaître les types. Un champ optionnel absent est écrit
//! `nil`, jamais omis.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::types::Document;
use crate::DatasetError;

/// Encode le document complet
pub fn encode(document: &Document) -> Result<Vec<u8>, DatasetError> {
    Ok(rmp_serde::to_vec_named(document)?)
}

/// Décode un artefact vers les types du document
pub fn decode(bytes: &[u8]) -> Result<Document, DatasetError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Décode un artefact sans schéma (inspection), ordre des clés conservé
pub fn decode_value(bytes: &[u8]) -> Result<serde_json::Value, DatasetError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Formate une valeur en JSON indenté sur 4 espaces
pub fn to_pretty_json(value: &serde_json::Value) -> Result<String, DatasetError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Encode puis écrit l'artefact de façon atomique
///
/// Le contenu est d'abord écrit dans un fichier temporaire du même répertoire,
/// puis renommé. En cas d'échec, aucun fichier partiel ne reste en place.
///
/// Retourne la taille de l'artefact en octets.
pub fn write_artifact(path: &Path, document: &Document) -> Result<usize, DatasetError> {
    let bytes = encode(document)?;
    let temp = temp_path(path);

    if let Err(e) = write_file(&temp, &bytes) {
        fs::remove_file(&temp).ok();
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp, path) {
        fs::remove_file(&temp).ok();
        return Err(e.into());
    }

    info!(output = %path.display(), bytes = bytes.len(), "Artifact written");
    Ok(bytes.len())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), DatasetError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Feature, FeatureCollectionKind, FeatureKind, Geometry, Ident, Line, LineCode, Polyline,
        PolylineProperties, Properties, SegmentProperties, Station, StationAttr, StationCode,
        Tree, TreeNode,
    };

    fn sample_document() -> Document {
        let station = Station {
            code: StationCode(1110101),
            id: Ident::from("d8aa2a"),
            name: "函館".to_string(),
            original_name: "函館".to_string(),
            name_kana: "はこだて".to_string(),
            closed: false,
            lat: 41.773709,
            lng: 140.726413,
            prefecture: 1,
            lines: vec![LineCode(11101), LineCode(11119)],
            attr: Some(StationAttr::Heat),
            postal_code: "040-0063".to_string(),
            address: "北海道函館市若松町１２-１３".to_string(),
            open_date: Some("1902-12-10".to_string()),
            closed_date: None,
            voronoi: Feature {
                kind: FeatureKind::Feature,
                geometry: Geometry::Polygon {
                    coordinates: vec![vec![
                        [140.72591, 41.771256],
                        [140.731074, 41.778908],
                        [140.714787, 41.792259],
                        [140.72591, 41.771256],
                    ]],
                },
                properties: Properties::new(),
            },
            extra: None,
            delaunay: vec![Ident::from("a0a7b5"), Ident::Number(1110103)],
        };

        let line = Line {
            code: LineCode(11101),
            id: Ident::from("2d2b4c"),
            name: "JR函館本線(函館～長万部)".to_string(),
            name_kana: "じぇいあーるはこだてほんせん".to_string(),
            name_formal: None,
            station_size: 1,
            company_code: Some(1),
            closed: false,
            color: Some("#F68B1E".to_string()),
            symbol: Some("H".to_string()),
            closed_date: None,
            extra: Some(false),
            station_list: vec![Ident::from("d8aa2a")],
            polyline_list: Some(Polyline {
                kind: FeatureCollectionKind::FeatureCollection,
                features: vec![Feature {
                    kind: FeatureKind::Feature,
                    geometry: Geometry::LineString {
                        coordinates: vec![[140.726413, 41.773709], [140.7, 41.8]],
                    },
                    properties: SegmentProperties {
                        start: "d8aa2a".to_string(),
                        end: "a0a7b5".to_string(),
                        closed: None,
                    },
                }],
                properties: PolylineProperties {
                    name: "JR函館本線(函館～長万部)".to_string(),
                    north: 41.8,
                    south: 41.773709,
                    east: 140.726413,
                    west: 140.7,
                },
            }),
        };

        Document {
            station: vec![station],
            line: vec![line],
            tree: Tree {
                root: None,
                node_list: vec![TreeNode {
                    id: Ident::from("d8aa2a"),
                    left: None,
                    right: Some(Ident::from("a0a7b5")),
                    segment: None,
                }],
            },
        }
    }

    #[test]
    fn test_round_trip() {
        let document = sample_document();
        let bytes = encode(&document).unwrap();
        assert_eq!(decode(&bytes).unwrap(), document);
    }

    #[test]
    fn test_absent_fields_are_explicit_nil() {
        let bytes = encode(&sample_document()).unwrap();
        let value = decode_value(&bytes).unwrap();

        let station = &value["station"][0];
        assert!(station.as_object().unwrap().contains_key("closed_date"));
        assert!(station["closed_date"].is_null());
        assert!(station["extra"].is_null());
        assert_eq!(station["attr"], "heat");

        let line = &value["line"][0];
        assert!(line["name_formal"].is_null());
        assert!(line["polyline_list"]["features"][0]["properties"]
            .as_object()
            .unwrap()
            .contains_key("closed"));
        assert!(line["polyline_list"]["features"][0]["properties"]["closed"].is_null());

        let tree = &value["tree"];
        assert!(tree.as_object().unwrap().contains_key("root"));
        assert!(tree["root"].is_null());
        assert!(tree["node_list"][0]["left"].is_null());
    }

    #[test]
    fn test_decoded_key_order_follows_declaration() {
        let bytes = encode(&sample_document()).unwrap();
        let value = decode_value(&bytes).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["station", "line", "tree"]);

        let station_keys: Vec<&str> = value["station"][0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(station_keys.first(), Some(&"code"));
        assert_eq!(station_keys.last(), Some(&"delaunay"));
    }

    #[test]
    fn test_write_artifact() {
        let output = std::env::temp_dir().join(format!(
            "station-database-encode-{}.msgpack",
            std::process::id()
        ));
        let document = sample_document();

        let size = write_artifact(&output, &document).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), size);
        assert_eq!(decode(&bytes).unwrap(), document);
        assert!(!temp_path(&output).exists());

        std::fs::remove_file(output).ok();
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let value = serde_json::json!({"station": [1]});
        let json = to_pretty_json(&value).unwrap();
        assert_eq!(json, "{\n    \"station\": [\n        1\n    ]\n}");
    }
}
