//! Types de données pour le crate station-database
//!
//! Les enregistrements d'entrée (`*Record`, [`LineSummary`], [`LineDetail`],
//! [`TreeSegment`]) reflètent les fichiers JSON du dataset. Les types de sortie
//! ([`Station`], [`Line`], [`Tree`], [`Document`]) sont construits par les
//! assembleurs et ne sont jamais modifiés en place.
//!
//! Aucun champ optionnel n'utilise `skip_serializing_if` : une valeur absente
//! (`None`) est toujours écrite comme `nil` dans l'artefact MessagePack, la clé
//! restant présente.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code d'une station, propre à une version du dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationCode(pub u32);

/// Code d'une ligne, propre à une version du dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCode(pub u32);

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifiant stable d'une station ou d'une ligne (constant d'une version à l'autre)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ident {
    Text(String),
    Number(u64),
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Text(s) => f.write_str(s),
            Ident::Number(n) => n.fmt(f),
        }
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::Text(value.to_string())
    }
}

impl From<u64> for Ident {
    fn from(value: u64) -> Self {
        Ident::Number(value)
    }
}

/// Position GeoJSON : `[longitude, latitude]`
pub type Position = [f64; 2];

/// Géométrie partagée par les frontières de Voronoï et les polylignes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Anneau extérieur uniquement, fermé (premier point == dernier point)
    Polygon { coordinates: Vec<Vec<Position>> },
    /// Frontière ouverte (stations en périphérie du dataset)
    LineString { coordinates: Vec<Position> },
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon { .. } => "Polygon",
            Geometry::LineString { .. } => "LineString",
        }
    }
}

/// Énumération de mots-clés, toujours sérialisée en chaîne
macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(into = "&'static str", try_from = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                match value.as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} value: {}",
                        stringify!($name),
                        other
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum!(FeatureKind { Feature => "Feature" });

keyword_enum!(FeatureCollectionKind {
    FeatureCollection => "FeatureCollection",
});

/// Feature GeoJSON générique sur ses propriétés
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub geometry: Geometry,
    pub properties: P,
}

/// Propriétés libres d'une Feature (objet vide dans le dataset)
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Frontière de Voronoï d'une station
pub type Boundary = Feature<Properties>;

keyword_enum!(
    /// Attribut de station
    StationAttr {
        Eco => "eco",
        Heat => "heat",
        Cool => "cool",
        Unknown => "unknown",
    }
);

/// Station telle que lue dans `station.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub code: StationCode,
    pub id: Ident,
    /// Nom unique dans le dataset (peut porter un suffixe de désambiguïsation)
    pub name: String,
    pub original_name: String,
    pub name_kana: String,
    /// Absent dans une partie du dataset `main`, traité comme `false`
    #[serde(default)]
    pub closed: bool,
    pub lat: f64,
    pub lng: f64,
    /// Code préfecture JIS X 0401 (1-47)
    pub prefecture: u8,
    /// Codes des lignes desservant la station, jamais vide
    pub lines: Vec<LineCode>,
    #[serde(default)]
    pub attr: Option<StationAttr>,
    pub postal_code: String,
    pub address: String,
    #[serde(default)]
    pub open_date: Option<String>,
    #[serde(default)]
    pub closed_date: Option<String>,
    pub voronoi: Boundary,
    #[serde(default)]
    pub extra: Option<bool>,
}

/// Station assemblée (voisins de Delaunay résolus, frontière normalisée)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub code: StationCode,
    pub id: Ident,
    pub name: String,
    pub original_name: String,
    pub name_kana: String,
    pub closed: bool,
    pub lat: f64,
    pub lng: f64,
    pub prefecture: u8,
    pub lines: Vec<LineCode>,
    pub attr: Option<StationAttr>,
    pub postal_code: String,
    pub address: String,
    pub open_date: Option<String>,
    pub closed_date: Option<String>,
    pub voronoi: Boundary,
    pub extra: Option<bool>,
    /// Identifiants des stations voisines, dans l'ordre de `delaunay.json`
    pub delaunay: Vec<Ident>,
}

/// Voisinage de Delaunay d'une station (`delaunay.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelaunayRecord {
    pub code: StationCode,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub next: Vec<StationCode>,
}

/// Ligne telle que lue dans `line.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    pub code: LineCode,
    pub id: Ident,
    pub name: String,
    pub name_kana: String,
    /// Défini seulement s'il diffère de `name`
    #[serde(default)]
    pub name_formal: Option<String>,
    pub station_size: u32,
    #[serde(default)]
    pub company_code: Option<u32>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub closed_date: Option<String>,
    #[serde(default)]
    pub extra: Option<bool>,
}

/// Détail d'une ligne (`line/<code>.json`)
///
/// Les champs facultatifs absents du fichier restent `None` : la valeur du
/// résumé est alors reprise à la fusion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineDetail {
    pub code: LineCode,
    pub id: Ident,
    pub name: String,
    pub name_kana: String,
    #[serde(default)]
    pub name_formal: Option<String>,
    pub station_size: u32,
    #[serde(default)]
    pub company_code: Option<u32>,
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub closed_date: Option<String>,
    #[serde(default)]
    pub extra: Option<bool>,
    pub station_list: Vec<LineStationEntry>,
}

/// Station enregistrée sur une ligne ; seuls les champs utiles au re-keying sont lus
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineStationEntry {
    pub code: StationCode,
    #[serde(default)]
    pub id: Option<Ident>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentProperties {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub closed: Option<bool>,
}

/// Segment de polyligne, relié aux autres par ses identifiants `start`/`end`
pub type PolylineSegment = Feature<SegmentProperties>;

/// Emprise et nom de la polyligne
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineProperties {
    pub name: String,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Polyligne d'une ligne (`polyline/<code>.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionKind,
    pub features: Vec<PolylineSegment>,
    pub properties: PolylineProperties,
}

/// Ligne assemblée : résumé + détail, stations re-keyées en identifiants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub code: LineCode,
    pub id: Ident,
    pub name: String,
    pub name_kana: String,
    pub name_formal: Option<String>,
    pub station_size: u32,
    pub company_code: Option<u32>,
    pub closed: bool,
    pub color: Option<String>,
    pub symbol: Option<String>,
    pub closed_date: Option<String>,
    pub extra: Option<bool>,
    pub station_list: Vec<Ident>,
    pub polyline_list: Option<Polyline>,
}

/// Arbre de recherche spatiale (`tree.json`)
///
/// `root` et `node_list` sont obligatoires d'après le format, mais leur absence
/// est tolérée avec un warning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeSegment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub root: Option<StationCode>,
    #[serde(default)]
    pub node_list: Option<Vec<TreeNodeRecord>>,
}

/// Sommet de l'arbre ; les autres champs de station présents dans le fichier sont ignorés
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeNodeRecord {
    pub code: StationCode,
    #[serde(default)]
    pub left: Option<StationCode>,
    #[serde(default)]
    pub right: Option<StationCode>,
    /// Nom d'un sous-arbre externe (`<segment>.json`), non parcouru
    #[serde(default)]
    pub segment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: Ident,
    pub left: Option<Ident>,
    pub right: Option<Ident>,
    pub segment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tree {
    /// Absent si la racine déclarée ne se résout pas : arbre inutilisable
    pub root: Option<Ident>,
    pub node_list: Vec<TreeNode>,
}

/// Document final écrit dans l'artefact
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub station: Vec<Station>,
    pub line: Vec<Line>,
    pub tree: Tree,
}

/// Compteurs du build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub stations: usize,
    /// Frontières LineString converties en Polygon
    pub voronoi_converted: usize,
    pub lines: usize,
    pub lines_skipped: usize,
    pub polylines_missing: usize,
    pub tree_nodes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_untagged() {
        let text: Ident = serde_json::from_str(r#""7bfd6b""#).unwrap();
        assert_eq!(text, Ident::from("7bfd6b"));

        let number: Ident = serde_json::from_str("1130101").unwrap();
        assert_eq!(number, Ident::Number(1130101));
        assert_eq!(number.to_string(), "1130101");
    }

    #[test]
    fn test_geometry_tagged() {
        let geometry: Geometry =
            serde_json::from_str(r#"{"type":"LineString","coordinates":[[140.1,41.2],[140.2,41.3]]}"#)
                .unwrap();
        assert_eq!(geometry.type_name(), "LineString");

        let json = serde_json::to_string(&Geometry::Polygon {
            coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
        })
        .unwrap();
        assert!(json.starts_with(r#"{"type":"Polygon","coordinates":"#));
    }

    #[test]
    fn test_keyword_enums() {
        let attr: StationAttr = serde_json::from_str(r#""heat""#).unwrap();
        assert_eq!(attr, StationAttr::Heat);
        assert_eq!(serde_json::to_string(&StationAttr::Eco).unwrap(), r#""eco""#);
        assert!(serde_json::from_str::<StationAttr>(r#""warm""#).is_err());
        assert_eq!(FeatureKind::Feature.to_string(), "Feature");
    }

    #[test]
    fn test_line_detail_keeps_absent_fields() {
        let json = r##"{
            "code": 11319,
            "id": "2d2b4c",
            "name": "JR函館本線(函館～長万部)",
            "name_kana": "じぇいあーるはこだてほんせん",
            "station_size": 2,
            "color": "#F68B1E",
            "station_list": [
                {"code": 1110101, "id": "d8aa2a", "name": "函館", "numbering": ["H75"]},
                {"code": 1110102, "id": "a0a7b5", "name": "五稜郭"}
            ]
        }"##;
        let detail: LineDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.code, LineCode(11319));
        assert_eq!(detail.color.as_deref(), Some("#F68B1E"));
        assert_eq!(detail.name_formal, None);
        assert_eq!(detail.closed, None);
        assert_eq!(detail.station_list.len(), 2);
        assert_eq!(detail.station_list[0].code, StationCode(1110101));
    }

    #[test]
    fn test_tree_segment_tolerates_missing_fields() {
        let tree: TreeSegment = serde_json::from_str(r#"{"name":"root"}"#).unwrap();
        assert!(tree.root.is_none());
        assert!(tree.node_list.is_none());
    }
}
