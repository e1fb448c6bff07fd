//! Contrôles de qualité légers sur les entrées
//!
//! Le format des fichiers est un contrat d'entrée ; ces contrôles ne couvrent
//! que quelques champs utiles à l'audit et ne produisent que des warnings.

use std::ops::RangeInclusive;

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::error::Warning;
use crate::types::{LineSummary, StationRecord};
use crate::DatasetError;

/// Plage des codes préfecture JIS X 0401
const PREFECTURES: RangeInclusive<u8> = 1..=47;

/// Motifs compilés une fois par build
#[derive(Debug, Clone)]
pub struct Validator {
    color: Regex,
    postal_code: Regex,
    date: Regex,
}

impl Validator {
    pub fn new() -> Result<Self, DatasetError> {
        Ok(Self {
            color: Regex::new(r"^#[0-9A-F]{6}$")?,
            postal_code: Regex::new(r"^[0-9]{3}-[0-9]{4}$")?,
            date: Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")?,
        })
    }

    pub fn stations(&self, records: &[StationRecord], diagnostics: &mut Diagnostics) {
        for record in records {
            let entity = || format!("station {}", record.code);

            if !PREFECTURES.contains(&record.prefecture) {
                diagnostics.warn(Warning::InvalidField {
                    entity: entity(),
                    field: "prefecture",
                    value: record.prefecture.to_string(),
                });
            }

            if !self.postal_code.is_match(&record.postal_code) {
                diagnostics.warn(Warning::InvalidField {
                    entity: entity(),
                    field: "postal_code",
                    value: record.postal_code.clone(),
                });
            }

            for (field, date) in [
                ("open_date", &record.open_date),
                ("closed_date", &record.closed_date),
            ] {
                self.check_date(&entity, field, date.as_deref(), diagnostics);
            }
        }
    }

    pub fn lines(&self, summaries: &[LineSummary], diagnostics: &mut Diagnostics) {
        for summary in summaries {
            let entity = || format!("line {}", summary.code);

            if let Some(color) = summary.color.as_deref() {
                if !self.color.is_match(color) {
                    diagnostics.warn(Warning::InvalidField {
                        entity: entity(),
                        field: "color",
                        value: color.to_string(),
                    });
                }
            }

            if summary.station_size == 0 {
                diagnostics.warn(Warning::InvalidField {
                    entity: entity(),
                    field: "station_size",
                    value: "0".to_string(),
                });
            }

            self.check_date(&entity, "closed_date", summary.closed_date.as_deref(), diagnostics);
        }
    }

    fn check_date(
        &self,
        entity: &dyn Fn() -> String,
        field: &'static str,
        date: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) {
        if let Some(date) = date {
            if !self.date.is_match(date) {
                diagnostics.warn(Warning::InvalidField {
                    entity: entity(),
                    field,
                    value: date.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ident, LineCode};

    fn summary(color: Option<&str>) -> LineSummary {
        LineSummary {
            code: LineCode(11319),
            id: Ident::from("2d2b4c"),
            name: "JR函館本線(函館～長万部)".to_string(),
            name_kana: "じぇいあーるはこだてほんせん".to_string(),
            name_formal: None,
            station_size: 1,
            company_code: None,
            closed: false,
            color: color.map(str::to_string),
            symbol: None,
            closed_date: None,
            extra: None,
        }
    }

    #[test]
    fn test_valid_line_has_no_warning() {
        let mut diagnostics = Diagnostics::new();
        Validator::new()
            .unwrap()
            .lines(&[summary(Some("#F68B1E")), summary(None)], &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_color_warns() {
        let mut diagnostics = Diagnostics::new();
        Validator::new()
            .unwrap()
            .lines(&[summary(Some("#f68b1e"))], &mut diagnostics);
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::InvalidField {
                entity: "line 11319".to_string(),
                field: "color",
                value: "#f68b1e".to_string(),
            }]
        );
    }

    #[test]
    fn test_patterns() {
        let validator = Validator::new().unwrap();
        assert!(validator.postal_code.is_match("040-0063"));
        assert!(!validator.postal_code.is_match("0400063"));
        assert!(validator.date.is_match("2022-03-12"));
        assert!(!validator.date.is_match("2022/03/12"));
    }

    #[test]
    fn test_station_size_zero_warns() {
        let mut empty = summary(None);
        empty.station_size = 0;
        let mut diagnostics = Diagnostics::new();
        Validator::new().unwrap().lines(&[empty], &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.warnings()[0].entity(), "line 11319");
    }
}
