//! CSV export of FMEA entries.
//!
//! Fixed column order with the German header row of the paper form. The
//! RPN column is recomputed per row from the stored ratings, never read
//! from storage.

use crate::domain::FmeaEntry;

/// Header labels, in the exported column order
pub const CSV_HEADERS: [&str; 12] = [
    "Funktion",
    "Fehlerart",
    "Fehlerfolge",
    "Auftretenswahrscheinlichkeit",
    "Fehlerursache",
    "Auftreten",
    "Prüfmaßnahme",
    "Entdeckung",
    "RPN",
    "Maßnahmen",
    "Status",
    "Erstellt am",
];

/// Serialize entries as `;`-separated CSV bytes, one header row plus one
/// row per entry.
pub fn export_entries_csv(entries: &[FmeaEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for entry in entries {
        let record: [String; 12] = [
            entry.function.clone(),
            entry.failure_mode.clone(),
            entry.failure_effect.clone(),
            entry.severity.to_string(),
            entry.failure_cause.clone(),
            entry.occurrence.to_string(),
            entry.test_method.clone(),
            entry.detection.to_string(),
            entry.rpn().to_string(),
            entry.actions.clone().unwrap_or_default(),
            entry.status.to_string(),
            entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ];
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryStatus;
    use chrono::{TimeZone, Utc};

    fn entry(id: i32, severity: i32, occurrence: i32, detection: i32) -> FmeaEntry {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        FmeaEntry {
            id,
            function: "Bremssystem".to_string(),
            failure_mode: "Bremsen versagen".to_string(),
            failure_effect: "Sicherheitsrisiko".to_string(),
            severity,
            failure_cause: "Verschlissene Bremsbeläge".to_string(),
            occurrence,
            test_method: "Bremstest".to_string(),
            detection,
            actions: Some("Präventive Wartung".to_string()),
            status: EntryStatus::InProgress,
            created_by: "user-1".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn header_row_carries_the_german_labels() {
        let bytes = export_entries_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text.lines().next().unwrap(),
            "Funktion;Fehlerart;Fehlerfolge;Auftretenswahrscheinlichkeit;Fehlerursache;\
             Auftreten;Prüfmaßnahme;Entdeckung;RPN;Maßnahmen;Status;Erstellt am"
        );
    }

    #[test]
    fn one_row_per_entry_plus_header() {
        let entries = vec![entry(1, 8, 3, 2), entry(2, 10, 2, 3), entry(3, 7, 4, 4)];
        let bytes = export_entries_csv(&entries).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text.lines().count(), entries.len() + 1);
    }

    #[test]
    fn rpn_column_is_recomputed_from_the_ratings() {
        let bytes = export_entries_csv(&[entry(1, 7, 4, 4)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(';').collect();
        assert_eq!(fields[3], "7");
        assert_eq!(fields[5], "4");
        assert_eq!(fields[7], "4");
        assert_eq!(fields[8], "112");
        assert_eq!(fields[10], "In Bearbeitung");
        assert_eq!(fields[11], "2024-05-01 12:30");
    }

    #[test]
    fn missing_actions_export_as_an_empty_field() {
        let mut e = entry(1, 1, 1, 1);
        e.actions = None;
        let bytes = export_entries_csv(&[e]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(';').collect();
        assert_eq!(fields[9], "");
    }
}
