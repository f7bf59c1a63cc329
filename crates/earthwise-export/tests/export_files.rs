//! Writing export files to disk through the public API.

use chrono::{TimeZone, Utc};
use earthwise_export::{
    DataExporter, ExportBundle, ExportFormat, ExportOptions, ExportStats,
};
use serde_json::json;

fn bundle() -> ExportBundle {
    serde_json::from_value(json!({
        "contacts": [{
            "name": "Asha Verma",
            "email": "asha@example.in",
            "subject": "Bulk rods",
            "message": "Line one\nLine two",
            "type": "quote_request",
            "status": "resolved",
            "createdAt": "2026-03-01T10:00:00Z",
            "updatedAt": "2026-03-02T10:00:00Z"
        }],
        "products": [{
            "name": "GI Earthing Strip",
            "category": "Earthing Strips",
            "variants": [{ "name": "25x3 mm", "price": 540, "stock": 100 }],
            "createdAt": "2026-01-10T10:00:00Z",
            "updatedAt": "2026-01-10T10:00:00Z"
        }],
        "faqs": [],
        "analytics": { "totalProducts": 1, "totalContacts": 1 }
    }))
    .unwrap()
}

fn exporter() -> DataExporter {
    DataExporter::at(Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap())
}

#[test]
fn test_export_all_writes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exports");

    for file in exporter().export_all(&bundle()).unwrap() {
        file.write_to(&out).unwrap();
    }

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "analytics_overview_2026-03-07.csv",
            "contacts_2026-03-07.csv",
            "faqs_2026-03-07.csv",
            "products_2026-03-07.csv",
        ]
    );

    let faqs = std::fs::read_to_string(out.join("faqs_2026-03-07.csv")).unwrap();
    assert_eq!(
        faqs,
        "Question,Answer,Category,Status,Priority,Views,Helpful Count,Not Helpful Count,Created Date,Updated Date"
    );
}

#[test]
fn test_written_csv_keeps_multiline_cells_quoted() {
    let dir = tempfile::tempdir().unwrap();
    let file = exporter()
        .export_contacts(&bundle().contacts, &ExportOptions::new())
        .unwrap();
    let path = file.write_to(dir.path()).unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.ends_with(",3/1/2026,3/2/2026,\"Line one\nLine two\""));
}

#[test]
fn test_filtered_json_round_trips_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::new()
        .format(ExportFormat::Json)
        .filter("status", "new");
    let file = exporter()
        .export_contacts(&bundle().contacts, &options)
        .unwrap();
    let path = file.write_to(dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), "contacts_2026-03-07.json");
    assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
}

#[test]
fn test_summary_counts_bundle() {
    let stats = ExportStats::from_bundle(&bundle(), None);
    let file = exporter().export_summary(&stats);
    assert!(file.content.contains("\nContacts,1\nProducts,1\nFAQs,0\n"));
}
