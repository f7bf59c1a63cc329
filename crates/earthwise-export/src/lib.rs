//! Back-office data export for the earthwise storefront.
//!
//! `earthwise-export` turns contact requests, catalog products, FAQs and
//! dashboard analytics into CSV, TSV or JSON files:
//! - Records are filtered by field value and, for contacts, by creation date
//! - Tables are encoded with spreadsheet-safe quoting
//! - File names carry the export date, e.g. `contacts_2026-03-07.csv`
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use earthwise_export::{Contact, DataExporter, ExportOptions};
//! use serde_json::json;
//!
//! let contacts: Vec<Contact> = serde_json::from_value(json!([{
//!     "name": "Asha Verma",
//!     "email": "asha@example.in",
//!     "subject": "Bulk rods",
//!     "message": "Need a quote",
//!     "type": "quote_request",
//!     "createdAt": "2026-03-01T10:00:00Z",
//!     "updatedAt": "2026-03-01T10:00:00Z"
//! }]))
//! .unwrap();
//!
//! let exporter = DataExporter::at(Utc.with_ymd_and_hms(2026, 3, 7, 0, 0, 0).unwrap());
//! let options = ExportOptions::new().filter("status", "all");
//! let file = exporter.export_contacts(&contacts, &options).unwrap();
//!
//! assert_eq!(file.filename, "contacts_2026-03-07.csv");
//! assert!(file.content.contains("Asha Verma,asha@example.in,,Bulk rods,quote_request"));
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Contacts resolved in March, as TSV
//! earthwise-export contacts --input contacts.json --format tsv \
//!     --filter status=resolved --from 2026-03-01 --to 2026-03-31
//!
//! # Everything at once
//! earthwise-export all --input dump.json
//! ```

pub mod error;
pub mod exporter;
pub mod models;
pub mod options;
pub mod table;

pub use error::{ExportError, Result};
pub use exporter::{AnalyticsReport, DataExporter, DateStyle, ExportBundle, ExportFile, ExportStats};
pub use models::{
    AnalyticsOverview, Contact, ContactStatus, ContactType, ExportRecord, Faq, Helpful, Priority,
    Product, Variant,
};
pub use options::{DateRange, ExportFormat, ExportOptions};
pub use table::{Cell, ExportTable};
