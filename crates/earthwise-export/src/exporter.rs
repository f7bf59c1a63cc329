//! Builds export files from back-office records.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{AnalyticsOverview, Contact, ExportRecord, Faq, Product};
use crate::options::{DateRange, ExportFormat, ExportOptions};
use crate::table::{Cell, ExportTable};

/// An encoded export ready to be saved or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name including extension.
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportFile {
    /// Delimited encoding of `table`. Tables have no JSON form; a JSON
    /// request falls back to CSV.
    fn from_table(table: &ExportTable, format: ExportFormat) -> Self {
        match format {
            ExportFormat::Tsv => Self::new(&table.filename, format, table.to_tsv()),
            ExportFormat::Csv | ExportFormat::Json => {
                Self::new(&table.filename, ExportFormat::Csv, table.to_csv())
            }
        }
    }

    fn json<T: Serialize + ?Sized>(base: &str, value: &T) -> Result<Self> {
        let content = serde_json::to_string_pretty(value)?;
        Ok(Self::new(base, ExportFormat::Json, content))
    }

    fn new(base: &str, format: ExportFormat, content: String) -> Self {
        Self {
            filename: format!("{base}.{}", format.extension()),
            mime_type: format.mime_type(),
            content,
        }
    }

    /// Write the file into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        info!("Wrote {} ({} bytes)", path.display(), self.content.len());
        Ok(path)
    }
}

/// How [`DataExporter::format_date`] renders a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `3/7/2026`
    #[default]
    Short,
    /// `March 7, 2026 at 09:05 AM`
    Long,
}

/// Which analytics export to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsReport {
    /// Metric/Value/Change CSV.
    Overview,
    /// The raw figures as JSON.
    Detailed,
}

/// Everything [`DataExporter::export_all`] writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportBundle {
    pub contacts: Vec<Contact>,
    pub products: Vec<Product>,
    pub faqs: Vec<Faq>,
    pub analytics: AnalyticsOverview,
}

/// Input of [`DataExporter::export_summary`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportStats {
    pub contacts_count: usize,
    pub products_count: usize,
    pub faqs_count: usize,
    pub date_range: Option<DateRange>,
}

impl ExportStats {
    pub fn from_bundle(bundle: &ExportBundle, date_range: Option<DateRange>) -> Self {
        Self {
            contacts_count: bundle.contacts.len(),
            products_count: bundle.products.len(),
            faqs_count: bundle.faqs.len(),
            date_range,
        }
    }
}

/// Produces export files, stamping names with the current UTC date.
#[derive(Debug, Clone, Copy)]
pub struct DataExporter {
    now: DateTime<Utc>,
}

impl Default for DataExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DataExporter {
    /// An exporter using the wall clock.
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// An exporter that treats `now` as the current time.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Render `date` for display in an export.
    pub fn format_date(date: DateTime<Utc>, style: DateStyle) -> String {
        match style {
            DateStyle::Short => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            DateStyle::Long => date.format("%B %-d, %Y at %I:%M %p").to_string(),
        }
    }

    fn stamped(&self, kind: &str) -> String {
        format!("{kind}_{}", self.now.format("%Y-%m-%d"))
    }

    fn short(date: DateTime<Utc>) -> Cell {
        Cell::Text(Self::format_date(date, DateStyle::Short))
    }

    fn select<'a, R: ExportRecord>(
        records: &'a [R],
        options: &ExportOptions,
        use_date_range: bool,
    ) -> Vec<&'a R> {
        let selected: Vec<&R> = records
            .iter()
            .filter(|r| !use_date_range || options.matches_date_range(*r))
            .filter(|r| options.matches_filters(*r))
            .collect();
        debug!("Selected {} of {} records", selected.len(), records.len());
        selected
    }

    fn finish<R: ExportRecord>(
        table: &ExportTable,
        selected: &[&R],
        options: &ExportOptions,
    ) -> Result<ExportFile> {
        if options.format == ExportFormat::Json {
            ExportFile::json(&table.filename, selected)
        } else {
            Ok(ExportFile::from_table(table, options.format))
        }
    }

    /// Export contact requests. Both the date range and filters apply.
    pub fn export_contacts(
        &self,
        contacts: &[Contact],
        options: &ExportOptions,
    ) -> Result<ExportFile> {
        let selected = Self::select(contacts, options, true);
        let mut table = ExportTable::new(
            self.stamped("contacts"),
            [
                "Name",
                "Email",
                "Phone",
                "Subject",
                "Category",
                "Status",
                "Priority",
                "Created Date",
                "Updated Date",
                "Message",
            ],
        );
        for c in &selected {
            table.push_row(vec![
                c.name.as_str().into(),
                c.email.as_str().into(),
                c.phone.clone().unwrap_or_default().into(),
                c.subject.as_str().into(),
                c.contact_type.as_str().into(),
                c.status.as_str().into(),
                c.priority.as_str().into(),
                Self::short(c.created_at),
                Self::short(c.updated_at),
                c.message.as_str().into(),
            ]);
        }
        Self::finish(&table, &selected, options)
    }

    /// Export the product catalog. Filters apply; the date range does not.
    pub fn export_products(
        &self,
        products: &[Product],
        options: &ExportOptions,
    ) -> Result<ExportFile> {
        let selected = Self::select(products, options, false);
        let mut table = ExportTable::new(
            self.stamped("products"),
            [
                "Name",
                "Category",
                "Status",
                "Featured",
                "Variants Count",
                "Total Stock",
                "Price Range",
                "Created Date",
                "Updated Date",
            ],
        );
        for p in &selected {
            let price_range = p
                .price_bounds()
                .map_or_else(|| "N/A".to_string(), |(lo, hi)| format!("₹{lo} - ₹{hi}"));
            table.push_row(vec![
                p.name.as_str().into(),
                p.category.as_str().into(),
                p.status().into(),
                if p.is_featured { "Yes" } else { "No" }.into(),
                p.variants.len().into(),
                p.total_stock().into(),
                price_range.into(),
                Self::short(p.created_at),
                Self::short(p.updated_at),
            ]);
        }
        Self::finish(&table, &selected, options)
    }

    /// Export FAQs. Filters apply; the date range does not.
    pub fn export_faqs(&self, faqs: &[Faq], options: &ExportOptions) -> Result<ExportFile> {
        let selected = Self::select(faqs, options, false);
        let mut table = ExportTable::new(
            self.stamped("faqs"),
            [
                "Question",
                "Answer",
                "Category",
                "Status",
                "Priority",
                "Views",
                "Helpful Count",
                "Not Helpful Count",
                "Created Date",
                "Updated Date",
            ],
        );
        for f in &selected {
            table.push_row(vec![
                f.question.as_str().into(),
                f.answer.as_str().into(),
                f.category.as_str().into(),
                f.status().into(),
                f.order.into(),
                f.views.into(),
                f.helpful.yes.into(),
                f.helpful.no.into(),
                Self::short(f.created_at),
                Self::short(f.updated_at),
            ]);
        }
        Self::finish(&table, &selected, options)
    }

    /// Export dashboard analytics.
    pub fn export_analytics(
        &self,
        data: &AnalyticsOverview,
        report: AnalyticsReport,
    ) -> Result<ExportFile> {
        if report == AnalyticsReport::Detailed {
            return ExportFile::json(&self.stamped("analytics_detailed"), data);
        }

        let change = |c: &Option<String>| -> Cell {
            match c.as_deref() {
                Some(s) if !s.is_empty() => s.into(),
                _ => "N/A".into(),
            }
        };
        let mut table = ExportTable::new(
            self.stamped("analytics_overview"),
            ["Metric", "Value", "Change"],
        );
        table.push_row(vec![
            "Total Products".into(),
            data.total_products.into(),
            change(&data.products_change),
        ]);
        table.push_row(vec![
            "Total Contacts".into(),
            data.total_contacts.into(),
            change(&data.contacts_change),
        ]);
        table.push_row(vec![
            "Total FAQs".into(),
            data.total_faqs.into(),
            change(&data.faqs_change),
        ]);
        table.push_row(vec![
            "Monthly Queries".into(),
            data.monthly_queries.into(),
            change(&data.queries_change),
        ]);
        table.push_row(vec![
            "Conversion Rate".into(),
            format!("{}%", data.conversion_rate.unwrap_or(0.0)).into(),
            change(&data.conversion_change),
        ]);
        Ok(ExportFile::from_table(&table, ExportFormat::Csv))
    }

    /// Contacts, products and FAQs as unfiltered CSV, plus the analytics
    /// overview.
    pub fn export_all(&self, bundle: &ExportBundle) -> Result<Vec<ExportFile>> {
        let csv = ExportOptions::new();
        Ok(vec![
            self.export_contacts(&bundle.contacts, &csv)?,
            self.export_products(&bundle.products, &csv)?,
            self.export_faqs(&bundle.faqs, &csv)?,
            self.export_analytics(&bundle.analytics, AnalyticsReport::Overview)?,
        ])
    }

    /// A Field/Value report of what was exported and when.
    pub fn export_summary(&self, stats: &ExportStats) -> ExportFile {
        let blank = || -> Vec<Cell> { vec!["".into(), "".into()] };
        let date_range = stats.date_range.map_or_else(
            || "All Time".to_string(),
            |r| {
                format!(
                    "{} to {}",
                    Self::format_date(r.start, DateStyle::Short),
                    Self::format_date(r.end, DateStyle::Short)
                )
            },
        );

        let mut table = ExportTable::new(self.stamped("export_summary"), ["Field", "Value"]);
        table.push_row(vec!["Export Summary Report".into(), "".into()]);
        table.push_row(vec![
            "Generated On".into(),
            Self::format_date(self.now, DateStyle::Long).into(),
        ]);
        table.push_row(blank());
        table.push_row(vec!["Data Exported".into(), "Count".into()]);
        table.push_row(vec!["Contacts".into(), stats.contacts_count.into()]);
        table.push_row(vec!["Products".into(), stats.products_count.into()]);
        table.push_row(vec!["FAQs".into(), stats.faqs_count.into()]);
        table.push_row(blank());
        table.push_row(vec!["Date Range".into(), date_range.into()]);
        ExportFile::from_table(&table, ExportFormat::Csv)
    }
}
