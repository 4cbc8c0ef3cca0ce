//! CSV sink for the two output tables.
//!
//! Column order is fixed and the header row is always written, even for an
//! empty table. Unknown (`None`) fields render as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use dkharvest_core::{ProductRecord, ReviewRecord};

const PRODUCT_COLUMNS: [&str; 7] = [
    "id",
    "title_fa",
    "title_en",
    "selling_price",
    "rrp_price",
    "rating_avg",
    "rating_count",
];

const REVIEW_COLUMNS: [&str; 6] = [
    "product_id",
    "product_title",
    "comment_id",
    "created_at",
    "rating",
    "comment_text",
];

pub(crate) fn write_products(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_product_rows(file, records)
}

pub(crate) fn write_reviews(path: &Path, records: &[ReviewRecord]) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_review_rows(file, records)
}

fn write_product_rows<W: Write>(out: W, records: &[ProductRecord]) -> anyhow::Result<()> {
    // The header is written explicitly so an empty table still gets one.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(PRODUCT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_review_rows<W: Write>(out: W, records: &[ReviewRecord]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(REVIEW_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
