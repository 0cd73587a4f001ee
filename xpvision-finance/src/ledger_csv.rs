//! Parse transaction exports into raw transactions.
//!
//! Expected header (column order is free, `emotion_tag` optional):
//! date,description,amount,category,emotion_tag
//!
//! Dates are `YYYY-MM-DD`. Amounts are signed; a decimal comma ("-45,90")
//! and an "R$" prefix are accepted.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use xpvision_core::EmotionTag;

use crate::tagger::RawTransaction;

struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    category: Option<usize>,
    emotion_tag: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            date: find("date").context("missing `date` column")?,
            description: find("description").context("missing `description` column")?,
            amount: find("amount").context("missing `amount` column")?,
            category: find("category"),
            emotion_tag: find("emotion_tag"),
        })
    }
}

/// Parse a transactions CSV file
pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_ledger_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

/// Parse transactions CSV from any reader
pub fn parse_ledger_reader<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut columns: Option<Columns> = None;
    let mut txns = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;

        // Skip leading blank rows until the header
        let Some(cols) = columns.as_ref() else {
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            columns = Some(Columns::from_header(&record)?);
            continue;
        };

        let field = |i: usize| record.get(i).unwrap_or("").trim();

        let date_str = field(cols.date);
        if date_str.is_empty() {
            continue;
        }
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                log::warn!("row {}: skipping unparseable date {:?}: {}", line + 1, date_str, e);
                continue;
            }
        };

        let amount = match parse_amount(field(cols.amount)) {
            Some(a) => a,
            None => {
                log::warn!("row {}: skipping unparseable amount {:?}", line + 1, field(cols.amount));
                continue;
            }
        };

        let emotion_tag = cols.emotion_tag.map(field).filter(|s| !s.is_empty()).and_then(|s| {
            let tag = EmotionTag::from_tag(s);
            if tag.is_none() {
                log::warn!("row {}: ignoring unknown emotion tag {:?}", line + 1, s);
            }
            tag
        });

        txns.push(RawTransaction {
            date,
            description: field(cols.description).to_string(),
            amount,
            category: cols.category.map(field).unwrap_or("").to_string(),
            emotion_tag,
        });
    }

    if columns.is_none() {
        bail!("no header row found");
    }

    log::debug!("parsed {} transactions", txns.len());
    Ok(txns)
}

/// Parse "-45.90", "-45,90" or "R$ 1200" into a finite number
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace("R$", "").replace(' ', "");
    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };
    normalized.parse::<f64>().ok().filter(|a| a.is_finite())
}
