use super::{CSV_HEADER, DailyRecord, Format};
use crate::Result;
use ohno::{IntoAppError, bail};

const LOG_TARGET: &str = "   dataset";

/// Merge `record` into an existing serialized dataset and return the re-serialized result.
///
/// `existing` is `None` when no dataset file exists yet. Empty or whitespace-only content is
/// treated the same way. A record already present for `record.date` is replaced in place;
/// otherwise the record is appended.
///
/// Content that exists but cannot be understood as a dataset in `format` is an error, so a
/// damaged file is never silently replaced by a fresh one.
pub fn merge(existing: Option<&str>, format: Format, record: &DailyRecord) -> Result<String> {
    let existing = existing.filter(|text| !text.trim().is_empty());

    match format {
        Format::Json => merge_json(existing, record),
        Format::Csv => merge_csv(existing, record),
    }
}

fn merge_json(existing: Option<&str>, record: &DailyRecord) -> Result<String> {
    let mut records: Vec<DailyRecord> = match existing {
        Some(text) => serde_json::from_str(text).into_app_err("existing stats file is not a valid JSON dataset")?,
        None => {
            log::info!(target: LOG_TARGET, "No existing dataset, starting a new one");
            Vec::with_capacity(1)
        }
    };

    if let Some(slot) = records.iter_mut().find(|r| r.date == record.date) {
        log::info!(target: LOG_TARGET, "Replacing existing record for {}", record.date);
        *slot = *record;
    } else {
        log::info!(target: LOG_TARGET, "Appending record for {}", record.date);
        records.push(*record);
    }

    Ok(serde_json::to_string_pretty(&records)?)
}

fn merge_csv(existing: Option<&str>, record: &DailyRecord) -> Result<String> {
    let line = csv_line(record)?;

    let Some(text) = existing else {
        log::info!(target: LOG_TARGET, "No existing dataset, starting a new one");
        return Ok(format!("{CSV_HEADER}\n{line}"));
    };

    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .collect();

    match lines.first() {
        Some(&header) if header.trim() == CSV_HEADER => {}
        Some(&header) => bail!("existing stats file is not a valid CSV dataset: unexpected header '{header}'"),
        None => bail!("existing stats file is not a valid CSV dataset: missing header"),
    }

    let date = record.date_string();
    if let Some(slot) = lines.iter_mut().skip(1).find(|l| l.starts_with(&date)) {
        log::info!(target: LOG_TARGET, "Replacing existing record for {date}");
        *slot = &line;
    } else {
        log::info!(target: LOG_TARGET, "Appending record for {date}");
        lines.push(&line);
    }

    Ok(lines.join("\n"))
}

/// Render a single record as a CSV data line, without a trailing newline.
fn csv_line(record: &DailyRecord) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(&mut buf);
        writer.serialize(record)?;
        writer.flush()?;
    }

    let text = String::from_utf8(buf).into_app_err("CSV writer produced invalid UTF-8")?;
    Ok(text.trim_end().to_string())
}
