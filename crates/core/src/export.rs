//! CSV export of the (filtered) lead list, and the matching reader.

use chrono::NaiveDate;

use crate::budget::BudgetRange;
use crate::error::CoreError;
use crate::lead::Lead;
use crate::status::LeadStatus;
use crate::validation::DATE_FORMAT;

pub const CSV_HEADERS: [&str; 8] = [
    "Name",
    "Email",
    "Phone",
    "Budget",
    "Move-in Date",
    "Neighborhoods",
    "Status",
    "Created At",
];

/// Separator between neighborhood labels inside one cell.
pub const NEIGHBORHOOD_SEPARATOR: &str = "; ";

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Message used when there is nothing to export.
pub const EMPTY_EXPORT: &str = "No leads to export";

/// Always quote, doubling embedded quotes.
fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| csv_quote(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the export document for `leads`, one row per lead in the given
/// order. Refuses an empty set.
pub fn build_csv<'a, I>(leads: I) -> Result<String, CoreError>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut lines = vec![csv_row(CSV_HEADERS)];

    for lead in leads {
        lines.push(csv_row([
            lead.full_name.clone(),
            lead.email.clone(),
            lead.phone.clone(),
            lead.budget_range.short_label().to_string(),
            lead.move_in_date.format(DATE_FORMAT).to_string(),
            lead.neighborhoods.join(NEIGHBORHOOD_SEPARATOR),
            lead.status.as_str().to_string(),
            lead.created_at.format(CREATED_AT_FORMAT).to_string(),
        ]));
    }

    if lines.len() == 1 {
        return Err(CoreError::Validation(EMPTY_EXPORT.into()));
    }
    Ok(lines.join("\n"))
}

/// `leads-export-<YYYY-MM-DD>.csv`
pub fn export_filename(today: NaiveDate) -> String {
    format!("leads-export-{}.csv", today.format(DATE_FORMAT))
}

/// One data row read back from an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedRow {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub budget_range: BudgetRange,
    pub move_in_date: NaiveDate,
    pub neighborhoods: Vec<String>,
    pub status: LeadStatus,
    /// Minute precision, as written.
    pub created_at: String,
}

/// Parse an export produced by [`build_csv`].
///
/// The header row must match [`CSV_HEADERS`] exactly.
pub fn parse_csv(text: &str) -> Result<Vec<ExportedRow>, CoreError> {
    let mut records = parse_records(text).into_iter();

    let header = records
        .next()
        .ok_or_else(|| CoreError::Validation("CSV is empty".into()))?;
    if header != CSV_HEADERS {
        return Err(CoreError::Validation(format!(
            "Unexpected CSV header: {}",
            header.join(",")
        )));
    }

    records
        .enumerate()
        .map(|(i, record)| row_from_record(i + 2, record))
        .collect()
}

fn row_from_record(line: usize, record: Vec<String>) -> Result<ExportedRow, CoreError> {
    let bad = |what: &str| CoreError::Validation(format!("Line {line}: {what}"));

    let [name, email, phone, budget, move_in, neighborhoods, status, created_at]: [String; 8] =
        record
            .try_into()
            .map_err(|r: Vec<String>| bad(&format!("expected 8 columns, found {}", r.len())))?;

    Ok(ExportedRow {
        full_name: name,
        email,
        phone,
        budget_range: BudgetRange::from_short_label(&budget)
            .ok_or_else(|| bad(&format!("unknown budget '{budget}'")))?,
        move_in_date: NaiveDate::parse_from_str(&move_in, DATE_FORMAT)
            .map_err(|_| bad(&format!("invalid move-in date '{move_in}'")))?,
        neighborhoods: neighborhoods
            .split(NEIGHBORHOOD_SEPARATOR)
            .map(str::to_string)
            .collect(),
        status: status.parse().map_err(|_| bad(&format!("unknown status '{status}'")))?,
        created_at,
    })
}

/// Split CSV text into records, handling quoted fields that span commas,
/// doubled quotes and embedded newlines. Blank lines are skipped.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut touched = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                touched = true;
            }
            ',' => {
                record.push(std::mem::take(&mut current));
                touched = true;
            }
            '\r' => {}
            '\n' => {
                if touched || !current.is_empty() {
                    record.push(std::mem::take(&mut current));
                    records.push(std::mem::take(&mut record));
                }
                touched = false;
            }
            _ => {
                current.push(ch);
                touched = true;
            }
        }
    }
    if touched || !current.is_empty() {
        record.push(current);
        records.push(record);
    }
    records
}
