use super::types::{Category, Dataset, Gender, LaureateRecord};
use crate::error::{DashboardError, Result};
use anyhow::{Context as _, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

pub const CATEGORY_COLUMN: &str = "category";
pub const GENDER_COLUMN: &str = "gender";
pub const BIRTH_COUNTRY_NOW_COLUMN: &str = "birth_countryNow";
pub const BIRTH_COUNTRY_COLUMN: &str = "birth_country";
pub const DEATH_COUNTRY_COLUMN: &str = "death_country";
pub const BIRTH_DATE_COLUMN: &str = "birth_date";
pub const AWARD_DATE_COLUMN: &str = "dateAwarded";

/// Number of `affiliation_N` columns in the reference data.
pub const DEFAULT_AFFILIATION_SLOTS: usize = 4;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// How many `affiliation_1..affiliation_K` columns the source must carry.
    pub affiliation_slots: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            affiliation_slots: DEFAULT_AFFILIATION_SLOTS,
        }
    }
}

pub fn affiliation_column(slot: usize) -> String {
    format!("affiliation_{slot}")
}

/// Every column the loader refuses to run without.
pub fn required_columns(options: LoadOptions) -> Vec<String> {
    let mut columns: Vec<String> = [
        CATEGORY_COLUMN,
        GENDER_COLUMN,
        BIRTH_COUNTRY_NOW_COLUMN,
        BIRTH_COUNTRY_COLUMN,
        DEATH_COUNTRY_COLUMN,
        BIRTH_DATE_COLUMN,
        AWARD_DATE_COLUMN,
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();
    columns.extend((1..=options.affiliation_slots).map(affiliation_column));
    columns
}

/// Loads the laureate table once and freezes it into a [`Dataset`].
///
/// # Errors
///
/// Returns [`DashboardError::DataLoad`] if the file is missing or unparsable,
/// lacks a required column, or has a row with a missing/unknown category. No
/// partial dataset is ever returned. Rows without a recognised gender
/// (organisation laureates) are dropped with a warning instead.
pub fn load_dataset(path: &Path, options: LoadOptions) -> Result<Dataset> {
    let start = std::time::Instant::now();
    let records = load_records(path, options)
        .map_err(|e| DashboardError::DataLoad(format!("{}: {e:#}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Dataset loaded"
    );
    Ok(Dataset::with_source(records, path.to_path_buf()))
}

fn load_records(path: &Path, options: LoadOptions) -> anyhow::Result<Vec<LaureateRecord>> {
    if !path.is_file() {
        return Err(anyhow!("source file not found"));
    }

    // Schema inference is disabled so every column arrives as text and the
    // normalisation below owns all type decisions.
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .context("Failed to scan CSV")?
        .collect()
        .context("Failed to read CSV")?;

    records_from_frame(&df, options)
}

/// Validates and normalises an all-text frame into records.
///
/// Rows whose gender is blank or not male/female are skipped so every kept
/// record counts towards exactly one gender bucket.
pub fn records_from_frame(
    df: &DataFrame,
    options: LoadOptions,
) -> anyhow::Result<Vec<LaureateRecord>> {
    let missing: Vec<String> = required_columns(options)
        .into_iter()
        .filter(|name| df.get_column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(anyhow!("missing required column(s): {}", missing.join(", ")));
    }

    let categories = text_column(df, CATEGORY_COLUMN)?;
    let genders = text_column(df, GENDER_COLUMN)?;
    let birth_countries_now = text_column(df, BIRTH_COUNTRY_NOW_COLUMN)?;
    let birth_countries = text_column(df, BIRTH_COUNTRY_COLUMN)?;
    let death_countries = text_column(df, DEATH_COUNTRY_COLUMN)?;
    let birth_dates = text_column(df, BIRTH_DATE_COLUMN)?;
    let award_dates = text_column(df, AWARD_DATE_COLUMN)?;
    let affiliation_slots = (1..=options.affiliation_slots)
        .map(|slot| text_column(df, &affiliation_column(slot)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0_usize;
    for row in 0..df.height() {
        let line = row + 1;

        let category = cell_at(&categories, row)
            .ok_or_else(|| anyhow!("row {line}: missing category"))?
            .parse::<Category>()
            .map_err(|e| anyhow!("row {line}: {e}"))?;

        let raw_gender = cell_at(&genders, row);
        let Some(gender) = raw_gender.as_deref().and_then(Gender::normalize) else {
            tracing::debug!(row = line, gender = ?raw_gender, "Row without a recognised gender skipped");
            dropped += 1;
            continue;
        };

        let affiliations = affiliation_slots
            .iter()
            .filter_map(|slot| cell_at(slot, row))
            .filter(|raw| !raw.trim().is_empty())
            .collect();

        records.push(LaureateRecord::new(
            category,
            gender,
            cell_at(&birth_countries_now, row),
            cell_at(&birth_countries, row),
            cell_at(&death_countries, row),
            cell_at(&birth_dates, row).and_then(|raw| parse_date(line, &raw)),
            cell_at(&award_dates, row).and_then(|raw| parse_date(line, &raw)),
            affiliations,
        ));
    }

    if dropped > 0 {
        tracing::warn!(
            dropped,
            kept = records.len(),
            "Dropped rows without a recognised gender"
        );
    }
    Ok(records)
}

fn cell_at(column: &[Option<String>], row: usize) -> Option<String> {
    column.get(row).cloned().flatten()
}

/// Reads a column as owned optional strings; blank cells become `None`.
fn text_column(df: &DataFrame, name: &str) -> anyhow::Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .with_context(|| format!("Column {name} not found"))?
        .as_materialized_series();
    let as_text = series
        .cast(&DataType::String)
        .with_context(|| format!("Column {name} is not text"))?;
    let ca = as_text.str().map_err(|e| anyhow!(e))?;

    Ok(ca
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned))
        .collect())
}

/// Parses a calendar date. Partial dates such as `1943-00-00` yield `None`.
pub fn parse_date(line: usize, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim().trim_end_matches('Z');

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        });

    if parsed.is_none() {
        tracing::debug!(row = line, value = raw, "Unparsable date treated as missing");
    }
    parsed
}
