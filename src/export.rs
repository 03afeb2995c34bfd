//! Writes emitted view bundles to disk for renderers that read files.

use crate::dashboard::logic::{ViewBundle, ViewName};
use crate::error::{Result, ResultExt as _};
use polars::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// One CSV per view
    #[default]
    Csv,
    /// A single `views.json` holding the whole bundle
    Json,
}

pub fn view_file_name(view: ViewName) -> String {
    format!("{}.csv", view.as_str())
}

/// Writes `df` as CSV with a header row.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Exports a bundle into `dir`, returning the written paths.
///
/// # Errors
///
/// Returns error if `dir` cannot be created or any file fails to write.
pub fn export_bundle(bundle: &ViewBundle, dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let written = match format {
        ExportFormat::Csv => {
            let mut written = Vec::new();
            for (view, mut df) in bundle.frames()? {
                let path = dir.join(view_file_name(view));
                save_csv(&mut df, &path)?;
                written.push(path);
            }
            written
        }
        ExportFormat::Json => {
            let path = dir.join("views.json");
            let content = serde_json::to_string_pretty(bundle)?;
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            vec![path]
        }
    };

    tracing::info!(
        category = %bundle.category,
        dir = %dir.display(),
        files = written.len(),
        "Views exported"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::logic::{
        AggregationOptions, Category, Dataset, Gender, LaureateRecord, compute_all, emit_views,
        subset_of,
    };

    fn bundle() -> ViewBundle {
        let dataset = Dataset::from_records(vec![LaureateRecord::new(
            Category::Literature,
            Gender::Female,
            Some("USA".to_owned()),
            Some("USA".to_owned()),
            Some("USA".to_owned()),
            chrono::NaiveDate::from_ymd_opt(1931, 2, 18),
            chrono::NaiveDate::from_ymd_opt(1993, 12, 10),
            vec!["Princeton University, Princeton, NJ, USA".to_owned()],
        )]);
        let options = AggregationOptions::default();
        let subset = subset_of(dataset.records(), Category::Literature);
        emit_views(Category::Literature, &compute_all(&subset, &options), &options)
    }

    #[test]
    fn test_csv_export_writes_every_view() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let written = export_bundle(&bundle(), dir.path(), ExportFormat::Csv)?;

        assert_eq!(written.len(), ViewName::ALL.len());
        for view in ViewName::ALL {
            assert!(dir.path().join(view_file_name(view)).is_file(), "{view} missing");
        }

        let affiliations = std::fs::read_to_string(dir.path().join("topAffiliations.csv"))?;
        let mut lines = affiliations.lines();
        assert_eq!(lines.next(), Some("affiliation,count"));
        assert_eq!(lines.next(), Some("Princeton University,1"));
        Ok(())
    }

    #[test]
    fn test_json_export_round_trips_names() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let written = export_bundle(&bundle(), dir.path(), ExportFormat::Json)?;
        assert_eq!(written, vec![dir.path().join("views.json")]);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("views.json"))?)?;
        assert_eq!(
            value.get("category").and_then(|v| v.as_str()),
            Some("Literature")
        );
        assert_eq!(
            value.pointer("/ageSample/rows/0/age").and_then(|v| v.as_i64()),
            Some(62)
        );
        assert_eq!(
            value.pointer("/migrationCounts/rows/0/status").and_then(|v| v.as_str()),
            Some("Native")
        );
        Ok(())
    }
}
