//! Formatting boundary between the aggregation engine and chart renderers.
//!
//! Payloads carry the rows exactly as the engine ordered them, plus the active
//! category and chart labels so a renderer never has to re-derive context.

use super::types::{
    AffiliationCount, AgeSummary, Aggregates, AggregationOptions, Category, CountryCount,
    GenderCount, MigrationCount,
};
use polars::prelude::*;
use serde::Serialize;

/// Output slots, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewName {
    CountryCounts,
    TopCountriesChartData,
    TopAffiliations,
    GenderCounts,
    MigrationCounts,
    AgeSample,
}

impl ViewName {
    pub const ALL: [Self; 6] = [
        Self::CountryCounts,
        Self::TopCountriesChartData,
        Self::TopAffiliations,
        Self::GenderCounts,
        Self::MigrationCounts,
        Self::AgeSample,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CountryCounts => "countryCounts",
            Self::TopCountriesChartData => "topCountriesChartData",
            Self::TopAffiliations => "topAffiliations",
            Self::GenderCounts => "genderCounts",
            Self::MigrationCounts => "migrationCounts",
            Self::AgeSample => "ageSample",
        }
    }
}

impl std::fmt::Display for ViewName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type with a fixed column layout.
pub trait TabularRow: Serialize {
    const COLUMNS: &'static [&'static str];

    /// Builds a frame with one column per entry of [`Self::COLUMNS`].
    fn frame(rows: &[Self]) -> PolarsResult<DataFrame>
    where
        Self: Sized;
}

fn counts<T>(rows: &[T], count: impl Fn(&T) -> usize) -> Vec<u64> {
    rows.iter().map(|r| count(r) as u64).collect()
}

impl TabularRow for CountryCount {
    const COLUMNS: &'static [&'static str] = &["country", "count"];

    fn frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        df!(
            "country" => rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
            "count" => counts(rows, |r| r.count)
        )
    }
}

impl TabularRow for AffiliationCount {
    const COLUMNS: &'static [&'static str] = &["affiliation", "count"];

    fn frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        df!(
            "affiliation" => rows.iter().map(|r| r.affiliation.as_str()).collect::<Vec<_>>(),
            "count" => counts(rows, |r| r.count)
        )
    }
}

impl TabularRow for GenderCount {
    const COLUMNS: &'static [&'static str] = &["gender", "count"];

    fn frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        df!(
            "gender" => rows.iter().map(|r| r.gender.label()).collect::<Vec<_>>(),
            "count" => counts(rows, |r| r.count)
        )
    }
}

impl TabularRow for MigrationCount {
    const COLUMNS: &'static [&'static str] = &["status", "count"];

    fn frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        df!(
            "status" => rows.iter().map(|r| r.status.label()).collect::<Vec<_>>(),
            "count" => counts(rows, |r| r.count)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRow {
    pub age: i32,
}

impl TabularRow for AgeRow {
    const COLUMNS: &'static [&'static str] = &["age"];

    fn frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        df!("age" => rows.iter().map(|r| r.age).collect::<Vec<_>>())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPayload<R> {
    pub view: ViewName,
    pub category: Category,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<R>,
}

impl<R: TabularRow> ViewPayload<R> {
    fn new(
        view: ViewName,
        category: Category,
        title: String,
        (x_label, y_label): (&'static str, &'static str),
        rows: Vec<R>,
    ) -> Self {
        Self {
            view,
            category,
            title,
            x_label,
            y_label,
            columns: R::COLUMNS,
            rows,
        }
    }

    /// # Errors
    ///
    /// Propagates polars frame construction errors.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        R::frame(&self.rows)
    }
}

/// The six payloads of one recompute cycle. Always built whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBundle {
    pub category: Category,
    pub country_counts: ViewPayload<CountryCount>,
    pub top_countries_chart_data: ViewPayload<CountryCount>,
    pub top_affiliations: ViewPayload<AffiliationCount>,
    pub gender_counts: ViewPayload<GenderCount>,
    pub migration_counts: ViewPayload<MigrationCount>,
    pub age_sample: ViewPayload<AgeRow>,
    /// Marginal summary drawn next to the age histogram; `None` when no record
    /// in the category has a known age.
    pub age_summary: Option<AgeSummary>,
}

impl ViewBundle {
    /// Frames keyed by view name, in emission order.
    ///
    /// # Errors
    ///
    /// Propagates polars frame construction errors.
    pub fn frames(&self) -> PolarsResult<Vec<(ViewName, DataFrame)>> {
        Ok(vec![
            (ViewName::CountryCounts, self.country_counts.to_dataframe()?),
            (
                ViewName::TopCountriesChartData,
                self.top_countries_chart_data.to_dataframe()?,
            ),
            (ViewName::TopAffiliations, self.top_affiliations.to_dataframe()?),
            (ViewName::GenderCounts, self.gender_counts.to_dataframe()?),
            (ViewName::MigrationCounts, self.migration_counts.to_dataframe()?),
            (ViewName::AgeSample, self.age_sample.to_dataframe()?),
        ])
    }

    pub fn titles(&self) -> [(ViewName, &str); 6] {
        [
            (ViewName::CountryCounts, self.country_counts.title.as_str()),
            (
                ViewName::TopCountriesChartData,
                self.top_countries_chart_data.title.as_str(),
            ),
            (ViewName::TopAffiliations, self.top_affiliations.title.as_str()),
            (ViewName::GenderCounts, self.gender_counts.title.as_str()),
            (ViewName::MigrationCounts, self.migration_counts.title.as_str()),
            (ViewName::AgeSample, self.age_sample.title.as_str()),
        ]
    }
}

/// Packages one category's aggregates into the six payloads.
pub fn emit_views(
    category: Category,
    aggregates: &Aggregates,
    options: &AggregationOptions,
) -> ViewBundle {
    let top_countries: Vec<CountryCount> = aggregates
        .country_counts
        .iter()
        .take(options.top_countries)
        .cloned()
        .collect();

    ViewBundle {
        category,
        country_counts: ViewPayload::new(
            ViewName::CountryCounts,
            category,
            format!("Geographical distribution for {category}"),
            ("Country", "Count"),
            aggregates.country_counts.clone(),
        ),
        top_countries_chart_data: ViewPayload::new(
            ViewName::TopCountriesChartData,
            category,
            format!("Top {} countries for {category}", options.top_countries),
            ("Country", "Count"),
            top_countries,
        ),
        top_affiliations: ViewPayload::new(
            ViewName::TopAffiliations,
            category,
            format!(
                "Top {} affiliations for {category}",
                options.top_affiliations
            ),
            ("Count", "Affiliation"),
            aggregates.top_affiliations.clone(),
        ),
        gender_counts: ViewPayload::new(
            ViewName::GenderCounts,
            category,
            format!("Gender distribution for {category}"),
            ("Gender", "Count"),
            aggregates.gender_counts.clone(),
        ),
        migration_counts: ViewPayload::new(
            ViewName::MigrationCounts,
            category,
            format!("Immigration distribution for {category}"),
            ("Status", "Count"),
            aggregates.migration_counts.clone(),
        ),
        age_sample: ViewPayload::new(
            ViewName::AgeSample,
            category,
            format!("Age distribution for {category}"),
            ("Age", "Probability"),
            aggregates
                .age_sample
                .ages
                .iter()
                .map(|&age| AgeRow { age })
                .collect(),
        ),
        age_summary: aggregates.age_sample.summary(),
    }
}
