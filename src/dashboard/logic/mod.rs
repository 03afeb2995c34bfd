pub mod aggregation;
pub mod io;
pub mod types;
pub mod views;

pub use aggregation::{
    compute_age_sample, compute_all, compute_country_counts, compute_gender_counts,
    compute_migration_status, compute_top_affiliations, filter_by_category, subset_of,
};
pub use io::{LoadOptions, load_dataset};
pub use types::{
    AffiliationCount, AgeSample, AgeSummary, Aggregates, AggregationOptions, Category,
    CountryCount, Dataset, Gender, GenderCount, LaureateRecord, MigrationCount, MigrationStatus,
};
pub use views::{AgeRow, TabularRow, ViewBundle, ViewName, ViewPayload, emit_views};

#[cfg(test)]
mod tests;
