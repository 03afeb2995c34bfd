//! Pure aggregation over a category-filtered subset of laureate records.
//!
//! Every function here is deterministic: grouping preserves the order in which
//! keys are first seen in the subset, and ranking uses a stable sort so equal
//! counts keep that first-seen order. Re-running on an unchanged subset
//! reproduces identical output without any secondary sort key.

use super::types::{
    AffiliationCount, AgeSample, Aggregates, AggregationOptions, Category, CountryCount,
    GenderCount, LaureateRecord, MigrationCount,
};
use crate::error::Result;
use std::collections::HashMap;
use std::hash::Hash;

/// Records of one category, borrowed from the dataset snapshot.
pub type Subset<'a> = Vec<&'a LaureateRecord>;

/// Selects the records of `category`.
///
/// The raw selection value is re-validated here even though the selector
/// should only ever offer the six known labels.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidCategory`](crate::error::DashboardError::InvalidCategory)
/// when `category` is not one of the six labels.
pub fn filter_by_category<'a>(records: &'a [LaureateRecord], category: &str) -> Result<Subset<'a>> {
    let category: Category = category.parse()?;
    Ok(subset_of(records, category))
}

pub fn subset_of(records: &[LaureateRecord], category: Category) -> Subset<'_> {
    records.iter().filter(|r| r.category == category).collect()
}

/// Counts keys, returning groups in first-seen order.
fn tally<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, usize)> = Vec::new();

    for key in keys {
        if let Some(&pos) = positions.get(&key) {
            if let Some(group) = groups.get_mut(pos) {
                group.1 += 1;
            }
        } else {
            positions.insert(key.clone(), groups.len());
            groups.push((key, 1));
        }
    }
    groups
}

/// Stable descending sort on count; ties keep first-seen order.
fn rank<K>(mut groups: Vec<(K, usize)>) -> Vec<(K, usize)> {
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}

pub fn compute_country_counts(subset: &[&LaureateRecord]) -> Vec<CountryCount> {
    let keys = subset
        .iter()
        .filter_map(|r| r.birth_country_now.as_deref());

    rank(tally(keys))
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_owned(),
            count,
        })
        .collect()
}

/// Ranks canonical affiliation names across every slot of every record.
///
/// A record listing two institutions contributes one count to each.
pub fn compute_top_affiliations(subset: &[&LaureateRecord], n: usize) -> Vec<AffiliationCount> {
    let keys = subset.iter().flat_map(|r| r.canonical_affiliations());

    let mut ranked = rank(tally(keys));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(affiliation, count)| AffiliationCount {
            affiliation: affiliation.to_owned(),
            count,
        })
        .collect()
}

pub fn compute_gender_counts(subset: &[&LaureateRecord]) -> Vec<GenderCount> {
    tally(subset.iter().map(|r| r.gender))
        .into_iter()
        .map(|(gender, count)| GenderCount { gender, count })
        .collect()
}

pub fn compute_migration_status(subset: &[&LaureateRecord]) -> Vec<MigrationCount> {
    tally(subset.iter().map(|r| r.migration_status()))
        .into_iter()
        .map(|(status, count)| MigrationCount { status, count })
        .collect()
}

pub fn compute_age_sample(subset: &[&LaureateRecord]) -> AgeSample {
    AgeSample {
        ages: subset.iter().filter_map(|r| r.age).collect(),
    }
}

/// Runs the five projections in their fixed order.
pub fn compute_all(subset: &[&LaureateRecord], options: &AggregationOptions) -> Aggregates {
    Aggregates {
        country_counts: compute_country_counts(subset),
        top_affiliations: compute_top_affiliations(subset, options.top_affiliations),
        gender_counts: compute_gender_counts(subset),
        migration_counts: compute_migration_status(subset),
        age_sample: compute_age_sample(subset),
    }
}
