#![expect(clippy::indexing_slicing)]

use super::super::aggregation::*;
use super::super::types::*;
use super::{FIXTURE, born_in, record, with_affiliations, with_countries};
use crate::dashboard::logic::io::{LoadOptions, load_dataset};
use crate::error::DashboardError;
use anyhow::Result;

#[test]
fn test_gender_counts_for_five_physicists() {
    let records: Vec<LaureateRecord> = [
        Gender::Male,
        Gender::Male,
        Gender::Female,
        Gender::Male,
        Gender::Female,
    ]
    .into_iter()
    .map(|g| record(Category::Physics, g))
    .collect();

    let subset = filter_by_category(&records, "Physics").expect("valid category");
    assert_eq!(subset.len(), 5);
    assert_eq!(
        compute_gender_counts(&subset),
        vec![
            GenderCount {
                gender: Gender::Male,
                count: 3
            },
            GenderCount {
                gender: Gender::Female,
                count: 2
            },
        ]
    );
}

#[test]
fn test_missing_death_country_counts_as_immigrant() {
    let records = vec![
        with_countries(
            record(Category::Peace, Gender::Male),
            Some("USA"),
            Some("USA"),
        ),
        with_countries(record(Category::Peace, Gender::Female), Some("USA"), None),
    ];
    let subset = subset_of(&records, Category::Peace);

    assert_eq!(
        compute_migration_status(&subset),
        vec![
            MigrationCount {
                status: MigrationStatus::Native,
                count: 1
            },
            MigrationCount {
                status: MigrationStatus::Immigrant,
                count: 1
            },
        ]
    );
}

#[test]
fn test_both_countries_missing_is_immigrant() {
    assert_eq!(
        MigrationStatus::classify(None, None),
        MigrationStatus::Immigrant
    );
    assert_eq!(
        MigrationStatus::classify(Some("usa"), Some("USA")),
        MigrationStatus::Immigrant,
        "comparison is exact"
    );
}

#[test]
fn test_affiliation_uses_text_before_first_comma() {
    let records = vec![with_affiliations(
        record(Category::Chemistry, Gender::Male),
        &["MIT, Cambridge, USA"],
    )];
    let subset = subset_of(&records, Category::Chemistry);

    assert_eq!(
        compute_top_affiliations(&subset, 10),
        vec![AffiliationCount {
            affiliation: "MIT".to_owned(),
            count: 1
        }]
    );
}

#[test]
fn test_affiliations_count_every_slot() {
    let records = vec![
        with_affiliations(
            record(Category::Physics, Gender::Male),
            &["Bell Labs, Murray Hill", "Stanford University, Stanford"],
        ),
        with_affiliations(
            record(Category::Physics, Gender::Male),
            &["Stanford University, Stanford", "  ,blank name"],
        ),
    ];
    let subset = subset_of(&records, Category::Physics);

    let ranked = compute_top_affiliations(&subset, 10);
    assert_eq!(
        ranked,
        vec![
            AffiliationCount {
                affiliation: "Stanford University".to_owned(),
                count: 2
            },
            AffiliationCount {
                affiliation: "Bell Labs".to_owned(),
                count: 1
            },
        ]
    );
}

#[test]
fn test_top_affiliations_truncates_and_sorts() {
    let names: Vec<String> = (0..15).map(|i| format!("Institute {i}, City")).collect();
    let mut records = Vec::new();
    for (i, name) in names.iter().enumerate() {
        // Institute i appears (i % 4) + 1 times.
        for _ in 0..=(i % 4) {
            records.push(with_affiliations(
                record(Category::Literature, Gender::Female),
                &[name.as_str()],
            ));
        }
    }
    let subset = subset_of(&records, Category::Literature);

    for n in [0, 1, 3, 10, 50] {
        let ranked = compute_top_affiliations(&subset, n);
        assert!(ranked.len() <= n, "n={n} returned {}", ranked.len());
        assert!(
            ranked.windows(2).all(|w| w[0].count >= w[1].count),
            "not sorted for n={n}: {ranked:?}"
        );
    }

    let top3: Vec<String> = compute_top_affiliations(&subset, 3)
        .into_iter()
        .map(|a| a.affiliation)
        .collect();
    assert_eq!(top3, vec!["Institute 3", "Institute 7", "Institute 11"]);
}

#[test]
fn test_country_ties_keep_first_seen_order() {
    let records = vec![
        born_in(record(Category::Physics, Gender::Male), "Sweden"),
        born_in(record(Category::Physics, Gender::Male), "Austria"),
        born_in(record(Category::Physics, Gender::Male), "Japan"),
        born_in(record(Category::Physics, Gender::Male), "Japan"),
        born_in(record(Category::Physics, Gender::Male), "Austria"),
        record(Category::Physics, Gender::Female),
    ];
    let subset = subset_of(&records, Category::Physics);

    let countries: Vec<(String, usize)> = compute_country_counts(&subset)
        .into_iter()
        .map(|c| (c.country, c.count))
        .collect();
    assert_eq!(
        countries,
        vec![
            ("Austria".to_owned(), 2),
            ("Japan".to_owned(), 2),
            ("Sweden".to_owned(), 1),
        ]
    );
}

#[test]
fn test_aggregations_are_idempotent() {
    let records = vec![
        born_in(
            with_affiliations(record(Category::Peace, Gender::Male), &["UN, Geneva"]),
            "Norway",
        ),
        born_in(
            with_affiliations(record(Category::Peace, Gender::Female), &["Red Cross, Geneva"]),
            "Kenya",
        ),
        born_in(
            with_affiliations(record(Category::Peace, Gender::Female), &["UN, New York"]),
            "Norway",
        ),
    ];
    let subset = subset_of(&records, Category::Peace);

    let options = AggregationOptions::default();
    assert_eq!(compute_all(&subset, &options), compute_all(&subset, &options));
    assert_eq!(
        compute_country_counts(&subset),
        compute_country_counts(&subset)
    );
}

#[test]
fn test_invalid_category_is_rejected() {
    let records = vec![record(Category::Physics, Gender::Male)];
    for bad in ["Mathematics", "physics", "Economics", "Physiology and Medicine"] {
        let err = filter_by_category(&records, bad).expect_err(bad);
        assert!(matches!(err, DashboardError::InvalidCategory(_)), "{bad}");
    }
}

#[test]
fn test_empty_subset_yields_empty_aggregates() {
    let records = vec![record(Category::Physics, Gender::Male)];
    let subset = filter_by_category(&records, "Literature").expect("valid category");
    assert!(subset.is_empty());

    let aggregates = compute_all(&subset, &AggregationOptions::default());
    assert!(aggregates.country_counts.is_empty());
    assert!(aggregates.top_affiliations.is_empty());
    assert!(aggregates.gender_counts.is_empty());
    assert!(aggregates.migration_counts.is_empty());
    assert!(aggregates.age_sample.is_empty());
    assert!(aggregates.age_sample.summary().is_none());
}

#[test]
fn test_age_sample_drops_missing_ages() {
    let mut with_age = record(Category::Chemistry, Gender::Female);
    with_age.age = Some(54);
    let records = vec![with_age, record(Category::Chemistry, Gender::Male)];
    let subset = subset_of(&records, Category::Chemistry);

    assert_eq!(compute_age_sample(&subset).ages, vec![54]);
}

#[test]
fn test_age_summary() {
    let sample = AgeSample {
        ages: vec![56, 36, 43, 47, 59, 40],
    };
    let summary = sample.summary().expect("non-empty");
    assert_eq!(summary.count, 6);
    assert_eq!(summary.min, 36);
    assert_eq!(summary.max, 59);
    assert!((summary.median - 45.0).abs() < f64::EPSILON);
    assert!((summary.mean - 46.833_333).abs() < 1e-3);
}

#[test]
fn test_counts_sum_to_subset_size_for_every_category() -> Result<()> {
    let dataset = load_dataset(FIXTURE.as_ref(), LoadOptions::default())?;

    for category in Category::ALL {
        let subset = filter_by_category(dataset.records(), category.label())?;
        let genders: usize = compute_gender_counts(&subset).iter().map(|g| g.count).sum();
        let migration: usize = compute_migration_status(&subset)
            .iter()
            .map(|m| m.count)
            .sum();

        assert_eq!(genders, subset.len(), "gender sum for {category}");
        assert_eq!(migration, subset.len(), "migration sum for {category}");
    }
    Ok(())
}

#[test]
fn test_fixture_chemistry_projections() -> Result<()> {
    let dataset = load_dataset(FIXTURE.as_ref(), LoadOptions::default())?;
    let subset = filter_by_category(dataset.records(), "Chemistry")?;

    let countries: Vec<(String, usize)> = compute_country_counts(&subset)
        .into_iter()
        .map(|c| (c.country, c.count))
        .collect();
    assert_eq!(
        countries,
        vec![("USA".to_owned(), 2), ("Egypt".to_owned(), 2)]
    );

    let affiliations = compute_top_affiliations(&subset, 10);
    assert_eq!(
        affiliations.first().map(|a| (a.affiliation.as_str(), a.count)),
        Some(("California Institute of Technology (Caltech)", 3))
    );
    assert_eq!(compute_age_sample(&subset).ages, vec![53, 62, 53, 54]);
    Ok(())
}
