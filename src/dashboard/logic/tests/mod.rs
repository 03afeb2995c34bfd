use super::types::{Category, Gender, LaureateRecord};

mod aggregation;

pub(super) const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/laureates.csv");

/// Minimal record: only the fields a test cares about are set.
pub(super) fn record(category: Category, gender: Gender) -> LaureateRecord {
    LaureateRecord::new(category, gender, None, None, None, None, None, Vec::new())
}

pub(super) fn born_in(mut rec: LaureateRecord, now: &str) -> LaureateRecord {
    rec.birth_country_now = Some(now.to_owned());
    rec
}

pub(super) fn with_affiliations(mut rec: LaureateRecord, affiliations: &[&str]) -> LaureateRecord {
    rec.affiliations = affiliations.iter().map(|a| (*a).to_owned()).collect();
    rec
}

pub(super) fn with_countries(
    mut rec: LaureateRecord,
    birth: Option<&str>,
    death: Option<&str>,
) -> LaureateRecord {
    rec.birth_country = birth.map(str::to_owned);
    rec.death_country = death.map(str::to_owned);
    rec
}
