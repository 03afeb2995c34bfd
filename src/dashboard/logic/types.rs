use crate::error::DashboardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

// DATA STRUCTURES

/// The six award categories. Display labels match the source data exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Physics,
    Chemistry,
    #[serde(rename = "Physiology or Medicine")]
    PhysiologyOrMedicine,
    Literature,
    Peace,
    #[serde(rename = "Economic Sciences")]
    EconomicSciences,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Physics,
        Self::Chemistry,
        Self::PhysiologyOrMedicine,
        Self::Literature,
        Self::Peace,
        Self::EconomicSciences,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::PhysiologyOrMedicine => "Physiology or Medicine",
            Self::Literature => "Literature",
            Self::Peace => "Peace",
            Self::EconomicSciences => "Economic Sciences",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .ok_or_else(|| DashboardError::InvalidCategory(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Maps raw free text (`male`, ` Female `) onto the canonical label.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MigrationStatus {
    Native,
    Immigrant,
}

impl MigrationStatus {
    /// `Native` only when both countries are known and identical. A missing
    /// death country never equals a known birth country.
    pub fn classify(birth_country: Option<&str>, death_country: Option<&str>) -> Self {
        match (birth_country, death_country) {
            (Some(birth), Some(death)) if birth == death => Self::Native,
            _ => Self::Immigrant,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Native => "Native",
            Self::Immigrant => "Immigrant",
        }
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One laureate-per-prize row. A shared prize yields one record per laureate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaureateRecord {
    pub category: Category,
    pub gender: Gender,
    pub birth_country_now: Option<String>,
    pub birth_country: Option<String>,
    pub death_country: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub award_date: Option<NaiveDate>,
    pub age: Option<i32>,
    /// Non-empty raw affiliation texts in slot order.
    pub affiliations: Vec<String>,
}

impl LaureateRecord {
    /// Builds a record and derives `age` from the two dates.
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        category: Category,
        gender: Gender,
        birth_country_now: Option<String>,
        birth_country: Option<String>,
        death_country: Option<String>,
        birth_date: Option<NaiveDate>,
        award_date: Option<NaiveDate>,
        affiliations: Vec<String>,
    ) -> Self {
        Self {
            category,
            gender,
            birth_country_now,
            birth_country,
            death_country,
            age: age_at_award(birth_date, award_date),
            birth_date,
            award_date,
            affiliations,
        }
    }

    pub fn migration_status(&self) -> MigrationStatus {
        MigrationStatus::classify(self.birth_country.as_deref(), self.death_country.as_deref())
    }

    /// Canonical institution names, one per non-empty affiliation slot.
    pub fn canonical_affiliations(&self) -> impl Iterator<Item = &str> {
        self.affiliations
            .iter()
            .filter_map(|raw| canonical_affiliation(raw))
    }
}

/// Award year minus birth year; calendar position within the year is ignored.
pub fn age_at_award(birth_date: Option<NaiveDate>, award_date: Option<NaiveDate>) -> Option<i32> {
    use chrono::Datelike as _;
    Some(award_date?.year() - birth_date?.year())
}

/// Text before the first comma, or `None` when that text is blank.
pub fn canonical_affiliation(raw: &str) -> Option<&str> {
    let name = raw.split(',').next().unwrap_or_default().trim();
    (!name.is_empty()).then_some(name)
}

/// Immutable, cheaply clonable snapshot of the loaded record set.
///
/// Clones share the same allocation, so every controller and thread reads the
/// same records without locking.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[LaureateRecord]>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn from_records(records: Vec<LaureateRecord>) -> Self {
        Self {
            records: records.into(),
            source: None,
        }
    }

    pub(crate) fn with_source(records: Vec<LaureateRecord>, source: PathBuf) -> Self {
        Self {
            records: records.into(),
            source: Some(source),
        }
    }

    pub fn records(&self) -> &[LaureateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Record counts per category, in [`Category::ALL`] order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.records.iter().filter(|r| r.category == c).count()))
            .collect()
    }
}

// AGGREGATES

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffiliationCount {
    pub affiliation: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationCount {
    pub status: MigrationStatus,
    pub count: usize,
}

/// Non-null ages of the filtered subset, in subset order. Not pre-binned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgeSample {
    pub ages: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: usize,
    pub min: i32,
    pub max: i32,
    pub mean: f64,
    pub median: f64,
}

impl AgeSample {
    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Five-number style summary used to label a histogram; `None` when empty.
    pub fn summary(&self) -> Option<AgeSummary> {
        let mut sorted = self.ages.clone();
        sorted.sort_unstable();

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let count = sorted.len();
        let mean = sorted.iter().map(|&a| f64::from(a)).sum::<f64>() / count as f64;

        let mid = count / 2;
        let median = if count % 2 == 0 {
            let lo = f64::from(*sorted.get(mid - 1)?);
            let hi = f64::from(*sorted.get(mid)?);
            (lo + hi) / 2.0
        } else {
            f64::from(*sorted.get(mid)?)
        };

        Some(AgeSummary {
            count,
            min,
            max,
            mean,
            median,
        })
    }
}

/// The five projections computed for one category, in computation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub country_counts: Vec<CountryCount>,
    pub top_affiliations: Vec<AffiliationCount>,
    pub gender_counts: Vec<GenderCount>,
    pub migration_counts: Vec<MigrationCount>,
    pub age_sample: AgeSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationOptions {
    /// Rows kept in the top-countries chart payload.
    pub top_countries: usize,
    /// Entries kept by the affiliation ranking.
    pub top_affiliations: usize,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            top_countries: 10,
            top_affiliations: 10,
        }
    }
}
