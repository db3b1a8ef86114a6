use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{CandidateId, CandidateProfile, ResponseHistory};
use super::MatchError;

const LIST_SEPARATOR: char = ';';

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read crew roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid crew roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("crew roster row {row}: {source}")]
    Invalid { row: usize, source: MatchError },
}

/// Loads a candidate pool from a crewing roster export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateProfile>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CandidateProfile>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut profiles = Vec::new();

        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let profile = record?.into_profile();
            profile
                .validate()
                .map_err(|source| RosterImportError::Invalid {
                    row: index + 1,
                    source,
                })?;
            profiles.push(profile);
        }

        Ok(profiles)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    rank: String,
    #[serde(default, deserialize_with = "separated_set")]
    certifications: BTreeSet<String>,
    experience_years: f64,
    performance_rating: f64,
    availability_date: NaiveDate,
    #[serde(default, deserialize_with = "optional_date")]
    last_assignment_end: Option<NaiveDate>,
    #[serde(default, deserialize_with = "separated_set")]
    vessel_types: BTreeSet<String>,
    #[serde(default, deserialize_with = "separated_set")]
    preferred_routes: BTreeSet<String>,
    #[serde(default, deserialize_with = "separated_set")]
    languages: BTreeSet<String>,
    avg_response_hours: f64,
    acceptance_rate: f64,
    reliability_score: f64,
}

impl RosterRow {
    fn into_profile(self) -> CandidateProfile {
        CandidateProfile {
            id: CandidateId(self.id),
            name: self.name,
            rank: self.rank,
            certifications: self.certifications,
            experience_years: self.experience_years,
            performance_rating: self.performance_rating,
            availability_date: self.availability_date,
            last_assignment_end: self.last_assignment_end,
            vessel_types_experience: self.vessel_types,
            preferred_routes: self.preferred_routes,
            languages: self.languages,
            response_history: ResponseHistory {
                average_response_hours: self.avg_response_hours,
                acceptance_rate: self.acceptance_rate,
                reliability_score: self.reliability_score,
            },
        }
    }
}

fn separated_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect())
}

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(serde::de::Error::custom)
        })
        .transpose()
}
