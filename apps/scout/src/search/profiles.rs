//! Profile Extractor: maps raw Apollo person records into `CandidateProfile`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::apollo_client::ApolloPerson;
use crate::search::classifier::CandidateFilter;

const DEFAULT_SENIORITY: &str = "entry";

/// Normalized, filtered representation of one returned person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub full_name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub linkedin_url: String,
    pub email: String,
    pub seniority: String,
    pub skills: Vec<String>,
}

impl CandidateProfile {
    /// Builds a profile, or None when the record has no LinkedIn URL.
    /// Empty strings count as absent throughout.
    pub fn from_person(person: &ApolloPerson) -> Option<Self> {
        let linkedin_url = present(&person.linkedin_url)?;

        Some(CandidateProfile {
            full_name: full_name(person.first_name.as_deref(), person.last_name.as_deref()),
            title: present(&person.title).unwrap_or_default(),
            company: person
                .organization
                .as_ref()
                .and_then(|o| present(&o.name))
                .unwrap_or_default(),
            location: format_location(person.city.as_deref(), person.state.as_deref()),
            linkedin_url,
            email: present(&person.email).unwrap_or_default(),
            seniority: present(&person.seniority).unwrap_or_else(|| DEFAULT_SENIORITY.to_string()),
            skills: person.skills.clone().unwrap_or_default(),
        })
    }
}

/// Runs every record through extraction and the filter, preserving Apollo's order.
pub fn extract_profiles(people: &[ApolloPerson], filter: &dyn CandidateFilter) -> Vec<CandidateProfile> {
    let mut profiles = Vec::new();
    let mut missing_url = 0usize;

    for person in people {
        let Some(profile) = CandidateProfile::from_person(person) else {
            missing_url += 1;
            continue;
        };
        if filter.matches(&profile) {
            profiles.push(profile);
        } else {
            debug!("Filtered out '{}' ({})", profile.full_name, profile.title);
        }
    }

    if missing_url > 0 {
        debug!("Skipped {missing_url} records without a LinkedIn URL");
    }

    profiles
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}

/// "city, state" when both are present, else whichever one is, else "".
fn format_location(city: Option<&str>, state: Option<&str>) -> String {
    let city = city.unwrap_or("");
    let state = state.unwrap_or("");
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city.to_string(),
        (true, false) => state.to_string(),
        (true, true) => String::new(),
    }
}
