//! Request Builder: normalizes caller-supplied criteria into Apollo's query shape.
//!
//! Every field is optional and defaulted or coerced; building a query never fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_KEYWORDS: &str = "graduate OR student OR international OR visa OR OPT OR F1 OR H1B OR recent graduate OR new graduate";
pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_SENIORITIES: &[&str] = &["entry", "junior"];
pub const DEFAULT_TITLES: &[&str] = &[
    "software engineer",
    "developer",
    "analyst",
    "associate",
    "intern",
    "graduate",
    "new grad",
];
pub const DEFAULT_LIMIT: u32 = 25;
/// Apollo's per-page ceiling.
pub const MAX_PER_PAGE: u32 = 50;

// ────────────────────────────────────────────────────────────────────────────
// Search variations
// ────────────────────────────────────────────────────────────────────────────

/// Preset keyword expressions selectable by name instead of free-form keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchVariation {
    International,
    Visa,
    StemOpt,
    NewGrad,
    Student,
}

impl SearchVariation {
    pub const ALL: [SearchVariation; 5] = [
        SearchVariation::International,
        SearchVariation::Visa,
        SearchVariation::StemOpt,
        SearchVariation::NewGrad,
        SearchVariation::Student,
    ];

    pub fn keywords(self) -> &'static str {
        match self {
            SearchVariation::International => DEFAULT_KEYWORDS,
            SearchVariation::Visa => "visa OR sponsorship OR H1B OR work authorization",
            SearchVariation::StemOpt => "STEM OPT OR OPT OR F1 OR F-1 OR international student",
            SearchVariation::NewGrad => "new grad OR recent graduate OR graduate OR entry level",
            SearchVariation::Student => "graduate OR student OR international OR visa OR OPT OR F1 OR H1B",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchVariation::International => "international",
            SearchVariation::Visa => "visa",
            SearchVariation::StemOpt => "stem_opt",
            SearchVariation::NewGrad => "new_grad",
            SearchVariation::Student => "student",
        }
    }
}

impl fmt::Display for SearchVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchVariation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        SearchVariation::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = SearchVariation::ALL.iter().map(|v| v.name()).collect();
                format!("unknown search variation '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Caller input
// ────────────────────────────────────────────────────────────────────────────

/// A list field that callers may send as one value, a comma-delimited string,
/// or a proper list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Many(Vec<String>),
    One(String),
}

impl StringList {
    /// Splits delimited strings on commas, trims every entry, drops empty ones.
    pub fn normalize(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            StringList::Many(items) => items.iter().map(String::as_str).collect(),
            StringList::One(s) => s.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        StringList::Many(items)
    }
}

impl From<&str> for StringList {
    fn from(s: &str) -> Self {
        StringList::One(s.to_string())
    }
}

/// Caller-supplied search criteria. Unset fields take the documented defaults
/// when the query is built.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub seniority: Option<StringList>,
    pub titles: Option<StringList>,
    #[serde(default, deserialize_with = "coerce_count")]
    pub limit: Option<u32>,
    #[serde(default, deserialize_with = "coerce_count")]
    pub page: Option<u32>,
    pub variation: Option<SearchVariation>,
}

/// Accepts numbers and numeric strings; anything else is treated as unset.
fn coerce_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }))
}

impl SearchCriteria {
    /// Caller-visible limit. Not clamped; only `per_page` is.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Effective keyword expression: a selected variation wins over free text.
    pub fn keywords(&self) -> String {
        match (self.variation, &self.keywords) {
            (Some(variation), _) => variation.keywords().to_string(),
            (None, Some(keywords)) => keywords.clone(),
            (None, None) => DEFAULT_KEYWORDS.to_string(),
        }
    }

    pub fn build_query(&self) -> RemoteQuery {
        let location = self
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        RemoteQuery {
            q_keywords: self.keywords(),
            person_locations: vec![location],
            person_seniorities: normalized_or(&self.seniority, DEFAULT_SENIORITIES),
            person_titles: normalized_or(&self.titles, DEFAULT_TITLES),
            // 1-indexed; page 0 means the first page.
            page: self.page.filter(|p| *p > 0).unwrap_or(1),
            per_page: self.limit().min(MAX_PER_PAGE),
        }
    }
}

fn normalized_or(list: &Option<StringList>, defaults: &[&str]) -> Vec<String> {
    match list {
        Some(list) => list.normalize(),
        None => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outbound query
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /people/search`. Built once per search; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteQuery {
    pub q_keywords: String,
    pub person_locations: Vec<String>,
    pub person_seniorities: Vec<String>,
    pub person_titles: Vec<String>,
    pub page: u32,
    pub per_page: u32,
}
