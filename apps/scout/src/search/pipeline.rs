//! Candidate Search Pipeline: build query → Apollo call → extract → classify.
//!
//! Remote failures never escape as `Err`; they come back as a `SearchResult`
//! with `success = false`, no profiles, and the underlying error message.

use serde::Serialize;
use tracing::{info, warn};

use crate::apollo_client::ApolloClient;
use crate::search::classifier::CandidateFilter;
use crate::search::criteria::{RemoteQuery, SearchCriteria};
use crate::search::profiles::{extract_profiles, CandidateProfile};

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub success: bool,
    pub profiles: Vec<CandidateProfile>,
    pub total: usize,
    pub query: RemoteQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    fn found(profiles: Vec<CandidateProfile>, query: RemoteQuery) -> Self {
        Self {
            success: true,
            total: profiles.len(),
            profiles,
            query,
            error: None,
        }
    }

    fn failed(error: String, query: RemoteQuery) -> Self {
        Self {
            success: false,
            profiles: Vec::new(),
            total: 0,
            query,
            error: Some(error),
        }
    }
}

/// One search pass over a borrowed client and filter. Holds no state across calls.
pub struct CandidateSearch<'a> {
    client: &'a ApolloClient,
    filter: &'a dyn CandidateFilter,
}

impl<'a> CandidateSearch<'a> {
    pub fn new(client: &'a ApolloClient, filter: &'a dyn CandidateFilter) -> Self {
        Self { client, filter }
    }

    pub async fn run(&self, criteria: &SearchCriteria) -> SearchResult {
        let query = criteria.build_query();
        info!(
            "Searching Apollo for candidates in {}",
            query.person_locations.join(", ")
        );

        match self.client.search_people(&query).await {
            Ok(people) => {
                let profiles = extract_profiles(&people, self.filter);
                info!(
                    "Found {} matching candidates out of {} records",
                    profiles.len(),
                    people.len()
                );
                SearchResult::found(profiles, query)
            }
            Err(e) => {
                warn!("Apollo search failed: {e}");
                SearchResult::failed(e.to_string(), query)
            }
        }
    }
}

/// Fixed minimal search used by the connectivity check.
pub fn connectivity_criteria(limit: u32) -> SearchCriteria {
    SearchCriteria {
        keywords: Some("software engineer".to_string()),
        location: Some("United States".to_string()),
        seniority: Some(vec!["entry".to_string()].into()),
        titles: Some(vec!["software engineer".to_string()].into()),
        limit: Some(limit),
        page: None,
        variation: None,
    }
}
