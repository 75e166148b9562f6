use std::sync::Arc;

use crate::apollo_client::ApolloClient;
use crate::errors::AppError;
use crate::search::classifier::CandidateFilter;
use crate::search::pipeline::CandidateSearch;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    /// None when `APOLLO_API_KEY` is unset; searches then fail as not configured.
    pub apollo: Option<ApolloClient>,
    /// Pluggable inclusion filter. Default: InternationalGraduateFilter.
    pub filter: Arc<dyn CandidateFilter>,
}

impl AppState {
    /// Returns the search pipeline, or `NotConfigured` before any network call
    /// when there is no credential.
    pub fn search(&self) -> Result<CandidateSearch<'_>, AppError> {
        let client = self.apollo.as_ref().ok_or_else(|| {
            AppError::NotConfigured("Apollo API key not configured".to_string())
        })?;
        Ok(CandidateSearch::new(client, self.filter.as_ref()))
    }
}
