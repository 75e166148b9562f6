//! Apollo Client: the single point of entry for Apollo.io API calls.
//!
//! One request per search: no retries, no pagination beyond the requested
//! page. The API key only ever leaves the process in the `X-Api-Key` header.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::search::criteria::RemoteQuery;

const PEOPLE_SEARCH_PATH: &str = "/people/search";
/// Exceeding this is a failure, never a retry trigger.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApolloError {
    #[error("timeout of {0}ms exceeded")]
    Timeout(u128),

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("{0}")]
    Http(reqwest::Error),

    #[error("Invalid response body: {0}")]
    Parse(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// One person record as returned by `/people/search`. Every field may be
/// absent or null.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApolloPerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub organization: Option<ApolloOrganization>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
    pub seniority: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApolloOrganization {
    pub name: Option<String>,
}

/// `people` stays raw so one malformed record cannot sink the whole page.
#[derive(Debug, Deserialize)]
struct PeopleSearchResponse {
    #[serde(default)]
    people: Option<Vec<serde_json::Value>>,
}

/// Wraps the Apollo people-search endpoint. Cheap to clone; the underlying
/// reqwest client is shared.
#[derive(Clone)]
pub struct ApolloClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ApolloClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, ApolloError> {
        Self::with_timeout(api_key, base_url, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        api_key: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ApolloError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApolloError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Issues one `POST /people/search` and returns the raw person records.
    /// Only HTTP 200 counts as success; a missing `people` field is an empty list.
    pub async fn search_people(&self, query: &RemoteQuery) -> Result<Vec<ApolloPerson>, ApolloError> {
        let url = format!("{}{}", self.base_url, PEOPLE_SEARCH_PATH);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Api-Key", &self.api_key)
            .header("Cache-Control", "no-cache")
            .json(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApolloError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let parsed: PeopleSearchResponse =
            serde_json::from_str(&body).map_err(|e| ApolloError::Parse(e.to_string()))?;
        let people = decode_people(parsed.people.unwrap_or_default());

        debug!("Apollo returned {} person records", people.len());
        Ok(people)
    }

    fn classify(&self, err: reqwest::Error) -> ApolloError {
        if err.is_timeout() {
            ApolloError::Timeout(self.timeout.as_millis())
        } else {
            ApolloError::Http(err)
        }
    }
}

fn decode_people(raw: Vec<serde_json::Value>) -> Vec<ApolloPerson> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<ApolloPerson>(value) {
            Ok(person) => Some(person),
            Err(e) => {
                debug!("Skipping malformed person record #{index}: {e}");
                None
            }
        })
        .collect()
}
