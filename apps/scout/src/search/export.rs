//! Result Sink: writes a JSON record and a Markdown summary per search.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::search::criteria::RemoteQuery;
use crate::search::profiles::CandidateProfile;

const SEARCH_METHOD: &str = "Apollo.io API";
const SUMMARY_TOP_N: usize = 10;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    timestamp: &'a str,
    total_profiles: usize,
    search_method: &'a str,
    search_params: &'a RemoteQuery,
    profiles: &'a [CandidateProfile],
}

/// Where the two artifacts of one export landed.
#[derive(Debug, Clone, Serialize)]
pub struct SavedResults {
    pub json_file: PathBuf,
    pub md_file: PathBuf,
    pub count: usize,
}

/// Writes both files into `output_dir`, creating it when missing.
/// I/O failures are returned as-is; nothing is retried or cleaned up.
pub async fn save_results(
    output_dir: &Path,
    profiles: &[CandidateProfile],
    query: &RemoteQuery,
) -> Result<SavedResults, ExportError> {
    save_results_at(output_dir, profiles, query, Utc::now()).await
}

pub async fn save_results_at(
    output_dir: &Path,
    profiles: &[CandidateProfile],
    query: &RemoteQuery,
    now: DateTime<Utc>,
) -> Result<SavedResults, ExportError> {
    let timestamp = file_timestamp(now);

    tokio::fs::create_dir_all(output_dir).await?;

    let json_file = output_dir.join(format!("apollo-candidates-{timestamp}.json"));
    let record = ExportRecord {
        timestamp: &timestamp,
        total_profiles: profiles.len(),
        search_method: SEARCH_METHOD,
        search_params: query,
        profiles,
    };
    tokio::fs::write(&json_file, serde_json::to_string_pretty(&record)?).await?;

    let md_file = output_dir.join(format!("apollo-summary-{timestamp}.md"));
    let search_date = now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
    tokio::fs::write(&md_file, render_summary(profiles, query, &search_date)).await?;

    info!(
        "Saved {} profiles to {} and {}",
        profiles.len(),
        json_file.display(),
        md_file.display()
    );

    Ok(SavedResults {
        json_file,
        md_file,
        count: profiles.len(),
    })
}

/// `2024-05-01T13-45-09`: ISO-8601 to the second, with `:` replaced for file names.
fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

pub fn render_summary(profiles: &[CandidateProfile], query: &RemoteQuery, search_date: &str) -> String {
    let mut md = vec![
        "# Apollo LinkedIn Candidate Search Results\n".to_string(),
        format!("**Search Date:** {search_date}"),
        format!("**Total Candidates:** {}", profiles.len()),
        format!("**Search Method:** {SEARCH_METHOD}\n"),
    ];

    if !query.q_keywords.is_empty() {
        md.push("## Search Parameters".to_string());
        md.push(format!("- **Keywords:** {}", query.q_keywords));
        md.push(format!("- **Location:** {}", join_or_na(&query.person_locations)));
        md.push(format!("- **Seniority:** {}", join_or_na(&query.person_seniorities)));
        md.push(format!("- **Titles:** {}\n", join_or_na(&query.person_titles)));
    }

    md.push("## Top Candidates\n".to_string());

    for (index, profile) in profiles.iter().take(SUMMARY_TOP_N).enumerate() {
        md.push(format!("### {}. {}", index + 1, profile.full_name));
        md.push(format!("- **Title:** {}", profile.title));
        md.push(format!("- **Company:** {}", profile.company));
        md.push(format!("- **Location:** {}", profile.location));
        md.push(format!("- **LinkedIn:** {}", profile.linkedin_url));
        md.push(format!("- **Seniority:** {}\n", profile.seniority));
    }

    md.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::criteria::SearchCriteria;
    use chrono::TimeZone;

    fn profiles(n: usize) -> Vec<CandidateProfile> {
        (0..n)
            .map(|i| CandidateProfile {
                full_name: format!("Candidate {i}"),
                title: "Junior Developer".to_string(),
                company: "Acme".to_string(),
                location: "Austin, Texas".to_string(),
                linkedin_url: format!("https://www.linkedin.com/in/c{i}"),
                email: String::new(),
                seniority: "entry".to_string(),
                skills: vec![],
            })
            .collect()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 9).unwrap()
    }

    fn summary_entries(md: &str) -> usize {
        md.lines().filter(|l| l.starts_with("### ")).count()
    }

    #[test]
    fn test_file_timestamp_format() {
        assert_eq!(file_timestamp(fixed_now()), "2024-05-01T13-45-09");
    }

    #[tokio::test]
    async fn test_export_writes_both_files_with_counts() {
        let dir = tempfile::tempdir().unwrap();
        let query = SearchCriteria::default().build_query();

        for n in [0usize, 3, 10, 14] {
            let out = dir.path().join(format!("run-{n}"));
            let saved = save_results_at(&out, &profiles(n), &query, fixed_now())
                .await
                .unwrap();

            assert_eq!(saved.count, n);
            assert_eq!(
                saved.json_file.file_name().unwrap(),
                "apollo-candidates-2024-05-01T13-45-09.json"
            );

            let json: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(&saved.json_file).unwrap()).unwrap();
            assert_eq!(json["profiles"].as_array().unwrap().len(), n);
            assert_eq!(json["total_profiles"], n);
            assert_eq!(json["search_method"], "Apollo.io API");
            assert_eq!(json["timestamp"], "2024-05-01T13-45-09");
            assert_eq!(json["search_params"]["per_page"], 25);

            let md = std::fs::read_to_string(&saved.md_file).unwrap();
            assert_eq!(summary_entries(&md), n.min(10));
        }
    }

    #[tokio::test]
    async fn test_export_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        let query = SearchCriteria::default().build_query();

        save_results_at(&out, &profiles(1), &query, fixed_now()).await.unwrap();
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_export_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let query = SearchCriteria::default().build_query();

        let err = save_results_at(&blocker, &profiles(1), &query, fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_summary_lists_query_parameters() {
        let query = SearchCriteria::default().build_query();
        let md = render_summary(&profiles(1), &query, "2024-05-01 13:45:09");
        assert!(md.starts_with("# Apollo LinkedIn Candidate Search Results"));
        assert!(md.contains("**Total Candidates:** 1"));
        assert!(md.contains("- **Location:** United States"));
        assert!(md.contains("- **Seniority:** entry, junior"));
        assert!(md.contains("### 1. Candidate 0"));
        assert!(md.contains("- **LinkedIn:** https://www.linkedin.com/in/c0"));
    }

    #[test]
    fn test_summary_uses_na_for_empty_lists() {
        let mut query = SearchCriteria::default().build_query();
        query.person_titles.clear();
        let md = render_summary(&[], &query, "now");
        assert!(md.contains("- **Titles:** N/A"));
    }
}
