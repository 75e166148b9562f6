//! Candidate classification: pluggable, trait-based inclusion filter.
//!
//! Default: `InternationalGraduateFilter`, a keyword heuristic that favors
//! recall. It does not verify anyone's actual work-authorization status.
//!
//! `AppState` holds an `Arc<dyn CandidateFilter>`, chosen at startup.

use crate::search::profiles::CandidateProfile;

/// Matched against `lowercase(title + " " + full_name)`.
pub const INTERNATIONAL_KEYWORDS: &[&str] = &[
    "international",
    "opt",
    "f-1",
    "visa",
    "sponsorship",
    "work authorization",
    "stem opt",
    "recent graduate",
    "new grad",
];

/// Matched against the lowercased title only.
pub const ENTRY_LEVEL_TITLE_KEYWORDS: &[&str] =
    &["graduate", "entry", "junior", "associate", "intern", "new grad"];

/// The inclusion test applied to every extracted profile.
pub trait CandidateFilter: Send + Sync {
    fn matches(&self, profile: &CandidateProfile) -> bool;
}

/// Which halves of the heuristic fired for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub international_indicator: bool,
    pub entry_level: bool,
}

impl Classification {
    /// Either signal is enough.
    pub fn is_match(&self) -> bool {
        self.international_indicator || self.entry_level
    }
}

pub fn classify(profile: &CandidateProfile) -> Classification {
    let text = format!("{} {}", profile.title, profile.full_name).to_lowercase();
    let title = profile.title.to_lowercase();

    let international_indicator = INTERNATIONAL_KEYWORDS.iter().any(|kw| text.contains(kw));
    let entry_level = profile.seniority.eq_ignore_ascii_case("entry")
        || ENTRY_LEVEL_TITLE_KEYWORDS.iter().any(|kw| title.contains(kw));

    Classification {
        international_indicator,
        entry_level,
    }
}

pub struct InternationalGraduateFilter;

impl CandidateFilter for InternationalGraduateFilter {
    fn matches(&self, profile: &CandidateProfile) -> bool {
        classify(profile).is_match()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(full_name: &str, title: &str, seniority: &str) -> CandidateProfile {
        CandidateProfile {
            full_name: full_name.to_string(),
            title: title.to_string(),
            company: String::new(),
            location: String::new(),
            linkedin_url: "https://www.linkedin.com/in/x".to_string(),
            email: String::new(),
            seniority: seniority.to_string(),
            skills: vec![],
        }
    }

    #[test]
    fn test_every_international_keyword_keeps_senior_profile() {
        for kw in INTERNATIONAL_KEYWORDS {
            let p = profile("Pat Doe", &format!("Senior Engineer ({})", kw.to_uppercase()), "senior");
            let c = classify(&p);
            assert!(c.international_indicator, "keyword {kw}");
            assert!(InternationalGraduateFilter.matches(&p), "keyword {kw}");
        }
    }

    #[test]
    fn test_international_keyword_in_name_counts() {
        let p = profile("Visa Virtanen", "Director", "director");
        assert!(classify(&p).international_indicator);
        assert!(InternationalGraduateFilter.matches(&p));
    }

    #[test]
    fn test_entry_seniority_any_case_is_entry_level() {
        for s in ["entry", "Entry", "ENTRY"] {
            let c = classify(&profile("Sam Lee", "Accountant", s));
            assert!(c.entry_level, "seniority {s}");
        }
    }

    #[test]
    fn test_entry_level_title_keywords() {
        for kw in ENTRY_LEVEL_TITLE_KEYWORDS {
            let p = profile("Sam Lee", &format!("Senior {kw} Partner"), "senior");
            assert!(classify(&p).entry_level, "keyword {kw}");
        }
    }

    /// The filter is a logical OR of the two signals, not AND. An entry-level
    /// profile with no visa/international signal is still kept.
    #[test]
    fn test_or_behavior_keeps_entry_level_without_international_signal() {
        let p = profile("Sam Lee", "Accountant", "entry");
        let c = classify(&p);
        assert!(!c.international_indicator);
        assert!(c.entry_level);
        assert!(c.is_match());
        assert!(InternationalGraduateFilter.matches(&p));
    }

    #[test]
    fn test_or_behavior_keeps_international_signal_without_entry_level() {
        let c = classify(&profile("Sam Lee", "Manager, visa sponsorship", "manager"));
        assert!(c.international_indicator);
        assert!(!c.entry_level);
        assert!(c.is_match());
    }

    #[test]
    fn test_senior_manager_is_excluded() {
        let p = profile("Sam Lee", "Senior Manager", "senior");
        assert_eq!(
            classify(&p),
            Classification {
                international_indicator: false,
                entry_level: false,
            }
        );
        assert!(!InternationalGraduateFilter.matches(&p));
    }

    #[test]
    fn test_opt_substring_matches_broadly() {
        // "opt" is a plain substring match, so "Optimization" fires too.
        let p = profile("Sam Lee", "Optimization Lead", "senior");
        assert!(classify(&p).international_indicator);
    }
}
