use colored::Colorize;

use crate::search::criteria::RemoteQuery;
use crate::search::export::SavedResults;
use crate::search::profiles::CandidateProfile;

const RULE_WIDTH: usize = 60;

pub fn format_results(profiles: &[CandidateProfile]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = vec![
        String::new(),
        rule.clone(),
        "APOLLO LINKEDIN SEARCH RESULTS".to_string(),
        rule.clone(),
    ];

    if profiles.is_empty() {
        out.push("No candidates found matching the criteria.".to_string());
        return out.join("\n");
    }

    for (index, profile) in profiles.iter().enumerate() {
        out.push(format!("\n{}. {}", index + 1, profile.full_name));
        out.push(format!("   Title: {}", profile.title));
        out.push(format!("   Company: {}", profile.company));
        out.push(format!("   Location: {}", profile.location));
        out.push(format!("   LinkedIn: {}", profile.linkedin_url));
        out.push(format!("   Seniority: {}", profile.seniority));
    }

    out.push(format!("\n{rule}"));
    out.join("\n")
}

pub fn format_query(query: &RemoteQuery, limit: u32) -> String {
    [
        format!("  Keywords: {}", query.q_keywords),
        format!("  Location: {}", query.person_locations.join(", ")),
        format!("  Seniority: {}", query.person_seniorities.join(", ")),
        format!("  Titles: {}", query.person_titles.join(", ")),
        format!("  Limit: {limit}"),
    ]
    .join("\n")
}

pub fn print_banner(title: &str, subtitle: &str) {
    println!("{}", title.blue().bold());
    println!("{}\n", subtitle.dimmed());
}

pub fn print_search_parameters(query: &RemoteQuery, limit: u32) {
    println!("{}", "Search Parameters:".cyan());
    println!("{}\n", format_query(query, limit));
}

pub fn print_results(profiles: &[CandidateProfile]) {
    println!("{}", format_results(profiles));
}

pub fn print_saved(saved: &SavedResults) {
    println!("{}", "Results saved:".green());
    println!("   JSON: {}", saved.json_file.display());
    println!("   Summary: {}", saved.md_file.display());
    println!("   Total candidates: {}", saved.count);
}

pub fn print_search_failure(error: &str) {
    eprintln!("{}", format!("Search failed: {error}").red());
}

pub fn print_sample(profile: &CandidateProfile) {
    println!("{}", "\nSample candidate:".cyan());
    println!("   Name: {}", profile.full_name);
    println!("   Title: {}", profile.title);
    println!("   Company: {}", profile.company);
    println!("   Location: {}", profile.location);
}
