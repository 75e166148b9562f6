//! Command-line surface: default search, interactive search, connectivity test.
//!
//! Presentation lives here; the pipeline itself only logs through `tracing`.

pub mod display;
pub mod prompt;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::apollo_client::ApolloClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::search::classifier::{CandidateFilter, InternationalGraduateFilter};
use crate::search::criteria::{SearchCriteria, SearchVariation, StringList};
use crate::search::export::save_results;
use crate::search::pipeline::{connectivity_criteria, CandidateSearch, SearchResult};
use prompt::{Choice, Prompter};

const CONNECTIVITY_LIMIT: u32 = 5;
const INTERACTIVE_KEYWORDS: &str = "graduate OR student OR international OR visa OR OPT OR F1 OR H1B";
const INTERACTIVE_TITLES: &str = "software engineer, developer, analyst, associate, intern, graduate";
const LOCATIONS: &[&str] = &[
    "United States",
    "California, United States",
    "New York, United States",
    "Texas, United States",
    "Washington, United States",
    "Massachusetts, United States",
];

#[derive(Debug, Parser)]
#[command(
    name = "scout",
    version,
    about = "Find international and entry-level candidates through Apollo.io"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a search using the configured defaults, overridable by flags
    Search(SearchArgs),
    /// Build a search through interactive prompts
    Interactive(ExportArgs),
    /// Check Apollo connectivity and credentials
    Test,
    /// Start the HTTP API server
    Serve,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Keyword expression sent as q_keywords
    #[arg(long)]
    pub keywords: Option<String>,

    /// Target location (defaults to DEFAULT_LOCATION)
    #[arg(long)]
    pub location: Option<String>,

    /// Comma-separated seniority labels (defaults to DEFAULT_SENIORITY)
    #[arg(long)]
    pub seniority: Option<String>,

    /// Comma-separated job-title substrings
    #[arg(long)]
    pub titles: Option<String>,

    /// Number of candidates to request (defaults to DEFAULT_LIMIT, max 50 per page)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Result page, 1-indexed
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Preset keyword expression: international, visa, stem_opt, new_grad, student
    #[arg(long)]
    pub variation: Option<SearchVariation>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Directory for exported results (defaults to OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not write result files
    #[arg(long)]
    pub no_save: bool,
}

impl ExportArgs {
    fn output_dir(&self, config: &Config) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.clone())
    }
}

impl SearchArgs {
    /// Unset flags fall back to the environment-configured defaults.
    pub fn to_criteria(&self, config: &Config) -> SearchCriteria {
        SearchCriteria {
            keywords: self.keywords.clone(),
            location: Some(
                self.location
                    .clone()
                    .unwrap_or_else(|| config.default_location.clone()),
            ),
            seniority: Some(match &self.seniority {
                Some(csv) => StringList::from(csv.as_str()),
                None => StringList::from(config.default_seniority.clone()),
            }),
            titles: self.titles.as_deref().map(StringList::from),
            limit: Some(self.limit.unwrap_or(config.default_limit)),
            page: self.page,
            variation: self.variation,
        }
    }
}

struct Session {
    client: ApolloClient,
    filter: Arc<dyn CandidateFilter>,
}

impl Session {
    /// Fails with `NotConfigured` before any network call when the key is missing.
    fn open(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        let client = ApolloClient::new(api_key.to_string(), &config.apollo_base_url)?;
        Ok(Self {
            client,
            filter: Arc::new(InternationalGraduateFilter),
        })
    }

    async fn run(&self, criteria: &SearchCriteria) -> SearchResult {
        CandidateSearch::new(&self.client, self.filter.as_ref())
            .run(criteria)
            .await
    }
}

pub async fn run_search(args: SearchArgs, config: &Config) -> Result<()> {
    display::print_banner("Apollo LinkedIn Agent", "International Graduate Discovery Tool");
    let session = Session::open(config)?;

    let criteria = args.to_criteria(config);
    display::print_search_parameters(&criteria.build_query(), criteria.limit());

    let result = session.run(&criteria).await;
    if !result.success {
        display::print_search_failure(result.error.as_deref().unwrap_or("unknown error"));
        return Err(anyhow!("search failed"));
    }

    display::print_results(&result.profiles);

    if !result.profiles.is_empty() && !args.export.no_save {
        println!("{}", "\nSaving results...".yellow());
        let saved = save_results(&args.export.output_dir(config), &result.profiles, &result.query)
            .await
            .map_err(AppError::from)?;
        display::print_saved(&saved);
    }

    Ok(())
}

pub async fn run_interactive(args: ExportArgs, config: &Config) -> Result<()> {
    display::print_banner(
        "Apollo LinkedIn Interactive Search",
        "Configure your candidate search parameters",
    );
    let session = Session::open(config)?;

    let mut prompter = Prompter::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let criteria = ask_criteria(&mut prompter).await?;

    println!("{}", "\nStarting search with parameters:".cyan());
    display::print_search_parameters(&criteria.build_query(), criteria.limit());

    let result = session.run(&criteria).await;
    if !result.success {
        display::print_search_failure(result.error.as_deref().unwrap_or("unknown error"));
        return Err(anyhow!("search failed"));
    }

    display::print_results(&result.profiles);

    if !result.profiles.is_empty()
        && !args.no_save
        && prompter.confirm("Save results to files?", true).await?
    {
        let saved = save_results(&args.output_dir(config), &result.profiles, &result.query)
            .await
            .map_err(AppError::from)?;
        display::print_saved(&saved);
    }

    Ok(())
}

/// Walks the user through the five search questions.
pub async fn ask_criteria<R, W>(prompter: &mut Prompter<R, W>) -> std::io::Result<SearchCriteria>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let keywords = prompter.input("Search keywords:", INTERACTIVE_KEYWORDS).await?;

    let locations: Vec<Choice<&str>> = LOCATIONS.iter().map(|l| Choice::new(*l, *l)).collect();
    let location = prompter.select("Target location:", &locations, 0).await?;

    let seniority = prompter
        .multi_select(
            "Seniority levels:",
            &[
                Choice::new("Entry Level", "entry").checked(),
                Choice::new("Junior", "junior").checked(),
                Choice::new("Associate", "associate"),
            ],
        )
        .await?;

    let titles = prompter
        .input("Job titles (comma-separated):", INTERACTIVE_TITLES)
        .await?;

    let limit = prompter
        .select(
            "Number of candidates:",
            &[
                Choice::new("10 candidates", 10u32),
                Choice::new("25 candidates", 25),
                Choice::new("50 candidates", 50),
            ],
            1,
        )
        .await?;

    Ok(SearchCriteria {
        keywords: Some(keywords),
        location: Some(location.to_string()),
        seniority: Some(StringList::from(
            seniority.into_iter().map(str::to_string).collect::<Vec<_>>(),
        )),
        titles: Some(StringList::from(titles.as_str())),
        limit: Some(limit),
        page: None,
        variation: None,
    })
}

pub async fn run_connection_test(config: &Config) -> Result<()> {
    display::print_banner(
        "Apollo API Connection Test",
        "Testing Apollo.io API connectivity and authentication",
    );
    let session = Session::open(config)?;

    println!("{}", "Testing with minimal search parameters...".cyan());
    let result = session.run(&connectivity_criteria(CONNECTIVITY_LIMIT)).await;

    if !result.success {
        eprintln!("{}", "Apollo API test failed:".red());
        eprintln!("   Error: {}", result.error.as_deref().unwrap_or("unknown error"));
        eprintln!("{}", "\nSetup incomplete. Please check your API key and try again.".red());
        return Err(anyhow!("Apollo connection test failed"));
    }

    println!("{}", "Apollo API connection successful!".green());
    println!("   Found {} test candidates", result.total);
    if let Some(sample) = result.profiles.first() {
        display::print_sample(sample);
    }
    println!("{}", "\nApollo LinkedIn Agent is ready to use!".green());
    println!(
        "{}",
        "Run \"scout search\" for a default search or \"scout interactive\" for interactive mode"
            .dimmed()
    );
    Ok(())
}
