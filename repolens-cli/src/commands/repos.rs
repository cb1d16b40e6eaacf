//! Repository listing, detail and language commands.

use chrono::Utc;
use clap::Args;
use repolens::analysis::{
    activity_score, classify, filter_repositories, format_relative_time, format_size,
    language_color, sort_repositories, RepoFilter, SortDirection, SortKey,
};
use repolens::api::{RepoListParams, ShowcaseClient};
use repolens::config::Config;

use crate::error::CliError;

/// Arguments for the listing command.
#[derive(Debug, Args)]
pub struct ReposArgs {
    /// Sort key: stars, forks, name, updated, size
    #[arg(long, default_value = "stars")]
    pub sort: String,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "desc")]
    pub direction: String,

    /// Keep only repositories in this language
    #[arg(long)]
    pub language: Option<String>,

    /// Keep only repositories with at least this many stars
    #[arg(long)]
    pub min_stars: Option<i64>,

    /// Substring match against name and description
    #[arg(long)]
    pub search: Option<String>,

    /// Exclude archived repositories
    #[arg(long)]
    pub no_archived: bool,

    /// Warm the detail cache for the leading repositories
    #[arg(long)]
    pub prefetch: bool,
}

pub(crate) fn parse_sort_key(value: &str) -> Result<SortKey, CliError> {
    match value {
        "stars" => Ok(SortKey::Stars),
        "forks" => Ok(SortKey::Forks),
        "name" => Ok(SortKey::Name),
        "updated" => Ok(SortKey::Updated),
        "size" => Ok(SortKey::Size),
        other => Err(CliError::InvalidArg(format!("unknown sort key '{}'", other))),
    }
}

pub(crate) fn parse_direction(value: &str) -> Result<SortDirection, CliError> {
    match value {
        "asc" => Ok(SortDirection::Ascending),
        "desc" => Ok(SortDirection::Descending),
        other => Err(CliError::InvalidArg(format!(
            "unknown sort direction '{}'",
            other
        ))),
    }
}

/// List showcased repositories.
pub async fn run_list(args: ReposArgs) -> Result<(), CliError> {
    let key = parse_sort_key(&args.sort)?;
    let direction = parse_direction(&args.direction)?;

    let config = Config::from_env()?;
    let client = ShowcaseClient::new(&config)?;

    let listing = client.get_repositories(&RepoListParams::default()).await?;

    let filter = RepoFilter {
        language: args.language.clone(),
        min_stars: args.min_stars,
        include_archived: !args.no_archived,
        query: args.search.clone(),
        ..RepoFilter::default()
    };
    let mut repos = filter_repositories(listing.repositories, &filter);
    sort_repositories(&mut repos, key, direction);

    let now = Utc::now();
    for repo in &repos {
        let language = repo.language.as_deref().unwrap_or("-");
        println!(
            "{:<32} ★ {:<6} {:<12} {:<10} {:>9}  updated {}",
            repo.full_name,
            repo.stargazers_count,
            language,
            classify(repo, now).as_str(),
            format_size(repo.size_kb as usize * 1024),
            format_relative_time(repo.updated_at, now),
        );
    }

    if args.prefetch {
        let warmed = client.prefetch(&repos).await;
        println!("\nprefetched {} repository details", warmed);
    }

    let stats = client.cache_stats();
    println!(
        "\n{} repositories; rate limit {}/{}; cache {} entries ({})",
        repos.len(),
        listing.rate_limit.remaining,
        listing.rate_limit.limit,
        stats.total_entries,
        format_size(stats.approximate_memory_bytes),
    );

    Ok(())
}

/// Show detail for a single repository.
pub async fn run_detail(owner: &str, name: &str) -> Result<(), CliError> {
    let config = Config::from_env()?;
    let client = ShowcaseClient::new(&config)?;

    let detail = client.get_repository_details(owner, name).await?;
    let repo = &detail.repository;
    let now = Utc::now();

    println!("{}", repo.full_name);
    if let Some(description) = &repo.description {
        println!("  {}", description);
    }
    if let Some(language) = &repo.language {
        println!("  language:  {} ({})", language, language_color(language));
    }
    println!("  stars:     {}", repo.stargazers_count);
    println!("  forks:     {}", repo.forks_count);
    println!("  size:      {}", format_size(repo.size_kb as usize * 1024));
    println!("  health:    {}", classify(repo, now).as_str());
    println!("  activity:  {:.1}", activity_score(repo, now));
    println!("  updated:   {}", format_relative_time(repo.updated_at, now));
    if !detail.readme_content.is_empty() {
        println!("  readme:    {}", format_size(detail.readme_content.len()));
    }

    Ok(())
}

/// Show the per-language distribution.
pub async fn run_languages() -> Result<(), CliError> {
    let config = Config::from_env()?;
    let client = ShowcaseClient::new(&config)?;

    let breakdown = client.get_language_breakdown().await?;
    for entry in &breakdown.languages {
        println!(
            "{:<16} {:>5.1}%  {:>3} repos  {}",
            entry.language,
            entry.percentage,
            entry.repository_count,
            language_color(&entry.language),
        );
    }

    Ok(())
}
