use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::time::Duration;

use vuln_monitor::filter::KeywordSet;
use vuln_monitor::parsers::{extract_entries, extract_with_selector};
use vuln_monitor::scrapers::{ArchiveSource, MailingListArchive, DEFAULT_ARCHIVE_URL};
use vuln_monitor::utils::http::{create_client, default_user_agent};

/// Print a day listing and the keyword each entry would match, without
/// touching state or sending anything
#[derive(Debug, Parser)]
struct Args {
    /// Day to inspect (YYYY-MM-DD), defaults to today in UTC
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Comma-separated keywords to evaluate
    #[arg(short, long, default_value = "")]
    keywords: String,

    #[arg(long, default_value = DEFAULT_ARCHIVE_URL)]
    archive_url: String,

    /// Alternative CSS selector for the message anchors
    #[arg(long)]
    selector: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let day = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let keywords = KeywordSet::parse(&args.keywords);

    let client = create_client(&default_user_agent(), Duration::from_secs(30))?;
    let archive = MailingListArchive::new(client, &args.archive_url)?;
    let url = archive.day_url(day)?;

    println!("Fetching {url}");
    let html = archive
        .fetch_listing(&url)
        .await
        .with_context(|| format!("failed to fetch listing for {day}"))?;
    let entries = match &args.selector {
        Some(selector) => extract_with_selector(&html, selector)?,
        None => extract_entries(&html)?,
    };

    if entries.is_empty() {
        println!("No list items found; the page layout may have changed");
        return Ok(());
    }

    println!("Found {} entries", entries.len());
    for entry in &entries {
        let marker = if entry.is_reply() {
            "reply".to_string()
        } else if keywords.is_empty() {
            "match".to_string()
        } else {
            match keywords.first_match(&entry.title) {
                Some(keyword) => format!("match:{keyword}"),
                None => "-".to_string(),
            }
        };
        println!("[{marker:>16}] {}\n{:>19}{}", entry.title, "", entry.detail_url(&url));
    }

    Ok(())
}
