//! One-off exhibit commands: search and show.

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::exhibits::{Exhibit, ExhibitService, SearchFilters, ServiceConfig};

/// Print one aggregated page of results
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    query: &str,
    page: u32,
    page_size: usize,
    filters: &SearchFilters,
    json: bool,
) -> anyhow::Result<()> {
    let service = ExhibitService::new(&ServiceConfig::from(config))
        .context("Failed to build HTTP client")?;

    rt.block_on(async {
        let exhibits = service.search(query, page.max(1), page_size, filters).await;

        if json {
            println!("{}", serde_json::to_string_pretty(&exhibits)?);
            return Ok(());
        }

        if exhibits.is_empty() {
            println!("No exhibits found.");
            return Ok(());
        }

        println!("Page {} ({} results)", page.max(1), exhibits.len());
        println!();
        for exhibit in &exhibits {
            println!("{:<24} {}", exhibit.id, truncate(&exhibit.title, 60));
            println!("{:<24} {} | {}", "", exhibit.creator, exhibit.date);
        }
        Ok(())
    })
}

/// Print one exhibit resolved from its composite id
pub fn cmd_show(rt: &Runtime, config: &Config, id: &str, json: bool) -> anyhow::Result<()> {
    let service = ExhibitService::new(&ServiceConfig::from(config))
        .context("Failed to build HTTP client")?;

    rt.block_on(async {
        let exhibit = service.get(id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&exhibit)?);
        } else {
            print_exhibit(&exhibit);
        }
        Ok(())
    })
}

fn print_exhibit(exhibit: &Exhibit) {
    println!("{}", exhibit.title);
    println!("{}", "=".repeat(exhibit.title.chars().count().min(80)));
    println!("Id:          {}", exhibit.id);
    println!("Institution: {}", exhibit.institution.display_name());
    println!("Creator:     {}", exhibit.creator);
    println!("Date:        {} ({})", exhibit.date, exhibit.historical_era.as_str());
    println!("Collection:  {}", exhibit.collection);
    println!("Origin:      {}", exhibit.country_of_origin);
    println!("Medium:      {}", exhibit.medium);
    println!("Period:      {}", exhibit.style_or_period);
    if !exhibit.subject_matter.is_empty() {
        println!("Subjects:    {}", exhibit.subject_matter.join(", "));
    }
    println!("Image:       {}", exhibit.image_url);
    println!();
    println!("{}", exhibit.description);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
