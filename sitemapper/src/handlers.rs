use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use sitemapper_core::graph::export_dot;
use sitemapper_core::report::{ReportFormat, render_report};
use sitemapper_scanner::Seed;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;
use url::Url;

// Helper functions for crawl handler

/// Load seeds from either a file or the `--url` arguments
pub fn load_seeds_from_source(
    urls: &[String],
    hosts_file: Option<&PathBuf>,
    default_depth: usize,
) -> Result<Vec<Seed>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_seeds_from_file(hosts_file_path, default_depth)
    } else if !urls.is_empty() {
        let seeds: Vec<Seed> = urls
            .iter()
            .filter_map(|url| parse_url_line(url.trim()))
            .map(|url| Seed::with_depth(url, default_depth))
            .collect();

        if seeds.is_empty() {
            return Err("None of the given URLs are valid".to_string());
        }
        Ok(seeds)
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse seeds from a file
pub fn load_seeds_from_file(path: &Path, default_depth: usize) -> Result<Vec<Seed>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let seeds: Vec<Seed> = content
        .lines()
        .filter_map(|line| parse_seed_line(line, default_depth))
        .collect();

    if seeds.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(seeds)
}

/// Parse a `URL [DEPTH]` line. Blank lines and `#` comments yield `None`.
pub fn parse_seed_line(line: &str, default_depth: usize) -> Option<Seed> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut parts = line.split_whitespace();
    let url = parse_url_line(parts.next()?)?;

    let depth = match parts.next() {
        Some(raw) => match raw.parse::<usize>() {
            Ok(depth) => depth,
            Err(_) => {
                eprintln!("⚠️  Skipping '{}': invalid depth '{}'", line, raw);
                return None;
            }
        },
        None => default_depth,
    };

    if let Some(extra) = parts.next() {
        eprintln!("⚠️  Skipping '{}': unexpected token '{}'", line, extra);
        return None;
    }

    Some(Seed::with_depth(url, depth))
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // Try to parse as-is
    if let Ok(url) = Url::parse(line)
        && url.has_host()
    {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("⚠️  Skipping invalid URL '{}'", line);
    None
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if quiet { Level::WARN } else { Level::INFO })
        .init();

    let urls: Vec<String> = sub_matches
        .get_many::<String>("url")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let hosts_file = sub_matches.get_one::<PathBuf>("hosts-file");
    let depth = *sub_matches.get_one::<usize>("depth").unwrap_or(&2);
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap_or(&5);
    let max_in_flight = sub_matches.get_one::<usize>("max-in-flight").copied();
    let format = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse::<ReportFormat>()
        .map_err(anyhow::Error::msg)?;
    let output = sub_matches.get_one::<PathBuf>("output");
    let graph_dir = sub_matches
        .get_one::<String>("graph-dir")
        .map(|dir| expand_path(dir));

    let seeds = load_seeds_from_source(&urls, hosts_file, depth).map_err(anyhow::Error::msg)?;

    if !quiet {
        println!("\n🕷️  Crawling {} seed(s)", seeds.len());
        for seed in &seeds {
            println!(
                "  {} {} {}",
                "→".blue(),
                seed.url.bright_white(),
                format!("(depth {})", seed.depth).bright_black()
            );
        }
        println!("Timeout: {}s", timeout_secs);
        match max_in_flight {
            Some(max) => println!("Max in flight: {}\n", max),
            None => println!("Max in flight: unbounded\n"),
        }
    }

    let options = sitemapper_core::crawl::CrawlOptions {
        seeds,
        timeout_secs,
        max_in_flight,
        show_progress_bars: !quiet,
    };

    let progress_callback: sitemapper_core::crawl::CrawlProgressCallback = if quiet {
        Arc::new(|_msg: String| {})
    } else {
        Arc::new(|msg: String| {
            println!("{}", msg);
        })
    };

    let maps = sitemapper_core::crawl::execute_crawl(options, Some(progress_callback))
        .await
        .context("Crawl failed")?;

    if !quiet {
        println!("\n{} Crawl complete!\n", "✓".green().bold());
    }

    if let Some(dir) = graph_dir {
        for tree in maps.values() {
            let path = export_dot(tree, &dir)
                .with_context(|| format!("Failed to write graph into {}", dir.display()))?;
            if !quiet {
                println!("{} Graph: {}", "✓".green().bold(), path.display());
            }
        }
    }

    let report = render_report(&maps, format)?;
    match output {
        Some(path) => {
            let path = expand_path(&path.to_string_lossy());
            fs::write(&path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                println!("{} Report: {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}
