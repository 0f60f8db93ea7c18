// Report generation from finished crawl trees

use crate::crawl::{SiteMaps, extract_url_path};
use serde::{Deserialize, Serialize};
use sitemapper_scanner::{CrawlSummary, CrawlTree};
use std::collections::BTreeMap;
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeReport {
    pub summary: CrawlSummary,
    pub nodes: Vec<NodeReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeReport {
    pub url: String,
    pub depth: usize,
    pub fetched: bool,
    /// One entry per link, cross-links included.
    pub children: Vec<String>,
}

/// Flatten a tree into its summary plus every distinct node, root first.
pub fn build_tree_report(tree: &CrawlTree) -> TreeReport {
    let nodes = tree
        .walk()
        .into_iter()
        .map(|id| {
            let node = tree.node(id);
            NodeReport {
                url: node.url.clone(),
                depth: node.depth,
                fetched: node.fetched,
                children: node
                    .children
                    .iter()
                    .map(|&child| tree.node(child).url.clone())
                    .collect(),
            }
        })
        .collect();

    TreeReport {
        summary: tree.summary(),
        nodes,
    }
}

pub fn generate_json_report(maps: &SiteMaps) -> serde_json::Result<String> {
    let reports: Vec<TreeReport> = maps.values().map(build_tree_report).collect();
    serde_json::to_string_pretty(&reports)
}

/// Generate a plain-text crawl report
pub fn generate_crawl_report(maps: &SiteMaps) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Seeds crawled: {}\n", maps.len()));

    let total_urls: usize = maps.values().map(|t| t.len()).sum();
    report.push_str(&format!("  Distinct URLs: {}\n", total_urls));

    let total_fetches: usize = maps.values().map(|t| t.fetch_count()).sum();
    report.push_str(&format!("  Pages fetched: {}\n", total_fetches));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for tree in maps.values() {
        report.push_str(&format!("## {}\n", tree.url()));
        report.push_str(&format!("  {}\n\n", tree.summary()));

        // Group by host
        let mut by_host: BTreeMap<String, Vec<(usize, String)>> = BTreeMap::new();
        for id in tree.walk() {
            let node = tree.node(id);
            let host = Url::parse(&node.url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string());
            by_host
                .entry(host)
                .or_default()
                .push((node.depth, extract_url_path(&node.url)));
        }

        for (host, paths) in by_host.iter() {
            report.push_str(&format!("  {} ({} URLs)\n", host, paths.len()));
            for (depth, path) in paths {
                report.push_str(&format!("    [{}] {}\n", depth, path));
            }
        }
        report.push('\n');
    }

    report
}

pub fn render_report(maps: &SiteMaps, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_crawl_report(maps)),
        ReportFormat::Json => generate_json_report(maps),
    }
}
