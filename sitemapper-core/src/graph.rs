//! Export of a crawl tree as a directed graph.
//!
//! Each distinct URL becomes one vertex, coloured by the depth at which it was
//! first discovered. Every `children` entry becomes an edge, so cross-links
//! and links back to ancestors are kept (parallel duplicates are merged).
//! Output is Graphviz DOT; turning it into an image is left to `dot`.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use sitemapper_scanner::{CrawlTree, NodeId};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEPTH_COLORS: [&str; 5] = ["red", "blue", "green", "yellow", "pink"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub url: String,
    pub depth: usize,
}

/// Colour for a discovery depth; everything from depth 4 on shares the last.
pub fn depth_color(depth: usize) -> &'static str {
    DEPTH_COLORS[depth.min(DEPTH_COLORS.len() - 1)]
}

pub fn build_graph(tree: &CrawlTree) -> DiGraph<GraphNode, ()> {
    let mut graph = DiGraph::new();
    let order = tree.walk();

    let indices: HashMap<NodeId, NodeIndex> = order
        .iter()
        .map(|&id| {
            let node = tree.node(id);
            let index = graph.add_node(GraphNode {
                url: node.url.clone(),
                depth: node.depth,
            });
            (id, index)
        })
        .collect();

    for &id in &order {
        for child in &tree.node(id).children {
            if let (Some(&from), Some(&to)) = (indices.get(&id), indices.get(child)) {
                graph.update_edge(from, to, ());
            }
        }
    }

    graph
}

pub fn render_dot(tree: &CrawlTree) -> String {
    let graph = build_graph(tree);
    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| {
            format!(
                "label = {:?} style = filled fillcolor = {} ",
                node.url,
                depth_color(node.depth)
            )
        },
    );

    format!("{:?}", dot)
}

/// `http://a.test/docs` crawled to depth 2 becomes `a.test_docs_2.dot`.
pub fn graph_file_name(tree: &CrawlTree) -> String {
    let url = tree.url();
    let without_scheme = url.split_once("//").map(|(_, rest)| rest).unwrap_or(url);

    let stem: String = without_scheme
        .trim_end_matches('/')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}_{}.dot", stem, tree.depth_limit())
}

/// Write the tree's DOT file into `dir`, creating it if needed.
pub fn export_dot(tree: &CrawlTree, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(graph_file_name(tree));
    fs::write(&path, render_dot(tree))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CrawlTree {
        let mut tree = CrawlTree::new("http://a.test", 2);
        tree.attach(NodeId::ROOT, "/x");
        tree.attach(NodeId::ROOT, "/y");
        let x = tree.get("http://a.test/x").unwrap();
        let y = tree.get("http://a.test/y").unwrap();
        tree.attach(x, "http://a.test/y");
        tree.attach(y, "http://a.test");
        tree.attach(NodeId::ROOT, "http://a.test/x");
        tree
    }

    #[test]
    fn test_one_vertex_per_url() {
        let graph = build_graph(&sample_tree());
        assert_eq!(graph.node_count(), 3);
        // root->x, root->y, x->y, y->root; repeated root->x merged
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_vertex_depths() {
        let graph = build_graph(&sample_tree());
        let depths: HashMap<String, usize> = graph
            .node_weights()
            .map(|n| (n.url.clone(), n.depth))
            .collect();
        assert_eq!(depths["http://a.test"], 0);
        assert_eq!(depths["http://a.test/x"], 1);
        assert_eq!(depths["http://a.test/y"], 1);
    }

    #[test]
    fn test_depth_colors_clamp() {
        assert_eq!(depth_color(0), "red");
        assert_eq!(depth_color(1), "blue");
        assert_eq!(depth_color(4), "pink");
        assert_eq!(depth_color(40), "pink");
    }

    #[test]
    fn test_render_dot() {
        let dot = render_dot(&sample_tree());
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"http://a.test/x\""));
        assert!(dot.contains("fillcolor = red"));
        assert!(dot.contains("fillcolor = blue"));
        assert!(dot.contains("0 -> 1"));
    }

    #[test]
    fn test_graph_file_name() {
        assert_eq!(graph_file_name(&sample_tree()), "a.test_2.dot");
        let tree = CrawlTree::new("https://a.test:8080/docs/", 1);
        assert_eq!(graph_file_name(&tree), "a.test_8080_docs_1.dot");
    }
}
