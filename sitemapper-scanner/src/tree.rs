//! Arena holding every node of one crawl tree together with its dedup map.
//!
//! Nodes are addressed by [`NodeId`]; slot 0 is always the root. A URL reached
//! from several pages appears once in the arena and several times in
//! `children` lists, so walking `children` yields a DAG (plus back-links to
//! ancestors). Use [`CrawlTree::walk`] to visit each node exactly once.

use crate::resolver::resolve;
use crate::result::CrawlSummary;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone)]
pub struct Node {
    pub url: String,
    pub children: Vec<NodeId>,
    /// Always [`NodeId::ROOT`]: every node points at its tree's root.
    pub head: NodeId,
    /// Link hops from the root at first discovery.
    pub depth: usize,
    pub fetched: bool,
}

impl Node {
    fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            children: Vec::new(),
            head: NodeId::ROOT,
            depth,
            fetched: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Outcome of attaching a discovered href to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// First sighting: the node was created and must be expanded.
    New(NodeId),
    /// Already in the tree: linked to the parent, nothing more to do.
    Existing(NodeId),
}

#[derive(Debug, Clone)]
pub struct CrawlTree {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    depth_limit: usize,
    started_at: DateTime<Utc>,
    elapsed: Duration,
}

impl CrawlTree {
    pub fn new(url: impl Into<String>, depth_limit: usize) -> Self {
        let url = url.into();
        let mut index = HashMap::new();
        index.insert(url.clone(), NodeId::ROOT);

        Self {
            nodes: vec![Node::new(url, 0)],
            index,
            depth_limit,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Resolve `href` against `parent`'s URL and link the result under it.
    ///
    /// Lookup and insertion happen in one call, so as long as the caller holds
    /// the tree exclusively no URL can be inserted twice.
    pub fn attach(&mut self, parent: NodeId, href: &str) -> Attach {
        let parent_node = &self.nodes[parent.0];
        let url = resolve(&parent_node.url, href);
        let depth = parent_node.depth + 1;

        if let Some(&existing) = self.index.get(&url) {
            self.nodes[parent.0].children.push(existing);
            return Attach::Existing(existing);
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(url.clone(), id);
        self.nodes.push(Node::new(url, depth));
        self.nodes[parent.0].children.push(id);
        Attach::New(id)
    }

    pub fn mark_fetched(&mut self, id: NodeId) {
        self.nodes[id.0].fetched = true;
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn url(&self) -> &str {
        &self.root().url
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, url: &str) -> Option<NodeId> {
        self.index.get(url).copied()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// Number of distinct URLs in the dedup map.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn fetch_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.fetched).count()
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) fn finish(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Depth-first pre-order from the root, each node once.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            // Reverse so the first child is visited first
            for &child in self.nodes[id.0].children.iter().rev() {
                if !seen.contains(&child) {
                    stack.push(child);
                }
            }
        }

        order
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            url: self.url().to_string(),
            depth: self.depth_limit,
            direct_children: self.root().children.len(),
            distinct_urls: self.len(),
            fetches: self.fetch_count(),
            started_at: self.started_at,
            elapsed: self.elapsed,
        }
    }
}
