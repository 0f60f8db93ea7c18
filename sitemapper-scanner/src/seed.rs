use serde::{Deserialize, Serialize};

/// Depth applied to a seed given without one.
pub const DEFAULT_DEPTH: usize = 2;

/// One crawl root: where to start and how many link hops to follow from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub url: String,
    pub depth: usize,
}

impl Seed {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_depth(url, DEFAULT_DEPTH)
    }

    pub fn with_depth(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

impl From<&str> for Seed {
    fn from(url: &str) -> Self {
        Seed::new(url)
    }
}

impl From<String> for Seed {
    fn from(url: String) -> Self {
        Seed::new(url)
    }
}

impl<S: Into<String>> From<(S, usize)> for Seed {
    fn from((url, depth): (S, usize)) -> Self {
        Seed::with_depth(url, depth)
    }
}
