use crate::error::{CrawlError, Result};
use quadsweep_types::Query;

/// One unit of traversal work: a query and the split level it sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalNode {
    pub query: Query,
    pub depth: u32,
}

impl TraversalNode {
    pub fn root(query: Query) -> Self {
        Self { query, depth: 0 }
    }

    /// Child nodes covering this node's region, one level deeper.
    pub fn split(&self, factor: usize) -> Result<Vec<TraversalNode>> {
        let cells = self.query.region().subdivide(factor)?;
        Ok(cells
            .into_iter()
            .map(|cell| TraversalNode {
                query: self.query.with_region(cell),
                depth: self.depth + 1,
            })
            .collect())
    }
}

/// How a node was resolved.
#[derive(Debug)]
pub enum NodeOutcome {
    /// Every page of the partition was fetched and handed to the sink.
    Accepted { pages: u32, items: usize },
    /// Zero or too many matches; the children still need to be visited.
    Subdivided(Vec<TraversalNode>),
    /// Beyond the depth limit. Nothing was queried.
    Abandoned,
    Failed(CrawlError),
}
