//! # quadsweep-types
//!
//! Value types shared by the quadsweep crawler crates:
//!
//! - **Regions**: [`Region`], a validated longitude/latitude rectangle that
//!   splits itself into equal cells
//! - **Queries**: [`Query`], [`Paging`], [`SearchFilters`], [`HomeStatus`]
//! - **Reporting**: [`RunSummary`]
//!
//! All types are serializable with Serde; regions are built on `geo::Rect`.
//!
//! ## Examples
//!
//! ```rust
//! use quadsweep_types::{HomeStatus, Query, Region, SearchFilters};
//!
//! let region = Region::new(-83.741219, 41.522719, -83.357890, 41.774026).unwrap();
//! let query = Query::new(region, SearchFilters::with_statuses([HomeStatus::ForSaleByAgent]));
//!
//! let children: Vec<Query> = region
//!     .subdivide(2)
//!     .unwrap()
//!     .into_iter()
//!     .map(|cell| query.with_region(cell))
//!     .collect();
//! assert_eq!(children.len(), 4);
//! ```

pub mod query;
pub mod region;
pub mod stats;

pub use query::{HomeStatus, Paging, Query, SearchFilters, UnknownHomeStatus};
pub use region::{Region, RegionBounds, RegionError};
pub use stats::RunSummary;
