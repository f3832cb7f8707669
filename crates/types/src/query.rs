//! Search request descriptors.
//!
//! A [`Query`] is a plain value: a [`Region`], a [`Paging`] position and a
//! [`SearchFilters`] set. Splitting a partition clones the query with another
//! region; paging through a partition clones it with another page number.

use crate::region::Region;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Listing status filter understood by the search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HomeStatus {
    ForRent,
    NewConstruction,
    Auction,
    Foreclosed,
    /// For sale by agent.
    #[serde(rename = "fsba")]
    ForSaleByAgent,
    /// For sale by owner.
    #[serde(rename = "fsbo")]
    ForSaleByOwner,
    RecentlySold,
    Foreclosure,
    ComingSoon,
    #[serde(rename = "preforeclosure")]
    PreForeclosure,
}

impl HomeStatus {
    pub const ALL: [HomeStatus; 10] = [
        HomeStatus::ForRent,
        HomeStatus::NewConstruction,
        HomeStatus::Auction,
        HomeStatus::Foreclosed,
        HomeStatus::ForSaleByAgent,
        HomeStatus::ForSaleByOwner,
        HomeStatus::RecentlySold,
        HomeStatus::Foreclosure,
        HomeStatus::ComingSoon,
        HomeStatus::PreForeclosure,
    ];

    /// Name used by the provider's wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeStatus::ForRent => "forRent",
            HomeStatus::NewConstruction => "newConstruction",
            HomeStatus::Auction => "auction",
            HomeStatus::Foreclosed => "foreclosed",
            HomeStatus::ForSaleByAgent => "fsba",
            HomeStatus::ForSaleByOwner => "fsbo",
            HomeStatus::RecentlySold => "recentlySold",
            HomeStatus::Foreclosure => "foreclosure",
            HomeStatus::ComingSoon => "comingSoon",
            HomeStatus::PreForeclosure => "preforeclosure",
        }
    }
}

impl fmt::Display for HomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown home status {0:?}")]
pub struct UnknownHomeStatus(pub String);

impl FromStr for HomeStatus {
    type Err = UnknownHomeStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHomeStatus(s.to_string()))
    }
}

/// Position within one partition's result pages. Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_size: u32,
    pub page_number: u32,
}

impl Paging {
    pub const DEFAULT_PAGE_SIZE: u32 = 1000;
    pub const FIRST_PAGE: u32 = 1;

    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            page_number: Self::FIRST_PAGE,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.page_number == Self::FIRST_PAGE
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

/// Filter criteria carried unchanged through every split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchFilters {
    #[serde(default)]
    pub home_statuses: Vec<HomeStatus>,

    #[serde(default = "SearchFilters::default_sort_order")]
    pub sort_order: String,

    #[serde(default = "SearchFilters::default_listing_category")]
    pub listing_category: String,
}

impl SearchFilters {
    pub const DEFAULT_SORT_ORDER: &'static str = "recentlyChanged";
    pub const DEFAULT_LISTING_CATEGORY: &'static str = "all";

    fn default_sort_order() -> String {
        Self::DEFAULT_SORT_ORDER.to_string()
    }

    fn default_listing_category() -> String {
        Self::DEFAULT_LISTING_CATEGORY.to_string()
    }

    pub fn with_statuses(statuses: impl IntoIterator<Item = HomeStatus>) -> Self {
        Self {
            home_statuses: statuses.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = sort_order.into();
        self
    }

    pub fn with_listing_category(mut self, category: impl Into<String>) -> Self {
        self.listing_category = category.into();
        self
    }
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            home_statuses: Vec::new(),
            sort_order: Self::default_sort_order(),
            listing_category: Self::default_listing_category(),
        }
    }
}

/// One search request: where to look, which page, and what to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    region: Region,
    paging: Paging,
    filters: SearchFilters,
}

impl Query {
    /// Create a first-page query with the default page size.
    pub fn new(region: Region, filters: SearchFilters) -> Self {
        Self {
            region,
            paging: Paging::default(),
            filters,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Copy of this query over another region, rewound to the first page.
    pub fn with_region(&self, region: Region) -> Self {
        Self {
            region,
            paging: Paging::new(self.paging.page_size),
            filters: self.filters.clone(),
        }
    }

    /// Copy of this query for another page of the same region.
    pub fn with_page(&self, page_number: u32) -> Self {
        Self {
            region: self.region,
            paging: Paging {
                page_size: self.paging.page_size,
                page_number,
            },
            filters: self.filters.clone(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.paging.page_size = page_size;
        self
    }
}
