//! JSON shapes exchanged with the search endpoint.

use quadsweep::SearchResult;
use quadsweep_types::{HomeStatus, Paging, Query, RegionBounds};
use serde::{Deserialize, Serialize};

/// Clip polygon covering the whole globe, so only the boundaries restrict results.
pub const WORLD_CLIP_POLYGON: &str = "POLYGON((-180 90,180 90,180 -90,-180 -90,-180 90))";
pub const REGION_TYPE: &str = "customPolygon";

/// Request body for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody<'a> {
    pub paging: Paging,
    pub region_parameters: RegionParameters,
    pub home_statuses: &'a [HomeStatus],
    pub sort_order: &'a str,
    pub listing_category_filter: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionParameters {
    pub boundaries: RegionBounds,
    pub clip_polygon: &'static str,
    pub region_type: &'static str,
}

impl<'a> SearchBody<'a> {
    pub fn from_query(query: &'a Query) -> Self {
        let filters = query.filters();
        Self {
            paging: query.paging(),
            region_parameters: RegionParameters {
                boundaries: RegionBounds::from(*query.region()),
                clip_polygon: WORLD_CLIP_POLYGON,
                region_type: REGION_TYPE,
            },
            home_statuses: &filters.home_statuses,
            sort_order: &filters.sort_order,
            listing_category_filter: &filters.listing_category,
        }
    }
}

/// The parts of a search response the crawler reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub search_result_counts: SearchResultCounts,
    #[serde(default)]
    pub search_results: SearchResults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultCounts {
    pub total_matching_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub list_results: Vec<serde_json::Value>,
}

impl From<SearchResponse> for SearchResult {
    fn from(response: SearchResponse) -> Self {
        SearchResult::new(
            response.search_result_counts.total_matching_count,
            response.search_results.list_results,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadsweep_types::{Region, SearchFilters};
    use serde_json::json;

    #[test]
    fn test_body_shape() {
        let region = Region::new(-83.741219, 41.522719, -83.35789, 41.774026).unwrap();
        let query = Query::new(
            region,
            SearchFilters::with_statuses([HomeStatus::ForSaleByAgent]),
        )
        .with_page(2);

        let body = serde_json::to_value(SearchBody::from_query(&query)).unwrap();

        assert_eq!(
            body,
            json!({
                "paging": {"pageSize": 1000, "pageNumber": 2},
                "regionParameters": {
                    "boundaries": {
                        "westLongitude": -83.741219,
                        "southLatitude": 41.522719,
                        "eastLongitude": -83.35789,
                        "northLatitude": 41.774026
                    },
                    "clipPolygon": "POLYGON((-180 90,180 90,180 -90,-180 -90,-180 90))",
                    "regionType": "customPolygon"
                },
                "homeStatuses": ["fsba"],
                "sortOrder": "recentlyChanged",
                "listingCategoryFilter": "all"
            })
        );
    }

    #[test]
    fn test_child_body_carries_child_bounds() {
        let region = Region::new(0.0, 0.0, 2.0, 2.0).unwrap();
        let parent = Query::new(region, SearchFilters::default());
        let child = parent.with_region(region.subdivide(2).unwrap()[3]);

        let body = serde_json::to_value(SearchBody::from_query(&child)).unwrap();
        assert_eq!(body["regionParameters"]["boundaries"]["westLongitude"], 1.0);
        assert_eq!(body["regionParameters"]["boundaries"]["southLatitude"], 1.0);
        assert_eq!(body["paging"]["pageNumber"], 1);
    }

    #[test]
    fn test_response_parsing() {
        let response: SearchResponse = serde_json::from_value(json!({
            "searchResultCounts": {"totalMatchingCount": 1234, "totalResultCount": 500},
            "searchResults": {"listResults": [{"zpid": 1}, {"zpid": 2}], "mapResults": []},
            "extra": true
        }))
        .unwrap();
        let result = SearchResult::from(response);
        assert_eq!(result.total_count, 1234);
        assert_eq!(result.items.len(), 2);
    }

    #[test]
    fn test_response_without_items() {
        let response: SearchResponse = serde_json::from_value(json!({
            "searchResultCounts": {"totalMatchingCount": 0}
        }))
        .unwrap();
        assert_eq!(SearchResult::from(response), SearchResult::empty());
    }

    #[test]
    fn test_response_without_counts_is_rejected() {
        let parsed = serde_json::from_value::<SearchResponse>(json!({
            "searchResults": {"listResults": []}
        }));
        assert!(parsed.is_err());
    }
}
