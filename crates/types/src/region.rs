use geo::{Point, Rect, coord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or splitting a [`Region`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("region bounds must be finite, got {0}")]
    NonFinite(String),
    #[error("region must satisfy west < east and south < north, got {0}")]
    Inverted(String),
    #[error("subdivision factor must be at least 2, got {0}")]
    InvalidFactor(usize),
    #[error("cannot parse region from {0:?}, expected \"west,south,east,north\"")]
    Parse(String),
}

/// A geographic search area: an axis-aligned rectangle in longitude/latitude.
///
/// Wraps a `geo::Rect` whose minimum corner is the south-west corner and whose
/// maximum corner is the north-east corner. A region is immutable; splitting
/// it produces new regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegionBounds", into = "RegionBounds")]
pub struct Region {
    rect: Rect,
}

impl Region {
    /// Create a region from its west, south, east and north bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadsweep_types::region::Region;
    ///
    /// let toledo = Region::new(-83.741219, 41.522719, -83.357890, 41.774026).unwrap();
    /// assert!(toledo.width() > 0.0);
    /// assert!(Region::new(1.0, 0.0, 0.0, 1.0).is_err());
    /// ```
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, RegionError> {
        if ![west, south, east, north].iter().all(|v| v.is_finite()) {
            return Err(RegionError::NonFinite(format_bounds(west, south, east, north)));
        }
        if west >= east || south >= north {
            return Err(RegionError::Inverted(format_bounds(west, south, east, north)));
        }
        Ok(Self::from_edges(west, south, east, north))
    }

    /// Build a region without validation. Used for split children, whose edges
    /// come from an already valid parent.
    fn from_edges(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            rect: Rect::new(coord! { x: west, y: south }, coord! { x: east, y: north }),
        }
    }

    pub fn west(&self) -> f64 {
        self.rect.min().x
    }

    pub fn south(&self) -> f64 {
        self.rect.min().y
    }

    pub fn east(&self) -> f64 {
        self.rect.max().x
    }

    pub fn north(&self) -> f64 {
        self.rect.max().y
    }

    /// Longitude span.
    pub fn width(&self) -> f64 {
        self.east() - self.west()
    }

    /// Latitude span.
    pub fn height(&self) -> f64 {
        self.north() - self.south()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.west() + self.east()) / 2.0,
            (self.south() + self.north()) / 2.0,
        )
    }

    /// Check if a point lies inside the region, edges included.
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.west()
            && point.x() <= self.east()
            && point.y() >= self.south()
            && point.y() <= self.north()
    }

    /// Split the region into `factor * factor` equal cells.
    ///
    /// Cells are produced column by column: every latitude slice of the
    /// westernmost column first, south to north, then the next column east.
    /// Neighbouring cells share bit-identical edge coordinates and the outer
    /// edges of the grid are exactly the bounds of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadsweep_types::region::Region;
    ///
    /// let region = Region::new(0.0, 0.0, 2.0, 2.0).unwrap();
    /// let cells = region.subdivide(2).unwrap();
    /// assert_eq!(cells.len(), 4);
    /// assert_eq!(cells[0], Region::new(0.0, 0.0, 1.0, 1.0).unwrap());
    /// assert_eq!(cells[1], Region::new(0.0, 1.0, 1.0, 2.0).unwrap());
    /// ```
    pub fn subdivide(&self, factor: usize) -> Result<Vec<Region>, RegionError> {
        if factor < 2 {
            return Err(RegionError::InvalidFactor(factor));
        }

        let xs = axis_edges(self.west(), self.east(), factor);
        let ys = axis_edges(self.south(), self.north(), factor);

        let mut cells = Vec::with_capacity(factor * factor);
        for x in xs.windows(2) {
            for y in ys.windows(2) {
                cells.push(Region::from_edges(x[0], y[0], x[1], y[1]));
            }
        }
        Ok(cells)
    }
}

/// `factor + 1` cut positions along one axis. Every cut is derived from its
/// index alone, so two cells meeting at cut `i` see the same value. The span
/// `max - min` is never formed since it can overflow for finite bounds.
fn axis_edges(min: f64, max: f64, factor: usize) -> Vec<f64> {
    (0..=factor)
        .map(|i| {
            if i == factor {
                max
            } else {
                let t = i as f64 / factor as f64;
                min * (1.0 - t) + max * t
            }
        })
        .collect()
}

fn format_bounds(west: f64, south: f64, east: f64, north: f64) -> String {
    format!("[{},{},{},{}]", west, south, east, north)
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_bounds(
            self.west(),
            self.south(),
            self.east(),
            self.north(),
        ))
    }
}

impl FromStr for Region {
    type Err = RegionError;

    /// Parse `"west,south,east,north"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| RegionError::Parse(s.to_string()))?;

        match values.as_slice() {
            [west, south, east, north] => Region::new(*west, *south, *east, *north),
            _ => Err(RegionError::Parse(s.to_string())),
        }
    }
}

/// Named bounds of a [`Region`], the shape regions take on the wire and in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    #[serde(rename = "westLongitude")]
    pub west: f64,
    #[serde(rename = "southLatitude")]
    pub south: f64,
    #[serde(rename = "eastLongitude")]
    pub east: f64,
    #[serde(rename = "northLatitude")]
    pub north: f64,
}

impl From<Region> for RegionBounds {
    fn from(region: Region) -> Self {
        Self {
            west: region.west(),
            south: region.south(),
            east: region.east(),
            north: region.north(),
        }
    }
}

impl TryFrom<RegionBounds> for Region {
    type Error = RegionError;

    fn try_from(bounds: RegionBounds) -> Result<Self, Self::Error> {
        Region::new(bounds.west, bounds.south, bounds.east, bounds.north)
    }
}
