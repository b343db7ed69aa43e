//! Node identifier, coordinate, and node types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres, used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Identifier of a node within a single graph instance.
///
/// Ids are unique per graph but need not be contiguous. By convention the
/// upstream builder assigns `0..N-1`, with node 0 the route start and
/// node 1 the route end when no waypoints are used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when constructing invalid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A validated geographic position in decimal degrees.
///
/// Both components are guaranteed finite, with latitude in `[-90, 90]`
/// and longitude in `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use route_engine::domain::Coordinates;
///
/// let london = Coordinates::new(51.5074, -0.1278).unwrap();
/// assert_eq!(london.latitude(), 51.5074);
///
/// // Non-finite and out-of-range values are rejected
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinates {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                reason: "latitude must be within [-90, 90] degrees",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                reason: "longitude must be within [-180, 180] degrees",
            });
        }
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another position, in kilometres.
    ///
    /// Haversine formula over a spherical Earth; accurate to well under a
    /// percent, which is plenty for route-length reporting.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_KM * c
    }
}

/// A graph node: an identified geographic position with an optional
/// display name.
///
/// Nodes are immutable once inserted into a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier, unique within its graph.
    pub id: NodeId,

    /// Geographic position.
    pub coordinates: Coordinates,

    name: Option<String>,
}

impl Node {
    /// Create an unnamed node.
    pub fn new(id: NodeId, coordinates: Coordinates) -> Self {
        Node {
            id,
            coordinates,
            name: None,
        }
    }

    /// Create a node with a display name.
    pub fn named(id: NodeId, coordinates: Coordinates, name: impl Into<String>) -> Self {
        Node {
            id,
            coordinates,
            name: Some(name.into()),
        }
    }

    /// The node's display name, or a generated placeholder if it has none.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Waypoint {}", self.id),
        }
    }

    /// The node's explicit name, if one was provided.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
