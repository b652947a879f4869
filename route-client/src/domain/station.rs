//! Bike-share station types.

use super::Coordinate;

/// A bike-share docking station with live availability.
///
/// Availability counts come straight from the backend snapshot; the
/// `dock_bikes + free_bases <= total_bases` relation is not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Backend station identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Station location
    pub location: Coordinate,
    /// Bikes currently docked and available
    pub dock_bikes: u32,
    /// Empty bases available for returns
    pub free_bases: u32,
    /// Total bases at the station
    pub total_bases: u32,
    /// Distance from the query point, if the backend computed one
    pub distance_km: Option<f64>,
}

impl Station {
    /// Share of bases currently holding an available bike, as a percentage.
    ///
    /// Returns 0 when the station reports no bases at all.
    pub fn availability_percent(&self) -> u32 {
        if self.total_bases == 0 {
            return 0;
        }
        (self.dock_bikes * 100 + self.total_bases / 2) / self.total_bases
    }
}
