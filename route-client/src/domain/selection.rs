//! Origin/destination selection state machine.
//!
//! Tracks the points the rider has picked on the map. The first pick
//! sets the origin, the second sets the destination, and every further
//! pick replaces the destination while the origin stays fixed (a
//! most-recent-two-picks window that never cycles back to re-picking
//! the origin). "Clear" resets everything unconditionally.
//!
//! The invariant that a destination is never present without an origin
//! holds by construction: `pick`, `set_route`, and `clear` are the only
//! mutators.

use super::{Coordinate, RoutePreference};

/// Which phase the selection is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Nothing picked yet
    Empty,
    /// Origin picked, waiting for a destination
    OriginSet,
    /// Both endpoints picked; further picks move the destination
    BothSet,
}

/// What a `pick` did, so callers can mirror the transition into every
/// consumer view before handling the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Empty → OriginSet
    OriginSet,
    /// OriginSet → BothSet
    DestinationSet,
    /// BothSet → BothSet, destination replaced
    DestinationMoved,
}

/// The rider's current origin/destination selection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
    preference: RoutePreference,
}

impl Selection {
    /// Creates an empty selection with the default preference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a picked point and reports the transition taken.
    pub fn pick(&mut self, point: Coordinate) -> PickOutcome {
        if self.origin.is_none() {
            self.origin = Some(point);
            PickOutcome::OriginSet
        } else if self.destination.is_none() {
            self.destination = Some(point);
            PickOutcome::DestinationSet
        } else {
            self.destination = Some(point);
            PickOutcome::DestinationMoved
        }
    }

    /// Sets both endpoints at once, for form-driven route requests.
    pub fn set_route(&mut self, origin: Coordinate, destination: Coordinate) {
        self.origin = Some(origin);
        self.destination = Some(destination);
    }

    /// Resets to `Empty`, clearing both endpoints.
    pub fn clear(&mut self) {
        self.origin = None;
        self.destination = None;
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> SelectionPhase {
        match (self.origin, self.destination) {
            (None, _) => SelectionPhase::Empty,
            (Some(_), None) => SelectionPhase::OriginSet,
            (Some(_), Some(_)) => SelectionPhase::BothSet,
        }
    }

    /// The picked origin, if any.
    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    /// The picked destination, if any.
    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    /// The rider's routing preference.
    pub fn preference(&self) -> RoutePreference {
        self.preference
    }

    /// Updates the routing preference.
    pub fn set_preference(&mut self, preference: RoutePreference) {
        self.preference = preference;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64) -> Coordinate {
        Coordinate::new(lat, -3.7).unwrap()
    }

    #[test]
    fn first_pick_sets_origin() {
        let mut sel = Selection::new();
        assert_eq!(sel.phase(), SelectionPhase::Empty);

        let outcome = sel.pick(point(40.1));
        assert_eq!(outcome, PickOutcome::OriginSet);
        assert_eq!(sel.phase(), SelectionPhase::OriginSet);
        assert_eq!(sel.origin(), Some(point(40.1)));
        assert_eq!(sel.destination(), None);
    }

    #[test]
    fn second_pick_sets_destination() {
        let mut sel = Selection::new();
        sel.pick(point(40.1));

        let outcome = sel.pick(point(40.2));
        assert_eq!(outcome, PickOutcome::DestinationSet);
        assert_eq!(sel.phase(), SelectionPhase::BothSet);
        assert_eq!(sel.origin(), Some(point(40.1)));
        assert_eq!(sel.destination(), Some(point(40.2)));
    }

    #[test]
    fn further_picks_move_destination_only() {
        let mut sel = Selection::new();
        sel.pick(point(40.1));
        sel.pick(point(40.2));

        let outcome = sel.pick(point(40.3));
        assert_eq!(outcome, PickOutcome::DestinationMoved);
        assert_eq!(sel.origin(), Some(point(40.1)));
        assert_eq!(sel.destination(), Some(point(40.3)));

        sel.pick(point(40.4));
        assert_eq!(sel.origin(), Some(point(40.1)));
        assert_eq!(sel.destination(), Some(point(40.4)));
    }

    #[test]
    fn clear_resets_unconditionally() {
        let mut sel = Selection::new();
        sel.pick(point(40.1));
        sel.pick(point(40.2));

        sel.clear();
        assert_eq!(sel.phase(), SelectionPhase::Empty);
        assert_eq!(sel.origin(), None);
        assert_eq!(sel.destination(), None);

        // Clearing an already-empty selection is a no-op
        sel.clear();
        assert_eq!(sel.phase(), SelectionPhase::Empty);
    }

    #[test]
    fn set_route_jumps_to_both_set() {
        let mut sel = Selection::new();
        sel.set_route(point(40.1), point(40.2));
        assert_eq!(sel.phase(), SelectionPhase::BothSet);
        assert_eq!(sel.origin(), Some(point(40.1)));
        assert_eq!(sel.destination(), Some(point(40.2)));
    }

    #[test]
    fn preference_defaults_to_balanced() {
        let mut sel = Selection::new();
        assert_eq!(sel.preference(), RoutePreference::Balanced);

        sel.set_preference(RoutePreference::AirQuality);
        assert_eq!(sel.preference(), RoutePreference::AirQuality);
    }
}
