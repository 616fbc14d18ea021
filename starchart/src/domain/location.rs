//! Galactic locations and distances, all in light-years.

use std::hash::{Hash, Hasher};

/// A point in the galaxy plus an uncertainty radius.
///
/// `precision` states that the true position lies within `precision` ly of
/// (x, y, z). It is a per-instance radius, not a per-axis tolerance. A
/// precision of 0 denotes an exactly known position.
///
/// Equality is an "exactly known, identical location" predicate: two
/// locations are equal iff both precisions are 0 and the coordinate triples
/// match. Any nonzero precision — even the same nonzero precision on both
/// sides — makes two locations unequal, because a position with uncertainty
/// is never provably the same point as another. The relation is therefore
/// not reflexive and `Eq` is deliberately not implemented.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    x: f64,
    y: f64,
    z: f64,
    precision: u32,
}

impl Location {
    /// Create a location with the given uncertainty radius.
    pub fn new(x: f64, y: f64, z: f64, precision: u32) -> Self {
        Self { x, y, z, precision }
    }

    /// Create an exactly known location (precision 0).
    pub fn exact(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0)
    }

    /// The x coordinate in ly.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The y coordinate in ly.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// The z coordinate in ly.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// The uncertainty radius in ly. 0 means exactly known.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The distance to another location, with compounded uncertainty.
    ///
    /// The value is the Euclidean distance between the centers. Each
    /// precision is a per-axis uncertainty, so the true position can be up
    /// to `sqrt(3) * p` ly from the center along a space diagonal; two
    /// independent uncertainties add linearly before that scaling, giving a
    /// combined precision of `ceil(sqrt(3) * (p + q))`. That is the worst
    /// case; the actual error can be smaller depending on the angle.
    ///
    /// Two exactly-equal locations short-circuit to a distance of 0 with
    /// precision 0.
    pub fn distance_to(&self, other: &Location) -> Distance {
        if self == other {
            return Distance {
                value: 0.0,
                precision: 0,
            };
        }

        let value = ((self.x - other.x).powi(2)
            + (self.y - other.y).powi(2)
            + (self.z - other.z).powi(2))
        .sqrt();

        let precision =
            (3.0_f64.sqrt() * f64::from(self.precision + other.precision)).ceil() as u32;

        Distance { value, precision }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.precision == 0
            && other.precision == 0
            && self.x == other.x
            && self.y == other.y
            && self.z == other.z
    }
}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
        self.precision.hash(state);
    }
}

/// A scalar separation between two locations, plus compounded uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    value: f64,
    precision: u32,
}

impl Distance {
    /// The distance in ly.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The compounded uncertainty in ly. 0 means exact.
    pub fn precision(&self) -> u32 {
        self.precision
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Coordinates in the range the galaxy actually spans.
    fn coordinate() -> impl Strategy<Value = f64> {
        -70_000.0_f64..70_000.0
    }

    proptest! {
        /// Exact locations are zero ly from themselves, exactly.
        #[test]
        fn exact_self_distance_is_zero(x in coordinate(), y in coordinate(), z in coordinate()) {
            let location = Location::exact(x, y, z);
            let distance = location.distance_to(&location);
            prop_assert_eq!(distance.value(), 0.0);
            prop_assert_eq!(distance.precision(), 0);
        }

        /// Distance between exact locations is Euclidean with precision 0.
        #[test]
        fn exact_pair_has_exact_distance(
            ax in coordinate(), ay in coordinate(), az in coordinate(),
            bx in coordinate(), by in coordinate(), bz in coordinate(),
        ) {
            let a = Location::exact(ax, ay, az);
            let b = Location::exact(bx, by, bz);
            let distance = a.distance_to(&b);
            let euclidean = ((ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2)).sqrt();
            prop_assert_eq!(distance.value(), euclidean);
            prop_assert_eq!(distance.precision(), 0);
        }

        /// Distance is symmetric in value and precision.
        #[test]
        fn distance_is_symmetric(
            ax in coordinate(), ay in coordinate(), az in coordinate(), ap in 0u32..1000,
            bx in coordinate(), by in coordinate(), bz in coordinate(), bp in 0u32..1000,
        ) {
            let a = Location::new(ax, ay, az, ap);
            let b = Location::new(bx, by, bz, bp);
            prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
        }

        /// Precision compounds as ceil(sqrt(3) * (p + q)).
        #[test]
        fn precision_combination_law(
            ax in coordinate(), ay in coordinate(), az in coordinate(), ap in 0u32..1000,
            bx in coordinate(), by in coordinate(), bz in coordinate(), bp in 1u32..1000,
        ) {
            // bp >= 1 keeps the exact-pair short circuit out of scope here.
            let a = Location::new(ax, ay, az, ap);
            let b = Location::new(bx, by, bz, bp);
            let expected = (3.0_f64.sqrt() * f64::from(ap + bp)).ceil() as u32;
            prop_assert_eq!(a.distance_to(&b).precision(), expected);
        }

        /// Nonzero precision always breaks equality, even against itself.
        #[test]
        fn imprecise_locations_are_never_equal(
            x in coordinate(), y in coordinate(), z in coordinate(), p in 1u32..1000,
        ) {
            let location = Location::new(x, y, z, p);
            prop_assert_ne!(location, location);
            prop_assert_ne!(location, Location::new(x, y, z, p));
        }
    }
}
