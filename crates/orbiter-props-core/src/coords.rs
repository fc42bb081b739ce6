//! Conversion from the modeling tool's basis to Orbiter's basis
//!
//! Orbiter is left-handed with Y up. The modeling tool is right-handed with
//! Z up. `(x, y, z)` maps to `(-x, z, -y)`.

use crate::types::{AuthoringPoint, OrbiterPoint};

/// Convert a point or direction into Orbiter coordinates
pub fn to_orbiter(p: AuthoringPoint) -> OrbiterPoint {
    OrbiterPoint::new(-p.x, p.z, -p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_point() {
        let p = to_orbiter(AuthoringPoint::new(1.0, 2.0, 3.0));
        assert_eq!(p.to_array(), [-1.0, 3.0, -2.0]);
    }

    #[test]
    fn test_origin_stays_at_origin() {
        let p = to_orbiter(AuthoringPoint::ZERO);
        assert_eq!(p.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_up_axis_becomes_y() {
        let p = to_orbiter(AuthoringPoint::new(0.0, 0.0, 1.0));
        assert_eq!(p.y, 1.0);
    }

    proptest! {
        #[test]
        fn prop_conversion_commutes_with_negation(
            x in -1e6f64..1e6, y in -1e6f64..1e6, z in -1e6f64..1e6
        ) {
            let p = AuthoringPoint::new(x, y, z);
            prop_assert_eq!(to_orbiter(-p), -to_orbiter(p));
        }

        #[test]
        fn prop_conversion_preserves_length(
            x in -1e3f64..1e3, y in -1e3f64..1e3, z in -1e3f64..1e3
        ) {
            let p = to_orbiter(AuthoringPoint::new(x, y, z));
            let before = x * x + y * y + z * z;
            let after = p.x * p.x + p.y * p.y + p.z * p.z;
            prop_assert!((before - after).abs() <= 1e-9 * before.max(1.0));
        }
    }
}
