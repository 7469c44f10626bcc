use proptest::prelude::*;
use streethenge::alignment::{circular_difference, is_aligned, normalize_azimuth, reciprocal};
use streethenge::geo::{Location, bearing};

/// Azimuths well outside [0, 360), to exercise normalization
fn azimuth_strategy() -> impl Strategy<Value = f64> {
    -1080.0..1080.0
}

fn tolerance_strategy() -> impl Strategy<Value = f64> {
    0.0..=180.0
}

/// Latitudes away from the poles, where bearings are well defined
fn latitude_strategy() -> impl Strategy<Value = f64> {
    -80.0..80.0
}

fn longitude_strategy() -> impl Strategy<Value = f64> {
    -179.0..179.0
}

#[cfg(test)]
mod angle_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_difference_is_symmetric(a in azimuth_strategy(), b in azimuth_strategy()) {
            let forward = circular_difference(a, b);
            let backward = circular_difference(b, a);
            prop_assert!((forward - backward).abs() < 1e-9);
        }

        #[test]
        fn test_difference_is_bounded(a in azimuth_strategy(), b in azimuth_strategy()) {
            let difference = circular_difference(a, b);
            prop_assert!((0.0..=180.0).contains(&difference), "{difference}");
        }

        #[test]
        fn test_difference_to_self_and_opposite(a in azimuth_strategy()) {
            prop_assert!(circular_difference(a, a) < 1e-9);
            prop_assert!((circular_difference(a, a + 180.0) - 180.0).abs() < 1e-9);
        }

        #[test]
        fn test_difference_ignores_full_turns(
            a in azimuth_strategy(),
            b in azimuth_strategy(),
            turns in -3i32..=3,
        ) {
            let shifted = b + 360.0 * f64::from(turns);
            prop_assert!((circular_difference(a, b) - circular_difference(a, shifted)).abs() < 1e-6);
        }

        #[test]
        fn test_alignment_is_symmetric(
            a in azimuth_strategy(),
            b in azimuth_strategy(),
            tolerance in tolerance_strategy(),
        ) {
            prop_assert_eq!(is_aligned(a, b, tolerance), is_aligned(b, a, tolerance));
        }

        #[test]
        fn test_half_circle_tolerance_accepts_everything(a in azimuth_strategy(), b in azimuth_strategy()) {
            prop_assert!(is_aligned(a, b, 180.0));
        }

        #[test]
        fn test_normalized_range(a in azimuth_strategy()) {
            let normalized = normalize_azimuth(a);
            prop_assert!((0.0..360.0).contains(&normalized), "{normalized}");
            prop_assert!(circular_difference(a, normalized) < 1e-9);
        }

        #[test]
        fn test_reciprocal_is_opposite(a in azimuth_strategy()) {
            let back = reciprocal(a);
            prop_assert!((0.0..360.0).contains(&back));
            prop_assert!((circular_difference(a, back) - 180.0).abs() < 1e-9);
        }
    }
}

#[cfg(test)]
mod bearing_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_bearing_range(
            lat1 in latitude_strategy(),
            lon1 in longitude_strategy(),
            lat2 in latitude_strategy(),
            lon2 in longitude_strategy(),
        ) {
            let from = Location::new(lat1, lon1).unwrap();
            let to = Location::new(lat2, lon2).unwrap();
            let azimuth = bearing(from, to);
            prop_assert!((0.0..360.0).contains(&azimuth), "{azimuth}");
        }

        /// Over street-length distances the reverse bearing is the reciprocal.
        #[test]
        fn test_short_segment_reverse_bearing(
            lat in latitude_strategy(),
            lon in longitude_strategy(),
            dlat in -0.001..0.001f64,
            dlon in -0.001..0.001f64,
        ) {
            prop_assume!(dlat.abs() > 1e-5 || dlon.abs() > 1e-5);
            let from = Location::new(lat, lon).unwrap();
            let to = Location::new(lat + dlat, lon + dlon).unwrap();

            let difference = circular_difference(bearing(from, to), bearing(to, from));
            prop_assert!((difference - 180.0).abs() < 0.01, "{difference}");
        }
    }
}
