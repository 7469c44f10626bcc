// Alignment search tests against a scripted sky.
//
// The fake oracle places sunrise at 06:00 UTC and sunset at 18:00 UTC and
// answers azimuth queries from per-date closures, so every expected event can
// be worked out by hand.

mod angle_tests {
    use crate::alignment::angles::*;

    #[test]
    fn test_circular_difference_wraps() {
        assert_eq!(circular_difference(10.0, 350.0), 20.0);
        assert_eq!(circular_difference(350.0, 10.0), 20.0);
        assert_eq!(circular_difference(0.0, 180.0), 180.0);
        assert_eq!(circular_difference(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_circular_difference_negative_inputs() {
        // -278.5 and 81.5 are the same compass direction
        assert!(circular_difference(-278.5, 81.5) < 1e-9);
        assert!((circular_difference(-298.87, 241.13) - 180.0).abs() < 1e-9);
        assert!((circular_difference(-10.0, 730.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_aligned_tolerance_edges() {
        assert!(is_aligned(81.5, 81.5, 0.0));
        assert!(!is_aligned(81.5001, 81.5, 0.0));
        assert!(is_aligned(83.5, 81.5, 2.0));
        assert!(!is_aligned(83.6, 81.5, 2.0));
        assert!(!is_aligned(81.5, 81.5, -1.0));
    }

    #[test]
    fn test_normalize_and_reciprocal() {
        assert_eq!(normalize_azimuth(-278.5), 81.5);
        assert_eq!(normalize_azimuth(360.0), 0.0);
        assert_eq!(normalize_azimuth(725.0), 5.0);
        assert_eq!(normalize_azimuth(-1e-20), 0.0);
        assert_eq!(reciprocal(81.5), 261.5);
        assert_eq!(reciprocal(270.0), 90.0);
        assert_eq!(street_directions(-278.5), [81.5, 261.5]);
    }
}

mod search_tests {
    use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

    use crate::alignment::*;
    use crate::constants::{MAXIMUM_YEAR, MINIMUM_YEAR};
    use crate::error::{SearchError, SolarError};
    use crate::geo::Location;
    use crate::solar::SolarOracle;

    type AzimuthFn = Box<dyn Fn(NaiveDate) -> Result<Option<f64>, SolarError> + Send + Sync>;

    fn script(
        f: impl Fn(NaiveDate) -> Result<Option<f64>, SolarError> + Send + Sync + 'static,
    ) -> AzimuthFn {
        Box::new(f)
    }

    struct ScriptedOracle {
        sunrise: AzimuthFn,
        sunset: AzimuthFn,
    }

    impl ScriptedOracle {
        fn constant(sunrise_az: f64, sunset_az: f64) -> Self {
            Self {
                sunrise: script(move |_| Ok(Some(sunrise_az))),
                sunset: script(move |_| Ok(Some(sunset_az))),
            }
        }

        fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
                .unwrap()
        }

        fn instant(
            script: &AzimuthFn,
            date: NaiveDate,
            hour: u32,
        ) -> Result<Option<DateTime<Utc>>, SolarError> {
            Ok(script(date)?.map(|_| Self::at(date, hour)))
        }
    }

    impl SolarOracle for ScriptedOracle {
        fn sunrise(
            &self,
            _location: Location,
            date: NaiveDate,
        ) -> Result<Option<DateTime<Utc>>, SolarError> {
            Self::instant(&self.sunrise, date, 6)
        }

        fn sunset(
            &self,
            _location: Location,
            date: NaiveDate,
        ) -> Result<Option<DateTime<Utc>>, SolarError> {
            Self::instant(&self.sunset, date, 18)
        }

        fn sun_azimuth(
            &self,
            _location: Location,
            instant: DateTime<Utc>,
        ) -> Result<f64, SolarError> {
            let script = if instant.hour() < 12 {
                &self.sunrise
            } else {
                &self.sunset
            };
            script(instant.date_naive())?
                .ok_or_else(|| SolarError::Computation("no event".to_string()))
        }
    }

    fn somerville() -> Location {
        Location::new(40.56519, -74.59540).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sunrise_match_every_day() {
        let oracle = ScriptedOracle::constant(80.0, 280.0);
        let events = find_alignments(&oracle, somerville(), &[81.5, 261.5], 2025, 2.0).unwrap();

        assert_eq!(events.len(), 365);
        assert!(events.iter().all(|e| e.kind() == SunEvent::Sunrise));
        assert!(events.iter().all(|e| e.signed_azimuth() == 80.0));
        assert_eq!(events[0].date(), date(2025, 1, 1));
        assert_eq!(events[364].date(), date(2025, 12, 31));
    }

    #[test]
    fn test_sunset_events_are_negative() {
        let oracle = ScriptedOracle::constant(60.0, 262.0);
        let events = find_alignments(&oracle, somerville(), &[261.5], 2024, 1.0).unwrap();

        assert_eq!(events.len(), 366);
        assert!(events.iter().all(|e| e.signed_azimuth() == -262.0));
        assert!(events.iter().all(|e| e.azimuth() == 262.0));
        assert!(events.iter().all(|e| e.kind() == SunEvent::Sunset));
    }

    #[test]
    fn test_full_tolerance_yields_both_events_each_day() {
        let oracle = ScriptedOracle::constant(75.0, 285.0);
        let events = find_alignments(&oracle, somerville(), &[0.0], 2025, 180.0).unwrap();

        assert_eq!(events.len(), 2 * 365);
        for pair in events.chunks(2) {
            assert_eq!(pair[0].date(), pair[1].date());
            // sunset (negative) sorts first within a date
            assert_eq!(pair[0].signed_azimuth(), -285.0);
            assert_eq!(pair[1].signed_azimuth(), 75.0);
        }
    }

    #[test]
    fn test_both_directions_matching_same_event_is_deduplicated() {
        let oracle = ScriptedOracle::constant(75.0, 285.0);
        let events = find_alignments(&oracle, somerville(), &[81.5, 261.5], 2025, 180.0).unwrap();
        assert_eq!(events.len(), 2 * 365);

        let duplicated = find_alignments(&oracle, somerville(), &[81.5, 81.5], 2025, 10.0).unwrap();
        assert_eq!(duplicated.len(), 365);
    }

    #[test]
    fn test_results_sorted_by_date_then_signed_azimuth() {
        // Sunrise drifts across the target through the year
        let oracle = ScriptedOracle {
            sunrise: script(|d| Ok(Some(60.0 + d.ordinal() as f64 / 6.0))),
            sunset: script(|d| Ok(Some(300.0 - d.ordinal() as f64 / 6.0))),
        };
        let events = find_alignments(&oracle, somerville(), &[81.5, 261.5], 2025, 2.0).unwrap();

        assert!(!events.is_empty());
        assert!(events.windows(2).all(|w| w[0] < w[1]));
        for event in &events {
            let az = event.azimuth();
            assert!(
                circular_difference(az, 81.5) <= 2.0 || circular_difference(az, 261.5) <= 2.0,
                "{event}"
            );
        }
    }

    #[test]
    fn test_missing_events_are_skipped() {
        // No sunrise or sunset through December, like a polar night
        let no_december = |az: f64| script(move |d| Ok((d.month() != 12).then_some(az)));
        let oracle = ScriptedOracle {
            sunrise: no_december(81.0),
            sunset: no_december(262.0),
        };
        let (events, stats) =
            find_alignments_with_stats(&oracle, somerville(), &[81.5, 261.5], 2025, 2.0).unwrap();

        assert_eq!(events.len(), 2 * (365 - 31));
        assert!(events.iter().all(|e| e.date().month() != 12));
        assert_eq!(stats.days, 365);
        assert_eq!(stats.missing_events, 2 * 31);
        assert_eq!(stats.failed_events, 0);
    }

    #[test]
    fn test_oracle_failures_do_not_abort_the_year() {
        let oracle = ScriptedOracle {
            sunrise: script(|d| {
                if d.day() == 13 {
                    Err(SolarError::Computation("diverged".to_string()))
                } else {
                    Ok(Some(81.5))
                }
            }),
            sunset: script(|_| Ok(Some(200.0))),
        };
        let (events, stats) =
            find_alignments_with_stats(&oracle, somerville(), &[81.5], 2025, 0.5).unwrap();

        assert_eq!(events.len(), 365 - 12);
        assert!(events.iter().all(|e| e.date().day() != 13));
        assert_eq!(stats.failed_events, 12);
    }

    #[test]
    fn test_street_alignment_normalizes_negative_azimuth() {
        let oracle = ScriptedOracle::constant(81.5, 261.5);
        let events = find_street_alignments(&oracle, somerville(), -278.5, 2025, 0.0).unwrap();

        assert_eq!(events.len(), 2 * 365);
        assert_eq!(events[0], AlignmentEvent::new(date(2025, 1, 1), SunEvent::Sunset, 261.5));
        assert_eq!(events[1], AlignmentEvent::new(date(2025, 1, 1), SunEvent::Sunrise, 81.5));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let oracle = ScriptedOracle::constant(80.0, 280.0);
        let loc = somerville();

        assert_eq!(
            find_alignments(&oracle, loc, &[81.5], 2025, -1.0),
            Err(SearchError::InvalidTolerance(-1.0))
        );
        assert!(matches!(
            find_alignments(&oracle, loc, &[81.5], 2025, f64::NAN),
            Err(SearchError::InvalidTolerance(_))
        ));
        assert_eq!(
            find_alignments(&oracle, loc, &[], 2025, 2.0),
            Err(SearchError::NoTargets)
        );
        assert!(matches!(
            find_alignments(&oracle, loc, &[f64::INFINITY], 2025, 2.0),
            Err(SearchError::InvalidTarget(_))
        ));
        assert_eq!(
            find_alignments(&oracle, loc, &[81.5], i32::MAX, 2.0),
            Err(SearchError::YearOutOfRange(i32::MAX))
        );
    }

    #[test]
    fn test_years_outside_solar_model_are_rejected() {
        let oracle = ScriptedOracle::constant(90.0, 270.0);
        let loc = Location::new(40.0, 179.0).unwrap();

        for year in [NaiveDate::MIN.year(), MINIMUM_YEAR - 1, MAXIMUM_YEAR + 1] {
            assert_eq!(
                find_alignments(&oracle, loc, &[90.0], year, 2.0),
                Err(SearchError::YearOutOfRange(year))
            );
        }
        assert!(find_alignments(&oracle, loc, &[90.0], MINIMUM_YEAR, 2.0).is_ok());
    }

    #[test]
    fn test_event_serializes_as_date_and_signed_azimuth() {
        let event = AlignmentEvent::new(date(2025, 5, 29), SunEvent::Sunset, 297.3);
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"["2025-05-29",-297.3]"#
        );
        assert_eq!(event.to_string(), "2025-05-29: sunset azimuth 297.3°");
    }
}
