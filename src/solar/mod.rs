//! Solar event and sun position source.
//!
//! The alignment search only needs three things from astronomy: when the sun
//! rises, when it sets, and where it stands at a given instant. Those are
//! behind the [`SolarOracle`] trait so that searches can run against a fixed,
//! deterministic sky in tests.
//!
//! [`SunriseOracle`] is the production implementation:
//! - sunrise/sunset instants come from the `sunrise` crate's [`SolarDay`]
//! - the azimuth at an instant comes from NREL's SPA via `solar-positioning`
//!
//! ## Extreme latitudes
//!
//! Above the polar circles there are days without a sunrise or sunset. The
//! hour-angle formula behind `SolarDay` has no solution on those days and
//! yields a NaN that ends up as the Unix epoch, so whether the event happens
//! at all is decided by SPA's sunrise/sunset calculation first. Polar day and
//! polar night are reported as `None`. When SPA sees a regular day but
//! `SolarDay` lands far from SPA's instant (the days right at the edge of
//! polar night), SPA's instant is used.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use solar_positioning::{Horizon, RefractionCorrection, spa, time::DeltaT, types::SunriseResult};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::alignment::SunEvent;
use crate::error::SolarError;
use crate::geo::Location;

/// Source of sunrise/sunset instants and sun azimuths.
///
/// `Ok(None)` from [`SolarOracle::sunrise`] or [`SolarOracle::sunset`] means
/// the event does not happen on that date at that location. An `Err` means
/// the computation itself failed.
pub trait SolarOracle: Send + Sync {
    fn sunrise(
        &self,
        location: Location,
        date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, SolarError>;

    fn sunset(
        &self,
        location: Location,
        date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, SolarError>;

    /// Sun azimuth in degrees (0° = north, clockwise) seen from `location`.
    fn sun_azimuth(&self, location: Location, instant: DateTime<Utc>) -> Result<f64, SolarError>;

    /// Instant of `event` on `date`, dispatching to [`SolarOracle::sunrise`]
    /// or [`SolarOracle::sunset`].
    fn event_instant(
        &self,
        location: Location,
        date: NaiveDate,
        event: SunEvent,
    ) -> Result<Option<DateTime<Utc>>, SolarError> {
        match event {
            SunEvent::Sunrise => self.sunrise(location, date),
            SunEvent::Sunset => self.sunset(location, date),
        }
    }
}

/// Largest gap between the two crates' instants before SPA's is preferred.
const MAX_EVENT_DRIFT: TimeDelta = TimeDelta::hours(1);

/// Production oracle backed by the `sunrise` and `solar-positioning` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseOracle;

impl SunriseOracle {
    pub fn new() -> Self {
        Self
    }

    fn event_time(
        location: Location,
        date: NaiveDate,
        event: SolarEvent,
    ) -> Result<Option<DateTime<Utc>>, SolarError> {
        let Some(reference) = Self::spa_event_time(location, date, event)? else {
            return Ok(None);
        };

        let coord = Coordinates::new(location.latitude(), location.longitude()).ok_or(
            SolarError::InvalidCoordinates {
                latitude: location.latitude(),
                longitude: location.longitude(),
            },
        )?;
        let instant = SolarDay::new(coord, date).event_time(event);

        if (instant - reference).abs() > MAX_EVENT_DRIFT {
            log_debug!(
                "{event:?} at {location} on {date}: using SPA instant {reference}, not {instant}"
            );
            return Ok(Some(reference));
        }
        Ok(Some(instant))
    }

    /// SPA's view of `event` on `date`; `None` on polar days and nights.
    fn spa_event_time(
        location: Location,
        date: NaiveDate,
        event: SolarEvent,
    ) -> Result<Option<DateTime<Utc>>, SolarError> {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let delta_t = DeltaT::estimate_from_date_like(midnight)
            .map_err(|e| SolarError::Computation(e.to_string()))?;
        let result = spa::sunrise_sunset_for_horizon(
            midnight,
            location.latitude(),
            location.longitude(),
            delta_t,
            Horizon::SunriseSunset,
        )
        .map_err(|e| SolarError::Computation(e.to_string()))?;

        match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => Ok(Some(match event {
                SolarEvent::Sunset => sunset,
                _ => sunrise,
            })),
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => Ok(None),
        }
    }
}

impl SolarOracle for SunriseOracle {
    fn sunrise(
        &self,
        location: Location,
        date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, SolarError> {
        Self::event_time(location, date, SolarEvent::Sunrise)
    }

    fn sunset(
        &self,
        location: Location,
        date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, SolarError> {
        Self::event_time(location, date, SolarEvent::Sunset)
    }

    fn sun_azimuth(&self, location: Location, instant: DateTime<Utc>) -> Result<f64, SolarError> {
        let delta_t = DeltaT::estimate_from_date_like(instant)
            .map_err(|e| SolarError::Computation(e.to_string()))?;
        let position = spa::solar_position(
            instant,
            location.latitude(),
            location.longitude(),
            0.0,
            delta_t,
            Some(RefractionCorrection::standard()),
        )
        .map_err(|e| SolarError::Computation(e.to_string()))?;

        let azimuth = position.azimuth();
        if !azimuth.is_finite() {
            return Err(SolarError::Computation(format!(
                "non-finite azimuth at {instant} for {location}"
            )));
        }
        Ok(azimuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::find_street_alignments;
    use crate::error::SearchError;
    use chrono::{Datelike, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mid_latitude_sunrise_and_sunset_exist() {
        let oracle = SunriseOracle::new();
        let nyc = Location::new(40.7128, -74.0060).unwrap();
        let day = date(2025, 3, 20);

        let sunrise = oracle.sunrise(nyc, day).unwrap().expect("sunrise");
        let sunset = oracle.sunset(nyc, day).unwrap().expect("sunset");

        // ~07:00 EDT and ~19:10 EDT around the equinox
        assert!((10..=12).contains(&sunrise.hour()), "sunrise {sunrise}");
        assert!(sunset.hour() >= 22 || sunset.hour() <= 1, "sunset {sunset}");
        assert!(sunset > sunrise);
    }

    #[test]
    fn test_equinox_azimuths_are_near_east_and_west() {
        let oracle = SunriseOracle::new();
        let quito = Location::new(-0.1807, -78.4678).unwrap();
        let day = date(2025, 3, 20);

        let sunrise = oracle.sunrise(quito, day).unwrap().unwrap();
        let sunset = oracle.sunset(quito, day).unwrap().unwrap();

        let rise_az = oracle.sun_azimuth(quito, sunrise).unwrap();
        let set_az = oracle.sun_azimuth(quito, sunset).unwrap();
        assert!((rise_az - 90.0).abs() < 2.0, "sunrise azimuth {rise_az}");
        assert!((set_az - 270.0).abs() < 2.0, "sunset azimuth {set_az}");
    }

    #[test]
    fn test_polar_night_has_no_sunrise() {
        let oracle = SunriseOracle::new();
        let longyearbyen = Location::new(78.22, 15.65).unwrap();
        let day = date(2025, 12, 21);

        assert_eq!(oracle.sunrise(longyearbyen, day), Ok(None));
        assert_eq!(oracle.sunset(longyearbyen, day), Ok(None));
    }

    #[test]
    fn test_polar_night_near_unix_epoch_has_no_events() {
        let oracle = SunriseOracle::new();
        let high_arctic = Location::new(80.0, 15.0).unwrap();

        for day in [date(1970, 1, 1), date(1970, 1, 2), date(1969, 12, 31)] {
            assert_eq!(oracle.sunrise(high_arctic, day), Ok(None), "{day}");
            assert_eq!(oracle.sunset(high_arctic, day), Ok(None), "{day}");
        }
    }

    #[test]
    fn test_polar_day_has_no_sunset() {
        let oracle = SunriseOracle::new();
        let high_arctic = Location::new(80.0, 15.0).unwrap();
        let day = date(1970, 6, 21);

        assert_eq!(oracle.sunrise(high_arctic, day), Ok(None));
        assert_eq!(oracle.sunset(high_arctic, day), Ok(None));
    }

    #[test]
    fn test_high_latitude_search_in_1970_skips_polar_night() {
        let oracle = SunriseOracle::new();
        let high_arctic = Location::new(80.0, 15.0).unwrap();

        let events = find_street_alignments(&oracle, high_arctic, 0.0, 1970, 180.0).unwrap();

        assert!(!events.is_empty());
        for event in &events {
            let day = event.date();
            assert_eq!(day.year(), 1970);
            assert_ne!(day.month(), 1, "polar night event on {day}");
            assert_ne!(day.month(), 12, "polar night event on {day}");
        }
    }

    #[test]
    fn test_earliest_chrono_year_is_rejected_before_computing() {
        let oracle = SunriseOracle::new();
        let paris = Location::new(48.8566, 2.3522).unwrap();
        let year = NaiveDate::MIN.year();

        assert_eq!(
            find_street_alignments(&oracle, paris, 0.0, year, 2.0),
            Err(SearchError::YearOutOfRange(year))
        );
    }

    #[test]
    fn test_event_instant_dispatch() {
        let oracle = SunriseOracle::new();
        let paris = Location::new(48.8566, 2.3522).unwrap();
        let day = date(2025, 6, 21);

        assert_eq!(
            oracle.event_instant(paris, day, SunEvent::Sunrise),
            oracle.sunrise(paris, day)
        );
        assert_eq!(
            oracle.event_instant(paris, day, SunEvent::Sunset),
            oracle.sunset(paris, day)
        );
    }
}
