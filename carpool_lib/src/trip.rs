use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A trip as submitted by its driver, before it has an id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewTrip {
    pub driver_id: i64,
    pub origin_id: i64,
    pub destination_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub est_minutes: i64,
    pub car_size: String,
    pub seats: i64,
}

/// A stored trip joined with its driver, origin and destination names.
///
/// `available_seats` is derived from the live passenger count, it is never stored.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trip {
    pub trip_id: i64,
    pub driver_id: i64,
    pub driver_name: String,
    pub origin_id: i64,
    pub origin_city: String,
    pub origin_state: String,
    pub destination_id: i64,
    pub destination_city: String,
    pub destination_state: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub est_minutes: i64,
    pub car_size: String,
    pub seats: i64,
    pub available_seats: i64,
}

impl Trip {
    pub fn is_full(&self) -> bool {
        self.available_seats <= 0
    }

    pub fn is_driver(&self, user_id: i64) -> bool {
        self.driver_id == user_id
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} to {}, {} on {} at {}",
            self.origin_city,
            self.origin_state,
            self.destination_city,
            self.destination_state,
            self.date,
            self.time.format("%H:%M"),
        )
    }
}

/// Result of toggling a user's membership on a trip.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SeatToggle {
    Joined,
    Left,
    NoSeats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(available_seats: i64) -> Trip {
        Trip {
            trip_id: 7,
            driver_id: 1,
            driver_name: "dan".into(),
            origin_id: 10,
            origin_city: "Los Angeles".into(),
            origin_state: "California".into(),
            destination_id: 20,
            destination_city: "Reno".into(),
            destination_state: "Nevada".into(),
            date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
            time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            est_minutes: 480,
            car_size: "medium".into(),
            seats: 3,
            available_seats,
        }
    }

    #[test]
    fn display_names_route_and_schedule() {
        assert_eq!(
            trip(3).to_string(),
            "Los Angeles, California to Reno, Nevada on 2030-05-01 at 08:30"
        );
    }

    #[test]
    fn full_when_no_seats_remain() {
        assert!(!trip(1).is_full());
        assert!(trip(0).is_full());
        assert!(trip(0).is_driver(1));
        assert!(!trip(0).is_driver(2));
    }
}
