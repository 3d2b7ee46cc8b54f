//! Tiered parking fees.
//!
//! A stay is billed in whole hours, truncated toward zero. The first hour
//! (and anything shorter) costs the base rate; each further whole hour adds
//! the per-extra-hour rate. A partial hour beyond the first is not charged.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LotError;
use crate::types::VehicleClass;

/// Rates for one vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Charge for the first hour or less.
    pub base: f64,
    /// Charge for every whole hour after the first.
    pub per_extra_hour: f64,
}

impl Rate {
    #[must_use]
    pub const fn new(base: f64, per_extra_hour: f64) -> Self {
        Self {
            base,
            per_extra_hour,
        }
    }

    fn validate(self, class: VehicleClass) -> Result<Self, LotError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if valid(self.base) && valid(self.per_extra_hour) {
            Ok(self)
        } else {
            Err(LotError::invalid_argument(format!(
                "{class} rates must be finite and non-negative"
            )))
        }
    }
}

/// A computed parking fee.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fee(f64);

impl Fee {
    #[must_use]
    pub const fn from_amount(amount: f64) -> Self {
        Self(amount)
    }

    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Rate lookup table keyed by vehicle class.
///
/// Serialized as a `bike`/`car`/`truck` map so it can live in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateTable", into = "RateTable")]
pub struct FeeSchedule {
    rates: [Rate; VehicleClass::ALL.len()],
}

/// Named form of [`FeeSchedule`] for (de)serialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RateTable {
    bike: Rate,
    car: Rate,
    truck: Rate,
}

impl FeeSchedule {
    /// The standard table: bike 10 + 5/h, car 15 + 10/h, truck 20 + 15/h.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            rates: [
                Rate::new(10.0, 5.0),
                Rate::new(15.0, 10.0),
                Rate::new(20.0, 15.0),
            ],
        }
    }

    /// Builds a schedule from rates listed in [`VehicleClass::ALL`] order.
    pub fn new(rates: [Rate; VehicleClass::ALL.len()]) -> Result<Self, LotError> {
        for (rate, class) in rates.iter().zip(VehicleClass::ALL) {
            rate.validate(class)?;
        }
        Ok(Self { rates })
    }

    #[must_use]
    pub const fn rate(&self, class: VehicleClass) -> Rate {
        self.rates[class.index()]
    }

    /// Fee for a stay from `entry` to `exit`.
    ///
    /// Fails with `InvalidExit` if `exit` precedes `entry`.
    pub fn compute(
        &self,
        class: VehicleClass,
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    ) -> Result<Fee, LotError> {
        if exit < entry {
            return Err(LotError::InvalidExit {
                message: format!("exit time {exit} is before entry time {entry}"),
            });
        }
        self.quote(class, exit - entry)
    }

    /// Fee for a stay of the given length.
    pub fn quote(&self, class: VehicleClass, stay: Duration) -> Result<Fee, LotError> {
        if stay < Duration::zero() {
            return Err(LotError::InvalidExit {
                message: format!("stay of {stay} is negative"),
            });
        }
        let rate = self.rate(class);
        let hours = stay.num_hours();
        if hours <= 1 {
            return Ok(Fee(rate.base));
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "hour counts stay far below 2^52"
        )]
        let extra_hours = (hours - 1) as f64;
        Ok(Fee(extra_hours.mul_add(rate.per_extra_hour, rate.base)))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<RateTable> for FeeSchedule {
    type Error = LotError;

    fn try_from(table: RateTable) -> Result<Self, Self::Error> {
        Self::new([table.bike, table.car, table.truck])
    }
}

impl From<FeeSchedule> for RateTable {
    fn from(schedule: FeeSchedule) -> Self {
        let [bike, car, truck] = schedule.rates;
        Self { bike, car, truck }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
    }

    fn fee(class: VehicleClass, entry: DateTime<Utc>, exit: DateTime<Utc>) -> Fee {
        FeeSchedule::standard().compute(class, entry, exit).unwrap()
    }

    #[test]
    fn bike_under_an_hour_pays_base() {
        assert_eq!(
            fee(VehicleClass::Bike, at(10, 0), at(10, 45)),
            Fee::from_amount(10.0)
        );
    }

    #[test]
    fn bike_two_and_a_half_hours_pays_one_extra_hour() {
        assert_eq!(
            fee(VehicleClass::Bike, at(10, 0), at(12, 30)),
            Fee::from_amount(15.0)
        );
    }

    #[test]
    fn car_two_hours() {
        assert_eq!(
            fee(VehicleClass::Car, at(9, 0), at(11, 0)),
            Fee::from_amount(25.0)
        );
    }

    #[test]
    fn truck_fifty_nine_minutes_pays_base() {
        assert_eq!(
            fee(VehicleClass::Truck, at(9, 0), at(9, 59)),
            Fee::from_amount(20.0)
        );
    }

    #[test]
    fn exactly_one_hour_pays_base() {
        assert_eq!(
            fee(VehicleClass::Car, at(9, 0), at(10, 0)),
            Fee::from_amount(15.0)
        );
    }

    #[test]
    fn zero_length_stay_pays_base() {
        assert_eq!(
            fee(VehicleClass::Truck, at(9, 0), at(9, 0)),
            Fee::from_amount(20.0)
        );
    }

    #[test]
    fn long_truck_stay() {
        // 10h → base + 9 extra hours
        assert_eq!(
            fee(VehicleClass::Truck, at(8, 0), at(18, 20)),
            Fee::from_amount(155.0)
        );
    }

    #[test]
    fn exit_before_entry_is_invalid_exit() {
        let err = FeeSchedule::standard()
            .compute(VehicleClass::Car, at(10, 0), at(9, 59))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidExit);
    }

    #[test]
    fn negative_quote_is_invalid_exit() {
        let err = FeeSchedule::standard()
            .quote(VehicleClass::Bike, Duration::minutes(-1))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidExit);
    }

    #[test]
    fn fee_is_non_decreasing_in_stay_length() {
        let schedule = FeeSchedule::standard();
        for class in VehicleClass::ALL {
            let mut previous = Fee::from_amount(0.0);
            for minutes in 0..(48 * 60) {
                let current = schedule.quote(class, Duration::minutes(minutes)).unwrap();
                assert!(
                    current >= previous,
                    "{class} fee dropped at {minutes} minutes"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn rate_lookup_is_per_class() {
        let schedule = FeeSchedule::standard();
        assert_eq!(schedule.rate(VehicleClass::Bike), Rate::new(10.0, 5.0));
        assert_eq!(schedule.rate(VehicleClass::Car), Rate::new(15.0, 10.0));
        assert_eq!(schedule.rate(VehicleClass::Truck), Rate::new(20.0, 15.0));
    }

    #[test]
    fn custom_schedule_changes_only_its_class() {
        let schedule = FeeSchedule::new([
            Rate::new(2.0, 1.0),
            Rate::new(15.0, 10.0),
            Rate::new(20.0, 15.0),
        ])
        .unwrap();
        assert_eq!(
            schedule.quote(VehicleClass::Bike, Duration::hours(3)).unwrap(),
            Fee::from_amount(4.0)
        );
        assert_eq!(
            schedule.quote(VehicleClass::Car, Duration::hours(3)).unwrap(),
            Fee::from_amount(35.0)
        );
    }

    #[test]
    fn schedule_rejects_negative_rates() {
        let err = FeeSchedule::new([
            Rate::new(10.0, -5.0),
            Rate::new(15.0, 10.0),
            Rate::new(20.0, 15.0),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: bike rates must be finite and non-negative"
        );
    }

    #[test]
    fn schedule_serde_uses_class_names() {
        let json = serde_json::to_value(FeeSchedule::standard()).unwrap();
        assert_eq!(json["car"]["base"], 15.0);
        assert_eq!(json["truck"]["per_extra_hour"], 15.0);

        let parsed: FeeSchedule = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, FeeSchedule::standard());
    }

    #[test]
    fn fee_display_has_two_decimals() {
        assert_eq!(Fee::from_amount(15.0).to_string(), "$15.00");
    }
}
