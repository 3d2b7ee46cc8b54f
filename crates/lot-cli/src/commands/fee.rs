//! Fee command: quotes a stay against the configured rate table.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Duration;
use lot_core::{FeeSchedule, VehicleClass};

pub fn run<W: Write>(
    writer: &mut W,
    schedule: &FeeSchedule,
    class: VehicleClass,
    minutes: i64,
) -> Result<()> {
    let stay = Duration::try_minutes(minutes).context("stay too long")?;
    let fee = schedule.quote(class, stay)?;
    writeln!(writer, "{class} for {}: {fee}", format_stay(minutes))?;
    Ok(())
}

/// Formats minutes as "Xh Ym" if >= 1 hour, "Xm" otherwise.
pub fn format_stay(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn quote(class: VehicleClass, minutes: i64) -> String {
        let mut output = Vec::new();
        run(&mut output, &FeeSchedule::standard(), class, minutes).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn quotes_standard_scenarios() {
        let output = [
            quote(VehicleClass::Bike, 45),
            quote(VehicleClass::Bike, 150),
            quote(VehicleClass::Car, 120),
            quote(VehicleClass::Truck, 59),
        ]
        .concat();

        assert_snapshot!(output, @r"
        bike for 45m: $10.00
        bike for 2h 30m: $15.00
        car for 2h 0m: $25.00
        truck for 59m: $20.00
        ");
    }

    #[test]
    fn negative_stay_is_rejected() {
        let mut output = Vec::new();
        let err = run(&mut output, &FeeSchedule::standard(), VehicleClass::Car, -5).unwrap_err();
        assert!(err.to_string().starts_with("invalid exit"));
        assert!(output.is_empty());
    }

    #[test]
    fn out_of_range_stay_is_an_error() {
        let mut output = Vec::new();
        let err = run(
            &mut output,
            &FeeSchedule::standard(),
            VehicleClass::Car,
            200_000_000_000_000,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "stay too long");
        assert!(output.is_empty());
    }

    #[test]
    fn format_stay_hours_and_minutes() {
        assert_eq!(format_stay(0), "0m");
        assert_eq!(format_stay(59), "59m");
        assert_eq!(format_stay(61), "1h 1m");
    }
}
