//! Demo command: parks, exits and re-parks vehicles on the first level.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Duration;
use lot_core::{ParkingLot, Ticket, Vehicle, VehicleClass};

use super::fee::format_stay;
use super::layout::write_levels;

pub fn run<W: Write>(writer: &mut W, lot: &ParkingLot, stay_minutes: i64) -> Result<()> {
    let floor = lot
        .levels()
        .first()
        .map(lot_core::Level::floor)
        .context("no levels configured")?;
    let stay = Duration::try_minutes(stay_minutes).context("stay too long")?;

    writeln!(writer, "========== PARKING VEHICLES ==========")?;
    let mut first_bike = None;
    for (plate, class) in [
        ("ABC123", VehicleClass::Bike),
        ("XYZ789", VehicleClass::Bike),
        ("CAR001", VehicleClass::Car),
        ("TRUCK01", VehicleClass::Truck),
    ] {
        let ticket = park_and_report(writer, lot, floor, Vehicle::new(plate, class)?)?;
        if class == VehicleClass::Bike && first_bike.is_none() {
            first_bike = ticket;
        }
    }
    writeln!(writer)?;
    write_status(writer, lot)?;

    writeln!(writer)?;
    writeln!(writer, "========== EXIT VEHICLE & RE-PARK ==========")?;
    let Some(ticket) = first_bike else {
        writeln!(writer, "No bike tickets found to exit.")?;
        return Ok(());
    };
    let exit_time = ticket
        .entry_time()
        .checked_add_signed(stay)
        .context("exit time out of range")?;
    let fee = lot.exit(&ticket, exit_time)?;
    writeln!(
        writer,
        "{} exited from {} after {}: fee {fee}",
        ticket.vehicle().license_plate(),
        ticket.spot_id(),
        format_stay(stay_minutes)
    )?;
    park_and_report(writer, lot, floor, Vehicle::new("NEW999", VehicleClass::Bike)?)?;
    writeln!(writer)?;
    write_status(writer, lot)?;

    Ok(())
}

/// Parks one vehicle and writes the outcome. Rejections are reported, not returned.
fn park_and_report<W: Write>(
    writer: &mut W,
    lot: &ParkingLot,
    floor: u32,
    vehicle: Vehicle,
) -> Result<Option<Ticket>> {
    let label = format!("{} {}", vehicle.class(), vehicle.license_plate());
    match lot.park(floor, vehicle) {
        Ok(ticket) => {
            writeln!(
                writer,
                "parked {label} at {} (ticket {})",
                ticket.spot_id(),
                ticket.number()
            )?;
            Ok(Some(ticket))
        }
        Err(err) => {
            writeln!(writer, "could not park {label}: {err}")?;
            Ok(None)
        }
    }
}

fn write_status<W: Write>(writer: &mut W, lot: &ParkingLot) -> Result<()> {
    writeln!(writer, "========== PARKING STATUS ==========")?;
    writeln!(writer, "Active tickets: {}", lot.active_tickets().len())?;
    write_levels(writer, &lot.levels())
}
