//! Layout command: lists levels, spots and who occupies them.

use std::io::Write;

use anyhow::Result;
use lot_core::{Level, ParkingLot};

pub fn run<W: Write>(writer: &mut W, lot: &ParkingLot, json: bool) -> Result<()> {
    let levels = lot.levels();
    if json {
        serde_json::to_writer_pretty(&mut *writer, &levels)?;
        writeln!(writer)?;
        return Ok(());
    }
    write_levels(writer, &levels)
}

/// Writes one line per spot, grouped by level.
pub fn write_levels<W: Write>(writer: &mut W, levels: &[Level]) -> Result<()> {
    if levels.is_empty() {
        writeln!(writer, "No levels configured.")?;
        return Ok(());
    }

    for level in levels {
        writeln!(
            writer,
            "Level {} ({} spots)",
            level.floor(),
            level.spots().len()
        )?;
        for spot in level.spots() {
            match spot.occupant() {
                Some(vehicle) => writeln!(
                    writer,
                    "  {} [{}] OCCUPIED - {} ({})",
                    spot.id(),
                    spot.class(),
                    vehicle.class(),
                    vehicle.license_plate()
                )?,
                None => writeln!(writer, "  {} [{}] AVAILABLE", spot.id(), spot.class())?,
            }
        }
    }
    Ok(())
}
