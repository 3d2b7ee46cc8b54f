//! Contend command: races concurrent park requests against one level.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result, ensure};
use lot_core::{ErrorKind, ParkingLot, Vehicle, VehicleClass};
use rayon::prelude::*;

/// Outcome of a contention run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContendSummary {
    pub floor: u32,
    pub callers: usize,
    pub parked: usize,
    pub no_spot: usize,
    pub other_errors: usize,
}

/// Issues `callers` park requests for `class` in parallel.
///
/// Fails if any spot ends up claimed by more than one ticket.
pub fn contend(
    lot: &ParkingLot,
    floor: Option<u32>,
    class: VehicleClass,
    callers: usize,
) -> Result<ContendSummary> {
    let floor = match floor {
        Some(floor) => floor,
        None => lot
            .levels()
            .first()
            .map(lot_core::Level::floor)
            .context("no levels configured")?,
    };

    let vehicles = (0..callers)
        .map(|i| Vehicle::new(format!("{class}-{i:04}"), class))
        .collect::<Result<Vec<_>, _>>()?;

    let results: Vec<_> = vehicles
        .into_par_iter()
        .map(|vehicle| lot.park(floor, vehicle))
        .collect();

    let mut summary = ContendSummary {
        floor,
        callers,
        parked: 0,
        no_spot: 0,
        other_errors: 0,
    };
    let mut claimed = HashSet::new();
    for result in &results {
        match result {
            Ok(ticket) => {
                summary.parked += 1;
                ensure!(
                    claimed.insert(ticket.spot_id()),
                    "spot {} was assigned twice",
                    ticket.spot_id()
                );
            }
            Err(err) if err.kind() == ErrorKind::NoSpotAvailable => summary.no_spot += 1,
            Err(err) => {
                tracing::warn!(error = %err, "park failed during contention run");
                summary.other_errors += 1;
            }
        }
    }
    tracing::debug!(?summary, "contention run finished");
    Ok(summary)
}

pub fn run<W: Write>(
    writer: &mut W,
    lot: &ParkingLot,
    floor: Option<u32>,
    class: VehicleClass,
    callers: usize,
) -> Result<()> {
    let summary = contend(lot, floor, class, callers)?;
    writeln!(
        writer,
        "{} {class} callers on level {}: {} parked, {} rejected (no spot available)",
        summary.callers, summary.floor, summary.parked, summary.no_spot
    )?;
    if summary.other_errors > 0 {
        writeln!(writer, "{} calls failed for other reasons", summary.other_errors)?;
    }
    Ok(())
}
