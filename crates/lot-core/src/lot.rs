//! The parking lot orchestrator.
//!
//! # Thread Safety
//!
//! [`ParkingLot`] is `Send + Sync` and is meant to be built once by the
//! application and shared behind an `Arc`. All spot occupancy and the
//! active-ticket registry sit behind a single lot-wide mutex:
//! - `park` finds and claims a spot in one critical section, so two callers can
//!   never both win the same spot
//! - `exit` checks and removes a ticket in one critical section, so a ticket
//!   can be redeemed at most once
//!
//! Nothing blocks or does I/O while the lock is held. Read accessors return
//! snapshots; two reads are not atomic with respect to each other.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::LotError;
use crate::fee::{Fee, FeeSchedule};
use crate::spot::Level;
use crate::ticket::Ticket;
use crate::types::{SpotClass, TicketNumber};
use crate::vehicle::Vehicle;

/// A single parking facility.
#[derive(Debug)]
pub struct ParkingLot {
    state: Mutex<LotState>,
    schedule: FeeSchedule,
    clock: Arc<dyn Clock>,
}

/// Everything guarded by the lot-wide lock.
#[derive(Debug, Default)]
struct LotState {
    levels: Vec<Level>,
    active: HashMap<TicketNumber, Ticket>,
}

impl LotState {
    fn level_mut(&mut self, floor: u32) -> Result<&mut Level, LotError> {
        self.levels
            .iter_mut()
            .find(|l| l.floor() == floor)
            .ok_or_else(|| LotError::invalid_argument(format!("unknown level {floor}")))
    }

    /// Keeps `candidate` unless an active ticket already uses it.
    fn unused_ticket_number(&self, candidate: TicketNumber) -> TicketNumber {
        let mut number = candidate;
        while self.active.contains_key(&number) {
            number = TicketNumber::generate();
        }
        number
    }

    fn claim(
        &mut self,
        floor: u32,
        vehicle: Vehicle,
        candidate: TicketNumber,
        now: DateTime<Utc>,
    ) -> Result<Ticket, LotError> {
        let number = self.unused_ticket_number(candidate);
        let level = self.level_mut(floor)?;
        let Some(spot) = level.first_assignable_mut(&vehicle) else {
            return Err(LotError::NoSpotAvailable {
                floor,
                class: vehicle.class().spot_class(),
                plate: vehicle.license_plate().clone(),
            });
        };
        spot.occupy(vehicle.clone());
        let ticket = Ticket::issue(number, floor, spot, vehicle, now);
        self.active.insert(ticket.number().clone(), ticket.clone());
        Ok(ticket)
    }

    fn redeem(
        &mut self,
        ticket: &Ticket,
        exit_time: DateTime<Utc>,
        schedule: &FeeSchedule,
    ) -> Result<Fee, LotError> {
        let registered = self
            .active
            .get(ticket.number())
            .filter(|registered| *registered == ticket)
            .cloned()
            .ok_or_else(|| LotError::UnknownTicket {
                ticket: ticket.number().clone(),
            })?;

        let fee = schedule.compute(
            registered.vehicle().class(),
            registered.entry_time(),
            exit_time,
        )?;

        let spot = self
            .levels
            .iter_mut()
            .find(|l| l.floor() == registered.floor())
            .and_then(|l| l.spot_mut(registered.spot_id()))
            .ok_or_else(|| {
                LotError::inconsistent(format!(
                    "spot {} on level {} no longer exists",
                    registered.spot_id(),
                    registered.floor()
                ))
            })?;
        if spot.occupant() != Some(registered.vehicle()) {
            return Err(LotError::inconsistent(format!(
                "vehicle {} is no longer in spot {}",
                registered.vehicle().license_plate(),
                registered.spot_id()
            )));
        }

        spot.release();
        self.active.remove(registered.number());
        Ok(fee)
    }
}

impl ParkingLot {
    /// Creates an empty lot with the standard fee schedule and the system clock.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LotState::default()),
            schedule: FeeSchedule::standard(),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: FeeSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replaces the time source used to stamp new tickets.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub const fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Appends a level.
    ///
    /// Fails if a level with the same floor number exists, or if any of its
    /// spot IDs is already used on another level.
    pub fn add_level(&self, level: Level) -> Result<(), LotError> {
        let mut state = self.state.lock();
        if state.levels.iter().any(|l| l.floor() == level.floor()) {
            return Err(LotError::invalid_argument(format!(
                "level {} already exists",
                level.floor()
            )));
        }
        for existing in &state.levels {
            if let Some(spot) = level
                .spots()
                .iter()
                .find(|s| existing.spots().iter().any(|e| e.id() == s.id()))
            {
                return Err(LotError::invalid_argument(format!(
                    "spot ID {} already exists on level {}",
                    spot.id(),
                    existing.floor()
                )));
            }
        }
        tracing::debug!(
            floor = level.floor(),
            spots = level.spots().len(),
            "added level"
        );
        state.levels.push(level);
        Ok(())
    }

    /// Parks `vehicle` in the first free spot of its class on `floor`.
    ///
    /// On success the spot is occupied and the returned ticket is registered
    /// as active. On failure nothing changes.
    pub fn park(&self, floor: u32, vehicle: Vehicle) -> Result<Ticket, LotError> {
        let now = self.clock.now();
        let candidate = TicketNumber::generate();
        let result = self.state.lock().claim(floor, vehicle, candidate, now);

        match &result {
            Ok(ticket) => tracing::debug!(
                floor,
                spot = %ticket.spot_id(),
                ticket = %ticket.number(),
                plate = %ticket.vehicle().license_plate(),
                "vehicle parked"
            ),
            Err(err) => tracing::debug!(floor, error = %err, "park rejected"),
        }
        result
    }

    /// Releases the spot held by `ticket` and returns the fee for the stay.
    ///
    /// Checks, in order: the ticket is active (`UnknownTicket`), `exit_time`
    /// is not before entry (`InvalidExit`), and the spot still holds the
    /// ticket's vehicle (`InconsistentState`). On failure nothing changes.
    pub fn exit(&self, ticket: &Ticket, exit_time: DateTime<Utc>) -> Result<Fee, LotError> {
        let result = self
            .state
            .lock()
            .redeem(ticket, exit_time, &self.schedule);

        match &result {
            Ok(fee) => tracing::debug!(
                ticket = %ticket.number(),
                spot = %ticket.spot_id(),
                fee = fee.amount(),
                "vehicle exited"
            ),
            Err(err @ LotError::InconsistentState { .. }) => {
                tracing::warn!(ticket = %ticket.number(), error = %err, "lot state inconsistent");
            }
            Err(err) => tracing::debug!(ticket = %ticket.number(), error = %err, "exit rejected"),
        }
        result
    }

    /// Snapshot of all levels in insertion order.
    pub fn levels(&self) -> Vec<Level> {
        self.state.lock().levels.clone()
    }

    /// Snapshot of the active-ticket registry.
    pub fn active_tickets(&self) -> HashMap<TicketNumber, Ticket> {
        self.state.lock().active.clone()
    }

    pub fn active_ticket(&self, number: &TicketNumber) -> Option<Ticket> {
        self.state.lock().active.get(number).cloned()
    }

    /// Number of free spots of `class` on `floor`.
    pub fn available_spots(&self, floor: u32, class: SpotClass) -> Result<usize, LotError> {
        Ok(self.state.lock().level_mut(floor)?.available(class))
    }
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::new()
    }
}
