//! Error taxonomy for lot operations.

use thiserror::Error;

use crate::types::{LicensePlate, SpotClass, TicketNumber};

/// Errors reported by the parking lot and its value types.
///
/// Every failure leaves the lot unchanged. None are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LotError {
    /// A required value was empty, malformed, or referred to nothing.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// No compatible unoccupied spot exists on the requested level.
    #[error("no {class} spot available on level {floor} for {plate}")]
    NoSpotAvailable {
        floor: u32,
        class: SpotClass,
        plate: LicensePlate,
    },

    /// The exit time precedes the ticket's entry time.
    #[error("invalid exit: {message}")]
    InvalidExit { message: String },

    /// The ticket is not active in this lot (already exited, or never issued).
    #[error("ticket not found in active tickets: {ticket}")]
    UnknownTicket { ticket: TicketNumber },

    /// Lot bookkeeping disagrees with an active ticket.
    #[error("inconsistent lot state: {message}")]
    InconsistentState { message: String },
}

/// The kind of a [`LotError`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NoSpotAvailable,
    InvalidExit,
    UnknownTicket,
    InconsistentState,
}

impl LotError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NoSpotAvailable { .. } => ErrorKind::NoSpotAvailable,
            Self::InvalidExit { .. } => ErrorKind::InvalidExit,
            Self::UnknownTicket { .. } => ErrorKind::UnknownTicket,
            Self::InconsistentState { .. } => ErrorKind::InconsistentState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_spot_message_names_class_and_plate() {
        let err = LotError::NoSpotAvailable {
            floor: 1,
            class: SpotClass::Small,
            plate: LicensePlate::new("XYZ789").unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "no small spot available on level 1 for XYZ789"
        );
        assert_eq!(err.kind(), ErrorKind::NoSpotAvailable);
    }

    #[test]
    fn unknown_ticket_message() {
        let err = LotError::UnknownTicket {
            ticket: TicketNumber::new("TICKET-1").unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "ticket not found in active tickets: TICKET-1"
        );
    }
}
