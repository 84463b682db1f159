// Booking desk: owns the in-memory flight list and user registry and
// implements register / login / book / cancel on top of them.
//
// The UI never touches `Flight` or `User` directly; it goes through these
// operations so seat counts and per-user bookings always move together.

use crate::model::{Flight, User};
use log::{info, warn};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("username `{0}` is already registered")]
    UsernameTaken(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no flight numbered `{0}`")]
    UnknownFlight(String),
    #[error("flight {0} has no available seats")]
    SoldOut(String),
    #[error("no reservation on flight {0}")]
    NoReservation(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Proof of a successful login. Only `BookingDesk::login` hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Flight state right after a book or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatChange {
    pub flight_number: String,
    pub destination: String,
    pub available_seats: u32,
}

impl From<&Flight> for SeatChange {
    fn from(flight: &Flight) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            destination: flight.destination.clone(),
            available_seats: flight.available_seats,
        }
    }
}

pub struct BookingDesk {
    flights: Vec<Flight>,
    users: HashMap<String, User>,
}

impl BookingDesk {
    pub fn new(flights: Vec<Flight>) -> Self {
        Self {
            flights,
            users: HashMap::new(),
        }
    }

    /// Desk seeded with the built-in catalog.
    pub fn with_default_flights() -> Self {
        Self::new(default_flights())
    }

    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.flights.iter()
    }

    pub fn find_flight(&self, flight_number: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.matches(flight_number))
    }

    #[cfg(test)]
    pub(crate) fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn register(&mut self, username: &str, password: &str) -> BookingResult<()> {
        if self.users.contains_key(username) {
            warn!("event=register module=desk status=rejected reason=username_taken");
            return Err(BookingError::UsernameTaken(username.to_string()));
        }
        self.users
            .insert(username.to_string(), User::new(username, password));
        info!(
            "event=register module=desk status=ok users={}",
            self.users.len()
        );
        Ok(())
    }

    /// Unknown user and wrong password produce the same error.
    pub fn login(&self, username: &str, password: &str) -> BookingResult<Session> {
        match self.users.get(username) {
            Some(user) if user.check_password(password) => {
                info!("event=login module=desk status=ok");
                Ok(Session {
                    username: user.username.clone(),
                })
            }
            _ => {
                warn!("event=login module=desk status=rejected");
                Err(BookingError::InvalidCredentials)
            }
        }
    }

    pub fn book(&mut self, session: &Session, flight_number: &str) -> BookingResult<SeatChange> {
        let user = self
            .users
            .get_mut(&session.username)
            .ok_or(BookingError::InvalidCredentials)?;
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.matches(flight_number))
            .ok_or_else(|| BookingError::UnknownFlight(flight_number.to_string()))?;

        if !flight.book_seat() {
            warn!(
                "event=book module=desk status=rejected reason=sold_out flight={}",
                flight.flight_number
            );
            return Err(BookingError::SoldOut(flight.flight_number.clone()));
        }
        user.hold_seat(&flight.flight_number);
        info!(
            "event=book module=desk status=ok flight={} remaining={}",
            flight.flight_number, flight.available_seats
        );
        Ok(SeatChange::from(&*flight))
    }

    pub fn cancel(&mut self, session: &Session, flight_number: &str) -> BookingResult<SeatChange> {
        let user = self
            .users
            .get_mut(&session.username)
            .ok_or(BookingError::InvalidCredentials)?;
        let flight = self
            .flights
            .iter_mut()
            .find(|f| f.matches(flight_number))
            .ok_or_else(|| BookingError::UnknownFlight(flight_number.to_string()))?;

        if !user.release_seat(&flight.flight_number) {
            warn!(
                "event=cancel module=desk status=rejected reason=no_reservation flight={}",
                flight.flight_number
            );
            return Err(BookingError::NoReservation(flight.flight_number.clone()));
        }
        flight.cancel_seat();
        info!(
            "event=cancel module=desk status=ok flight={} remaining={}",
            flight.flight_number, flight.available_seats
        );
        Ok(SeatChange::from(&*flight))
    }

    /// Seats the session's user holds, keyed by flight number.
    pub fn bookings(&self, session: &Session) -> BTreeMap<String, u32> {
        self.users
            .get(&session.username)
            .map(|user| user.bookings().clone())
            .unwrap_or_default()
    }
}

pub fn default_flights() -> Vec<Flight> {
    vec![
        Flight::new("101", "USA", 50),
        Flight::new("202", "London", 30),
        Flight::new("303", "Delhi", 10),
    ]
}
