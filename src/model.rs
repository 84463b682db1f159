// Domain records: a `Flight` with its remaining seats and a `User` with
// credentials and the seats they currently hold.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A bookable flight. `available_seats` is the only mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flight {
    pub flight_number: String,
    pub destination: String,
    pub available_seats: u32,
}

impl Flight {
    pub fn new(
        flight_number: impl Into<String>,
        destination: impl Into<String>,
        available_seats: u32,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            destination: destination.into(),
            available_seats,
        }
    }

    /// Flight numbers are matched ignoring ASCII case.
    pub fn matches(&self, flight_number: &str) -> bool {
        self.flight_number.eq_ignore_ascii_case(flight_number)
    }

    /// Takes one seat. Returns `false` and leaves the flight untouched when
    /// it is sold out.
    pub fn book_seat(&mut self) -> bool {
        if self.available_seats > 0 {
            self.available_seats -= 1;
            return true;
        }
        false
    }

    pub fn cancel_seat(&mut self) {
        self.available_seats += 1;
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flight {} to {} has {} seats available.",
            self.flight_number, self.destination, self.available_seats
        )
    }
}

/// A registered user. Bookings are keyed by the flight's canonical number.
#[derive(Clone)]
pub struct User {
    pub username: String,
    password: String,
    bookings: BTreeMap<String, u32>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            bookings: BTreeMap::new(),
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn bookings(&self) -> &BTreeMap<String, u32> {
        &self.bookings
    }

    pub(crate) fn hold_seat(&mut self, flight_number: &str) {
        *self.bookings.entry(flight_number.to_string()).or_insert(0) += 1;
    }

    /// Releases one held seat. Returns `false` if none was held.
    pub(crate) fn release_seat(&mut self, flight_number: &str) -> bool {
        match self.bookings.get_mut(flight_number) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.bookings.remove(flight_number);
                true
            }
            None => false,
        }
    }
}

// Hand-written so the password never reaches logs or panic messages.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("bookings", &self.bookings)
            .finish()
    }
}
