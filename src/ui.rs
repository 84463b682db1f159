// UI layer: the main menu and the reservation loop.
//
// All terminal I/O goes through the `Console` trait. `TerminalConsole`
// backs it with `dialoguer` prompts, `indicatif` spinners and `crossterm`
// colours; tests drive the same flows with a scripted console.

use crate::desk::{BookingDesk, BookingError, Session};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::thread;
use std::time::Duration;

pub const MAIN_MENU: [&str; 3] = ["Register", "Login", "Exit"];

/// Words the reservation loop treats as commands rather than flight numbers.
pub const RESERVATION_KEYWORDS: [&str; 3] = ["exit", "cancel", "mine"];

const RESERVATION_PROMPT: &str =
    "Enter flight number to book, 'cancel' to cancel a reservation, 'mine' to list your reservations, or 'exit' to logout";

/// How a message should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Failure,
}

pub trait Console {
    /// Shows `items` and returns the chosen index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;
    fn input(&mut self, prompt: &str) -> Result<String>;
    /// Like `input` but hidden while typing.
    fn password(&mut self, prompt: &str) -> Result<String>;
    fn say(&mut self, tone: Tone, message: &str);
    /// Short progress indicator before a slow-looking step.
    fn busy(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}

/// Interactive console on the real terminal.
#[derive(Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        // Arrow keys and Enter pick an entry.
        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(selection)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new().with_prompt(prompt).interact_text()?;
        Ok(value)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        let value = Password::new().with_prompt(prompt).interact()?;
        Ok(value)
    }

    fn say(&mut self, tone: Tone, message: &str) {
        match tone {
            Tone::Plain => println!("{message}"),
            Tone::Success => println!("{}", message.green()),
            Tone::Failure => println!("{}", message.red()),
        }
    }

    fn busy(&mut self, message: &str) -> Result<()> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        // Cosmetic pause only; the in-memory step itself is instant.
        thread::sleep(Duration::from_millis(250));
        spinner.finish_and_clear();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Register,
    Login,
    Exit,
}

impl MainChoice {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Register),
            1 => Some(Self::Login),
            2 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// One line typed in the reservation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationCommand {
    Exit,
    Cancel,
    Mine,
    Book(String),
}

impl ReservationCommand {
    /// Keywords are case-insensitive; anything else is a flight number.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match RESERVATION_KEYWORDS
            .iter()
            .position(|keyword| input.eq_ignore_ascii_case(keyword))
        {
            Some(0) => Self::Exit,
            Some(1) => Self::Cancel,
            Some(_) => Self::Mine,
            None => Self::Book(input.to_string()),
        }
    }
}

/// Runs the main menu until the user picks "Exit".
pub fn main_menu<C: Console>(console: &mut C, desk: &mut BookingDesk) -> Result<()> {
    loop {
        let selection = console.select("Choose an option", &MAIN_MENU)?;
        match MainChoice::from_index(selection) {
            Some(MainChoice::Register) => handle_register(console, desk)?,
            Some(MainChoice::Login) => {
                if let Some(session) = handle_login(console, desk)? {
                    manage_reservations(console, desk, &session)?;
                }
            }
            Some(MainChoice::Exit) => {
                console.say(Tone::Plain, "Exiting...");
                break;
            }
            None => console.say(Tone::Failure, "Invalid option. Please try again."),
        }
    }
    Ok(())
}

fn handle_register<C: Console>(console: &mut C, desk: &mut BookingDesk) -> Result<()> {
    let username = console.input("Enter username")?;
    let password = console.password("Enter password")?;

    match desk.register(&username, &password) {
        Ok(()) => console.say(Tone::Success, &format!("User registered: {username}")),
        Err(e) => console.say(Tone::Failure, &format!("Register failed: {e}")),
    }
    Ok(())
}

fn handle_login<C: Console>(console: &mut C, desk: &BookingDesk) -> Result<Option<Session>> {
    let username = console.input("Enter username")?;
    let password = console.password("Enter password")?;
    console.busy("Logging in...")?;

    match desk.login(&username, &password) {
        Ok(session) => {
            console.say(
                Tone::Success,
                &format!("Login successful for: {}", session.username()),
            );
            Ok(Some(session))
        }
        Err(_) => {
            console.say(Tone::Failure, "Invalid credentials.");
            Ok(None)
        }
    }
}

/// Reservation loop for a logged-in user. Returns on "exit".
pub fn manage_reservations<C: Console>(
    console: &mut C,
    desk: &mut BookingDesk,
    session: &Session,
) -> Result<()> {
    loop {
        console.say(Tone::Plain, "\nAvailable Flights:");
        for flight in desk.flights() {
            console.say(Tone::Plain, &flight.to_string());
        }

        let line = console.input(RESERVATION_PROMPT)?;
        let command = ReservationCommand::parse(&line);
        debug!("event=reservation_command module=ui command={command:?}");

        match command {
            ReservationCommand::Exit => break,
            ReservationCommand::Cancel => {
                let flight_number = console.input("Enter flight number to cancel")?;
                cancel_reservation(console, desk, session, flight_number.trim());
            }
            ReservationCommand::Mine => list_reservations(console, desk, session),
            ReservationCommand::Book(flight_number) => {
                book_reservation(console, desk, session, &flight_number)
            }
        }
    }
    Ok(())
}

fn book_reservation<C: Console>(
    console: &mut C,
    desk: &mut BookingDesk,
    session: &Session,
    flight_number: &str,
) {
    match desk.book(session, flight_number) {
        Ok(change) => {
            console.say(
                Tone::Success,
                &format!("Booking successful for flight: {flight_number}"),
            );
            console.say(
                Tone::Plain,
                &format!("{} seats remaining.", change.available_seats),
            );
        }
        Err(_) => console.say(Tone::Failure, "Invalid flight number or no available seats."),
    }
}

fn cancel_reservation<C: Console>(
    console: &mut C,
    desk: &mut BookingDesk,
    session: &Session,
    flight_number: &str,
) {
    match desk.cancel(session, flight_number) {
        Ok(change) => {
            console.say(
                Tone::Success,
                &format!("Cancellation successful for flight: {flight_number}"),
            );
            console.say(
                Tone::Plain,
                &format!(
                    "{} seats available after cancellation.",
                    change.available_seats
                ),
            );
        }
        Err(BookingError::NoReservation(number)) => console.say(
            Tone::Failure,
            &format!("You have no reservation on flight {number}."),
        ),
        Err(_) => console.say(Tone::Failure, "Invalid flight number."),
    }
}

fn list_reservations<C: Console>(console: &mut C, desk: &BookingDesk, session: &Session) {
    let bookings = desk.bookings(session);
    if bookings.is_empty() {
        console.say(Tone::Plain, "You have no reservations.");
        return;
    }
    console.say(Tone::Plain, "Your reservations:");
    for (flight_number, seats) in bookings {
        console.say(Tone::Plain, &format!("  {flight_number}: {seats} seat(s)"));
    }
}
