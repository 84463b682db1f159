use anyhow::{anyhow, Result};
use flightdesk_cli::ui::{main_menu, Console, Tone};
use flightdesk_cli::{BookingDesk, Flight};
use std::collections::VecDeque;

enum Answer {
    Pick(usize),
    Text(&'static str),
}

/// Console fed from a fixed script; records everything said to it.
struct ScriptedConsole {
    answers: VecDeque<Answer>,
    output: Vec<(Tone, String)>,
}

impl ScriptedConsole {
    fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            output: Vec::new(),
        }
    }

    fn next_text(&mut self, prompt: &str) -> Result<String> {
        match self.answers.pop_front() {
            Some(Answer::Text(text)) => Ok(text.to_string()),
            Some(Answer::Pick(i)) => Err(anyhow!("expected text for `{prompt}`, got pick {i}")),
            None => Err(anyhow!("script exhausted at `{prompt}`")),
        }
    }

    fn lines(&self) -> Vec<&str> {
        self.output.iter().map(|(_, line)| line.as_str()).collect()
    }

    fn said(&self, line: &str) -> bool {
        self.output.iter().any(|(_, l)| l == line)
    }
}

impl Console for ScriptedConsole {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        match self.answers.pop_front() {
            Some(Answer::Pick(i)) => Ok(i),
            Some(Answer::Text(t)) => Err(anyhow!("expected pick from {items:?}, got `{t}`")),
            None => Err(anyhow!("script exhausted at `{prompt}`")),
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        self.next_text(prompt)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        self.next_text(prompt)
    }

    fn say(&mut self, tone: Tone, message: &str) {
        self.output.push((tone, message.to_string()));
    }
}

const REGISTER: usize = 0;
const LOGIN: usize = 1;
const EXIT: usize = 2;

fn run(desk: &mut BookingDesk, answers: Vec<Answer>) -> ScriptedConsole {
    let mut console = ScriptedConsole::new(answers);
    main_menu(&mut console, desk).expect("script should run to Exit");
    console
}

#[test]
fn register_login_book_and_cancel() {
    use Answer::*;
    let mut desk = BookingDesk::with_default_flights();
    let console = run(
        &mut desk,
        vec![
            Pick(REGISTER),
            Text("ana"),
            Text("pw"),
            Pick(LOGIN),
            Text("ana"),
            Text("pw"),
            Text("303"),
            Text("cancel"),
            Text("303"),
            Text("exit"),
            Pick(EXIT),
        ],
    );

    assert!(console.said("User registered: ana"));
    assert!(console.said("Login successful for: ana"));
    assert!(console.said("Booking successful for flight: 303"));
    assert!(console.said("9 seats remaining."));
    assert!(console.said("Cancellation successful for flight: 303"));
    assert!(console.said("10 seats available after cancellation."));
    assert_eq!(console.lines().last(), Some(&"Exiting..."));
    assert_eq!(desk.find_flight("303").unwrap().available_seats, 10);
}

#[test]
fn flights_are_listed_before_each_prompt() {
    use Answer::*;
    let mut desk = BookingDesk::with_default_flights();
    desk.register("ana", "pw").unwrap();
    let console = run(
        &mut desk,
        vec![Pick(LOGIN), Text("ana"), Text("pw"), Text("101"), Text("EXIT"), Pick(EXIT)],
    );

    let headers = console
        .lines()
        .iter()
        .filter(|l| **l == "\nAvailable Flights:")
        .count();
    assert_eq!(headers, 2);
    assert!(console.said("Flight 101 to USA has 50 seats available."));
    assert!(console.said("Flight 101 to USA has 49 seats available."));
    assert!(console.said("Flight 303 to Delhi has 10 seats available."));
}

#[test]
fn wrong_password_never_enters_reservations() {
    use Answer::*;
    let mut desk = BookingDesk::with_default_flights();
    desk.register("ana", "pw").unwrap();
    let console = run(
        &mut desk,
        vec![Pick(LOGIN), Text("ana"), Text("nope"), Pick(EXIT)],
    );

    assert!(console
        .output
        .contains(&(Tone::Failure, "Invalid credentials.".to_string())));
    assert!(!console.said("\nAvailable Flights:"));
}

#[test]
fn unknown_and_sold_out_flights_share_one_message() {
    use Answer::*;
    let mut desk = BookingDesk::new(vec![Flight::new("1", "Nowhere", 1)]);
    desk.register("ana", "pw").unwrap();
    let console = run(
        &mut desk,
        vec![
            Pick(LOGIN),
            Text("ana"),
            Text("pw"),
            Text("1"),
            Text("1"),
            Text("42"),
            Text("exit"),
            Pick(EXIT),
        ],
    );

    let failures = console
        .lines()
        .iter()
        .filter(|l| **l == "Invalid flight number or no available seats.")
        .count();
    assert_eq!(failures, 2);
    assert!(console.said("0 seats remaining."));
}

#[test]
fn cancel_without_reservation_and_unknown_flight() {
    use Answer::*;
    let mut desk = BookingDesk::with_default_flights();
    desk.register("ana", "pw").unwrap();
    let console = run(
        &mut desk,
        vec![
            Pick(LOGIN),
            Text("ana"),
            Text("pw"),
            Text("cancel"),
            Text("202"),
            Text("Cancel"),
            Text("999"),
            Text("exit"),
            Pick(EXIT),
        ],
    );

    assert!(console.said("You have no reservation on flight 202."));
    assert!(console.said("Invalid flight number."));
    assert_eq!(desk.find_flight("202").unwrap().available_seats, 30);
}

#[test]
fn mine_lists_held_seats() {
    use Answer::*;
    let mut desk = BookingDesk::with_default_flights();
    desk.register("ana", "pw").unwrap();
    let console = run(
        &mut desk,
        vec![
            Pick(LOGIN),
            Text("ana"),
            Text("pw"),
            Text("mine"),
            Text("202"),
            Text("202"),
            Text("mine"),
            Text("exit"),
            Pick(EXIT),
        ],
    );

    assert!(console.said("You have no reservations."));
    assert!(console.said("  202: 2 seat(s)"));
}

#[test]
fn duplicate_registration_and_invalid_option() {
    use Answer::*;
    let mut desk = BookingDesk::with_default_flights();
    let console = run(
        &mut desk,
        vec![
            Pick(REGISTER),
            Text("ana"),
            Text("pw"),
            Pick(REGISTER),
            Text("ana"),
            Text("other"),
            Pick(7),
            Pick(EXIT),
        ],
    );

    assert!(console.said("Register failed: username `ana` is already registered"));
    assert!(console.said("Invalid option. Please try again."));
    assert!(desk.login("ana", "pw").is_ok());
}
