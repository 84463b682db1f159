// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `model`: `Flight` and `User` records.
// - `desk`: in-memory registries and the register / login / book /
//   cancel operations.
// - `ui`: the menu loop, talking to the terminal through `Console`.
// - `config`: environment-driven settings and the flight catalog loader.
// - `logging`: rolling file logger setup.
pub mod config;
pub mod desk;
pub mod logging;
pub mod model;
pub mod ui;

pub use desk::{BookingDesk, BookingError, BookingResult, SeatChange, Session};
pub use model::{Flight, User};
