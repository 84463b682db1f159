// Entrypoint for the CLI application.
// - Reads configuration from the environment and starts file logging.
// - Builds the booking desk and hands it to the UI loop.

use anyhow::Context;
use flightdesk_cli::{
    config::AppConfig,
    desk::BookingDesk,
    logging::init_logging,
    ui::{main_menu, TerminalConsole},
};
use log::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let _logger = init_logging(&config.log_level, &config.log_dir)?;

    let flights = config
        .load_flights()
        .context("Failed to load flight catalog")?;
    info!("event=catalog_loaded module=main flights={}", flights.len());
    let mut desk = BookingDesk::new(flights);

    // Blocks until the user picks "Exit".
    main_menu(&mut TerminalConsole, &mut desk)?;
    info!("event=app_exit module=main status=ok");
    Ok(())
}
