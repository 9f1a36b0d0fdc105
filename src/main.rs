mod config;
mod controller;
mod grid;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, trace};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use config::Settings;
use controller::GameController;
use grid::GridSimulation;
use render::Renderer;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let settings = Settings::parse();
    settings.validate()?;

    // Set up logging before anything else
    let log_file = File::create(&settings.log_file)
        .with_context(|| format!("Failed to create log file {}", settings.log_file.display()))?;
    WriteLogger::init(settings.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    info!("Starting Serpent Sprint with {:?}", settings);

    let sim = match settings.seed {
        Some(seed) => GridSimulation::with_seed(settings.grid_size(), seed),
        None => GridSimulation::new(settings.grid_size()),
    };
    let mut controller = GameController::new(sim);
    let mut renderer = Renderer::new();

    let mut terminal = setup_terminal()?;
    let result = run(
        &mut terminal,
        &mut controller,
        &mut renderer,
        settings.tick_interval(),
    );
    let restored = restore_terminal(&mut terminal);

    if let Err(e) = &result {
        error!("Game loop failed: {:#}", e);
    }
    result?;
    restored?;

    info!(
        "Exiting with best score {}",
        controller.simulation().best_score()
    );
    Ok(())
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    undo_on_error(enter_screen(), || {
        // Best effort, the original error is what gets reported
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    })
}

fn enter_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
        .context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Runs `undo` when `result` is an error, then hands the result back.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if let Err(e) = &result {
        error!("Terminal setup failed: {:#}", e);
        undo();
    }
    result
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// One iteration per tick: drain all input that arrives before the tick is
/// due, advance the game once, then draw once.
fn run(
    terminal: &mut Term,
    controller: &mut GameController,
    renderer: &mut Renderer,
    tick_rate: Duration,
) -> Result<()> {
    terminal
        .draw(|frame| renderer.render(frame, &controller.snapshot()))
        .context("Failed to draw frame")?;
    let mut last_tick = Instant::now();

    loop {
        while event::poll(tick_rate.saturating_sub(last_tick.elapsed()))
            .context("Failed to poll events")?
        {
            let event = event::read().context("Failed to read event")?;
            if let Some(input) = input::translate(event) {
                controller.handle_event(input, &*renderer);
            }
            if controller.should_quit() {
                return Ok(());
            }
        }
        last_tick = Instant::now();

        if let Some(result) = controller.tick() {
            trace!("Step: {:?}", result);
        }

        terminal
            .draw(|frame| renderer.render(frame, &controller.snapshot()))
            .context("Failed to draw frame")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn test_undo_runs_on_setup_failure() {
        let undone = Cell::new(false);
        let result: Result<()> = undo_on_error(Err(anyhow!("no tty")), || undone.set(true));

        assert!(undone.get());
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }

    #[test]
    fn test_undo_skipped_on_success() {
        let undone = Cell::new(false);
        let result = undo_on_error(Ok(7), || undone.set(true));

        assert!(!undone.get());
        assert_eq!(result.unwrap(), 7);
    }
}
