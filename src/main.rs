use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use dbdesk::app::App;
use dbdesk::config::{Cli, Config};
use dbdesk::{logging, ui};

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let _log_guard = logging::init(config.log_file.as_deref())?;
    tracing::info!("starting dbdesk {}", env!("CARGO_PKG_VERSION"));

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let mut app = App::new(config);
    let run_result = run_app(&mut terminal, &mut app);
    // Dropping the app closes every open session
    drop(app);

    restore_terminal(&mut terminal)?;
    if let Err(ref err) = run_result {
        tracing::error!("exiting with error: {:#}", err);
    }
    run_result
}

fn run_app(terminal: &mut Term, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;
        app.handle_events()?;
    }
    Ok(())
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Leaves the alternate screen before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
