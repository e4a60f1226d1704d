use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use five_hundred::client::GameClient;
use five_hundred::config::ClientConfig;
use five_hundred::session::Session;
use five_hundred::transport::HttpTransport;
use five_hundred::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// The terminal belongs to the UI, so logs go to a file.
fn init_logging(cfg: &ClientConfig) -> io::Result<()> {
    let file = File::create(&cfg.log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let cfg = match ClientConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("five-hundred: {err}");
            std::process::exit(2);
        }
    };
    if !io::stdout().is_terminal() {
        println!(
            "five-hundred needs a real terminal (TTY).\nRun it in a terminal and press q to quit. Version: {}",
            five_hundred::VERSION
        );
        return Ok(());
    }
    init_logging(&cfg)?;
    info!(server = %cfg.server_url, version = five_hundred::VERSION, "starting");

    let transport = HttpTransport::new(&cfg.server_url, cfg.timeout);
    let mut session = Session::new(GameClient::new(transport), &cfg.player_name);
    if let Some(seed) = cfg.seed {
        session = session.with_seed(seed);
    }
    let mut app = AppState::new(session, &cfg.server_url)
        .with_bot_turn_limit(cfg.bot_turn_limit)
        .with_bot_delay_ms(cfg.bot_delay_ms);

    let mut terminal = setup_terminal()?;
    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(100));

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    info!("exiting");
    res
}
