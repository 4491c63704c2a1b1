//! Zheng Tally Entry Point
//!
//! Launches the terminal tally counter.
//!
//! Usage:
//!   zheng-tui
//!
//! Environment:
//!   RUST_LOG        tracing filter (e.g. zheng_core=debug)
//!   ZHENG_NO_BELL   disable terminal-bell haptic feedback
//!   COLORFGBG       consulted once at startup to pick light or dark

use std::io;
use std::panic;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zheng_core::{ProblemReport, RenderFault, Theme};
use zheng_tui::haptics::TerminalHaptics;
use zheng_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: zheng-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it interactively, or under `script -c zheng-tui /dev/null`");
        eprintln!("if your environment has no controlling terminal.");
        std::process::exit(1);
    }

    // Set up panic hook to restore the terminal and offer an error report
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
        print_recovery_offer("panic during rendering", &panic_info.to_string());
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(error) = &result {
        print_recovery_offer("the tally screen failed", &format!("{error:#}"));
    }

    result
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let theme = Theme::from_ambient(ambient_prefers_dark());
    let haptics = TerminalHaptics::from_env();

    let mut app = App::new(size.width, size.height, theme, haptics);
    app.run(terminal).await
}

/// Read terminal background hints once at startup. `COLORFGBG` is set by
/// several emulators as "fg;bg"; a low bg index means a dark background.
fn ambient_prefers_dark() -> bool {
    match std::env::var("COLORFGBG") {
        Ok(value) => {
            let bg = value.rsplit(';').next().and_then(|s| s.parse::<u8>().ok());
            matches!(bg, Some(0..=6) | Some(8))
        }
        Err(_) => false,
    }
}

/// After a crash, tell the user how to report it and how to get going again.
fn print_recovery_offer(message: &str, diagnostic: &str) {
    let report = ProblemReport::new(RenderFault::new(message, diagnostic));
    eprintln!();
    eprintln!("Something went wrong. Your tally is kept in memory only, so");
    eprintln!("relaunch zheng-tui to start a fresh count.");
    eprintln!();
    eprintln!("If this keeps happening, email a report (pre-filled link):");
    eprintln!("  {}", report.mailto_url());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg_dark_backgrounds() {
        std::env::set_var("COLORFGBG", "15;0");
        assert!(ambient_prefers_dark());
        std::env::set_var("COLORFGBG", "0;15");
        assert!(!ambient_prefers_dark());
        std::env::remove_var("COLORFGBG");
        assert!(!ambient_prefers_dark());
    }
}
