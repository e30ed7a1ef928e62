mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::UiEvent;
use crate::state::replayer::Replayer;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::info;
use scorebook::cricsheet::Match;
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, PartialEq)]
enum Launch {
    Exit,
    Score { replay: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let replay_path = match parse_cli_args(std::env::args().skip(1)) {
        Ok(Launch::Exit) => return Ok(()),
        Ok(Launch::Score { replay }) => replay,
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    // Load before touching the terminal so a bad file is reported plainly.
    let replay = match &replay_path {
        Some(path) => Some(Match::from_path(path)?),
        None => None,
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let settings = AppSettings {
        replay_path,
        ..AppSettings::load()
    };
    let replay_interval = settings.replay_interval;

    let mut app = App::new(settings);
    if let Some(game) = &replay {
        app.state.game.title = game.title();
        app.state.replaying = true;
    }
    let app = Arc::new(Mutex::new(app));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Replay thread, one delivery per tick
    let replay_task = replay.map(|game| {
        info!("replaying {}", game.title());
        let replayer = Replayer::new(&game, ui_event_tx.clone(), replay_interval);
        tokio::spawn(replayer.run())
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx).await;

    input_handler.abort();
    if let Some(task) = replay_task {
        task.abort();
    }

    Ok(())
}

fn parse_cli_args(mut args: impl Iterator<Item = String>) -> Result<Launch, String> {
    let mut replay = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return Ok(Launch::Exit);
            }
            "-V" | "--version" => {
                println!("crictui {}", env!("CARGO_PKG_VERSION"));
                return Ok(Launch::Exit);
            }
            "-r" | "--replay" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{arg} needs a match file"))?;
                replay = Some(PathBuf::from(path));
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }
    Ok(Launch::Score { replay })
}

fn usage_text() -> &'static str {
    "crictui - live cricket scorer for the terminal

Usage:
  crictui
  crictui --replay <match.json>
  crictui --help
  crictui --version

Environment:
  CRICTUI_LOG_LEVEL           Log level shown in the log pane (default info)
  CRICTUI_BALLS_PER_OVER      Legal balls before the over-complete prompt (default 6)
  CRICTUI_REPLAY_INTERVAL_MS  Delay between replayed deliveries (default 400)"
}

/// Single consumer: every key press and replayed ball is handled in order
/// under the one app lock, so balls reach the scorer strictly one at a time.
async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
) {
    while let Some(ui_event) = ui_events.recv().await {
        handle_ui_event(ui_event, &app).await;
        let mut app_guard = app.lock().await;
        draw::draw(&mut terminal, &mut app_guard);
    }
}

async fn handle_ui_event(ui_event: UiEvent, app: &Arc<Mutex<App>>) {
    match ui_event {
        UiEvent::AppStarted | UiEvent::Resize => {}
        UiEvent::KeyPressed(key_event) => keys::handle_key_bindings(key_event, app).await,
        UiEvent::Replay(event) => app.lock().await.on_replay(event),
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        // crossterm's read blocks, so keep it off the async workers.
        let Ok(Ok(event)) = tokio::task::spawn_blocking(crossterm_event::read).await else {
            continue;
        };
        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Launch, String> {
        parse_cli_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_starts_an_empty_match() {
        assert_eq!(parse(&[]), Ok(Launch::Score { replay: None }));
    }

    #[test]
    fn replay_takes_a_path() {
        assert_eq!(
            parse(&["--replay", "match.json"]),
            Ok(Launch::Score {
                replay: Some(PathBuf::from("match.json"))
            })
        );
        assert!(parse(&["-r"]).unwrap_err().contains("needs a match file"));
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert_eq!(
            parse(&["--serve"]),
            Err("Unknown argument: --serve".to_string())
        );
    }
}
