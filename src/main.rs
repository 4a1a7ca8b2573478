pub mod ui;

use chrono::Utc;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use openmind::{
    app_dirs::AppDirs,
    game::{Game, Phase, SubmitOutcome, TickEvent},
    leaderboard::Leaderboard,
    runtime::{CrosstermEventSource, GameEvent, Runner, TICK_RATE_MS},
    storage::{FileKvStore, KvStore},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

const MSG_EMPTY_USERNAME: &str = "Please enter a username to start the game.";
const MSG_INCORRECT: &str = "Incorrect! Try again.";
const MSG_TIME_UP: &str = "Time is up! Moving to next level.";

/// terminal hidden-word guessing game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the word hidden in each of five images before the 30-second clock runs out. Scores land on a local top-10 leaderboard that auto-resets after two idle hours."
)]
pub struct Cli {
    /// prefill the username prompt on the landing screen
    #[clap(short = 'u', long)]
    username: Option<String>,

    /// print the current leaderboard and exit
    #[clap(long)]
    leaderboard: bool,

    /// override the key-value store file location
    #[clap(long)]
    store: Option<PathBuf>,
}

impl Cli {
    fn open_store(&self) -> Box<dyn KvStore> {
        match &self.store {
            Some(path) => Box::new(FileKvStore::with_path(path)),
            None => Box::new(FileKvStore::new()),
        }
    }
}

/// Bin-side state: the game plus the text buffer and the transient
/// notice line standing in for the original's blocking alerts.
#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub input: String,
    pub notice: Option<String>,
}

impl App {
    pub fn new(game: Game, prefill: Option<String>) -> Self {
        Self {
            game,
            input: prefill.unwrap_or_default(),
            notice: None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut board = Leaderboard::new(cli.open_store());
    // Stale boards are wiped lazily, at startup only.
    let _ = board.evaluate_auto_reset(Utc::now().timestamp_millis());

    if cli.leaderboard {
        println!("{}", board.display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let game = Game::new(Some(board)).with_results_log(AppDirs::log_path());
    let mut app = App::new(game, cli.username.clone());
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyOutcome {
    Continue,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                let expired = app.game.on_tick(TICK_RATE_MS);
                if expired == Some(TickEvent::TimeExpired) {
                    app.input.clear();
                    app.notice = Some(MSG_TIME_UP.to_string());
                }

                // Redraw while the countdown is visible, and on the expiry
                // transition itself (which may leave Playing entirely).
                if expired.is_some() || app.game.phase == Phase::Playing {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => {
                if handle_key(app, key) == KeyOutcome::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    match app.game.phase.clone() {
        Phase::Landing => match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Enter => match app.game.start_game(&app.input) {
                Ok(()) => {
                    app.input.clear();
                    app.notice = None;
                }
                Err(_) => app.notice = Some(MSG_EMPTY_USERNAME.to_string()),
            },
            KeyCode::Char(c) => {
                app.input.push(c);
                app.notice = None;
            }
            _ => {}
        },
        Phase::Playing => match key.code {
            KeyCode::Esc => {
                app.input.clear();
                app.notice = None;
                app.game.reset_to_landing();
            }
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Enter => match app.game.submit_answer(&app.input) {
                SubmitOutcome::Correct { .. } => {
                    app.input.clear();
                    app.notice = None;
                }
                SubmitOutcome::Incorrect => {
                    // input cleared for retry; no penalty, clock keeps running
                    app.input.clear();
                    app.notice = Some(MSG_INCORRECT.to_string());
                }
            },
            KeyCode::Char(c) => {
                app.input.push(c);
                app.notice = None;
            }
            _ => {}
        },
        Phase::LevelComplete { .. } => match key.code {
            KeyCode::Enter | KeyCode::Char('n') => {
                app.notice = None;
                app.game.advance_level();
            }
            KeyCode::Esc => {
                app.input.clear();
                app.notice = None;
                app.game.reset_to_landing();
            }
            _ => {}
        },
        Phase::GameComplete => match key.code {
            KeyCode::Char('p') | KeyCode::Esc => {
                app.input.clear();
                app.notice = None;
                app.game.reset_to_landing();
            }
            KeyCode::Char('l') => app.game.view_leaderboard(),
            _ => {}
        },
        Phase::Leaderboard => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.game.return_from_leaderboard(),
            KeyCode::Char('m') => {
                app.input.clear();
                app.notice = None;
                app.game.reset_to_landing();
            }
            _ => {}
        },
    }

    KeyOutcome::Continue
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use openmind::storage::MemoryKvStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        App::new(Game::new(None), None)
    }

    fn app_with_board() -> App {
        let board = Leaderboard::new(Box::new(MemoryKvStore::new()));
        App::new(Game::new(Some(board)), None)
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["openmind"]);

        assert_eq!(cli.username, None);
        assert!(!cli.leaderboard);
        assert_eq!(cli.store, None);
    }

    #[test]
    fn test_cli_username_flag() {
        let cli = Cli::parse_from(["openmind", "-u", "alice"]);
        assert_eq!(cli.username, Some("alice".to_string()));

        let cli = Cli::parse_from(["openmind", "--username", "bob"]);
        assert_eq!(cli.username, Some("bob".to_string()));
    }

    #[test]
    fn test_cli_leaderboard_and_store_flags() {
        let cli = Cli::parse_from(["openmind", "--leaderboard", "--store", "/tmp/s.json"]);
        assert!(cli.leaderboard);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_app_new_prefills_username_input() {
        let app = App::new(Game::new(None), Some("alice".to_string()));
        assert_eq!(app.input, "alice");
        assert_eq!(app.game.phase, Phase::Landing);
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_landing_typing_and_start() {
        let mut app = app();
        type_str(&mut app, "alice");
        assert_eq!(app.input, "alice");

        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.game.phase, Phase::Playing);
        assert_eq!(app.game.session.username, "alice");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_landing_empty_username_shows_notice() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.game.phase, Phase::Landing);
        assert_eq!(app.notice.as_deref(), Some(MSG_EMPTY_USERNAME));
    }

    #[test]
    fn test_landing_backspace_edits_input() {
        let mut app = app();
        type_str(&mut app, "ab");
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input, "a");
    }

    #[test]
    fn test_incorrect_guess_clears_input_and_notices() {
        let mut app = app();
        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));

        type_str(&mut app, "wrong");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.game.phase, Phase::Playing);
        assert!(app.input.is_empty());
        assert_eq!(app.notice.as_deref(), Some(MSG_INCORRECT));
    }

    #[test]
    fn test_full_playthrough_via_keys() {
        let mut app = app_with_board();
        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));

        for word in ["om1", "fabric", "agi", "sdk", "api"] {
            type_str(&mut app, word);
            handle_key(&mut app, key(KeyCode::Enter));
            assert!(matches!(app.game.phase, Phase::LevelComplete { .. }));
            handle_key(&mut app, key(KeyCode::Enter));
        }

        assert_eq!(app.game.phase, Phase::GameComplete);
        assert_eq!(app.game.session.score, 1375);

        let entries = app.game.leaderboard.as_ref().unwrap().load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 1375);
    }

    #[test]
    fn test_game_complete_leaderboard_navigation() {
        let mut app = app_with_board();
        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));
        app.game.session.current_level = 4;
        app.game.load_level();
        type_str(&mut app, "api");
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.game.phase, Phase::GameComplete);

        handle_key(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.game.phase, Phase::Leaderboard);

        handle_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.game.phase, Phase::GameComplete);

        handle_key(&mut app, key(KeyCode::Char('l')));
        handle_key(&mut app, key(KeyCode::Char('m')));
        assert_eq!(app.game.phase, Phase::Landing);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_phase() {
        let mut app = app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), KeyOutcome::Quit);

        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(handle_key(&mut app, ctrl_c), KeyOutcome::Quit);
    }

    #[test]
    fn test_esc_quits_only_from_landing() {
        let mut app = app();
        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), KeyOutcome::Continue);
        assert_eq!(app.game.phase, Phase::Landing);

        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), KeyOutcome::Quit);
    }

    #[test]
    fn test_ui_renders_every_phase() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = app_with_board();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&mut app, f)).unwrap();

        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));
        terminal.draw(|f| ui(&mut app, f)).unwrap();

        type_str(&mut app, "om1");
        handle_key(&mut app, key(KeyCode::Enter));
        terminal.draw(|f| ui(&mut app, f)).unwrap();

        app.game.session.current_level = 4;
        app.game.phase = Phase::GameComplete;
        terminal.draw(|f| ui(&mut app, f)).unwrap();

        handle_key(&mut app, key(KeyCode::Char('l')));
        terminal.draw(|f| ui(&mut app, f)).unwrap();
    }

    #[test]
    fn test_ui_playing_screen_contents() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = app();
        type_str(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Enter));

        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&mut app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Player: alice"));
        assert!(content.contains("Level 1/5"));
        assert!(content.contains("30s"));
    }

    #[test]
    fn test_tick_constant_is_subsecond() {
        const _: () = assert!(TICK_RATE_MS > 0);
        const _: () = assert!(TICK_RATE_MS <= 1000);
    }
}
