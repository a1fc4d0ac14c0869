//! The application loop: [`AppRunner`], [`Driver`], [`EventLoopDriver`],
//! [`App`].
//!
//! The runner owns the [`Game`] and turns input [`Msg`]s into state
//! changes. Drivers supply input and render a [`View`] of the state; the
//! runner only asks for a render when something visible changed.

use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};

use rand::Rng;

use crate::board::{Board, Pos};
use crate::game::{Game, Highlight, KeyOutcome, Status};
use crate::messages::{Key, ModMask, Msg};

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// A borrowed snapshot of the game handed to drivers for rendering.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub board: &'a Board,
    pub score: u64,
    pub moves: u64,
    pub status: Status,
    pub win_tile: u32,
    pub highlights: &'a [(Pos, Highlight)],
}

impl<'a> View<'a> {
    /// Build a view of `game`.
    pub fn of<R: Rng>(game: &'a Game<R>) -> Self {
        Self {
            board: game.board(),
            score: game.score(),
            moves: game.moves(),
            status: game.status(),
            win_tile: game.config().win_tile,
            highlights: game.highlights(),
        }
    }

    /// Highlight of the cell at `pos`, if the last turn touched it.
    pub fn highlight(&self, pos: Pos) -> Option<Highlight> {
        self.highlights
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|&(_, h)| h)
    }

    /// One-line status text.
    pub fn status_line(&self) -> String {
        match self.status {
            Status::Playing => format!("Score {}", self.score),
            Status::Won => format!("Score {}  -  {} reached!", self.score, self.win_tile),
            Status::Lost => format!("Score {}  -  no moves left", self.score),
        }
    }
}

// ---------------------------------------------------------------------------
// AppRunner
// ---------------------------------------------------------------------------

/// What a message did to the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Update {
    /// Visible state changed; a render is pending.
    Redraw,
    /// A bound key had no effect (e.g. a move that slides nothing).
    Unchanged,
    /// The message is not bound to anything.
    Ignored,
    /// The application should stop.
    Quit,
}

/// Message handling shared by poll-style and event-loop drivers.
pub struct AppRunner<R: Rng> {
    game: Game<R>,
    dirty: bool,
    quit: bool,
}

impl<R: Rng> AppRunner<R> {
    pub fn new(game: Game<R>) -> Self {
        Self {
            game,
            dirty: false,
            quit: false,
        }
    }

    /// Start a fresh game and schedule the first render.
    pub fn init(&mut self) {
        self.game.start();
        self.dirty = true;
    }

    /// Process one input message.
    ///
    /// Arrows move; `r` restarts; `q`, `Escape` and `Ctrl+C` quit. Anything
    /// else is [`Update::Ignored`].
    pub fn handle_msg(&mut self, msg: Msg) -> Update {
        if self.quit {
            return Update::Quit;
        }
        let update = match msg {
            Msg::Init => {
                self.init();
                Update::Redraw
            }
            Msg::Quit => Update::Quit,
            Msg::Screen { .. } => Update::Redraw,
            Msg::KeyDown { key, modifiers } => self.handle_key(key, modifiers),
        };
        match update {
            Update::Redraw => self.dirty = true,
            Update::Quit => self.quit = true,
            Update::Unchanged | Update::Ignored => {}
        }
        update
    }

    fn handle_key(&mut self, key: Key, modifiers: ModMask) -> Update {
        match key {
            Key::Char('c') if modifiers.contains(ModMask::CTRL) => Update::Quit,
            Key::Char('q') | Key::Escape => Update::Quit,
            Key::Char('r') => {
                self.game.start();
                Update::Redraw
            }
            _ => match self.game.handle_key(&key) {
                KeyOutcome::Moved(turn) if turn.changed => Update::Redraw,
                KeyOutcome::Moved(_) => Update::Unchanged,
                KeyOutcome::Ignored => Update::Ignored,
            },
        }
    }

    /// Whether a quit was requested.
    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a render is pending.
    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// The current view, regardless of pending state.
    pub fn view(&self) -> View<'_> {
        View::of(&self.game)
    }

    /// The current view if a render is pending, clearing the flag.
    pub fn take_redraw(&mut self) -> Option<View<'_>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(View::of(&self.game))
    }

    #[inline]
    pub fn game(&self) -> &Game<R> {
        &self.game
    }
}

// ---------------------------------------------------------------------------
// Driver traits
// ---------------------------------------------------------------------------

/// Poll-style back-end (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Poll for input, sending messages through `tx`. May block briefly but
    /// should return so the loop can process what was sent.
    fn poll_msgs(&mut self, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Draw the view.
    fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the display.
    fn close(&mut self);
}

/// Callback-style back-end that owns its own event loop (e.g. a browser).
pub trait EventLoopDriver {
    fn run<R: Rng + 'static>(self, runner: AppRunner<R>) -> Result<(), Box<dyn Error>>;
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<R: Rng, D: Driver> {
    pub game: Game<R>,
    pub driver: D,
}

/// Runs a [`Game`] against a poll-style [`Driver`].
pub struct App<R: Rng, D: Driver> {
    runner: AppRunner<R>,
    driver: D,
}

impl<R: Rng, D: Driver> App<R, D> {
    pub fn new(config: AppConfig<R, D>) -> Self {
        Self {
            runner: AppRunner::new(config.game),
            driver: config.driver,
        }
    }

    /// Run the loop until a quit is requested.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init`, which starts the game.
    /// 3. Loops: process queued messages → render if needed → poll.
    /// 4. Closes the driver, also when an error ends the loop.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;

        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let result = self.event_loop(&tx, &rx);
        self.driver.close();
        result
    }

    fn event_loop(&mut self, tx: &Sender<Msg>, rx: &Receiver<Msg>) -> Result<(), Box<dyn Error>> {
        loop {
            self.process_pending(rx)?;
            if self.runner.should_quit() {
                log::debug!("quit requested");
                return Ok(());
            }
            self.driver.poll_msgs(tx)?;
        }
    }

    /// Drain queued messages, then render once if anything changed.
    fn process_pending(&mut self, rx: &Receiver<Msg>) -> Result<(), Box<dyn Error>> {
        while let Ok(msg) = rx.try_recv() {
            if self.runner.handle_msg(msg) == Update::Quit {
                return Ok(());
            }
        }
        if let Some(view) = self.runner.take_redraw() {
            self.driver.render(&view)?;
        }
        Ok(())
    }

    #[inline]
    pub fn runner(&self) -> &AppRunner<R> {
        &self.runner
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::config::GameConfig;

    /// Replays a fixed message script, one message per poll.
    struct ScriptDriver {
        script: VecDeque<Msg>,
        frames: Vec<Board>,
        closed: bool,
    }

    impl ScriptDriver {
        fn new(script: Vec<Msg>) -> Self {
            Self {
                script: script.into(),
                frames: Vec::new(),
                closed: false,
            }
        }
    }

    impl Driver for ScriptDriver {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }

        fn poll_msgs(&mut self, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>> {
            let msg = self.script.pop_front().unwrap_or(Msg::Quit);
            tx.send(msg)?;
            Ok(())
        }

        fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>> {
            self.frames.push(view.board.clone());
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn game() -> Game<SmallRng> {
        Game::new(GameConfig::default(), SmallRng::seed_from_u64(21)).unwrap()
    }

    fn runner_with(rows: &[&[u32]]) -> AppRunner<SmallRng> {
        let board = Board::from_rows(rows).unwrap();
        let game = Game::from_board(GameConfig::default(), board, SmallRng::seed_from_u64(4));
        AppRunner::new(game.unwrap())
    }

    #[test]
    fn init_renders_opening_board() {
        let mut app = App::new(AppConfig {
            game: game(),
            driver: ScriptDriver::new(vec![]),
        });
        app.run().unwrap();
        let driver = app.driver();
        assert!(driver.closed);
        assert_eq!(driver.frames.len(), 1);
        assert_eq!(driver.frames[0].empty_cells().len(), 14);
    }

    #[test]
    fn ignored_keys_do_not_render() {
        let script = vec![
            Msg::key(Key::Char('x')),
            Msg::key(Key::Tab),
            Msg::key(Key::Enter),
        ];
        let mut app = App::new(AppConfig {
            game: game(),
            driver: ScriptDriver::new(script),
        });
        app.run().unwrap();
        assert_eq!(app.driver().frames.len(), 1);
    }

    #[test]
    fn quit_key_stops_before_later_messages() {
        let script = vec![Msg::key(Key::Char('q')), Msg::key(Key::ArrowLeft)];
        let mut app = App::new(AppConfig {
            game: game(),
            driver: ScriptDriver::new(script),
        });
        app.run().unwrap();
        assert!(app.runner().should_quit());
        assert_eq!(app.runner().game().moves(), 0);
    }

    #[test]
    fn changed_move_redraws_unchanged_does_not() {
        let mut r = runner_with(&[&[2, 0, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        assert_eq!(r.handle_msg(Msg::key(Key::ArrowLeft)), Update::Unchanged);
        assert!(r.take_redraw().is_none());

        assert_eq!(r.handle_msg(Msg::key(Key::ArrowRight)), Update::Redraw);
        let view = r.take_redraw().expect("pending render");
        assert_eq!(view.board.get(Pos::new(0, 3)), Some(2));
        assert!(r.take_redraw().is_none());
    }

    #[test]
    fn restart_and_quit_keys() {
        let mut r = runner_with(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        assert_eq!(r.handle_msg(Msg::key(Key::ArrowLeft)), Update::Redraw);
        assert!(r.game().score() > 0);
        assert_eq!(r.handle_msg(Msg::key(Key::Char('r'))), Update::Redraw);
        assert_eq!(r.game().score(), 0);

        assert_eq!(r.handle_msg(Msg::key(Key::Char('c'))), Update::Ignored);
        assert_eq!(
            r.handle_msg(Msg::key_mod(Key::Char('c'), ModMask::CTRL)),
            Update::Quit
        );
        assert!(r.should_quit());
        assert_eq!(r.handle_msg(Msg::key(Key::ArrowDown)), Update::Quit);
    }

    #[test]
    fn view_reports_status_and_highlights() {
        let mut r = runner_with(&[&[1024, 1024, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        r.handle_msg(Msg::key(Key::ArrowLeft));
        let view = r.view();
        assert_eq!(view.status, Status::Won);
        assert_eq!(view.score, 2048);
        assert_eq!(view.highlight(Pos::new(0, 0)), Some(Highlight::Merged));
        assert!(view.status_line().contains("2048 reached"));
    }
}
