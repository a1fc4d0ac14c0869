//! Crossterm terminal driver for twenty48.
//!
//! Provides a [`CrosstermDriver`] that implements [`twenty48_core::Driver`]:
//! arrow keys come in as [`Msg::KeyDown`], and each [`View`] is drawn as a
//! grid of coloured tiles in the alternate screen.

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use twenty48_core::{
    Driver, Highlight, Pos, View,
    messages::{Key, ModMask, Msg},
    style::{self, Color},
};

/// Width of a tile in columns.
const TILE_W: u16 = 8;
/// Height of a tile in rows.
const TILE_H: u16 = 3;
/// Top-left corner of the board.
const ORIGIN: (u16, u16) = (2, 2);
/// How long one poll waits for input.
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

const HELP: &str = "arrows: move   r: restart   q: quit";

/// Maps a [`twenty48_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    if mods.contains(KeyModifiers::META) {
        m = m | ModMask::META;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate a terminal event into a message. Key releases are dropped so
/// one press is one move on terminals that report both.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind != KeyEventKind::Release => to_key(code).map(|key| Msg::KeyDown {
            key,
            modifiers: to_mod_mask(modifiers),
        }),
        Event::Resize(width, height) => Some(Msg::Screen { width, height }),
        _ => None,
    }
}

/// The text of a tile, centred in `width` columns. Empty cells are blank.
fn tile_label(value: u32, width: usize) -> String {
    if value == 0 {
        return " ".repeat(width);
    }
    format!("{value:^width$}")
}

/// Width and height of the framed board, checked so that the frame, the
/// status line and the help line below it all fit in `u16` coordinates.
fn board_extent(size: usize) -> io::Result<(u16, u16)> {
    let fits = |tile: u16, origin: u16, below: usize| -> Option<u16> {
        let span = size.checked_mul(usize::from(tile) + 1)?.checked_add(1)?;
        let end = span.checked_add(usize::from(origin) + below)?;
        u16::try_from(end).ok()?;
        u16::try_from(span).ok()
    };
    match (fits(TILE_W, ORIGIN.0, 0), fits(TILE_H, ORIGIN.1, 2)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("a {size}x{size} board does not fit in a terminal"),
        )),
    }
}

/// Screen position of the top-left corner of the tile at `pos`. Only valid
/// for boards accepted by [`board_extent`].
fn tile_origin(pos: Pos) -> (u16, u16) {
    (
        ORIGIN.0 + pos.col as u16 * (TILE_W + 1),
        ORIGIN.1 + pos.row as u16 * (TILE_H + 1),
    )
}

/// A terminal back-end for twenty48 using crossterm.
pub struct CrosstermDriver {
    clear: bool,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self { clear: true }
    }

    fn draw_board(&self, out: &mut impl Write, view: &View<'_>) -> io::Result<()> {
        let (width, height) = board_extent(view.board.size())?;

        // Board frame: one line of padding around and between tiles.
        queue!(out, SetBackgroundColor(to_ct_color(style::BOARD_BG)))?;
        for y in 0..height {
            queue!(
                out,
                cursor::MoveTo(ORIGIN.0 - 1, ORIGIN.1 - 1 + y),
                Print(" ".repeat(usize::from(width)))
            )?;
        }

        for (pos, value) in view.board.iter() {
            let tile = style::tile_style(value);
            let (x, y) = tile_origin(pos);
            let attr = match view.highlight(pos) {
                Some(Highlight::Merged) => Attribute::Bold,
                Some(Highlight::Spawned) => Attribute::Underlined,
                None => Attribute::NormalIntensity,
            };
            queue!(
                out,
                SetBackgroundColor(to_ct_color(tile.bg)),
                SetForegroundColor(to_ct_color(tile.fg)),
            )?;
            for line in 0..TILE_H {
                queue!(out, cursor::MoveTo(x, y + line))?;
                if line == TILE_H / 2 {
                    queue!(
                        out,
                        SetAttribute(attr),
                        Print(tile_label(value, TILE_W as usize)),
                        SetAttribute(Attribute::Reset),
                        SetBackgroundColor(to_ct_color(tile.bg)),
                        SetForegroundColor(to_ct_color(tile.fg)),
                    )?;
                } else {
                    queue!(out, Print(" ".repeat(TILE_W as usize)))?;
                }
            }
        }
        queue!(out, ResetColor)
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs(&mut self, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if matches!(ev, Event::Resize(..)) {
                self.clear = true;
            }
            if let Some(msg) = to_msg(ev) {
                tx.send(msg)?;
            }
        }

        Ok(())
    }

    fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();

        if std::mem::take(&mut self.clear) {
            queue!(stdout, ResetColor, terminal::Clear(ClearType::All))?;
        }

        let (_, board_h) = board_extent(view.board.size())?;
        queue!(
            stdout,
            ResetColor,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Bold),
            Print(format!("2048   moves {}", view.moves)),
            SetAttribute(Attribute::Reset),
        )?;

        self.draw_board(&mut stdout, view)?;

        let status_y = ORIGIN.1 + board_h;
        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(ClearType::CurrentLine),
            Print(view.status_line()),
            cursor::MoveTo(0, status_y + 1),
            terminal::Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Dim),
            Print(HELP),
            SetAttribute(Attribute::Reset),
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use twenty48_core::{Board, Status};

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn arrows_map_to_arrow_keys() {
        assert_eq!(to_key(KeyCode::Left), Some(Key::ArrowLeft));
        assert_eq!(to_key(KeyCode::Right), Some(Key::ArrowRight));
        assert_eq!(to_key(KeyCode::Up), Some(Key::ArrowUp));
        assert_eq!(to_key(KeyCode::Down), Some(Key::ArrowDown));
        assert_eq!(to_key(KeyCode::F(1)), None);
    }

    #[test]
    fn releases_are_dropped() {
        let press = key_event(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Press);
        let release = key_event(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(to_msg(press), Some(Msg::key(Key::ArrowLeft)));
        assert_eq!(to_msg(release), None);
    }

    #[test]
    fn ctrl_c_keeps_modifier() {
        let ev = key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(
            to_msg(ev),
            Some(Msg::key_mod(Key::Char('c'), ModMask::CTRL))
        );
    }

    #[test]
    fn resize_becomes_screen() {
        assert_eq!(
            to_msg(Event::Resize(80, 24)),
            Some(Msg::Screen {
                width: 80,
                height: 24
            })
        );
    }

    #[test]
    fn labels_are_centred() {
        assert_eq!(tile_label(0, 6), "      ");
        assert_eq!(tile_label(2, 5), "  2  ");
        assert_eq!(tile_label(2048, 8), "  2048  ");
        assert_eq!(tile_label(131072, 4), "131072");
    }

    #[test]
    fn extent_covers_frame() {
        assert_eq!(
            board_extent(4).unwrap(),
            (4 * (TILE_W + 1) + 1, 4 * (TILE_H + 1) + 1)
        );
        assert!(board_extent(7281).is_ok());
        assert_eq!(
            board_extent(7282).unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
        assert!(board_extent(usize::MAX).is_err());
    }

    #[test]
    fn oversized_board_is_an_error() {
        let board = Board::new(7282);
        let view = View {
            board: &board,
            score: 0,
            moves: 0,
            status: Status::Playing,
            win_tile: 2048,
            highlights: &[],
        };
        let mut out = Vec::new();
        let err = CrosstermDriver::new()
            .draw_board(&mut out, &view)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn small_board_draws() {
        let board = Board::from_rows(&[[2u32, 0], [0, 4]]).unwrap();
        let highlights = [(Pos::new(0, 0), Highlight::Merged)];
        let view = View {
            board: &board,
            score: 4,
            moves: 1,
            status: Status::Playing,
            win_tile: 2048,
            highlights: &highlights,
        };
        let mut out = Vec::new();
        CrosstermDriver::new().draw_board(&mut out, &view).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&tile_label(2, usize::from(TILE_W))));
        assert!(text.contains(&tile_label(4, usize::from(TILE_W))));
    }

    #[test]
    fn tiles_are_spaced() {
        assert_eq!(tile_origin(Pos::new(0, 0)), ORIGIN);
        assert_eq!(
            tile_origin(Pos::new(1, 2)),
            (ORIGIN.0 + 2 * (TILE_W + 1), ORIGIN.1 + TILE_H + 1)
        );
    }
}
