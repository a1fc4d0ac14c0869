//! WASM browser driver for **twenty48** rendering into a page element.
//!
//! This crate provides [`WebDriver`], an [`EventLoopDriver`] that draws the
//! board as `div.row > div.tile` elements inside a container (by default the
//! element with id `game`) and feeds `keydown` events from the document to
//! the game.
//!
//! # Quick start
//!
//! ```html
//! <div id="game"></div>
//! <script type="module">
//!   import init, { start } from './pkg/twenty48_web.js';
//!   await init();
//!   start(4);
//! </script>
//! ```
//!
//! The driver registers its listener and returns; the page keeps it alive.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use twenty48_core::{
    AppRunner, EventLoopDriver, Game, GameConfig, Highlight, Pos, Update, View,
    messages::{Key, Msg},
    style::tile_style,
};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, KeyboardEvent};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(v: JsValue) -> Box<dyn Error> {
    format!("{v:?}").into()
}

/// Translate a browser `KeyboardEvent.key` string to a [`Key`].
fn translate_key(key: &str) -> Option<Key> {
    match key {
        "ArrowDown" => Some(Key::ArrowDown),
        "ArrowUp" => Some(Key::ArrowUp),
        "ArrowLeft" => Some(Key::ArrowLeft),
        "ArrowRight" => Some(Key::ArrowRight),
        "Backspace" => Some(Key::Backspace),
        "Enter" => Some(Key::Enter),
        "Escape" => Some(Key::Escape),
        " " => Some(Key::Space),
        "Tab" => Some(Key::Tab),
        other => {
            let mut chars = other.chars();
            let first = chars.next()?;
            if chars.next().is_some() {
                // Multi-character name ("Shift", "F5", ...), not printable.
                return None;
            }
            Some(Key::Char(first))
        }
    }
}

/// CSS classes of a tile element.
fn tile_class(value: u32, highlight: Option<Highlight>) -> String {
    let mut class = format!("tile tile-{value}");
    match highlight {
        Some(Highlight::Spawned) => class.push_str(" tile-new"),
        Some(Highlight::Merged) => class.push_str(" tile-merged"),
        None => {}
    }
    class
}

/// Inline colours of a tile element.
fn tile_css(value: u32) -> String {
    let style = tile_style(value);
    format!(
        "background-color: {}; color: {};",
        style.bg.to_hex(),
        style.fg.to_hex()
    )
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`WebDriver`].
#[derive(Clone, Debug)]
pub struct WebConfig {
    /// The `id` attribute of the container element (default: `"game"`).
    pub container_id: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            container_id: "game".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// WebDriver
// ---------------------------------------------------------------------------

/// A WASM browser driver that renders the board into a page element.
pub struct WebDriver {
    config: WebConfig,
}

impl WebDriver {
    /// Create a new driver from the given configuration.
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }
}

/// State shared between the driver and its event listener.
struct Shared<R: Rng> {
    runner: AppRunner<R>,
    document: Document,
    container: Element,
}

impl<R: Rng> Shared<R> {
    /// Rebuild the container's children from the current view.
    fn render(&self) -> Result<(), JsValue> {
        let view = self.runner.view();
        self.container.set_inner_html("");

        let status = self.document.create_element("div")?;
        status.set_class_name("status");
        let text = if self.runner.should_quit() {
            "Game closed. Reload to play again.".to_string()
        } else {
            view.status_line()
        };
        status.set_text_content(Some(&text));
        self.container.append_child(&status)?;

        for r in 0..view.board.size() {
            let row = self.render_row(&view, r)?;
            self.container.append_child(&row)?;
        }
        Ok(())
    }

    fn render_row(&self, view: &View<'_>, r: usize) -> Result<Element, JsValue> {
        let row = self.document.create_element("div")?;
        row.set_class_name("row");
        for (c, &value) in view.board.row(r).iter().enumerate() {
            let tile = self.document.create_element("div")?;
            tile.set_class_name(&tile_class(value, view.highlight(Pos::new(r, c))));
            tile.set_attribute("style", &tile_css(value))?;
            if value > 0 {
                tile.set_text_content(Some(&value.to_string()));
            }
            row.append_child(&tile)?;
        }
        Ok(row)
    }
}

// ---------------------------------------------------------------------------
// EventLoopDriver implementation
// ---------------------------------------------------------------------------

impl EventLoopDriver for WebDriver {
    fn run<R: Rng + 'static>(self, mut runner: AppRunner<R>) -> Result<(), Box<dyn Error>> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document available")?;
        let container = document
            .get_element_by_id(&self.config.container_id)
            .ok_or_else(|| format!("element '{}' not found", self.config.container_id))?;

        runner.init();
        let shared = Rc::new(RefCell::new(Shared {
            runner,
            document: document.clone(),
            container,
        }));
        shared.borrow().render().map_err(js_err)?;

        let listener = Rc::clone(&shared);
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            // Leave browser shortcuts alone.
            if e.ctrl_key() || e.meta_key() || e.alt_key() {
                return;
            }
            let Some(key) = translate_key(&e.key()) else {
                return;
            };
            let mut s = listener.borrow_mut();
            match s.runner.handle_msg(Msg::key(key)) {
                Update::Ignored => {}
                Update::Unchanged => e.prevent_default(),
                Update::Redraw | Update::Quit => {
                    e.prevent_default();
                    if s.runner.take_redraw().is_some() || s.runner.should_quit() {
                        if let Err(err) = s.render() {
                            web_sys::console::error_2(&"twenty48: render failed:".into(), &err);
                        }
                    }
                }
            }
        });
        // Listen on the document so keys work without focusing the board.
        document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        // The listener lives as long as the page.
        closure.forget();

        Ok(())
    }
}

/// Start a game of the given size in the element with id `game`.
#[wasm_bindgen]
pub fn start(size: usize) -> Result<(), JsValue> {
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let config = GameConfig::default().with_size(size);
    let game = Game::new(config, SmallRng::seed_from_u64(seed))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    WebDriver::new(WebConfig::default())
        .run(AppRunner::new(game))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
