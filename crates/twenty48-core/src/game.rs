//! Game state: the live board plus score, status and last-turn highlights.

use rand::Rng;

use crate::board::{Board, Pos};
use crate::config::GameConfig;
use crate::direction::Direction;
use crate::engine::{self, Slide};
use crate::error::ConfigError;
use crate::messages::Key;
use crate::spawn::{Spawn, SpawnOutcome, spawn_tile};

/// Where a game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Moves are possible and the win tile has not been reached.
    Playing,
    /// The win tile has been reached; moves are still possible.
    Won,
    /// No direction changes the board.
    Lost,
}

/// Why a cell is highlighted after the last turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    Spawned,
    Merged,
}

/// Report of one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub direction: Direction,
    /// `false` when the move left the board untouched; nothing else happened.
    pub changed: bool,
    /// Score added by merges.
    pub gained: u64,
    /// Cells holding merged tiles.
    pub merged: Vec<Pos>,
    /// The tile placed after the move.
    pub spawn: Option<Spawn>,
    /// Status after the move.
    pub status: Status,
}

/// Result of feeding a key to [`Game::handle_key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key is bound to a direction and a move was attempted.
    Moved(Turn),
    /// The key is not bound to a direction.
    Ignored,
}

/// A single 2048 game.
pub struct Game<R: Rng> {
    config: GameConfig,
    board: Board,
    score: u64,
    moves: u64,
    won: bool,
    status: Status,
    highlights: Vec<(Pos, Highlight)>,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Create a game with an empty board. Call [`start`](Game::start) to
    /// place the opening tiles.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.size),
            config,
            score: 0,
            moves: 0,
            won: false,
            status: Status::Playing,
            highlights: Vec::new(),
            rng,
        })
    }

    /// Create a game resuming from `board`. The configured size is replaced
    /// by the board's, and `start_tiles` is capped at its cell count.
    pub fn from_board(config: GameConfig, board: Board, rng: R) -> Result<Self, ConfigError> {
        let cells = board.size().saturating_mul(board.size());
        let start_tiles = config.start_tiles.min(cells);
        let config = config.with_size(board.size()).with_start_tiles(start_tiles);
        let mut game = Self::new(config, rng)?;
        game.board = board;
        game.refresh_status();
        Ok(game)
    }

    /// Reset to an empty board and place the configured number of opening
    /// tiles.
    pub fn start(&mut self) -> Vec<Spawn> {
        self.board = Board::new(self.config.size);
        self.score = 0;
        self.moves = 0;
        self.won = false;
        self.highlights.clear();

        let spawns: Vec<Spawn> = (0..self.config.start_tiles)
            .filter_map(|_| self.spawn().spawn())
            .collect();
        self.highlights = spawns
            .iter()
            .map(|s| (s.pos, Highlight::Spawned))
            .collect();
        self.refresh_status();
        log::info!(
            "new {0}x{0} game, {1} opening tiles",
            self.config.size,
            spawns.len()
        );
        spawns
    }

    /// Place one random tile on the current board.
    pub fn spawn(&mut self) -> SpawnOutcome {
        let outcome = spawn_tile(&self.board, &mut self.rng, self.config.four_chance);
        if let SpawnOutcome::Placed { board, .. } = &outcome {
            self.board = board.clone();
        }
        outcome
    }

    /// Slide in `direction`. If the board changes, the score grows by the
    /// merged tiles, one tile is spawned and the status is refreshed.
    /// Otherwise nothing happens and the returned turn has `changed: false`.
    pub fn play(&mut self, direction: Direction) -> Turn {
        let Slide {
            board,
            changed,
            gained,
            merged,
        } = engine::slide(&self.board, direction);

        if !changed {
            log::debug!("move {direction}: no change");
            return Turn {
                direction,
                changed: false,
                gained: 0,
                merged: Vec::new(),
                spawn: None,
                status: self.status,
            };
        }

        self.board = board;
        self.score += gained;
        self.moves += 1;
        let spawn = self.spawn().spawn();

        self.highlights = merged.iter().map(|&p| (p, Highlight::Merged)).collect();
        if let Some(s) = spawn {
            self.highlights.push((s.pos, Highlight::Spawned));
        }
        self.refresh_status();
        log::debug!(
            "move {direction}: +{gained} (score {}), {} merges",
            self.score,
            merged.len()
        );

        Turn {
            direction,
            changed: true,
            gained,
            merged,
            spawn,
            status: self.status,
        }
    }

    /// Dispatch a key: arrows move, everything else is ignored.
    pub fn handle_key(&mut self, key: &Key) -> KeyOutcome {
        match Direction::from_key(key) {
            Some(direction) => KeyOutcome::Moved(self.play(direction)),
            None => KeyOutcome::Ignored,
        }
    }

    /// The current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of moves that changed the board.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the win tile has been reached in this game.
    #[inline]
    pub fn has_won(&self) -> bool {
        self.won
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cells touched by the last turn.
    #[inline]
    pub fn highlights(&self) -> &[(Pos, Highlight)] {
        &self.highlights
    }

    /// Highlight of a single cell.
    pub fn highlight(&self, pos: Pos) -> Option<Highlight> {
        self.highlights
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|&(_, h)| h)
    }

    fn refresh_status(&mut self) {
        if !self.won && self.board.max_tile() >= self.config.win_tile {
            self.won = true;
            log::info!("reached {} with score {}", self.config.win_tile, self.score);
        }
        let status = if !engine::can_move(&self.board) {
            Status::Lost
        } else if self.won {
            Status::Won
        } else {
            Status::Playing
        };
        if status == Status::Lost && self.status != Status::Lost {
            log::info!(
                "no moves left: score {}, best tile {}",
                self.score,
                self.board.max_tile()
            );
        }
        self.status = status;
    }
}
