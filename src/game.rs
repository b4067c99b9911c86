//! A CPU engine firing at one board, with the fire-again-on-hit sequencing.

use log::info;
use rand::rngs::SmallRng;

use crate::board::{Board, BoardState};
use crate::common::{RestoreError, ShotResult, TargetingError};
use crate::coordinate::Coordinate;
use crate::targeting::{EngineState, TargetingEngine};

/// Current status of a skirmish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    /// Every ship on the target board is sunk.
    Won,
}

/// Serializable overall skirmish state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkirmishState {
    pub board: BoardState,
    pub engine: EngineState,
    pub shots_fired: usize,
    pub turns: usize,
}

/// The shots taken in one turn, in order.
pub type Turn = Vec<(Coordinate, ShotResult)>;

/// One CPU attacker against one defending board.
#[derive(Debug)]
pub struct Skirmish {
    board: Board,
    engine: TargetingEngine,
    shots_fired: usize,
    turns: usize,
}

impl Skirmish {
    pub fn new(board: Board, engine: TargetingEngine) -> Self {
        Self {
            board,
            engine,
            shots_fired: 0,
            turns: 0,
        }
    }

    /// Restore a skirmish from a previously saved state.
    pub fn from_state(state: SkirmishState, rng: SmallRng) -> Result<Self, RestoreError> {
        Ok(Self {
            board: Board::try_from(state.board)?,
            engine: TargetingEngine::from_state(state.engine, rng),
            shots_fired: state.shots_fired,
            turns: state.turns,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for skill effects and relocation between turns.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }

    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Evaluate the current status. A board with no ships is never won.
    pub fn status(&self) -> GameStatus {
        if !self.board.ships().is_empty() && self.board.all_ships_sunk() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Fire one shot: ask the engine, resolve on the board, report back.
    pub fn fire(&mut self) -> Result<(Coordinate, ShotResult), TargetingError> {
        let coord = self.engine.next_shot()?;
        let result = self.board.shoot_at(coord);
        self.engine.process_result(coord, result);
        self.shots_fired += 1;
        Ok((coord, result))
    }

    /// Apply a skill reveal at `coord` and let the engine learn from it.
    /// Reveals are not counted as shots.
    pub fn reveal(&mut self, coord: Coordinate) -> ShotResult {
        let result = self.board.reveal(coord);
        self.engine.process_result(coord, result);
        result
    }

    /// Play one turn. Under the fire-again rule the turn continues while
    /// shots hit, until a miss or the end of the game.
    pub fn take_turn(&mut self) -> Result<Turn, TargetingError> {
        let again = self.board.rules().fire_again_on_hit;
        let mut turn = Vec::new();
        if self.status() == GameStatus::Won {
            return Ok(turn);
        }
        self.turns += 1;
        while self.status() == GameStatus::InProgress {
            let (coord, result) = self.fire()?;
            turn.push((coord, result));
            if !(again && result.fires_again()) {
                break;
            }
        }
        Ok(turn)
    }

    /// Take turns until the board is cleared or `max_turns` have passed.
    pub fn play_out(&mut self, max_turns: usize) -> Result<GameStatus, TargetingError> {
        while self.status() == GameStatus::InProgress && self.turns < max_turns {
            self.take_turn()?;
        }
        if self.status() == GameStatus::Won {
            info!(
                "{} engine cleared the board in {} shots over {} turns",
                self.engine.difficulty(),
                self.shots_fired,
                self.turns
            );
        }
        Ok(self.status())
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> SkirmishState {
        SkirmishState {
            board: BoardState::from(&self.board),
            engine: self.engine.state(),
            shots_fired: self.shots_fired,
            turns: self.turns,
        }
    }
}
