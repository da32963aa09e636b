use hexsweeper_core::*;

use crate::command::{Command, HELP};

/// How new boards are built on restart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Setup {
    Preset(Difficulty),
    Custom(GameConfig),
}

impl Setup {
    fn game_config(self) -> GameConfig {
        match self {
            Setup::Preset(difficulty) => difficulty.game_config(),
            Setup::Custom(config) => config,
        }
    }
}

/// Whether the main loop should keep reading commands.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    setup: Setup,
    /// Seed for the next board only, later boards are random.
    next_seed: Option<u64>,
    board: Board,
}

impl Session {
    pub fn new(setup: Setup, seed: Option<u64>) -> Self {
        let mut next_seed = seed;
        let board = Self::build(setup, &mut next_seed);
        Self {
            setup,
            next_seed,
            board,
        }
    }

    fn build(setup: Setup, next_seed: &mut Option<u64>) -> Board {
        let generator = match next_seed.take() {
            Some(seed) => RandomMineGenerator::new(seed),
            None => RandomMineGenerator::from_entropy(),
        };
        log::info!("New {setup:?} board, seed {}", generator.seed());
        Board::generate_with(setup.game_config(), generator)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn restart(&mut self) {
        self.board = Self::build(self.setup, &mut self.next_seed);
    }

    /// Applies one command, returning the message to show the player, if any.
    pub fn apply(&mut self, command: Command) -> (Flow, Option<String>) {
        let message = match command {
            Command::Reveal(coords) => match self.board.reveal(coords) {
                Ok(RevealOutcome::HitMine) => Some("Game over".to_string()),
                Ok(RevealOutcome::Won) => Some("You win".to_string()),
                Ok(RevealOutcome::NoChange) if self.board.is_game_over() => {
                    Some("The game has ended, `n` starts a new one".to_string())
                }
                Ok(_) => None,
                Err(err) => Some(format!("{err}: {coords:?}")),
            },
            Command::Flag(coords) => match self.board.toggle_flag(coords) {
                Ok(MarkOutcome::NoChange)
                    if self.board.remaining_mine_count() <= 0
                        && self
                            .board
                            .cell_at(coords)
                            .is_ok_and(|cell| !cell.is_revealed && !cell.is_flagged) =>
                {
                    Some("No flags left".to_string())
                }
                Ok(_) => None,
                Err(err) => Some(format!("{err}: {coords:?}")),
            },
            Command::NewGame => {
                self.restart();
                None
            }
            Command::SetDifficulty(difficulty) => {
                self.setup = Setup::Preset(difficulty);
                self.restart();
                Some(format!("Difficulty set to {difficulty}"))
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return (Flow::Quit, None),
        };
        (Flow::Continue, message)
    }
}
