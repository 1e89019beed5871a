//! Headless AI-versus-AI matches.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use web_time::Instant;

use crate::ai::{MinimaxSelector, MoveSelector};
use crate::error::ReversiError;
use crate::game::Game;
use crate::types::{GameResult, Move, Player};

fn default_games() -> usize {
    20
}

fn default_depth() -> u32 {
    1
}

/// Parameters of a series of games between two search depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_games")]
    pub games: usize,
    #[serde(default = "default_depth")]
    pub black_depth: u32,
    #[serde(default = "default_depth")]
    pub white_depth: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            black_depth: default_depth(),
            white_depth: default_depth(),
        }
    }
}

impl MatchConfig {
    pub fn from_json(text: &str) -> Result<Self, ReversiError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReversiError> {
        if self.games == 0 {
            return Err(ReversiError::InvalidConfig(
                "games must be at least 1".to_string(),
            ));
        }
        if self.black_depth == 0 || self.white_depth == 0 {
            return Err(ReversiError::InvalidConfig(format!(
                "search depths must be at least 1 (black {}, white {})",
                self.black_depth, self.white_depth
            )));
        }
        Ok(())
    }
}

/// One finished game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub result: GameResult,
    pub black_count: u8,
    pub white_count: u8,
    /// Every action in order; `None` marks a pass.
    pub moves: Vec<Option<Move>>,
    pub seconds: f64,
}

/// Aggregated match results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub config: MatchConfig,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub avg_game_seconds: f64,
}

impl MatchSummary {
    pub fn to_json(&self) -> Result<String, ReversiError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Plays one game to the end. A side passes when its selector reports no
/// move, which is only accepted when it really has none.
pub fn play_game(
    black: &dyn MoveSelector,
    white: &dyn MoveSelector,
    black_depth: u32,
    white_depth: u32,
) -> Result<GameRecord, ReversiError> {
    let start = Instant::now();
    let mut game = Game::new();
    let mut moves = Vec::new();

    while game.result() == GameResult::Ongoing {
        let player = game.current_player();
        let (selector, depth) = match player {
            Player::Black => (black, black_depth),
            Player::White => (white, white_depth),
        };

        match selector.select_move(game.board(), player, depth) {
            Some(mv) => {
                if !game.make_move(mv.row as usize, mv.col as usize) {
                    warn!(?player, %mv, "selector proposed an illegal move");
                    return Err(ReversiError::IllegalSelection { player, mv });
                }
                moves.push(Some(mv));
            }
            None => {
                if !game.valid_moves().is_empty() {
                    warn!(?player, "selector passed with legal moves available");
                    return Err(ReversiError::UnforcedPass(player));
                }
                game.pass_turn();
                moves.push(None);
            }
        }
    }

    let (black_count, white_count) = game.score();
    Ok(GameRecord {
        result: game.result(),
        black_count,
        white_count,
        moves,
        seconds: start.elapsed().as_secs_f64(),
    })
}

/// Plays `config.games` games with the alpha-beta search on both sides.
pub fn run_match(config: &MatchConfig) -> Result<MatchSummary, ReversiError> {
    run_match_with(config, &MinimaxSelector, &MinimaxSelector)
}

pub fn run_match_with(
    config: &MatchConfig,
    black: &dyn MoveSelector,
    white: &dyn MoveSelector,
) -> Result<MatchSummary, ReversiError> {
    config.validate()?;
    info!(
        games = config.games,
        black_depth = config.black_depth,
        white_depth = config.white_depth,
        "match started"
    );

    let mut summary = MatchSummary {
        config: *config,
        black_wins: 0,
        white_wins: 0,
        draws: 0,
        avg_game_seconds: 0.0,
    };
    let mut total_seconds = 0.0;

    for index in 0..config.games {
        let record = play_game(black, white, config.black_depth, config.white_depth)?;
        match record.result {
            GameResult::BlackWins => summary.black_wins += 1,
            GameResult::WhiteWins => summary.white_wins += 1,
            GameResult::Draw => summary.draws += 1,
            GameResult::Ongoing => {}
        }
        total_seconds += record.seconds;

        if (index + 1) % 5 == 0 {
            info!(completed = index + 1, total = config.games, "match progress");
        }
    }

    summary.avg_game_seconds = total_seconds / config.games as f64;
    info!(
        black_wins = summary.black_wins,
        white_wins = summary.white_wins,
        draws = summary.draws,
        avg_game_seconds = summary.avg_game_seconds,
        "match finished"
    );
    Ok(summary)
}
