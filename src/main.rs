use dama_core::engine::config::EngineConfig;
use dama_core::engine::Difficulty;
use dama_core::logic::board::Side;
use dama_core::logic::game::{GameMode, GameState, GameStatus};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const MAX_PLIES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchResult {
    Won(Side),
    Draw,
}

fn play_game(white: Difficulty, black: Difficulty, config: &Arc<EngineConfig>) -> MatchResult {
    let mut game = GameState::new(GameMode::Two);
    let mut rng = rand::thread_rng();

    while game.history.len() < MAX_PLIES {
        if let GameStatus::Won(winner) = game.status {
            return MatchResult::Won(winner);
        }
        let difficulty = match game.turn {
            Side::White => white,
            Side::Black => black,
        };
        let side = game.turn;
        match game.play_computer_move(difficulty, config.clone(), &mut rng) {
            Some((mv, stats)) => {
                tracing::debug!(side = side.name(), %mv, nodes = stats.nodes, score = stats.score);
            }
            None => break,
        }
    }

    match game.status {
        GameStatus::Won(winner) => MatchResult::Won(winner),
        GameStatus::Playing => MatchResult::Draw,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let white = args.first().map_or(Difficulty::Hard, |s| Difficulty::parse(s));
    let black = args.get(1).map_or(Difficulty::Easy, |s| Difficulty::parse(s));
    let games = args
        .get(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    let config = Arc::new(EngineConfig::default());
    tracing::info!(?white, ?black, games, "Starting self-play");

    let (mut white_wins, mut black_wins, mut draws) = (0, 0, 0);
    for game_index in 1..=games {
        let result = play_game(white, black, &config);
        match result {
            MatchResult::Won(Side::White) => white_wins += 1,
            MatchResult::Won(Side::Black) => black_wins += 1,
            MatchResult::Draw => draws += 1,
        }
        tracing::info!(game = game_index, ?result, "Game finished");
    }

    tracing::info!(white_wins, black_wins, draws, "Self-play complete");
}
