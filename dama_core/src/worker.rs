use crate::engine::ai::choose_move_with;
use crate::engine::config::EngineConfig;
use crate::engine::{Difficulty, Move, SearchStats};
use crate::logic::board::{Board, Side};
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub enum Input {
    ComputeMove(Board, Side, Difficulty, EngineConfig),
}

#[derive(Serialize, Deserialize)]
pub enum Output {
    /// `None` when the side to move has no legal move.
    MoveFound(Option<Move>, SearchStats),
}

/// Runs move selection off the UI thread. Searches are not cancellable once started.
pub struct AiWorker;

impl Worker for AiWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        match msg {
            Input::ComputeMove(board, side, difficulty, config) => {
                let mut rng = rand::thread_rng();
                let (mv, stats) =
                    choose_move_with(&board, side, difficulty, Arc::new(config), &mut rng)
                        .map_or((None, SearchStats::default()), |(mv, stats)| (Some(mv), stats));
                scope.respond(id, Output::MoveFound(mv, stats));
            }
        }
    }
}
