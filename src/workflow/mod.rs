pub mod answer_flow;
pub mod join_game;
pub mod question_ctx;

pub use answer_flow::{AnswerFlow, ProcessResult};
pub use join_game::join_game;
pub use question_ctx::QuestionCtx;
