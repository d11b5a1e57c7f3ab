pub mod answer_log;
pub mod selectors;
pub mod strategies;

pub use answer_log::AnswerLog;
pub use strategies::{AnswerContext, AnswerStrategy, Strategy};
