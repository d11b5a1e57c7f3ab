pub mod question;
pub mod quiz_document;

pub use question::{Answer, Question, QuestionKind, SliderTarget};
pub use quiz_document::QuizDocument;
