use thiserror::Error;

mod engine;
mod word;

pub use engine::{AnswerOutcome, QuizEngine, QuizQuestion, QuizState, CHOICE_COUNT, MIN_WORDS};
pub use word::{WordEntry, WordList, WordStore};

/// Reasons a new entry is refused by the word list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("the word must not be blank")]
    BlankWord,
    #[error("the translation must not be blank")]
    BlankTranslation,
}
