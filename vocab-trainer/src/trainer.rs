use std::fmt;

use anyhow::Context;
use quiz::{AnswerOutcome, QuizEngine, QuizQuestion, WordEntry, WordList, WordStore};
use rand::Rng;

use crate::storage::Storage;

/// Owns the saved words and the running quiz, and keeps storage in step.
pub struct Trainer {
    storage: Storage,
    namespace: String,
    words: WordList,
    quiz: QuizEngine,
    answered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub words: usize,
    pub correct: u32,
    pub attempts: u32,
    pub score: Option<u8>,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Words: {} • Correct: {} • Attempts: {}",
            self.words, self.correct, self.attempts
        )?;
        if let Some(score) = self.score {
            write!(f, "\nScore: {score}%")?;
        }
        Ok(())
    }
}

impl Trainer {
    pub async fn open(storage: Storage, namespace: impl Into<String>) -> anyhow::Result<Self> {
        let namespace = namespace.into();
        let words = storage
            .load(&namespace)
            .await
            .context("failed to load saved words")?;
        Ok(Self {
            storage,
            namespace,
            words: WordList::from(words),
            quiz: QuizEngine::new(),
            answered: false,
        })
    }

    pub fn words(&self) -> &[WordEntry] {
        self.words.list()
    }

    /// Adds an entry. Blank words or translations are ignored and yield `None`.
    pub async fn add_word(
        &mut self,
        word: &str,
        translation: &str,
        example: Option<&str>,
    ) -> anyhow::Result<Option<WordEntry>> {
        let entry = match self.words.add(word, translation, example) {
            Ok(entry) => entry.clone(),
            Err(reason) => {
                tracing::debug!(%reason, "ignored new word");
                return Ok(None);
            }
        };
        self.words_changed().await?;
        Ok(Some(entry))
    }

    /// Takes an entry out so its fields can be edited and added back.
    pub async fn edit_word(&mut self, key: &str) -> anyhow::Result<Option<WordEntry>> {
        self.take(key).await
    }

    pub async fn delete_word(&mut self, key: &str) -> anyhow::Result<bool> {
        Ok(self.take(key).await?.is_some())
    }

    pub async fn clear_all(&mut self) -> anyhow::Result<()> {
        self.words.clear();
        self.words_changed().await
    }

    /// Asks the first question of a session. Same as [`Trainer::next_question`].
    pub fn start_quiz<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&QuizQuestion> {
        self.next_question(rng)
    }

    /// Opens a new round, or returns `None` when too few words are saved.
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&QuizQuestion> {
        if self.quiz.next_question(&self.words, rng).is_none() {
            self.answered = true;
            return None;
        }
        self.answered = false;
        self.current_question()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.state().current_question.as_ref()
    }

    /// Scores the open round. A round takes one answer; later ones are ignored.
    pub fn answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        if self.answered {
            return None;
        }
        let question = self.quiz.state().current_question.clone()?;
        self.answered = true;
        Some(self.quiz.submit_answer(choice, &question))
    }

    /// Closes the open round without scoring it.
    pub fn skip(&mut self) {
        self.answered = true;
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
        self.answered = false;
    }

    pub fn stats(&self) -> Stats {
        let state = self.quiz.state();
        Stats {
            words: self.words.count(),
            correct: state.correct_count,
            attempts: state.attempt_count,
            score: self.quiz.score_percent(),
        }
    }

    async fn take(&mut self, key: &str) -> anyhow::Result<Option<WordEntry>> {
        let Some(id) = self.words.resolve(key).map(|entry| entry.id.clone()) else {
            return Ok(None);
        };
        let removed = self.words.remove(&id);
        self.words_changed().await?;
        Ok(removed)
    }

    async fn words_changed(&mut self) -> anyhow::Result<()> {
        self.reset_quiz();
        self.storage
            .save(&self.namespace, self.words.list())
            .await
            .context("failed to save words")
    }
}
