use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::word::{WordEntry, WordStore};

/// Number of choices offered when enough entries exist.
pub const CHOICE_COUNT: usize = 4;
/// Fewest entries that still leave room for one distractor.
pub const MIN_WORDS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// The word the user is asked to translate.
    pub prompt: String,
    pub correct_answer: String,
    /// Translations in the order they are offered, the correct one included.
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    /// Entries already asked in the current cycle.
    pub used_ids: HashSet<String>,
    pub correct_count: u32,
    pub attempt_count: u32,
    pub current_question: Option<QuizQuestion>,
}

#[derive(Debug, Default)]
pub struct QuizEngine {
    state: QuizState,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Draws the next question, or `None` when fewer than two entries exist.
    ///
    /// An entry is not asked again until every entry has been asked once in
    /// the current cycle; then the cycle starts over.
    pub fn next_question<S, R>(&mut self, store: &S, rng: &mut R) -> Option<QuizQuestion>
    where
        S: WordStore + ?Sized,
        R: Rng + ?Sized,
    {
        if store.count() < MIN_WORDS {
            return None;
        }
        let entries = store.list();
        if self.state.used_ids.len() >= store.count() {
            self.state.used_ids.clear();
        }

        let mut remaining = self.unused_positions(entries);
        if remaining.is_empty() {
            self.state.used_ids.clear();
            remaining = (0..entries.len()).collect();
        }
        let chosen_position = *remaining.choose(rng)?;
        let chosen = &entries[chosen_position];
        self.state.used_ids.insert(chosen.id.clone());

        let mut distractors = entries
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != chosen_position)
            .map(|(_, entry)| entry)
            .collect::<Vec<&WordEntry>>();
        distractors.shuffle(rng);

        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        choices.push(chosen.translation.clone());
        choices.extend(
            distractors
                .into_iter()
                .take(CHOICE_COUNT - 1)
                .map(|entry| entry.translation.clone()),
        );
        choices.shuffle(rng);

        let question = QuizQuestion {
            prompt: chosen.word.clone(),
            correct_answer: chosen.translation.clone(),
            choices,
        };
        self.state.current_question = Some(question.clone());
        Some(question)
    }

    /// Positions of the entries not asked yet in this cycle.
    fn unused_positions(&self, entries: &[WordEntry]) -> Vec<usize> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !self.state.used_ids.contains(&entry.id))
            .map(|(position, _)| position)
            .collect()
    }

    /// Scores `choice` against `question`. Every call counts as one attempt.
    pub fn submit_answer(&mut self, choice: &str, question: &QuizQuestion) -> AnswerOutcome {
        self.state.attempt_count += 1;
        let is_correct = choice == question.correct_answer;
        if is_correct {
            self.state.correct_count += 1;
        }
        AnswerOutcome { is_correct }
    }

    pub fn reset(&mut self) {
        self.state = QuizState::default();
    }

    /// Share of correct attempts in percent, rounded half up.
    pub fn score_percent(&self) -> Option<u8> {
        let attempts = u64::from(self.state.attempt_count);
        if attempts == 0 {
            return None;
        }
        let correct = u64::from(self.state.correct_count);
        let percent = (200 * correct + attempts) / (2 * attempts);
        Some(percent.min(100) as u8)
    }
}
