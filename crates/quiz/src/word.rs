use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::QuizError;

const ID_SUFFIX_LEN: usize = 5;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    pub translation: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub example: Option<String>,
}

impl WordEntry {
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let example = Option::<String>::deserialize(deserializer)?;
    Ok(example.filter(|example| !example.trim().is_empty()))
}

/// Read-only view of the saved entries that a quiz round is drawn from.
pub trait WordStore {
    /// All entries in insertion order.
    fn list(&self) -> &[WordEntry];

    fn count(&self) -> usize {
        self.list().len()
    }
}

impl WordStore for [WordEntry] {
    fn list(&self) -> &[WordEntry] {
        self
    }
}

impl WordStore for Vec<WordEntry> {
    fn list(&self) -> &[WordEntry] {
        self
    }
}

/// The ordered collection of entries the user has saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    entries: Vec<WordEntry>,
}

impl WordStore for WordList {
    fn list(&self) -> &[WordEntry] {
        &self.entries
    }
}

/// Builds a list from saved entries. Blank or repeated ids get fresh ones.
impl From<Vec<WordEntry>> for WordList {
    fn from(entries: Vec<WordEntry>) -> Self {
        let mut list = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for mut entry in entries {
            if entry.id.trim().is_empty() || list.get(&entry.id).is_some() {
                entry.id = list.fresh_id();
            }
            list.entries.push(entry);
        }
        list
    }
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a new entry. Fields are trimmed and a blank example is dropped.
    pub fn add(
        &mut self,
        word: &str,
        translation: &str,
        example: Option<&str>,
    ) -> Result<&WordEntry, QuizError> {
        let word = word.trim();
        let translation = translation.trim();
        if word.is_empty() {
            return Err(QuizError::BlankWord);
        }
        if translation.is_empty() {
            return Err(QuizError::BlankTranslation);
        }
        let example = example
            .map(str::trim)
            .filter(|example| !example.is_empty())
            .map(str::to_owned);

        let id = self.fresh_id();
        self.entries.push(WordEntry {
            id,
            word: word.to_owned(),
            translation: translation.to_owned(),
            example,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    fn fresh_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id = generate_id(&mut rng);
            if self.get(&id).is_none() {
                break id;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Looks an entry up by 1-based list position, then by id, then by its word.
    pub fn resolve(&self, key: &str) -> Option<&WordEntry> {
        let key = key.trim();
        if let Ok(position) = key.parse::<usize>() {
            if let Some(entry) = self.entries.get(position.wrapping_sub(1)) {
                return Some(entry);
            }
        }
        self.get(key)
            .or_else(|| self.entries.iter().find(|entry| entry.word == key))
    }

    pub fn remove(&mut self, id: &str) -> Option<WordEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn into_entries(self) -> Vec<WordEntry> {
        self.entries
    }
}

/// Millisecond timestamp in base 36 followed by a short random suffix.
fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = to_base36(Utc::now().timestamp_millis().unsigned_abs());
    id.extend((0..ID_SUFFIX_LEN).map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char));
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
