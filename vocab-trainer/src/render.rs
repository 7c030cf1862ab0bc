use quiz::{QuizQuestion, WordEntry};

pub const NO_WORDS: &str = "No words yet. Add some!";
pub const NOT_ENOUGH_WORDS: &str = "Add at least 2 words to start practicing.";

pub fn word_list(words: &[WordEntry]) -> String {
    if words.is_empty() {
        return NO_WORDS.to_owned();
    }
    words
        .iter()
        .enumerate()
        .map(|(index, entry)| word_line(index + 1, entry))
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn word_line(position: usize, entry: &WordEntry) -> String {
    let mut line = format!("{position}. {} = {}", entry.word, entry.translation);
    if let Some(example) = entry.example() {
        line.push_str(" • ");
        line.push_str(example);
    }
    line
}

pub fn question(question: &QuizQuestion) -> String {
    let mut text = format!("Translate: {:?}", question.prompt);
    for (index, choice) in question.choices.iter().enumerate() {
        text.push_str(&format!("\n[{}]: {choice}", index + 1));
    }
    text
}
