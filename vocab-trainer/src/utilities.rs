use std::io::{self, BufRead, Write};

/// Prints `prompt` and reads one line. `None` means the input is exhausted.
pub fn input(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line(&mut io::stdin().lock())
}

pub fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn str_to_bool(mut str: String) -> Option<bool> {
    str.make_ascii_lowercase();
    match str.trim() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" => Some(true),
        "n" | "no" | "nope" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Matches typed text against the offered choices.
///
/// An exact (case-insensitive) match wins. Otherwise the closest choice is
/// taken only when it is very similar and clearly ahead of the runner-up.
pub fn match_choice<'a>(typed: &str, choices: &'a [String]) -> Option<&'a str> {
    let typed = typed.trim().to_lowercase();
    let mut ranked = choices
        .iter()
        .map(|choice| (choice, strsim::jaro(&choice.to_lowercase(), &typed)))
        .collect::<Vec<(&String, f64)>>();
    // most similar at the start
    ranked.sort_unstable_by(|(_, a), (_, b)| b.total_cmp(a));
    let (best, best_score) = *ranked.first()?;
    let runner_up = ranked.get(1).map_or(0.0, |(_, score)| *score);
    if best_score == 1.0 || (best_score > 0.9 && best_score - runner_up > 0.25) {
        Some(best.as_str())
    } else {
        None
    }
}
