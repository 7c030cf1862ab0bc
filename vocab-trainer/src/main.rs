use std::process;

use clap::{Parser, Subcommand};
use quiz::WordEntry;
use storage::{database_url, Storage};
use trainer::Trainer;
use tracing_subscriber::EnvFilter;
use utilities::{input, match_choice, str_to_bool};

mod render;
mod storage;
mod trainer;
mod utilities;

const DEFAULT_NAMESPACE: &str = "mini-vocab-trainer:v1";
/// Typed in place of an optional field to empty it.
const CLEAR_FIELD: &str = "-";

const HELP: &str = "\
Commands:
    add                      add a word with its translation and an optional example
    list                     show the saved words
    edit <n|word>            change a saved word
    remove <n|word>          delete a saved word
    clear                    delete every saved word
    start                    start practicing
    next                     ask another question
    stats                    show the score
    reset                    restart the quiz score
    exit                     leave";

#[derive(Parser)]
#[command(name = "vocab-trainer", version, about = "Vocabulary flashcard trainer")]
struct Cli {
    /// SQLite database URL or file path
    #[arg(
        long,
        global = true,
        env = "VOCAB_TRAINER_DATABASE",
        default_value = "sqlite://vocab-trainer.db"
    )]
    database: String,

    /// Key the word collection is saved under
    #[arg(long, global = true, env = "VOCAB_TRAINER_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Repl,

    /// Save a word
    Add {
        #[arg(long)]
        word: String,

        #[arg(long)]
        translation: String,

        #[arg(long)]
        example: Option<String>,
    },

    /// Show the saved words
    List,

    /// Delete a word by list position, id or the word itself
    Remove { key: String },

    /// Delete every saved word
    Clear {
        /// Skip the confirmation question
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "vocab_trainer=debug"
    } else {
        "vocab_trainer=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let storage = Storage::initialize(&database_url(&cli.database)).await?;
    let mut trainer = Trainer::open(storage, cli.namespace).await?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl(&mut trainer).await?,
        Commands::Add {
            word,
            translation,
            example,
        } => {
            if let Some(entry) = trainer
                .add_word(&word, &translation, example.as_deref())
                .await?
            {
                println!("Saved {:?}.", entry.word);
            }
        }
        Commands::List => println!("{}", render::word_list(trainer.words())),
        Commands::Remove { key } => remove_word(&mut trainer, &key).await?,
        Commands::Clear { yes } => clear_words(&mut trainer, yes).await?,
    }
    Ok(())
}

async fn repl(trainer: &mut Trainer) -> anyhow::Result<()> {
    println!("Type `help` to see the commands.");
    while let Some(line) = input(">> ")? {
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            let argument = command_parts.collect::<Vec<&str>>().join(" ");
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "help" | "h" => {
                    println!("{HELP}");
                }
                "add" => {
                    add_word(trainer, None).await?;
                }
                "list" | "ls" => {
                    println!("{}", render::word_list(trainer.words()));
                }
                "edit" => {
                    edit_word(trainer, &argument).await?;
                }
                "remove" | "delete" | "rm" => {
                    remove_word(trainer, &argument).await?;
                }
                "clear" => {
                    clear_words(trainer, false).await?;
                }
                "start" | "quiz" | "practice" => {
                    practice_round(trainer, true)?;
                }
                "next" | "n" => {
                    practice_round(trainer, false)?;
                }
                "stats" => {
                    println!("{}", trainer.stats());
                }
                "reset" => {
                    trainer.reset_quiz();
                    println!("The quiz starts over.");
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}

/// Reads the fields of a new entry, offering `previous` values as defaults.
async fn add_word(trainer: &mut Trainer, previous: Option<&WordEntry>) -> anyhow::Result<()> {
    let field = |label: &str, default: Option<&str>| -> std::io::Result<Option<String>> {
        let prompt = match default {
            Some(default) if !default.is_empty() => format!("{label} [{default}]: "),
            _ => format!("{label}: "),
        };
        let Some(value) = input(&prompt)? else {
            return Ok(None);
        };
        let value = value.trim();
        Ok(Some(match default {
            Some(default) if value.is_empty() => default.to_owned(),
            _ => value.to_owned(),
        }))
    };

    let Some(word) = field("Word", previous.map(|entry| &entry.word[..]))? else {
        return Ok(());
    };
    let Some(translation) = field("Translation", previous.map(|entry| &entry.translation[..]))?
    else {
        return Ok(());
    };
    let previous_example = previous.and_then(|entry| entry.example());
    let example_label = if previous_example.is_some() {
        "Example (optional, - to remove)"
    } else {
        "Example (optional)"
    };
    let Some(example) = field(example_label, previous_example)? else {
        return Ok(());
    };
    let example = if example == CLEAR_FIELD {
        ""
    } else {
        example.as_str()
    };

    if let Some(entry) = trainer
        .add_word(&word, &translation, Some(example))
        .await?
    {
        println!("Saved {:?}.", entry.word);
    }
    Ok(())
}

async fn edit_word(trainer: &mut Trainer, key: &str) -> anyhow::Result<()> {
    match trainer.edit_word(key).await? {
        Some(entry) => add_word(trainer, Some(&entry)).await,
        None => {
            println!("This word is not saved.");
            Ok(())
        }
    }
}

async fn remove_word(trainer: &mut Trainer, key: &str) -> anyhow::Result<()> {
    if trainer.delete_word(key).await? {
        println!("Deleted the word successfully.");
    } else {
        println!("This word is not saved.");
    }
    Ok(())
}

async fn clear_words(trainer: &mut Trainer, confirmed: bool) -> anyhow::Result<()> {
    let confirmed = confirmed
        || input("Clear ALL words? (y/N): ")?
            .and_then(str_to_bool)
            .unwrap_or(false);
    if confirmed {
        trainer.clear_all().await?;
        println!("Cleared all words.");
    }
    Ok(())
}

fn practice_round(trainer: &mut Trainer, first: bool) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let question = if first {
        trainer.start_quiz(&mut rng)
    } else {
        trainer.next_question(&mut rng)
    };
    let Some(question) = question.cloned() else {
        println!("{}", render::NOT_ENOUGH_WORDS);
        return Ok(());
    };
    println!("{}", render::question(&question));

    let choice = loop {
        let Some(typed) = input("Enter the correct answer: ")? else {
            break None;
        };
        let typed = typed.trim();
        match typed.parse::<usize>() {
            Ok(index) => {
                if let Some(choice) = question.choices.get(index.wrapping_sub(1)) {
                    break Some(choice.clone());
                }
            }
            Err(_) => match &typed.to_lowercase()[..] {
                ":s" | ":skip" => {
                    break None;
                }
                other => {
                    if let Some(choice) = match_choice(other, &question.choices) {
                        break Some(choice.to_owned());
                    }
                }
            },
        }
        println!("Couldn't understand your answer, please try again.");
    };

    match choice.and_then(|choice| trainer.answer(&choice)) {
        Some(outcome) if outcome.is_correct => {
            println!("The answer is correct. Well done!");
        }
        Some(_) => {
            println!(
                "The answer is incorrect. The right answer is {}.",
                question.correct_answer
            );
        }
        None => {
            trainer.skip();
            println!("Skipped. The right answer is {}.", question.correct_answer);
        }
    }
    println!("{}", trainer.stats());
    println!("Type `next` for another question.");
    Ok(())
}
