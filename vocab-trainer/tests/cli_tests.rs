//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vocab_trainer(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("vocab-trainer").unwrap();
    cmd.env_remove("VOCAB_TRAINER_NAMESPACE")
        .env_remove("RUST_LOG")
        .arg("--database")
        .arg(dir.path().join("words.db"));
    cmd
}

fn add(dir: &TempDir, word: &str, translation: &str) {
    vocab_trainer(dir)
        .args(["add", "--word", word, "--translation", translation])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Saved \"{word}\".")));
}

#[test]
fn empty_list_invites_adding() {
    let dir = TempDir::new().unwrap();
    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No words yet. Add some!"));
}

#[test]
fn added_words_are_listed_in_order() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");
    vocab_trainer(&dir)
        .args(["add", "--word", "dog", "--translation", "perro"])
        .args(["--example", "the dog barks"])
        .assert()
        .success();

    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. cat = gato\n2. dog = perro • the dog barks",
        ));
}

#[test]
fn blank_translation_is_ignored() {
    let dir = TempDir::new().unwrap();
    vocab_trainer(&dir)
        .args(["add", "--word", "cat", "--translation", "  "])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No words yet."));
}

#[test]
fn remove_by_position() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");
    add(&dir, "dog", "perro");

    vocab_trainer(&dir)
        .args(["remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted the word successfully."));
    vocab_trainer(&dir)
        .args(["remove", "bird"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This word is not saved."));

    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("1. dog = perro"))
        .stdout(predicate::str::contains("cat").not());
}

#[test]
fn clear_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");

    vocab_trainer(&dir)
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success();
    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("1. cat = gato"));

    vocab_trainer(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all words."));
    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No words yet."));
}

#[test]
fn namespaces_hold_separate_collections() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");

    vocab_trainer(&dir)
        .args(["--namespace", "other", "list"])
        .assert()
        .stdout(predicate::str::contains("No words yet."));
}

#[test]
fn repl_refuses_quiz_with_one_word() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");

    vocab_trainer(&dir)
        .write_stdin("start\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Add at least 2 words to start practicing.",
        ));
}

#[test]
fn repl_runs_a_quiz_round() {
    let dir = TempDir::new().unwrap();
    vocab_trainer(&dir)
        .write_stdin("add\ncat\ngato\n\nadd\ndog\nperro\n\nstart\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Translate: "))
        .stdout(predicate::str::contains("[2]: "))
        .stdout(predicate::str::contains("[3]: ").not())
        .stdout(predicate::str::contains("Words: 2 • Correct: "))
        .stdout(predicate::str::contains("Attempts: 1"))
        .stdout(predicate::str::contains("Score: "));
}

#[test]
fn repl_skip_leaves_score_empty() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");
    add(&dir, "dog", "perro");

    vocab_trainer(&dir)
        .write_stdin("start\n:skip\nstats\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped. The right answer is "))
        .stdout(predicate::str::contains("Attempts: 0"))
        .stdout(predicate::str::contains("Score: ").not());
}

#[test]
fn repl_edit_replaces_the_entry() {
    let dir = TempDir::new().unwrap();
    add(&dir, "cat", "gato");

    vocab_trainer(&dir)
        .write_stdin("edit 1\n\ngatito\nel gatito duerme\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Word [cat]: "))
        .stdout(predicate::str::contains("1. cat = gatito • el gatito duerme"));
}

#[test]
fn repl_edit_can_remove_the_example() {
    let dir = TempDir::new().unwrap();
    vocab_trainer(&dir)
        .args(["add", "--word", "cat", "--translation", "gato"])
        .args(["--example", "el gato duerme"])
        .assert()
        .success();

    vocab_trainer(&dir)
        .write_stdin("edit cat\n\n\n-\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Example (optional, - to remove) [el gato duerme]: ",
        ));

    vocab_trainer(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. cat = gato"))
        .stdout(predicate::str::contains("•").not());
}

#[test]
fn repl_unknown_command() {
    let dir = TempDir::new().unwrap();
    vocab_trainer(&dir)
        .write_stdin("fly\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command fly."));
}

#[test]
fn unusable_database_fails() {
    let dir = TempDir::new().unwrap();
    #[allow(deprecated)]
    Command::cargo_bin("vocab-trainer")
        .unwrap()
        .arg("--database")
        .arg(dir.path().join("missing").join("words.db"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
