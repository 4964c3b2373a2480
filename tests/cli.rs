#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A command isolated in `home`, without colours or an insight key.
fn versebook(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("versebook"));
    cmd.env("VERSEBOOK_HOME", home.path())
        .env_remove("VERSEBOOK_BIBLES_DIR")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// The short id printed in "... added (abcd1234): name".
fn added_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let start = text.find('(').expect("id in output") + 1;
    let end = text[start..].find(')').expect("closing paren") + start;
    text[start..end].to_string()
}

#[test]
fn reads_a_chapter_in_the_default_version() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["read", "gen", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gênesis 1"))
        .stdout(predicate::str::contains("No princípio criou Deus"));
}

#[test]
fn book_names_resolve_in_either_language() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["read", "Gênesis", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Haja luz"));
}

#[test]
fn missing_chapter_is_reported() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["read", "gen", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter not found"));
}

#[test]
fn preferences_persist_between_runs() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Genesis"));

    versebook(&home)
        .args(["config", "language", "pt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language set to pt"));

    versebook(&home)
        .args(["books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gênesis"))
        .stdout(predicate::str::contains("Êxodo"));

    versebook(&home)
        .args(["config", "version", "en_kjv"])
        .assert()
        .success();
    versebook(&home)
        .args(["read", "gen", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In the beginning"))
        .stdout(predicate::str::contains("Comentário").not());
}

#[test]
fn commentary_is_shown_when_selected() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["config", "commentary", "en_mh"])
        .assert()
        .success();
    versebook(&home)
        .args(["read", "gen", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Commentary"));

    versebook(&home)
        .args(["config", "commentary", "none"])
        .assert()
        .success();
    versebook(&home)
        .args(["config", "commentary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("none"));
}

#[test]
fn registries_list_and_mark_current() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["versions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* pt_aa"))
        .stdout(predicate::str::contains("en_kjv"));
    versebook(&home)
        .args(["commentaries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pt_tske"))
        .stdout(predicate::str::contains("en_mh"));
}

#[test]
fn invalid_config_is_rejected() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["config", "colour", "red"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key: colour"));
    versebook(&home)
        .args(["config", "version", "xx_none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown version"));
}

#[test]
fn study_notebook_workflow() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["study", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No studies yet."));

    let out = versebook(&home)
        .args(["study", "add", "folder", "Romans"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let folder = added_id(&out.stdout);

    let out = versebook(&home)
        .args(["study", "add", "reference", "8:28", "--parent", &folder])
        .output()
        .unwrap();
    assert!(out.status.success());
    let reference = added_id(&out.stdout);

    versebook(&home)
        .args(["study", "edit", &reference, "--content", "all things work together"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note saved!"));

    versebook(&home)
        .args(["study", "show", &reference])
        .assert()
        .success()
        .stdout(predicate::str::contains("Romans › 8:28"))
        .stdout(predicate::str::contains("all things work together"));

    versebook(&home)
        .args(["study", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Romans"))
        .stdout(predicate::str::contains("8:28"));

    // Without a terminal the confirmation defaults to no.
    versebook(&home)
        .args(["study", "rm", &folder])
        .assert()
        .success();
    versebook(&home)
        .args(["study", "list"])
        .assert()
        .stdout(predicate::str::contains("Romans"));

    versebook(&home)
        .args(["study", "rm", &folder, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("and 1 nested item"));
    versebook(&home)
        .args(["study", "list"])
        .assert()
        .stdout(predicate::str::contains("No studies yet."));
}

#[test]
fn unknown_study_id_is_an_error() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["study", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Study node not found"));
}

#[test]
fn corrupt_study_data_is_reported_and_ignored() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join("bible-study-data.json"), "{broken").unwrap();

    versebook(&home)
        .args(["study", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No studies yet."))
        .stdout(predicate::str::contains("bible-study-data-corrupt"));

    versebook(&home)
        .args(["study", "add", "folder", "Fresh start"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(store.join("bible-study-data-corrupt.json")).unwrap(),
        "{broken"
    );
}

#[test]
fn versions_from_the_bibles_directory() {
    let home = TempDir::new().unwrap();
    let bibles = home.path().join("bibles");
    fs::create_dir_all(&bibles).unwrap();
    fs::write(
        bibles.join("en_web.json"),
        r#"[{"book":"john","chapter":3,"verse":16,"text":"For God so loved the world"}]"#,
    )
    .unwrap();

    versebook(&home)
        .args(["versions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en_web"));
    versebook(&home)
        .args(["config", "version", "en_web"])
        .assert()
        .success();
    versebook(&home)
        .args(["read", "john", "3", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John 3"))
        .stdout(predicate::str::contains("For God so loved the world"));
}

#[test]
fn insight_without_key_explains_how_to_configure() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .args(["insight", "gen", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "API key not configured. Please set the API_KEY environment variable.",
        ));
}

#[test]
fn version_flag_prints_version() {
    let home = TempDir::new().unwrap();
    versebook(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("versebook"));
}
