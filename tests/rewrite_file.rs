use std::fs;

use stencil::engine::{self, Rule};
use stencil::mutator::FileMutator;
use stencil::{Error, ErrorCode};
use tempfile::tempdir;

#[test]
fn package_declaration_rewrite_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("Main.java"),
        "package com.myname.mymodid;\n\npublic class Main {\n}\n",
    )
    .unwrap();

    let rule = Rule::new(
        "package com.myname.mymodid;",
        "package com.alice.coolmod;",
        1,
    );
    let mutator = FileMutator::default();
    let outcome = mutator
        .mutate(dir.path(), "Main.java", |text| {
            engine::apply_rule(text, &rule)
        })
        .unwrap();

    assert!(outcome.applied);
    let content = fs::read_to_string(dir.path().join("Main.java")).unwrap();
    assert_eq!(content, "package com.alice.coolmod;\n\npublic class Main {\n}\n");
    assert!(!dir.path().join("Main.java.bak").exists());
}

#[test]
fn properties_chain_rewrite_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("gradle.properties"),
        "modName = MyMod\nmodId = mymodid\nmodGroup = com.myname.mymodid\n",
    )
    .unwrap();

    let rules = vec![
        Rule::new("modName = MyMod", "modName = Cool Mod", 1),
        Rule::new("modId = mymodid", "modId = coolmod", 1),
        Rule::new("com.myname.mymodid", "com.alice.coolmod", 1),
    ];
    let mutator = FileMutator::default();
    let outcome = mutator
        .mutate(dir.path(), "gradle.properties", |text| {
            engine::apply_chain(text, &rules)
        })
        .unwrap();

    assert!(outcome.applied);
    let content = fs::read_to_string(dir.path().join("gradle.properties")).unwrap();
    assert_eq!(
        content,
        "modName = Cool Mod\nmodId = coolmod\nmodGroup = com.alice.coolmod\n"
    );
}

#[test]
fn drifted_file_is_left_byte_identical() {
    let dir = tempdir().unwrap();
    let original = "modGroup = com.myname.mymodid\nextra = com.myname.mymodid\n";
    fs::write(dir.path().join("gradle.properties"), original).unwrap();

    // The file has two occurrences, the rule demands one
    let rules = vec![Rule::new("com.myname.mymodid", "com.alice.coolmod", 1)];
    let mutator = FileMutator::default();
    let outcome = mutator
        .mutate(dir.path(), "gradle.properties", |text| {
            engine::apply_chain(text, &rules)
        })
        .unwrap();

    assert!(!outcome.applied);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].contains("Expected 1"));
    assert!(outcome.errors[0].contains("found 2"));

    let content = fs::read_to_string(dir.path().join("gradle.properties")).unwrap();
    assert_eq!(content, original);
    assert!(!dir.path().join("gradle.properties.bak").exists());
}

#[test]
fn stale_backup_error_serializes_with_hint() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "current").unwrap();
    fs::write(dir.path().join("a.txt.bak"), "older").unwrap();

    let mutator = FileMutator::default();
    let err = mutator
        .mutate(dir.path(), "a.txt", |text| {
            engine::apply_rule(text, &Rule::new("current", "next", 1))
        })
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MutateStaleBackup);
    assert_eq!(err.code.as_str(), "mutate.stale_backup");
    assert!(!err.hints.is_empty());
    assert!(err.details["backupPath"]
        .as_str()
        .unwrap()
        .ends_with("a.txt.bak"));
}

#[test]
fn missing_target_error_carries_path_detail() {
    let dir = tempdir().unwrap();

    let mutator = FileMutator::default();
    let err = mutator
        .mutate(dir.path(), "gone.txt", |text| {
            engine::apply_rule(text, &Rule::new("a", "b", 1))
        })
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MutateTargetMissing);
    assert!(err.details["path"].as_str().unwrap().ends_with("gone.txt"));
}

#[test]
fn absence_guard_blocks_rewrite_of_already_converted_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("Main.java"),
        "package com.alice.coolmod;\n",
    )
    .unwrap();

    // Guard first: the old marker must be gone before renaming anything else
    let rules = vec![
        Rule::absent("com.myname.mymodid"),
        Rule::new("com.alice.coolmod", "com.alice.coolmod2", 1),
    ];
    let mutator = FileMutator::default();
    let outcome = mutator
        .mutate(dir.path(), "Main.java", |text| {
            engine::apply_chain(text, &rules)
        })
        .unwrap();

    assert!(outcome.applied);
    assert_eq!(
        fs::read_to_string(dir.path().join("Main.java")).unwrap(),
        "package com.alice.coolmod2;\n"
    );
}

#[test]
fn validation_error_display_uses_message() {
    let err = Error::validation_invalid_argument("name", "Project name cannot be empty", None);
    assert_eq!(format!("{}", err), "Invalid argument");
    assert_eq!(err.code.as_str(), "validation.invalid_argument");
}
