use std::fs;
use std::path::Path;

use rml::{LoadError, Loader, Scope};

fn load(name: &str) -> Result<rml::Section, LoadError> {
    let path = Path::new("tests/broken/").join(name);
    Loader::with_scope(Scope::new()).load_section("config", &path, None)
}

#[test]
fn ensure_fail() {
    let dir = Path::new("tests/broken/");

    assert!(dir.exists(), "broken directory missing");

    let entries = fs::read_dir(dir).expect("Failed to read broken directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            == Some("rml")
        {
            files.push(path);
        }
    }

    assert!(!files.is_empty(), "No .rml files found in broken directory");

    let loader = Loader::with_scope(Scope::new());
    let mut unexpected_successes = Vec::new();

    for file in &files {
        match loader.load_section("config", file, None) {
            Ok(_) => {
                println!("File {:?} unexpectedly resolved successfully", file);
                unexpected_successes.push(file.clone());
            }
            Err(_) => {}
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken files should not resolve successfully, but {} files passed",
            unexpected_successes.len()
        );
    }
}

#[test]
fn undefined_variable() {
    assert_eq!(
        load("undefined.rml"),
        Err(LoadError::UndefinedVariable {
            name: "RML_SURELY_UNDEFINED_VARIABLE".to_string()
        })
    );
}

#[test]
fn unterminated_section() {
    assert!(matches!(
        load("unterminated.rml"),
        Err(LoadError::UnterminatedTag { ref name, .. }) if name == "config"
    ));
}

#[test]
fn include_cycle() {
    assert!(matches!(
        load("cycle.rml"),
        Err(LoadError::IncludeCycle { .. })
    ));
}

#[test]
fn loop_that_never_ends() {
    assert!(matches!(
        load("stuck_loop.rml"),
        Err(LoadError::InvalidLoop { ref variable, .. }) if variable == "i"
    ));
}

#[test]
fn loop_without_end() {
    assert!(matches!(
        load("unclosed_loop.rml"),
        Err(LoadError::UnterminatedTag { ref name, .. }) if name == "for"
    ));
}

#[test]
fn missing_section() {
    assert_eq!(
        load("missing.rml"),
        Err(LoadError::SectionNotFound {
            key: "config".to_string(),
            name: None
        })
    );
}

#[test]
fn unreadable_reference() {
    assert!(matches!(
        load("bad_reference.rml"),
        Err(LoadError::ReferencedFileUnreadable { ref nameref, .. }) if nameref == "argon"
    ));
}

#[test]
fn unreadable_file() {
    assert!(matches!(
        load("does_not_exist.rml"),
        Err(LoadError::FileUnreadable { .. })
    ));
}
