use std::fs;
use std::path::{Path, PathBuf};

use rml::{Loader, Scope};

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir).expect("Failed to read directory");

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
    files.sort();
    files
}

#[test]
fn ensure_samples_resolve() {
    let dir = Path::new("tests/samples/");

    assert!(dir.exists(), "samples directory missing");

    let files = files_in(dir);

    assert!(!files.is_empty(), "No .rml files found in samples directory");

    let loader = Loader::with_scope(Scope::new());
    let mut failures = Vec::new();

    for file in &files {
        match loader.load_section("config", file, None) {
            Ok(section) => {
                if section
                    .buffer()
                    .contains("<for")
                {
                    println!("File {:?} still contains a loop", file);
                    failures.push(file.clone());
                }
                if section
                    .buffer()
                    .contains("<include")
                {
                    println!("File {:?} still contains an include", file);
                    failures.push(file.clone());
                }
            }
            Err(e) => {
                println!("File {:?} failed to resolve: {:?}", file, e);
                failures.push(file.clone());
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should resolve successfully, but {} files failed",
            failures.len()
        );
    }
}

#[test]
fn ensure_samples_have_no_diagnostics() {
    let loader = Loader::with_scope(Scope::new());

    for file in files_in(Path::new("tests/samples/")) {
        let section = loader
            .load_section("config", &file, None)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        assert!(
            section
                .diagnostics()
                .is_empty(),
            "File {:?} produced diagnostics: {:?}",
            file,
            section.diagnostics()
        );
    }
}

pub(crate) fn sample(name: &str) -> rml::Section {
    let path = Path::new("tests/samples/").join(name);
    Loader::with_scope(Scope::new())
        .load_section("config", &path, None)
        .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", path, e))
}
