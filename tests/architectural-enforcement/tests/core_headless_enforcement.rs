//! Integration Test: Headless Core
//!
//! **Policy**: `zheng-core` is the portable counter brain. It MUST NOT
//! reference terminal, rendering, or async-runtime crates; those belong to
//! the surface. A core that stays headless can be driven by any frontend
//! and tested without a terminal.

use std::fs;

use architectural_enforcement::rust_sources;

/// Crate names the core must never mention.
const FORBIDDEN_IN_CORE: &[&str] = &["ratatui", "crossterm", "tokio"];

#[test]
fn test_core_does_not_reference_surface_crates() {
    let mut violations = Vec::new();

    for path in rust_sources("counter/core/src") {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => continue,
        };

        for (idx, line) in content.lines().enumerate() {
            // Skip comments
            let code_part = line.split("//").next().unwrap_or(line);

            for forbidden in FORBIDDEN_IN_CORE {
                if code_part.contains(forbidden) {
                    violations.push(format!(
                        "{}:{} - {}",
                        path.display(),
                        idx + 1,
                        line.trim()
                    ));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nSurface crates referenced from the headless core:\n");
        for violation in &violations {
            eprintln!("  {}", violation);
        }
        panic!(
            "\nFound {} headless-core violation(s).\nMove this code to the surface crate.",
            violations.len()
        );
    }
}

#[test]
fn test_core_sources_exist() {
    // Guards against the walk silently checking an empty directory.
    let sources = rust_sources("counter/core/src");
    assert!(
        sources.len() >= 5,
        "expected the core modules, found {} files",
        sources.len()
    );
}
