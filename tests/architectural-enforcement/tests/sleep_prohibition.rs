//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT block a thread with sleep. The
//! frame loop owns time; everything time-based advances through
//! `update(delta)` so it stays cancellable and deterministic under test.
//!
//! **Exceptions**: async frame pacing in the event loop, async pulse
//! pacing in the haptics driver, and test code.

use std::fs;
use std::path::Path;

use architectural_enforcement::rust_sources;

#[test]
fn test_no_blocking_sleep_anywhere() {
    // thread::sleep stalls the whole loop; there is no acceptable use.
    let mut violations = Vec::new();

    for dir in ["counter/core/src", "tui/src"] {
        for path in rust_sources(dir) {
            scan(&path, "thread::sleep", &mut violations);
        }
    }

    assert!(
        violations.is_empty(),
        "\nBlocking sleep in production code:\n  {}\n",
        violations.join("\n  ")
    );
}

#[test]
fn test_async_sleep_only_where_time_is_paced() {
    // tokio::time::sleep is fine for pacing, not for waiting on state.
    let allowed = ["app.rs", "haptics.rs"];
    let mut violations = Vec::new();

    for path in rust_sources("tui/src") {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if allowed.contains(&file_name) {
            continue;
        }
        scan(&path, "time::sleep", &mut violations);
    }

    // The core never sleeps at all; it only consumes deltas.
    for path in rust_sources("counter/core/src") {
        scan(&path, "time::sleep", &mut violations);
    }

    assert!(
        violations.is_empty(),
        "\nAsync sleep outside the pacing sites:\n  {}\n",
        violations.join("\n  ")
    );
}

fn scan(path: &Path, needle: &str, violations: &mut Vec<String>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    let lines: Vec<&str> = content.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        // Skip comments
        let code_part = line.split("//").next().unwrap_or(line);

        if code_part.contains(needle) && !is_in_test_function(&lines, idx) {
            violations.push(format!("{}:{} - {}", path.display(), idx + 1, line.trim()));
        }
    }
}

/// Scan backwards for a #[test] / #[tokio::test] attribute before the
/// enclosing function.
fn is_in_test_function(lines: &[&str], current_idx: usize) -> bool {
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if line.starts_with("#[test]") || line.starts_with("#[tokio::test") {
            return true;
        }

        if line.starts_with("mod ") || line.starts_with("impl ") {
            return false;
        }
    }
    false
}
