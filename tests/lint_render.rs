//! Lint: every `[X]` key hint a renderer shows must also be tappable.
//!
//! On touch screens there is no keyboard, so a hint like `[E] Try to Escape`
//! that is drawn with `ClickableList::push()` is a dead button. Hints go
//! through `push_clickable()`, and a renderer that builds clickable lists has
//! to hand them to `register_targets()` or nothing is hit-testable.
//!
//! Scans every `render.rs` under `src/games/`.

use std::fs;
use std::path::{Path, PathBuf};

/// True for a key hint such as `[E]`, `[1]` or `[-]`.
fn contains_key_hint(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'['
            && w[2] == b']'
            && (w[1].is_ascii_alphanumeric() || b"-=!~|\\".contains(&w[1]))
    })
}

/// Lines that push a key hint as plain (non-clickable) text.
fn plain_pushes_with_key_hint(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && contains_key_hint(line)
                && line.contains(".push(")
                && !line.contains("push_clickable(")
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

/// A renderer that marks lines clickable but never registers them.
fn clickables_without_registration(source: &str) -> bool {
    source.contains("push_clickable(") && !source.contains("register_targets(")
}

fn render_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            render_files(&path, out);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            out.push(path);
        }
    }
}

#[test]
fn key_hints_are_clickable() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut files = Vec::new();
    render_files(&games_dir, &mut files);
    assert!(!files.is_empty(), "no render.rs found under {}", games_dir.display());

    let mut report = String::new();
    for path in &files {
        let Ok(source) = fs::read_to_string(path) else {
            continue;
        };
        for (line_num, line) in plain_pushes_with_key_hint(&source) {
            report.push_str(&format!("  {}:{}: {}\n", path.display(), line_num, line));
        }
        if clickables_without_registration(&source) {
            report.push_str(&format!(
                "  {}: push_clickable() used but register_targets() never called\n",
                path.display()
            ));
        }
    }

    assert!(
        report.is_empty(),
        "Key hints rendered without a click target.\n\
         Use ClickableList::push_clickable() and register_targets().\n\n{}",
        report
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_plain_push() {
        let source = r#"cl.push(Line::from(" [E] Try to Escape"));"#;
        assert_eq!(plain_pushes_with_key_hint(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [E] Try to Escape"), ATTEMPT_ESCAPE);"#;
        assert!(plain_pushes_with_key_hint(source).is_empty());
    }

    #[test]
    fn ignores_comments_and_format_placeholders() {
        assert!(plain_pushes_with_key_hint(r#"// cl.push(Line::from(" [E]"));"#).is_empty());
        assert!(plain_pushes_with_key_hint(r#"cl.push(format!(" [{}] ", n));"#).is_empty());
    }

    #[test]
    fn key_hint_detection() {
        assert!(contains_key_hint("[E]"));
        assert!(contains_key_hint(" [1] Bookshelf"));
        assert!(contains_key_hint("[-]"));
        assert!(!contains_key_hint("[]"));
        assert!(!contains_key_hint("[Enter]"));
        assert!(!contains_key_hint("[{}]"));
        assert!(!contains_key_hint("ab"));
    }

    #[test]
    fn unregistered_clickables_are_caught() {
        assert!(clickables_without_registration("cl.push_clickable(x, 1);"));
        assert!(!clickables_without_registration(
            "cl.push_clickable(x, 1); cl.register_targets(inner, &mut cs, true);"
        ));
        assert!(!clickables_without_registration("cl.push(x);"));
    }
}
