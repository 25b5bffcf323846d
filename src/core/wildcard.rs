// src/core/wildcard.rs
//
// File-name wildcards: '*' (any run, possibly empty) and '?' (one char).
// Only the last path component may carry wildcards.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn matches(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();

    let (mut pi, mut ni) = (0usize, 0usize);
    // Last '*' seen and the name position it was tried against
    let mut star: Option<(usize, usize)> = None;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((sp, sn)) = star {
            pi = sp + 1;
            ni = sn + 1;
            star = Some((sp, sn + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' { pi += 1; }
    pi == p.len()
}

/// Expand `dir/pattern` to the matching regular files, in directory
/// enumeration order.
pub fn expand(pattern: &str) -> io::Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    let name_pat = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut out = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let p = entry.path();
        if !p.is_file() { continue; }
        let name = entry.file_name();
        if matches(&name_pat, &name.to_string_lossy()) {
            out.push(p);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::matches;

    #[test]
    fn star_and_question() {
        assert!(matches("*.csv", "2025_LoL.csv"));
        assert!(matches("2025_*_data.csv", "2025_LoL_data.csv"));
        assert!(matches("202?.csv", "2024.csv"));
        assert!(matches("*", ""));
        assert!(!matches("*.csv", "notes.txt"));
        assert!(!matches("202?.csv", "20245.csv"));
        assert!(matches("a*b*c", "aXXbYYbc"));
    }
}
