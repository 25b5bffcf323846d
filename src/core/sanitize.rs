// src/core/sanitize.rs

/// Trimmed cell, or None when blank. Pandas writes missing values as "" and
/// sometimes as "nan"/"NaN".
pub fn non_blank(cell: Option<&str>) -> Option<String> {
    let t = cell?.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("nan") { None } else { Some(s!(t)) }
}

/// File stem for a player: the name itself, with only the characters that
/// cannot live in a file name swapped for '_'.
pub fn player_file_stem(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if out.trim_matches('.').is_empty() {
        out = out.replace('.', "_");
    }
    if out.is_empty() { s!("_") } else { out }
}
