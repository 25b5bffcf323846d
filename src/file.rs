// src/file.rs
//
// Persistence Writer. Every file is written to "<name>.tmp" next to its
// target and renamed over it, so a failed run never leaves a half-written
// or mixed snapshot behind.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportFormat;
use crate::core::sanitize::player_file_stem;
use crate::error::{Error, Result, Stage};
use crate::record::MatchRecord;
use crate::table::write_cleaned;

/// Files produced by one persist call.
#[derive(Clone, Debug, Default)]
pub struct Written {
    pub table_file: PathBuf,
    pub player_files: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
}

/// Write the full table, then one file per player.
pub fn persist(
    rows: &[MatchRecord],
    table_file: &Path,
    players_dir: &Path,
    format: ExportFormat,
    prune_stale: bool,
) -> Result<Written> {
    write_table_file(table_file, rows, format)?;
    logf!("Persist: {} row(s) → {}", rows.len(), table_file.display());

    let player_files = write_per_player(players_dir, rows, format)?;
    logf!("Persist: {} player file(s) → {}", player_files.len(), players_dir.display());

    let pruned = if prune_stale {
        prune_players_dir(players_dir, &player_files, format)?
    } else {
        Vec::new()
    };

    Ok(Written { table_file: table_file.to_path_buf(), player_files, pruned })
}

/// Atomic replace of `path` with the cleaned-table rendering of `rows`.
pub fn write_table_file(path: &Path, rows: &[MatchRecord], format: ExportFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let tmp = temp_path_for(path);
    let io_err = |e| Error::io(Stage::Persist, &tmp, e);

    let file = File::create(&tmp).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_cleaned(&mut out, rows, format.delim()).map_err(|e| Error::csv(Stage::Persist, &tmp, e))?;
    out.flush().map_err(io_err)?;
    out.get_ref().sync_all().map_err(io_err)?;
    drop(out);

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::io(Stage::Persist, path, e)
    })
}

/// Group rows by player name (original order inside each group) and write
/// `<player>.<ext>` for every player. Returns the paths in player-name order.
pub fn write_per_player(
    dir: &Path,
    rows: &[MatchRecord],
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut by_player: BTreeMap<&str, Vec<MatchRecord>> = BTreeMap::new();
    for r in rows {
        by_player.entry(r.player_name.as_str()).or_default().push(r.clone());
    }

    let stems = player_stems(by_player.keys().copied());
    let mut written = Vec::with_capacity(by_player.len());
    for ((player, player_rows), stem) in by_player.iter().zip(stems.values()) {
        let path = dir.join(join!(stem, ".", format.ext()));
        write_table_file(&path, player_rows, format)?;
        logd!("Persist: {} ({} row(s)) → {}", player, player_rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// Delete `*.ext` files in `dir` that are not in `keep`.
fn prune_players_dir(dir: &Path, keep: &[PathBuf], format: ExportFormat) -> Result<Vec<PathBuf>> {
    let keep: HashSet<&Path> = keep.iter().map(|p| p.as_path()).collect();
    let io_err = |e| Error::io(Stage::Persist, dir, e);

    let mut removed = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some(format.ext()) { continue; }
        if keep.contains(path.as_path()) { continue; }

        fs::remove_file(&path).map_err(|e| Error::io(Stage::Persist, &path, e))?;
        logf!("Persist: pruned stale {}", path.display());
        removed.push(path);
    }
    Ok(removed)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(Stage::Persist, dir, e))?;
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// File stem of every distinct player name, assigned in name order. A
/// second player sanitizing to the same stem gets "<stem> (2)", and so on.
/// Anything that maps names to player files goes through here.
pub fn player_stems<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeMap<&'a str, String> {
    let names: BTreeSet<&str> = names.into_iter().collect();
    let mut seen: HashSet<String> = HashSet::new();
    names
        .into_iter()
        .map(|player| {
            let stem = player_file_stem(player);
            let mut candidate = stem.clone();
            let mut n = 1;
            // Case-insensitive filesystems treat "Faker" and "faker" as one file
            while !seen.insert(candidate.to_lowercase()) {
                n += 1;
                candidate = format!("{stem} ({n})");
            }
            (player, candidate)
        })
        .collect()
}
