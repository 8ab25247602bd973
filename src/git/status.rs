//! Working tree status: which paths differ between the index and HEAD.

use std::path::Path;

use git2::Repository;
use tracing::{debug, warn};

use crate::error::GitError;

use super::runner::GitRunner;

/// Paths reported by `git diff-index HEAD --`, in output order.
///
/// Each record looks like `:100644 100644 <old> <new> M\t<path>`; the path is
/// everything after the first tab. Records with two paths (copies/renames)
/// report the destination.
pub fn dirty_paths(git: &dyn GitRunner) -> Result<Vec<String>, GitError> {
    let output = git.run(&["diff-index", "HEAD", "--"])?;
    Ok(parse_diff_index(&output))
}

fn parse_diff_index(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (_, paths) = line.split_once('\t')?;
            let path = paths.rsplit('\t').next().unwrap_or(paths);
            (!path.is_empty()).then(|| unquote_path(path))
        })
        .collect()
}

/// Undo git's C-style quoting of unusual paths (`core.quotePath`).
///
/// Quoted paths are wrapped in `"` with backslash escapes and octal bytes,
/// e.g. `"\355\225\234.txt"`. Unquoted paths are returned as is.
fn unquote_path(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut input = inner.bytes().peekable();
    while let Some(b) = input.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match input.next() {
            Some(d @ b'0'..=b'7') => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match input.peek() {
                        Some(&n @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(n - b'0');
                            input.next();
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'n') => bytes.push(b'\n'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'v') => bytes.push(0x0b),
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Submodule paths registered in the repository at `workdir`.
///
/// Lookup failures are logged and treated as "no submodules".
pub fn registered_submodule_paths(workdir: &Path) -> Vec<String> {
    let repo = match Repository::open(workdir) {
        Ok(repo) => repo,
        Err(e) => {
            warn!("Could not open {} to list submodules: {}", workdir.display(), e);
            return Vec::new();
        }
    };

    match repo.submodules() {
        Ok(submodules) => {
            let paths: Vec<String> = submodules
                .iter()
                .map(|s| s.path().to_string_lossy().replace('\\', "/"))
                .collect();
            debug!("Registered submodules: {:?}", paths);
            paths
        }
        Err(e) => {
            warn!("Could not list submodules: {}", e);
            Vec::new()
        }
    }
}
