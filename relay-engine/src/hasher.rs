//! Exclusion-aware content hashing of module trees.
//!
//! A module's digest covers the relative path and content of every file under
//! its directory that no exclusion pattern matches. Files are visited in
//! lexicographic relative-path order, so byte-identical trees always produce
//! identical digests regardless of directory iteration order.
//!
//! Exclusions are the module owner's contract: a module whose build writes
//! artifacts inside its own tree must exclude that output directory, or every
//! build changes the module's own digest and it never settles.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use sha2::{Digest, Sha256};

use crate::error::{io_err, EngineError};

/// Compute the digest of the tree rooted at `path`, honoring `exclude`.
///
/// Fails on any unreadable non-excluded path — unreadable files are never
/// silently skipped, since a skip would make the digest lie about tree
/// content.
pub fn hash_tree(path: &Path, exclude: &[String]) -> Result<String, EngineError> {
    let exclusions = ExcludeSet::compile(exclude)?;

    let mut files = Vec::new();
    collect_files(path, Path::new(""), &exclusions, &mut files)?;
    files.sort();

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    for rel in &files {
        // Path and content both feed the digest, so renames are changes too.
        hasher.update(normalize(rel).as_bytes());
        hasher.update([0u8]);

        let abs = path.join(rel);
        let mut file = File::open(&abs).map_err(|e| io_err(&abs, e))?;
        loop {
            let n = file.read(&mut buf).map_err(|e| io_err(&abs, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        hasher.update([0u8]);
    }

    let digest = hex::encode(hasher.finalize());
    debug!("hashed {} file(s) under {:?} -> {}", files.len(), path, digest);
    Ok(digest)
}

/// Compiled exclusion patterns.
///
/// A relative path is excluded when the glob set matches either the whole
/// path or any single path segment, so a bare `target` pattern prunes every
/// `target/` subtree at any depth without `**` spelling. Matching is purely
/// syntactic.
struct ExcludeSet {
    set: GlobSet,
}

impl ExcludeSet {
    fn compile(patterns: &[String]) -> Result<Self, EngineError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| EngineError::Pattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| EngineError::Pattern {
            pattern: patterns.join(", "),
            source: e,
        })?;
        Ok(Self { set })
    }

    fn is_excluded(&self, rel: &Path) -> bool {
        if self.set.is_empty() {
            return false;
        }
        if self.set.is_match(normalize(rel)) {
            return true;
        }
        rel.components()
            .any(|c| self.set.is_match(c.as_os_str().to_string_lossy().as_ref()))
    }
}

/// Depth-first collection of non-excluded file paths relative to the root.
fn collect_files(
    root: &Path,
    rel_dir: &Path,
    exclusions: &ExcludeSet,
    out: &mut Vec<PathBuf>,
) -> Result<(), EngineError> {
    let abs_dir = root.join(rel_dir);
    let entries = std::fs::read_dir(&abs_dir).map_err(|e| io_err(&abs_dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| io_err(&abs_dir, e))?;
        let rel = rel_dir.join(entry.file_name());
        if exclusions.is_excluded(&rel) {
            continue;
        }

        let file_type = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
        if file_type.is_dir() {
            collect_files(root, &rel, exclusions, out)?;
        } else if file_type.is_file() {
            out.push(rel);
        }
        // Symlinks and special files carry no stable content; they are not
        // part of the change signal.
    }
    Ok(())
}

fn normalize(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}
