//! Source discovery and generated-file quarantine
//!
//! Walks the target tree for `.go` files, honoring `.gitignore` and
//! excluding `vendor/` and `testdata/` trees. Generated files are split out
//! as "skipped": they are renamed aside for the duration of the concurrent
//! check phase and restored afterwards, so no check ever sees them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use tracing::{debug, warn};

/// Suffix appended to a quarantined file's name while checks run.
const QUARANTINE_SUFFIX: &str = ".grade.bak";

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["vendor", "testdata"];

/// Filename suffixes that mark a file as generated.
const GENERATED_SUFFIXES: &[&str] = &[".pb.go", "_gen.go", ".gen.go"];

/// The resolved input for one run: files to analyze and generated files to
/// keep out of the checks' way.
#[derive(Debug, Default)]
pub struct SourceSet {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Enumerate the `.go` files under `root`.
///
/// Fails if the walk itself fails or if no analyzable files are found —
/// both are fatal before any check is dispatched. The returned lists are
/// sorted so downstream output is reproducible.
pub fn go_files(root: &Path) -> Result<SourceSet> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut set = SourceSet::default();
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.path().is_dir() && EXCLUDED_DIRS.contains(&name.as_ref()))
        })
        .build();

    for entry in walker {
        let entry = entry.with_context(|| format!("could not walk {}", root.display()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "go") {
            continue;
        }
        if is_generated(path) {
            debug!("skipping generated file {}", path.display());
            set.skipped.push(path.to_path_buf());
        } else {
            set.files.push(path.to_path_buf());
        }
    }

    if set.files.is_empty() {
        bail!("no .go files found in {}", root.display());
    }
    set.files.sort();
    set.skipped.sort();
    Ok(set)
}

/// A file is generated if its name carries a known generator suffix or its
/// first line carries the conventional `Code generated ... DO NOT EDIT.`
/// marker.
fn is_generated(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    if GENERATED_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return true;
    }
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .next()
            .is_some_and(|line| line.starts_with("//") && line.contains("Code generated")),
        Err(_) => false,
    }
}

/// Renames skipped files aside for the duration of the check phase and
/// restores them when dropped. Restoration failures are logged, never
/// propagated: a missing generated file must not fail the run.
#[derive(Debug)]
pub struct Quarantine {
    renamed: Vec<(PathBuf, PathBuf)>,
}

impl Quarantine {
    /// Move each skipped file out of the checks' sight. A file that cannot
    /// be renamed is left in place and logged; the run continues.
    pub fn hold(skipped: &[PathBuf]) -> Self {
        let mut renamed = Vec::with_capacity(skipped.len());
        for path in skipped {
            let mut aside = path.as_os_str().to_owned();
            aside.push(QUARANTINE_SUFFIX);
            let aside = PathBuf::from(aside);
            match fs::rename(path, &aside) {
                Ok(()) => renamed.push((path.clone(), aside)),
                Err(e) => warn!("could not quarantine {}: {}", path.display(), e),
            }
        }
        Self { renamed }
    }
}

impl Drop for Quarantine {
    fn drop(&mut self) {
        for (original, aside) in self.renamed.drain(..) {
            if let Err(e) = fs::rename(&aside, &original) {
                warn!("could not restore {}: {}", original.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn test_finds_go_files_and_sorts() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "b.go", "package main\n");
        write(dir.path(), "a.go", "package main\n");
        write(dir.path(), "notes.txt", "not go\n");

        let set = go_files(dir.path()).expect("discover");
        let names: Vec<_> = set
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
        assert!(set.skipped.is_empty());
    }

    #[test]
    fn test_excludes_vendor_and_testdata() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "main.go", "package main\n");
        write(dir.path(), "vendor/dep/dep.go", "package dep\n");
        write(dir.path(), "testdata/fixture.go", "package fixture\n");

        let set = go_files(dir.path()).expect("discover");
        assert_eq!(set.files.len(), 1);
        assert!(set.files[0].ends_with("main.go"));
    }

    #[test]
    fn test_generated_files_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "main.go", "package main\n");
        write(dir.path(), "api.pb.go", "package api\n");
        write(
            dir.path(),
            "zz_output.go",
            "// Code generated by mockgen. DO NOT EDIT.\npackage api\n",
        );

        let set = go_files(dir.path()).expect("discover");
        assert_eq!(set.files.len(), 1);
        assert_eq!(set.skipped.len(), 2);
    }

    #[test]
    fn test_empty_tree_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "readme.md", "no go here\n");
        let err = go_files(dir.path()).expect_err("should fail");
        assert!(err.to_string().contains("no .go files"));
    }

    #[test]
    fn test_quarantine_renames_and_restores() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gen = write(dir.path(), "api.pb.go", "package api\n");

        {
            let _guard = Quarantine::hold(std::slice::from_ref(&gen));
            assert!(!gen.exists());
            let mut aside = gen.as_os_str().to_owned();
            aside.push(QUARANTINE_SUFFIX);
            assert!(PathBuf::from(aside).exists());
        }
        assert!(gen.exists());
        assert_eq!(fs::read_to_string(&gen).expect("read restored"), "package api\n");
    }

    #[test]
    fn test_quarantine_tolerates_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ghost = dir.path().join("ghost.pb.go");
        // Never existed; hold and drop must both be harmless.
        let guard = Quarantine::hold(std::slice::from_ref(&ghost));
        drop(guard);
    }
}
