//! Stylesheet discovery with gitignore support
//!
//! Walks directories with the ignore crate, filters paths through the
//! configured include/exclude globs and keeps only files with a stylesheet
//! extension.

use crate::types::{GlobPattern, Syntax};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Path did not match the include patterns or matched an exclude pattern
    ExcludedByPattern,
    /// File extension is neither `.css` nor `.scss`
    NotAStylesheet,
    /// Entry is not a regular file (e.g., directory, symlink)
    NotAFile,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::ExcludedByPattern => "excluded by pattern",
            SkipReason::NotAStylesheet => "not a stylesheet",
            SkipReason::NotAFile => "not a file",
        }
    }
}

/// Result of file walking - either a file to scan or a skipped file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    /// File to be scanned
    File(FileEntry),
    /// File that was skipped with reason
    Skipped { path: PathBuf, reason: SkipReason },
}

/// A discovered stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub syntax: Syntax,
}

impl FileEntry {
    /// Creates a FileEntry when the path has a stylesheet extension
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let syntax = Syntax::from_path(&path)?;
        Some(Self { path, syntax })
    }
}

/// Directories that never hold stylesheets worth linting
const ALWAYS_EXCLUDED: [&str; 2] = ["**/.git/**", "**/node_modules/**"];

/// Include/exclude decision for a single path
#[derive(Debug)]
struct PathFilter {
    /// None accepts every path
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl PathFilter {
    fn new(include: &[GlobPattern], exclude: &[GlobPattern]) -> Result<Self, FileWalkerError> {
        let include = match include {
            [] => None,
            patterns => Some(compile_globs(patterns.iter().map(GlobPattern::as_str))?),
        };
        let exclude = compile_globs(
            exclude
                .iter()
                .map(GlobPattern::as_str)
                .chain(ALWAYS_EXCLUDED),
        )?;
        Ok(Self { include, exclude })
    }

    /// Turn one walked entry into a stylesheet or the reason it was dropped
    fn classify(&self, path: &Path, is_file: bool) -> Result<FileEntry, SkipReason> {
        if !is_file {
            return Err(SkipReason::NotAFile);
        }
        let included = self.include.as_ref().is_none_or(|set| set.is_match(path));
        if !included || self.exclude.is_match(path) {
            return Err(SkipReason::ExcludedByPattern);
        }
        FileEntry::from_path(path.to_path_buf()).ok_or(SkipReason::NotAStylesheet)
    }
}

fn compile_globs<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<GlobSet, FileWalkerError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| FileWalkerError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FileWalkerError::InvalidGlob {
        pattern: "<globset>".to_string(),
        source,
    })
}

/// Walks one root (a directory or a single file) for stylesheets
///
/// `.gitignore` files are honoured; hidden files are not skipped.
pub struct FileWalker {
    walker: ignore::Walk,
    filter: PathFilter,
    verbose: bool,
}

impl FileWalker {
    /// Creates a walker that silently drops non-matching entries
    ///
    /// # Errors
    ///
    /// Returns `FileWalkerError::InvalidGlob` when a pattern does not compile.
    pub fn new(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
    ) -> Result<Self, FileWalkerError> {
        Self::with_verbose(root, include, exclude, false)
    }

    /// Creates a walker that also yields [`WalkResult::Skipped`] entries when
    /// `verbose` is set
    pub fn with_verbose(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        let filter = PathFilter::new(include, exclude)?;
        let walker = WalkBuilder::new(root).hidden(false).git_ignore(true).build();
        Ok(Self {
            walker,
            filter,
            verbose,
        })
    }

    /// Matching stylesheets only
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        self.walk_with_skip_info().filter_map(|result| match result {
            Ok(WalkResult::File(file)) => Some(Ok(file)),
            Ok(WalkResult::Skipped { .. }) => None,
            Err(e) => Some(Err(e)),
        })
    }

    /// Matching stylesheets plus, in verbose mode, every dropped entry
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let FileWalker {
            walker,
            filter,
            verbose,
        } = self;

        walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(FileWalkerError::Walk(e))),
            };
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());

            match filter.classify(entry.path(), is_file) {
                Ok(file) => Some(Ok(WalkResult::File(file))),
                Err(reason) => {
                    log::trace!("skipping {}: {}", entry.path().display(), reason.as_str());
                    verbose.then(|| {
                        Ok(WalkResult::Skipped {
                            path: entry.into_path(),
                            reason,
                        })
                    })
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn walk_names(root: &Path, include: &[GlobPattern], exclude: &[GlobPattern]) -> Vec<String> {
        let mut names: Vec<String> = FileWalker::new(root, include, exclude)
            .unwrap()
            .walk()
            .map(|r| {
                let entry = r.unwrap();
                entry
                    .path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_file_entry_from_path() {
        let entry = FileEntry::from_path(PathBuf::from("a/main.scss")).unwrap();
        assert_eq!(entry.syntax, Syntax::Scss);
        assert_eq!(
            FileEntry::from_path(PathBuf::from("a/main.css")).unwrap().syntax,
            Syntax::Css
        );
        assert!(FileEntry::from_path(PathBuf::from("a/main.less")).is_none());
    }

    #[test]
    fn test_compile_globs() {
        assert!(compile_globs(["**/*.scss"]).is_ok());
        let err = compile_globs(["[invalid"]).unwrap_err();
        assert!(err.to_string().contains("'[invalid'"));
    }

    #[test]
    fn test_path_filter_classify() {
        let filter = PathFilter::new(
            &[GlobPattern::new("src/**")],
            &[GlobPattern::new("**/legacy/**")],
        )
        .unwrap();

        assert_eq!(
            filter.classify(Path::new("src/a.scss"), true).unwrap().syntax,
            Syntax::Scss
        );
        assert_eq!(
            filter.classify(Path::new("src"), false).unwrap_err(),
            SkipReason::NotAFile
        );
        assert_eq!(
            filter.classify(Path::new("lib/a.scss"), true).unwrap_err(),
            SkipReason::ExcludedByPattern
        );
        assert_eq!(
            filter.classify(Path::new("src/legacy/a.scss"), true).unwrap_err(),
            SkipReason::ExcludedByPattern
        );
        assert_eq!(
            filter.classify(Path::new("src/node_modules/x/a.scss"), true).unwrap_err(),
            SkipReason::ExcludedByPattern
        );
        assert_eq!(
            filter.classify(Path::new("src/app.ts"), true).unwrap_err(),
            SkipReason::NotAStylesheet
        );
    }

    #[test]
    fn test_walk_only_stylesheets() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.scss"), ".a {}").unwrap();
        fs::write(temp.path().join("b.css"), ".b {}").unwrap();
        fs::write(temp.path().join("c.js"), "let c;").unwrap();

        assert_eq!(walk_names(temp.path(), &[], &[]), vec!["a.scss", "b.css"]);
    }

    #[test]
    fn test_walk_include_and_exclude() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/vendor")).unwrap();
        fs::write(temp.path().join("src/a.scss"), "").unwrap();
        fs::write(temp.path().join("src/vendor/b.scss"), "").unwrap();
        fs::write(temp.path().join("c.css"), "").unwrap();

        let names = walk_names(
            temp.path(),
            &[GlobPattern::new("**/*.scss")],
            &[GlobPattern::new("**/vendor/**")],
        );
        assert_eq!(names, vec!["src/a.scss"]);
    }

    #[test]
    fn test_walk_skips_node_modules() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(temp.path().join("node_modules/pkg/x.scss"), "").unwrap();
        fs::write(temp.path().join("y.scss"), "").unwrap();

        assert_eq!(walk_names(temp.path(), &[], &[]), vec!["y.scss"]);
    }

    #[test]
    fn test_walk_single_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("only.scss");
        fs::write(&file, "").unwrap();

        let files: Vec<FileEntry> = FileWalker::new(&file, &[], &[])
            .unwrap()
            .walk()
            .map(Result::unwrap)
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, file);
    }

    #[test]
    fn test_verbose_reports_skips() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.scss"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let results: Vec<WalkResult> = FileWalker::with_verbose(temp.path(), &[], &[], true)
            .unwrap()
            .walk_with_skip_info()
            .map(Result::unwrap)
            .collect();

        assert!(results.iter().any(|r| matches!(
            r,
            WalkResult::Skipped { path, reason: SkipReason::NotAStylesheet }
                if path.ends_with("notes.txt")
        )));
        // The root directory itself
        assert!(results.iter().any(|r| matches!(
            r,
            WalkResult::Skipped { reason: SkipReason::NotAFile, .. }
        )));
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, WalkResult::File(_)))
                .count(),
            1
        );
    }
}
