use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::GalleryResult;

/// What to delete and what to renumber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenumberOptions {
    /// Source-format extensions removed before renumbering (lowercase, no dot).
    pub source_extensions: Vec<String>,
    /// Extension of the files that are kept and renumbered (lowercase, no dot).
    pub target_extension: String,
}

impl Default for RenumberOptions {
    fn default() -> Self {
        Self {
            source_extensions: ["jpg", "jpeg", "png", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            target_extension: "webp".to_string(),
        }
    }
}

/// File operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FileAction {
    /// Removing a source-format file.
    Delete,
    /// Moving a file to its temporary name.
    TempRename,
    /// Moving a file from its temporary name to its final name.
    Rename,
}

/// One failed file operation; the batch continues past it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FileFailure {
    /// Original file name.
    pub file: String,
    /// Operation that failed.
    pub action: FileAction,
    /// Error text.
    pub error: String,
}

/// Outcome of renumbering one folder.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FolderReport {
    /// Folder that was processed.
    pub dir: PathBuf,
    /// Source-format files removed.
    pub deleted: Vec<String>,
    /// `(original, final)` names of renumbered files.
    pub renamed: Vec<(String, String)>,
    /// Per-file failures.
    pub failures: Vec<FileFailure>,
}

impl FolderReport {
    /// Whether every file operation succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, file: &str, action: FileAction, err: std::io::Error) {
        tracing::warn!(
            dir = %self.dir.display(),
            file,
            ?action,
            error = %err,
            "file operation failed"
        );
        self.failures.push(FileFailure {
            file: file.to_string(),
            action,
            error: err.to_string(),
        });
    }
}

/// Delete source-format files in `dir`, then rename the target-format files to `1..N` in
/// natural order: case-insensitive, with digit runs compared by value so `2` precedes `10`.
/// Renaming goes through temporary names so reordering never overwrites a file. Only failing
/// to read `dir` is an error.
#[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn renumber_folder(
    dir: impl AsRef<Path>,
    opts: &RenumberOptions,
) -> GalleryResult<FolderReport> {
    let dir = dir.as_ref();
    let mut report = FolderReport {
        dir: dir.to_path_buf(),
        ..FolderReport::default()
    };

    let mut targets = Vec::new();
    let mut sources = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir entry in '{}'", dir.display()))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        match extension_of(&name) {
            Some(ext) if ext == opts.target_extension => targets.push(name),
            Some(ext) if opts.source_extensions.contains(&ext) => sources.push(name),
            _ => {}
        }
    }

    sources.sort();
    for name in sources {
        match std::fs::remove_file(dir.join(&name)) {
            Ok(()) => report.deleted.push(name),
            Err(err) => report.fail(&name, FileAction::Delete, err),
        }
    }

    targets.sort_by_cached_key(|name| (natural_key(name), name.clone()));

    let ext = &opts.target_extension;
    let mut staged: Vec<Option<(String, PathBuf)>> = Vec::with_capacity(targets.len());
    for (i, name) in targets.into_iter().enumerate() {
        let temp = dir.join(format!("__temp_{i}__.{ext}"));
        match std::fs::rename(dir.join(&name), &temp) {
            Ok(()) => staged.push(Some((name, temp))),
            Err(err) => {
                report.fail(&name, FileAction::TempRename, err);
                staged.push(None);
            }
        }
    }

    // Numbering follows sorted order even when a file failed to stage.
    for (i, slot) in staged.into_iter().enumerate() {
        let Some((name, temp)) = slot else {
            continue;
        };
        let final_name = format!("{}.{ext}", i + 1);
        match std::fs::rename(&temp, dir.join(&final_name)) {
            Ok(()) => report.renamed.push((name, final_name)),
            Err(err) => report.fail(&name, FileAction::Rename, err),
        }
    }

    tracing::info!(
        dir = %dir.display(),
        deleted = report.deleted.len(),
        renamed = report.renamed.len(),
        failed = report.failures.len(),
        "folder renumbered"
    );
    Ok(report)
}

/// Run [`renumber_folder`] on every immediate subdirectory of `root`, in name order.
pub fn renumber_tree(
    root: impl AsRef<Path>,
    opts: &RenumberOptions,
) -> GalleryResult<Vec<FolderReport>> {
    let root = root.as_ref();
    let mut dirs = Vec::new();
    let entries =
        std::fs::read_dir(root).with_context(|| format!("read dir '{}'", root.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir entry in '{}'", root.display()))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    dirs.iter().map(|d| renumber_folder(d, opts)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    /// Digit run without leading zeros, ordered by length first.
    Number(usize, String),
    Text(String),
}

fn natural_key(name: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut chars = name.chars().peekable();
    while let Some(&first) = chars.peek() {
        let digits = first.is_ascii_digit();
        let mut run = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() != digits {
                break;
            }
            run.push(c);
            chars.next();
        }
        if digits {
            let value = run.trim_start_matches('0').to_string();
            chunks.push(Chunk::Number(value.len(), value));
        } else {
            chunks.push(Chunk::Text(run.to_lowercase()));
        }
    }
    chunks
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/renumber.rs"]
mod tests;
