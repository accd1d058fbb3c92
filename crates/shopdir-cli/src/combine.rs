//! `combine` subcommand: merge every CSV export in a directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use shopdir_ingest::combine_csv_texts;

/// CSV files in `dir`, sorted by name, excluding the `output` file itself.
///
/// Paths are compared after canonicalization, so a same-named file in a
/// different directory from `output` is still an input.
pub(crate) async fn list_csv_files(dir: &Path, output: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let output_path = resolve_output_path(output).await;
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }
        if let Some(output_path) = &output_path {
            if tokio::fs::canonicalize(&path).await.ok().as_ref() == Some(output_path) {
                continue;
            }
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Canonical location of `output`, which may not exist yet. `None` when its
/// directory does not exist, in which case it cannot collide with an input.
async fn resolve_output_path(output: &Path) -> Option<PathBuf> {
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = output.file_name()?;
    let parent = tokio::fs::canonicalize(parent).await.ok()?;
    Some(parent.join(file_name))
}

pub(crate) async fn run_combine(dir: &Path, output: &Path) -> anyhow::Result<()> {
    let files = list_csv_files(dir, output).await?;
    tracing::info!(dir = %dir.display(), count = files.len(), "found csv files to combine");

    let mut texts = Vec::with_capacity(files.len());
    for (idx, path) in files.iter().enumerate() {
        tracing::info!(file = %path.display(), "processing ({}/{})", idx + 1, files.len());
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        texts.push(text);
    }

    let outcome = combine_csv_texts(&texts);
    tokio::fs::write(output, outcome.text.as_bytes())
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(
        output = %output.display(),
        lines = outcome.lines_written,
        headers_dropped = outcome.headers_dropped,
        "combined csv files"
    );
    Ok(())
}
