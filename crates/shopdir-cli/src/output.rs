//! JSON output to a file or stdout.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

pub(crate) async fn write_json<T: Serialize + ?Sized>(
    path: Option<&Path>,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    let body = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match path {
        Some(path) => {
            tokio::fs::write(path, body.as_bytes())
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = body.len(), "wrote json");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
