//! Debug mode helper for dumping decoded trace batches to a JSON lines file

use std::path::Path;
use std::sync::LazyLock;

use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::time::now_iso;

/// Serializes appends so concurrent requests don't interleave lines
static WRITE_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

#[derive(Serialize)]
struct DebugEntry<'a, T: Serialize> {
    timestamp: String,
    wire_format: &'a str,
    data: &'a T,
}

/// Append one entry to `debug_path/filename`.
/// Failures are logged and never fail the request.
pub async fn write_debug<T: Serialize>(
    debug_path: &Path,
    filename: &str,
    wire_format: &str,
    data: &T,
) {
    let file_path = debug_path.join(filename);
    let entry = DebugEntry {
        timestamp: now_iso(),
        wire_format,
        data,
    };

    let json = match serde_json::to_string(&entry) {
        Ok(j) => j,
        Err(e) => {
            tracing::warn!(error = %e, filename, "Failed to serialize debug entry");
            return;
        }
    };

    let _guard = WRITE_LOCK.lock().await;

    let result = async {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok::<_, std::io::Error>(())
    }
    .await;

    if let Err(e) = result {
        tracing::warn!(
            error = %e,
            path = %file_path.display(),
            "Failed to write debug entry"
        );
    }
}
