//! JSON Lines implementation of the `EventLog` trait.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt, SeekFrom};
use tracing::{info, warn};

use mealbadges_core::error::DomainError;
use mealbadges_core::log::{EventLog, StoredEvent};

/// File-backed event log holding one JSON-encoded [`StoredEvent`] per line.
///
/// No handle is kept between writes: every append opens the file in append
/// mode, writes a single line, syncs it and closes it again. Records carry no
/// length prefix or checksum; line order is append order. A failed append is
/// rolled back, and an append never lands behind an unterminated record.
#[derive(Debug, Clone)]
pub struct FileEventLog {
    path: PathBuf,
}

impl FileEventLog {
    /// Creates a log over `path` without touching the filesystem.
    ///
    /// The file is created on the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a log over `path`, cutting off a torn final record left by a
    /// crash mid-write so later appends start on a fresh line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if an existing file cannot be
    /// read or truncated.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let log = Self::new(path);
        log.truncate_torn_tail().await?;
        Ok(log)
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn truncate_torn_tail(&self) -> Result<(), DomainError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(io_error("read", &self.path, &e)),
        };
        if bytes.last().is_none_or(|b| *b == b'\n') {
            return Ok(());
        }

        let keep = bytes.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
        warn!(
            path = %self.path.display(),
            dropped_bytes = bytes.len() - keep,
            "truncating torn final record in event log"
        );
        let file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .await
            .map_err(|e| io_error("open", &self.path, &e))?;
        file.set_len(keep as u64)
            .await
            .map_err(|e| io_error("truncate", &self.path, &e))?;
        file.sync_all()
            .await
            .map_err(|e| io_error("sync", &self.path, &e))?;
        info!(path = %self.path.display(), "event log repaired");
        Ok(())
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!(
        "event log {action} failed for {}: {err}",
        path.display()
    ))
}

fn encode_line(event: &StoredEvent) -> Result<Vec<u8>, DomainError> {
    let mut line = serde_json::to_vec(event)
        .map_err(|e| DomainError::Infrastructure(format!("event serialization failed: {e}")))?;
    line.push(b'\n');
    Ok(line)
}

/// Returns `true` if the file has content that does not end in a newline.
async fn ends_unterminated(file: &mut File) -> std::io::Result<bool> {
    if file.metadata().await?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] != b'\n')
}

async fn write_synced(file: &mut File, line: &[u8], path: &Path) -> Result<(), DomainError> {
    file.write_all(line)
        .await
        .map_err(|e| io_error("write", path, &e))?;
    file.flush()
        .await
        .map_err(|e| io_error("flush", path, &e))?;
    file.sync_data()
        .await
        .map_err(|e| io_error("sync", path, &e))
}

/// Decodes log contents. A final record without its trailing newline that
/// does not parse is a torn write and is skipped; any other bad line is an
/// error.
fn decode_lines(bytes: &[u8]) -> Result<Vec<StoredEvent>, DomainError> {
    let torn_tail = bytes.last().is_some_and(|b| *b != b'\n');
    let lines: Vec<&[u8]> = bytes.split(|b| *b == b'\n').collect();
    let last = lines.len().saturating_sub(1);

    let mut events = Vec::with_capacity(lines.len());
    for (index, line) in lines.into_iter().enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<StoredEvent>(line) {
            Ok(event) => events.push(event),
            Err(e) if torn_tail && index == last => {
                warn!(line = index + 1, error = %e, "skipping torn final record in event log");
            }
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "event log line {} is not a valid record: {e}",
                    index + 1
                )));
            }
        }
    }
    Ok(events)
}

#[async_trait]
impl EventLog for FileEventLog {
    async fn append(&self, event: &StoredEvent) -> Result<(), DomainError> {
        let line = encode_line(event)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| io_error("open", &self.path, &e))?;
        if ends_unterminated(&mut file)
            .await
            .map_err(|e| io_error("read", &self.path, &e))?
        {
            self.truncate_torn_tail().await?;
        }

        let committed_len = file
            .metadata()
            .await
            .map_err(|e| io_error("stat", &self.path, &e))?
            .len();
        if let Err(e) = write_synced(&mut file, &line, &self.path).await {
            if let Err(rollback) = file.set_len(committed_len).await {
                warn!(
                    path = %self.path.display(),
                    error = %rollback,
                    "could not roll back failed event log append"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<StoredEvent>, DomainError> {
        match fs::read(&self.path).await {
            Ok(bytes) => decode_lines(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(io_error("read", &self.path, &e)),
        }
    }
}
