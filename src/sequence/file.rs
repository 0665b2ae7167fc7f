//! File-backed sequence counters.
//!
//! Each counter is a small JSON document `<name>.json` next to a `<name>.lock`
//! file. An increment takes an exclusive OS lock on the lock file, reads the
//! counter, writes the advanced value to a temp file, fsyncs it, renames it
//! over the counter document and fsyncs the directory before unlocking. The OS
//! lock is what serialises writers, including writers in other processes that
//! share the data directory.

use super::{validate_sequence_name, SequenceCounter, SequenceError, SequenceStore};
use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// Sequence store persisting counters as lock-protected files in a directory.
pub struct FileSequenceStore {
    dir: PathBuf,
    timeout: Duration,
    /// Keeps this process from parking a blocking thread per waiter on the
    /// OS lock. Not relied on for correctness.
    local: Mutex<()>,
}

/// Pause between attempts to take a contended counter lock.
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(5);

impl FileSequenceStore {
    /// Default upper bound on a single increment, including lock waits.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Open (creating if needed) the counter directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, SequenceError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            timeout: Self::DEFAULT_TIMEOUT,
            local: Mutex::new(()),
        })
    }

    /// Override how long an increment may take before failing.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn timed_out(&self, name: &str) -> SequenceError {
        let millis = self.timeout.as_millis();
        error!(sequence = name, timeout_ms = %millis, "Timed out advancing sequence");
        SequenceError::unavailable(format!(
            "timed out after {millis}ms waiting for sequence '{name}'"
        ))
    }
}

fn counter_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

fn lock_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.lock"))
}

fn read_counter(dir: &Path, name: &str) -> Result<Option<SequenceCounter>, SequenceError> {
    match fs::read_to_string(counter_path(dir, name)) {
        Ok(content) => {
            let counter: SequenceCounter = serde_json::from_str(&content).map_err(|e| {
                SequenceError::unavailable(format!("counter '{name}' is unreadable: {e}"))
            })?;
            Ok(Some(counter))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn commit_counter(dir: &Path, counter: &SequenceCounter) -> Result<(), SequenceError> {
    let content = serde_json::to_string_pretty(counter)
        .map_err(|e| SequenceError::unavailable(format!("failed to encode counter: {e}")))?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file
        .persist(counter_path(dir, &counter.name))
        .map_err(|e| e.error)?;
    sync_dir(dir)?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Take the exclusive lock on `lock_file`, giving up at `deadline`.
///
/// Returns `false` if another holder kept the lock past the deadline.
fn lock_before(lock_file: &File, deadline: Instant) -> io::Result<bool> {
    let contended = fs2::lock_contended_error().raw_os_error();
    loop {
        match FileExt::try_lock_exclusive(lock_file) {
            Ok(()) => return Ok(true),
            Err(e) if e.raw_os_error() == contended => {}
            Err(e) => return Err(e),
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }
        std::thread::sleep(remaining.min(LOCK_RETRY_INTERVAL));
    }
}

/// Advance `name` while holding the counter's exclusive file lock.
///
/// `Ok(None)` means the lock was not acquired before `deadline`; the counter
/// was not read or written.
fn increment_locked(
    dir: &Path,
    name: &str,
    deadline: Instant,
) -> Result<Option<u64>, SequenceError> {
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path(dir, name))?;
    if !lock_before(&lock_file, deadline)? {
        return Ok(None);
    }

    let result = read_counter(dir, name).and_then(|current| {
        let next = current
            .unwrap_or_else(|| SequenceCounter::new(name))
            .advanced()?;
        commit_counter(dir, &next)?;
        Ok(Some(next.value))
    });

    if let Err(e) = FileExt::unlock(&lock_file) {
        // Dropping the descriptor releases the lock anyway
        warn!(sequence = name, "Failed to unlock counter: {e}");
    }
    result
}

#[async_trait]
impl SequenceStore for FileSequenceStore {
    async fn next_value(&self, name: &str) -> Result<u64, SequenceError> {
        validate_sequence_name(name)?;
        let deadline = Instant::now()
            .checked_add(self.timeout)
            .ok_or_else(|| SequenceError::unavailable("sequence timeout is out of range"))?;

        let Ok(_guard) = tokio::time::timeout_at(deadline.into(), self.local.lock()).await else {
            return Err(self.timed_out(name));
        };

        let dir = self.dir.clone();
        let owned_name = name.to_string();
        // Not cancelled once the OS lock is held; timeouts come from `lock_before`
        let task = move || increment_locked(&dir, &owned_name, deadline);
        let outcome = tokio::task::spawn_blocking(task)
            .await
            .map_err(|e| SequenceError::unavailable(format!("counter task failed: {e}")))
            .and_then(|result| result);

        match outcome {
            Ok(Some(value)) => {
                debug!(sequence = name, value, "Issued sequence value");
                Ok(value)
            }
            Ok(None) => Err(self.timed_out(name)),
            Err(e) => {
                error!(sequence = name, "Failed to advance sequence: {e}");
                Err(e)
            }
        }
    }

    async fn current_value(&self, name: &str) -> Result<Option<u64>, SequenceError> {
        validate_sequence_name(name)?;
        let dir = self.dir.clone();
        let owned_name = name.to_string();

        let counter = tokio::task::spawn_blocking(move || read_counter(&dir, &owned_name))
            .await
            .map_err(|e| SequenceError::unavailable(format!("counter task failed: {e}")))??;
        Ok(counter.map(|c| c.value))
    }
}
