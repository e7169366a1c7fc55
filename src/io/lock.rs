use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Name of the lock file inside the data directory
pub const LOCK_FILE: &str = ".lock";

/// How long writers wait for a busy board
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock on a board's data directory.
///
/// The TUI and any number of CLI invocations may point at the same
/// `.syncrotask/`; every read-modify-write of a blob happens while holding
/// one. The lock file itself is permanent: every process locks the same
/// inode, and releasing only drops the `flock`.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("board is busy: another syncrotask process holds {path}")]
    Timeout { path: PathBuf },
}

impl StoreLock {
    /// Lock the data directory, retrying until `timeout` runs out.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = data_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::CreateError {
                path: path.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        loop {
            if flock(&file, Op::TryExclusive) {
                return Ok(StoreLock { file });
            }
            if Instant::now() >= deadline {
                tracing::warn!(path = %path.display(), "timed out waiting for board lock");
                return Err(LockError::Timeout { path });
            }
            std::thread::sleep(RETRY_INTERVAL);
        }
    }

    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, DEFAULT_TIMEOUT)
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        flock(&self.file, Op::Unlock);
    }
}

enum Op {
    TryExclusive,
    Unlock,
}

#[cfg(unix)]
fn flock(file: &File, op: Op) -> bool {
    use std::os::unix::io::AsRawFd;
    let flags = match op {
        Op::TryExclusive => libc::LOCK_EX | libc::LOCK_NB,
        Op::Unlock => libc::LOCK_UN,
    };
    unsafe { libc::flock(file.as_raw_fd(), flags) == 0 }
}

#[cfg(not(unix))]
fn flock(_file: &File, _op: Op) -> bool {
    true
}
