//! Crash- and reader-safe file updates for the JSON stores.
//!
//! Writers go through [`atomic_write`]: content lands in a temp file next to
//! the target and is renamed over it, so readers see the old file or the new
//! one, never a truncated one. Read-modify-write cycles additionally hold a
//! [`DirLock`], a `<file>.lock` directory whose creation is the atomic
//! acquire step.

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{Result, ScopeError};

/// How long [`DirLock::acquire`] waits before giving up.
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A lock directory older than this is assumed to belong to a dead writer.
const LOCK_STALE_AFTER: Duration = Duration::from_secs(30);

const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(2);

/// Replaces `path` with `contents` via temp file + rename.
pub(crate) fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| ScopeError::io(format!("creating temp file in {}", dir.display()), e))?;

    tmp.write_all(contents.as_bytes())
        .map_err(|e| ScopeError::io(format!("writing temp file for {}", path.display()), e))?;

    tmp.flush()
        .map_err(|e| ScopeError::io(format!("flushing temp file for {}", path.display()), e))?;

    tmp.persist(path).map_err(|e| {
        ScopeError::io(format!("persisting temp file to {}", path.display()), e.error)
    })?;

    Ok(())
}

/// Exclusive lock on a file, held until dropped.
#[derive(Debug)]
pub(crate) struct DirLock {
    dir: PathBuf,
}

impl DirLock {
    /// Blocks until the lock for `target` is free, taking over stale locks.
    pub(crate) fn acquire(target: &Path) -> Result<Self> {
        let dir = lock_dir_for(target);
        let started = Instant::now();

        loop {
            match fs_err::create_dir(&dir) {
                Ok(()) => return Ok(Self { dir }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if is_stale(&dir) {
                        warn!(lock = %dir.display(), "Removing stale lock");
                        let _ = fs_err::remove_dir(&dir);
                        continue;
                    }
                    if started.elapsed() >= LOCK_TIMEOUT {
                        return Err(ScopeError::LockTimeout { path: dir });
                    }
                    thread::sleep(LOCK_RETRY_INTERVAL);
                }
                Err(e) => return Err(ScopeError::io("creating lock directory", e)),
            }
        }
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        if let Err(e) = fs_err::remove_dir(&self.dir) {
            warn!(error = %e, "Failed to release lock");
        }
    }
}

fn lock_dir_for(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

fn is_stale(dir: &Path) -> bool {
    fs_err::metadata(dir)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age > LOCK_STALE_AFTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("map.json");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs_err::read_to_string(&path).unwrap(), "second");
        let leftovers = fs_err::read_dir(temp.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_lock_released_on_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("map.json");

        let lock = DirLock::acquire(&path).unwrap();
        assert!(lock_dir_for(&path).is_dir());
        drop(lock);
        assert!(!lock_dir_for(&path).exists());

        let _again = DirLock::acquire(&path).unwrap();
    }

    #[test]
    fn test_lock_excludes_other_holders() {
        let temp = TempDir::new().unwrap();
        let path = Arc::new(temp.path().join("counter"));
        let inside = Arc::new(AtomicUsize::new(0));
        let overlaps = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let (path, inside, overlaps) = (path.clone(), inside.clone(), overlaps.clone());
                thread::spawn(move || {
                    for _ in 0..25 {
                        let _lock = DirLock::acquire(&path).unwrap();
                        if inside.fetch_add(1, Ordering::SeqCst) != 0 {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        thread::sleep(Duration::from_micros(50));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }
}
