//! Process-wide working-directory switching for `ScopeMode::ProcessCwd`.
//!
//! The cwd is shared by every thread, so guarded sections are serialized by one
//! process-wide lock and the saved directory lives only as long as the guard.

use std::env;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use parking_lot::{Mutex, MutexGuard};

static CWD_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Holds the process inside `dir` until dropped, then returns to where it was.
pub struct CwdGuard {
    saved: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub fn enter(dir: &Path) -> std::io::Result<Self> {
        let lock = CWD_LOCK.lock();
        let saved = env::current_dir()?;
        env::set_current_dir(dir)?;
        debug!("gitshim-git: cwd {} -> {}", saved.display(), dir.display());
        Ok(Self { saved, _lock: lock })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // Runs before `_lock` is released.
        if let Err(e) = env::set_current_dir(&self.saved) {
            warn!("gitshim-git: failed to restore cwd {}: {e}", self.saved.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn restores_on_drop() {
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        {
            let _g = CwdGuard::enter(dir.path()).unwrap();
            assert_eq!(
                env::current_dir().unwrap().canonicalize().unwrap(),
                dir.path().canonicalize().unwrap()
            );
        }
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn missing_dir_leaves_cwd_alone() {
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(CwdGuard::enter(&dir.path().join("nope")).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
        // The lock must have been released on the error path.
        drop(CwdGuard::enter(dir.path()).unwrap());
    }
}
