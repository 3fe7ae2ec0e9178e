use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Changes the process working directory for as long as the guard lives.
///
/// The previous directory is restored on drop, which includes early
/// returns and unwinding.
pub struct ScopedWorkingDir {
    previous: PathBuf,
}

impl ScopedWorkingDir {
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        log::debug!("Entered {} (was {})", dir.display(), previous.display());
        Ok(Self { previous })
    }
}

impl Drop for ScopedWorkingDir {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            log::warn!(
                "Failed to restore working directory {}: {e}",
                self.previous.display()
            );
        }
    }
}

/// Serializes tests that change the process-wide working directory.
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
