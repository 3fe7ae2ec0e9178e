use std::io;
use std::path::Path;

use tempfile::{Builder, TempPath};

/// Reserves a fresh, empty file in the directory `target` will live in.
///
/// The name is generated and created exclusively, so it never refers to
/// a file that already exists (in particular, never to the input being
/// read). Dropping the returned path deletes the file; [`commit`] moves
/// it onto `target`.
pub fn scratch_file_for(target: &Path) -> io::Result<TempPath> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Builder::new()
        .prefix(".vaporwave-")
        .suffix(".part")
        .tempfile_in(dir)
        .map(|file| file.into_temp_path())
}

/// Atomically replaces `target` with the finished scratch file.
pub fn commit(scratch: TempPath, target: &Path) -> io::Result<()> {
    scratch.persist(target).map_err(|e| e.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scratch_is_new_file_next_to_target() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("take.part");
        fs::write(&input, b"user audio").unwrap();
        let target = tmp.path().join("take.mp3");

        let scratch = scratch_file_for(&target).unwrap();

        assert_eq!(scratch.parent(), Some(tmp.path()));
        assert_ne!(scratch.to_path_buf(), input);
        assert_eq!(fs::read(&input).unwrap(), b"user audio");
    }

    #[test]
    fn test_dropped_scratch_is_removed() {
        let tmp = TempDir::new().unwrap();
        let scratch = scratch_file_for(&tmp.path().join("out.mp3")).unwrap();
        let path = scratch.to_path_buf();
        assert!(path.exists());

        drop(scratch);

        assert!(!path.exists());
    }

    #[test]
    fn test_commit_moves_onto_target() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("out.mp3");
        let scratch = scratch_file_for(&target).unwrap();
        fs::write(&scratch, b"encoded").unwrap();

        commit(scratch, &target).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"encoded");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
