//! Small filesystem helpers shared across modules.

use std::fs;
use std::io;
use std::path::Path;

/// Recursively copy `src` into `dst`, creating `dst` if needed.
/// Existing files at the destination are overwritten.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// True when the directory contains no real content. Dotfiles such as
/// `.DS_Store` do not count, and nested directories are checked
/// recursively the same way.
pub fn is_dir_effectively_empty(dir: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let file_type = entry.file_type()?;
        if !file_type.is_dir() {
            return Ok(false);
        }
        if !is_dir_effectively_empty(&entry.path())? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_nested_tree() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("inner")).expect("mkdir");
        fs::write(src.join("a.txt"), "a").expect("write");
        fs::write(src.join("inner/b.txt"), "b").expect("write");

        let dst = tmp.path().join("dst");
        copy_dir_all(&src, &dst).expect("copy");

        assert_eq!(fs::read_to_string(dst.join("a.txt")).expect("read"), "a");
        assert_eq!(
            fs::read_to_string(dst.join("inner/b.txt")).expect("read"),
            "b"
        );
    }

    #[test]
    fn dotfiles_do_not_make_a_dir_nonempty() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().join("d");
        fs::create_dir_all(dir.join("nested")).expect("mkdir");
        fs::write(dir.join(".DS_Store"), "").expect("write");
        assert!(is_dir_effectively_empty(&dir).expect("check"));

        fs::write(dir.join("nested/real.md"), "x").expect("write");
        assert!(!is_dir_effectively_empty(&dir).expect("check"));
    }
}
