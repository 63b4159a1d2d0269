//! Link-or-copy aliasing of shared resource directories.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A relative symbolic link was created.
    Linked,
    /// Symbolic links are unavailable; the target tree was copied instead.
    Copied,
    /// Something already exists at the alias path; nothing was changed.
    AlreadyPresent,
}

/// Makes `target` reachable at `alias`.
///
/// The link is relative to the alias' parent directory so the tree stays relocatable as a
/// unit. An existing alias is left untouched.
pub fn link_or_copy(target: &Path, alias: &Path) -> io::Result<LinkOutcome> {
    if fs::symlink_metadata(alias).is_ok() {
        debug!("Alias {:?} already exists, leaving it in place.", alias);
        return Ok(LinkOutcome::AlreadyPresent);
    }

    let parent = alias
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "alias has no parent"))?;
    fs::create_dir_all(parent)?;

    let relative = relative_path(&std::path::absolute(parent)?, &std::path::absolute(target)?);
    match make_symlink(&relative, alias) {
        Ok(()) => Ok(LinkOutcome::Linked),
        Err(e) => {
            warn!(
                "Could not create symbolic link {:?} -> {:?} ({}); copying instead.",
                alias, relative, e
            );
            copy_tree(target, alias)?;
            Ok(LinkOutcome::Copied)
        }
    }
}

#[cfg(unix)]
fn make_symlink(target: &Path, alias: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, alias)
}

#[cfg(windows)]
fn make_symlink(target: &Path, alias: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, alias)
}

#[cfg(not(any(unix, windows)))]
fn make_symlink(_target: &Path, _alias: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}

fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let dest = destination.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

/// Path leading from directory `from` to `to`; both must be absolute.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn relative_path_walks_up_to_common_ancestor() {
        assert_eq!(
            relative_path(Path::new("/out/run1/small"), Path::new("/out/msas")),
            PathBuf::from("../../msas")
        );
        assert_eq!(
            relative_path(Path::new("/out"), Path::new("/out/msas")),
            PathBuf::from("msas")
        );
        assert_eq!(relative_path(Path::new("/out"), Path::new("/out")), PathBuf::from("."));
    }

    #[test]
    fn link_or_copy_creates_alias_that_resolves_to_target() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("msas");
        fs::create_dir_all(&store).unwrap();
        fs::write(store.join("P1_unpaired.a3m"), ">P1\nMKV\n").unwrap();

        let alias = dir.path().join("run/small/msas");
        let outcome = link_or_copy(&store, &alias).unwrap();
        assert!(matches!(outcome, LinkOutcome::Linked | LinkOutcome::Copied));
        let content = fs::read_to_string(alias.join("P1_unpaired.a3m")).unwrap();
        assert_eq!(content, ">P1\nMKV\n");
    }

    #[test]
    fn link_or_copy_is_a_no_op_when_alias_exists() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("templates");
        fs::create_dir_all(&store).unwrap();
        let alias = dir.path().join("run/large/templates");

        link_or_copy(&store, &alias).unwrap();
        assert_eq!(link_or_copy(&store, &alias).unwrap(), LinkOutcome::AlreadyPresent);
    }

    #[cfg(unix)]
    #[test]
    fn link_is_relative_to_the_alias_directory() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("msas");
        fs::create_dir_all(&store).unwrap();
        let alias = dir.path().join("run/small/msas");

        link_or_copy(&store, &alias).unwrap();
        assert_eq!(fs::read_link(&alias).unwrap(), PathBuf::from("../../msas"));
    }
}
