//! Capability-based file helpers for reading catalogs and writing results.
//!
//! All access goes through `cap-std` directory handles opened with ambient
//! authority at the edge of the program. Paths are `camino` UTF-8 paths.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the underlying I/O error, e.g. [`io::ErrorKind::NotFound`].
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
/// Returns [`io::ErrorKind::NotFound`] when the path or its parent directory
/// does not exist, and any other error raised while inspecting it.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates failures opening the nearest existing ancestor or creating
/// directories beneath it.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_at_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Write `contents` to `path`, creating parent directories and replacing
/// any existing file.
///
/// # Errors
/// Propagates directory creation and write failures.
pub fn write_utf8_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.write(name.as_str(), contents)
}

/// Open the directory containing `path` and return it with the file name.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an ambient root handle and the path relative to it.
///
/// Absolute paths resolve against their root (or Windows prefix); relative
/// paths against the current directory.
fn split_at_root(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let (root, relative) = root_and_relative(dir);
    let base = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    Ok((base, relative))
}

/// Leading `..` components belong to the root: cap-std will not climb out
/// of a base directory.
fn root_and_relative(dir: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut root = Utf8PathBuf::from(".");
    let mut relative = Utf8PathBuf::new();
    let mut leading = true;
    for component in dir.components() {
        match component {
            Utf8Component::Prefix(prefix) => root = Utf8PathBuf::from(prefix.as_str()),
            Utf8Component::RootDir => root.push(std::path::MAIN_SEPARATOR_STR),
            Utf8Component::ParentDir if leading => root.push(".."),
            Utf8Component::CurDir => {}
            other => {
                leading = false;
                relative.push(other);
            }
        }
    }
    (root, relative)
}
