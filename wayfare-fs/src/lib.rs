//! Filesystem helpers for the Wayfare CLI, built on `cap-std` and `camino`.
//!
//! Catalog files are read and output files written through capability
//! handles on their parent directory rather than through bare paths.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};
use std::path::Component;

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 text file, such as a catalog document.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Return whether a path exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Write `contents` to `path`, creating missing parent directories and
/// replacing any existing file.
pub fn write_utf8_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.write(name.as_str(), contents)
}

/// Open the parent directory of `path` and return it with the file name.
fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists.
fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Split a parent path into an ambient base directory and a relative suffix.
fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative_utf8 = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;

    Ok((dir, relative_utf8))
}
