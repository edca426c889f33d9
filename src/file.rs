// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::config::consts::{FINAL_EXT, RAW_SUFFIX, TEMP_SUFFIX};
use crate::core::sanitize::normalize_task_name;
use crate::period::PeriodTag;

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// `{period}_{normalized name}` lowercased; shared by the raw and final artifact.
pub fn artifact_stem(period: &PeriodTag, task_name: &str) -> String {
    join!(period.as_str(), "_", &normalize_task_name(task_name)).to_lowercase()
}

/// `<dir>/{period}_{name}.xlsx`
pub fn final_path(dir: &Path, period: &PeriodTag, task_name: &str) -> PathBuf {
    dir.join(join!(artifact_stem(period, task_name), ".", FINAL_EXT))
}

/// Raw export renamed next to the final artifact: same stem, raw suffix.
pub fn intermediate_path(final_path: &Path) -> PathBuf {
    with_suffix(&final_path.with_extension(""), RAW_SUFFIX)
}

/// Where the workbook is written before it is renamed into place.
pub fn staging_path(final_path: &Path) -> PathBuf {
    with_suffix(final_path, TEMP_SUFFIX)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Remove a file; `Ok(false)` when there was nothing to remove.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Names of the regular files directly under `dir`. Non-UTF-8 names are skipped.
pub fn list_file_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() { continue; }
        if let Some(name) = entry.file_name().to_str() {
            out.push(s!(name));
        }
    }
    Ok(out)
}

/// ASCII case-insensitive `ends_with`.
pub fn has_suffix_ci(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
