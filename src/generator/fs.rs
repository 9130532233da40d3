//! Filesystem capability used by the generator.
//!
//! The generator goes through [`ScaffoldFs`] for every read and write so
//! tests can substitute a recording or in-memory fake. [`DiskFs`] is the real
//! implementation. Any failing operation aborts the whole run; there is no
//! rollback of files already written.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Filesystem operations the scaffolder needs.
pub trait ScaffoldFs {
    /// Copy a single file, creating parent directories of `dest` as needed.
    fn copy_file(&mut self, src: &Path, dest: &Path) -> Result<()>;

    /// Recursively copy a directory tree. Symlinks are skipped.
    fn copy_dir(&mut self, src: &Path, dest: &Path) -> Result<()>;

    /// Read a template file into a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write a file, creating parent directories as needed.
    fn write_file(&mut self, dest: &Path, contents: &str) -> Result<()>;
}

/// [`ScaffoldFs`] backed by the real filesystem.
pub struct DiskFs;

impl ScaffoldFs for DiskFs {
    fn copy_file(&mut self, src: &Path, dest: &Path) -> Result<()> {
        ensure_parent(dest)?;
        fs::copy(src, dest)
            .with_context(|| format!("Failed to copy {:?} to {:?}", src, dest))?;
        Ok(())
    }

    fn copy_dir(&mut self, src: &Path, dest: &Path) -> Result<()> {
        if !src.is_dir() {
            bail!("Template directory does not exist: {:?}", src);
        }
        copy_dir_recursive(src, dest)
            .with_context(|| format!("Failed to copy {:?} to {:?}", src, dest))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read template {:?}", path))
    }

    fn write_file(&mut self, dest: &Path, contents: &str) -> Result<()> {
        ensure_parent(dest)?;
        fs::write(dest, contents).with_context(|| format!("Failed to write {:?}", dest))
    }
}

fn ensure_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    Ok(())
}

/// Recursively copy a directory and all its contents.
fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&source_path, &target_path)?;
        } else if file_type.is_file() {
            fs::copy(&source_path, &target_path)?;
        }
        // Skip symlinks and other file types
    }

    Ok(())
}
