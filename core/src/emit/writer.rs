//! # File Writers
//!
//! Strategy seam between rendered Go source and its destination. The file
//! backed writers put one definition per `<snake_name>.go` file.

use super::render::{render_enum, render_struct};
use crate::casing::to_file_stem;
use crate::error::{AppError, AppResult, HookError};
use crate::hooks::WriteHooks;
use crate::ir::{EnumIr, StructIr};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes struct IR somewhere.
///
/// Returns the IR as the Success hook left it, with the rendered contents.
pub trait GoStructWriter {
    /// Renders and persists one struct.
    fn write_struct(&self, ir: &StructIr, hooks: &dyn WriteHooks<StructIr>) -> AppResult<(StructIr, String)>;
}

/// Writes enum IR somewhere.
///
/// Returns the IR as the Success hook left it, with the rendered contents.
pub trait GoEnumWriter {
    /// Renders and persists one enum.
    fn write_enum(&self, ir: &EnumIr, hooks: &dyn WriteHooks<EnumIr>) -> AppResult<(EnumIr, String)>;
}

/// Writes each struct to `<target_dir>/<snake_name>.go`.
#[derive(Debug, Clone)]
pub struct StructFileWriter {
    /// Output directory, created on first write.
    pub target_dir: PathBuf,
}

impl StructFileWriter {
    /// Creates a writer rooted at `target_dir`.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }
}

impl GoStructWriter for StructFileWriter {
    fn write_struct(&self, ir: &StructIr, hooks: &dyn WriteHooks<StructIr>) -> AppResult<(StructIr, String)> {
        run_write("struct", hooks, ir, |ir| {
            let contents = render_struct(ir)?;
            write_file(&self.target_dir, &ir.name, &contents)?;
            Ok(contents)
        })
    }
}

/// Writes each enum to `<target_dir>/<snake_name>.go`.
#[derive(Debug, Clone)]
pub struct EnumFileWriter {
    /// Output directory, created on first write.
    pub target_dir: PathBuf,
}

impl EnumFileWriter {
    /// Creates a writer rooted at `target_dir`.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }
}

impl GoEnumWriter for EnumFileWriter {
    fn write_enum(&self, ir: &EnumIr, hooks: &dyn WriteHooks<EnumIr>) -> AppResult<(EnumIr, String)> {
        run_write("enum", hooks, ir, |ir| {
            let contents = render_enum(ir)?;
            write_file(&self.target_dir, &ir.name, &contents)?;
            Ok(contents)
        })
    }
}

/// Path a definition named `name` is written to.
pub fn output_path(target_dir: &Path, name: &str) -> PathBuf {
    target_dir.join(format!("{}.go", to_file_stem(name)))
}

fn write_file(target_dir: &Path, name: &str, contents: &str) -> AppResult<()> {
    fs::create_dir_all(target_dir)
        .map_err(|e| AppError::from(e).context(format!("creating {}", target_dir.display())))?;
    let path = output_path(target_dir, name);
    fs::write(&path, contents)
        .map_err(|e| AppError::from(e).context(format!("writing {}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote go file");
    Ok(())
}

fn run_write<I, F>(stage: &'static str, hooks: &dyn WriteHooks<I>, ir: &I, emit: F) -> AppResult<(I, String)>
where
    I: Clone,
    F: FnOnce(&I) -> AppResult<String>,
{
    // 1. Start
    let ir = match hooks.on_start(ir.clone()) {
        Ok(ir) => ir,
        Err(err) => return Err(fail(stage, hooks, ir, err)),
    };

    // 2. Render and write
    let contents = match emit(&ir) {
        Ok(contents) => contents,
        Err(err) => return Err(fail(stage, hooks, &ir, err)),
    };

    // 3. Success
    let snapshot = ir.clone();
    match hooks.on_success(ir, contents) {
        Ok((_, contents)) if contents.is_empty() => {
            let err = HookError::EmptyOutput { stage }.into();
            Err(fail(stage, hooks, &snapshot, err))
        }
        Ok(written) => Ok(written),
        Err(err) => Err(fail(stage, hooks, &snapshot, err)),
    }
}

fn fail<I>(stage: &'static str, hooks: &dyn WriteHooks<I>, ir: &I, err: AppError) -> AppError {
    let err = hooks.on_failure(ir, err);
    tracing::warn!(stage, error = %err, "write failed");
    err
}
