#![deny(missing_docs)]

//! # Hook Pipeline
//!
//! Extension points around registry loading, every compile entrypoint and
//! every file write.
//!
//! A compile call runs `Start -> Resolve -> Success`; an error at any of the
//! three routes to `Failure`, whose return value is what the caller sees.
//! Every hook method has an identity default, so implementors override only
//! the stages they care about.

use crate::config::CompileConfig;
use crate::error::{AppError, AppResult, HookError};
use crate::ir::{EnumIr, StructIr};
use crate::registry::Registry;
use std::path::{Path, PathBuf};

/// Hooks around the compilation of one schema object `S` into output `O`.
pub trait CompileHooks<S, O> {
    /// May rewrite the config and the schema object before resolution.
    fn on_start(&self, config: CompileConfig, object: S) -> AppResult<(CompileConfig, S)> {
        Ok((config, object))
    }

    /// Receives the output by value; may transform or reject it.
    fn on_success(&self, output: O) -> AppResult<O> {
        Ok(output)
    }

    /// Receives the error and the inputs of the failing stage; may wrap or replace the error.
    fn on_failure(&self, config: &CompileConfig, object: &S, error: AppError) -> AppError {
        let _ = (config, object);
        error
    }
}

/// No-op hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<S, O> CompileHooks<S, O> for NoHooks {}

/// Hooks around writing one IR value `I` to disk.
pub trait WriteHooks<I> {
    /// May rewrite the IR before rendering.
    fn on_start(&self, ir: I) -> AppResult<I> {
        Ok(ir)
    }

    /// Receives the rendered contents after they are written.
    fn on_success(&self, ir: I, contents: String) -> AppResult<(I, String)> {
        Ok((ir, contents))
    }

    /// Receives the error and the IR as it was when the failing stage began.
    fn on_failure(&self, ir: &I, error: AppError) -> AppError {
        let _ = ir;
        error
    }
}

impl<I> WriteHooks<I> for NoHooks {}

/// Hooks around loading a registry from a schema tree.
pub trait LoadHooks {
    /// May redirect the load to another root.
    fn on_start(&self, root: PathBuf) -> AppResult<PathBuf> {
        Ok(root)
    }

    /// Receives the loaded registry by value; may extend or reject it.
    fn on_success(&self, registry: Registry) -> AppResult<Registry> {
        Ok(registry)
    }

    /// Receives the error and the root the failing stage was given.
    fn on_failure(&self, root: &Path, error: AppError) -> AppError {
        let _ = root;
        error
    }
}

impl LoadHooks for NoHooks {}

/// Runs `load` inside the load hook state machine.
pub fn run_load<H, F>(hooks: &H, root: &Path, load: F) -> AppResult<Registry>
where
    H: LoadHooks + ?Sized,
    F: FnOnce(&Path) -> AppResult<Registry>,
{
    // 1. Start
    tracing::debug!(root = %root.display(), "registry load start");
    let root_buf = match hooks.on_start(root.to_path_buf()) {
        Ok(root) => root,
        Err(err) => return Err(fail_load(hooks, root, err)),
    };

    // 2. Resolve
    let registry = match load(&root_buf) {
        Ok(registry) => registry,
        Err(err) => return Err(fail_load(hooks, &root_buf, err)),
    };

    // 3. Success
    tracing::debug!(root = %root_buf.display(), "registry load success");
    hooks
        .on_success(registry)
        .map_err(|err| fail_load(hooks, &root_buf, err))
}

fn fail_load<H: LoadHooks + ?Sized>(hooks: &H, root: &Path, err: AppError) -> AppError {
    let err = hooks.on_failure(root, err);
    tracing::warn!(root = %root.display(), error = %err, "registry load failed");
    err
}

/// Output whose emptiness can be checked after a Success hook.
pub trait HookOutput {
    /// True if the value carries nothing to emit.
    fn is_empty_output(&self) -> bool;
}

// The first element is the primary struct; identifier structs follow it.
impl HookOutput for Vec<StructIr> {
    fn is_empty_output(&self) -> bool {
        self.first().map_or(true, StructIr::is_empty_output)
    }
}

impl HookOutput for StructIr {
    fn is_empty_output(&self) -> bool {
        self.name.is_empty()
    }
}

impl HookOutput for EnumIr {
    fn is_empty_output(&self) -> bool {
        self.name.is_empty()
    }
}

/// Runs `resolve` inside the compile hook state machine.
///
/// `stage` names the object kind in logs and in `HookError::EmptyOutput`.
pub fn run_compile<S, O, H, F>(
    stage: &'static str,
    hooks: &H,
    config: &CompileConfig,
    object: &S,
    resolve: F,
) -> AppResult<O>
where
    S: Clone,
    O: HookOutput,
    H: CompileHooks<S, O> + ?Sized,
    F: FnOnce(&CompileConfig, &S) -> AppResult<O>,
{
    // 1. Start
    tracing::debug!(stage, "compile start");
    let (config, object) = match hooks.on_start(config.clone(), object.clone()) {
        Ok(started) => started,
        Err(err) => return Err(fail::<S, O, H>(stage, hooks, config, object, err)),
    };

    // 2. Resolve
    tracing::debug!(stage, "compile resolve");
    let output = match resolve(&config, &object) {
        Ok(output) => output,
        Err(err) => return Err(fail::<S, O, H>(stage, hooks, &config, &object, err)),
    };

    // 3. Success
    tracing::debug!(stage, "compile success");
    match hooks.on_success(output) {
        Ok(output) if output.is_empty_output() => {
            let err = HookError::EmptyOutput { stage }.into();
            Err(fail::<S, O, H>(stage, hooks, &config, &object, err))
        }
        Ok(output) => Ok(output),
        Err(err) => Err(fail::<S, O, H>(stage, hooks, &config, &object, err)),
    }
}

fn fail<S, O, H>(
    stage: &'static str,
    hooks: &H,
    config: &CompileConfig,
    object: &S,
    err: AppError,
) -> AppError
where
    H: CompileHooks<S, O> + ?Sized,
{
    let err = hooks.on_failure(config, object, err);
    tracing::warn!(stage, error = %err, "compile failed");
    err
}
