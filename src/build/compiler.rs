//! Compiler invocation.
//!
//! Builds the GNU toolchain command line for a target, spawns the compiler
//! with diagnostics streaming straight through, and signals success purely by
//! returning the produced binary path. Compiler failure is a `None`, not an
//! error; only launch/IO failures become `Err`.

use crate::config::presets::{DEFAULT_BINARY_NAME, GPP_ARGS, SANITIZER_ARGS};
use crate::config::types::{BuildOptions, Result, SolveboxError, Target};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Compile a target's sources inside `directory`.
///
/// Glob patterns are expanded in target order and concatenated without
/// deduplication; overlapping patterns are the caller's convention to avoid.
/// Returns `Ok(None)` when no sources match or the compiler exits nonzero.
pub fn compile(directory: &Path, target: &Target, options: &BuildOptions) -> Result<Option<PathBuf>> {
    if options.verbose {
        log::info!("selected target: {}", target.name);
    }

    // gcc (and clang) accept C and assembly sources in one invocation.
    let sources = expand_sources(directory, &target.files)?;

    if sources.is_empty() {
        log::warn!("no source files found in {}", directory.display());
        return Ok(None);
    }

    log::info!("compiling {} source file(s)", sources.len());

    let compiler_args = target_compiler_args(target, &sources);
    let linker_args: Vec<String> = target.libs.iter().map(|lib| format!("-l{}", lib)).collect();
    let binary = compile_gnu(
        directory,
        &sources,
        options,
        &compiler_args,
        &linker_args,
        target.out.as_deref(),
    )?;

    match &binary {
        Some(path) => {
            let shown = path.strip_prefix(directory).unwrap_or(path);
            log::info!("successfully compiled binary {}", shown.display());
        }
        None => log::error!("compilation failed"),
    }

    Ok(binary)
}

/// Compile C++ sources with the fixed GNU++17 command.
pub fn compile_cpp(workdir: &Path, files: &[PathBuf], options: &BuildOptions) -> Result<Option<PathBuf>> {
    let compiler_args: Vec<String> = GPP_ARGS.iter().map(|s| s.to_string()).collect();
    compile_gnu(workdir, files, options, &compiler_args, &[], None)
}

/// Spawn one GNU compile and classify it by exit code.
///
/// Diagnostics are not captured; the compiler writes to the invoking
/// process's streams directly.
pub fn compile_gnu(
    workdir: &Path,
    files: &[PathBuf],
    options: &BuildOptions,
    compiler_args: &[String],
    linker_args: &[String],
    out_file: Option<&str>,
) -> Result<Option<PathBuf>> {
    let command = assemble_gnu_command(workdir, files, options, compiler_args, linker_args, out_file)?;
    let (program, args) = command
        .split_first()
        .ok_or_else(|| SolveboxError::Config("empty compiler command".to_string()))?;

    if options.verbose {
        log::info!("executing {:?}", command);
    }

    let status = Command::new(program).args(args).current_dir(workdir).status()?;

    if !status.success() {
        return Ok(None);
    }

    Ok(Some(workdir.join(out_file.unwrap_or(DEFAULT_BINARY_NAME))))
}

/// Expand the target's glob patterns against `directory`, keeping pattern
/// order and per-pattern match order.
///
/// Glob matching is str-based, so the working directory path must be UTF-8;
/// non-UTF-8 bytes in it would be replaced before matching.
fn expand_sources(directory: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for pattern in patterns {
        let full = directory.join(pattern);
        for entry in glob::glob(&full.to_string_lossy())? {
            sources.push(entry?);
        }
    }
    Ok(sources)
}

/// Base compiler argument list for a target, with the 32-bit assembly compat
/// flag appended when any source is a `.s` file and the target is not 64-bit.
fn target_compiler_args(target: &Target, files: &[PathBuf]) -> Vec<String> {
    let mut args = Vec::with_capacity(1 + target.flags.len() + 1);
    args.push(target.compiler.clone());
    args.extend(target.flags.iter().cloned());
    if !target.asm64bit && files.iter().any(|f| is_asm_source(f)) {
        args.push("-m32".to_string());
    }
    args
}

fn is_asm_source(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("s"))
}

/// Assemble the full compiler command. Order is significant: base args,
/// sanitizer args, output flag, source paths, linker args.
fn assemble_gnu_command(
    workdir: &Path,
    files: &[PathBuf],
    options: &BuildOptions,
    compiler_args: &[String],
    linker_args: &[String],
    out_file: Option<&str>,
) -> Result<Vec<OsString>> {
    let mut command: Vec<OsString> = compiler_args.iter().map(OsString::from).collect();

    if options.sanitizer {
        command.extend(SANITIZER_ARGS.iter().map(OsString::from));
    }

    if let Some(out) = out_file {
        command.push(OsString::from("-o"));
        command.push(std::path::absolute(workdir.join(out))?.into_os_string());
    }

    for file in files {
        command.push(std::path::absolute(file)?.into_os_string());
    }

    command.extend(linker_args.iter().map(OsString::from));

    Ok(command)
}
