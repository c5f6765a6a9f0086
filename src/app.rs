//! Application orchestrator.
//! Loads/merges config, initializes logging, validates, then runs one command
//! against an `AppFiles` built from the merged config.

use anyhow::{bail, Result};
use std::process::ExitCode;
use tracing::{debug, error};

use app_files::cli::{Args, Command, TransferArgs};
use app_files::config::{create_template_config, default_config_path, load_config, CONFIG_ENV};
use app_files::output as out;
use app_files::prelude::*;
use app_files::FsError;

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Config-file commands run before logging init
    match &args.command {
        Command::PrintConfig => {
            if let Ok(env_path) = std::env::var(CONFIG_ENV) {
                out::print_info(&format!("Using {CONFIG_ENV} (explicit): {env_path}"));
            }
            let p = default_config_path()?;
            out::print_path(&p);
            if !p.exists() {
                out::print_info("No config file exists there yet; run `init-config` to create a template.");
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::InitConfig => {
            let p = default_config_path()?;
            create_template_config(&p)?;
            out::print_success(&format!("Template config written to {}", p.display()));
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    // Guard flushes the file appender when dropped at the end of run()
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    cfg.validate()?;
    debug!(?args, "Starting app_files");

    let files = AppFiles::from_config(&cfg);
    let result = dispatch(&files, &args.command);
    if let Err(e) = &result {
        match e.downcast_ref::<FsError>() {
            Some(fe) => error!(code = fe.code(), error = %fe, "Command failed"),
            None => error!(error = ?e, "Command failed"),
        }
    }
    result
}

fn dispatch(files: &AppFiles, command: &Command) -> Result<ExitCode> {
    match command {
        Command::Resolve { dir, subpath, name } => {
            let path = files.resolve(*dir, &subpath.into(), name.as_deref())?;
            out::print_path(&path);
        }
        Command::Mkdir { dir, subpath } => {
            let path = files.try_create_directory(*dir, &subpath.into())?;
            out::print_path(&path);
        }
        Command::Rmdir { dir, subpath } => match files.try_remove_directory(*dir, &subpath.into())? {
            Removal::Removed(p) => out::print_success(&format!("Removed {}", p.display())),
            Removal::Missing(p) => out::print_info(&format!("Nothing at {}", p.display())),
        },
        Command::Exists { path } => {
            let found = files.directory_exists(path);
            out::print_user(if found { "true" } else { "false" });
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Write { dir, name, content, subpath, force } => {
            let path = if *force {
                files.try_replace_file(content.as_bytes(), *dir, name, &subpath.into())?
            } else {
                files.try_write_string_to_file(content, *dir, name, &subpath.into())?
            };
            out::print_path(&path);
        }
        Command::Copy(t) => {
            let outcome = files.try_copy_file_atomically(
                &t.name,
                &(&t.source_subpath).into(),
                &(&t.dest_subpath).into(),
                t.source_dir,
                t.dest_dir,
            )?;
            report_transfer("Copied", outcome, t);
        }
        Command::Move(t) => {
            let outcome = files.try_move_file_atomically(
                &t.name,
                &(&t.source_subpath).into(),
                &(&t.dest_subpath).into(),
                t.source_dir,
                t.dest_dir,
            )?;
            report_transfer("Moved", outcome, t);
        }
        Command::Rm { dir, name, subpath } => match files.try_remove_item(name, &subpath.into(), *dir)? {
            Removal::Removed(p) => out::print_success(&format!("Removed {}", p.display())),
            Removal::Missing(p) => out::print_info(&format!("Nothing at {}", p.display())),
        },
        Command::Demo => run_demo(files)?,
        // handled before logging init
        Command::PrintConfig | Command::InitConfig => {}
    }
    Ok(ExitCode::SUCCESS)
}

fn report_transfer(verb: &str, outcome: CopyOutcome, t: &TransferArgs) {
    match outcome {
        CopyOutcome::Copied(dest) => {
            out::print_success(&format!("{verb} {} -> {}", t.name, dest.display()));
        }
        CopyOutcome::SourceMissing(src) => {
            out::print_warn(&format!("Source {} does not exist; nothing done", src.display()));
        }
    }
}

/// Create the app-support root, write a file under a/b, move it up to a.
fn run_demo(files: &AppFiles) -> Result<()> {
    let dir = LogicalDirectory::AppSupport;
    if !files.create_directory(dir, "") {
        bail!("could not create the {dir} root");
    }
    let created = files.write_string_to_file("TestText to be written 2", dir, "test.txt", "a/b");
    out::print_info(&format!("write a/b/test.txt: {created}"));

    files.move_file_atomically("test.txt", "a/b", "a", dir, dir);
    let moved = files.resolve(dir, &"a".into(), Some("test.txt"))?;
    if files.file_exists(&moved) {
        out::print_success(&format!("test.txt now at {}", moved.display()));
    } else {
        out::print_warn("test.txt was not moved");
    }
    Ok(())
}
