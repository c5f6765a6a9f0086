//! User-facing console lines.
//! Colored prefixes only when the target stream (stdout or stderr) is a TTY;
//! plain text otherwise so scripts can parse the output.

use owo_colors::OwoColorize;
use std::path::Path;

fn is_tty(stream: atty::Stream) -> bool {
    atty::is(stream)
}

#[derive(Clone, Copy)]
enum Tag {
    Info,
    Warn,
    Error,
    Ok,
}

// Warnings and errors share stderr with the log output.
fn stream_for(tag: Tag) -> atty::Stream {
    match tag {
        Tag::Warn | Tag::Error => atty::Stream::Stderr,
        Tag::Info | Tag::Ok => atty::Stream::Stdout,
    }
}

fn emit(tag: Tag, msg: &str) {
    let plain = match tag {
        Tag::Info => "info:",
        Tag::Warn => "warn:",
        Tag::Error => "error:",
        Tag::Ok => "ok:",
    };
    let stream = stream_for(tag);
    let line = if is_tty(stream) {
        let colored = match tag {
            Tag::Info => plain.cyan().bold().to_string(),
            Tag::Warn => plain.yellow().bold().to_string(),
            Tag::Error => plain.red().bold().to_string(),
            Tag::Ok => plain.green().bold().to_string(),
        };
        format!("{colored} {msg}")
    } else {
        format!("{plain} {msg}")
    };
    if matches!(stream, atty::Stream::Stderr) {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tag::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tag::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tag::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tag::Ok, msg);
}

/// Print a plain line (no prefix). Primary outputs such as resolved paths go
/// here so users can script against them.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Plain path line, without Windows verbatim prefixes.
pub fn print_path(path: &Path) {
    print_user(&dunce::simplified(path).display().to_string());
}
