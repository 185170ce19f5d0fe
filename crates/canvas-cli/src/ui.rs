//! Terminal output for the canvas CLI.
//!
//! Every status line starts with a colored marker; the marker and its color
//! come from [`Tone`].

use std::time::Duration;

use console::{style, Color};
use indicatif::{ProgressBar, ProgressStyle};

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Failure,
    Warning,
    Info,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Tone::Success => "\u{2713}", // ✓
            Tone::Failure => "\u{2717}", // ✗
            Tone::Warning => "!",
            Tone::Info => "\u{203A}", // ›
        }
    }

    fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Failure => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Info => Color::Cyan,
        }
    }
}

fn line(tone: Tone, msg: &str) {
    println!("  {} {}", style(tone.marker()).fg(tone.color()).bold(), msg);
}

pub fn success(msg: &str) {
    line(Tone::Success, msg);
}

pub fn error(msg: &str) {
    line(Tone::Failure, &style(msg).fg(Tone::Failure.color()).to_string());
}

/// Prints a non-fatal validation finding.
pub fn warning(msg: &str) {
    line(Tone::Warning, &style(msg).fg(Tone::Warning.color()).to_string());
}

pub fn info(msg: &str) {
    line(Tone::Info, msg);
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).dim());
}

pub fn check_passed() {
    line(Tone::Success, &style("Project is valid.").bold().to_string());
}

pub fn check_failed() {
    println!();
    line(Tone::Failure, &style("Project is invalid.").fg(Tone::Failure.color()).bold().to_string());
    println!();
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints one generated file, its artifact kind and its size.
pub fn artifact_line(file_name: &str, kind: &str, bytes: usize) {
    println!(
        "    {:12} {:9} {}",
        style(file_name).bold(),
        kind,
        style(human_bytes(bytes)).dim()
    );
}

/// Prints `2 components, 1 route, 1 table`.
pub fn summary_line(components: usize, routes: usize, tables: usize) {
    println!("    {}", summary(components, routes, tables));
}

/// Prints numbered shell commands for the user to run next.
pub fn next_steps(commands: &[String]) {
    println!();
    println!("  {}", style("Next:").bold());
    for (i, command) in commands.iter().enumerate() {
        println!("    {}. {}", i + 1, style(command).fg(Tone::Info.color()));
    }
    println!();
}

fn summary(components: usize, routes: usize, tables: usize) -> String {
    format!(
        "{}, {}, {}",
        plural(components, "component"),
        plural(routes, "route"),
        plural(tables, "table")
    )
}

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn human_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}
