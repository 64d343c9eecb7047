use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crate::changes::EditChanges;
use crate::format::EditBuffer;
use crate::options::{GenerationOptions, OPTION_KEYS};
use crate::sections::{Section, SectionKind};
use crate::session::Session;

pub fn show_sections(sections: &[Section], changes: &EditChanges) {
    println!("\n=== SECTIONS ===");
    if sections.is_empty() {
        println!("(empty document)");
        return;
    }
    for (i, s) in sections.iter().enumerate() {
        let kind = match s.kind {
            SectionKind::Title => "[TITLE]".green().bold(),
            SectionKind::Section => "[SECTION]".cyan().bold(),
            SectionKind::Intro => "[INTRO]".magenta().bold(),
        };
        let mut marks = Vec::new();
        if changes.is_removed(s.id) {
            marks.push("removed".red().bold().to_string());
        }
        if changes.is_centered(s.id) {
            marks.push("centered".yellow().to_string());
        }
        if changes.text_edit(s.id).is_some() {
            marks.push("edited".yellow().to_string());
        }
        if changes.badge_config(s.id).is_some_and(|c| c.enabled) {
            marks.push("badges".blue().to_string());
        }
        if changes.animation_config(s.id).is_some_and(|c| c.enabled) {
            marks.push("animated".blue().to_string());
        }
        let title = if changes.is_removed(s.id) {
            s.title.strikethrough().dimmed().to_string()
        } else {
            s.title.bold().to_string()
        };
        let suffix = if marks.is_empty() {
            String::new()
        } else {
            format!("  ({})", marks.join(", "))
        };
        println!("{:>3}. {} {} {}{}", i + 1, kind, title, format!("line {}", s.start_line + 1).dimmed(), suffix);
    }
    println!();
}

pub fn print_raw(markdown: &str) {
    println!("\n{}", "┏━━━━━━━━━━━━━━━━━━━━━━━━ README.md ━━━━━━━━━━━━━━━━━━━━━━━━┓".bold());
    println!("{}", markdown);
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}

/// Prints the buffer with the byte offset of each line start, for `select`.
pub fn print_buffer(buf: &EditBuffer) {
    let mut offset = 0usize;
    for line in buf.text().split('\n') {
        println!("{} {}", format!("{offset:>5}|").dimmed(), line);
        offset += line.len() + 1;
    }
    println!("{} {}", "cursor".dimmed(), buf.cursor());
    if let Some(sel) = buf.selection() {
        println!(
            "{} [{}, {}) {:?}",
            "selection".yellow().bold(),
            sel.start,
            sel.end,
            buf.selected_text().unwrap_or_default()
        );
    }
}

pub fn print_status(session: &Session, now: Instant) {
    let opts = session.options();
    println!("\n=== STATUS ===");
    println!("plan: {} bytes", session.plan().len());
    println!(
        "options: badges={} ({}{}) toc={} center={} animated_title={} emoji={:?}",
        opts.include_badges,
        opts.badge_style,
        if opts.separate_badges { ", separate" } else { "" },
        opts.include_table_of_contents,
        opts.center_content,
        opts.animated_title,
        opts.emoji_style,
    );
    match session.document() {
        Some(doc) => println!(
            "document: revision {} generated {} ({} sections)",
            doc.revision,
            doc.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            doc.sections().len()
        ),
        None => println!("document: (none)"),
    }
    if session.is_copied(now) {
        println!("{}", "copied!".green().bold());
    }
    if let Some(err) = session.last_error() {
        println!("{} {}", "last error:".red(), err);
    }
    println!();
}

pub fn print_options(opts: &GenerationOptions) {
    println!("\n=== OPTIONS ===");
    match toml::to_string(opts) {
        Ok(table) => print!("{table}"),
        Err(e) => print_error(&e.to_string()),
    }
    println!("{} {}", "set KEY VALUE with KEY one of:".dimmed(), OPTION_KEYS.join(", "));
    println!();
}

pub fn print_changes(instructions: &str) {
    println!("\n=== PENDING CHANGES ===");
    if instructions.is_empty() {
        println!("(none)");
    } else {
        println!("{}", instructions);
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn print_ok(message: &str) {
    println!("{} {}", "ok:".green().bold(), message);
}

/// Reads one line after printing `prompt`. `None` on end of input.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{} ", prompt.bold());
    io::stdout().flush()?;
    let mut s = String::new();
    if io::stdin().lock().read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim_end_matches(['\n', '\r']).to_string()))
}

/// Reads lines until one holding only `.` (or end of input).
pub fn read_block() -> io::Result<String> {
    println!("{}", "(end with a line containing only '.')".dimmed());
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line == "." {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

pub fn confirm(prompt: &str) -> bool {
    match read_line(&format!("{} [y/N]:", prompt)) {
        Ok(Some(ans)) => {
            let ans = ans.trim().to_lowercase();
            ans == "y" || ans == "yes"
        }
        _ => false,
    }
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
