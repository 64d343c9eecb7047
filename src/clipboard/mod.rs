use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long the "copied" flag stays up after a successful copy.
pub const COPIED_FLAG_DURATION: Duration = Duration::from_secs(2);

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Pipes text into the first clipboard helper found on `PATH`.
pub struct SystemClipboard;

const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let (program, args) = CANDIDATES
            .iter()
            .find_map(|(name, args)| which::which(name).ok().map(|p| (p, *args)))
            .context("no clipboard command found (tried pbcopy, wl-copy, xclip, xsel, clip)")?;

        debug!(program = %program.display(), "copying to clipboard");
        pipe_to(&program, args, text)
    }
}

/// Writes `text` to the program's stdin and waits for it to exit.
///
/// Only the exit status is awaited: xclip and wl-copy leave a forked child
/// serving the selection, which would hold any inherited pipe open.
fn pipe_to(program: &Path, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn {}", program.display()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        bail!("{} exited with {}", program.display(), status);
    }
    Ok(())
}

/// Transient "copied" indicator that clears itself after a fixed delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyState {
    copied_at: Option<Instant>,
}

impl CopyState {
    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.copied_at = None;
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPIED_FLAG_DURATION)
    }
}
