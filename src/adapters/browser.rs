use anyhow::{Context, Result};
use std::io;
use std::process::{Command, ExitStatus};
use std::thread::JoinHandle;

/// Open `url` in the user's default browser without waiting for it.
pub fn open_url(url: &str) -> Result<()> {
    spawn_reaped(launcher(url)).with_context(|| format!("Failed to open browser at {url}"))?;
    Ok(())
}

/// Spawn `cmd` and reap it from a detached thread.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd.spawn()?;
    Ok(std::thread::spawn(move || child.wait()))
}

#[cfg(target_os = "macos")]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    // empty title, otherwise `start` treats a quoted url as the window title
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
