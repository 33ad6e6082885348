//! Best-effort viewer launch.
//!
//! Opening the artifact is a side effect separate from the render outcome:
//! a failure here is logged and never reported to the caller.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

/// Open the rendered artifact in the platform's default image viewer.
pub fn open_artifact(path: &Path) {
    let mut cmd = open_command(path);
    cmd.stdout(Stdio::null()).stderr(Stdio::null());

    match cmd.spawn() {
        Ok(_) => debug!(path = %path.display(), "Launched viewer"),
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to launch viewer"),
    }
}

#[cfg(target_os = "macos")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
