//! System browser launcher
//!
//! Fire-and-forget: the search intent hands a fully-formed URL to the
//! platform opener and never waits for the browser.

use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Open a URL in the default system browser
///
/// # Errors
///
/// Returns error if the platform opener cannot be spawned
pub fn open_url(url: &str) -> Result<()> {
    let mut command = opener_command(url);

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Browser(format!("failed to launch browser: {e}")))?;

    tracing::info!(url, "opened browser");
    Ok(())
}

#[cfg(target_os = "linux")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
