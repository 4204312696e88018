use anyhow::{Context, Error};
use meteo_bulletin_core::write_text_file;
use slog::{info, warn, Logger};
use std::path::Path;
use std::process::Command;

pub fn write_bulletin(path: &Path, text: &str, logger: &Logger) -> Result<(), Error> {
    write_text_file(path, text)
        .with_context(|| format!("writing bulletin to {}", path.display()))?;
    info!(logger, "bulletin saved to: {}", path.display());
    Ok(())
}

/// The platform's "open with default application" command for `path`.
pub fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Best effort: a missing viewer is logged, never fatal.
pub fn open_in_viewer(path: &Path, logger: &Logger) {
    match viewer_command(path).spawn() {
        Ok(_) => info!(logger, "opened {} in viewer", path.display()),
        Err(err) => warn!(logger, "could not open {}: {}", path.display(), err),
    }
}
