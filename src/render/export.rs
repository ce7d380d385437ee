use log::*;
use std::io;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

pub const DEFAULT_OUTPUT_FILE: &str = "world_timezones.html";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: io::Error,
    },

    #[error("Failed to launch viewer '{viewer}': {source}")]
    Open {
        viewer: String,
        source: io::Error,
    },
}


/// Writes the document, replacing any previous run's output.
pub fn write_document(path: &Path, document: &str) -> Result<(), ExportError> {
    std::fs::write(path, document).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;

    info!("Wrote map to {} ({} bytes)", path.display(), document.len());
    Ok(())
}

/// Hands the file to the platform's default viewer without waiting for it.
pub fn open_in_viewer(path: &Path) -> Result<(), ExportError> {
    let (program, args) = viewer_command();

    Command::new(program)
        .args(args)
        .arg(path)
        .spawn()
        .map_err(|source| ExportError::Open { viewer: program.to_string(), source })?;

    debug!("Opened {} with {}", path.display(), program);
    Ok(())
}

fn viewer_command() -> (&'static str, Vec<&'static str>) {
    if cfg!(target_os = "windows") {
        // the empty argument is the window title `start` expects before a quoted path
        ("cmd", vec!["/C", "start", ""])
    } else if cfg!(target_os = "macos") {
        ("open", vec![])
    } else {
        ("xdg-open", vec![])
    }
}
