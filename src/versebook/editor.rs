use crate::error::{Result, VersebookError};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Marker line separating the read-only header from the note text.
const HEADER_END: &str = "---";

/// A reference note as presented in the editor buffer:
///
/// ```text
/// # Rom 8:28
/// ---
/// note text…
/// ```
///
/// Everything above the marker is informational and ignored when reading
/// the buffer back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBuffer {
    pub name: String,
    pub content: String,
}

impl NoteBuffer {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The name is kept on the single header line; line breaks in it become
    /// spaces.
    pub fn to_buffer(&self) -> String {
        let name = self.name.replace(['\r', '\n'], " ");
        format!("# {}\n{}\n{}", name, HEADER_END, self.content)
    }

    /// Returns the note text of an edited buffer. Only a leading header
    /// line followed by the marker is dropped; a buffer without them is
    /// taken whole. The final newline most editors append is removed, any
    /// other whitespace is kept.
    pub fn content_from_buffer(buffer: &str) -> String {
        let body = buffer
            .split_once('\n')
            .filter(|(header, _)| header.starts_with("# "))
            .and_then(|(_, rest)| {
                let rest = rest.strip_prefix(HEADER_END)?;
                if rest.is_empty() {
                    return Some(rest);
                }
                rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
            })
            .unwrap_or(buffer);
        body.strip_suffix("\r\n")
            .or_else(|| body.strip_suffix('\n'))
            .unwrap_or(body)
            .to_string()
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(VersebookError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments ("code --wait").
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| VersebookError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(VersebookError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(VersebookError::Io)
}

/// Opens the note in an editor and returns the edited note text.
pub fn edit_note(initial: &NoteBuffer) -> Result<String> {
    let temp_file = env::temp_dir().join(format!("versebook-note-{}.md", uuid::Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer()).map_err(VersebookError::Io)?;

    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(NoteBuffer::content_from_buffer(&edited?))
}
