use std::io::{BufRead, Write};

use crate::{ConfigureError, Result};

pub const PROJECT_NAME_PROMPT: &str = "What's the project name? ";

/// Write `question` to `output` and block until one line is read from `input`.
///
/// Returns the line with surrounding whitespace trimmed. A final line without
/// a trailing newline is accepted; a stream that ends before any input fails
/// with [`ConfigureError::Input`].
pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<String> {
    output
        .write_all(question.as_bytes())
        .and_then(|_| output.flush())
        .map_err(|e| ConfigureError::Input(format!("failed to write prompt: {e}")))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| ConfigureError::Input(format!("failed to read from stdin: {e}")))?;

    if read == 0 {
        return Err(ConfigureError::Input(
            "stdin closed before a line was entered".to_string(),
        ));
    }

    Ok(line.trim().to_string())
}
