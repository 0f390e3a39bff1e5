//! Line input for the interactive console

use std::io::Write;

/// Prompts and reads one line from stdin. Returns `None` on end of input
/// (Ctrl-D), which the caller treats as a request to exit.
pub fn readline() -> Result<Option<String>, String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let bytes = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

/// Asks a yes/no question, defaulting to no. End of input counts as no.
pub fn confirm(question: &str) -> Result<bool, String> {
    write!(std::io::stdout(), "{question} [y/N] ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut answer = String::new();
    let bytes = std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| e.to_string())?;
    if bytes == 0 {
        return Ok(false);
    }
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
