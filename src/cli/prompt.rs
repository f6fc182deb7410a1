//! Interactive yes/no prompts.

use std::io::{BufRead, Write};

/// Asks a yes/no question on stdout and reads one answer line from stdin.
///
/// Only `y`/`yes` (any case) count as yes. Empty answers and EOF count as
/// no.
pub fn confirm(question: &str) -> std::io::Result<bool> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{} [y/N] ", question)?;
    stdout.flush()?;

    let mut answer = String::new();
    let bytes_read = std::io::stdin().lock().read_line(&mut answer)?;
    if bytes_read == 0 {
        // EOF: stdin closed, no answer possible
        writeln!(stdout)?;
        return Ok(false);
    }

    Ok(parse_answer(&answer))
}

/// Interprets one answer line.
fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::parse_answer;

    #[test]
    fn yes_variants_are_accepted() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("Y\n"));
        assert!(parse_answer("yes\n"));
        assert!(parse_answer("  YES  \n"));
    }

    #[test]
    fn everything_else_declines() {
        assert!(!parse_answer("n\n"));
        assert!(!parse_answer("no\n"));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("yep\n"));
        assert!(!parse_answer("quit\n"));
    }
}
