//! Colored terminal output management.
//!
//! All operator-facing output flows through [`OutputManager`] so verbosity
//! and coloring stay consistent across the run. Color handling is
//! decorative: failures to set or reset colors are ignored, while the
//! writes themselves propagate.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes leveled, colored messages for the CLI.
///
/// Status and progress go to stdout; warnings and errors go to stderr.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a manager with the given verbosity flags.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Prints a plain message in verbose mode.
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if self.verbose && !self.quiet {
            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            writeln!(stdout, "{}", message)?;
        }
        Ok(())
    }

    /// Prints a success message with a green check mark.
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        write!(stdout, "✓ ")?;
        let _ = stdout.reset();
        writeln!(stdout, "{}", message)
    }

    /// Prints a warning with a yellow prefix to stderr.
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        write!(stderr, "warning: ")?;
        let _ = stderr.reset();
        writeln!(stderr, "{}", message)
    }

    /// Prints an error with a red cross prefix to stderr.
    ///
    /// Errors print even in quiet mode.
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        write!(stderr, "✗ ")?;
        let _ = stderr.reset();
        writeln!(stderr, "{}", message)
    }

    /// Prints a progress line with a cyan arrow prefix.
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        write!(stdout, "==> ")?;
        let _ = stdout.reset();
        writeln!(stdout, "{}", message)
    }

    /// Prints a bold section header preceded by a blank line.
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        writeln!(stdout)?;
        let _ = stdout.set_color(ColorSpec::new().set_bold(true));
        write!(stdout, "{}", title)?;
        let _ = stdout.reset();
        writeln!(stdout)
    }

    /// Prints a line indented under the current section or progress item.
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        writeln!(stdout, "   {}", message)
    }
}
