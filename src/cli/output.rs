//! Colored terminal output for the command line tool.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes the human-readable run summary to stdout.
///
/// Diagnostics go through `log`; this is only for the final report. Color is
/// used only when stdout is a terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color = if verbose && !quiet && io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            verbose,
            quiet,
            color,
        }
    }

    fn enabled(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Color setting used for stdout.
    pub fn color_choice(&self) -> ColorChoice {
        self.color
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.color)
    }

    /// Prints a bold section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        let mut stdout = self.stdout();
        writeln!(stdout)?;
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        write!(stdout, "{title}")?;
        stdout.reset()?;
        writeln!(stdout)
    }

    /// Prints an indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        writeln!(self.stdout(), "   {message}")
    }

    /// Prints a success line with a green check mark.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        let mut stdout = self.stdout();
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(stdout, "✓")?;
        stdout.reset()?;
        writeln!(stdout, " {message}")
    }
}
