//! User-facing output, gated by the quiet, verbose and debug settings.

use crate::config::Config;
use colored::Colorize;
use std::io::{self, Write};

/// Where output lines go.
enum Sink {
    Stdout,
    Buffer(Vec<String>),
}

/// Writes command results for the user.
pub struct Output {
    quiet: bool,
    verbose: bool,
    debug: bool,
    sink: Sink,
}

impl Output {
    /// Creates output to stdout.
    pub fn new(quiet: bool, verbose: bool, debug: bool) -> Self {
        Self {
            quiet,
            verbose,
            debug,
            sink: Sink::Stdout,
        }
    }

    /// Creates output for a resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose, config.debug)
    }

    /// Creates output that keeps lines in memory.
    pub fn captured(quiet: bool, verbose: bool, debug: bool) -> Self {
        Self {
            quiet,
            verbose,
            debug,
            sink: Sink::Buffer(Vec::new()),
        }
    }

    /// Lines written to captured output.
    pub fn lines(&self) -> &[String] {
        match &self.sink {
            Sink::Buffer(lines) => lines,
            Sink::Stdout => &[],
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn write(&mut self, line: String) {
        match &mut self.sink {
            Sink::Stdout => {
                // Nowhere to report a broken stdout.
                let _ = writeln!(io::stdout(), "{}", line);
            }
            Sink::Buffer(lines) => lines.push(line),
        }
    }

    /// Writes a line unless quiet.
    pub fn line<S: Into<String>>(&mut self, line: S) {
        if !self.quiet {
            self.write(line.into());
        }
    }

    fn labelled<V: std::fmt::Display>(&self, label: &str, value: V) -> String {
        match self.sink {
            Sink::Stdout => format!("{} {}", format!("{}:", label).green(), value),
            Sink::Buffer(_) => format!("{}: {}", label, value),
        }
    }

    /// Writes a labelled value unless quiet.
    pub fn field<V: std::fmt::Display>(&mut self, label: &str, value: V) {
        if !self.quiet {
            let line = self.labelled(label, value);
            self.write(line);
        }
    }

    /// Writes a labelled value even when quiet. For values that cannot be
    /// shown again once this run ends.
    pub fn field_always<V: std::fmt::Display>(&mut self, label: &str, value: V) {
        let line = self.labelled(label, value);
        self.write(line);
    }

    /// Writes a labelled value in verbose mode only.
    pub fn verbose_field<V: std::fmt::Display>(&mut self, label: &str, value: V) {
        if self.verbose {
            self.field(label, value);
        }
    }

    /// Writes a line in debug mode only.
    pub fn debug<S: Into<String>>(&mut self, line: S) {
        if self.debug {
            self.write(line.into());
        }
    }

    /// Writes a warning unless quiet.
    pub fn warn<S: Into<String>>(&mut self, line: S) {
        if self.quiet {
            return;
        }
        let line = line.into();
        let line = match self.sink {
            Sink::Stdout => line.red().to_string(),
            Sink::Buffer(_) => line,
        };
        self.write(line);
    }
}
