//! User-facing output streams and interactive prompts
//!
//! Diagnostics go through `tracing`; everything a user is meant to read goes
//! through a [`Console`], which applies the running subcommand's `-s`/`-e`
//! suppression flags.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::debug;

/// Source of answers to yes/no questions
pub trait Prompter {
    /// Read one line of input
    fn read_answer(&mut self) -> io::Result<String>;
}

/// Reads answers from standard input
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Replays canned answers, counting how often it was asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: usize,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), asked: 0 }
    }

    /// Number of questions asked so far
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn read_answer(&mut self) -> io::Result<String> {
        self.asked += 1;
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}

/// Whether an answer line counts as "yes"
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.chars().next(), Some('y' | 'Y'))
}

/// Output and error streams plus the prompter of one invocation
pub struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    prompter: &'a mut dyn Prompter,
    suppress_output: bool,
    suppress_errors: bool,
    write_failed: bool,
}

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write, prompter: &'a mut dyn Prompter) -> Self {
        Self { out, err, prompter, suppress_output: false, suppress_errors: false, write_failed: false }
    }

    /// Write to one stream, logging only the first failure
    fn emit(&mut self, stream: Stream, args: fmt::Arguments<'_>) {
        let (sink, name) = match stream {
            Stream::Out => (&mut *self.out, "stdout"),
            Stream::Err => (&mut *self.err, "stderr"),
        };
        if let Err(e) = sink.write_fmt(args).and_then(|()| sink.flush()) {
            if !self.write_failed {
                self.write_failed = true;
                debug!(stream = name, error = %e, "console write failed");
            }
        }
    }

    /// Whether any write to either stream has failed
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    /// Apply a subcommand's `-s`/`-e` flags
    pub fn set_suppression(&mut self, output: bool, errors: bool) {
        self.suppress_output = output;
        self.suppress_errors = errors;
    }

    pub fn output_suppressed(&self) -> bool {
        self.suppress_output
    }

    /// Progress line on standard output
    pub fn info(&mut self, message: impl fmt::Display) {
        if !self.suppress_output {
            self.emit(Stream::Out, format_args!("{message}\n"));
        }
    }

    /// Raw text on standard output
    pub fn print(&mut self, text: impl fmt::Display) {
        if !self.suppress_output {
            self.emit(Stream::Out, format_args!("{text}"));
        }
    }

    /// Progress line on standard error
    pub fn note(&mut self, message: impl fmt::Display) {
        if !self.suppress_errors {
            self.emit(Stream::Err, format_args!("{message}\n"));
        }
    }

    pub fn error(&mut self, message: impl fmt::Display) {
        if !self.suppress_errors {
            self.emit(Stream::Err, format_args!("ERROR: {message}\n"));
        }
    }

    pub fn warn(&mut self, message: impl fmt::Display) {
        if !self.suppress_errors {
            self.emit(Stream::Err, format_args!("WARN: {message}\n"));
        }
    }

    /// Error line that ignores `-e`
    pub fn error_always(&mut self, message: impl fmt::Display) {
        self.emit(Stream::Err, format_args!("ERROR: {message}\n"));
    }

    /// Text on standard output that ignores `-s`
    pub fn print_always(&mut self, text: impl fmt::Display) {
        self.emit(Stream::Out, format_args!("{text}"));
    }

    /// Text on standard error that ignores `-e`
    pub fn eprint_always(&mut self, text: impl fmt::Display) {
        self.emit(Stream::Err, format_args!("{text}"));
    }

    /// Ask a yes/no question; unreadable input counts as "no"
    pub fn confirm(&mut self, question: impl fmt::Display) -> bool {
        self.emit(Stream::Out, format_args!("{question}"));
        match self.prompter.read_answer() {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                debug!(error = %e, "failed to read prompt answer");
                false
            }
        }
    }
}
