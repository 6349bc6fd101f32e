//! Interactive input collection.
//!
//! Each field has a pure validator returning [`InputError`] on bad input.
//! [`Prompter`] wraps those validators in retry loops over an injected
//! [`InputSource`], so a session can be driven from stdin or from a script.

use anyhow::{Result, bail};
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::assignment::{Assignment, Category};

/// Reasons a single line of user input is rejected.
///
/// The display strings are shown to the user verbatim after `Error: `.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid number.")]
    InvalidNumber,
    #[error("Grade must be between 0 and 100.")]
    GradeOutOfRange,
    #[error("Weight must be a positive number.")]
    NonPositiveWeight,
    #[error("Category must be 'FA' or 'SA'.")]
    InvalidCategory,
    #[error("Please enter 'y' or 'n'.")]
    InvalidYesNo,
}

fn parse_number(raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| InputError::InvalidNumber)
}

/// Accepts a number in `[0, 100]`.
pub fn parse_grade(raw: &str) -> Result<f64, InputError> {
    let grade = parse_number(raw)?;
    if (0.0..=100.0).contains(&grade) {
        Ok(grade)
    } else {
        Err(InputError::GradeOutOfRange)
    }
}

/// Accepts a finite number greater than zero.
pub fn parse_weight(raw: &str) -> Result<f64, InputError> {
    let weight = parse_number(raw)?;
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(InputError::NonPositiveWeight)
    }
}

pub fn parse_category(raw: &str) -> Result<Category, InputError> {
    raw.parse()
}

/// `y` maps to `true`, `n` to `false`, either case.
pub fn parse_yes_no(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(InputError::InvalidYesNo),
    }
}

/// A line-oriented source of user input.
pub trait InputSource {
    /// Returns the next line without its terminator, or `None` once the
    /// source is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// [`InputSource`] over any buffered reader, typically locked stdin.
pub struct StdinSource<R>(R);

impl<R: BufRead> StdinSource<R> {
    pub fn new(reader: R) -> Self {
        Self(reader)
    }
}

impl<R: BufRead> InputSource for StdinSource<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.0.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Asks questions on `out` and reads answers from `input`, re-asking until
/// each answer validates.
pub struct Prompter<S, W> {
    input: S,
    out: W,
}

impl<S: InputSource, W: Write> Prompter<S, W> {
    pub fn new(input: S, out: W) -> Self {
        Self { input, out }
    }

    /// Console the prompter writes to.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (S, W) {
        (self.input, self.out)
    }

    fn ask(&mut self, prompt: &str, field: &str) -> Result<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        match self.input.read_line()? {
            Some(line) => Ok(line),
            None => bail!("input closed while waiting for {}", field),
        }
    }

    /// Repeats `prompt` until `validate` accepts the answer. There is no
    /// retry limit.
    fn ask_until_valid<T>(
        &mut self,
        prompt: &str,
        field: &str,
        validate: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T> {
        loop {
            let line = self.ask(prompt, field)?;
            match validate(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(field, input = %line, error = %e, "Rejected input");
                    writeln!(self.out, "Error: {}", e)?;
                }
            }
        }
    }

    pub fn read_name(&mut self) -> Result<String> {
        let name = self.ask("Assignment Name: ", "assignment name")?;
        Ok(name.trim().to_string())
    }

    pub fn read_category(&mut self) -> Result<Category> {
        self.ask_until_valid("Category (FA/SA): ", "category", parse_category)
    }

    pub fn read_grade(&mut self) -> Result<f64> {
        self.ask_until_valid("Grade Obtained (0-100): ", "grade", parse_grade)
    }

    pub fn read_weight(&mut self) -> Result<f64> {
        self.ask_until_valid("Weight: ", "weight", parse_weight)
    }

    pub fn read_add_another(&mut self) -> Result<bool> {
        self.ask_until_valid(
            "\nAdd another assignment? (y/n): ",
            "add another answer",
            parse_yes_no,
        )
    }

    /// Collects the four fields of one assignment, in order.
    pub fn read_assignment(&mut self) -> Result<Assignment> {
        writeln!(self.out, "\n--- Enter Assignment Details ---")?;

        let name = self.read_name()?;
        let category = self.read_category()?;
        let grade = self.read_grade()?;
        let weight = self.read_weight()?;

        Ok(Assignment::new(name, category, grade, weight))
    }
}
