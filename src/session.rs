//! Interactive grading session: collect, summarize, export.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::calculator::{GradeCalculator, GradeSummary};
use crate::input::{InputSource, Prompter};
use crate::report::{export_csv, print_json, write_banner, write_summary};

/// One run of the grade generator over an input source and a console.
pub struct Session<S, W> {
    calculator: GradeCalculator,
    prompter: Prompter<S, W>,
}

impl<S: InputSource, W: Write> Session<S, W> {
    pub fn new(input: S, out: W) -> Self {
        Self {
            calculator: GradeCalculator::new(),
            prompter: Prompter::new(input, out),
        }
    }

    pub fn calculator(&self) -> &GradeCalculator {
        &self.calculator
    }

    /// Gives back the input source and console.
    pub fn into_parts(self) -> (S, W) {
        self.prompter.into_parts()
    }

    /// Reads assignments until the user declines to add another. At least
    /// one assignment is always collected.
    pub fn collect(&mut self) -> Result<()> {
        loop {
            let assignment = self.prompter.read_assignment()?;
            debug!(
                assignment = %assignment,
                weighted_grade = assignment.weighted_grade(),
                "Assignment added"
            );
            self.calculator.add(assignment);

            if !self.prompter.read_add_another()? {
                break;
            }
        }
        Ok(())
    }

    /// Runs the whole session and exports the records to `export_path`.
    #[tracing::instrument(skip_all, fields(export_path = %export_path.as_ref().display()))]
    pub fn run<P: AsRef<Path>>(&mut self, export_path: P) -> Result<GradeSummary> {
        let export_path = export_path.as_ref();

        let out = self.prompter.out();
        write_banner(out, "GRADE GENERATOR CALCULATOR")?;
        writeln!(out)?;

        self.collect()?;

        let summary = self.calculator.summary();
        write_summary(self.prompter.out(), &summary)?;
        print_json(&summary)?;

        export_csv(export_path, self.calculator.assignments())?;
        writeln!(
            self.prompter.out(),
            "\n✓ Data exported to {}",
            export_path.display()
        )?;

        info!(
            total = summary.total_assignments,
            passed = summary.passed,
            final_grade = summary.final_grade,
            "Session complete"
        );
        Ok(summary)
    }
}
