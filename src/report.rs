//! Output formatting and persistence for grade results.
//!
//! Supports the console summary block, JSON debug logging, and CSV
//! export/import of the raw assignment records.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::assignment::{Assignment, GradeRow};
use crate::calculator::{GPA_SCALE, GradeSummary};

/// File the session exports to when no other path is given.
pub const DEFAULT_EXPORT_PATH: &str = "grades.csv";

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Writes `title` framed by horizontal rules.
pub fn write_banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule())
}

/// Renders the fixed-format grade summary block.
pub fn write_summary<W: Write>(out: &mut W, summary: &GradeSummary) -> std::io::Result<()> {
    writeln!(out)?;
    write_banner(out, "GRADE SUMMARY")?;
    writeln!(out, "\nTotal Assignments: {}", summary.total_assignments)?;
    writeln!(
        out,
        "\nFormative Total: {:.2} / {:.2}",
        summary.formative_total, summary.formative_weight
    )?;
    writeln!(
        out,
        "Summative Total: {:.2} / {:.2}",
        summary.summative_total, summary.summative_weight
    )?;
    writeln!(out, "\nFinal Grade: {:.2}%", summary.final_grade)?;
    writeln!(out, "GPA: {:.2} / {:.1}", summary.gpa, GPA_SCALE)?;
    let status = if summary.passed { "PASS" } else { "FAIL" };
    writeln!(out, "Status: {}", status)?;

    if !summary.passed {
        let labels = summary.resubmit_labels();
        writeln!(out, "Assignments to Resubmit: {}", labels)?;
    }

    writeln!(out, "{}", rule())
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &GradeSummary) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes every assignment as a CSV row, replacing any existing file.
///
/// Rows carry the raw grade and weight in insertion order. The file is closed
/// when the writer drops, on success and on error alike.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), rows = assignments.len()))]
pub fn export_csv<P: AsRef<Path>>(path: P, assignments: &[Assignment]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;

    let mut writer = csv::Writer::from_writer(file);
    for assignment in assignments {
        writer.serialize(GradeRow::from(assignment))?;
    }
    // Header is only emitted alongside the first row.
    if assignments.is_empty() {
        writer.write_record(["Assignment", "Category", "Grade", "Weight"])?;
    }
    writer.flush()?;

    info!("Grades exported");
    Ok(())
}

/// Reads a file produced by [`export_csv`] back into assignments.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Assignment>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open grades file {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut assignments = Vec::new();
    for result in rdr.deserialize() {
        let row: GradeRow = result?;
        assignments.push(Assignment::from(row));
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Category;
    use crate::calculator::GradeCalculator;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("{}_{}", std::process::id(), name))
    }

    fn render(summary: &GradeSummary) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, summary).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_assignments() -> Vec<Assignment> {
        vec![
            Assignment::new("Quiz, week 1", Category::Formative, 40.0, 10.0),
            Assignment::new("Final \"exam\"", Category::Summative, 90.0, 10.0),
            Assignment::new("Lab", Category::Formative, 72.5, 2.5),
        ]
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let summary = GradeCalculator::new().summary();
        print_json(&summary).unwrap();
    }

    #[test]
    fn test_write_summary_pass() {
        let summary = GradeCalculator::new().summary();
        let text = render(&summary);

        assert!(text.starts_with("\n=================================================="));
        assert!(text.contains("GRADE SUMMARY"));
        assert!(text.contains("Total Assignments: 0"));
        assert!(text.contains("Formative Total: 0.00 / 0.00"));
        assert!(text.contains("Summative Total: 0.00 / 0.00"));
        assert!(text.contains("Final Grade: 0.00%"));
        assert!(text.contains("GPA: 0.00 / 5.0"));
        assert!(text.contains("Status: PASS"));
        assert!(!text.contains("Assignments to Resubmit"));
    }

    #[test]
    fn test_write_summary_fail_lists_resubmissions() {
        let mut calc = GradeCalculator::new();
        for a in sample_assignments().into_iter().take(2) {
            calc.add(a);
        }
        let text = render(&calc.summary());

        assert!(text.contains("Formative Total: 4.00 / 10.00"));
        assert!(text.contains("Summative Total: 9.00 / 10.00"));
        assert!(text.contains("Final Grade: 13.00%"));
        assert!(text.contains("GPA: 0.65 / 5.0"));
        assert!(text.contains("Status: FAIL"));
        assert!(text.contains("Assignments to Resubmit: Formative Assessments\n"));
    }

    #[test]
    fn test_export_writes_header_and_raw_values() {
        let path = temp_path("grade_generator_test_export.csv");
        let _ = fs::remove_file(&path);

        export_csv(&path, &sample_assignments()[..2]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Assignment,Category,Grade,Weight");
        assert_eq!(lines[1], "\"Quiz, week 1\",FA,40.0,10.0");
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_empty_still_writes_header() {
        let path = temp_path("grade_generator_test_empty.csv");
        let _ = fs::remove_file(&path);

        export_csv(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["Assignment,Category,Grade,Weight"]);
        assert!(read_csv(&path).unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let path = temp_path("grade_generator_test_overwrite.csv");
        let assignments = sample_assignments();

        export_csv(&path, &assignments).unwrap();
        export_csv(&path, &assignments[..1]).unwrap();

        let read_back = read_csv(&path).unwrap();
        assert_eq!(read_back.len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_round_trip_preserves_records_and_order() {
        let path = temp_path("grade_generator_test_round_trip.csv");
        let assignments = sample_assignments();

        export_csv(&path, &assignments).unwrap();
        let read_back = read_csv(&path).unwrap();

        assert_eq!(read_back, assignments);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let path = temp_path("grade_generator_missing_dir").join("grades.csv");
        let err = export_csv(&path, &sample_assignments()).unwrap_err();
        assert!(err.to_string().contains("failed to create export file"));
    }
}
