//! Grade aggregation: category totals, final grade, GPA and pass/fail status.

use serde::Serialize;

use crate::assignment::{Assignment, Category};

/// Fraction of a category's total weight that must be earned to pass it.
pub const PASS_THRESHOLD: f64 = 0.5;

/// Upper bound of the GPA scale.
pub const GPA_SCALE: f64 = 5.0;

/// Pass/fail outcome and the categories that need resubmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub passed: bool,
    pub resubmit: Vec<Category>,
}

/// Read-only snapshot of every aggregate at the time it was taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub total_assignments: usize,
    pub formative_total: f64,
    pub formative_weight: f64,
    pub summative_total: f64,
    pub summative_weight: f64,
    pub final_grade: f64,
    pub gpa: f64,
    pub passed: bool,
    pub resubmit: Vec<Category>,
}

impl GradeSummary {
    /// Resubmission labels joined for display, e.g. `"Formative Assessments"`.
    pub fn resubmit_labels(&self) -> String {
        self.resubmit
            .iter()
            .map(Category::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Sums from `+0.0`; `Iterator::sum` on floats yields `-0.0` when empty.
fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, v| acc + v)
}

/// Append-only collection of assignments.
///
/// Every aggregate is recomputed from the records on each call.
#[derive(Debug, Default)]
pub struct GradeCalculator {
    assignments: Vec<Assignment>,
}

impl GradeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Records in insertion order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    fn in_category(&self, category: Category) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.category() == category)
    }

    /// Sum of weighted grades in `category`; 0 when it has no records.
    pub fn category_total(&self, category: Category) -> f64 {
        total(self.in_category(category).map(Assignment::weighted_grade))
    }

    /// Sum of weights in `category`; 0 when it has no records.
    pub fn category_weight(&self, category: Category) -> f64 {
        total(self.in_category(category).map(Assignment::weight))
    }

    pub fn final_grade(&self) -> f64 {
        total(self.assignments.iter().map(Assignment::weighted_grade))
    }

    /// Final grade mapped linearly onto a 0 to 5 scale.
    pub fn gpa(&self) -> f64 {
        self.final_grade() / 100.0 * GPA_SCALE
    }

    /// A category fails when it carries weight and its total is strictly
    /// below half of that weight. Categories with no weight always pass.
    pub fn determine_status(&self) -> Status {
        let resubmit: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|&category| {
                let weight = self.category_weight(category);
                weight > 0.0 && self.category_total(category) < weight * PASS_THRESHOLD
            })
            .collect();

        Status {
            passed: resubmit.is_empty(),
            resubmit,
        }
    }

    pub fn summary(&self) -> GradeSummary {
        let Status { passed, resubmit } = self.determine_status();

        GradeSummary {
            total_assignments: self.assignments.len(),
            formative_total: self.category_total(Category::Formative),
            formative_weight: self.category_weight(Category::Formative),
            summative_total: self.category_total(Category::Summative),
            summative_weight: self.category_weight(Category::Summative),
            final_grade: self.final_grade(),
            gpa: self.gpa(),
            passed,
            resubmit,
        }
    }
}
