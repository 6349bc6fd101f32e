//! Assignment records and the two fixed grading categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::input::InputError;

/// Grading category of an assignment.
///
/// Serialized by its short code (`FA` / `SA`), which is also what the user
/// types and what the exported CSV stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "FA")]
    Formative,
    #[serde(rename = "SA")]
    Summative,
}

impl Category {
    /// Every category, in the order status checks report them.
    pub const ALL: [Category; 2] = [Category::Formative, Category::Summative];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Formative => "FA",
            Category::Summative => "SA",
        }
    }

    /// Human-readable label used in the resubmission list.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Formative => "Formative Assessments",
            Category::Summative => "Summative Assessments",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = InputError;

    /// Parses a short code, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FA" => Ok(Category::Formative),
            "SA" => Ok(Category::Summative),
            _ => Err(InputError::InvalidCategory),
        }
    }
}

/// A single graded assignment.
///
/// The weighted grade is computed once at construction. The record does not
/// validate its inputs; [`crate::input`] guarantees `grade` is in `[0, 100]`
/// and `weight` is positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    name: String,
    category: Category,
    grade: f64,
    weight: f64,
    weighted_grade: f64,
}

impl Assignment {
    pub fn new(name: impl Into<String>, category: Category, grade: f64, weight: f64) -> Self {
        Assignment {
            name: name.into(),
            category,
            grade,
            weight,
            weighted_grade: (grade / 100.0) * weight,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Contribution of this assignment to the final grade.
    pub fn weighted_grade(&self) -> f64 {
        self.weighted_grade
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {:?}% - Weight: {:?}",
            self.name, self.category, self.grade, self.weight
        )
    }
}

/// One row of the exported grades file. Holds raw values only.
#[derive(Debug, Serialize, Deserialize)]
pub struct GradeRow {
    #[serde(rename = "Assignment")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Grade")]
    pub grade: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
}

impl From<&Assignment> for GradeRow {
    fn from(a: &Assignment) -> Self {
        GradeRow {
            name: a.name.clone(),
            category: a.category,
            grade: a.grade,
            weight: a.weight,
        }
    }
}

impl From<GradeRow> for Assignment {
    fn from(row: GradeRow) -> Self {
        Assignment::new(row.name, row.category, row.grade, row.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_grade_computed_at_construction() {
        let a = Assignment::new("Quiz 1", Category::Formative, 80.0, 20.0);
        assert!((a.weighted_grade() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_grade_matches_formula() {
        for (grade, weight) in [(0.0, 5.0), (100.0, 30.0), (73.5, 12.5), (33.3, 0.1)] {
            let a = Assignment::new("x", Category::Summative, grade, weight);
            assert!((a.weighted_grade() - grade / 100.0 * weight).abs() < 1e-9);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("fa".parse::<Category>().unwrap(), Category::Formative);
        assert_eq!(" Sa ".parse::<Category>().unwrap(), Category::Summative);
        assert_eq!("FA".parse::<Category>().unwrap(), Category::Formative);
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert!(matches!(
            "exam".parse::<Category>(),
            Err(InputError::InvalidCategory)
        ));
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_display() {
        let a = Assignment::new("Essay", Category::Summative, 90.0, 10.0);
        assert_eq!(a.to_string(), "Essay (SA): 90.0% - Weight: 10.0");

        let b = Assignment::new("Lab", Category::Formative, 72.5, 2.5);
        assert_eq!(b.to_string(), "Lab (FA): 72.5% - Weight: 2.5");
    }

    #[test]
    fn test_row_conversion_recomputes_weighted_grade() {
        let row = GradeRow {
            name: "Lab".to_string(),
            category: Category::Formative,
            grade: 50.0,
            weight: 8.0,
        };
        let a = Assignment::from(row);
        assert_eq!(a.name(), "Lab");
        assert!((a.weighted_grade() - 4.0).abs() < 1e-9);
    }
}
