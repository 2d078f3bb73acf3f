//! Plain-text job and solution files.
//!
//! # Job file
//!
//! ```text
//! 5
//! 10,3,4
//! 5,3,3
//! ```
//!
//! The first line holds the job count `n`, followed by exactly `n` lines of
//! `deadline,duration,weight`. Fields are trimmed and blank lines are
//! skipped. Line `k + 2` of the file describes job `k` (0-based).
//!
//! # Solution file
//!
//! The total weighted tardiness on the first line, then one job index per
//! line in processing order.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::models::{Job, JobSet, Solution, MAX_WEIGHT, MIN_WEIGHT};
use crate::validation::{validate_cost_bounds, validate_job, ValidationError};
use crate::Cost;

/// Errors while reading or writing job and solution files.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// No non-blank line at all.
    #[error("input is empty")]
    Empty,

    /// The header is not a non-negative integer.
    #[error("line {line}: expected a job count, got {value:?}")]
    InvalidCount {
        /// Line of the header.
        line: usize,
        /// Header text.
        value: String,
    },

    /// The header disagrees with the number of data lines.
    #[error("header announces {expected} jobs, found {found} data lines")]
    CountMismatch {
        /// Count from the header.
        expected: usize,
        /// Non-blank lines after the header.
        found: usize,
    },

    /// A job line does not have three fields.
    #[error("line {line}: expected deadline,duration,weight, got {found} fields")]
    FieldCount {
        /// Offending line.
        line: usize,
        /// Number of comma-separated fields.
        found: usize,
    },

    /// A field is not an integer.
    #[error("line {line}: {field} must be an integer, got {value:?}")]
    InvalidInteger {
        /// Offending line.
        line: usize,
        /// Field name.
        field: &'static str,
        /// Field text.
        value: String,
    },

    /// Durations and weights are too large for 64-bit costs.
    #[error("{0}")]
    Overflow(#[source] ValidationError),

    /// A job violates a domain constraint.
    #[error("line {line}: {source}")]
    Constraint {
        /// Offending line.
        line: usize,
        /// The violated constraint.
        source: ValidationError,
    },
}

/// Parses a job file held in memory.
///
/// Every job is validated; the first violation is reported with its line.
/// A set whose durations could overflow the cost is rejected as a whole.
pub fn parse_job_set(input: &str) -> Result<JobSet, FormatError> {
    let mut lines = non_blank_lines(input);
    let (header_line, header) = lines.next().ok_or(FormatError::Empty)?;
    let expected: usize = header.parse().map_err(|_| FormatError::InvalidCount {
        line: header_line,
        value: header.to_string(),
    })?;

    let data: Vec<(usize, &str)> = lines.collect();
    if data.len() != expected {
        return Err(FormatError::CountMismatch {
            expected,
            found: data.len(),
        });
    }

    let jobs = data
        .into_iter()
        .enumerate()
        .map(|(index, (line, text))| parse_job_line(index, line, text))
        .collect::<Result<Vec<_>, _>>()?;
    validate_cost_bounds(&jobs).map_err(FormatError::Overflow)?;

    debug!("parsed {} jobs", jobs.len());
    Ok(JobSet::new(jobs))
}

/// Reads and parses a job file.
pub fn read_job_set(path: impl AsRef<Path>) -> Result<JobSet, FormatError> {
    parse_job_set(&read_to_string(path.as_ref())?)
}

/// Writes `jobs` in job-file format.
pub fn write_job_set<W: Write>(writer: &mut W, jobs: &[Job]) -> io::Result<()> {
    writeln!(writer, "{}", jobs.len())?;
    for job in jobs {
        writeln!(writer, "{},{},{}", job.deadline, job.duration, job.weight)?;
    }
    Ok(())
}

/// Writes `jobs` to a job file, replacing any existing content.
pub fn write_job_set_file(path: impl AsRef<Path>, jobs: &[Job]) -> Result<(), FormatError> {
    let mut buffer = Vec::new();
    write_job_set(&mut buffer, jobs).map_err(|source| write_error(path.as_ref(), source))?;
    write_bytes(path.as_ref(), &buffer)
}

/// Parses a solution file held in memory.
///
/// Only the syntax is checked here; whether the indices form a permutation
/// of a job set is up to the caller (see [`crate::scheduler::try_evaluate`]).
pub fn parse_solution(input: &str) -> Result<Solution, FormatError> {
    let mut lines = non_blank_lines(input);
    let (cost_line, cost_text) = lines.next().ok_or(FormatError::Empty)?;
    let cost: Cost = parse_field(cost_line, "cost", cost_text)?;
    let order = lines
        .map(|(line, text)| parse_field(line, "job index", text))
        .collect::<Result<Vec<usize>, _>>()?;
    Ok(Solution::new(order, cost))
}

/// Reads and parses a solution file.
pub fn read_solution(path: impl AsRef<Path>) -> Result<Solution, FormatError> {
    parse_solution(&read_to_string(path.as_ref())?)
}

/// Writes `solution` in solution-file format.
pub fn write_solution<W: Write>(writer: &mut W, solution: &Solution) -> io::Result<()> {
    writeln!(writer, "{}", solution.cost)?;
    for index in solution.sequence.iter() {
        writeln!(writer, "{index}")?;
    }
    Ok(())
}

/// Writes `solution` to a file.
///
/// The content is rendered completely before the file is opened.
pub fn write_solution_file(path: impl AsRef<Path>, solution: &Solution) -> Result<(), FormatError> {
    let mut buffer = Vec::new();
    write_solution(&mut buffer, solution).map_err(|source| write_error(path.as_ref(), source))?;
    write_bytes(path.as_ref(), &buffer)
}

fn non_blank_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty())
}

fn parse_job_line(index: usize, line: usize, text: &str) -> Result<Job, FormatError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let &[deadline, duration, weight] = fields.as_slice() else {
        return Err(FormatError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let deadline: i64 = parse_field(line, "deadline", deadline)?;
    let duration: i64 = parse_field(line, "duration", duration)?;
    let raw_weight: i64 = parse_field(line, "weight", weight)?;

    let weight = u8::try_from(raw_weight)
        .ok()
        .filter(|w| (MIN_WEIGHT..=MAX_WEIGHT).contains(w))
        .ok_or_else(|| FormatError::Constraint {
            line,
            source: ValidationError::weight_out_of_range(index, raw_weight),
        })?;

    let job = Job::new(deadline, duration, weight);
    match validate_job(index, &job).into_iter().next() {
        Some(source) => Err(FormatError::Constraint { line, source }),
        None => Ok(job),
    }
}

fn parse_field<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    text: &str,
) -> Result<T, FormatError> {
    text.parse().map_err(|_| FormatError::InvalidInteger {
        line,
        field,
        value: text.to_string(),
    })
}

fn read_to_string(path: &Path) -> Result<String, FormatError> {
    fs::read_to_string(path).map_err(|source| FormatError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), FormatError> {
    fs::write(path, bytes).map_err(|source| write_error(path, source))
}

fn write_error(path: &Path, source: io::Error) -> FormatError {
    FormatError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    const SAMPLE: &str = "5\n10,3,4\n5,3,3\n2,2,1\n8,1,1\n6,4,2\n";

    #[test]
    fn test_parse_sample() {
        let jobs = parse_job_set(SAMPLE).unwrap();
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[0], Job::new(10, 3, 4));
        assert_eq!(jobs[4], Job::new(6, 4, 2));
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let input = "\n 2 \n\n 3 , 1 ,2\n\n4,2,1\n\n";
        let jobs = parse_job_set(input).unwrap();
        assert_eq!(&jobs[..], &[Job::new(3, 1, 2), Job::new(4, 2, 1)]);
    }

    #[test]
    fn test_zero_jobs() {
        assert!(parse_job_set("0\n").unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_job_set(""), Err(FormatError::Empty)));
        assert!(matches!(parse_job_set("\n \n"), Err(FormatError::Empty)));
    }

    #[test]
    fn test_bad_header() {
        let err = parse_job_set("three\n1,1,1\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidCount { line: 1, .. }));
        assert!(matches!(
            parse_job_set("-1\n"),
            Err(FormatError::InvalidCount { .. })
        ));
    }

    #[test]
    fn test_extra_data_line() {
        let err = parse_job_set("3\n1,1,1\n2,2,2\n3,3,3\n4,4,4\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::CountMismatch {
                expected: 3,
                found: 4
            }
        ));
    }

    #[test]
    fn test_missing_data_line() {
        let err = parse_job_set("3\n1,1,1\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::CountMismatch {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_field_count() {
        let err = parse_job_set("1\n1,2\n").unwrap_err();
        assert!(matches!(err, FormatError::FieldCount { line: 2, found: 2 }));
        let err = parse_job_set("1\n1,2,3,4\n").unwrap_err();
        assert!(matches!(err, FormatError::FieldCount { found: 4, .. }));
    }

    #[test]
    fn test_non_integer_field() {
        let err = parse_job_set("2\n1,1,1\n4,2.5,1\n").unwrap_err();
        match err {
            FormatError::InvalidInteger { line, field, value } => {
                assert_eq!(line, 3);
                assert_eq!(field, "duration");
                assert_eq!(value, "2.5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_constraint_violations() {
        let kind_of = |input: &str| match parse_job_set(input) {
            Err(FormatError::Constraint { source, .. }) => source.kind,
            other => panic!("expected a constraint error, got {other:?}"),
        };

        assert_eq!(kind_of("1\n5,1,5\n"), ValidationErrorKind::WeightOutOfRange);
        assert_eq!(kind_of("1\n5,1,0\n"), ValidationErrorKind::WeightOutOfRange);
        assert_eq!(kind_of("1\n5,1,-2\n"), ValidationErrorKind::WeightOutOfRange);
        assert_eq!(kind_of("1\n5,1,300\n"), ValidationErrorKind::WeightOutOfRange);
        assert_eq!(kind_of("1\n5,0,1\n"), ValidationErrorKind::NonPositiveDuration);
        assert_eq!(kind_of("1\n-1,1,1\n"), ValidationErrorKind::NegativeDeadline);
    }

    #[test]
    fn test_constraint_reports_line() {
        let err = parse_job_set("2\n\n1,1,1\n1,1,9\n").unwrap_err();
        assert!(matches!(err, FormatError::Constraint { line: 4, .. }));
        assert!(err.to_string().starts_with("line 4: job 1: weight"));
    }

    #[test]
    fn test_overflowing_durations_rejected() {
        let err = parse_job_set("2\n0,4611686018427387904,1\n0,4611686018427387904,1\n").unwrap_err();
        match err {
            FormatError::Overflow(source) => {
                assert_eq!(source.kind, ValidationErrorKind::CostOverflow)
            }
            other => panic!("expected an overflow error, got {other}"),
        }
    }

    #[test]
    fn test_overflowing_weighted_cost_rejected() {
        assert!(matches!(
            parse_job_set("1\n0,2305843009213693952,4\n"),
            Err(FormatError::Overflow(_))
        ));
        assert!(parse_job_set("1\n0,2305843009213693952,3\n").is_ok());
    }

    #[test]
    fn test_write_job_set() {
        let jobs = parse_job_set(SAMPLE).unwrap();
        let mut out = Vec::new();
        write_job_set(&mut out, &jobs).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), SAMPLE);
    }

    #[test]
    fn test_solution_format() {
        let solution = Solution::new(vec![2, 1, 3, 0, 4], 14);
        let mut out = Vec::new();
        write_solution(&mut out, &solution).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "14\n2\n1\n3\n0\n4\n");
        assert_eq!(parse_solution(&text).unwrap(), solution);
    }

    #[test]
    fn test_empty_solution_format() {
        let mut out = Vec::new();
        write_solution(&mut out, &Solution::default()).unwrap();
        assert_eq!(out, b"0\n");
    }

    #[test]
    fn test_parse_solution_errors() {
        assert!(matches!(parse_solution(""), Err(FormatError::Empty)));
        assert!(matches!(
            parse_solution("x\n0\n"),
            Err(FormatError::InvalidInteger { field: "cost", .. })
        ));
        assert!(matches!(
            parse_solution("3\n0\n-1\n"),
            Err(FormatError::InvalidInteger {
                line: 3,
                field: "job index",
                ..
            })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("u-sequencing-io-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let jobs_path = dir.join("jobs.txt");
        let jobs = parse_job_set(SAMPLE).unwrap();
        write_job_set_file(&jobs_path, &jobs).unwrap();
        assert_eq!(read_job_set(&jobs_path).unwrap(), jobs);

        let solution_path = dir.join("solution.txt");
        let solution = Solution::new(vec![1, 0], 7);
        write_solution_file(&solution_path, &solution).unwrap();
        assert_eq!(read_solution(&solution_path).unwrap(), solution);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = read_job_set("/nonexistent/u-sequencing/jobs.txt").unwrap_err();
        assert!(matches!(err, FormatError::Read { .. }));
        assert!(err.to_string().contains("cannot read"));
    }
}
