//! Plain-text constellation sources
//!
//! One point per line, real part then imaginary part, separated by
//! whitespace:
//!
//! ```text
//! 0.7071  0.7071
//! -0.7071 0.7071
//! ```
//!
//! Blank lines are skipped. Exactly `count` points are read; anything after
//! them is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use num_complex::Complex32;

use crate::domain::{ModemError, ModemResult};

/// Read `count` points from a text source
pub fn read_points<R: BufRead>(reader: R, count: usize) -> ModemResult<Vec<Complex32>> {
    let mut points = Vec::with_capacity(count);
    let mut line_no = 0;

    for line in reader.lines() {
        if points.len() == count {
            break;
        }
        let line = line?;
        line_no += 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [re, im] => points.push(Complex32::new(
                parse_real(re, line_no)?,
                parse_real(im, line_no)?,
            )),
            other => {
                return Err(ModemError::Parse {
                    line: line_no,
                    message: format!("expected 2 columns, found {}", other.len()),
                })
            }
        }
    }

    if points.len() < count {
        return Err(ModemError::Parse {
            line: line_no + 1,
            message: format!(
                "source ended after {} of {} points",
                points.len(),
                count
            ),
        });
    }

    Ok(points)
}

/// Read `count` points from a text file
pub fn read_points_from_file(path: impl AsRef<Path>, count: usize) -> ModemResult<Vec<Complex32>> {
    let file = File::open(path.as_ref())?;
    read_points(BufReader::new(file), count)
}

fn parse_real(token: &str, line: usize) -> ModemResult<f32> {
    token.parse::<f32>().map_err(|e| ModemError::Parse {
        line,
        message: format!("'{token}' is not a real number: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_pairs_in_order() {
        let text = "1.0 0.5\n-2 3e-1\n\n  0.25\t-0.75  \n";
        let points = read_points(Cursor::new(text), 3).unwrap();
        assert_eq!(
            points,
            vec![
                Complex32::new(1.0, 0.5),
                Complex32::new(-2.0, 0.3),
                Complex32::new(0.25, -0.75)
            ]
        );
    }

    #[test]
    fn trailing_lines_are_ignored() {
        let text = "1 1\n2 2\nnot a point\n";
        let points = read_points(Cursor::new(text), 2).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn short_source_is_a_parse_error() {
        let err = read_points(Cursor::new("1 1\n2 2\n"), 4).unwrap_err();
        match err {
            ModemError::Parse { message, .. } => assert!(message.contains("2 of 4")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn single_column_line_is_a_parse_error() {
        let err = read_points(Cursor::new("1 1\n2\n3 3\n"), 3).unwrap_err();
        assert!(matches!(err, ModemError::Parse { line: 2, .. }));
    }

    #[test]
    fn bad_number_is_a_parse_error() {
        let err = read_points(Cursor::new("1 1\n2 x\n"), 2).unwrap_err();
        match err {
            ModemError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_points_from_file("/nonexistent/constellation.txt", 4).unwrap_err();
        assert!(matches!(err, ModemError::Io(_)));
    }
}
