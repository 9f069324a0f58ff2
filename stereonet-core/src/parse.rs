/// Line-oriented parser for batches of field measurements
///
/// ```text
/// # bedding
/// plane 30/045
/// p 83.2/257
/// line 45/336.6546
/// ```
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, space0, space1},
    combinator::{all_consuming, map, opt, rest, value},
    number::complete::double,
    sequence::{preceded, separated_pair, terminated, tuple},
    IResult,
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Plane,
    Line,
}

/// One parsed measurement. Values are not range checked here; the plot's
/// validator decides whether they are admitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub kind: FeatureKind,
    pub dip_angle: f64,
    pub dip_direction: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: cannot read `{text}` as `plane|line DIP/DIRECTION`")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
}

fn kind(input: &str) -> IResult<&str, FeatureKind> {
    alt((
        value(FeatureKind::Plane, tag_no_case("plane")),
        value(FeatureKind::Line, tag_no_case("line")),
        value(FeatureKind::Plane, tag_no_case("p")),
        value(FeatureKind::Line, tag_no_case("l")),
    ))(input)
}

fn orientation(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(
        double,
        tuple((space0, char('/'), space0)),
        double,
    )(input)
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), preceded(char('#'), rest))(input)
}

fn record(input: &str) -> IResult<&str, Record> {
    map(
        all_consuming(terminated(
            separated_pair(kind, space1, orientation),
            tuple((space0, opt(comment))),
        )),
        |(kind, (dip_angle, dip_direction))| Record {
            kind,
            dip_angle,
            dip_direction,
        },
    )(input)
}

/// Parse one line. Blank lines and comments yield `Ok(None)`.
pub fn parse_record(line_number: usize, line: &str) -> Result<Option<Record>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    record(trimmed)
        .map(|(_, record)| Some(record))
        .map_err(|_| ParseError {
            line: line_number,
            text: trimmed.to_string(),
        })
}

/// Parse a whole batch, skipping malformed lines with a warning so that a
/// few bad entries never abort the load.
pub fn parse_records(input: &str) -> Vec<Record> {
    input
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match parse_record(index + 1, line) {
            Ok(record) => record,
            Err(err) => {
                warn!(line = err.line, "{err}, skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plane_and_line() {
        assert_eq!(
            parse_record(1, "plane 30/045").unwrap(),
            Some(Record {
                kind: FeatureKind::Plane,
                dip_angle: 30.0,
                dip_direction: 45.0
            })
        );
        assert_eq!(
            parse_record(2, "L 45 / 336.6546  # lineation").unwrap(),
            Some(Record {
                kind: FeatureKind::Line,
                dip_angle: 45.0,
                dip_direction: 336.6546
            })
        );
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_record(1, "   ").unwrap(), None);
        assert_eq!(parse_record(2, "# header").unwrap(), None);
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let err = parse_record(7, "plane thirty/045").unwrap_err();
        assert_eq!(err.line, 7);
        assert!(parse_record(1, "fault 30/045").is_err());
        assert!(parse_record(1, "plane 30/045 extra").is_err());
    }

    #[test]
    fn test_batch_skips_bad_entries() {
        let input = "plane 30/045\nplane ??\np 60/090\n\nline 45/336.6546\np 95/045\n";
        let records = parse_records(input);
        assert_eq!(records.len(), 4);
        // Out of range values still parse; validation happens on add
        assert_eq!(records[3].dip_angle, 95.0);
    }
}
