//! Line-level grammar of the configuration language.
//!
//! Every function here is stateless: it looks at one line (or one value) and
//! either decomposes it into tagged fields or reports that it does not match.
//! Which grammar applies is decided by the section the parser is in.

pub const PREDATOR_MARKER: &str = "Predator:";
pub const CONTROL_MARKER: &str = "PreyControl:";
pub const ROTATE_KEYWORD: &str = "rotate";

const MAX_FIELDS: usize = 3;

/// A line outside the `PreyControl:` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLine<'a> {
    Blank,
    Property { key: &'a str, value: &'a str },
    PredatorMarker,
    ControlMarker,
    Unrecognized,
}

/// A line inside the `PreyControl:` section.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlLine {
    Blank,
    Straight {
        x: Number,
        y: Number,
        duration: Option<Number>,
    },
    Rotate {
        speed: Number,
        duration: Option<Number>,
        start: Option<Number>,
    },
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    /// Written with a leading `-`, including `-0`.
    pub negative: bool,
    /// Written with a trailing `d`.
    pub degrees: bool,
}

impl Number {
    pub fn radians(&self) -> f64 {
        if self.degrees {
            self.value.to_radians()
        } else {
            self.value
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Any,
    NonNegative,
}

/// Everything before the first `;`.
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(i) => &line[..i],
        None => line,
    }
}

pub fn section_line(line: &str) -> SectionLine<'_> {
    let body = strip_comment(line).trim();
    if body.is_empty() {
        return SectionLine::Blank;
    }
    if let Some((key, value)) = body.split_once('=') {
        let key = key.trim();
        if is_key(key) {
            return SectionLine::Property {
                key,
                value: value.trim(),
            };
        }
        return SectionLine::Unrecognized;
    }
    match body {
        PREDATOR_MARKER => SectionLine::PredatorMarker,
        CONTROL_MARKER => SectionLine::ControlMarker,
        _ => SectionLine::Unrecognized,
    }
}

fn is_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

pub fn control_line(line: &str) -> ControlLine {
    let body = strip_comment(line).trim();
    if body.is_empty() {
        return ControlLine::Blank;
    }

    if let Some(rest) = body.strip_prefix(ROTATE_KEYWORD) {
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return ControlLine::Unrecognized;
        }
        return match number_list(rest, true).as_deref() {
            Some(&[speed]) => ControlLine::Rotate {
                speed,
                duration: None,
                start: None,
            },
            Some(&[speed, duration]) if !duration.negative => ControlLine::Rotate {
                speed,
                duration: Some(duration),
                start: None,
            },
            Some(&[speed, duration, start]) if !duration.negative => ControlLine::Rotate {
                speed,
                duration: Some(duration),
                start: Some(start),
            },
            _ => ControlLine::Unrecognized,
        };
    }

    match number_list(body, false).as_deref() {
        Some(&[x, y]) => ControlLine::Straight {
            x,
            y,
            duration: None,
        },
        Some(&[x, y, duration]) if !duration.negative => ControlLine::Straight {
            x,
            y,
            duration: Some(duration),
        },
        _ => ControlLine::Unrecognized,
    }
}

/// Match a property value against exactly `count` plain numbers.
pub fn expect_numbers(value: &str, count: usize, sign: Sign) -> Option<Vec<f64>> {
    let numbers = number_list(value, false)?;
    if numbers.len() != count {
        return None;
    }
    if sign == Sign::NonNegative && numbers.iter().any(|n| n.negative) {
        return None;
    }
    Some(numbers.iter().map(|n| n.value).collect())
}

/// One to three numbers separated by whitespace or by a single comma.
pub fn number_list(s: &str, allow_degrees: bool) -> Option<Vec<Number>> {
    let mut numbers = Vec::with_capacity(MAX_FIELDS);
    for part in s.split(',') {
        let mut tokens = part.split_whitespace().peekable();
        tokens.peek()?;
        for token in tokens {
            numbers.push(number(token, allow_degrees)?);
        }
    }
    if numbers.len() > MAX_FIELDS {
        return None;
    }
    Some(numbers)
}

/// `-?digits(.digits*)?` with an optional trailing `d` when `allow_degrees`.
pub fn number(token: &str, allow_degrees: bool) -> Option<Number> {
    let (body, degrees) = match token.strip_suffix('d') {
        Some(body) if allow_degrees => (body, true),
        Some(_) => return None,
        None => (token, false),
    };
    let (digits, negative) = match body.strip_prefix('-') {
        Some(digits) => (digits, true),
        None => (body, false),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if int.is_empty()
        || !int.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let magnitude: f64 = if frac.is_empty() {
        int.parse().ok()?
    } else {
        digits.parse().ok()?
    };
    // Too many digits overflow to infinity.
    if !magnitude.is_finite() {
        return None;
    }
    Some(Number {
        value: if negative { -magnitude } else { magnitude },
        negative,
        degrees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lines() {
        assert_eq!(section_line(""), SectionLine::Blank);
        assert_eq!(section_line("   ; just a comment"), SectionLine::Blank);
        assert_eq!(
            section_line("  PreySpeed = 1.5 ; fast"),
            SectionLine::Property {
                key: "PreySpeed",
                value: "1.5"
            }
        );
        assert_eq!(section_line("Predator:"), SectionLine::PredatorMarker);
        assert_eq!(section_line("  Predator:  ; first"), SectionLine::PredatorMarker);
        assert_eq!(section_line("PreyControl:"), SectionLine::ControlMarker);
        assert_eq!(section_line("Predator"), SectionLine::Unrecognized);
        assert_eq!(section_line("Bad Key = 1"), SectionLine::Unrecognized);
        assert_eq!(section_line("= 1"), SectionLine::Unrecognized);
    }

    #[test]
    fn test_expect_numbers_arity() {
        assert_eq!(expect_numbers("1 2", 2, Sign::Any), Some(vec![1.0, 2.0]));
        assert_eq!(expect_numbers("1, 2", 2, Sign::Any), Some(vec![1.0, 2.0]));
        assert_eq!(
            expect_numbers("10,20 ,30", 3, Sign::NonNegative),
            Some(vec![10.0, 20.0, 30.0])
        );
        assert_eq!(expect_numbers("1 2", 1, Sign::Any), None);
        assert_eq!(expect_numbers("1", 2, Sign::Any), None);
        assert_eq!(expect_numbers("1 2 3 4", 3, Sign::Any), None);
        assert_eq!(expect_numbers("", 1, Sign::Any), None);
        assert_eq!(expect_numbers("1,,2", 2, Sign::Any), None);
        assert_eq!(expect_numbers("1,", 1, Sign::Any), None);
    }

    #[test]
    fn test_expect_numbers_sign() {
        assert_eq!(expect_numbers("-1 2", 2, Sign::Any), Some(vec![-1.0, 2.0]));
        assert_eq!(expect_numbers("-1 2", 2, Sign::NonNegative), None);
        assert_eq!(expect_numbers("-0", 1, Sign::NonNegative), None);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(number("12", false).map(|n| n.value), Some(12.0));
        assert_eq!(number("1.", false).map(|n| n.value), Some(1.0));
        assert_eq!(number("-0.25", false).map(|n| n.value), Some(-0.25));
        assert_eq!(number(".5", false), None);
        assert_eq!(number("+1", false), None);
        assert_eq!(number("1e3", false), None);
        assert_eq!(number("90d", false), None);
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(number(&huge, false), None);
        assert_eq!(number(&format!("-{}.5", huge), false), None);
        assert_eq!(expect_numbers(&format!("1 {}", huge), 2, Sign::Any), None);
        let n = number("-90d", true).unwrap();
        assert!(n.degrees && n.negative);
        assert_eq!(n.value, -90.0);
    }

    #[test]
    fn test_control_lines() {
        match control_line("3 4 ; heading") {
            ControlLine::Straight { x, y, duration } => {
                assert_eq!((x.value, y.value), (3.0, 4.0));
                assert_eq!(duration, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        match control_line("-1, 0, 2.5") {
            ControlLine::Straight { duration, .. } => {
                assert_eq!(duration.map(|d| d.value), Some(2.5))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(control_line("1 0 -2"), ControlLine::Unrecognized);
        assert_eq!(control_line("1"), ControlLine::Unrecognized);
        assert_eq!(control_line("1 2 3 4"), ControlLine::Unrecognized);
        assert_eq!(control_line("1 2d"), ControlLine::Unrecognized);
        assert_eq!(control_line(""), ControlLine::Blank);
    }

    #[test]
    fn test_rotate_lines() {
        match control_line("rotate 45d 2 -90d") {
            ControlLine::Rotate {
                speed,
                duration,
                start,
            } => {
                assert!(speed.degrees);
                assert_eq!(duration.map(|d| d.value), Some(2.0));
                assert!(start.unwrap().negative);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            control_line("rotate -1"),
            ControlLine::Rotate { duration: None, .. }
        ));
        // The grammar accepts a degree-tagged duration; the interpreter rejects it.
        assert!(matches!(
            control_line("rotate 1 2d"),
            ControlLine::Rotate { .. }
        ));
        assert_eq!(control_line("rotate 1 -2"), ControlLine::Unrecognized);
        assert_eq!(control_line("rotate"), ControlLine::Unrecognized);
        assert_eq!(control_line("rotated 1"), ControlLine::Unrecognized);
    }
}
