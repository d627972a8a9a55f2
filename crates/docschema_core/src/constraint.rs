//! Refinement constraints.
//!
//! A constraint runs after a validator's base type check has accepted a
//! value, so every check here may assume the value already has the shape
//! its validator demands:
//! - Min / Max: inclusive numeric or chronological bounds
//! - LengthMin / LengthMax: inclusive bounds on the character count
//! - CharacterExclude: none of the configured characters may appear
//! - Pattern: the string must match a regular expression

use crate::{Result, SchemaError, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Kinds of refinement constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Min,
    Max,
    LengthMin,
    LengthMax,
    CharacterExclude,
    Pattern,
}

impl ConstraintKind {
    /// Canonical name, as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Min => "Min",
            ConstraintKind::Max => "Max",
            ConstraintKind::LengthMin => "LengthMin",
            ConstraintKind::LengthMax => "LengthMax",
            ConstraintKind::CharacterExclude => "CharacterExclude",
            ConstraintKind::Pattern => "Pattern",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bound of a Min/Max constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl Bound {
    /// Orders `value` relative to this bound.
    ///
    /// Returns `None` when the two are not comparable (mixed families, NaN).
    /// ISO-8601 strings compare as the date or timestamp they spell.
    pub fn compare(&self, value: &Value) -> Option<Ordering> {
        match (value, self) {
            (Value::Int(v), Bound::Int(b)) => Some(v.cmp(b)),
            (Value::Int(v), Bound::Float(b)) => (*v as f64).partial_cmp(b),
            (Value::Float(v), Bound::Int(b)) => v.partial_cmp(&(*b as f64)),
            (Value::Float(v), Bound::Float(b)) => v.partial_cmp(b),
            (_, Bound::Date(b)) => match value.as_date() {
                Some(v) => Some(v.cmp(b)),
                None => value
                    .as_timestamp()
                    .map(|v| v.cmp(&b.and_time(NaiveTime::MIN))),
            },
            (_, Bound::Timestamp(b)) => value.as_timestamp().map(|v| v.cmp(b)),
            _ => None,
        }
    }

    /// Whether this bound is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Bound::Int(_) | Bound::Float(_))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(i) => write!(f, "{}", i),
            Bound::Float(x) => write!(f, "{:?}", x),
            Bound::Date(d) => write!(f, "{}", d),
            Bound::Timestamp(ts) => write!(f, "{}", ts),
        }
    }
}

/// A single refinement rule attached to a validator.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must not be below the bound (inclusive)
    Min(Bound),
    /// Value must not exceed the bound (inclusive)
    Max(Bound),
    /// String must have at least this many characters
    LengthMin(usize),
    /// String must have at most this many characters
    LengthMax(usize),
    /// String must not contain any of these characters
    CharacterExclude(String),
    /// String must match this regular expression
    Pattern(Regex),
}

impl Constraint {
    /// Compiles a pattern constraint.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Constraint::Pattern)
            .map_err(|e| SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                error: e.to_string(),
            })
    }

    /// Returns the kind of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Min(_) => ConstraintKind::Min,
            Constraint::Max(_) => ConstraintKind::Max,
            Constraint::LengthMin(_) => ConstraintKind::LengthMin,
            Constraint::LengthMax(_) => ConstraintKind::LengthMax,
            Constraint::CharacterExclude(_) => ConstraintKind::CharacterExclude,
            Constraint::Pattern(_) => ConstraintKind::Pattern,
        }
    }

    /// Bound carried by a Min/Max constraint.
    pub fn bound(&self) -> Option<&Bound> {
        match self {
            Constraint::Min(b) | Constraint::Max(b) => Some(b),
            _ => None,
        }
    }

    /// Checks an already type-confirmed value.
    ///
    /// Returns the failure reason, or `None` if the value satisfies the
    /// constraint.
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Constraint::Min(bound) => match bound.compare(value) {
                Some(Ordering::Less) => Some(format!("{} is less than {}", value, bound)),
                _ => None,
            },
            Constraint::Max(bound) => match bound.compare(value) {
                Some(Ordering::Greater) => Some(format!("{} is greater than {}", value, bound)),
                _ => None,
            },
            Constraint::LengthMin(min) => {
                let text = value.as_str()?;
                if text.chars().count() < *min {
                    Some(format!("Length of {} is less than {}", text, min))
                } else {
                    None
                }
            }
            Constraint::LengthMax(max) => {
                let text = value.as_str()?;
                if text.chars().count() > *max {
                    Some(format!("Length of {} is greater than {}", text, max))
                } else {
                    None
                }
            }
            Constraint::CharacterExclude(excluded) => {
                let text = value.as_str()?;
                excluded
                    .chars()
                    .find(|c| text.contains(*c))
                    .map(|c| format!("'{}' contains excluded character '{}'", text, c))
            }
            Constraint::Pattern(regex) => {
                let text = value.as_str()?;
                if regex.is_match(text) {
                    None
                } else {
                    Some(format!(
                        "'{}' does not match pattern '{}'",
                        text,
                        regex.as_str()
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_min_max_inclusive() {
        let min = Constraint::Min(Bound::Int(1));
        let max = Constraint::Max(Bound::Int(10));

        assert_eq!(min.check(&Value::Int(1)), None);
        assert_eq!(max.check(&Value::Int(10)), None);
        assert_eq!(min.check(&Value::Int(0)), Some("0 is less than 1".to_string()));
        assert_eq!(
            max.check(&Value::Int(11)),
            Some("11 is greater than 10".to_string())
        );
    }

    #[test]
    fn test_mixed_numeric_bounds() {
        let min = Constraint::Min(Bound::Float(1.5));
        assert!(min.check(&Value::Int(1)).is_some());
        assert!(min.check(&Value::Int(2)).is_none());

        let max = Constraint::Max(Bound::Int(2));
        assert!(max.check(&Value::Float(2.0)).is_none());
        assert!(max.check(&Value::Float(2.01)).is_some());
    }

    #[test]
    fn test_chronological_bounds() {
        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let min = Constraint::Min(Bound::Date(day("2020-01-01")));

        assert!(min.check(&Value::Date(day("2020-01-01"))).is_none());
        assert_eq!(
            min.check(&Value::Date(day("2019-12-31"))),
            Some("2019-12-31 is less than 2020-01-01".to_string())
        );

        // a date bound applies to timestamps from midnight
        let ts = day("2019-12-31").and_hms_opt(23, 59, 59).unwrap();
        assert!(min.check(&Value::Timestamp(ts)).is_some());

        // strings compare by the date they spell
        assert_eq!(
            min.check(&Value::from("2019-12-31")),
            Some("2019-12-31 is less than 2020-01-01".to_string())
        );
        assert!(min.check(&Value::from("2020-06-01T08:00:00")).is_none());
        assert!(min.check(&Value::from("not a date")).is_none());

        let max = Constraint::Max(Bound::Timestamp(day("2021-06-01").and_hms_opt(12, 0, 0).unwrap()));
        assert!(max.check(&Value::from("2021-06-01 12:00:01")).is_some());
        assert!(max.check(&Value::from("2021-06-01T10:00:00Z")).is_none());
    }

    #[test]
    fn test_length_counts_characters() {
        let min = Constraint::LengthMin(3);
        let max = Constraint::LengthMax(3);

        assert!(min.check(&Value::from("äöü")).is_none());
        assert!(max.check(&Value::from("äöü")).is_none());
        assert_eq!(
            min.check(&Value::from("ab")),
            Some("Length of ab is less than 3".to_string())
        );
        assert_eq!(
            max.check(&Value::from("abcd")),
            Some("Length of abcd is greater than 3".to_string())
        );
    }

    #[test]
    fn test_character_exclude_reports_first_configured() {
        let exclude = Constraint::CharacterExclude("!@".to_string());

        assert!(exclude.check(&Value::from("hello")).is_none());
        assert_eq!(
            exclude.check(&Value::from("a@b!")),
            Some("'a@b!' contains excluded character '!'".to_string())
        );
    }

    #[test]
    fn test_pattern() {
        let pattern = Constraint::pattern(r"^[a-z]+$").unwrap();
        assert_eq!(pattern.kind(), ConstraintKind::Pattern);
        assert!(pattern.check(&Value::from("abc")).is_none());
        assert_eq!(
            pattern.check(&Value::from("ABC")),
            Some("'ABC' does not match pattern '^[a-z]+$'".to_string())
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Constraint::pattern("[invalid(regex").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }
}
