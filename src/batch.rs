//! Batch label codec.
//!
//! A batch label names a cohort: a programme followed by its start year and,
//! optionally, a short end-year suffix.
//!
//! ```text
//! Int. MSc. 2017-22
//! ^^^^^^^^^ ^^^^ ^^
//! programme start end (last two digits)
//! PhD 2020
//! ```
//!
//! Decoding is best effort. Labels that do not end in a four-digit year
//! come back as a [`ParseFailure`] carrying the raw text, so callers can
//! still show and text-search them.
//!
//! Two-digit end suffixes are expanded with a fixed `20` century prefix.
//! That is only correct for 2000-2099, which covers every cohort the
//! directory holds.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::YearRange;
use crate::error::EncodeRejected;

/// Structured form of a batch label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchFields {
    /// Programme name without surrounding whitespace. [`BatchFields::new`]
    /// trims it; labels are written with the trimmed form either way.
    pub programme: String,
    pub start_year: u16,
    pub end_year: Option<u16>,
}

impl BatchFields {
    pub fn new(programme: impl Into<String>, start_year: u16) -> Self {
        Self {
            programme: programme.into().trim().to_string(),
            start_year,
            end_year: None,
        }
    }

    pub fn with_end_year(mut self, end_year: u16) -> Self {
        self.end_year = Some(end_year);
        self
    }
}

impl fmt::Display for BatchFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.programme.trim(), self.start_year)?;
        if let Some(end) = self.end_year {
            write!(f, "-{:02}", end % 100)?;
        }
        Ok(())
    }
}

impl FromStr for BatchFields {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// A label with no locatable programme/year split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub label: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable batch label '{}'", self.label)
    }
}

impl std::error::Error for ParseFailure {}

fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // programme, whitespace, 4-digit start, optional -NN..NNNN end
        Regex::new(r"^(.*\S)\s+(\d{4})(?:-(\d{2,4}))?$").expect("batch label regex")
    })
}

/// Split a label into programme, start year and optional end year.
pub fn decode(label: &str) -> Result<BatchFields, ParseFailure> {
    let failure = || ParseFailure {
        label: label.to_string(),
    };

    let caps = label_regex().captures(label.trim()).ok_or_else(failure)?;
    let programme = caps.get(1).map(|m| m.as_str()).ok_or_else(failure)?;
    let start_year: u16 = caps[2].parse().map_err(|_| failure())?;

    let end_year = match caps.get(3) {
        Some(m) => Some(expand_end_year(m.as_str()).ok_or_else(failure)?),
        None => None,
    };

    Ok(BatchFields {
        programme: programme.to_string(),
        start_year,
        end_year,
    })
}

/// `"22"` becomes 2022; three or four digits are taken as written.
fn expand_end_year(suffix: &str) -> Option<u16> {
    let value: u16 = suffix.parse().ok()?;
    if suffix.len() == 2 {
        Some(2000 + value)
    } else {
        Some(value)
    }
}

/// Build the canonical label for `fields`.
///
/// The end year is always written as its last two digits.
pub fn encode(fields: &BatchFields) -> Result<String, EncodeRejected> {
    check_programme(&fields.programme)?;
    Ok(fields.to_string())
}

/// A programme must have visible text and fit on one line.
fn check_programme(programme: &str) -> Result<(), EncodeRejected> {
    if programme.trim().is_empty() {
        return Err(EncodeRejected::MissingProgramme);
    }
    if programme.chars().any(char::is_control) {
        return Err(EncodeRejected::ControlCharacter);
    }
    Ok(())
}

/// Batch inputs as collected by a join, update or admin edit form.
///
/// Unlike [`BatchFields`], the years are optional here: the form may be
/// submitted before they are chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchForm {
    pub programme: String,
    pub start_year: Option<u16>,
    pub end_year: Option<u16>,
}

impl BatchForm {
    /// Build a form from raw select values. An empty string means "not chosen".
    pub fn from_inputs(programme: &str, start: &str, end: &str) -> Result<Self, EncodeRejected> {
        Ok(Self {
            programme: programme.trim().to_string(),
            start_year: parse_year_input(start)?,
            end_year: parse_year_input(end)?,
        })
    }

    /// Pre-fill from a stored label. Unparseable labels leave the form blank.
    pub fn from_label(label: &str) -> Self {
        match decode(label) {
            Ok(fields) => Self {
                programme: fields.programme,
                start_year: Some(fields.start_year),
                end_year: fields.end_year,
            },
            Err(_) => Self::default(),
        }
    }

    /// Check mandatory fields, the year range and year ordering.
    pub fn validate(&self, years: &YearRange) -> Result<BatchFields, EncodeRejected> {
        check_programme(&self.programme)?;
        let start = self.start_year.ok_or(EncodeRejected::MissingStartYear)?;

        for year in std::iter::once(start).chain(self.end_year) {
            if !years.contains(year) {
                return Err(EncodeRejected::YearOutOfRange {
                    year,
                    min: years.min,
                    max: years.max,
                });
            }
        }
        if let Some(end) = self.end_year
            && end < start
        {
            return Err(EncodeRejected::EndBeforeStart { start, end });
        }

        Ok(BatchFields {
            programme: self.programme.trim().to_string(),
            start_year: start,
            end_year: self.end_year,
        })
    }

    /// Validate, then encode.
    pub fn encode(&self, years: &YearRange) -> Result<String, EncodeRejected> {
        encode(&self.validate(years)?)
    }
}

fn parse_year_input(input: &str) -> Result<Option<u16>, EncodeRejected> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| EncodeRejected::InvalidYear(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn years() -> YearRange {
        YearRange::new(2007, 2031)
    }

    #[test]
    fn test_encode_with_end_year() {
        let fields = BatchFields::new("Int. MSc.", 2017).with_end_year(2022);
        assert_eq!(encode(&fields).unwrap(), "Int. MSc. 2017-22");
    }

    #[test]
    fn test_encode_without_end_year() {
        assert_eq!(encode(&BatchFields::new("PhD", 2020)).unwrap(), "PhD 2020");
    }

    #[test]
    fn test_encode_pads_short_suffix() {
        let fields = BatchFields::new("PhD", 2007).with_end_year(2009);
        assert_eq!(encode(&fields).unwrap(), "PhD 2007-09");
    }

    #[test]
    fn test_encode_rejects_empty_programme() {
        assert_eq!(
            encode(&BatchFields::new("  ", 2020)),
            Err(EncodeRejected::MissingProgramme)
        );
    }

    #[test]
    fn test_encode_rejects_control_characters() {
        for programme in ["Int.\nMSc.", "PhD\t(Physics)", "M.Sc.\r"] {
            assert_eq!(
                encode(&BatchFields::new(programme, 2017)),
                Err(EncodeRejected::ControlCharacter),
                "programme {programme:?}"
            );
        }
    }

    #[test]
    fn test_new_trims_programme() {
        let fields = BatchFields::new(" PhD ", 2020);
        assert_eq!(fields.programme, "PhD");
        assert_eq!(decode(&encode(&fields).unwrap()).unwrap(), fields);
    }

    #[test]
    fn test_decode_with_end_year() {
        assert_eq!(
            decode("Int. MSc. 2017-22").unwrap(),
            BatchFields::new("Int. MSc.", 2017).with_end_year(2022)
        );
    }

    #[test]
    fn test_decode_without_end_year() {
        assert_eq!(decode("PhD 2020").unwrap(), BatchFields::new("PhD", 2020));
    }

    #[test]
    fn test_decode_full_end_year() {
        let fields = decode("M.Sc. 2015-2017").unwrap();
        assert_eq!(fields.programme, "M.Sc.");
        assert_eq!(fields.end_year, Some(2017));
    }

    #[test]
    fn test_decode_three_digit_suffix_as_written() {
        assert_eq!(decode("PhD 2015-202").unwrap().end_year, Some(202));
    }

    #[test]
    fn test_decode_splits_at_last_whitespace_run() {
        let fields = decode("Int.  MSc.   2017").unwrap();
        assert_eq!(fields.programme, "Int.  MSc.");
        assert_eq!(fields.start_year, 2017);
    }

    #[test]
    fn test_decode_ignores_surrounding_whitespace() {
        assert_eq!(decode("  PhD 2020 ").unwrap(), BatchFields::new("PhD", 2020));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode("garbage-no-year").unwrap_err();
        assert_eq!(err.label, "garbage-no-year");
    }

    #[test]
    fn test_decode_failures() {
        for label in ["", "???", "2020", "PhD 20", "PhD 2020-2", "PhD 2020-12345", "PhD 2020 x"] {
            assert!(decode(label).is_err(), "expected failure for {label:?}");
        }
    }

    #[test]
    fn test_round_trip_without_end_year() {
        for fields in [
            BatchFields::new("PhD", 2020),
            BatchFields::new("Int. MSc.", 2007),
            BatchFields::new("M. Tech 2", 2031),
        ] {
            assert_eq!(decode(&encode(&fields).unwrap()).unwrap(), fields);
        }
    }

    #[test]
    fn test_encode_decode_encode_is_stable() {
        for label in ["Int. MSc. 2017-22", "PhD 2020", "B.Sc. (Hons) 2009-12"] {
            let fields = decode(label).unwrap();
            assert_eq!(encode(&fields).unwrap(), label);
        }
    }

    fn programme_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z.()]{1,8}( [A-Za-z0-9.()]{1,8}){0,2}"
    }

    fn fields_strategy() -> impl Strategy<Value = BatchFields> {
        (programme_strategy(), 2007u16..=2099)
            .prop_flat_map(|(programme, start)| {
                (Just(programme), Just(start), prop::option::of(start..=2099u16))
            })
            .prop_map(|(programme, start, end)| BatchFields {
                programme,
                start_year: start,
                end_year: end,
            })
    }

    proptest! {
        #[test]
        fn test_round_trip_any_fields(fields in fields_strategy()) {
            let label = encode(&fields).unwrap();
            let decoded = decode(&label).unwrap();
            prop_assert_eq!(&decoded, &fields);
            prop_assert_eq!(encode(&decoded).unwrap(), label);
        }

        #[test]
        fn test_encode_output_always_decodes(
            chars in prop::collection::vec(any::<char>(), 1..12),
            start in 2007u16..=2099
        ) {
            let programme: String = chars.into_iter().collect();
            if let Ok(label) = encode(&BatchFields::new(programme, start)) {
                prop_assert!(decode(&label).is_ok(), "label {:?}", label);
            }
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let fields: BatchFields = "Int. MSc. 2017-22".parse().unwrap();
        assert_eq!(fields.to_string(), "Int. MSc. 2017-22");
        assert!("no year".parse::<BatchFields>().is_err());
    }

    #[test]
    fn test_form_from_inputs() {
        let form = BatchForm::from_inputs("Int. MSc.", "2017", "2022").unwrap();
        assert_eq!(form.encode(&years()).unwrap(), "Int. MSc. 2017-22");

        let form = BatchForm::from_inputs("PhD", "2020", "").unwrap();
        assert_eq!(form.end_year, None);
        assert_eq!(form.encode(&years()).unwrap(), "PhD 2020");
    }

    #[test]
    fn test_form_rejects_non_numeric_year() {
        assert_eq!(
            BatchForm::from_inputs("PhD", "twenty", ""),
            Err(EncodeRejected::InvalidYear("twenty".to_string()))
        );
    }

    #[test]
    fn test_form_missing_fields() {
        let form = BatchForm::from_inputs("", "2020", "").unwrap();
        assert_eq!(form.encode(&years()), Err(EncodeRejected::MissingProgramme));

        let form = BatchForm::from_inputs("PhD", "", "2024").unwrap();
        assert_eq!(form.encode(&years()), Err(EncodeRejected::MissingStartYear));

        let form = BatchForm::from_inputs("Int.\nMSc.", "2017", "").unwrap();
        assert_eq!(form.encode(&years()), Err(EncodeRejected::ControlCharacter));
    }

    #[test]
    fn test_form_year_range() {
        let form = BatchForm::from_inputs("PhD", "2006", "").unwrap();
        assert_eq!(
            form.validate(&years()),
            Err(EncodeRejected::YearOutOfRange {
                year: 2006,
                min: 2007,
                max: 2031
            })
        );

        let form = BatchForm::from_inputs("PhD", "2030", "2032").unwrap();
        assert!(matches!(
            form.validate(&years()),
            Err(EncodeRejected::YearOutOfRange { year: 2032, .. })
        ));
    }

    #[test]
    fn test_form_end_before_start() {
        let form = BatchForm::from_inputs("PhD", "2020", "2019").unwrap();
        assert_eq!(
            form.validate(&years()),
            Err(EncodeRejected::EndBeforeStart {
                start: 2020,
                end: 2019
            })
        );
    }

    #[test]
    fn test_form_from_label() {
        let form = BatchForm::from_label("Int. MSc. 2017-22");
        assert_eq!(form.programme, "Int. MSc.");
        assert_eq!(form.start_year, Some(2017));
        assert_eq!(form.end_year, Some(2022));

        assert_eq!(BatchForm::from_label("legacy batch"), BatchForm::default());
    }
}
