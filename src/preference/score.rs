//! Raw cell values and their coercion to preference scores.

/// Score marking a conflict of interest.
pub const COI_SCORE: u32 = 0;

/// Score substituted for unranked, blank, or malformed cells.
pub const MISSING_SCORE: u32 = 10;

/// A cell value as extracted by the ingestion layer, before coercion.
///
/// Spreadsheet readers hand back numbers as floats, text as strings, and
/// blank cells as nothing; all three shapes are accepted here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawScore {
    /// Blank or absent cell.
    Empty,
    /// Integer cell.
    Int(i64),
    /// Floating-point cell.
    Float(f64),
    /// Text cell.
    Text(String),
}

/// Outcome of parsing a [`RawScore`].
///
/// Keeps "explicitly ranked low" apart from "malformed input" until the
/// sentinel is substituted in [`ParsedScore::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedScore {
    /// A usable score in `0..=missing`.
    Valid(u32),
    /// Blank, non-numeric, fractional, negative, or out-of-range.
    MissingOrInvalid,
}

impl ParsedScore {
    /// Parses a raw cell against the scale `0..=missing`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::preference::{ParsedScore, RawScore, MISSING_SCORE};
    ///
    /// assert_eq!(ParsedScore::parse(&RawScore::Float(3.0), MISSING_SCORE), ParsedScore::Valid(3));
    /// assert_eq!(ParsedScore::parse(&RawScore::Text(" 0 ".into()), MISSING_SCORE), ParsedScore::Valid(0));
    /// assert_eq!(ParsedScore::parse(&RawScore::Text("n/a".into()), MISSING_SCORE), ParsedScore::MissingOrInvalid);
    /// ```
    pub fn parse(raw: &RawScore, missing: u32) -> Self {
        match raw {
            RawScore::Empty => ParsedScore::MissingOrInvalid,
            RawScore::Int(v) => Self::from_int(*v, missing),
            RawScore::Float(v) => Self::from_float(*v, missing),
            RawScore::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return ParsedScore::MissingOrInvalid;
                }
                if let Ok(v) = s.parse::<i64>() {
                    return Self::from_int(v, missing);
                }
                match s.parse::<f64>() {
                    Ok(v) => Self::from_float(v, missing),
                    Err(_) => ParsedScore::MissingOrInvalid,
                }
            }
        }
    }

    fn from_int(v: i64, missing: u32) -> Self {
        match u32::try_from(v) {
            Ok(n) if n <= missing => ParsedScore::Valid(n),
            _ => ParsedScore::MissingOrInvalid,
        }
    }

    fn from_float(v: f64, missing: u32) -> Self {
        if !v.is_finite() || v.fract() != 0.0 || v < 0.0 || v > f64::from(missing) {
            return ParsedScore::MissingOrInvalid;
        }
        ParsedScore::Valid(v as u32)
    }

    /// Substitutes the missing sentinel for unusable cells.
    pub fn resolve(self, missing: u32) -> u32 {
        match self {
            ParsedScore::Valid(n) => n,
            ParsedScore::MissingOrInvalid => missing,
        }
    }

    /// Returns true if the cell had to be coerced.
    pub fn is_missing(self) -> bool {
        matches!(self, ParsedScore::MissingOrInvalid)
    }
}

impl From<i64> for RawScore {
    fn from(v: i64) -> Self {
        RawScore::Int(v)
    }
}

impl From<i32> for RawScore {
    fn from(v: i32) -> Self {
        RawScore::Int(i64::from(v))
    }
}

impl From<u32> for RawScore {
    fn from(v: u32) -> Self {
        RawScore::Int(i64::from(v))
    }
}

impl From<f64> for RawScore {
    fn from(v: f64) -> Self {
        RawScore::Float(v)
    }
}

impl From<&str> for RawScore {
    fn from(v: &str) -> Self {
        RawScore::Text(v.to_string())
    }
}

impl From<String> for RawScore {
    fn from(v: String) -> Self {
        RawScore::Text(v)
    }
}

impl<T: Into<RawScore>> From<Option<T>> for RawScore {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawScore::Empty, Into::into)
    }
}
