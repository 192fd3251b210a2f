//! UTC date-time with millisecond precision, exposed as the `Date` scalar.
//!
//! Wire form is ISO-8601 with milliseconds and a `Z` suffix, e.g.
//! `2023-10-27T10:00:00.000Z`. Years outside 0000-9999 carry an explicit
//! sign (`+10000-01-01T00:00:00.000Z`, `-0001-01-01T00:00:00.000Z`) and parse
//! back to the same instant.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::scalar::ScalarError;

/// A point in time, truncated to whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// GraphQL name of the scalar.
    pub const SCALAR_NAME: &'static str = "Date";

    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap a date-time, dropping anything below a millisecond.
    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(3))
    }

    /// The wrapped date-time.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Render the wire form.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Parse a date-time string.
    ///
    /// Accepts RFC 3339, a naive date-time (read as UTC) and a bare date
    /// (UTC midnight). The year may be signed and longer than four digits.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::InvalidFormat`] if none of the forms match.
    pub fn parse_str(s: &str) -> Result<Self, ScalarError> {
        parse_datetime(s)
            .map(Self::from_datetime)
            .ok_or_else(|| ScalarError::InvalidFormat {
                scalar: Self::SCALAR_NAME,
                value: s.to_owned(),
            })
    }

    /// Serialize a dynamically-typed value that should hold a date-time.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::TypeMismatch`] unless the value is a string
    /// holding a date-time.
    pub fn serialize_value(value: &Value) -> Result<String, ScalarError> {
        match value {
            Value::String(s) => Self::parse_str(s)
                .map(|ts| ts.to_wire())
                .map_err(|_| ScalarError::type_mismatch(Self::SCALAR_NAME, value)),
            other => Err(ScalarError::type_mismatch(Self::SCALAR_NAME, other)),
        }
    }

    /// Parse a variable value.
    ///
    /// # Errors
    ///
    /// Non-strings are a [`ScalarError::TypeMismatch`]; unparsable strings are
    /// a [`ScalarError::InvalidFormat`].
    pub fn parse_value(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::String(s) => Self::parse_str(s),
            other => Err(ScalarError::type_mismatch(Self::SCALAR_NAME, other)),
        }
    }

    /// Parse an inline literal.
    ///
    /// Literals of any other kind than string yield `None` instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::InvalidFormat`] for an unparsable string.
    pub fn parse_literal(value: &Value) -> Result<Option<Self>, ScalarError> {
        match value {
            Value::String(s) => Self::parse_str(s).map(Some),
            _ => Ok(None),
        }
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // RFC 3339 only knows four-digit years; `%Y` also takes `+10000`/`-0001`.
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    let naive_input = s.strip_suffix('Z').unwrap_or(s);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = String::deserialize(deserializer)?;
        Self::parse_str(&wire).map_err(serde::de::Error::custom)
    }
}

// GraphQL scalar binding (with graphql feature)
//
// async-graphql hands variables and literals to the same `parse`, so both go
// through the stricter variable path.
#[cfg(feature = "graphql")]
#[async_graphql::Scalar(name = "Date")]
impl async_graphql::ScalarType for Timestamp {
    fn parse(value: async_graphql::Value) -> async_graphql::InputValueResult<Self> {
        let wire = value
            .into_json()
            .map_err(async_graphql::InputValueError::custom)?;
        Self::parse_value(&wire).map_err(async_graphql::InputValueError::custom)
    }

    fn to_value(&self) -> async_graphql::Value {
        async_graphql::Value::String(self.to_wire())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_to_wire_format() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap());
        assert_eq!(ts.to_wire(), "2023-10-27T10:00:00.000Z");
    }

    #[test]
    fn test_truncates_to_millis() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ts = Timestamp::from_datetime(base + Duration::nanoseconds(1_234_567));
        assert_eq!(ts.to_wire(), "2024-01-01T00:00:00.001Z");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            Timestamp::now(),
            Timestamp::from_datetime(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()),
            Timestamp::from_datetime(
                Utc.with_ymd_and_hms(2099, 12, 31, 23, 59, 59).unwrap()
                    + Duration::milliseconds(999),
            ),
        ];
        for ts in samples {
            let wire = json!(ts.to_wire());
            assert_eq!(Timestamp::parse_value(&wire).unwrap(), ts);
            assert_eq!(Timestamp::parse_literal(&wire).unwrap(), Some(ts));
        }
    }

    #[test]
    fn test_round_trip_outside_four_digit_years() {
        let far_future =
            Timestamp::from_datetime(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap());
        let before_epoch_zero = Timestamp::from_datetime(
            Utc.with_ymd_and_hms(-1, 6, 15, 12, 30, 0).unwrap() + Duration::milliseconds(250),
        );

        assert!(far_future.to_wire().starts_with('+'));
        assert!(before_epoch_zero.to_wire().starts_with('-'));

        for ts in [far_future, before_epoch_zero] {
            let wire = json!(ts.to_wire());
            assert_eq!(Timestamp::parse_value(&wire).unwrap(), ts, "{wire}");
            assert_eq!(Timestamp::parse_literal(&wire).unwrap(), Some(ts));
            let back: Timestamp = serde_json::from_value(wire).unwrap();
            assert_eq!(back, ts);
        }
    }

    #[test]
    fn test_parse_six_digit_signed_years() {
        assert_eq!(
            Timestamp::parse_str("+010000-01-01T00:00:00.000Z")
                .unwrap()
                .as_datetime(),
            Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            Timestamp::parse_str("-000001-06-15T12:30:00.000Z")
                .unwrap()
                .as_datetime(),
            Utc.with_ymd_and_hms(-1, 6, 15, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_accepted_forms() {
        let midnight = Utc.with_ymd_and_hms(2023, 10, 27, 0, 0, 0).unwrap();
        assert_eq!(
            Timestamp::parse_str("2023-10-27").unwrap().as_datetime(),
            midnight
        );
        assert_eq!(
            Timestamp::parse_str("2023-10-27T02:00:00+02:00")
                .unwrap()
                .as_datetime(),
            midnight
        );
        assert_eq!(
            Timestamp::parse_str("2023-10-27T00:00:00").unwrap().as_datetime(),
            midnight
        );
        assert_eq!(
            Timestamp::parse_str("2023-10-27 00:00:00.000").unwrap().as_datetime(),
            midnight
        );
    }

    #[test]
    fn test_parse_value_errors() {
        assert!(matches!(
            Timestamp::parse_value(&json!("not a date")),
            Err(ScalarError::InvalidFormat { .. })
        ));
        assert_eq!(
            Timestamp::parse_value(&json!(1_698_400_800_000_i64)),
            Err(ScalarError::TypeMismatch {
                scalar: "Date",
                found: "number"
            })
        );
    }

    #[test]
    fn test_parse_literal_is_lenient_on_kind() {
        assert_eq!(Timestamp::parse_literal(&json!(42)).unwrap(), None);
        assert_eq!(Timestamp::parse_literal(&json!(true)).unwrap(), None);
        assert!(matches!(
            Timestamp::parse_literal(&json!("2023-13-45")),
            Err(ScalarError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_serialize_value() {
        assert_eq!(
            Timestamp::serialize_value(&json!("2023-10-27T10:00:00Z")).unwrap(),
            "2023-10-27T10:00:00.000Z"
        );
        assert!(matches!(
            Timestamp::serialize_value(&json!(5)),
            Err(ScalarError::TypeMismatch { found: "number", .. })
        ));
        assert!(matches!(
            Timestamp::serialize_value(&json!("yesterday")),
            Err(ScalarError::TypeMismatch { found: "string", .. })
        ));
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2023-10-27T10:00:00.000Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
