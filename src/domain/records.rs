//! Source and output row types
//!
//! A `SourceRecord` is one raw row of the LMS extract, keyed by the source
//! column names. An `OutputRecord` is the validated, reshaped row in the HR
//! import schema. Both are cycle-scoped value data: a source row is discarded
//! as soon as it has been converted (or rejected).

use crate::domain::errors::TransformError;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Fixed value for the `COMPLETED_I` output column
pub const COMPLETED_FLAG: &str = "T";

/// Fixed value for the `COURSE_TYPE1` output column
pub const COURSE_TYPE: &str = "On-Line";

/// Fixed value for the `FAIL_I` output column
pub const FAIL_FLAG: &str = "F";

/// Output column order of the HR import schema
///
/// Written explicitly so the header line is present even when every row of a
/// file is dropped by validation.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "PER_REF_NO",
    "TITLE",
    "START_DATE",
    "END_DATE",
    "COMPLETED_I",
    "COURSE_TYPE1",
    "FAIL_I",
];

/// One raw row of the source extract, as named in the LMS export
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    /// Person reference number candidate
    pub username: String,

    /// Course title
    pub coursename: String,

    /// Course start, epoch seconds as base-10 text
    pub timestarted: String,

    /// Course completion, epoch seconds as base-10 text
    pub timecompleted: String,
}

/// One validated row in the HR import schema
///
/// Serialized column order and header names are fixed:
/// `PER_REF_NO,TITLE,START_DATE,END_DATE,COMPLETED_I,COURSE_TYPE1,FAIL_I`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    /// Person reference number, exactly 5 digits
    #[serde(rename = "PER_REF_NO")]
    pub person_ref_no: String,

    /// Course title
    #[serde(rename = "TITLE")]
    pub title: String,

    /// Start date, `yyyyMMdd` in UTC
    #[serde(rename = "START_DATE")]
    pub start_date: String,

    /// End date, `yyyyMMdd` in UTC
    #[serde(rename = "END_DATE")]
    pub end_date: String,

    /// Always "T"
    #[serde(rename = "COMPLETED_I")]
    pub completed_flag: String,

    /// Always "On-Line"
    #[serde(rename = "COURSE_TYPE1")]
    pub course_type: String,

    /// Always "F"
    #[serde(rename = "FAIL_I")]
    pub fail_flag: String,
}

impl SourceRecord {
    /// Converts this raw row into an [`OutputRecord`].
    ///
    /// Epoch fields are converted from base-10 integer text to the UTC
    /// calendar date rendered `yyyyMMdd`. The person reference number is
    /// carried through as-is; validity is a separate question answered by
    /// [`OutputRecord::has_valid_person_ref`].
    ///
    /// # Errors
    ///
    /// Returns an error if either epoch field is non-numeric or outside the
    /// representable date range. The caller decides whether that skips the
    /// row or aborts the file.
    pub fn into_output(self) -> Result<OutputRecord, TransformError> {
        let start_date = epoch_to_date(&self.timestarted)?;
        let end_date = epoch_to_date(&self.timecompleted)?;

        Ok(OutputRecord {
            person_ref_no: self.username,
            title: self.coursename,
            start_date,
            end_date,
            completed_flag: COMPLETED_FLAG.to_string(),
            course_type: COURSE_TYPE.to_string(),
            fail_flag: FAIL_FLAG.to_string(),
        })
    }
}

impl OutputRecord {
    /// Validates the person reference number format.
    ///
    /// A reference number is valid iff it is exactly 5 characters long and
    /// every character is an ASCII digit. Rows failing this rule are dropped
    /// from the output set, never emitted.
    pub fn has_valid_person_ref(&self) -> bool {
        self.person_ref_no.len() == 5
            && self.person_ref_no.chars().all(|c| c.is_ascii_digit())
    }
}

/// Converts epoch seconds (base-10 text) to a `yyyyMMdd` UTC date string
fn epoch_to_date(epoch_text: &str) -> Result<String, TransformError> {
    let secs: i64 = epoch_text.trim().parse().map_err(|_| {
        TransformError::Parse(format!("invalid epoch seconds value: '{epoch_text}'"))
    })?;

    let date_time = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        TransformError::Parse(format!("epoch seconds out of range: {secs}"))
    })?;

    Ok(date_time.format("%Y%m%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn source(username: &str, started: &str, completed: &str) -> SourceRecord {
        SourceRecord {
            username: username.to_string(),
            coursename: "Safety".to_string(),
            timestarted: started.to_string(),
            timecompleted: completed.to_string(),
        }
    }

    #[test]
    fn test_epoch_zero_renders_unix_epoch_date() {
        assert_eq!(epoch_to_date("0").unwrap(), "19700101");
    }

    #[test]
    fn test_epoch_one_day_later() {
        assert_eq!(epoch_to_date("86400").unwrap(), "19700102");
    }

    #[test]
    fn test_epoch_is_rendered_in_utc() {
        // 2021-03-01 23:59:59 UTC
        assert_eq!(epoch_to_date("1614643199").unwrap(), "20210301");
        // one second later rolls the date
        assert_eq!(epoch_to_date("1614643200").unwrap(), "20210302");
    }

    #[test]
    fn test_epoch_non_numeric_is_error() {
        assert!(epoch_to_date("not-a-number").is_err());
        assert!(epoch_to_date("").is_err());
        assert!(epoch_to_date("12.5").is_err());
    }

    #[test]
    fn test_epoch_out_of_range_is_error() {
        assert!(epoch_to_date(&i64::MAX.to_string()).is_err());
    }

    #[test]
    fn test_into_output_maps_fields_and_constants() {
        let record = source("12345", "0", "86400").into_output().unwrap();
        assert_eq!(record.person_ref_no, "12345");
        assert_eq!(record.title, "Safety");
        assert_eq!(record.start_date, "19700101");
        assert_eq!(record.end_date, "19700102");
        assert_eq!(record.completed_flag, "T");
        assert_eq!(record.course_type, "On-Line");
        assert_eq!(record.fail_flag, "F");
    }

    #[test_case("12345", true; "five digits")]
    #[test_case("00000", true; "leading zeros still five digits")]
    #[test_case("1234", false; "too short")]
    #[test_case("123456", false; "too long")]
    #[test_case("12a45", false; "letter in the middle")]
    #[test_case("-1234", false; "sign is not a digit")]
    #[test_case("", false; "empty")]
    #[test_case("１２３４５", false; "non-ascii digits")]
    fn test_person_ref_validation(person_ref: &str, expected: bool) {
        let record = OutputRecord {
            person_ref_no: person_ref.to_string(),
            title: "Safety".to_string(),
            start_date: "19700101".to_string(),
            end_date: "19700102".to_string(),
            completed_flag: COMPLETED_FLAG.to_string(),
            course_type: COURSE_TYPE.to_string(),
            fail_flag: FAIL_FLAG.to_string(),
        };
        assert_eq!(record.has_valid_person_ref(), expected);
    }
}
