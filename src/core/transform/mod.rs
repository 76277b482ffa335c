//! Record validation and reshaping
//!
//! Reads the downloaded extract as header-tagged CSV, converts each row into
//! the HR import schema, drops rows that fail validation, and renders the
//! accepted set both to a local output file and to the in-memory payload that
//! is handed to the endpoint invoker. Row order is preserved.
//!
//! Per-row policy: a row whose person reference number is malformed, or whose
//! epoch fields do not convert, is skipped with a warning. Only file-level
//! parse and I/O errors abort the stage.

use crate::domain::errors::TransformError;
use crate::domain::records::{OutputRecord, SourceRecord, OUTPUT_COLUMNS};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of transforming one extract file
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// The full rendered payload, header line included
    pub rendered: String,

    /// Path the rendered payload was written to
    pub output_path: PathBuf,

    /// Number of rows that passed validation
    pub accepted: usize,

    /// Number of rows dropped by validation or conversion
    pub skipped: usize,
}

/// Validates and reshapes extract rows into the HR import schema
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    output_dir: PathBuf,
}

impl RecordTransformer {
    /// Creates a transformer writing output files under `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Transforms the extract at `input` into the rendered output payload.
    ///
    /// The output file is named with an `itrent ` prefix plus the dated
    /// source filename and written under the configured output directory.
    /// The same serialized text is returned for submission to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the source file cannot be read or parsed as CSV,
    /// or if the output file cannot be written. Individual invalid rows are
    /// skipped, never fatal.
    pub fn transform(
        &self,
        input: &Path,
        file_name: &str,
    ) -> Result<TransformOutput, TransformError> {
        let mut reader = csv::Reader::from_path(input).map_err(|e| {
            TransformError::Io(format!("failed to open {}: {}", input.display(), e))
        })?;

        let mut accepted: Vec<OutputRecord> = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in reader.deserialize::<SourceRecord>().enumerate() {
            // Row numbers are 1-based and exclude the header line
            let row_number = index + 1;
            let source = row?;

            let record = match source.into_output() {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(row = row_number, error = %e, "Skipping row: date conversion failed");
                    skipped += 1;
                    continue;
                }
            };

            if !record.has_valid_person_ref() {
                tracing::warn!(
                    row = row_number,
                    person_ref_no = %record.person_ref_no,
                    "Skipping row: invalid person reference number"
                );
                skipped += 1;
                continue;
            }

            accepted.push(record);
        }

        let rendered = render(&accepted)?;

        let output_path = self.output_dir.join(format!("itrent {file_name}"));
        fs::write(&output_path, &rendered).map_err(|e| {
            TransformError::Io(format!(
                "failed to write output file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        tracing::info!(
            accepted = accepted.len(),
            skipped,
            output = %output_path.display(),
            "Transform complete"
        );

        Ok(TransformOutput {
            rendered,
            output_path,
            accepted: accepted.len(),
            skipped,
        })
    }
}

/// Serializes the accepted set with the fixed 7-column header.
///
/// The header is written explicitly so it is present even when the accepted
/// set is empty.
fn render(records: &[OutputRecord]) -> Result<String, TransformError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TransformError::Io(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| TransformError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "PER_REF_NO,TITLE,START_DATE,END_DATE,COMPLETED_I,COURSE_TYPE1,FAIL_I\n";

    fn write_source(dir: &TempDir, file_name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(file_name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn transform(body: &str) -> (TransformOutput, TempDir) {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir, "2024-05-01.csv", body);
        let transformer = RecordTransformer::new(dir.path());
        let output = transformer.transform(&input, "2024-05-01.csv").unwrap();
        (output, dir)
    }

    #[test]
    fn test_end_to_end_single_valid_row() {
        let (output, _dir) = transform(
            "username,coursename,timestarted,timecompleted\n12345,Safety,0,86400\n",
        );

        assert_eq!(
            output.rendered,
            format!("{HEADER}12345,Safety,19700101,19700102,T,On-Line,F\n")
        );
        assert_eq!(output.accepted, 1);
        assert_eq!(output.skipped, 0);
    }

    #[test]
    fn test_invalid_person_ref_rows_are_dropped() {
        let (output, _dir) = transform(
            "username,coursename,timestarted,timecompleted\n\
             1234,Short,0,0\n\
             123456,Long,0,0\n\
             12a45,Letters,0,0\n\
             54321,Valid,0,0\n",
        );

        assert_eq!(output.accepted, 1);
        assert_eq!(output.skipped, 3);
        assert!(output.rendered.contains("54321,Valid"));
        assert!(!output.rendered.contains("Short"));
        assert!(!output.rendered.contains("Long"));
        assert!(!output.rendered.contains("Letters"));
    }

    #[test]
    fn test_bad_epoch_row_is_skipped_not_fatal() {
        let (output, _dir) = transform(
            "username,coursename,timestarted,timecompleted\n\
             11111,BadStart,oops,86400\n\
             22222,Good,0,86400\n",
        );

        assert_eq!(output.accepted, 1);
        assert_eq!(output.skipped, 1);
        assert!(output.rendered.contains("22222,Good"));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let (output, _dir) = transform(
            "username,coursename,timestarted,timecompleted\n\
             33333,Third,0,0\n\
             11111,First,0,0\n\
             22222,Second,0,0\n",
        );

        let third = output.rendered.find("33333").unwrap();
        let first = output.rendered.find("11111").unwrap();
        let second = output.rendered.find("22222").unwrap();
        assert!(third < first && first < second);
    }

    #[test]
    fn test_all_rows_dropped_still_renders_header() {
        let (output, _dir) = transform(
            "username,coursename,timestarted,timecompleted\nabc,NotValid,0,0\n",
        );

        assert_eq!(output.rendered, HEADER);
        assert_eq!(output.accepted, 0);
        assert_eq!(output.skipped, 1);
    }

    #[test]
    fn test_output_file_written_with_prefix() {
        let (output, dir) = transform(
            "username,coursename,timestarted,timecompleted\n12345,Safety,0,86400\n",
        );

        assert_eq!(output.output_path, dir.path().join("itrent 2024-05-01.csv"));
        let written = fs::read_to_string(&output.output_path).unwrap();
        assert_eq!(written, output.rendered);
    }

    #[test]
    fn test_missing_source_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let transformer = RecordTransformer::new(dir.path());
        let result = transformer.transform(&dir.path().join("absent.csv"), "absent.csv");
        assert!(matches!(result, Err(TransformError::Io(_))));
    }

    #[test]
    fn test_missing_column_aborts_the_file() {
        let dir = TempDir::new().unwrap();
        let input = write_source(
            &dir,
            "2024-05-01.csv",
            "username,coursename,timestarted\n12345,Safety,0\n",
        );
        let transformer = RecordTransformer::new(dir.path());
        let result = transformer.transform(&input, "2024-05-01.csv");
        assert!(matches!(result, Err(TransformError::Parse(_))));
    }

    #[test]
    fn test_title_with_comma_is_quoted() {
        let (output, _dir) = transform(
            "username,coursename,timestarted,timecompleted\n12345,\"Health, Safety\",0,0\n",
        );

        assert!(output.rendered.contains("\"Health, Safety\""));
    }
}
