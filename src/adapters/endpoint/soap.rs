//! SOAP envelope construction and response parsing
//!
//! The conversion service speaks a small fixed SOAP 1.1 dialect: one
//! operation, eight string inputs, four file/queue references plus an error
//! message and an integer result code back. The response is pulled apart
//! with tag extraction rather than a full XML stack; the handful of fields
//! never nest.

use crate::domain::errors::EndpointError;
use crate::domain::outcome::EndpointResult;
use regex::Regex;

/// The remote operation name
pub const OPERATION: &str = "RUN_CONV_NEW";

/// Inputs of one conversion call
#[derive(Debug)]
pub struct ConversionRequest<'a> {
    /// Conversion type tag
    pub conversion_type: &'a str,
    /// Conversion directory (always empty for inline payloads)
    pub directory: &'a str,
    /// The rendered payload text
    pub payload: &'a str,
    /// Key field the endpoint matches people on
    pub key_field: &'a str,
    /// Field separator of the payload
    pub field_separator: &'a str,
    /// Organization name the submission runs under
    pub organization: &'a str,
    /// Service account username
    pub username: &'a str,
    /// Service account password
    pub password: &'a str,
}

/// Builds the SOAP 1.1 request envelope for a conversion call
pub fn build_envelope(request: &ConversionRequest<'_>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <{op}>
      <P_CONV_TYPE>{conv_type}</P_CONV_TYPE>
      <P_CONV_DIR>{dir}</P_CONV_DIR>
      <P_CONV_FILE>{payload}</P_CONV_FILE>
      <P_PEOPLE_ID>{key_field}</P_PEOPLE_ID>
      <P_FS>{fs}</P_FS>
      <P_ORG_NAME>{org}</P_ORG_NAME>
      <P_USER_NM>{user}</P_USER_NM>
      <P_USER_PWD>{pwd}</P_USER_PWD>
    </{op}>
  </soap:Body>
</soap:Envelope>
"#,
        op = OPERATION,
        conv_type = escape_xml(request.conversion_type),
        dir = escape_xml(request.directory),
        payload = escape_xml(request.payload),
        key_field = escape_xml(request.key_field),
        fs = escape_xml(request.field_separator),
        org = escape_xml(request.organization),
        user = escape_xml(request.username),
        pwd = escape_xml(request.password),
    )
}

/// Parses the five output fields and the result code from a response body.
///
/// Field order in the response is not relied on; absent optional fields
/// default to empty strings so the report stays a verbatim pass-through.
///
/// # Errors
///
/// Returns an error if the result code element is missing or non-numeric.
pub fn parse_response(body: &str) -> Result<EndpointResult, EndpointError> {
    let status_text = extract_tag(body, &format!("{OPERATION}Result")).ok_or_else(|| {
        EndpointError::InvalidResponse(format!(
            "response is missing the {OPERATION}Result element"
        ))
    })?;

    let status: i32 = status_text.trim().parse().map_err(|_| {
        EndpointError::InvalidResponse(format!("non-numeric result code: '{status_text}'"))
    })?;

    Ok(EndpointResult {
        status,
        log_file: extract_tag(body, "P_LOG_FILE").unwrap_or_default(),
        exception_file: extract_tag(body, "P_EXC_FILE").unwrap_or_default(),
        success_file: extract_tag(body, "P_SUC_FILE").unwrap_or_default(),
        queue_id: extract_tag(body, "P_QUEUE_ID").unwrap_or_default(),
        error_message: extract_tag(body, "P_ERROR_MSG").unwrap_or_default(),
    })
}

/// Extracts the unescaped text content of the first `<tag>...</tag>` element
fn extract_tag(body: &str, tag: &str) -> Option<String> {
    let pattern = format!(
        r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>",
        tag = regex::escape(tag)
    );
    // The pattern is built from a fixed template and an escaped tag name
    let re = Regex::new(&pattern).expect("valid tag extraction pattern");
    re.captures(body)
        .map(|cap| unescape_xml(cap[1].trim()))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(payload: &'a str) -> ConversionRequest<'a> {
        ConversionRequest {
            conversion_type: "LEARNEVENTS",
            directory: "",
            payload,
            key_field: "PERREF",
            field_separator: ",",
            organization: "Example Org",
            username: "svc",
            password: "secret",
        }
    }

    #[test]
    fn test_envelope_carries_all_inputs() {
        let envelope = build_envelope(&request("PER_REF_NO,TITLE\n12345,Safety\n"));

        assert!(envelope.contains("<P_CONV_TYPE>LEARNEVENTS</P_CONV_TYPE>"));
        assert!(envelope.contains("<P_CONV_DIR></P_CONV_DIR>"));
        assert!(envelope.contains("12345,Safety"));
        assert!(envelope.contains("<P_PEOPLE_ID>PERREF</P_PEOPLE_ID>"));
        assert!(envelope.contains("<P_FS>,</P_FS>"));
        assert!(envelope.contains("<P_ORG_NAME>Example Org</P_ORG_NAME>"));
        assert!(envelope.contains("<P_USER_NM>svc</P_USER_NM>"));
        assert!(envelope.contains("<P_USER_PWD>secret</P_USER_PWD>"));
    }

    #[test]
    fn test_envelope_escapes_payload() {
        let envelope = build_envelope(&request("12345,R&D <Safety>\n"));
        assert!(envelope.contains("12345,R&amp;D &lt;Safety&gt;"));
        assert!(!envelope.contains("R&D <Safety>"));
    }

    #[test]
    fn test_parse_full_response() {
        let body = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <RUN_CONV_NEWResponse>
      <RUN_CONV_NEWResult>0</RUN_CONV_NEWResult>
      <P_LOG_FILE>conv_123.log</P_LOG_FILE>
      <P_EXC_FILE>conv_123.exc</P_EXC_FILE>
      <P_SUC_FILE>conv_123.suc</P_SUC_FILE>
      <P_QUEUE_ID>Q-88421</P_QUEUE_ID>
      <P_ERROR_MSG></P_ERROR_MSG>
    </RUN_CONV_NEWResponse>
  </soap:Body>
</soap:Envelope>"#;

        let result = parse_response(body).unwrap();
        assert_eq!(result.status, 0);
        assert_eq!(result.log_file, "conv_123.log");
        assert_eq!(result.exception_file, "conv_123.exc");
        assert_eq!(result.success_file, "conv_123.suc");
        assert_eq!(result.queue_id, "Q-88421");
        assert_eq!(result.error_message, "");
    }

    #[test]
    fn test_parse_unescapes_error_message() {
        let body = "<RUN_CONV_NEWResult>1</RUN_CONV_NEWResult>\
                    <P_ERROR_MSG>bad &lt;record&gt; &amp; more</P_ERROR_MSG>";
        let result = parse_response(body).unwrap();
        assert_eq!(result.status, 1);
        assert_eq!(result.error_message, "bad <record> & more");
    }

    #[test]
    fn test_parse_missing_result_code_is_invalid() {
        let result = parse_response("<P_QUEUE_ID>Q-1</P_QUEUE_ID>");
        assert!(matches!(result, Err(EndpointError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_non_numeric_result_code_is_invalid() {
        let result = parse_response("<RUN_CONV_NEWResult>ok</RUN_CONV_NEWResult>");
        assert!(matches!(result, Err(EndpointError::InvalidResponse(_))));
    }

    #[test]
    fn test_missing_optional_fields_default_empty() {
        let result = parse_response("<RUN_CONV_NEWResult>3</RUN_CONV_NEWResult>").unwrap();
        assert_eq!(result.status, 3);
        assert_eq!(result.queue_id, "");
        assert_eq!(result.log_file, "");
    }

    #[test]
    fn test_escape_round_trip() {
        let original = r#"a & b < c > d "e" 'f'"#;
        assert_eq!(unescape_xml(&escape_xml(original)), original);
    }
}
