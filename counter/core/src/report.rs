//! Problem Report Composition
//!
//! When rendering faults (panics) are intercepted at the top of the session,
//! the user is offered a pre-filled problem report for the host's mail
//! handler, plus a relaunch. This module composes the report; delivering it
//! is the surface's thin I/O wrapper.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Where reports go.
pub const REPORT_RECIPIENT: &str = "tuandaokeji@outlook.com";

/// Report subject line.
pub const REPORT_SUBJECT: &str = "正字计数应用错误报告 (Zheng Counter Error Report)";

/// An unrecovered rendering fault, caught at the top of the session.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct RenderFault {
    /// Human-readable fault message (the panic payload).
    pub message: String,
    /// Internal diagnostic stack at the fault site.
    pub diagnostic: String,
}

impl RenderFault {
    #[must_use]
    pub fn new(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }
}

/// A fully composed problem report.
#[derive(Clone, Debug)]
pub struct ProblemReport {
    fault: RenderFault,
    /// Host identification string (platform and version).
    host: String,
    timestamp: DateTime<Utc>,
}

impl ProblemReport {
    /// Compose a report for a caught fault, stamped now.
    #[must_use]
    pub fn new(fault: RenderFault) -> Self {
        Self::with_context(
            fault,
            format!(
                "{}/{} zheng-tally {}",
                std::env::consts::OS,
                std::env::consts::ARCH,
                env!("CARGO_PKG_VERSION"),
            ),
            Utc::now(),
        )
    }

    /// Compose with an explicit host string and timestamp (tests).
    #[must_use]
    pub fn with_context(fault: RenderFault, host: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            fault,
            host,
            timestamp,
        }
    }

    /// The report body the user sends.
    #[must_use]
    pub fn body(&self) -> String {
        let mut body = String::from(
            "Hi Developer,\n\nI encountered an error in the Zheng Counter app.\n\n",
        );
        body.push_str("--- Error Details ---\n");
        body.push_str(&format!("Message: {}\n\n", self.fault.message));
        if !self.fault.diagnostic.is_empty() {
            body.push_str(&format!("Diagnostic Stack:\n{}\n\n", self.fault.diagnostic));
        }
        body.push_str(&format!("Host: {}\n", self.host));
        body.push_str(&format!(
            "Time: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        body
    }

    /// `mailto:` URL opening the host's default mail handler pre-filled.
    #[must_use]
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            REPORT_RECIPIENT,
            percent_encode(REPORT_SUBJECT),
            percent_encode(&self.body()),
        )
    }
}

/// RFC 3986 percent-encoding of everything outside the unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_report() -> ProblemReport {
        ProblemReport::with_context(
            RenderFault::new("layer index out of bounds", "0: compositor::blit\n1: app::render"),
            "linux/x86_64 zheng-tally 0.1.0".to_string(),
            Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_body_carries_all_sections() {
        let body = sample_report().body();
        assert!(body.contains("Message: layer index out of bounds"));
        assert!(body.contains("Diagnostic Stack:\n0: compositor::blit"));
        assert!(body.contains("Host: linux/x86_64"));
        assert!(body.contains("Time: 2026-08-30T12:00:00.000Z"));
    }

    #[test]
    fn test_mailto_is_fully_encoded() {
        let url = sample_report().mailto_url();
        assert!(url.starts_with("mailto:tuandaokeji@outlook.com?subject="));
        // No raw spaces or newlines may survive in the URL.
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        assert!(url.contains("%20"));
    }

    #[test]
    fn test_percent_encode_leaves_unreserved_alone() {
        assert_eq!(percent_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("正"), "%E6%AD%A3");
    }

    #[test]
    fn test_empty_diagnostic_is_omitted() {
        let report = ProblemReport::with_context(
            RenderFault::new("boom", ""),
            "host".to_string(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        );
        assert!(!report.body().contains("Diagnostic Stack"));
    }
}
