//! Waitlist signup contract
//!
//! The page posts a `SignupRequest` to the spreadsheet endpoint, which
//! appends a row and answers with an `Acknowledgment`. `SignupLog` keeps the
//! same append-only contract in memory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spreadsheet header row, written once into an empty sheet
pub const HEADER: [&str; 4] = ["Data", "Kierunkowy", "Numer telefonu", "Zgoda na powiadomienia"];

/// Result string the endpoint uses for a stored row
pub const RESULT_SUCCESS: &str = "success";

#[derive(Debug, Error)]
pub enum WaitlistError {
    #[error("signup field `{0}` is empty")]
    EmptyField(&'static str),
    #[error("malformed acknowledgment: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("endpoint reported `{0}`")]
    Rejected(String),
}

/// Body of the signup POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Country calling code without the plus, e.g. "48"
    pub prefix: String,
    /// Digits of the national number
    pub phone: String,
    /// Opted in to notifications
    pub consent: bool,
}

impl SignupRequest {
    pub fn new(prefix: impl Into<String>, phone: impl Into<String>, consent: bool) -> Self {
        Self {
            prefix: prefix.into(),
            phone: phone.into(),
            consent,
        }
    }

    pub fn validate(&self) -> Result<(), WaitlistError> {
        if self.prefix.trim().is_empty() {
            return Err(WaitlistError::EmptyField("prefix"));
        }
        if self.phone.trim().is_empty() {
            return Err(WaitlistError::EmptyField("phone"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, WaitlistError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Endpoint reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    pub result: String,
    /// 1-based sheet row, header included
    pub row: usize,
}

impl Acknowledgment {
    pub fn success(row: usize) -> Self {
        Self {
            result: RESULT_SUCCESS.to_string(),
            row,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }
}

/// Parse an endpoint reply; only a `success` result counts as delivered.
/// Returns the stored row.
pub fn check_acknowledgment(body: &str) -> Result<usize, WaitlistError> {
    let ack: Acknowledgment = serde_json::from_str(body)?;
    if ack.is_success() {
        Ok(ack.row)
    } else {
        log::warn!("Signup rejected by endpoint: {}", ack.result);
        Err(WaitlistError::Rejected(ack.result))
    }
}

/// Consent as written to the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsentAnswer {
    Tak,
    Nie,
}

impl From<bool> for ConsentAnswer {
    fn from(consent: bool) -> Self {
        if consent { ConsentAnswer::Tak } else { ConsentAnswer::Nie }
    }
}

impl ConsentAnswer {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentAnswer::Tak => "Tak",
            ConsentAnswer::Nie => "Nie",
        }
    }
}

/// One stored signup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRow {
    /// Unix timestamp (ms) when received
    pub timestamp: f64,
    pub prefix: String,
    pub phone: String,
    pub consent: ConsentAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SheetRow {
    Header,
    Signup(SignupRow),
}

impl SheetRow {
    /// Cell values as the sheet shows them
    pub fn cells(&self) -> Vec<String> {
        match self {
            SheetRow::Header => HEADER.iter().map(|s| s.to_string()).collect(),
            SheetRow::Signup(row) => vec![
                row.timestamp.to_string(),
                row.prefix.clone(),
                row.phone.clone(),
                row.consent.as_str().to_string(),
            ],
        }
    }
}

/// Append-only signup sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupLog {
    rows: Vec<SheetRow>,
}

impl SignupLog {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Store a signup received at `timestamp` (Unix ms)
    pub fn append(&mut self, request: &SignupRequest, timestamp: f64) -> Result<Acknowledgment, WaitlistError> {
        request.validate()?;

        if self.rows.is_empty() {
            self.rows.push(SheetRow::Header);
        }
        self.rows.push(SheetRow::Signup(SignupRow {
            timestamp,
            prefix: request.prefix.clone(),
            phone: request.phone.clone(),
            consent: request.consent.into(),
        }));

        let row = self.rows.len();
        log::info!("Signup stored in row {}", row);
        Ok(Acknowledgment::success(row))
    }

    /// Handle a raw POST body, answering with the JSON acknowledgment
    pub fn handle_post(&mut self, body: &str, timestamp: f64) -> Result<String, WaitlistError> {
        let request: SignupRequest = serde_json::from_str(body)?;
        let ack = self.append(&request, timestamp)?;
        Ok(serde_json::to_string(&ack)?)
    }

    /// Rows in insertion order, header first
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Stored signups, header excluded
    pub fn signups(&self) -> impl Iterator<Item = &SignupRow> {
        self.rows.iter().filter_map(|r| match r {
            SheetRow::Signup(row) => Some(row),
            SheetRow::Header => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_append_writes_header() {
        let mut log = SignupLog::new();
        let ack = log
            .append(&SignupRequest::new("48", "600700800", true), 1_700_000_000_000.0)
            .unwrap();
        assert_eq!(ack, Acknowledgment::success(2));
        assert_eq!(log.rows()[0], SheetRow::Header);
        assert_eq!(
            log.rows()[1].cells()[1..],
            ["48".to_string(), "600700800".to_string(), "Tak".to_string()]
        );
    }

    #[test]
    fn test_rows_accumulate() {
        let mut log = SignupLog::new();
        log.append(&SignupRequest::new("48", "111", false), 1.0).unwrap();
        let ack = log.append(&SignupRequest::new("49", "222", true), 2.0).unwrap();
        assert_eq!(ack.row, 3);
        let consents: Vec<_> = log.signups().map(|r| r.consent).collect();
        assert_eq!(consents, vec![ConsentAnswer::Nie, ConsentAnswer::Tak]);
    }

    #[test]
    fn test_empty_phone_rejected_and_not_stored() {
        let mut log = SignupLog::new();
        let err = log.append(&SignupRequest::new("48", "  ", true), 1.0).unwrap_err();
        assert!(matches!(err, WaitlistError::EmptyField("phone")));
        assert!(log.is_empty());
    }

    #[test]
    fn test_handle_post_roundtrip() {
        let mut log = SignupLog::new();
        let body = SignupRequest::new("44", "7700900123", false).to_json().unwrap();
        let reply = log.handle_post(&body, 5.0).unwrap();
        assert_eq!(check_acknowledgment(&reply).unwrap(), 2);
    }

    #[test]
    fn test_wire_shape() {
        let json = SignupRequest::new("48", "123456789", true).to_json().unwrap();
        assert_eq!(json, r#"{"prefix":"48","phone":"123456789","consent":true}"#);
    }

    #[test]
    fn test_check_acknowledgment_requires_success() {
        assert_eq!(check_acknowledgment(r#"{"result":"success","row":7}"#).unwrap(), 7);
        assert!(matches!(
            check_acknowledgment(r#"{"result":"error","row":0}"#),
            Err(WaitlistError::Rejected(r)) if r == "error"
        ));
        assert!(matches!(check_acknowledgment(""), Err(WaitlistError::Malformed(_))));
    }
}
