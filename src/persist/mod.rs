//! Donation log collaborators.
//!
//! A submission appends exactly one [`DonationRecord`] per accepted donation. Failures are the
//! caller's to downgrade into warnings; implementations never retry.

pub mod sheets;

use chrono::{DateTime, Local};

use crate::currency::Currency;
use crate::foundation::error::CertResult;

/// Timestamp layout written to the log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the donation log.
#[derive(Clone, Debug, PartialEq)]
pub struct DonationRecord {
    pub timestamp: DateTime<Local>,
    pub donor_name: String,
    pub amount: f64,
    pub currency: Currency,
}

impl DonationRecord {
    /// The four cells appended to the sheet, in column order.
    pub fn to_row(&self) -> [serde_json::Value; 4] {
        [
            serde_json::Value::from(self.timestamp.format(TIMESTAMP_FORMAT).to_string()),
            serde_json::Value::from(self.donor_name.clone()),
            serde_json::Value::from(self.amount),
            serde_json::Value::from(self.currency.label()),
        ]
    }
}

/// Append-only sink for donation records.
pub trait DonationLog {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether records are actually stored anywhere.
    fn is_enabled(&self) -> bool {
        true
    }

    fn append(&mut self, record: &DonationRecord) -> CertResult<()>;
}

/// Log that drops every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLog;

impl DonationLog for NoopLog {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn append(&mut self, _record: &DonationRecord) -> CertResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/mod.rs"]
mod tests;
