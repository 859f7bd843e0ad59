//! One donation submission: validate, format, log, render.

use chrono::Local;
use tracing::{info, warn};

use crate::currency::{Currency, format_amount};
use crate::foundation::error::{CertError, CertResult};
use crate::persist::{DonationLog, DonationRecord, NoopLog};
use crate::render::certificate::Certificate;
use crate::render::cpu::{CertificateRenderer, CertificateRequest};

/// What happened to the donation log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    /// No log is configured.
    Skipped,
    Failed(String),
}

/// What happened to the certificate image.
#[derive(Clone, Debug)]
pub enum RenderOutcome {
    Rendered(Certificate),
    Failed(String),
}

/// Result of a submission that passed validation.
#[derive(Clone, Debug)]
pub struct SubmissionReport {
    pub donor_name: String,
    pub amount_text: String,
    /// Suggested download file name for the PNG.
    pub file_name: String,
    pub persistence: PersistOutcome,
    pub render: RenderOutcome,
}

impl SubmissionReport {
    pub fn certificate(&self) -> Option<&Certificate> {
        match &self.render {
            RenderOutcome::Rendered(cert) => Some(cert),
            RenderOutcome::Failed(_) => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.certificate().is_some()
    }

    pub fn is_persisted(&self) -> bool {
        self.persistence == PersistOutcome::Persisted
    }

    /// Non-fatal problems to show next to the certificate.
    pub fn warnings(&self) -> Vec<String> {
        match &self.persistence {
            PersistOutcome::Failed(msg) => vec![format!("donation was not logged: {msg}")],
            PersistOutcome::Persisted | PersistOutcome::Skipped => Vec::new(),
        }
    }
}

/// Validated form input.
#[derive(Clone, Debug, PartialEq)]
pub struct DonationInput {
    pub donor_name: String,
    pub amount: f64,
    pub currency: Currency,
}

impl DonationInput {
    /// Reject an empty name or a non-positive amount.
    pub fn validate(donor_name: &str, amount: f64, currency: Currency) -> CertResult<Self> {
        let donor_name = donor_name.trim();
        if donor_name.is_empty() {
            return Err(CertError::validation("please enter the donor's name"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CertError::validation(
                "please enter a donation amount greater than zero",
            ));
        }
        Ok(Self {
            donor_name: donor_name.to_string(),
            amount,
            currency,
        })
    }
}

/// Download file name for a donor's certificate.
///
/// Characters that are not valid in file names on common platforms become `_`.
pub fn download_file_name(donor_name: &str) -> String {
    let cleaned: String = donor_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("Appreciation_{cleaned}.png")
}

/// Sequences validation, formatting, logging and rendering for each submission.
///
/// The log is best effort: its failure never stops the certificate from being rendered.
pub struct Orchestrator {
    renderer: CertificateRenderer,
    log: Box<dyn DonationLog>,
}

impl Orchestrator {
    pub fn new(renderer: CertificateRenderer, log: Box<dyn DonationLog>) -> Self {
        Self { renderer, log }
    }

    /// Orchestrator that renders certificates and logs nothing.
    pub fn without_log(renderer: CertificateRenderer) -> Self {
        Self::new(renderer, Box::new(NoopLog))
    }

    /// Run one submission.
    ///
    /// Returns `Err` only for validation failures; everything after validation is reported in
    /// the [`SubmissionReport`].
    #[tracing::instrument(skip(self), fields(log = self.log.name()))]
    pub fn submit(
        &mut self,
        donor_name: &str,
        raw_amount: f64,
        currency: Currency,
    ) -> CertResult<SubmissionReport> {
        let input = DonationInput::validate(donor_name, raw_amount, currency)?;
        let amount_text = format_amount(input.amount, input.currency);
        info!(donor = %input.donor_name, amount = %amount_text, "generating certificate");

        let persistence = self.persist(&input);

        let request = CertificateRequest::new(input.donor_name.clone(), amount_text.clone());
        let render = match self.renderer.render(&request) {
            Ok(cert) => RenderOutcome::Rendered(cert),
            Err(e) => {
                warn!(error = %e, "certificate render failed");
                RenderOutcome::Failed(e.to_string())
            }
        };

        Ok(SubmissionReport {
            file_name: download_file_name(&input.donor_name),
            donor_name: input.donor_name,
            amount_text,
            persistence,
            render,
        })
    }

    fn persist(&mut self, input: &DonationInput) -> PersistOutcome {
        if !self.log.is_enabled() {
            return PersistOutcome::Skipped;
        }
        let record = DonationRecord {
            timestamp: Local::now(),
            donor_name: input.donor_name.clone(),
            amount: input.amount,
            currency: input.currency,
        };
        match self.log.append(&record) {
            Ok(()) => {
                info!(log = self.log.name(), "donation logged");
                PersistOutcome::Persisted
            }
            Err(e) => {
                warn!(log = self.log.name(), error = %e, "donation log append failed");
                PersistOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/submission.rs"]
mod tests;
