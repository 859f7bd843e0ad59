//! donorcert renders donor appreciation certificates.
//!
//! A submission validates the donor's name and amount, formats the amount for the chosen
//! currency, appends a row to an optional donation log and draws both lines of text, centered,
//! onto a fixed certificate template:
//!
//! - Build a [`CertificateRenderer`] from a [`CertificateConfig`]
//! - Wrap it in an [`Orchestrator`] with a [`DonationLog`] ([`NoopLog`] or [`SheetsLog`])
//! - Call [`Orchestrator::submit`] and save the [`Certificate`] from the report
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod currency;
mod foundation;
pub mod persist;
pub mod render;
pub mod submission;

pub use crate::assets::template::TemplateImage;
pub use crate::assets::text::{ResolvedFont, ScriptHint};
pub use crate::config::{AppConfig, CertificateConfig, SheetsConfig, TextSlot};
pub use crate::currency::{Currency, format_amount};
pub use crate::foundation::core::{Rgb8, Size, centered_origin};
pub use crate::foundation::error::{CertError, CertResult};
pub use crate::persist::sheets::SheetsLog;
pub use crate::persist::{DonationLog, DonationRecord, NoopLog};
pub use crate::render::certificate::{Certificate, RenderNotes};
pub use crate::render::cpu::{CertificateRenderer, CertificateRequest};
pub use crate::submission::{
    DonationInput, Orchestrator, PersistOutcome, RenderOutcome, SubmissionReport,
    download_file_name,
};
