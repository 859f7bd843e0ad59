//! Certificate and submission configuration.
//!
//! Configuration is an explicit, immutable value handed to the renderer and the orchestrator at
//! construction. Every field has a default, so an empty JSON object is a valid configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{CertError, CertResult};

/// Placement and styling of one centered line of text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextSlot {
    /// Top of the line box, in template pixels.
    pub y: f32,
    /// Font size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgb8,
}

impl TextSlot {
    fn validate(&self, what: &str) -> CertResult<()> {
        if !self.y.is_finite() {
            return Err(CertError::config(format!("{what}.y must be finite")));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(CertError::config(format!(
                "{what}.size_px must be finite and > 0"
            )));
        }
        Ok(())
    }
}

/// Renderer configuration: assets, coordinates, colors and sizes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertificateConfig {
    /// Background template image.
    pub template_path: PathBuf,
    /// Font used for both lines. Optional at runtime: a missing file falls back to the default
    /// font.
    pub font_path: Option<PathBuf>,
    /// BCP-47 language tag used as the shaping hint, e.g. `km`.
    pub script_hint: Option<String>,
    pub name: TextSlot,
    pub amount: TextSlot,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("appreciation_template.png"),
            font_path: Some(PathBuf::from("KhmerOSmuollight.ttf")),
            script_hint: Some("km".to_string()),
            name: TextSlot {
                y: 780.0,
                size_px: 50.0,
                color: Rgb8::new(50, 89, 158),
            },
            amount: TextSlot {
                y: 850.0,
                size_px: 50.0,
                color: Rgb8::new(192, 57, 43),
            },
        }
    }
}

impl CertificateConfig {
    pub fn validate(&self) -> CertResult<()> {
        if self.template_path.as_os_str().is_empty() {
            return Err(CertError::config("template_path must be non-empty"));
        }
        self.name.validate("name")?;
        self.amount.validate("amount")?;
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.template_path = resolve(base, &self.template_path);
        self.font_path = self.font_path.as_deref().map(|p| resolve(base, p));
    }
}

/// Spreadsheet log settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// A1 range the rows are appended after.
    #[serde(default = "SheetsConfig::default_range")]
    pub range: String,
    /// API base URL; overridable for self-hosted proxies and tests.
    #[serde(default = "SheetsConfig::default_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the bearer token.
    #[serde(default = "SheetsConfig::default_token_env")]
    pub token_env: String,
    #[serde(default = "SheetsConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: Self::default_range(),
            endpoint: Self::default_endpoint(),
            token_env: Self::default_token_env(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }

    fn default_range() -> String {
        "Sheet1!A:D".to_string()
    }

    fn default_endpoint() -> String {
        "https://sheets.googleapis.com".to_string()
    }

    fn default_token_env() -> String {
        "DONORCERT_SHEETS_TOKEN".to_string()
    }

    fn default_timeout_ms() -> u64 {
        10_000
    }

    pub fn validate(&self) -> CertResult<()> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(CertError::config("sheets.spreadsheet_id must be non-empty"));
        }
        if self.range.trim().is_empty() {
            return Err(CertError::config("sheets.range must be non-empty"));
        }
        if self.token_env.trim().is_empty() {
            return Err(CertError::config("sheets.token_env must be non-empty"));
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub certificate: CertificateConfig,
    /// Absent means submissions are not logged.
    pub sheets: Option<SheetsConfig>,
}

impl AppConfig {
    /// Parse a configuration from a JSON reader. Relative paths are kept as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> CertResult<Self> {
        let cfg: AppConfig = serde_json::from_reader(r)
            .map_err(|e| CertError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration file; relative asset paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> CertResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CertError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.certificate.resolve_paths(base);
        Ok(cfg)
    }

    pub fn validate(&self) -> CertResult<()> {
        self.certificate.validate()?;
        if let Some(sheets) = &self.sheets {
            sheets.validate()?;
        }
        Ok(())
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
