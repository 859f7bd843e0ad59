use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::config::SheetsConfig;
use crate::foundation::error::{CertError, CertResult};
use crate::persist::{DonationLog, DonationRecord};

/// Appends donation rows to a Google Sheets spreadsheet through the `values:append` call.
///
/// By default the bearer token is read from the configured environment variable on every append,
/// so a missing credential shows up as a persistence failure for that submission only.
pub struct SheetsLog {
    client: Client,
    append_url: Url,
    token: TokenSource,
}

/// Where the bearer token comes from.
#[derive(Clone, Debug)]
enum TokenSource {
    Env(String),
    Static(String),
}

impl SheetsLog {
    pub fn new(config: SheetsConfig) -> CertResult<Self> {
        config.validate()?;
        let append_url = build_append_url(&config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CertError::persistence(format!("build HTTP client: {e}")))?;
        let token = TokenSource::Env(config.token_env.clone());
        Ok(Self {
            client,
            append_url,
            token,
        })
    }

    /// Use a token handed over by the host instead of the environment.
    pub fn with_token(config: SheetsConfig, token: impl Into<String>) -> CertResult<Self> {
        let mut log = Self::new(config)?;
        log.token = TokenSource::Static(token.into());
        Ok(log)
    }

    /// URL of the append call for the configured sheet and range.
    pub fn append_url(&self) -> &Url {
        &self.append_url
    }

    fn token(&self) -> CertResult<String> {
        let (token, origin) = match &self.token {
            TokenSource::Env(var) => (
                std::env::var(var).ok(),
                format!("environment variable {var}"),
            ),
            TokenSource::Static(token) => {
                (Some(token.clone()), "host-supplied token".to_string())
            }
        };
        match token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(CertError::persistence(format!("no credentials: {origin} is not set"))),
        }
    }
}

impl DonationLog for SheetsLog {
    fn name(&self) -> &'static str {
        "google-sheets"
    }

    fn append(&mut self, record: &DonationRecord) -> CertResult<()> {
        let token = self.token()?;
        let body = serde_json::json!({ "values": [record.to_row()] });
        debug!(url = %self.append_url, "appending donation row");

        let resp = self
            .client
            .post(self.append_url.clone())
            .bearer_auth(token.trim())
            .json(&body)
            .send()
            .map_err(|e| CertError::persistence(format!("append request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().unwrap_or_default();
            return Err(CertError::persistence(format!(
                "append rejected with HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }
        Ok(())
    }
}

/// `{endpoint}/v4/spreadsheets/{id}/values/{range}:append?valueInputOption=USER_ENTERED`, with
/// each path segment percent-encoded.
fn build_append_url(config: &SheetsConfig) -> CertResult<Url> {
    let mut url = Url::parse(&config.endpoint).map_err(|e| {
        CertError::config(format!("sheets.endpoint '{}': {e}", config.endpoint))
    })?;
    url.path_segments_mut()
        .map_err(|()| {
            CertError::config(format!(
                "sheets.endpoint '{}' cannot carry a path",
                config.endpoint
            ))
        })?
        .pop_if_empty()
        .extend([
            "v4",
            "spreadsheets",
            config.spreadsheet_id.as_str(),
            "values",
            &format!("{}:append", config.range),
        ]);
    url.query_pairs_mut()
        .append_pair("valueInputOption", "USER_ENTERED");
    Ok(url)
}

#[cfg(test)]
#[path = "../../tests/unit/persist/sheets.rs"]
mod tests;
