//! Donation currencies and amount formatting.

/// The two currencies a donation can be made in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// US dollar, shown with cents.
    Usd,
    /// Cambodian riel, shown as a whole number.
    Khr,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Khr => "KHR",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Khr => "៛",
        }
    }

    /// Label as offered on the donation form; this is what the spreadsheet log records.
    pub fn label(self) -> &'static str {
        match self {
            Currency::Usd => "ដុល្លារ ($)",
            Currency::Khr => "រៀល (៛)",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Format a validated, positive amount for printing on a certificate.
///
/// Dollars keep two decimals; riel drop the fractional part (truncated, not rounded).
pub fn format_amount(amount: f64, currency: Currency) -> String {
    match currency {
        Currency::Usd => {
            let fixed = format!("{amount:.2}");
            let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
            format!("{}.{} {}", group_thousands(int_part), frac_part, currency.symbol())
        }
        Currency::Khr => {
            let whole = format!("{:.0}", amount.trunc());
            format!("{} {}", group_thousands(&whole), currency.symbol())
        }
    }
}

/// Insert `,` between groups of three digits, keeping a leading sign.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../tests/unit/currency.rs"]
mod tests;
