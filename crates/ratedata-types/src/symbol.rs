//! Currency pair symbols.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbols the rate data archive is commonly queried for.
const KNOWN: [&str; 6] = ["AUD_USD", "EUR_USD", "GBP_USD", "NZD_USD", "USD_CAD", "USD_JPY"];

/// Length of an ISO 4217 currency code.
const CODE_LEN: usize = 3;

/// Error for strings that are not a currency pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid symbol {0:?}: expected a currency pair such as EUR_USD")]
pub struct SymbolError(pub String);

/// A currency pair identifier in archive form, e.g. `EUR_USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Returns the symbols offered by default.
    #[must_use]
    pub fn known() -> Vec<Self> {
        KNOWN.iter().map(|s| Self((*s).to_string())).collect()
    }

    /// Returns the archive form, e.g. `EUR_USD`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base currency code.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.0[..CODE_LEN]
    }

    /// Returns the quote currency code.
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.0[CODE_LEN + 1..]
    }

    /// Returns the human-readable name, e.g. `EUR/USD`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.base(), self.quote())
    }
}

impl std::str::FromStr for Symbol {
    type Err = SymbolError;

    /// Accepts `EUR_USD`, `EUR/USD`, `EURUSD` and their lowercase forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let codes: String = upper.chars().filter(|c| !matches!(c, '_' | '/')).collect();
        let separators = upper.len() - codes.len();

        let separator_in_place = upper
            .as_bytes()
            .get(CODE_LEN)
            .is_some_and(|b| matches!(b, b'_' | b'/'));

        let valid = codes.len() == CODE_LEN * 2
            && codes.bytes().all(|b| b.is_ascii_uppercase())
            && (separators == 0 || (separators == 1 && separator_in_place));

        if !valid {
            return Err(SymbolError(s.to_string()));
        }

        Ok(Self(format!("{}_{}", &codes[..CODE_LEN], &codes[CODE_LEN..])))
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Parses a list of symbols, dropping duplicates while keeping order.
///
/// # Errors
///
/// Returns an error if any entry is invalid or the list is empty.
pub fn parse_symbols<I, S>(items: I) -> crate::Result<Vec<Symbol>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut symbols: Vec<Symbol> = Vec::new();
    for item in items {
        let symbol: Symbol = item.as_ref().parse()?;
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }

    if symbols.is_empty() {
        return Err(crate::RatedataError::NoSymbols);
    }
    Ok(symbols)
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
