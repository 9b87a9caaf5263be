//! Explicit number formatting conventions used when converting text.
//!
//! Nothing here reads process or thread locale state; callers pass a
//! [`Locale`] through [`BindOptions`](crate::options::BindOptions).

use anyhow::{Result, ensure};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub decimal_separator: char,
    pub group_separator: Option<char>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

impl Locale {
    pub const fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }

    /// Comma decimals with dot grouping, e.g. `1.234,5`.
    pub const fn comma_decimal() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: Some('.'),
        }
    }

    pub fn new(decimal_separator: char, group_separator: Option<char>) -> Result<Self> {
        let locale = Self {
            decimal_separator,
            group_separator,
        };
        locale.ensure_valid()?;
        Ok(locale)
    }

    pub fn ensure_valid(&self) -> Result<()> {
        ensure!(
            is_separator_candidate(self.decimal_separator),
            "Decimal separator '{}' must not be a digit, sign, or whitespace",
            self.decimal_separator
        );
        if let Some(group) = self.group_separator {
            ensure!(
                is_separator_candidate(group) || group == ' ',
                "Group separator '{group}' must not be a digit or sign"
            );
            ensure!(
                group != self.decimal_separator,
                "Group and decimal separators must differ (both '{group}')"
            );
        }
        Ok(())
    }

    /// Parses an integer literal: optional sign, digits, no separators.
    pub fn parse_integer(&self, text: &str) -> Result<i64, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("value is empty".to_string());
        }
        trimmed
            .parse::<i64>()
            .map_err(|err| format!("not an integer ({err})"))
    }

    pub fn parse_float(&self, text: &str) -> Result<f64, String> {
        let canonical = self.canonical_number(text)?;
        canonical
            .parse::<f64>()
            .map_err(|err| format!("not a number ({err})"))
    }

    pub fn parse_decimal(&self, text: &str) -> Result<Decimal, String> {
        let canonical = self.canonical_number(text)?;
        canonical
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&canonical))
            .map_err(|err| format!("not a decimal ({err})"))
    }

    /// Renders invariant numeric text (`.` decimal point) in this locale.
    pub fn format_number(&self, invariant: &str) -> String {
        if self.decimal_separator == '.' {
            invariant.to_string()
        } else {
            invariant.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// Rewrites locale numeric text into the invariant form Rust parsers accept.
    fn canonical_number(&self, text: &str) -> Result<String, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("value is empty".to_string());
        }
        let mut canonical = String::with_capacity(trimmed.len());
        let mut seen_decimal = false;
        for ch in trimmed.chars() {
            if ch == self.decimal_separator {
                if seen_decimal {
                    return Err(format!(
                        "more than one decimal separator '{}'",
                        self.decimal_separator
                    ));
                }
                seen_decimal = true;
                canonical.push('.');
            } else if Some(ch) == self.group_separator {
                if seen_decimal {
                    return Err("group separator after the decimal separator".to_string());
                }
            } else if ch.is_ascii_digit() || matches!(ch, '+' | '-' | 'e' | 'E') {
                canonical.push(ch);
            } else {
                return Err(format!("contains unsupported character '{ch}'"));
            }
        }
        Ok(canonical)
    }
}

fn is_separator_candidate(ch: char) -> bool {
    !(ch.is_ascii_digit() || ch.is_whitespace() || matches!(ch, '+' | '-' | 'e' | 'E'))
}
