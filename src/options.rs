use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Settings shared by every binder operation.
///
/// ```yaml
/// normalize_nulls: false
/// locale:
///   decimal_separator: ","
///   group_separator: "."
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
    /// Turn null string fields into empty strings after binding.
    pub normalize_nulls: bool,
    pub locale: Locale,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            normalize_nulls: true,
            locale: Locale::invariant(),
        }
    }
}

impl BindOptions {
    pub fn with_normalize_nulls(mut self, normalize_nulls: bool) -> Self {
        self.normalize_nulls = normalize_nulls;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: BindOptions = serde_yaml::from_str(yaml).context("Parsing bind options")?;
        options.locale.ensure_valid()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening options file {path:?}"))?;
        let options: BindOptions = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing options file {path:?}"))?;
        options
            .locale
            .ensure_valid()
            .with_context(|| format!("Validating locale in {path:?}"))?;
        Ok(options)
    }
}
