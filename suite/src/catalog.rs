//! Neverallow rule catalog loading.

use std::path::Path;

use log::debug;

use crate::error::CatalogError;

/// An ordered, immutable sequence of neverallow rule expressions.
///
/// Rules are kept verbatim in load order. No uniqueness is enforced:
/// duplicate rules are legal and simply produce duplicate checks
/// downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCatalog {
    rules: Vec<String>,
}

impl RuleCatalog {
    /// Adopt an already-extracted sequence of rule strings verbatim.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleCatalog {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse catalog text in the policy source format the rule list is
    /// scraped from: `#` starts a comment running to end of line, blank
    /// lines are skipped, and a rule continues across physical lines until
    /// its terminating `;`. Continuation lines are joined with single
    /// spaces; the terminator is kept as part of the rule text.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut rules = Vec::new();
        let mut pending = String::new();

        for raw_line in text.lines() {
            let line = match raw_line.find('#') {
                Some(idx) => &raw_line[..idx],
                None => raw_line,
            };
            for segment in line.split_inclusive(';') {
                let terminated = segment.ends_with(';');
                let body = segment.strip_suffix(';').unwrap_or(segment).trim();
                if !body.is_empty() {
                    if !pending.is_empty() {
                        pending.push(' ');
                    }
                    pending.push_str(body);
                }
                if terminated && !pending.is_empty() {
                    pending.push(';');
                    rules.push(std::mem::take(&mut pending));
                }
            }
        }

        if !pending.is_empty() {
            return Err(CatalogError::UnterminatedRule(pending));
        }
        Ok(RuleCatalog { rules })
    }

    /// Load and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&text)?;
        debug!("loaded {} rules from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The rules, in catalog order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(String::as_str)
    }
}
