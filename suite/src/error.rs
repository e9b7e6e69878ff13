use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read rule catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unterminated rule at end of catalog (missing ';'): {0}")]
    UnterminatedRule(String),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("rule contains the substitution placeholder {token}: {rule}")]
    PlaceholderCollision { token: &'static str, rule: String },

    #[error("rule cannot be embedded in a raw string literal: {rule}")]
    UnembeddableRule { rule: String },
}
