//! Neverallow compliance suite generation.
//!
//! This crate turns an ordered catalog of SELinux neverallow rule
//! expressions into a compliance-test suite: first into per-rule test-case
//! descriptors (one check per rule, catalog order preserved), and
//! optionally into a single generated Rust test document that embeds each
//! rule verbatim.
//!
//! # Example
//!
//! ```
//! use sepolcheck_suite::{cases, generate, RuleCatalog};
//!
//! let catalog = RuleCatalog::parse(
//!     "# core guarantees\n\
//!      neverallow domain file:file execute_no_trans;\n",
//! )
//! .unwrap();
//!
//! let suite = cases(&catalog);
//! assert_eq!(suite.len(), 1);
//! assert_eq!(suite[0].name, "neverallow_rule_001");
//!
//! let document = generate(&catalog).unwrap();
//! assert!(document.contains("neverallow domain file:file execute_no_trans;"));
//! ```

mod case;
mod catalog;
mod error;
mod template;


pub use case::{cases, TestCase};
pub use catalog::RuleCatalog;
pub use error::{CatalogError, GenerationError};
pub use template::{generate, NAME_PLACEHOLDER, RULE_PLACEHOLDER};
