//! Deterministic rewriting of compliance text into client-readable language
//!
//! Text written by compliance teams is run through four rule-driven stages:
//!
//! 1. **Jargon**: technical terms become plain words ("KYC" → "identity check")
//! 2. **Tone**: imperative or legal phrasing is softened, then stock
//!    boilerplate fragments are rewritten
//! 3. **Documents**: document names are expanded into what the client should
//!    actually send
//! 4. **Sentences**: sentences over the word threshold are split at a
//!    conjunction or semicolon near their middle
//!
//! All rules live in one [`RuleSet`], loaded from TOML and validated up front.
//! Rewriting itself never fails and is idempotent: feeding the output back in
//! returns it unchanged.
//!
//! # Example
//!
//! ```rust
//! use clearspeak_core::{RuleSet, Simplifier};
//!
//! let rules = RuleSet::builder()
//!     .jargon("kyc", "identity check")
//!     .tone("you must submit", "please share")
//!     .document("passport", "a copy of your passport")
//!     .max_sentence_length(20)
//!     .build()
//!     .unwrap();
//!
//! let simplifier = Simplifier::new(rules);
//! let out = simplifier.simplify("KYC: you must submit passport.");
//! assert_eq!(out, "Identity check: please share a copy of your passport.");
//! assert_eq!(simplifier.simplify(&out), out);
//! ```

pub mod documents;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod sentence;
pub mod tables;
pub mod tone;

pub use documents::DocumentNameExpander;
pub use engine::Simplifier;
pub use error::{ConfigError, Result};
pub use matcher::Matcher;
pub use rules::{Category, Mapping, RuleConfig, RuleSet, RuleSetBuilder};
pub use sentence::SentenceSimplifier;
pub use tone::ToneNormalizer;
