#![forbid(unsafe_code)]

//! Runtime translation lookup.
//!
//! Resolves dotted keys through per-locale translation trees, falls back to
//! a second locale when the current one lacks a key, selects plural forms
//! with CLDR rules, and substitutes `{{name}}` placeholders.
//!
//! A missing translation is never an error: [`Translator::translate`]
//! returns the key itself, so gaps show up as literal keys in the output.
//! The only fallible operation is [`Translator::change_language`].
//!
//! Build one [`Translator`] at startup and pass it (or a
//! [`SharedTranslator`] handle) to the code that renders text.

pub mod error;
pub mod interpolate;
pub mod plural;
pub mod resolve;
pub mod translator;
pub mod tree;

pub use error::{I18nError, Result};
pub use interpolate::{ParamValue, Params, interpolate};
pub use plural::{
    CldrPluralRules, PluralCategorizer, PluralForm, PluralGroup, context_free_form, select_form,
};
pub use resolve::{Resolved, resolve};
pub use translator::{
    CoverageReport, DEFAULT_LOCALE, LocaleCoverage, Lookup, SharedTranslator, Translator,
    TranslatorConfig,
};
pub use tree::{Resources, TranslationNode, TranslationTree};
