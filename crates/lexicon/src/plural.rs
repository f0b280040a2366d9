//! CLDR plural rules and plural-form selection.
//!
//! A [`PluralCategorizer`] maps a count and a locale to a [`PluralForm`];
//! [`select_form`] then reduces a [`PluralGroup`] to a single string. The
//! default categorizer, [`CldrPluralRules`], evaluates the Unicode CLDR
//! cardinal rules through ICU4X compiled data.
//!
//! # Invariants
//!
//! 1. When the categorizer cannot answer, [`context_free_form`] does.
//! 2. [`PluralGroup::select`] never fails: exact form, then `other`, then the
//!    first form in canonical order, then the empty string. Empty strings are
//!    skipped by the first two steps only.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};

use crate::error::I18nError;

/// CLDR plural categories, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PluralForm {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralForm {
    /// Every form, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    /// Lowercase CLDR name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralForm {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|form| form.as_str() == s)
            .ok_or_else(|| I18nError::UnknownPluralForm(s.to_string()))
    }
}

/// Plural variants of one message, keyed by form.
///
/// Any subset of the six forms may be present. Iteration follows the
/// canonical form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralGroup {
    forms: BTreeMap<PluralForm, String>,
}

impl PluralGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string for `form`, replacing any previous one.
    pub fn insert(&mut self, form: PluralForm, text: impl Into<String>) {
        self.forms.insert(form, text.into());
    }

    /// Builder variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, form: PluralForm, text: impl Into<String>) -> Self {
        self.insert(form, text);
        self
    }

    #[must_use]
    pub fn zero(self, text: impl Into<String>) -> Self {
        self.with(PluralForm::Zero, text)
    }

    #[must_use]
    pub fn one(self, text: impl Into<String>) -> Self {
        self.with(PluralForm::One, text)
    }

    #[must_use]
    pub fn two(self, text: impl Into<String>) -> Self {
        self.with(PluralForm::Two, text)
    }

    #[must_use]
    pub fn few(self, text: impl Into<String>) -> Self {
        self.with(PluralForm::Few, text)
    }

    #[must_use]
    pub fn many(self, text: impl Into<String>) -> Self {
        self.with(PluralForm::Many, text)
    }

    #[must_use]
    pub fn other(self, text: impl Into<String>) -> Self {
        self.with(PluralForm::Other, text)
    }

    /// The string stored for exactly `form`, if any.
    #[must_use]
    pub fn get(&self, form: PluralForm) -> Option<&str> {
        self.forms.get(&form).map(String::as_str)
    }

    /// Number of forms present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Iterate over present forms in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PluralForm, &str)> {
        self.forms.iter().map(|(form, text)| (*form, text.as_str()))
    }

    /// Select the string for `form`.
    ///
    /// Falls back to a non-empty `other`, then to the first form in
    /// canonical order (even if empty), then to `""`.
    #[must_use]
    pub fn select(&self, form: PluralForm) -> &str {
        let present = move |form: PluralForm| self.get(form).filter(|text| !text.is_empty());
        present(form)
            .or_else(|| present(PluralForm::Other))
            .or_else(|| self.forms.values().next().map(String::as_str))
            .unwrap_or("")
    }
}

impl FromIterator<(PluralForm, String)> for PluralGroup {
    fn from_iter<I: IntoIterator<Item = (PluralForm, String)>>(iter: I) -> Self {
        Self {
            forms: iter.into_iter().collect(),
        }
    }
}

/// Maps a count in a locale to a plural form.
///
/// Returning `None` means the categorizer has no data for this input; the
/// caller then uses [`context_free_form`].
///
/// Any `Fn(f64, &str) -> PluralForm` closure is a categorizer that always
/// answers.
pub trait PluralCategorizer: Send + Sync {
    fn categorize(&self, count: f64, locale: &str) -> Option<PluralForm>;
}

impl<F> PluralCategorizer for F
where
    F: Fn(f64, &str) -> PluralForm + Send + Sync,
{
    fn categorize(&self, count: f64, locale: &str) -> Option<PluralForm> {
        Some(self(count, locale))
    }
}

/// Default categorizer: CLDR cardinal rules from ICU4X compiled data.
///
/// Answers `None` when the locale tag does not parse, when no rules can be
/// loaded for it, or when the count is not a finite number that fits the
/// plural operands. Well-formed tags for languages without their own rules
/// resolve through locale fallback to the CLDR root rules, where every
/// count is `other`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPluralRules;

impl PluralCategorizer for CldrPluralRules {
    fn categorize(&self, count: f64, locale: &str) -> Option<PluralForm> {
        let operands = plural_operands(count)?;
        let locale: Locale = locale.replace('_', "-").parse().ok()?;
        let rules = PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()?;
        Some(rules.category_for(operands).into())
    }
}

/// Operands of `|count|` formatted with at most three fraction digits and
/// no trailing zeros, the default for number formatting.
fn plural_operands(count: f64) -> Option<PluralOperands> {
    if !count.is_finite() {
        return None;
    }
    let text = format!("{:.3}", count.abs());
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.parse().ok()
}

impl From<PluralCategory> for PluralForm {
    fn from(category: PluralCategory) -> Self {
        match category {
            PluralCategory::Zero => Self::Zero,
            PluralCategory::One => Self::One,
            PluralCategory::Two => Self::Two,
            PluralCategory::Few => Self::Few,
            PluralCategory::Many => Self::Many,
            PluralCategory::Other => Self::Other,
        }
    }
}

/// Last-resort rule used when no locale data applies: `0 → zero`,
/// `1 → one`, anything else `other`.
#[must_use]
pub fn context_free_form(count: f64) -> PluralForm {
    if count == 0.0 {
        PluralForm::Zero
    } else if count == 1.0 {
        PluralForm::One
    } else {
        PluralForm::Other
    }
}

/// Reduce `group` to one string for `count` in `locale`.
#[must_use]
pub fn select_form<'a>(
    count: f64,
    locale: &str,
    group: &'a PluralGroup,
    categorizer: &dyn PluralCategorizer,
) -> &'a str {
    let form = categorizer
        .categorize(count, locale)
        .unwrap_or_else(|| context_free_form(count));
    group.select(form)
}
