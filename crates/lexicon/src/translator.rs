//! The translator: configuration, locale switching, and key translation.
//!
//! # Invariants
//!
//! 1. **Configuration is wholesale**: [`Translator::configure`] replaces the
//!    resources, all three locales, and the plural rule together, and resets
//!    the current locale to the default one.
//!
//! 2. **Lookup walks at most two locales**: the current locale, then the
//!    fallback locale when it differs.
//!
//! 3. **Plural forms follow the current locale**, even when the string came
//!    from the fallback locale.
//!
//! 4. **Translation never fails**: a miss yields the key itself.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key in neither locale | Returns the key |
//! | Wrong shape | Key names a subtree, or a plural group without `count` | Returns the key |
//! | Unknown placeholder | `{{name}}` but no `name` param | Placeholder left as-is |
//! | Unconfigured | No resources loaded | Every lookup returns the key |
//! | Unknown language | `change_language` to an unconfigured locale | [`I18nError::LocaleNotFound`], state unchanged |

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace, warn};

use crate::error::{I18nError, Result};
use crate::interpolate::{Params, interpolate};
use crate::plural::{CldrPluralRules, PluralCategorizer, PluralForm, select_form};
use crate::resolve::{Resolved, resolve};
use crate::tree::Resources;

/// Locale used when the configuration names none.
pub const DEFAULT_LOCALE: &str = "en";

/// Everything [`Translator::configure`] installs in one step.
///
/// ```
/// use lexicon::{PluralForm, Resources, TranslationTree, TranslatorConfig};
///
/// let config = TranslatorConfig::new(
///     Resources::new().with_locale("en", TranslationTree::new().text("hi", "Hi")),
/// )
/// .default_locale("en")
/// .plural_rule(|count, _locale| {
///     if count == 1.0 { PluralForm::One } else { PluralForm::Other }
/// });
/// ```
#[derive(Clone)]
pub struct TranslatorConfig {
    resources: Resources,
    default_locale: Option<String>,
    fallback_locale: Option<String>,
    categorizer: Option<Arc<dyn PluralCategorizer>>,
}

impl TranslatorConfig {
    #[must_use]
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            default_locale: None,
            fallback_locale: None,
            categorizer: None,
        }
    }

    /// Initial current locale. Defaults to [`DEFAULT_LOCALE`].
    ///
    /// Not checked against the resources; an unknown default simply misses.
    #[must_use]
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Locale tried when the current one lacks a key. Defaults to the
    /// default locale.
    #[must_use]
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    /// Use a custom `(count, locale) -> form` rule instead of the CLDR rules.
    #[must_use]
    pub fn plural_rule<F>(self, rule: F) -> Self
    where
        F: Fn(f64, &str) -> PluralForm + Send + Sync + 'static,
    {
        self.categorizer(rule)
    }

    /// Use any [`PluralCategorizer`] for plural selection.
    #[must_use]
    pub fn categorizer(mut self, categorizer: impl PluralCategorizer + 'static) -> Self {
        self.categorizer = Some(Arc::new(categorizer));
        self
    }
}

impl From<Resources> for TranslatorConfig {
    fn from(resources: Resources) -> Self {
        Self::new(resources)
    }
}

impl fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("locales", &self.resources.locales().collect::<Vec<_>>())
            .field("default_locale", &self.default_locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("custom_plural_rule", &self.categorizer.is_some())
            .finish()
    }
}

/// Result of a lookup before the missing-key policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Resolved, plural-reduced, and interpolated text.
    Found(String),
    /// No usable string in the current or fallback locale.
    Missing,
}

impl Lookup {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found text, or `key` verbatim on a miss.
    #[must_use]
    pub fn unwrap_or_key(self, key: &str) -> String {
        match self {
            Self::Found(text) => text,
            Self::Missing => key.to_string(),
        }
    }
}

/// Resolves dotted keys to localized, pluralized, interpolated strings.
///
/// # Example
///
/// ```
/// use lexicon::{Params, PluralGroup, Resources, TranslationTree, Translator, TranslatorConfig};
///
/// let en = TranslationTree::new()
///     .text("greeting", "Hello, World!")
///     .text("welcome", "Welcome, {{name}}!")
///     .plural("items", PluralGroup::new().one("{{count}} item").other("{{count}} items"));
/// let es = TranslationTree::new().text("greeting", "¡Hola, Mundo!");
///
/// let mut translator = Translator::with_config(TranslatorConfig::new(
///     Resources::new().with_locale("en", en).with_locale("es", es),
/// ));
///
/// assert_eq!(translator.t("greeting"), "Hello, World!");
/// assert_eq!(translator.t_with("items", &Params::new().with("count", 3)), "3 items");
///
/// translator.change_language("es").unwrap();
/// assert_eq!(translator.t("greeting"), "¡Hola, Mundo!");
/// // Falls back to English.
/// assert_eq!(
///     translator.t_with("welcome", &Params::new().with("name", "John")),
///     "Welcome, John!"
/// );
/// assert_eq!(translator.t("missing.key"), "missing.key");
/// ```
#[derive(Clone)]
pub struct Translator {
    resources: Resources,
    current_locale: String,
    default_locale: String,
    fallback_locale: String,
    categorizer: Arc<dyn PluralCategorizer>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// An unconfigured translator: no resources, every locale
    /// [`DEFAULT_LOCALE`]. Every lookup returns its key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: Resources::new(),
            current_locale: DEFAULT_LOCALE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
            categorizer: Arc::new(CldrPluralRules),
        }
    }

    /// A translator configured with `config`.
    #[must_use]
    pub fn with_config(config: TranslatorConfig) -> Self {
        let mut translator = Self::new();
        translator.configure(config);
        translator
    }

    /// Replace all resources and locale settings.
    ///
    /// The current locale is reset to the default locale. Calling this again
    /// discards everything the previous call installed.
    pub fn configure(&mut self, config: TranslatorConfig) {
        let TranslatorConfig {
            resources,
            default_locale,
            fallback_locale,
            categorizer,
        } = config;

        let default_locale = default_locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let fallback_locale = fallback_locale.unwrap_or_else(|| default_locale.clone());

        debug!(
            locales = resources.len(),
            default_locale = %default_locale,
            fallback_locale = %fallback_locale,
            custom_plural_rule = categorizer.is_some(),
            "translator configured"
        );

        self.resources = resources;
        self.current_locale = default_locale.clone();
        self.default_locale = default_locale;
        self.fallback_locale = fallback_locale;
        self.categorizer = categorizer.unwrap_or_else(|| Arc::new(CldrPluralRules));
    }

    /// Switch the current locale.
    ///
    /// # Errors
    ///
    /// [`I18nError::LocaleNotFound`] when `locale` has no resources. The
    /// current locale is left unchanged.
    pub fn change_language(&mut self, locale: &str) -> Result<()> {
        if !self.resources.contains(locale) {
            let available = self.available_languages_owned();
            warn!(locale, ?available, "rejected switch to unconfigured language");
            return Err(I18nError::LocaleNotFound {
                locale: locale.to_string(),
                available,
            });
        }
        debug!(from = %self.current_locale, to = locale, "language changed");
        self.current_locale = locale.to_string();
        Ok(())
    }

    /// The current locale.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.current_locale
    }

    /// The locale the current one was seeded from at configuration.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_locale
    }

    #[must_use]
    pub fn fallback_language(&self) -> &str {
        &self.fallback_locale
    }

    /// Configured locale codes, sorted.
    #[must_use]
    pub fn available_languages(&self) -> Vec<&str> {
        self.resources.locales().collect()
    }

    fn available_languages_owned(&self) -> Vec<String> {
        self.resources.locales().map(str::to_string).collect()
    }

    /// The installed resources.
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Translate `key`, returning the key itself when nothing matches.
    ///
    /// A numeric `count` param selects among plural forms. Params, when
    /// given, are interpolated into the result.
    #[must_use]
    pub fn translate(&self, key: &str, params: Option<&Params>) -> String {
        self.lookup(key, params).unwrap_or_key(key)
    }

    /// Translate `key` without params.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translate(key, None)
    }

    /// Translate `key` with params.
    #[must_use]
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.translate(key, Some(params))
    }

    /// Like [`translate`](Self::translate), but reports a miss as
    /// [`Lookup::Missing`] instead of returning the key.
    #[must_use]
    pub fn lookup(&self, key: &str, params: Option<&Params>) -> Lookup {
        let count = params.and_then(Params::count);

        let mut resolved = resolve(&self.resources, key, &self.current_locale, count.is_some());
        if resolved.is_missing() && self.current_locale != self.fallback_locale {
            resolved = resolve(&self.resources, key, &self.fallback_locale, count.is_some());
        }

        let text = match (resolved, count) {
            (Resolved::Text(text), _) => text,
            (Resolved::Plural(group), Some(count)) => select_form(
                count,
                &self.current_locale,
                group,
                self.categorizer.as_ref(),
            ),
            (Resolved::Plural(_), None) | (Resolved::Missing, _) => {
                trace!(
                    key,
                    locale = %self.current_locale,
                    fallback = %self.fallback_locale,
                    "translation missing"
                );
                return Lookup::Missing;
            }
        };

        Lookup::Found(match params {
            Some(params) => interpolate(text, params),
            None => text.to_string(),
        })
    }

    /// Whether `key` resolves in `locale` or the fallback locale.
    fn has_key(&self, locale: &str, key: &str) -> bool {
        !resolve(&self.resources, key, locale, true).is_missing()
            || (locale != self.fallback_locale
                && !resolve(&self.resources, key, &self.fallback_locale, true).is_missing())
    }

    // -----------------------------------------------------------------
    // Coverage
    // -----------------------------------------------------------------

    /// Dotted paths of every leaf across all locales, sorted and deduplicated.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .resources
            .iter()
            .flat_map(|(_, tree)| tree.leaf_keys())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys from [`all_keys`](Self::all_keys) that `locale` cannot resolve,
    /// even through the fallback locale. Sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str) -> Vec<String> {
        self.all_keys()
            .into_iter()
            .filter(|key| !self.has_key(locale, key))
            .collect()
    }

    /// Per-locale coverage of the full key set, fallback included.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let all = self.all_keys();
        let total = all.len();

        let locales = self
            .resources
            .locales()
            .map(|locale| {
                let missing: Vec<String> = all
                    .iter()
                    .filter(|key| !self.has_key(locale, key))
                    .cloned()
                    .collect();
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LocaleCoverage {
                    locale: locale.to_string(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            locales,
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locales", &self.available_languages())
            .field("current_locale", &self.current_locale)
            .field("default_locale", &self.default_locale)
            .field("fallback_locale", &self.fallback_locale)
            .finish_non_exhaustive()
    }
}

/// Coverage report across all configured locales.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Number of unique leaf keys across all locales.
    pub total_keys: usize,
    /// Per-locale coverage, sorted by locale code.
    pub locales: Vec<LocaleCoverage>,
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    /// Keys that resolve, directly or through the fallback locale.
    pub present: usize,
    /// Keys that do not resolve, sorted.
    pub missing: Vec<String>,
    /// Coverage as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}

/// A clonable handle to one [`Translator`] shared across call sites and
/// threads.
///
/// Reads take a read lock, `configure` and `change_language` a write lock.
/// A poisoned lock is recovered: every mutation is a plain field assignment,
/// so the translator is never left half-updated.
#[derive(Clone, Default)]
pub struct SharedTranslator {
    inner: Arc<RwLock<Translator>>,
}

impl SharedTranslator {
    #[must_use]
    pub fn new(translator: Translator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(translator)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Translator> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Translator> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Translator::configure`].
    pub fn configure(&self, config: TranslatorConfig) {
        self.write().configure(config);
    }

    /// See [`Translator::change_language`].
    ///
    /// # Errors
    ///
    /// [`I18nError::LocaleNotFound`] when `locale` has no resources.
    pub fn change_language(&self, locale: &str) -> Result<()> {
        self.write().change_language(locale)
    }

    #[must_use]
    pub fn language(&self) -> String {
        self.read().language().to_string()
    }

    #[must_use]
    pub fn available_languages(&self) -> Vec<String> {
        self.read().available_languages_owned()
    }

    #[must_use]
    pub fn translate(&self, key: &str, params: Option<&Params>) -> String {
        self.read().translate(key, params)
    }

    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.read().t(key)
    }

    #[must_use]
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.read().t_with(key, params)
    }

    /// Run `f` against the translator under one read lock.
    pub fn with<R>(&self, f: impl FnOnce(&Translator) -> R) -> R {
        let guard = self.read();
        f(&guard)
    }
}

impl From<Translator> for SharedTranslator {
    fn from(translator: Translator) -> Self {
        Self::new(translator)
    }
}

impl fmt::Debug for SharedTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedTranslator").field(&*self.read()).finish()
    }
}
