//! Error type shared across the crate.

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
    /// `change_language` named a locale with no resources.
    #[error("language \"{locale}\" not found; available languages: {}", .available.join(", "))]
    LocaleNotFound {
        locale: String,
        available: Vec<String>,
    },
    /// A string is not one of the six CLDR plural form names.
    #[error("unknown plural form: {0}")]
    UnknownPluralForm(String),
}

pub type Result<T> = std::result::Result<T, I18nError>;
