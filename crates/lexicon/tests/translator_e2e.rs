//! End-to-end translation scenarios: configure, translate, switch language.

use lexicon::{
    I18nError, Params, PluralForm, PluralGroup, Resources, SharedTranslator, TranslationTree,
    Translator, TranslatorConfig,
};
use pretty_assertions::assert_eq;

fn app_resources() -> Resources {
    let items = |zero: &str, one: &str, other: &str| {
        PluralGroup::new().zero(zero).one(one).other(other)
    };
    let user = |profile: &str, settings: &str| {
        TranslationTree::new()
            .text("profile", profile)
            .text("settings", settings)
    };

    let en = TranslationTree::new()
        .text("greeting", "Hello, World!")
        .text("farewell", "Goodbye!")
        .text("welcome", "Welcome, {{name}}!")
        .text("itemCount", "You have {{count}} items in your cart.")
        .plural("items", items("No items", "{{count}} item", "{{count}} items"))
        .subtree("user", user("User Profile", "Settings"))
        .subtree(
            "nested",
            TranslationTree::new()
                .text("message", "This is a nested message.")
                .subtree("deep", TranslationTree::new().text("value", "Deep nested value")),
        );
    let es = TranslationTree::new()
        .text("greeting", "¡Hola, Mundo!")
        .text("farewell", "¡Adiós!")
        .text("welcome", "¡Bienvenido, {{name}}!")
        .plural(
            "items",
            items("Sin artículos", "{{count}} artículo", "{{count}} artículos"),
        )
        .subtree("user", user("Perfil de Usuario", "Configuración"));
    let fr = TranslationTree::new()
        .text("greeting", "Bonjour, le Monde!")
        .plural(
            "items",
            items("Aucun article", "{{count}} article", "{{count}} articles"),
        );

    Resources::new()
        .with_locale("en", en)
        .with_locale("es", es)
        .with_locale("fr", fr)
}

fn count(n: i64) -> Params {
    Params::new().with("count", n)
}

#[test]
fn greeting_welcome_scenario() {
    let en = TranslationTree::new()
        .text("greeting", "Hello, World!")
        .text("welcome", "Welcome, {{name}}!");
    let es = TranslationTree::new().text("greeting", "¡Hola, Mundo!");
    let mut translator = Translator::with_config(
        TranslatorConfig::new(Resources::new().with_locale("en", en).with_locale("es", es))
            .default_locale("en"),
    );
    let john = Params::new().with("name", "John");

    assert_eq!(translator.t("greeting"), "Hello, World!");
    assert_eq!(translator.t_with("welcome", &john), "Welcome, John!");

    translator.change_language("es").unwrap();
    assert_eq!(translator.t("greeting"), "¡Hola, Mundo!");
    // Missing in `es`; the fallback defaults to `en`.
    assert_eq!(translator.t_with("welcome", &john), "Welcome, John!");
}

#[test]
fn nested_keys() {
    let tree = TranslationTree::new().subtree("nested", TranslationTree::new().text("message", "Inner"));
    let translator =
        Translator::with_config(TranslatorConfig::new(Resources::new().with_locale("en", tree)));

    assert_eq!(translator.t("nested.message"), "Inner");
    assert_eq!(translator.t("nested"), "nested");
}

#[test]
fn full_application_walkthrough() {
    let mut translator = Translator::with_config(
        TranslatorConfig::new(app_resources())
            .default_locale("en")
            .fallback_locale("en"),
    );

    assert_eq!(translator.available_languages(), vec!["en", "es", "fr"]);
    assert_eq!(translator.t("nested.deep.value"), "Deep nested value");
    assert_eq!(
        translator.t_with("itemCount", &count(5)),
        "You have 5 items in your cart."
    );
    assert_eq!(translator.t("non.existent.key"), "non.existent.key");

    translator.change_language("es").unwrap();
    assert_eq!(translator.t("user.settings"), "Configuración");
    assert_eq!(translator.t("nested.message"), "This is a nested message.");
    assert_eq!(translator.t_with("items", &count(1)), "1 artículo");
    assert_eq!(translator.t_with("items", &count(7)), "7 artículos");

    translator.change_language("fr").unwrap();
    assert_eq!(translator.language(), "fr");
    // French CLDR puts 0 and 1 in `one`.
    assert_eq!(translator.t_with("items", &count(0)), "0 article");
    assert_eq!(translator.t_with("items", &count(2)), "2 articles");
    assert_eq!(translator.t("farewell"), "Goodbye!");
}

#[test]
fn context_free_plural_rule_via_custom_rule() {
    let translator = Translator::with_config(
        TranslatorConfig::new(app_resources()).plural_rule(|count, _locale| {
            if count == 0.0 {
                PluralForm::Zero
            } else if count == 1.0 {
                PluralForm::One
            } else {
                PluralForm::Other
            }
        }),
    );

    assert_eq!(translator.t_with("items", &count(0)), "No items");
    assert_eq!(translator.t_with("items", &count(1)), "1 item");
    assert_eq!(translator.t_with("items", &count(5)), "5 items");
}

#[test]
fn unknown_language_is_an_error() {
    let mut translator = Translator::with_config(TranslatorConfig::new(app_resources()));
    translator.change_language("es").unwrap();

    let err = translator.change_language("de").unwrap_err();
    assert!(matches!(
        &err,
        I18nError::LocaleNotFound { locale, available }
            if locale == "de" && available == &["en", "es", "fr"]
    ));
    assert!(err.to_string().contains("en, es, fr"));
    assert_eq!(translator.language(), "es");
}

#[test]
fn available_languages_are_exactly_configured() {
    let resources = Resources::new()
        .with_locale("en", TranslationTree::new().text("a", "A"))
        .with_locale("es", TranslationTree::new().text("a", "A"));
    let translator = Translator::with_config(TranslatorConfig::new(resources));
    assert_eq!(translator.available_languages(), vec!["en", "es"]);
}

#[test]
fn shared_handle_injected_into_components() {
    struct Header {
        i18n: SharedTranslator,
    }
    impl Header {
        fn render(&self) -> String {
            self.i18n.t("greeting")
        }
    }

    let i18n = SharedTranslator::default();
    let header = Header { i18n: i18n.clone() };
    assert_eq!(header.render(), "greeting");

    i18n.configure(TranslatorConfig::new(app_resources()));
    assert_eq!(header.render(), "Hello, World!");

    i18n.change_language("fr").unwrap();
    assert_eq!(header.render(), "Bonjour, le Monde!");
}

#[cfg(feature = "serde")]
#[test]
fn resources_from_json() {
    let resources: Resources = serde_json::from_str(
        r#"{
            "en": {
                "welcome": "Welcome, {{name}}!",
                "notifications": {
                    "zero": "You have no notifications",
                    "one": "You have {{count}} notification",
                    "other": "You have {{count}} notifications"
                }
            }
        }"#,
    )
    .unwrap();
    let translator = Translator::with_config(TranslatorConfig::new(resources));

    assert_eq!(
        translator.t_with("welcome", &Params::new().with("name", "Ada")),
        "Welcome, Ada!"
    );
    assert_eq!(
        translator.t_with("notifications", &count(10)),
        "You have 10 notifications"
    );
    assert_eq!(
        translator.t_with("notifications", &count(1)),
        "You have 1 notification"
    );
}
