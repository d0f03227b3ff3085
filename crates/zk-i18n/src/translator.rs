//! Infallible `t`-style lookups for rendering code.
//!
//! [`Catalog::resolve`] reports every problem as an error. Rendering code
//! usually wants text no matter what, so the translator turns failures into
//! visible placeholders and records which keys were missing.

use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::catalog::{Catalog, Resolved};
use crate::config::{I18nConfig, MissingKeyPolicy};
use crate::error::I18nError;
use crate::locale::Locale;
use crate::value::{FormatArg, ValueKind};

/// A catalog bound to one locale and a missing-key policy.
#[derive(Debug)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    locale: Locale,
    policy: MissingKeyPolicy,
    missing: Mutex<BTreeSet<String>>,
}

impl<'a> Translator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, locale: Locale) -> Self {
        Self {
            catalog,
            locale,
            policy: MissingKeyPolicy::default(),
            missing: Mutex::new(BTreeSet::new()),
        }
    }

    /// Translator using the locale and policy from `config`.
    #[must_use]
    pub fn from_config(catalog: &'a Catalog, config: &I18nConfig) -> Self {
        Self::new(catalog, config.locale).with_policy(config.missing_key)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Text for a literal key.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.render(key, None)
    }

    /// Text for a template key rendered with `arg`.
    #[must_use]
    pub fn t_with<'b>(&self, key: &str, arg: impl Into<FormatArg<'b>>) -> String {
        self.render(key, Some(arg.into()))
    }

    /// Month list for a list key, or `None` if absent or not a list.
    #[must_use]
    pub fn months(&self, key: &str) -> Option<&'a [String]> {
        match self.catalog.list(self.locale, key) {
            Ok(items) => Some(items),
            Err(err) => {
                self.report(key, &err);
                None
            }
        }
    }

    /// Keys this translator failed to find in any locale, sorted.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        self.missing
            .lock()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn render(&self, key: &str, arg: Option<FormatArg<'_>>) -> String {
        match self.catalog.resolve(self.locale, key, arg) {
            Ok(Resolved::Text(text)) => text,
            Ok(Resolved::List(_)) => {
                let err = I18nError::TypeMismatch {
                    key: key.to_string(),
                    expected: ValueKind::Literal,
                    found: ValueKind::List,
                };
                self.report(key, &err);
                type_placeholder(key)
            }
            Err(err) => {
                self.report(key, &err);
                match err {
                    I18nError::MissingKey { .. } => self.policy.render(key),
                    _ => type_placeholder(key),
                }
            }
        }
    }

    fn report(&self, key: &str, err: &I18nError) {
        match err {
            I18nError::MissingKey { locale, .. } => {
                let first = self
                    .missing
                    .lock()
                    .map(|mut set| set.insert(key.to_string()))
                    .unwrap_or(false);
                if first {
                    tracing::warn!(locale = %locale, key, "missing translation key");
                }
            }
            other => tracing::error!(locale = %self.locale, key, error = %other, "translation lookup failed"),
        }
    }
}

fn type_placeholder(key: &str) -> String {
    format!("⟦type:{key}⟧")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocaleStrings;
    use crate::value::{Template, Value};
    use tracing_test::traced_test;

    fn catalog() -> Catalog {
        let mut en = LocaleStrings::new();
        en.insert("login", "Sign in");
        en.insert_value(
            "settings.member.of",
            Value::Template(Template::new(|name| format!("You use {name}'s subscription."))),
        );
        en.insert_value(
            "months.short",
            Value::List((1..=12).map(|m| format!("M{m}")).collect()),
        );
        let mut de = LocaleStrings::new();
        de.insert("login", "Anmelden");

        let mut catalog = Catalog::new();
        catalog.add_locale(Locale::EnUs, en);
        catalog.add_locale(Locale::DeDe, de);
        catalog
    }

    #[test]
    fn translates_literals_and_templates() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::DeAt);
        assert_eq!(t.t("login"), "Anmelden");
        assert_eq!(
            t.t_with("settings.member.of", "Anna"),
            "You use Anna's subscription."
        );
        assert_eq!(t.months("months.short").map(<[String]>::len), Some(12));
        assert!(t.missing_keys().is_empty());
    }

    #[test]
    fn missing_key_placeholder() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::DeDe);
        assert_eq!(t.t("nope.key"), "⟦missing:nope.key⟧");
    }

    #[test]
    fn missing_key_policy_key() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::DeDe).with_policy(MissingKeyPolicy::Key);
        assert_eq!(t.t("nope.key"), "nope.key");
    }

    #[test]
    fn records_missing_keys_once() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::EnUs);
        let _ = t.t("b.missing");
        let _ = t.t("a.missing");
        let _ = t.t("b.missing");
        assert!(t.months("c.missing").is_none());
        assert_eq!(t.missing_keys(), vec!["a.missing", "b.missing", "c.missing"]);
    }

    #[test]
    fn type_mismatch_placeholder() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::EnUs);
        assert_eq!(t.t("settings.member.of"), "⟦type:settings.member.of⟧");
        assert_eq!(t.t_with("login", 3), "⟦type:login⟧");
        assert!(t.months("login").is_none());
        assert_eq!(t.t("months.short"), "⟦type:months.short⟧");
        assert!(t.missing_keys().is_empty());
    }

    #[test]
    fn from_config_uses_locale_and_policy() {
        let catalog = catalog();
        let config = I18nConfig {
            locale: Locale::DeDe,
            missing_key: MissingKeyPolicy::Key,
            year: None,
        };
        let t = Translator::from_config(&catalog, &config);
        assert_eq!(t.locale(), Locale::DeDe);
        assert_eq!(t.t("login"), "Anmelden");
        assert_eq!(t.t("x"), "x");
    }

    #[test]
    #[traced_test]
    fn missing_key_is_logged() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::DeAt);
        let _ = t.t("ghost.key");
        assert!(logs_contain("missing translation key"));
        assert!(logs_contain("ghost.key"));
    }

    #[test]
    #[traced_test]
    fn type_mismatch_is_logged() {
        let catalog = catalog();
        let t = Translator::new(&catalog, Locale::EnUs);
        let _ = t.t("settings.member.of");
        assert!(logs_contain("translation lookup failed"));
    }
}
