use i18n_embed::unic_langid::LanguageIdentifier;
use i18n_embed::{
    fluent::{fluent_language_loader, FluentLanguageLoader},
    DesktopLanguageRequester,
};
use i18n_embed_fl::fl;
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::warn;

use crate::auth::AuthError;
use crate::state::FormError;

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localizations;

pub static LANGUAGE_LOADER: LazyLock<FluentLanguageLoader> = LazyLock::new(|| {
    let loader = fluent_language_loader!();
    let requested_languages = DesktopLanguageRequester::requested_languages();
    if let Err(err) = i18n_embed::select(&loader, &Localizations, &requested_languages) {
        warn!(%err, "falling back to the default language");
    }
    loader
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
}

impl Default for Language {
    fn default() -> Self {
        let requested_languages = DesktopLanguageRequester::requested_languages();
        if requested_languages
            .iter()
            .any(|lang| lang.language.as_str() == "ru")
        {
            Language::Russian
        } else {
            Language::English
        }
    }
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Russian,
            Language::Russian => Language::English,
        }
    }

    fn identifier(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Russian => "ru-RU",
        }
    }
}

pub fn translate(key: &str, language: Language) -> String {
    if key == "language-toggle" {
        return match language {
            Language::Russian => "En".to_string(),
            Language::English => "Ru".to_string(),
        };
    }

    match key {
        "app-title" => fl!(LANGUAGE_LOADER, "app-title"),
        "loading" => fl!(LANGUAGE_LOADER, "loading"),
        "email-label" => fl!(LANGUAGE_LOADER, "email-label"),
        "password-label" => fl!(LANGUAGE_LOADER, "password-label"),
        "confirm-password-label" => fl!(LANGUAGE_LOADER, "confirm-password-label"),
        "sign-in" => fl!(LANGUAGE_LOADER, "sign-in"),
        "register" => fl!(LANGUAGE_LOADER, "register"),
        "back" => fl!(LANGUAGE_LOADER, "back"),
        "sign-out" => fl!(LANGUAGE_LOADER, "sign-out"),
        "login-heading" => fl!(LANGUAGE_LOADER, "login-heading"),
        "registration-heading" => fl!(LANGUAGE_LOADER, "registration-heading"),
        "home-heading" => fl!(LANGUAGE_LOADER, "home-heading"),
        "new-task-placeholder" => fl!(LANGUAGE_LOADER, "new-task-placeholder"),
        "empty-no-tasks" => fl!(LANGUAGE_LOADER, "empty-no-tasks"),
        _ => key.to_string(),
    }
}

pub fn translate_task_count(count: usize) -> String {
    fl!(LANGUAGE_LOADER, "tasks-count", count = count)
}

pub fn describe_form_error(error: &FormError) -> String {
    match error {
        FormError::PasswordMismatch => fl!(LANGUAGE_LOADER, "passwords-mismatch"),
        FormError::Auth(err) => describe_auth_error(err),
    }
}

pub fn describe_auth_error(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials => fl!(LANGUAGE_LOADER, "auth-invalid-credentials"),
        AuthError::EmailExists => fl!(LANGUAGE_LOADER, "auth-email-exists"),
        AuthError::WeakPassword => fl!(LANGUAGE_LOADER, "auth-weak-password"),
        AuthError::InvalidEmail => fl!(LANGUAGE_LOADER, "auth-invalid-email"),
        AuthError::NotSignedIn => fl!(LANGUAGE_LOADER, "auth-not-signed-in"),
        AuthError::Network(_) => fl!(LANGUAGE_LOADER, "auth-network"),
        AuthError::Provider(_) => fl!(LANGUAGE_LOADER, "auth-provider"),
    }
}

pub fn update_language(language: Language) {
    let lang_ids: Vec<LanguageIdentifier> = match language.identifier().parse() {
        Ok(id) => vec![id],
        Err(err) => {
            warn!(%err, "unknown language identifier");
            return;
        }
    };
    if let Err(err) = i18n_embed::select(&*LANGUAGE_LOADER, &Localizations, &lang_ids) {
        warn!(%err, ?language, "failed to switch language");
    }
}
