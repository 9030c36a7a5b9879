use iced::widget::{column, text, text_input, Space};
use iced::{Element, Fill};

use crate::app::Message;
use crate::i18n::{describe_form_error, translate, Language};
use crate::state::LoginForm;
use crate::ui::controls::{view_header, wide_button};
use crate::ui::styles::error;

pub const EMAIL_INPUT: &str = "login-email";

pub fn view(form: &LoginForm, language: Language) -> Element<'_, Message> {
    let email = text_input(&translate("email-label", language), &form.email)
        .id(EMAIL_INPUT)
        .on_input(Message::EmailChanged)
        .on_submit(Message::SignIn)
        .padding(10);

    let password = text_input(&translate("password-label", language), &form.password)
        .on_input(Message::PasswordChanged)
        .on_submit(Message::SignIn)
        .secure(true)
        .padding(10);

    let error_text = form
        .error
        .as_ref()
        .map(describe_form_error)
        .unwrap_or_default();

    column![
        view_header("login-heading", language),
        Space::new().height(16),
        email,
        password,
        Space::new().height(8),
        wide_button("sign-in", language, Message::SignIn),
        wide_button("register", language, Message::OpenRegistration),
        text(error_text).style(error),
    ]
    .spacing(8)
    .width(Fill)
    .into()
}
