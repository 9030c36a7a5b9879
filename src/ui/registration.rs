use iced::widget::{button, column, text, text_input, Space};
use iced::{Center, Element, Fill};

use crate::app::Message;
use crate::i18n::{describe_form_error, translate, Language};
use crate::state::RegistrationForm;
use crate::ui::controls::{view_header, wide_button};
use crate::ui::styles::error;

pub const EMAIL_INPUT: &str = "registration-email";

pub fn view(form: &RegistrationForm, language: Language) -> Element<'_, Message> {
    let email = text_input(&translate("email-label", language), &form.email)
        .id(EMAIL_INPUT)
        .on_input(Message::EmailChanged)
        .padding(10);

    let password = text_input(&translate("password-label", language), &form.password)
        .on_input(Message::PasswordChanged)
        .secure(true)
        .padding(10);

    let confirm_password = text_input(
        &translate("confirm-password-label", language),
        &form.confirm_password,
    )
    .on_input(Message::ConfirmPasswordChanged)
    .on_submit(Message::Register)
    .secure(true)
    .padding(10);

    let error_text = form
        .error
        .as_ref()
        .map(describe_form_error)
        .unwrap_or_default();

    column![
        view_header("registration-heading", language),
        Space::new().height(16),
        email,
        password,
        confirm_password,
        Space::new().height(8),
        wide_button("register", language, Message::Register),
        text(error_text).style(error).width(Fill).align_x(Center),
        button(text(translate("back", language)).size(14))
            .on_press(Message::Back)
            .style(button::text),
    ]
    .spacing(8)
    .width(Fill)
    .align_x(Center)
    .into()
}
