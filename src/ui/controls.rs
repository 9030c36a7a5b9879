use iced::widget::{button, row, text};
use iced::{Center, Element, Fill};

use crate::app::Message;
use crate::i18n::{translate, Language};

/// Screen heading with the language toggle on the right.
pub fn view_header<'a>(heading_key: &str, language: Language) -> Element<'a, Message> {
    row![
        text(translate(heading_key, language)).size(24).width(Fill),
        button(text(translate("language-toggle", language)).size(12))
            .on_press(Message::LanguageChanged(language.toggled()))
            .padding(iced::Padding {
                top: 5.0,
                left: 8.0,
                bottom: 5.0,
                right: 8.0,
            })
            .style(button::text),
    ]
    .spacing(20)
    .align_y(Center)
    .into()
}

pub fn wide_button<'a>(key: &str, language: Language, message: Message) -> Element<'a, Message> {
    button(text(translate(key, language)).width(Fill).align_x(Center))
        .on_press(message)
        .padding(iced::Padding {
            top: 8.0,
            left: 16.0,
            bottom: 8.0,
            right: 16.0,
        })
        .width(Fill)
        .into()
}
