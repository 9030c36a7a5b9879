use iced::widget::{button, container, row, text, text_input};
use iced::{Center, Element, Fill, Theme};

use crate::i18n::LANGUAGE_LOADER;
use i18n_embed_fl::fl;

use super::{EditState, Task, TaskMessage};

pub fn task_view<'a>(task: &'a Task, edit: Option<&'a EditState>, index: usize) -> Element<'a, TaskMessage> {
    let content = match edit {
        None => idle_view(task),
        Some(edit) => editing_view(edit, index),
    };

    container(content)
        .padding(12)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: iced::Border {
                color: theme.extended_palette().background.weak.color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn idle_view(task: &Task) -> Element<'_, TaskMessage> {
    row![
        text(task.text())
            .width(Fill)
            .size(16)
            .shaping(text::Shaping::Advanced),
        button(text(fl!(LANGUAGE_LOADER, "delete")).size(14))
            .on_press(TaskMessage::Delete)
            .padding(4)
            .style(button::text),
        button(text(fl!(LANGUAGE_LOADER, "edit")).size(14))
            .on_press(TaskMessage::Edit)
            .padding(4)
            .style(button::text),
    ]
    .spacing(12)
    .align_y(Center)
    .into()
}

fn editing_view(edit: &EditState, index: usize) -> Element<'_, TaskMessage> {
    let text_input = text_input(&fl!(LANGUAGE_LOADER, "edit-task-placeholder"), &edit.draft)
        .id(Task::text_input_id(index))
        .on_input(TaskMessage::DraftEdited)
        .on_submit(TaskMessage::FinishEdition)
        .padding(10)
        .style(|theme: &Theme, status| {
            let default_style = text_input::default(theme, status);

            text_input::Style {
                background: iced::Color::TRANSPARENT.into(),
                border: iced::Border {
                    color: iced::Color::TRANSPARENT,
                    width: 0.0,
                    radius: 0.0.into(),
                },
                ..default_style
            }
        });

    row![
        text_input,
        button(text(fl!(LANGUAGE_LOADER, "cancel")).size(14))
            .on_press(TaskMessage::CancelEdition)
            .padding(10)
            .style(button::secondary),
    ]
    .spacing(12)
    .align_y(Center)
    .into()
}
