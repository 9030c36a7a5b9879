use iced::widget::{column, container, keyed_column, row, scrollable, text, text_input};
use iced::{Center, Element, Fill, Function, Theme};

use crate::app::Message;
use crate::i18n::{translate, translate_task_count, Language};
use crate::task::TaskList;
use crate::ui::controls::{view_header, wide_button};
use crate::ui::styles::subtle;

pub const NEW_TASK_INPUT: &str = "new-task";

pub fn view(tasks: &TaskList, language: Language) -> Element<'_, Message> {
    column![
        view_header("home-heading", language),
        text(translate_task_count(tasks.len())).size(14).style(subtle),
        view_tasks(tasks, language),
        view_input(tasks.input(), language),
        wide_button("sign-out", language, Message::SignOut),
    ]
    .spacing(16)
    .height(Fill)
    .into()
}

fn view_tasks(tasks: &TaskList, language: Language) -> Element<'_, Message> {
    if tasks.is_empty() {
        return iced::widget::center(
            text(translate("empty-no-tasks", language))
                .width(Fill)
                .size(20)
                .align_x(Center)
                .style(subtle),
        )
        .height(Fill)
        .into();
    }

    let rows = keyed_column(tasks.tasks().iter().enumerate().filter_map(|(i, task)| {
        let row = tasks.view(i)?;
        Some((task.id(), row.map(Message::TaskMessage.with(i))))
    }))
    .spacing(10);

    scrollable(rows).height(Fill).into()
}

fn view_input<'a>(value: &str, language: Language) -> Element<'a, Message> {
    let input = text_input(&translate("new-task-placeholder", language), value)
        .id(NEW_TASK_INPUT)
        .on_input(Message::InputChanged)
        .on_submit(Message::CreateTask)
        .padding(iced::Padding {
            top: 8.0,
            left: 0.0,
            bottom: 8.0,
            right: 0.0,
        })
        .size(16)
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
        })
        .width(Fill);

    container(row![text("+").size(20), input].spacing(8).align_y(Center))
        .padding(iced::Padding {
            top: 8.0,
            left: 16.0,
            bottom: 8.0,
            right: 4.0,
        })
        .style(|theme: &Theme| {
            let background_color = theme.extended_palette().background.weak.color;

            container::Style {
                background: Some(background_color.into()),
                border: iced::Border {
                    color: background_color,
                    width: 1.0,
                    radius: 12.0.into(),
                },
                ..Default::default()
            }
        })
        .width(Fill)
        .into()
}
