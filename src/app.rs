use std::sync::Arc;

use iced::keyboard::{self, key};
use iced::widget::{center_x, container};
use iced::{Element, Fill, Subscription, Task as Command};
use tracing::{debug, error, info, warn};

use crate::auth::{self, AuthError, IdentityProvider, LocalProvider, Session};
use crate::config::{self, Config, ConfigError};
use crate::i18n::{translate, Language};
use crate::state::{Effect, Page, State};
use crate::task::{Task, TaskMessage};
use crate::ui;

#[derive(Debug)]
pub enum Todogate {
    Loading,
    Loaded {
        state: State,
        provider: Arc<dyn IdentityProvider>,
    },
}

#[derive(Debug, Clone)]
pub enum Message {
    Booted(Result<Config, ConfigError>),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    SignIn,
    OpenRegistration,
    SignedIn(Result<Session, AuthError>),
    Register,
    SignedUp(Result<Session, AuthError>),
    VerificationSent(Result<(), AuthError>),
    InputChanged(String),
    CreateTask,
    TaskMessage(usize, TaskMessage),
    SignOut,
    SignedOut(Result<(), AuthError>),
    Back,
    TabPressed { shift: bool },
    LanguageChanged(Language),
}

impl Todogate {
    pub fn new() -> (Self, Command<Message>) {
        debug!(path = %config::config_path().display(), "loading config");

        (Self::Loading, Command::perform(Config::load(), Message::Booted))
    }

    pub fn title(&self) -> String {
        let language = match self {
            Todogate::Loading => Language::default(),
            Todogate::Loaded { state, .. } => state.language,
        };

        translate("app-title", language)
    }

    pub fn update(&mut self, message: Message) -> Command<Message> {
        match self {
            Todogate::Loading => {
                let Message::Booted(result) = message else {
                    return Command::none();
                };

                let config = result.unwrap_or_else(|err| {
                    warn!(%err, "using default config");
                    Config::default()
                });
                let provider = auth::connect(&config.provider).unwrap_or_else(|err| {
                    error!(%err, "falling back to the local identity provider");
                    Arc::new(LocalProvider::new())
                });
                info!(kind = ?config.provider.kind, "identity provider ready");

                let state = State::new(provider.current_session(), &config);
                crate::i18n::update_language(state.language);

                let focus = focus(Effect::entering(state.screen()));
                *self = Todogate::Loaded { state, provider };
                focus
            }
            Todogate::Loaded { state, provider } => match message {
                Message::TabPressed { shift } => {
                    if shift {
                        iced::widget::operation::focus_previous()
                    } else {
                        iced::widget::operation::focus_next()
                    }
                }
                message => {
                    if let Message::LanguageChanged(language) = &message {
                        crate::i18n::update_language(*language);
                    }

                    let effects = state.update(message);
                    Command::batch(effects.into_iter().map(|effect| perform(provider, effect)))
                }
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self {
            Todogate::Loading => self.loading_view(),
            Todogate::Loaded { state, .. } => self.loaded_view(state),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().filter_map(|event| {
            let keyboard::Event::KeyPressed { key, modifiers, .. } = event else {
                return None;
            };
            let keyboard::Key::Named(key) = key else {
                return None;
            };

            match key {
                key::Named::Tab => Some(Message::TabPressed {
                    shift: modifiers.shift(),
                }),
                key::Named::Escape => Some(Message::Back),
                _ => None,
            }
        })
    }

    fn loading_view(&self) -> Element<'_, Message> {
        iced::widget::center(
            iced::widget::text(translate("loading", Language::default()))
                .width(Fill)
                .align_x(iced::Center)
                .size(50),
        )
        .into()
    }

    fn loaded_view<'a>(&'a self, state: &'a State) -> Element<'a, Message> {
        let content = match &state.page {
            Page::Login(form) => ui::login::view(form, state.language),
            Page::Registration(form) => ui::registration::view(form, state.language),
            Page::Home(tasks) => ui::home::view(tasks, state.language),
        };

        center_x(container(content).max_width(480))
            .padding(iced::Padding {
                top: 24.0,
                left: 16.0,
                bottom: 32.0,
                right: 16.0,
            })
            .into()
    }
}

fn perform(provider: &Arc<dyn IdentityProvider>, effect: Effect) -> Command<Message> {
    let provider = Arc::clone(provider);

    match effect {
        Effect::SignIn(credentials) => Command::perform(
            async move { provider.sign_in(&credentials).await },
            Message::SignedIn,
        ),
        Effect::SignUp(credentials) => Command::perform(
            async move { provider.sign_up(&credentials).await },
            Message::SignedUp,
        ),
        Effect::SendVerification(session) => Command::perform(
            async move { provider.send_verification_email(&session).await },
            Message::VerificationSent,
        ),
        Effect::SignOut => Command::perform(
            async move { provider.sign_out().await },
            Message::SignedOut,
        ),
        effect => focus(effect),
    }
}

fn focus(effect: Effect) -> Command<Message> {
    match effect {
        Effect::FocusLoginEmail => iced::widget::operation::focus(ui::login::EMAIL_INPUT),
        Effect::FocusRegistrationEmail => iced::widget::operation::focus(ui::registration::EMAIL_INPUT),
        Effect::FocusNewTask => iced::widget::operation::focus(ui::home::NEW_TASK_INPUT),
        Effect::FocusTask(i) => {
            let id = Task::text_input_id(i);
            Command::batch(vec![
                iced::widget::operation::focus(id.clone()),
                iced::widget::operation::select_all(id),
            ])
        }
        _ => Command::none(),
    }
}
