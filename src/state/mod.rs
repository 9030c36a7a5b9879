pub mod forms;

use tracing::{debug, info, warn};

use crate::app::Message;
use crate::auth::{AuthError, Credentials, Session};
use crate::config::Config;
use crate::i18n::Language;
use crate::nav::flow::{self, SignUpNext};
use crate::nav::{Navigator, Screen};
use crate::task::{TaskList, TaskMessage};
pub use forms::{FormError, LoginForm, RegistrationForm};

/// Work the shell performs on behalf of [`State::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SignIn(Credentials),
    SignUp(Credentials),
    SendVerification(Session),
    /// Fire-and-forget; navigation has already happened.
    SignOut,
    FocusLoginEmail,
    FocusRegistrationEmail,
    FocusNewTask,
    FocusTask(usize),
}

impl Effect {
    /// Focus request issued whenever `screen` is entered.
    pub fn entering(screen: Screen) -> Self {
        match screen {
            Screen::Login => Effect::FocusLoginEmail,
            Screen::Registration => Effect::FocusRegistrationEmail,
            Screen::Home => Effect::FocusNewTask,
        }
    }
}

/// Per-screen state, rebuilt every time a screen is entered.
#[derive(Debug, Clone)]
pub enum Page {
    Login(LoginForm),
    Registration(RegistrationForm),
    Home(TaskList),
}

impl Page {
    pub fn fresh(screen: Screen) -> Self {
        match screen {
            Screen::Login => Page::Login(LoginForm::default()),
            Screen::Registration => Page::Registration(RegistrationForm::default()),
            Screen::Home => Page::Home(TaskList::new()),
        }
    }

    fn error_slot(&mut self) -> Option<&mut Option<FormError>> {
        match self {
            Page::Login(form) => Some(&mut form.error),
            Page::Registration(form) => Some(&mut form.error),
            Page::Home(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct State {
    navigator: Navigator,
    session: Session,
    pub page: Page,
    pub language: Language,
    pub surface_auth_errors: bool,
}

impl State {
    /// Builds the initial state from the session the provider holds at
    /// startup.
    pub fn new(session: Session, config: &Config) -> Self {
        let start = flow::start_screen(&session, config.resume_session);
        debug!(
            authenticated = session.is_authenticated(),
            resume = config.resume_session,
            ?start,
            "initial route"
        );

        Self {
            navigator: Navigator::starting_at(start),
            session,
            page: Page::fresh(start),
            language: config.language.unwrap_or_default(),
            surface_auth_errors: config.surface_auth_errors,
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tasks(&self) -> Option<&TaskList> {
        match &self.page {
            Page::Home(tasks) => Some(tasks),
            _ => None,
        }
    }

    pub fn form_error(&self) -> Option<&FormError> {
        match &self.page {
            Page::Login(form) => form.error.as_ref(),
            Page::Registration(form) => form.error.as_ref(),
            Page::Home(_) => None,
        }
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::EmailChanged(value) => {
                match &mut self.page {
                    Page::Login(form) => form.email = value,
                    Page::Registration(form) => form.email = value,
                    Page::Home(_) => {}
                }
                vec![]
            }
            Message::PasswordChanged(value) => {
                match &mut self.page {
                    Page::Login(form) => form.password = value,
                    Page::Registration(form) => form.password = value,
                    Page::Home(_) => {}
                }
                vec![]
            }
            Message::ConfirmPasswordChanged(value) => {
                if let Page::Registration(form) = &mut self.page {
                    form.confirm_password = value;
                }
                vec![]
            }
            Message::SignIn => {
                let Page::Login(form) = &mut self.page else {
                    return vec![];
                };
                form.error = None;
                debug!(email = %form.email, "signing in");
                vec![Effect::SignIn(form.credentials())]
            }
            Message::OpenRegistration => {
                if self.screen() == Screen::Login {
                    self.go(Screen::Registration)
                } else {
                    vec![]
                }
            }
            Message::SignedIn(result) => {
                self.note_stale(Screen::Login, "sign-in");
                let target = flow::after_sign_in(&result);
                match result {
                    Ok(session) => {
                        info!(email = ?session.user().map(|user| &user.email), "signed in");
                        self.session = session;
                    }
                    Err(err) => self.report(Screen::Login, "sign-in", err),
                }
                match target {
                    Some(target) => self.go(target),
                    None => vec![],
                }
            }
            Message::Register => {
                let Page::Registration(form) = &mut self.page else {
                    return vec![];
                };
                if !flow::passwords_match(&form.password, &form.confirm_password) {
                    debug!("registration rejected, passwords differ");
                    form.error = Some(FormError::PasswordMismatch);
                    return vec![];
                }
                form.error = None;
                debug!(email = %form.email, "signing up");
                vec![Effect::SignUp(form.credentials())]
            }
            Message::SignedUp(result) => {
                self.note_stale(Screen::Registration, "sign-up");
                match flow::after_sign_up(&result) {
                    SignUpNext::SendVerification(session) => {
                        info!(email = ?session.user().map(|user| &user.email), "account created");
                        self.session = session.clone();
                        vec![Effect::SendVerification(session)]
                    }
                    SignUpNext::Stay => {
                        if let Err(err) = result {
                            self.report(Screen::Registration, "sign-up", err);
                        }
                        vec![]
                    }
                }
            }
            Message::VerificationSent(result) => {
                match &result {
                    Ok(()) => debug!("verification email sent"),
                    Err(err) => warn!(%err, "verification email failed, continuing to home"),
                }
                self.go(flow::after_verification(&result))
            }
            Message::InputChanged(value) => {
                if let Page::Home(tasks) = &mut self.page {
                    tasks.set_input(value);
                }
                vec![]
            }
            Message::CreateTask => {
                if let Page::Home(tasks) = &mut self.page {
                    tasks.submit_input();
                }
                vec![]
            }
            Message::TaskMessage(i, task_message) => {
                let Page::Home(tasks) = &mut self.page else {
                    return vec![];
                };
                let should_focus = matches!(task_message, TaskMessage::Edit);

                tasks.update(i, task_message);

                if should_focus && tasks.is_editing(i) {
                    vec![Effect::FocusTask(i)]
                } else {
                    vec![]
                }
            }
            Message::SignOut => {
                if self.screen() != Screen::Home {
                    return vec![];
                }
                info!("signing out");
                self.session = Session::anonymous();
                let mut effects = self.go(flow::on_sign_out());
                effects.push(Effect::SignOut);
                effects
            }
            Message::SignedOut(result) => {
                match result {
                    Ok(()) => debug!("provider sign-out finished"),
                    Err(err) => warn!(%err, "provider sign-out failed"),
                }
                vec![]
            }
            Message::Back => {
                if self.screen() == Screen::Registration && self.navigator.back() {
                    self.page = Page::fresh(self.screen());
                    vec![Effect::entering(self.screen())]
                } else {
                    vec![]
                }
            }
            Message::LanguageChanged(language) => {
                self.language = language;
                vec![]
            }
            Message::Booted(_) | Message::TabPressed { .. } => vec![],
        }
    }

    fn go(&mut self, target: Screen) -> Vec<Effect> {
        if !self.navigator.navigate(target) {
            return vec![];
        }

        self.page = Page::fresh(target);
        vec![Effect::entering(target)]
    }

    fn note_stale(&self, issued_from: Screen, step: &'static str) {
        if self.screen() != issued_from {
            debug!(
                step,
                screen = ?self.screen(),
                "completion arrived after leaving the screen that issued it"
            );
        }
    }

    /// Logs a failed provider call and, when enabled, shows it on the form
    /// that issued it. Failures from a form the user has left are only logged.
    fn report(&mut self, issued_from: Screen, step: &'static str, err: AuthError) {
        warn!(%err, step, "identity provider call failed");
        if self.surface_auth_errors && self.screen() == issued_from {
            if let Some(slot) = self.page.error_slot() {
                *slot = Some(FormError::Auth(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;

    fn user_session() -> Session {
        Session::signed_in(User {
            uid: "u1".into(),
            email: "ann@example.com".into(),
            email_verified: true,
            id_token: Some("token".into()),
        })
    }

    fn state() -> State {
        State::new(Session::anonymous(), &Config::default())
    }

    fn home_state() -> State {
        let mut state = state();
        state.update(Message::SignedIn(Ok(user_session())));
        assert_eq!(state.screen(), Screen::Home);
        state
    }

    #[test]
    fn starts_on_login_even_with_a_session() {
        let state = State::new(user_session(), &Config::default());

        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn resumes_to_home_when_enabled() {
        let config = Config {
            resume_session: true,
            ..Config::default()
        };
        let state = State::new(user_session(), &config);

        assert_eq!(state.screen(), Screen::Home);
        assert!(state.tasks().is_some_and(TaskList::is_empty));
    }

    #[test]
    fn sign_in_issues_provider_call_with_form_credentials() {
        let mut state = state();
        state.update(Message::EmailChanged("ann@example.com".into()));
        state.update(Message::PasswordChanged("secret1".into()));

        let effects = state.update(Message::SignIn);

        assert_eq!(
            effects,
            vec![Effect::SignIn(Credentials::new("ann@example.com", "secret1"))]
        );
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn successful_sign_in_goes_home() {
        let mut state = state();

        let effects = state.update(Message::SignedIn(Ok(user_session())));

        assert_eq!(state.screen(), Screen::Home);
        assert!(state.session().is_authenticated());
        assert_eq!(effects, vec![Effect::FocusNewTask]);
    }

    #[test]
    fn failed_sign_in_stays_silently() {
        let mut state = state();

        let effects = state.update(Message::SignedIn(Err(AuthError::InvalidCredentials)));

        assert_eq!(state.screen(), Screen::Login);
        assert!(effects.is_empty());
        assert_eq!(state.form_error(), None);
    }

    #[test]
    fn failed_sign_in_is_surfaced_when_enabled() {
        let config = Config {
            surface_auth_errors: true,
            ..Config::default()
        };
        let mut state = State::new(Session::anonymous(), &config);

        state.update(Message::SignedIn(Err(AuthError::InvalidCredentials)));

        assert_eq!(
            state.form_error(),
            Some(&FormError::Auth(AuthError::InvalidCredentials))
        );
    }

    #[test]
    fn late_sign_in_failure_stays_off_the_registration_form() {
        let config = Config {
            surface_auth_errors: true,
            ..Config::default()
        };
        let mut state = State::new(Session::anonymous(), &config);
        state.update(Message::SignIn);
        state.update(Message::OpenRegistration);

        let effects = state.update(Message::SignedIn(Err(AuthError::InvalidCredentials)));

        assert!(effects.is_empty());
        assert_eq!(state.screen(), Screen::Registration);
        assert_eq!(state.form_error(), None);
    }

    #[test]
    fn late_sign_up_failure_stays_off_the_login_form() {
        let config = Config {
            surface_auth_errors: true,
            ..Config::default()
        };
        let mut state = State::new(Session::anonymous(), &config);
        state.update(Message::OpenRegistration);
        state.update(Message::Back);

        state.update(Message::SignedUp(Err(AuthError::EmailExists)));

        assert_eq!(state.screen(), Screen::Login);
        assert_eq!(state.form_error(), None);
    }

    #[test]
    fn entering_a_form_focuses_its_email_field() {
        let mut state = state();

        let effects = state.update(Message::OpenRegistration);
        assert_eq!(effects, vec![Effect::FocusRegistrationEmail]);

        let effects = state.update(Message::Back);
        assert_eq!(effects, vec![Effect::FocusLoginEmail]);
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn password_mismatch_blocks_sign_up() {
        let mut state = state();
        state.update(Message::OpenRegistration);
        state.update(Message::EmailChanged("bob@example.com".into()));
        state.update(Message::PasswordChanged("a".into()));
        state.update(Message::ConfirmPasswordChanged("b".into()));

        let effects = state.update(Message::Register);

        assert!(effects.is_empty());
        assert_eq!(state.screen(), Screen::Registration);
        assert_eq!(state.form_error(), Some(&FormError::PasswordMismatch));
        assert_eq!(
            state.form_error().map(ToString::to_string).as_deref(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn sign_up_then_verification_goes_home() {
        let mut state = state();
        state.update(Message::OpenRegistration);
        state.update(Message::PasswordChanged("secret1".into()));
        state.update(Message::ConfirmPasswordChanged("secret1".into()));

        let effects = state.update(Message::Register);
        assert!(matches!(effects.as_slice(), [Effect::SignUp(_)]));

        let effects = state.update(Message::SignedUp(Ok(user_session())));
        assert_eq!(effects, vec![Effect::SendVerification(user_session())]);
        assert_eq!(state.screen(), Screen::Registration);

        state.update(Message::VerificationSent(Err(AuthError::Network("down".into()))));
        assert_eq!(state.screen(), Screen::Home);
    }

    #[test]
    fn failed_sign_up_stays_on_registration() {
        let mut state = state();
        state.update(Message::OpenRegistration);

        let effects = state.update(Message::SignedUp(Err(AuthError::EmailExists)));

        assert!(effects.is_empty());
        assert_eq!(state.screen(), Screen::Registration);
        assert_eq!(state.form_error(), None);
    }

    #[test]
    fn sign_out_navigates_before_provider_call() {
        let mut state = home_state();

        let effects = state.update(Message::SignOut);

        assert_eq!(state.screen(), Screen::Login);
        assert!(!state.session().is_authenticated());
        assert_eq!(effects, vec![Effect::FocusLoginEmail, Effect::SignOut]);
    }

    #[test]
    fn task_list_is_fresh_on_every_home_entry() {
        let mut state = home_state();
        state.update(Message::InputChanged("milk".into()));
        state.update(Message::CreateTask);
        assert_eq!(state.tasks().map(TaskList::len), Some(1));

        state.update(Message::SignOut);
        state.update(Message::SignedIn(Ok(user_session())));

        assert_eq!(state.tasks().map(TaskList::len), Some(0));
    }

    #[test]
    fn editing_a_row_requests_focus() {
        let mut state = home_state();
        state.update(Message::InputChanged("milk".into()));
        state.update(Message::CreateTask);

        let effects = state.update(Message::TaskMessage(0, TaskMessage::Edit));
        assert_eq!(effects, vec![Effect::FocusTask(0)]);

        let effects = state.update(Message::TaskMessage(7, TaskMessage::Edit));
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_sign_in_completion_still_navigates() {
        let mut state = state();
        state.update(Message::OpenRegistration);

        state.update(Message::SignedIn(Ok(user_session())));

        assert_eq!(state.screen(), Screen::Home);
    }

    #[test]
    fn back_leaves_registration_only() {
        let mut state = state();
        state.update(Message::OpenRegistration);
        state.update(Message::Back);
        assert_eq!(state.screen(), Screen::Login);

        let mut state = home_state();
        state.update(Message::Back);
        assert_eq!(state.screen(), Screen::Home);
    }

    #[test]
    fn home_messages_are_ignored_elsewhere() {
        let mut state = state();

        assert!(state.update(Message::CreateTask).is_empty());
        assert!(state.update(Message::SignOut).is_empty());
        assert_eq!(state.screen(), Screen::Login);
    }
}
