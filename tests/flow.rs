use std::collections::VecDeque;

use todogate::app::Message;
use todogate::auth::{IdentityProvider, LocalProvider};
use todogate::config::Config;
use todogate::nav::Screen;
use todogate::state::{Effect, FormError, State};
use todogate::task::TaskMessage;

const EMAIL: &str = "ann@example.com";
const PASSWORD: &str = "secret1";

/// Runs one provider effect and returns the completion message, the way the
/// shell does.
async fn run(provider: &LocalProvider, effect: Effect) -> Option<Message> {
    match effect {
        Effect::SignIn(credentials) => Some(Message::SignedIn(provider.sign_in(&credentials).await)),
        Effect::SignUp(credentials) => Some(Message::SignedUp(provider.sign_up(&credentials).await)),
        Effect::SendVerification(session) => Some(Message::VerificationSent(
            provider.send_verification_email(&session).await,
        )),
        Effect::SignOut => Some(Message::SignedOut(provider.sign_out().await)),
        Effect::FocusLoginEmail
        | Effect::FocusRegistrationEmail
        | Effect::FocusNewTask
        | Effect::FocusTask(_) => None,
    }
}

/// Feeds `message` and every completion it causes until the queue is empty.
async fn dispatch(state: &mut State, provider: &LocalProvider, message: Message) {
    let mut queue = VecDeque::from([message]);
    while let Some(message) = queue.pop_front() {
        for effect in state.update(message) {
            if let Some(reply) = run(provider, effect).await {
                queue.push_back(reply);
            }
        }
    }
}

fn fresh_state() -> State {
    State::new(todogate::auth::Session::anonymous(), &Config::default())
}

async fn fill_login(state: &mut State, provider: &LocalProvider, email: &str, password: &str) {
    dispatch(state, provider, Message::EmailChanged(email.into())).await;
    dispatch(state, provider, Message::PasswordChanged(password.into())).await;
}

async fn fill_registration(
    state: &mut State,
    provider: &LocalProvider,
    email: &str,
    password: &str,
    confirm: &str,
) {
    dispatch(state, provider, Message::OpenRegistration).await;
    dispatch(state, provider, Message::EmailChanged(email.into())).await;
    dispatch(state, provider, Message::PasswordChanged(password.into())).await;
    dispatch(state, provider, Message::ConfirmPasswordChanged(confirm.into())).await;
}

#[tokio::test]
async fn sign_in_success_reaches_home() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let mut state = fresh_state();

    fill_login(&mut state, &provider, EMAIL, PASSWORD).await;
    dispatch(&mut state, &provider, Message::SignIn).await;

    assert_eq!(state.screen(), Screen::Home);
    assert!(state.session().is_authenticated());
}

#[tokio::test]
async fn sign_in_failure_stays_on_login_without_error() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let mut state = fresh_state();

    fill_login(&mut state, &provider, EMAIL, "wrong").await;
    dispatch(&mut state, &provider, Message::SignIn).await;

    assert_eq!(state.screen(), Screen::Login);
    assert_eq!(state.form_error(), None);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn password_mismatch_issues_no_provider_call() {
    let provider = LocalProvider::new();
    let mut state = fresh_state();

    fill_registration(&mut state, &provider, EMAIL, "a", "b").await;
    dispatch(&mut state, &provider, Message::Register).await;

    assert_eq!(state.screen(), Screen::Registration);
    assert_eq!(state.form_error(), Some(&FormError::PasswordMismatch));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn registration_sends_verification_and_reaches_home() {
    let provider = LocalProvider::new();
    let mut state = fresh_state();

    fill_registration(&mut state, &provider, EMAIL, PASSWORD, PASSWORD).await;
    dispatch(&mut state, &provider, Message::Register).await;

    assert_eq!(state.screen(), Screen::Home);
    assert_eq!(provider.verifications_sent(), vec![EMAIL.to_owned()]);
}

#[tokio::test]
async fn verification_failure_still_reaches_home() {
    let provider = LocalProvider::new();
    provider.set_fail_verification(true);
    let mut state = fresh_state();

    fill_registration(&mut state, &provider, EMAIL, PASSWORD, PASSWORD).await;
    dispatch(&mut state, &provider, Message::Register).await;

    assert_eq!(state.screen(), Screen::Home);
    assert!(provider.verifications_sent().is_empty());
}

#[tokio::test]
async fn failed_sign_up_stays_on_registration() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let mut state = fresh_state();

    fill_registration(&mut state, &provider, EMAIL, PASSWORD, PASSWORD).await;
    dispatch(&mut state, &provider, Message::Register).await;

    assert_eq!(state.screen(), Screen::Registration);
    assert_eq!(state.form_error(), None);
}

#[tokio::test]
async fn sign_up_failure_is_shown_when_surfacing_is_enabled() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let config = Config {
        surface_auth_errors: true,
        ..Config::default()
    };
    let mut state = State::new(provider.current_session(), &config);

    fill_registration(&mut state, &provider, EMAIL, PASSWORD, PASSWORD).await;
    dispatch(&mut state, &provider, Message::Register).await;

    assert_eq!(state.screen(), Screen::Registration);
    assert_eq!(
        state.form_error(),
        Some(&FormError::Auth(todogate::auth::AuthError::EmailExists))
    );
}

#[tokio::test]
async fn sign_out_navigates_before_the_provider_call_finishes() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let mut state = fresh_state();
    fill_login(&mut state, &provider, EMAIL, PASSWORD).await;
    dispatch(&mut state, &provider, Message::SignIn).await;

    let effects = state.update(Message::SignOut);

    assert_eq!(state.screen(), Screen::Login);
    assert!(provider.current_session().is_authenticated());
    assert!(effects.contains(&Effect::SignOut));

    for effect in effects {
        if let Some(reply) = run(&provider, effect).await {
            state.update(reply);
        }
    }
    assert!(!provider.current_session().is_authenticated());
    assert_eq!(state.screen(), Screen::Login);
}

#[tokio::test]
async fn late_sign_in_completion_still_redirects() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let mut state = fresh_state();
    fill_login(&mut state, &provider, EMAIL, PASSWORD).await;

    let effects = state.update(Message::SignIn);
    dispatch(&mut state, &provider, Message::OpenRegistration).await;
    assert_eq!(state.screen(), Screen::Registration);

    for effect in effects {
        if let Some(reply) = run(&provider, effect).await {
            state.update(reply);
        }
    }

    assert_eq!(state.screen(), Screen::Home);
}

#[tokio::test]
async fn held_session_is_ignored_at_startup_by_default() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    provider
        .sign_in(&todogate::auth::Credentials::new(EMAIL, PASSWORD))
        .await
        .expect("sign in");

    let state = State::new(provider.current_session(), &Config::default());
    assert_eq!(state.screen(), Screen::Login);

    let config = Config {
        resume_session: true,
        ..Config::default()
    };
    let state = State::new(provider.current_session(), &config);
    assert_eq!(state.screen(), Screen::Home);
}

#[tokio::test]
async fn task_list_on_home() {
    let provider = LocalProvider::new().with_account(EMAIL, PASSWORD);
    let mut state = fresh_state();
    fill_login(&mut state, &provider, EMAIL, PASSWORD).await;
    dispatch(&mut state, &provider, Message::SignIn).await;

    for text in ["", "buy milk", "  "] {
        dispatch(&mut state, &provider, Message::InputChanged(text.into())).await;
        dispatch(&mut state, &provider, Message::CreateTask).await;
    }
    let tasks = state.tasks().expect("home screen");
    assert_eq!(tasks.texts(), vec!["buy milk", "  "]);
    assert_eq!(tasks.input(), "");

    dispatch(&mut state, &provider, Message::TaskMessage(1, TaskMessage::Edit)).await;
    dispatch(
        &mut state,
        &provider,
        Message::TaskMessage(1, TaskMessage::DraftEdited("bread".into())),
    )
    .await;
    dispatch(&mut state, &provider, Message::TaskMessage(1, TaskMessage::FinishEdition)).await;
    dispatch(&mut state, &provider, Message::TaskMessage(0, TaskMessage::Delete)).await;

    let tasks = state.tasks().expect("home screen");
    assert_eq!(tasks.texts(), vec!["bread"]);
    assert!(!tasks.is_editing(0));
}
