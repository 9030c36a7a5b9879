//! Navigation decisions gated by identity provider results.
//!
//! Each function takes a completed provider call and says where the
//! application goes next. `None` means stay on the current screen.

use crate::auth::{AuthError, Session};

use super::Screen;

/// Registration proceeds only when both password fields match.
pub fn passwords_match(password: &str, confirm_password: &str) -> bool {
    password == confirm_password
}

pub fn after_sign_in(result: &Result<Session, AuthError>) -> Option<Screen> {
    match result {
        Ok(_) => Some(Screen::Home),
        Err(_) => None,
    }
}

/// What follows a sign-up completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpNext {
    SendVerification(Session),
    Stay,
}

pub fn after_sign_up(result: &Result<Session, AuthError>) -> SignUpNext {
    match result {
        Ok(session) => SignUpNext::SendVerification(session.clone()),
        Err(_) => SignUpNext::Stay,
    }
}

/// The home screen is entered whether or not the verification email went out.
pub fn after_verification(_result: &Result<(), AuthError>) -> Screen {
    Screen::Home
}

/// Sign-out navigates immediately; the provider call is not awaited.
pub fn on_sign_out() -> Screen {
    Screen::Login
}

/// Initial screen. A held session only matters when resuming is enabled.
pub fn start_screen(session: &Session, resume_session: bool) -> Screen {
    if resume_session && session.is_authenticated() {
        Screen::Home
    } else {
        Screen::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;

    fn session() -> Session {
        Session::signed_in(User {
            uid: "u1".into(),
            email: "a@b.co".into(),
            email_verified: false,
            id_token: None,
        })
    }

    #[test]
    fn sign_in_goes_home_only_on_success() {
        assert_eq!(after_sign_in(&Ok(session())), Some(Screen::Home));
        assert_eq!(after_sign_in(&Err(AuthError::InvalidCredentials)), None);
    }

    #[test]
    fn sign_up_success_requests_verification() {
        assert_eq!(
            after_sign_up(&Ok(session())),
            SignUpNext::SendVerification(session())
        );
        assert_eq!(after_sign_up(&Err(AuthError::EmailExists)), SignUpNext::Stay);
    }

    #[test]
    fn verification_failure_still_goes_home() {
        assert_eq!(after_verification(&Ok(())), Screen::Home);
        assert_eq!(
            after_verification(&Err(AuthError::Network("offline".into()))),
            Screen::Home
        );
    }

    #[test]
    fn start_screen_ignores_session_unless_resuming() {
        assert_eq!(start_screen(&session(), false), Screen::Login);
        assert_eq!(start_screen(&session(), true), Screen::Home);
        assert_eq!(start_screen(&Session::anonymous(), true), Screen::Login);
    }

    #[test]
    fn password_check_is_exact() {
        assert!(passwords_match("secret", "secret"));
        assert!(!passwords_match("a", "b"));
        assert!(!passwords_match("secret", "secret "));
    }
}
