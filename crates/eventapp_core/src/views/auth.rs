//! Sign-in and sign-up forms. Success needs no navigation here: the session emission moves the
//! navigator to the authenticated graph.

use super::{Notice, NoticeSlot};
use crate::error::AppError;
use crate::identity::Credentials;
use crate::models::SessionUser;
use crate::navigator::{NavCommand, Screen};

#[derive(Default)]
pub struct SignInView {
    pub email: String,
    pub password: String,
    submitting: bool,
    pub notice: NoticeSlot,
}

impl SignInView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.notice.set(Notice::error("Please enter both email and password."));
            return None;
        }
        self.submitting = true;
        Some(Credentials::new(self.email.trim(), self.password.clone()))
    }

    pub fn finish(&mut self, result: Result<SessionUser, AppError>) {
        self.submitting = false;
        match result {
            Ok(user) => {
                log::info!("sign in: {}", user.uid);
                self.password.clear();
            }
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    pub fn open_sign_up(&self) -> NavCommand {
        NavCommand::Push(Screen::SignUp)
    }
}

#[derive(Default)]
pub struct SignUpView {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    submitting: bool,
    pub notice: NoticeSlot,
}

impl SignUpView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        if self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            self.notice.set(Notice::error("Please fill out every field."));
            return None;
        }
        if self.password != self.confirm_password {
            self.notice.set(Notice::error("Passwords do not match."));
            return None;
        }
        self.submitting = true;
        Some(Credentials::new(self.email.trim(), self.password.clone()))
    }

    pub fn finish(&mut self, result: Result<SessionUser, AppError>) {
        self.submitting = false;
        match result {
            Ok(user) => {
                log::info!("sign up: {}", user.uid);
                self.password.clear();
                self.confirm_password.clear();
            }
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    pub fn open_sign_in(&self) -> NavCommand {
        NavCommand::Back
    }
}
