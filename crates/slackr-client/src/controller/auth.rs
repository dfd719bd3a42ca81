use tracing::{info, warn};

use slackr_types::api::{AuthResponse, LoginRequest, RegisterRequest};
use slackr_types::{UserId, UserProfile};

use crate::error::{ClientError, Result};
use crate::transport::Transport;
use crate::view::Page;

use super::{App, Completion};

fn required(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        Err(ClientError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

fn validate_login(email: &str, password: &str) -> Result<()> {
    required(email, "Please enter an email")?;
    required(password, "Please enter a password")
}

fn validate_registration(email: &str, password: &str, confirm: &str, name: &str) -> Result<()> {
    required(name, "Please enter a name")?;
    required(email, "Please enter an email")?;
    required(password, "Please enter a password")?;
    if password != confirm {
        return Err(ClientError::Validation(
            "Password must match, please try again".into(),
        ));
    }
    Ok(())
}

impl<T: Transport> App<T> {
    pub(super) fn show_register(&mut self) {
        if self.view.page == Page::Login {
            self.view.page = Page::Register;
        }
    }

    pub(super) fn show_login(&mut self) {
        if self.view.page == Page::Register {
            self.view.page = Page::Login;
        }
    }

    pub(super) fn log_in(&mut self, email: String, password: String) {
        if let Err(e) = validate_login(&email, &password) {
            return self.fail(e);
        }

        let backend = self.backend.clone();
        let req = LoginRequest { email, password };
        self.spawn(async move { Completion::Authenticated(backend.login(&req).await) });
    }

    pub(super) fn register(
        &mut self,
        email: String,
        password: String,
        password_confirm: String,
        name: String,
    ) {
        if let Err(e) = validate_registration(&email, &password, &password_confirm, &name) {
            return self.fail(e);
        }

        let backend = self.backend.clone();
        let req = RegisterRequest {
            email,
            password,
            name,
        };
        self.spawn(async move { Completion::Authenticated(backend.register(&req).await) });
    }

    pub(super) fn authenticated(&mut self, result: Result<AuthResponse>) {
        match result {
            Ok(auth) => {
                info!(user_id = auth.user_id, "signed in");
                self.session.set_token(Some(auth.token));
                self.session.set_user_id(Some(auth.user_id));
                self.show_home();
            }
            Err(e) => self.fail(e),
        }
    }

    /// Switches to the home page and refreshes the navbar name and the sidebar.
    pub(super) fn show_home(&mut self) {
        let Some((token, user_id)) = self.require_user() else {
            return;
        };
        self.view.page = Page::Home;

        let backend = self.backend.clone();
        let name_token = token.clone();
        self.spawn(async move {
            Completion::OwnName {
                user_id,
                result: backend.user(&name_token, user_id).await,
            }
        });

        self.refresh_channels(token, user_id);
    }

    pub(super) fn refresh_channels(&mut self, token: String, user_id: UserId) {
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::Channels {
                user_id,
                result: backend.channels(&token).await,
            }
        });
    }

    pub(super) fn own_name(&mut self, user_id: UserId, result: Result<UserProfile>) {
        if self.session.user_id() != Some(user_id) {
            return;
        }
        match result {
            Ok(profile) => {
                self.view.username = Some(profile.name.clone());
                self.session.set_name(Some(profile.name));
            }
            Err(e) => self.fail(e),
        }
    }

    pub(super) fn sign_out(&mut self) {
        if let Some(token) = self.session.token().map(str::to_owned) {
            let backend = self.backend.clone();
            self.spawn(async move { Completion::LoggedOut(backend.logout(&token).await) });
        }

        info!(user_id = ?self.session.user_id(), "signed out");
        self.session.clear();
        self.view.reset();
    }

    pub(super) fn logged_out(&mut self, result: Result<()>) {
        if let Err(e) = result {
            warn!("logout request failed after local sign-out");
            self.fail(e);
        }
    }
}
