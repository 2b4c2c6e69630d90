//! The visitor's account session on the website.

use cs_core::{KeyValueStore, MessageKind, MessageLog};

use crate::error::WebResult;
use crate::service::{AuthService, RegistrationForm, SupportTicket, TicketReceipt, User};
use crate::validate;

/// Store key for the session token.
pub const TOKEN_KEY: &str = "authToken";

const MAX_NOTIFICATIONS: usize = 50;

/// Login state plus the notifications shown to the visitor.
///
/// "Remember me" decides which store keeps the token: `durable` survives a
/// restart, `ephemeral` does not.
pub struct WebsiteSession<S> {
    service: S,
    durable: Box<dyn KeyValueStore>,
    ephemeral: Box<dyn KeyValueStore>,
    user: Option<User>,
    notifications: MessageLog,
}

impl<S: std::fmt::Debug> std::fmt::Debug for WebsiteSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsiteSession")
            .field("service", &self.service)
            .field("user", &self.user)
            .field("notifications", &self.notifications.len())
            .finish()
    }
}

impl<S: AuthService> WebsiteSession<S> {
    /// Create a logged-out session.
    pub fn new(
        service: S,
        durable: Box<dyn KeyValueStore>,
        ephemeral: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            service,
            durable,
            ephemeral,
            user: None,
            notifications: MessageLog::new(MAX_NOTIFICATIONS),
        }
    }

    /// The logged-in account.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Notifications posted so far.
    pub fn notifications(&self) -> &MessageLog {
        &self.notifications
    }

    /// The backing service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The token currently stored, durable store first.
    pub fn stored_token(&self) -> WebResult<Option<String>> {
        if let Some(token) = self.durable.get(TOKEN_KEY)? {
            return Ok(Some(token));
        }
        Ok(self.ephemeral.get(TOKEN_KEY)?)
    }

    /// Log in by email or username.
    pub async fn login(
        &mut self,
        identifier: &str,
        password: &str,
        remember_me: bool,
    ) -> WebResult<User> {
        let grant = match validate::validate_login(identifier, password) {
            Ok(()) => self.service.authenticate(identifier, password).await,
            Err(e) => Err(e),
        };
        let grant = self.report(grant)?;

        let stored = self.store_token(&grant.token, remember_me);
        self.report(stored)?;

        tracing::info!(user = %grant.user.username, remember_me, "logged in");
        self.notifications.post(
            MessageKind::Success,
            format!("Welcome back, {}!", grant.user.username),
        );
        self.user = Some(grant.user.clone());
        Ok(grant.user)
    }

    /// Create an account. Does not log in.
    pub async fn register(&mut self, form: &RegistrationForm) -> WebResult<String> {
        let result = match validate::validate_registration(form) {
            Ok(()) => self.service.register(form).await,
            Err(e) => Err(e),
        };
        let message = self.report(result)?;
        self.notifications.post(MessageKind::Success, message.clone());
        Ok(message)
    }

    /// Forget the token in both stores and the current user.
    pub fn logout(&mut self) -> WebResult<()> {
        let cleared = self.clear_tokens();
        self.report(cleared)?;
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.username, "logged out");
        }
        self.notifications
            .post(MessageKind::Info, "You have been logged out.");
        Ok(())
    }

    /// Resume a session from a stored token.
    ///
    /// Returns the user when the service still knows the token. An unknown
    /// token is removed from both stores.
    pub async fn restore(&mut self) -> WebResult<Option<User>> {
        let Some(token) = self.stored_token()? else {
            return Ok(None);
        };
        match self.service.session_user(&token).await? {
            Some(user) => {
                tracing::info!(user = %user.username, "session restored");
                self.user = Some(user.clone());
                Ok(Some(user))
            }
            None => {
                tracing::debug!("dropping stale session token");
                self.clear_tokens()?;
                Ok(None)
            }
        }
    }

    /// File a support ticket.
    pub async fn submit_support_ticket(
        &mut self,
        ticket: &SupportTicket,
    ) -> WebResult<TicketReceipt> {
        let result = match validate::validate_ticket(ticket) {
            Ok(()) => self.service.submit_support_ticket(ticket).await,
            Err(e) => Err(e),
        };
        let receipt = self.report(result)?;
        self.notifications.post(
            MessageKind::Success,
            "Support ticket submitted! We'll get back to you soon.",
        );
        Ok(receipt)
    }

    fn store_token(&mut self, token: &str, remember_me: bool) -> WebResult<()> {
        self.clear_tokens()?;
        let store = if remember_me {
            &mut self.durable
        } else {
            &mut self.ephemeral
        };
        store.set(TOKEN_KEY, token)?;
        Ok(())
    }

    fn clear_tokens(&mut self) -> WebResult<()> {
        self.durable.remove(TOKEN_KEY)?;
        self.ephemeral.remove(TOKEN_KEY)?;
        Ok(())
    }

    /// Post failures as error notifications and pass the result through.
    fn report<T>(&mut self, result: WebResult<T>) -> WebResult<T> {
        if let Err(e) = &result {
            self.notifications.post(MessageKind::Error, e.to_string());
        }
        result
    }
}
