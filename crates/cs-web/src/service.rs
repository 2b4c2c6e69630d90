//! The remote account service and its canned in-process implementation.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WebConfig;
use crate::error::{WebError, WebResult};

/// A site account as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    pub id: u32,
    /// Display name, also accepted as a login identifier.
    pub username: String,
    /// Contact address, also accepted as a login identifier.
    pub email: String,
    /// Level of the account's main character.
    pub level: u32,
    /// Home game server.
    pub server: String,
}

/// A successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// The authenticated account.
    pub user: User,
    /// Opaque session token.
    pub token: String,
}

/// Fields of the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Requested username.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirm_password: String,
    /// Selected game server.
    pub server: String,
    /// Whether the terms checkbox is ticked.
    pub accept_terms: bool,
}

/// Fields of the support form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportTicket {
    /// Sender's name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Short summary.
    pub subject: String,
    /// Full description.
    pub message: String,
}

/// Acknowledgement for a filed support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketReceipt {
    /// Ticket id.
    pub id: Uuid,
    /// When the service accepted the ticket.
    pub received_at: DateTime<Utc>,
}

/// The account backend the website talks to.
///
/// Failures the visitor should see come back as [`WebError::Rejected`].
pub trait AuthService {
    /// Log in by email or username.
    fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> impl Future<Output = WebResult<AuthGrant>> + Send;

    /// Create an account. Returns the confirmation text.
    fn register(&self, form: &RegistrationForm) -> impl Future<Output = WebResult<String>> + Send;

    /// File a support ticket.
    fn submit_support_ticket(
        &self,
        ticket: &SupportTicket,
    ) -> impl Future<Output = WebResult<TicketReceipt>> + Send;

    /// Look up the account a token belongs to. `None` for unknown tokens.
    fn session_user(&self, token: &str) -> impl Future<Output = WebResult<Option<User>>> + Send;
}

/// Message for a failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid email/username or password";
/// Message for a registration that collides with an existing account.
pub const ACCOUNT_EXISTS: &str = "Username or email already exists";

const RESERVED_USERNAME: &str = "admin";
const RESERVED_EMAIL: &str = "admin@example.com";

struct Account {
    user: User,
    password: &'static str,
}

fn account(
    id: u32,
    username: &str,
    email: &str,
    password: &'static str,
    level: u32,
    server: &str,
) -> Account {
    Account {
        user: User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            level,
            server: server.to_string(),
        },
        password,
    }
}

const TOKEN_PREFIX: &str = "mock";

/// In-process [`AuthService`] with a fixed account table and simulated latency.
///
/// Tokens have the form `mock.<account id>.<uuid>` so a remembered login can
/// be resolved by a later process without shared server state.
pub struct MockAuthService {
    latency: Duration,
    accounts: Vec<Account>,
}

impl std::fmt::Debug for MockAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuthService")
            .field("latency", &self.latency)
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new(&WebConfig::default())
    }
}

impl MockAuthService {
    /// Create the service with the latency from `config`.
    pub fn new(config: &WebConfig) -> Self {
        Self {
            latency: config.latency,
            accounts: vec![
                account(1, "DragonSlayer", "dragon@example.com", "password123", 85, "Celestial"),
                account(2, "MysticMage", "mage@example.com", "mystic2024", 78, "Mystic"),
                account(3, "ShadowArcher", "archer@example.com", "arrows456", 71, "Shadow"),
            ],
        }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn find(&self, identifier: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.user.email == identifier || a.user.username == identifier)
    }
}

fn issue_token(user_id: u32) -> String {
    format!("{TOKEN_PREFIX}.{user_id}.{}", Uuid::new_v4())
}

fn token_user_id(token: &str) -> Option<u32> {
    let mut parts = token.split('.');
    if parts.next()? != TOKEN_PREFIX {
        return None;
    }
    let id = parts.next()?.parse().ok()?;
    Uuid::parse_str(parts.next()?).ok()?;
    parts.next().is_none().then_some(id)
}

impl AuthService for MockAuthService {
    async fn authenticate(&self, identifier: &str, password: &str) -> WebResult<AuthGrant> {
        self.round_trip().await;
        let identifier = identifier.trim();
        let Some(account) = self.find(identifier).filter(|a| a.password == password) else {
            tracing::info!(identifier, "login rejected");
            return Err(WebError::Rejected(INVALID_CREDENTIALS.to_string()));
        };

        let token = issue_token(account.user.id);
        tracing::info!(user = %account.user.username, "login accepted");
        Ok(AuthGrant {
            user: account.user.clone(),
            token,
        })
    }

    async fn register(&self, form: &RegistrationForm) -> WebResult<String> {
        self.round_trip().await;
        let username = form.username.trim();
        let email = form.email.trim();
        if username.eq_ignore_ascii_case(RESERVED_USERNAME)
            || email.eq_ignore_ascii_case(RESERVED_EMAIL)
        {
            return Err(WebError::Rejected(ACCOUNT_EXISTS.to_string()));
        }
        tracing::info!(username, server = %form.server, "registration accepted");
        Ok("Registration successful! Please check your email to verify your account.".to_string())
    }

    async fn submit_support_ticket(&self, ticket: &SupportTicket) -> WebResult<TicketReceipt> {
        self.round_trip().await;
        let receipt = TicketReceipt {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
        };
        tracing::info!(id = %receipt.id, subject = %ticket.subject, "support ticket filed");
        Ok(receipt)
    }

    async fn session_user(&self, token: &str) -> WebResult<Option<User>> {
        self.round_trip().await;
        let Some(id) = token_user_id(token) else {
            return Ok(None);
        };
        Ok(self
            .accounts
            .iter()
            .find(|a| a.user.id == id)
            .map(|a| a.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> MockAuthService {
        MockAuthService::new(&WebConfig::default().with_latency_ms(0))
    }

    #[tokio::test]
    async fn login_by_username_or_email() {
        let svc = instant();
        let grant = svc.authenticate("DragonSlayer", "password123").await.unwrap();
        assert_eq!(grant.user.level, 85);
        assert!(grant.token.starts_with("mock.1."));

        let grant = svc
            .authenticate("dragon@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(grant.user.username, "DragonSlayer");
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let svc = instant();
        let err = svc.authenticate("DragonSlayer", "password124").await.unwrap_err();
        assert!(matches!(err, WebError::Rejected(ref m) if m == INVALID_CREDENTIALS));
        let err = svc.authenticate("Nobody", "password123").await.unwrap_err();
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn tokens_resolve_to_their_user() {
        let svc = instant();
        let a = svc.authenticate("MysticMage", "mystic2024").await.unwrap();
        let b = svc.authenticate("MysticMage", "mystic2024").await.unwrap();
        assert_ne!(a.token, b.token);
        let user = svc.session_user(&a.token).await.unwrap().unwrap();
        assert_eq!(user.username, "MysticMage");
        assert_eq!(svc.session_user("token-unknown").await.unwrap(), None);
        assert_eq!(svc.session_user("mock.1.not-a-uuid").await.unwrap(), None);
        let orphan = format!("mock.99.{}", Uuid::new_v4());
        assert_eq!(svc.session_user(&orphan).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reserved_names_rejected() {
        let svc = instant();
        let mut form = RegistrationForm {
            username: "admin".to_string(),
            email: "someone@example.com".to_string(),
            ..RegistrationForm::default()
        };
        let err = svc.register(&form).await.unwrap_err();
        assert_eq!(err.to_string(), ACCOUNT_EXISTS);

        form.username = "Someone".to_string();
        form.email = "admin@example.com".to_string();
        assert!(svc.register(&form).await.is_err());

        form.email = "someone@example.com".to_string();
        let msg = svc.register(&form).await.unwrap();
        assert!(msg.starts_with("Registration successful"));
    }

    #[tokio::test(start_paused = true)]
    async fn calls_take_the_configured_latency() {
        let svc = MockAuthService::default();
        let start = tokio::time::Instant::now();
        svc.authenticate("DragonSlayer", "password123").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn tickets_get_distinct_ids() {
        let svc = instant();
        let ticket = SupportTicket {
            subject: "Billing".to_string(),
            ..SupportTicket::default()
        };
        let a = svc.submit_support_ticket(&ticket).await.unwrap();
        let b = svc.submit_support_ticket(&ticket).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
