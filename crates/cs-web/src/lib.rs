//! Website logic for Celestial Sword.
//!
//! Covers the account flows (login, registration, logout, session restore)
//! behind an injectable [`AuthService`], the leaderboards, support tickets,
//! and the modal/navigation state of the marketing site.

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod service;
pub mod session;
pub mod ui;
pub mod validate;

pub use config::WebConfig;
pub use error::{WebError, WebResult};
pub use leaderboard::{Board, LeaderboardTab, Leaderboards};
pub use service::{
    AuthGrant, AuthService, MockAuthService, RegistrationForm, SupportTicket, TicketReceipt, User,
};
pub use session::{TOKEN_KEY, WebsiteSession};
pub use ui::{Modal, UiEvent, UiState};
