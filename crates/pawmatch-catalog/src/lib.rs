//! Catalog view controller: filter, sort, pagination and favorites state,
//! the two-step fetch protocol, match generation and login submission.

pub mod auth;
pub mod controller;
pub mod notice;
pub mod state;

pub use auth::{submit_login, LoginOutcome};
pub use controller::{fetch_page, CatalogController, MatchOutcome};
pub use notice::{Notice, NoticeLevel};
pub use state::{CatalogAction, CatalogState, Effect, FetchOutcome, ResolvedPage, SearchTicket};
