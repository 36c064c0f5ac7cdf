//! View routing and the session guard.

use std::fmt;

use crate::model::FavoriteSet;
use crate::session::Session;

/// The three navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Catalog,
    Match,
}

impl View {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            View::Login => "/",
            View::Catalog => "/search",
            View::Match => "/match",
        }
    }

    #[must_use]
    pub fn requires_session(self) -> bool {
        !matches!(self, View::Login)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Guard decision for a requested view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted(View),
    Redirect(View),
}

impl Access {
    /// The view that actually gets shown.
    #[must_use]
    pub fn view(self) -> View {
        match self {
            Access::Granted(view) | Access::Redirect(view) => view,
        }
    }
}

/// Protected views require an authenticated session.
#[must_use]
pub fn guard(view: View, session: &Session) -> Access {
    if view.requires_session() && !session.is_authenticated() {
        Access::Redirect(View::Login)
    } else {
        Access::Granted(view)
    }
}

/// Applies the guard, then sends `Match` back to `Catalog` when there is
/// nothing to match against.
#[must_use]
pub fn navigate(view: View, session: &Session, favorites: &FavoriteSet) -> Access {
    match guard(view, session) {
        Access::Granted(View::Match) if favorites.is_empty() => Access::Redirect(View::Catalog),
        access => access,
    }
}
