//! Route table and navigation guard.

use std::fmt;

use expapp_shared::types::ExpenseId;

use super::state::AppState;

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only anonymous visitors (signup, login).
    PublicOnly,
    /// Only logged-in users.
    Protected,
}

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` (redirects to the dashboard).
    Root,
    /// `/signup`
    Signup,
    /// `/login`
    Login,
    /// `/dashboard`
    Dashboard,
    /// `/expenses`
    Expenses,
    /// `/expenses/new`
    NewExpense,
    /// `/expenses/:id`
    ExpenseDetail(ExpenseId),
    /// `/users`
    Users,
    /// `/rules`
    Rules,
    /// `/settings`
    Settings,
    /// `/cookie-inspector`
    CookieInspector,
}

impl Route {
    /// Parses a path. Query strings, fragments and a trailing slash are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let route = match path {
            "/" => Self::Root,
            "/signup" => Self::Signup,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/expenses" => Self::Expenses,
            "/expenses/new" => Self::NewExpense,
            "/users" => Self::Users,
            "/rules" => Self::Rules,
            "/settings" => Self::Settings,
            "/cookie-inspector" => Self::CookieInspector,
            other => {
                let id = other.strip_prefix("/expenses/")?;
                Self::ExpenseDetail(id.parse().ok()?)
            }
        };
        Some(route)
    }

    /// Canonical path.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".into(),
            Self::Signup => "/signup".into(),
            Self::Login => "/login".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::Expenses => "/expenses".into(),
            Self::NewExpense => "/expenses/new".into(),
            Self::ExpenseDetail(id) => format!("/expenses/{id}"),
            Self::Users => "/users".into(),
            Self::Rules => "/rules".into(),
            Self::Settings => "/settings".into(),
            Self::CookieInspector => "/cookie-inspector".into(),
        }
    }

    /// Access class. `None` for the root redirect.
    #[must_use]
    pub const fn access(&self) -> Option<Access> {
        match self {
            Self::Root => None,
            Self::Signup | Self::Login => Some(Access::PublicOnly),
            _ => Some(Access::Protected),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the router should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// State not hydrated yet; show a placeholder.
    Loading,
    /// Render the page.
    Render(Route),
    /// Replace the location with another route.
    Redirect(Route),
    /// No such route.
    NotFound,
}

/// Decides a single navigation step for `path`.
#[must_use]
pub fn guard(state: &AppState, path: &str) -> Navigation {
    let Some(route) = Route::parse(path) else {
        return Navigation::NotFound;
    };
    if !state.is_initialized() {
        return Navigation::Loading;
    }
    let Some(access) = route.access() else {
        return Navigation::Redirect(Route::Dashboard);
    };

    match (access, state.is_authenticated()) {
        (Access::Protected, false) => Navigation::Redirect(Route::Login),
        (Access::PublicOnly, true) => Navigation::Redirect(Route::Dashboard),
        _ => Navigation::Render(route),
    }
}

/// Follows redirects from `path` until a page renders, is loading, or is not found.
#[must_use]
pub fn resolve(state: &AppState, path: &str) -> Navigation {
    // Root → dashboard → login is the longest chain.
    const MAX_HOPS: usize = 4;

    let mut next = guard(state, path);
    for _ in 0..MAX_HOPS {
        match next {
            Navigation::Redirect(route) => next = guard(state, &route.path()),
            done => return done,
        }
    }
    next
}
