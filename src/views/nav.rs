//! Navigation bar

use crate::{router::Route, services::session::Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Route(Route),
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
}

impl NavLink {
    fn to(label: &'static str, route: Route) -> Self {
        Self {
            label,
            target: NavTarget::Route(route),
        }
    }
}

/// Links to show for `session`
pub fn nav_links(session: &Session) -> Vec<NavLink> {
    let mut links = vec![NavLink::to("Books", Route::Catalog)];

    if session.is_authenticated() {
        links.push(NavLink::to("Account", Route::Account));
        links.push(NavLink {
            label: "Logout",
            target: NavTarget::Logout,
        });
    } else {
        links.push(NavLink::to("Login", Route::Login));
        links.push(NavLink::to("Register", Route::Register));
    }

    links
}
