//! Dashboard routes and the navigation rail.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Recipes,
    Users,
    Categories,
    Comments,
    Settings,
    Notifications,
    Login,
}

impl Route {
    pub const ALL: &'static [Route] = &[
        Route::Dashboard,
        Route::Recipes,
        Route::Users,
        Route::Categories,
        Route::Comments,
        Route::Settings,
        Route::Notifications,
        Route::Login,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Recipes => "/recipes",
            Route::Users => "/users",
            Route::Categories => "/categories",
            Route::Comments => "/comments",
            Route::Settings => "/settings",
            Route::Notifications => "/notifications",
            Route::Login => "/login",
        }
    }

    /// Resolve a location to its top-level route. Nested paths ("/recipes/12")
    /// and query strings belong to their parent route.
    pub fn parse(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or("");
        let first = path.trim_start_matches('/').split('/').next().unwrap_or("");

        match first {
            "" => Some(Route::Dashboard),
            "recipes" => Some(Route::Recipes),
            "users" => Some(Route::Users),
            "categories" => Some(Route::Categories),
            "comments" => Some(Route::Comments),
            "settings" => Some(Route::Settings),
            "notifications" => Some(Route::Notifications),
            "login" => Some(Route::Login),
            _ => None,
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

/// Entries of the navigation rail, top to bottom.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        route: Route::Dashboard,
    },
    NavItem {
        label: "Recipes",
        route: Route::Recipes,
    },
    NavItem {
        label: "Users",
        route: Route::Users,
    },
    NavItem {
        label: "Categories",
        route: Route::Categories,
    },
    NavItem {
        label: "Comments",
        route: Route::Comments,
    },
    NavItem {
        label: "Notifications",
        route: Route::Notifications,
    },
    NavItem {
        label: "Settings",
        route: Route::Settings,
    },
];

/// Navigation rail state: which entry is active and whether labels are shown.
#[derive(Debug, Clone)]
pub struct NavRail {
    active: Route,
    collapsed: bool,
}

impl Default for NavRail {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl NavRail {
    pub fn new(active: Route) -> Self {
        Self {
            active,
            collapsed: false,
        }
    }

    pub fn active(&self) -> Route {
        self.active
    }

    pub fn navigate(&mut self, route: Route) {
        self.active = route;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Entries paired with whether each is the active one.
    pub fn items(&self) -> impl Iterator<Item = (&'static NavItem, bool)> + '_ {
        NAV_ITEMS
            .iter()
            .map(move |item| (item, item.route == self.active))
    }
}
