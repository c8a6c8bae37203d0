//! View-side helpers for the admin dashboard: routes, navigation rail,
//! header, statistic cards and the logout control.

mod logout;
mod routes;
mod widgets;

pub use logout::{LogoutControl, LogoutOutcome};
pub use routes::{NavItem, NavRail, Route, NAV_ITEMS};
pub use widgets::{
    badge_label, dashboard_cards, initials, DashboardStats, HeaderState, StatCard, BADGE_MAX,
};
