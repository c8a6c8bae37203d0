//! Header, badge and statistic-card helpers.

use serde::Serialize;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::PageRequest;

/// Highest count a badge shows literally.
pub const BADGE_MAX: u32 = 9;

/// Avatar initials: first character of each word, uppercased, at most two.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Badge text for an unread count. No badge at zero; "9+" above nine.
pub fn badge_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        n if n <= BADGE_MAX => Some(n.to_string()),
        _ => Some(format!("{}+", BADGE_MAX)),
    }
}

/// Header bar state.
#[derive(Debug, Clone, Default)]
pub struct HeaderState {
    pub display_name: String,
    pub search: String,
    pub unread: u32,
}

impl HeaderState {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.display_name)
    }

    pub fn badge(&self) -> Option<String> {
        badge_label(self.unread)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Trimmed search text, or None when blank.
    pub fn query(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|q| !q.is_empty())
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub recipes: u64,
    pub ingredients: u64,
    pub categories: u64,
    pub sub_categories: u64,
}

impl DashboardStats {
    /// Fetch totals from the backend, one round trip per resource.
    pub async fn fetch(client: &ApiClient) -> Result<Self, ClientError> {
        let recipes = client.recipes().list(PageRequest::new(0, 1)).await?;
        let ingredients = client.ingredients().list().await?;
        let categories = client.categories().list().await?;

        Ok(Self {
            recipes: recipes.total_elements,
            ingredients: ingredients.len() as u64,
            categories: categories.len() as u64,
            sub_categories: categories
                .iter()
                .map(|c| c.sub_categories.len() as u64)
                .sum(),
        })
    }
}

/// Statistic cards for the dashboard. The notifications card carries the
/// unread badge.
pub fn dashboard_cards(stats: &DashboardStats, unread: u32) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Recipes",
            value: stats.recipes,
            badge: None,
        },
        StatCard {
            title: "Ingredients",
            value: stats.ingredients,
            badge: None,
        },
        StatCard {
            title: "Categories",
            value: stats.categories,
            badge: None,
        },
        StatCard {
            title: "Sub-categories",
            value: stats.sub_categories,
            badge: None,
        },
        StatCard {
            title: "Notifications",
            value: u64::from(unread),
            badge: badge_label(unread),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::signed_in_client;
    use crate::http::{Method, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Admin User"), "AU");
        assert_eq!(initials("Admin"), "A");
        assert_eq!(initials("mary jane watson"), "MJ");
        assert_eq!(initials("  "), "");
        assert_eq!(initials("élodie durand"), "ÉD");
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(1).as_deref(), Some("1"));
        assert_eq!(badge_label(9).as_deref(), Some("9"));
        assert_eq!(badge_label(10).as_deref(), Some("9+"));
        assert_eq!(badge_label(250).as_deref(), Some("9+"));
    }

    #[test]
    fn test_header_search() {
        let mut header = HeaderState::new("Admin User");
        assert_eq!(header.initials(), "AU");
        assert_eq!(header.query(), None);

        header.set_search("  risotto ");
        assert_eq!(header.query(), Some("risotto"));
        header.clear_search();
        assert_eq!(header.query(), None);
    }

    #[tokio::test]
    async fn test_stats_fetch() {
        let page = json!({
            "content": [], "totalElements": 42, "totalPages": 42,
            "size": 1, "number": 0, "first": true, "last": false
        });
        let ingredients = json!([
            { "id": 1, "ingredientName": "Salt" },
            { "id": 2, "ingredientName": "Pepper" }
        ]);
        let categories = json!([{
            "id": 1,
            "name": "Mains",
            "subCategories": [{ "id": 1, "name": "Pasta" }, { "id": 2, "name": "Curry" }]
        }]);
        let mock = MockTransport::new()
            .with_result(Method::GET, "/recipes", page)
            .with_result(Method::GET, "/ingredients/getAll", ingredients)
            .with_result(Method::GET, "/categories/getAll", categories);
        let client = signed_in_client(Arc::new(mock));

        let stats = DashboardStats::fetch(&client).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                recipes: 42,
                ingredients: 2,
                categories: 1,
                sub_categories: 2,
            }
        );

        let cards = dashboard_cards(&stats, 12);
        assert_eq!(cards[0].value, 42);
        assert_eq!(cards[4].badge.as_deref(), Some("9+"));
        assert!(cards[..4].iter().all(|c| c.badge.is_none()));
    }
}
