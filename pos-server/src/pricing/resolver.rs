//! Price Resolver

use crate::db::models::MenuItem;
use crate::db::repository::{RepoResult, SpacePriceRepository};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Pick the effective price from an optional override and the item's own
/// price fields
pub fn resolve_price(override_price: Option<f64>, item: &MenuItem) -> f64 {
    override_price
        .or(item.base_price)
        .or(item.price)
        .unwrap_or(0.0)
}

/// Resolves an item's price for a seating space
#[derive(Clone)]
pub struct PriceResolver {
    space_prices: SpacePriceRepository,
}

impl PriceResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            space_prices: SpacePriceRepository::new(db),
        }
    }

    /// The price to charge for `item` when served in `space`
    ///
    /// `space` is optional: tables without a resolvable space fall straight
    /// through to the item's own prices.
    pub async fn price_for(&self, item: &MenuItem, space: Option<&RecordId>) -> RepoResult<f64> {
        let override_price = match (item.id.as_ref(), space) {
            (Some(item_id), Some(space_id)) => self
                .space_prices
                .find_for(item_id, space_id)
                .await?
                .map(|sp| sp.price),
            _ => None,
        };
        Ok(resolve_price(override_price, item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(base_price: Option<f64>, price: Option<f64>) -> MenuItem {
        MenuItem {
            id: Some("menu_item:paneer".parse().unwrap()),
            restaurant: "restaurant:r1".parse().unwrap(),
            category: "category:mains".parse().unwrap(),
            name: "Paneer Tikka".to_string(),
            base_price,
            price,
            cost: None,
            is_spicy_available: false,
            is_jain_available: false,
            image: None,
            sort_order: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(resolve_price(Some(120.0), &item(Some(100.0), None)), 120.0);
    }

    #[test]
    fn test_base_price_without_override() {
        assert_eq!(resolve_price(None, &item(Some(100.0), Some(80.0))), 100.0);
    }

    #[test]
    fn test_legacy_price_fallback() {
        assert_eq!(resolve_price(None, &item(None, Some(80.0))), 80.0);
    }

    #[test]
    fn test_no_price_is_zero() {
        assert_eq!(resolve_price(None, &item(None, None)), 0.0);
    }
}
