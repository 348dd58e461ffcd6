//! # Menu
//!
//! Groups the flat product list under its categories for the menu screen.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Category, Product};

/// One category and the products shown under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub category: Category,
    pub products: Vec<Product>,
}

/// Builds menu sections.
///
/// - Sections follow `display_order`; ties and unordered categories keep
///   server order, unordered ones after all ordered ones.
/// - Products keep server order within a section.
/// - Inactive categories and products are left out, as are products whose
///   category is missing or unknown.
/// - A category with no active products still gets an (empty) section.
pub fn build_menu(categories: Vec<Category>, products: Vec<Product>) -> Vec<MenuSection> {
    let mut by_category: HashMap<String, Vec<Product>> = HashMap::new();
    for product in products.into_iter().filter(|p| p.is_active) {
        if let Some(category_id) = product.category_id.clone() {
            by_category.entry(category_id).or_default().push(product);
        }
    }

    let mut categories: Vec<Category> = categories.into_iter().filter(|c| c.is_active).collect();
    // sort_by_key is stable, so equal keys keep server order
    categories.sort_by_key(|c| (c.display_order.is_none(), c.display_order));

    categories
        .into_iter()
        .map(|category| {
            let products = by_category.remove(&category.id).unwrap_or_default();
            MenuSection { category, products }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, order: Option<i32>) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {id}"),
            description: None,
            display_order: order,
            is_active: true,
        }
    }

    fn product(id: &str, category_id: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            category_id: category_id.map(str::to_string),
            name: format!("Product {id}"),
            description: None,
            price_cents: 100,
            image_url: None,
            is_active: true,
        }
    }

    fn ids(section: &MenuSection) -> Vec<&str> {
        section.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_groups_products_in_server_order() {
        let menu = build_menu(
            vec![category("drinks", None), category("food", None)],
            vec![
                product("tea", Some("drinks")),
                product("kebab", Some("food")),
                product("coffee", Some("drinks")),
            ],
        );

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].category.id, "drinks");
        assert_eq!(ids(&menu[0]), vec!["tea", "coffee"]);
        assert_eq!(ids(&menu[1]), vec!["kebab"]);
    }

    #[test]
    fn test_display_order_then_unordered() {
        let menu = build_menu(
            vec![
                category("c", None),
                category("b", Some(2)),
                category("a", Some(1)),
                category("d", None),
            ],
            vec![],
        );

        let order: Vec<&str> = menu.iter().map(|s| s.category.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_inactive_and_orphans_are_dropped() {
        let mut hidden = category("hidden", None);
        hidden.is_active = false;
        let mut sold_out = product("sold-out", Some("drinks"));
        sold_out.is_active = false;

        let menu = build_menu(
            vec![category("drinks", None), hidden],
            vec![
                sold_out,
                product("water", Some("drinks")),
                product("secret", Some("hidden")),
                product("stray", None),
                product("lost", Some("unknown")),
            ],
        );

        assert_eq!(menu.len(), 1);
        assert_eq!(ids(&menu[0]), vec!["water"]);
    }

    #[test]
    fn test_empty_category_keeps_its_section() {
        let menu = build_menu(vec![category("desserts", None)], vec![]);
        assert_eq!(menu.len(), 1);
        assert!(menu[0].products.is_empty());
    }
}
