use crate::core::models::product::Product;
use std::collections::HashSet;

/// Distinct category labels of a listing, first-seen order.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for product in products {
        if seen.insert(product.category.as_str()) {
            categories.push(product.category.clone());
        }
    }

    categories
}

/// Narrows a listing by case-insensitive name substring and an
/// optional exact category match.
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let needle = search.to_lowercase();

    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .filter(|product| category.is_none_or(|c| product.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::product::ProductBuilder;

    fn product(id: &str, name: &str, category: &str) -> Product {
        ProductBuilder::default()
            .id(id)
            .name(name)
            .category(category)
            .build()
            .unwrap()
    }

    #[test]
    fn test_distinct_categories_dedupes_in_first_seen_order() {
        let products = vec![
            product("p1", "MacBook Air", "Electronics"),
            product("p2", "Windrunner Jacket", "Clothing"),
            product("p3", "QLED TV", "Electronics"),
        ];

        assert_eq!(
            distinct_categories(&products),
            vec!["Electronics", "Clothing"]
        );
    }

    #[test]
    fn test_filter_matches_name_case_insensitively() {
        let products = vec![
            product("p1", "MacBook Air", "Electronics"),
            product("p2", "Billy Bookcase", "Furniture"),
        ];

        let hits = filter_products(&products, "macbook", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
    }

    #[test]
    fn test_filter_combines_search_and_category() {
        let products = vec![
            product("p1", "MacBook Air", "Electronics"),
            product("p2", "QLED TV", "Electronics"),
            product("p3", "Billy Bookcase", "Furniture"),
        ];

        let hits = filter_products(&products, "b", Some("Electronics"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");

        let all_electronics = filter_products(&products, "", Some("Electronics"));
        assert_eq!(all_electronics.len(), 2);
    }
}
