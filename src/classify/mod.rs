//! Product-URL classification
//!
//! A pure pattern-matching judgment: given a URL, does its path look like a
//! product page? Known non-product sections are rejected first, then the path
//! is checked against a fixed table of product-URL shapes seen across
//! storefront platforms (generic `/products/`, Amazon `/dp/`, Shopify
//! `-p-<id>`, Magento catalog paths, and so on).
//!
//! The pattern table is compiled once per process and shared read-only.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Path prefixes that are never product pages
const NON_PRODUCT_PREFIXES: &[&str] = &[
    "/cart",
    "/checkout",
    "/account",
    "/login",
    "/register",
    "/search",
    "/category",
    "/blog",
    "/about",
    "/contact",
    "/help",
    "/faq",
    "/terms",
    "/privacy",
];

/// Compiled product-URL patterns, built once at first use
static PRODUCT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/product[s]?/",
        r"/item[s]?/",
        r"/p/",
        r"/pd/",
        // Amazon style
        r"/dp/",
        // Shopify style
        r"/[A-Za-z0-9-]+/[A-Za-z0-9-]+-p-\d+",
        // Magento style
        r"/catalog/product/view/id/\d+",
        r"/shop/[^/]+/\d+",
        r"/products/[^/]+$",
    ]
    .iter()
    .map(|pattern| {
        Regex::new(&format!("(?i){}", pattern)).expect("hardcoded product pattern is valid")
    })
    .collect()
});

/// Patterns that capture a product identifier out of a URL path
static PRODUCT_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/product[s]?/(\d+)",
        r"/item[s]?/(\d+)",
        r"/p/(\d+)",
        r"/pd/(\d+)",
        // Amazon style
        r"/dp/([A-Z0-9]+)",
        // Shopify style
        r"-p-(\d+)",
        // Magento style
        r"/id/(\d+)",
    ]
    .iter()
    .map(|pattern| {
        Regex::new(&format!("(?i){}", pattern)).expect("hardcoded product-id pattern is valid")
    })
    .collect()
});

/// Checks whether a URL is likely a product page
///
/// Pure function: identical input always yields identical output. Unparseable
/// URLs are never product pages.
pub fn is_product_url(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => return false,
    };

    if NON_PRODUCT_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return false;
    }

    PRODUCT_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(&path))
}

/// Attempts to extract a product identifier from a URL
///
/// Returns None when no known identifier shape is present.
pub fn extract_product_id(url: &str) -> Option<String> {
    for pattern in PRODUCT_ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(url) {
            if let Some(id) = captures.get(1) {
                return Some(id.as_str().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_path() {
        assert!(is_product_url("https://shop.example.com/products/red-shoe"));
        assert!(is_product_url("https://shop.example.com/product/123"));
    }

    #[test]
    fn test_items_path() {
        assert!(is_product_url("https://example.com/item/42"));
        assert!(is_product_url("https://example.com/items/blue-mug"));
    }

    #[test]
    fn test_short_product_paths() {
        assert!(is_product_url("https://example.com/p/12345"));
        assert!(is_product_url("https://example.com/pd/12345"));
        assert!(is_product_url("https://example.com/dp/B0000X123"));
    }

    #[test]
    fn test_shopify_style() {
        assert!(is_product_url(
            "https://example.com/shoes/air-runner-p-8821"
        ));
    }

    #[test]
    fn test_magento_style() {
        assert!(is_product_url(
            "https://example.com/catalog/product/view/id/991"
        ));
    }

    #[test]
    fn test_shop_category_id() {
        assert!(is_product_url("https://example.com/shop/mugs/42"));
    }

    #[test]
    fn test_non_product_prefixes_rejected() {
        // /cart/products/1 starts with a blocked prefix, so the pattern table
        // is never consulted
        assert!(!is_product_url("https://example.com/cart/products/1"));
        assert!(!is_product_url("https://example.com/checkout"));
        assert!(!is_product_url("https://example.com/search?q=products"));
        assert!(!is_product_url("https://example.com/blog/new-products"));
        assert!(!is_product_url("https://example.com/login"));
    }

    #[test]
    fn test_plain_pages_rejected() {
        assert!(!is_product_url("https://example.com/"));
        assert!(!is_product_url("https://example.com/shipping"));
        assert!(!is_product_url("https://example.com/stores/berlin"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_product_url("https://example.com/Products/Red-Shoe"));
        assert!(is_product_url("https://example.com/DP/B0000X123"));
    }

    #[test]
    fn test_unparseable_url() {
        assert!(!is_product_url("not a url"));
        assert!(!is_product_url(""));
    }

    #[test]
    fn test_classifier_is_pure() {
        let url = "https://example.com/products/widget";
        let first = is_product_url(url);
        for _ in 0..100 {
            assert_eq!(is_product_url(url), first);
        }
    }

    #[test]
    fn test_extract_numeric_product_id() {
        assert_eq!(
            extract_product_id("https://example.com/products/123"),
            Some("123".to_string())
        );
        assert_eq!(
            extract_product_id("https://example.com/p/98765"),
            Some("98765".to_string())
        );
    }

    #[test]
    fn test_extract_amazon_id() {
        assert_eq!(
            extract_product_id("https://example.com/dp/B0000X123"),
            Some("B0000X123".to_string())
        );
    }

    #[test]
    fn test_extract_shopify_id() {
        assert_eq!(
            extract_product_id("https://example.com/shoes/air-runner-p-8821"),
            Some("8821".to_string())
        );
    }

    #[test]
    fn test_extract_no_id() {
        assert_eq!(
            extract_product_id("https://example.com/products/red-shoe"),
            None
        );
        assert_eq!(extract_product_id("https://example.com/"), None);
    }
}
