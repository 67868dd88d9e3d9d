use log::debug;
use serde::Deserialize;

use crate::analysis::{SkinCategory, Undertone};
use crate::error::VisagistError;

/// Default makeup product API endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://makeup-api.herokuapp.com/api/v1/products.json";

/// One shade of a product.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Shade {
    /// Shade name, e.g. "Universal Nude".
    #[serde(default)]
    pub colour_name: String,
    /// Shade color as `#rrggbb`.
    #[serde(default)]
    pub hex_value: String,
}

/// One product from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Display price, currency left to the API.
    #[serde(default)]
    pub price: Option<String>,
    /// Catalog category, e.g. "liquid".
    #[serde(default)]
    pub category: Option<String>,
    /// Product type, e.g. "foundation".
    #[serde(default)]
    pub product_type: String,
    /// Product page link.
    #[serde(default)]
    pub product_link: Option<String>,
    /// Product image link.
    #[serde(default)]
    pub image_link: Option<String>,
    /// Available shades.
    #[serde(default)]
    pub product_colors: Vec<Shade>,
}

/// Shades of a product suited to the given skin category and undertone.
///
/// A shade is kept when its lower-cased name contains the category token
/// (e.g. "light_medium"), the undertone token, or the literal "universal".
pub fn filter_shades<'a>(
    product: &'a Product,
    category: SkinCategory,
    undertone: Undertone,
) -> Vec<&'a Shade> {
    product
        .product_colors
        .iter()
        .filter(|shade| {
            let name = shade.colour_name.to_lowercase();
            name.contains(category.token())
                || name.contains(undertone.token())
                || name.contains("universal")
        })
        .collect()
}

/// Makeup product catalog client.
pub struct MakeupCatalog {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl MakeupCatalog {
    /// Create a client against the default catalog endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_CATALOG_URL)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Fetch products filtered by brand and product type.
    ///
    /// Both filters are lower-cased before being sent; either may be `None`
    /// to leave that axis unfiltered.
    pub fn products(
        &self,
        brand: Option<&str>,
        product_type: Option<&str>,
    ) -> Result<Vec<Product>, VisagistError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(brand) = brand {
            params.push(("brand", brand.to_lowercase()));
        }
        if let Some(product_type) = product_type {
            params.push(("product_type", product_type.to_lowercase()));
        }
        debug!("catalog query: {params:?}");

        let response = self.http.get(&self.base_url).query(&params).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisagistError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }
}

impl Default for MakeupCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_shades(names: &[&str]) -> Product {
        Product {
            name: "Liquid Foundation".into(),
            brand: "maybelline".into(),
            price: Some("9.99".into()),
            category: Some("liquid".into()),
            product_type: "foundation".into(),
            product_link: None,
            image_link: None,
            product_colors: names
                .iter()
                .map(|name| Shade {
                    colour_name: (*name).into(),
                    hex_value: "#d2a181".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn filter_matches_category_token() {
        let product = product_with_shades(&["Light Medium Beige", "Porcelain", "Deep Honey"]);
        let shades = filter_shades(&product, SkinCategory::LightMedium, Undertone::Neutral);
        // "light_medium" is the category token; none of these names carry the
        // underscore form, so only an undertone or universal match could hit
        assert!(shades.is_empty());

        let product = product_with_shades(&["light_medium beige", "porcelain"]);
        let shades = filter_shades(&product, SkinCategory::LightMedium, Undertone::Neutral);
        assert_eq!(shades.len(), 1);
        assert_eq!(shades[0].colour_name, "light_medium beige");
    }

    #[test]
    fn filter_matches_undertone_token() {
        let product = product_with_shades(&["Warm Sand", "Cool Ivory", "Golden"]);
        let shades = filter_shades(&product, SkinCategory::Medium, Undertone::Warm);
        assert_eq!(shades.len(), 1);
        assert_eq!(shades[0].colour_name, "Warm Sand");
    }

    #[test]
    fn universal_shades_always_pass() {
        let product = product_with_shades(&["Universal Nude", "Warm Sand"]);
        for category in [
            SkinCategory::VeryLight,
            SkinCategory::Medium,
            SkinCategory::VeryDeep,
        ] {
            for undertone in [Undertone::Warm, Undertone::Cool, Undertone::Neutral] {
                let shades = filter_shades(&product, category, undertone);
                assert!(
                    shades.iter().any(|s| s.colour_name == "Universal Nude"),
                    "{category:?}/{undertone:?} dropped the universal shade"
                );
            }
        }
    }

    #[test]
    fn filter_is_case_insensitive() {
        let product = product_with_shades(&["UNIVERSAL glow", "WARM honey"]);
        let shades = filter_shades(&product, SkinCategory::Deep, Undertone::Warm);
        assert_eq!(shades.len(), 2);
    }

    #[test]
    fn product_deserializes_from_catalog_json() {
        let json = r##"{
            "name": "Fit Me Matte + Poreless Foundation",
            "brand": "maybelline",
            "price": "8.98",
            "category": null,
            "product_type": "foundation",
            "product_link": "https://example.com/fit-me",
            "image_link": "https://example.com/fit-me.jpg",
            "product_colors": [
                {"hex_value": "#F3CFB3", "colour_name": "Fair Porcelain"},
                {"hex_value": "#8D5524", "colour_name": "Deep Bronze"}
            ]
        }"##;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Fit Me Matte + Poreless Foundation");
        assert_eq!(product.product_colors.len(), 2);
        assert_eq!(product.product_colors[1].hex_value, "#8D5524");
        assert!(product.category.is_none());
    }

    #[test]
    fn product_tolerates_missing_fields() {
        let product: Product = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert_eq!(product.brand, "");
        assert!(product.product_colors.is_empty());
    }
}
