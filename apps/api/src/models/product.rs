use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = u32;

/// A catalog entry as supplied by the catalog and returned by the products API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, name: &str, category: Category, price: Decimal) -> Self {
        Self {
            id,
            name: name.to_string(),
            category,
            price,
            description: None,
            stock: None,
            status: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn price_band(&self) -> PriceBand {
        PriceBand::of(self.price)
    }

    /// Price rendered as a US currency string, e.g. `$1,299.50`.
    pub fn formatted_price(&self) -> String {
        format_usd(self.price)
    }
}

/// Product category. Known labels match case-insensitively; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Software,
    Service,
    Infrastructure,
    Support,
    Security,
    Authentication,
    Integration,
    Other(String),
}

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::Software => "Software",
            Category::Service => "Service",
            Category::Infrastructure => "Infrastructure",
            Category::Support => "Support",
            Category::Security => "Security",
            Category::Authentication => "Authentication",
            Category::Integration => "Integration",
            Category::Other(label) => label,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "software" => Category::Software,
            "service" => Category::Service,
            "infrastructure" => Category::Infrastructure,
            "support" => Category::Support,
            "security" => Category::Security,
            "authentication" => Category::Authentication,
            "integration" => Category::Integration,
            _ => Category::Other(label.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price discretization used by the recommendation table.
/// low: < 300, medium: 300 ..< 500, high: >= 500
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBand {
    Low,
    Medium,
    High,
}

impl PriceBand {
    pub fn of(price: Decimal) -> Self {
        if price < Decimal::from(300) {
            PriceBand::Low
        } else if price < Decimal::from(500) {
            PriceBand::Medium
        } else {
            PriceBand::High
        }
    }
}

pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::from("software"), Category::Software);
        assert_eq!(Category::from(" SECURITY "), Category::Security);
        assert_eq!(Category::from("Integration"), Category::Integration);
    }

    #[test]
    fn test_unknown_category_is_kept_verbatim() {
        let category = Category::from("Hardware");
        assert_eq!(category, Category::Other("Hardware".to_string()));
        assert_eq!(category.label(), "Hardware");
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Authentication).unwrap();
        assert_eq!(json, r#""Authentication""#);
        let other: Category = serde_json::from_str(r#""Consulting""#).unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), r#""Consulting""#);
    }

    #[test]
    fn test_price_band_boundaries_belong_to_higher_band() {
        assert_eq!(PriceBand::of(dec("299.99")), PriceBand::Low);
        assert_eq!(PriceBand::of(dec("300")), PriceBand::Medium);
        assert_eq!(PriceBand::of(dec("499.99")), PriceBand::Medium);
        assert_eq!(PriceBand::of(dec("500")), PriceBand::High);
        assert_eq!(PriceBand::of(dec("0")), PriceBand::Low);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec("999.99")), "$999.99");
        assert_eq!(format_usd(dec("1299.5")), "$1,299.50");
        assert_eq!(format_usd(dec("1234567")), "$1,234,567.00");
        assert_eq!(format_usd(dec("0")), "$0.00");
        assert_eq!(format_usd(dec("149.999")), "$150.00");
    }

    #[test]
    fn test_product_json_uses_camel_case_and_numeric_price() {
        let product = Product::new(7, "OAuth Server", Category::Security, dec("499"))
            .with_description("Token issuance");
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["category"], "Security");
        assert_eq!(value["price"], 499.0);
        assert_eq!(value["description"], "Token issuance");
        assert!(value.get("stock").is_none());
    }

    #[test]
    fn test_product_deserializes_without_optional_fields() {
        let json = r#"{"id": 3, "name": "Cloud Hosting", "category": "Infrastructure", "price": 199.99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category, Category::Infrastructure);
        assert_eq!(product.price, dec("199.99"));
        assert_eq!(product.price_band(), PriceBand::Low);
        assert!(product.status.is_none());
    }
}
