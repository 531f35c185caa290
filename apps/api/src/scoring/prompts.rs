// Prompt constants for the delegated scorer.

use crate::models::Product;

/// System prompt for product analysis. Fixes the two-field JSON output contract.
pub const ANALYSIS_SYSTEM: &str = "You are a product analyst for a B2B software catalog. \
    Assess how strongly the given product should be recommended to prospective customers. \
    You MUST respond with valid JSON only: exactly one object with two fields, \
    \"recommendation\" (a string of one or two sentences) and \
    \"confidenceScore\" (a number between 0 and 1). \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Status reported for products that carry none.
const DEFAULT_STATUS: &str = "Active";

/// Product analysis prompt. Fields are substituted in a single pass, so braces
/// inside product data are kept as written.
pub fn build_analysis_prompt(product: &Product) -> String {
    let name = &product.name;
    let category = product.category.label();
    let price_formatted = product.formatted_price();
    let price = product.price;
    let status = product.status.as_deref().unwrap_or(DEFAULT_STATUS);

    format!(
        r#"Analyze the following product and recommend how it should be positioned.

Product name: {name}
Category: {category}
Price: {price_formatted} (numeric value: {price})
Status: {status}

Return a JSON object with this EXACT schema (no extra fields):
{{
  "recommendation": "Highly recommended for enterprise teams. Consider bundling with support.",
  "confidenceScore": 0.85
}}"#
    )
}
