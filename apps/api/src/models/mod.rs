pub mod analysis;
pub mod product;

pub use analysis::{Analysis, ScorerBackend};
pub use product::{Category, PriceBand, Product, ProductId};
