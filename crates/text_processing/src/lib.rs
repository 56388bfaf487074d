//! Text understanding for Hinglish shopping comments
//!
//! This crate turns a short, code-mixed comment into a structured request:
//! - **Normalization**: strip currency symbols and thousands separators
//! - **Budget extraction**: ordered number + unit rules (k, thousand, lakh, हज़ार, लाख)
//! - **Need extraction**: residual product description, with a windowed fallback
//! - **Product references**: `/dp/<ref>` and `/gp/product/<ref>` in pasted URLs
//! - **Category classification**: fixed, ordered keyword table
//!
//! # Example
//!
//! ```
//! use shopbot_text_processing::{classify, RequestExtractor};
//! use shopbot_core::ProductCategory;
//!
//! let request = RequestExtractor::new().extract("gaming laptop under 50000 please").unwrap();
//! assert_eq!(request.need, "gaming laptop");
//! assert_eq!(request.budget, Some(50_000));
//! assert_eq!(classify(&request.need), ProductCategory::Laptop);
//! ```

pub mod budget;
pub mod category;
pub mod extractor;
pub mod need;
pub mod normalize;
pub mod product_ref;

pub use budget::{extract_budget, extract_number, BudgetRule};
pub use category::classify;
pub use extractor::{Extraction, RequestExtractor};
pub use need::extract_need;
pub use normalize::normalize_text;
pub use product_ref::extract_product_ref;
