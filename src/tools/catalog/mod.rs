pub mod data;
pub mod dto;
pub mod handler;

pub use data::{Catalog, Category, GA4_DIMENSIONS, GA4_METRICS};
pub use dto::{GetByCategoryInput, ListCategoriesInput};
pub use handler::{get_by_category, list_categories};
