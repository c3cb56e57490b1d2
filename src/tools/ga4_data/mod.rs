pub mod dto;
pub mod handler;
pub mod helpers;
pub mod implementation;

pub use dto::{Ga4Record, GetGa4DataInput};
pub use handler::get_ga4_data;
pub use helpers::normalize_name_list;
pub use implementation::Ga4DataTools;
