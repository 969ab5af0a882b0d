mod pagination;
mod response;
mod validation;

pub use pagination::{ListParams, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use validation::{FieldErrors, add_field_error};
