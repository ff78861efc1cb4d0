pub mod models;
pub mod errors;
pub mod submission;

pub use models::*;
pub use errors::*;
pub use submission::*;
