pub mod errors;
pub mod extract;

pub use errors::ExtractError;
pub use extract::extract;
pub use extract::Scheme;
