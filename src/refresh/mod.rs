pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::RefreshError;
pub use errors::StoreError;
pub use models::RefreshToken;
pub use models::TOKEN_LEN;
pub use ports::RefreshTokenStore;
pub use service::RefreshTokenService;
