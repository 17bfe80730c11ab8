//! Authentication Module
//!
//! Token validation and caller identity. Credential storage and token
//! issuance belong to the external identity provider; this module only
//! verifies tokens and produces an [`AuthContext`].

pub mod context;
pub mod extractor;
pub mod jwt;

pub use context::AuthContext;
pub use jwt::{AuthRole, Claims, JwtConfig, JwtError, JwtService};
