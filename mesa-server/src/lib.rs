//! Mesa Server - restaurant ordering backend
//!
//! # Overview
//!
//! Single-binary HTTP service covering the ordering flow of a
//! multi-restaurant platform:
//!
//! - **Orders** (`orders`): lifecycle engine for placing, assigning,
//!   completing and cancelling orders
//! - **Tables** (`orders::board`): fixed 40-table board derived from
//!   active orders
//! - **Menu** (`db`): per-restaurant food catalog
//! - **Auth** (`auth`): JWT bearer validation and role checks
//!
//! # Module structure
//!
//! ```text
//! mesa-server/src/
//! ├── core/    # config, state, server
//! ├── auth/    # JWT validation, caller context
//! ├── api/     # HTTP routes and handlers
//! ├── orders/  # lifecycle engine and table board
//! ├── db/      # models and repositories
//! └── utils/   # errors, responses, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{AuthContext, AuthRole, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::LifecycleEngine;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   __  ___
  /  |/  /__  _________ _
 / /|_/ / _ \/ ___/ __ `/
/ /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}
