//! Client-side permission model shared with the browser bindings.

pub mod gate;
pub mod session;
pub mod storage;

pub use gate::{ElementGate, Render, has_auth, render};
pub use session::{AuthMode, PermissionSession};
pub use storage::TtlStorage;
