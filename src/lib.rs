//! Snake client (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, integration
//! tests and benches can use `snake_client::{core, transport, sync, ...}`.

pub use snake_client_core as core;
pub use snake_client_input as input;
pub use snake_client_sync as sync;
pub use snake_client_term as term;
pub use snake_client_transport as transport;
pub use snake_client_types as types;
