// Core modules
pub mod config;
pub mod inspect;

// Re-export commonly used types
pub use config::{Config, DecodeConfig, LogConfig, OutputConfig};
pub use inspect::{encode_json, is_canonical, render_tree, to_json, InspectError};

// Re-export crate modules
pub use rlp_core as rlp;
pub use rlp_types as types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get client version string
pub fn client_version() -> String {
    format!("rlp-rust/v{}/rust", VERSION)
}
