//! Agora platform host.
//!
//! The platform owns every registry and the governance engine, and is the
//! single writer they all assume:
//! - Builds the registries and runs the one-time configuration phase
//! - Exposes the member-facing call surface
//! - Routes votes to the governance engine with the registries as its host
//! - Snapshots and restores the whole state with bincode

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod platform;

pub use config::PlatformConfig;
pub use error::PlatformError;
pub use events::PlatformEvent;
pub use logging::{init_logging, LogFormat};
pub use platform::{Platform, Registries};
