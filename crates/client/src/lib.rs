//! situps_client - live-update client and CLI for the situps server.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod store;

pub use client::{SitupsClient, StateChangeSubscription};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use store::EntriesStore;
