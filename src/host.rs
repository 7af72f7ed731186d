//! Optional host-provided capabilities.
//!
//! The surrounding host may expose a billing-key selector and a spreadsheet
//! save RPC. Both are modeled as injected collaborators with null-object
//! fallbacks instead of runtime feature sniffing: when the host offers
//! nothing, `KeyAlwaysReady` reports a key as present and `SimulatedSheet`
//! resolves saves after a short local delay with a canned confirmation.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::types::SheetRow;

/// Failures from real host integrations.
#[derive(Debug, Error)]
pub enum HostError {
    /// The spreadsheet RPC rejected or failed the save.
    #[error("{0}")]
    Save(String),
    /// The host exposes no key selector to open.
    #[error("no key selector available")]
    NoKeySelector,
}

/// Capability to check for and select a billing-enabled API key.
pub trait KeyGate: Send + Sync {
    /// Whether a billing-enabled key has been selected. Probe failures are
    /// reported as `true`: absence of the capability means the key is
    /// assumed present.
    fn has_selected_key(&self) -> impl Future<Output = bool> + Send;

    /// Prompts the user to select a key.
    fn open_selector(&self) -> impl Future<Output = Result<(), HostError>> + Send;
}

/// Null-object key gate: a key is always considered present.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyAlwaysReady;

impl KeyGate for KeyAlwaysReady {
    async fn has_selected_key(&self) -> bool {
        true
    }

    async fn open_selector(&self) -> Result<(), HostError> {
        Err(HostError::NoKeySelector)
    }
}

/// Capability to persist a condensed herb record to a spreadsheet.
pub trait SheetSink: Send + Sync {
    /// Saves one row, resolving to a confirmation message for display.
    fn save(&self, row: &SheetRow) -> impl Future<Output = Result<String, HostError>> + Send;
}

/// Null-object sheet sink: waits out a fixed local delay and resolves with
/// a canned confirmation. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSheet;

impl SimulatedSheet {
    /// Delay applied before the simulated confirmation resolves.
    pub const DELAY: Duration = Duration::from_millis(250);
    /// Confirmation message every simulated save resolves with.
    pub const CONFIRMATION: &'static str = "Saved (simulated)";
}

impl SheetSink for SimulatedSheet {
    async fn save(&self, row: &SheetRow) -> Result<String, HostError> {
        async_io::Timer::after(Self::DELAY).await;
        tracing::debug!(name = %row.name, "simulated sheet save");
        Ok(Self::CONFIRMATION.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_key_gate_always_reports_a_key() {
        assert!(KeyAlwaysReady.has_selected_key().await);
        assert!(matches!(
            KeyAlwaysReady.open_selector().await,
            Err(HostError::NoKeySelector)
        ));
    }
}
