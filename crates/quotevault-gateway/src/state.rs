use quotevault_core::QuoteVault;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    vault: Arc<dyn QuoteVault>,
}

impl AppState {
    pub fn new(vault: Arc<dyn QuoteVault>) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> &dyn QuoteVault {
        self.vault.as_ref()
    }
}
