use crate::completion::{CompletionClient, CompletionError, OpenAiClient};
use crate::config::Config;
use crate::voucher::VoucherService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub voucher_service: Arc<VoucherService>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let completion = OpenAiClient::from_config(config)?;
        Ok(Self::with_completion(Arc::new(completion)))
    }

    pub fn with_completion(completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            voucher_service: Arc::new(VoucherService::new(completion)),
        }
    }
}
