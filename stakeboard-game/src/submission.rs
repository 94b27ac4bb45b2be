use crate::board::{CellIndex, Mark};
use crate::Result;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stakeboard_core::{Amount, ClientConfig, Network};

/// The opening move and stake of a new game.
///
/// Handed to a [`ChainClient`] by value and not kept afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSubmission {
    pub cell: CellIndex,
    pub mark: Mark,
    pub stake: Amount,
    pub use_lending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Transaction id, or payload digest for calls that still need signing
    pub reference: String,
    pub submitted_at: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Sends a new game to the ledger
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn create_game(&self, submission: MoveSubmission) -> Result<SubmissionReceipt>;
}

/// Unsigned `create-game` contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub network: Network,
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    pub function_args: Vec<String>,
}

/// Builds the `create-game` call for a wallet to sign and broadcast
pub struct ContractCallClient {
    config: ClientConfig,
}

impl ContractCallClient {
    pub const FUNCTION_NAME: &'static str = "create-game";

    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn contract_call(&self, submission: &MoveSubmission) -> ContractCall {
        ContractCall {
            network: self.config.network,
            contract_address: self.config.contract_address.clone(),
            contract_name: self.config.contract_name.clone(),
            function_name: Self::FUNCTION_NAME.to_string(),
            function_args: vec![
                format!("u{}", submission.stake.to_micro()),
                format!("u{}", submission.cell.get()),
                format!("u{}", submission.mark.as_u8()),
                submission.use_lending.to_string(),
            ],
        }
    }
}

#[async_trait]
impl ChainClient for ContractCallClient {
    async fn create_game(&self, submission: MoveSubmission) -> Result<SubmissionReceipt> {
        let call = self.contract_call(&submission);
        let payload = serde_json::to_vec(&call)?;

        let mut hasher = Sha256::new();
        hasher.update(&payload);
        let reference = hex::encode(hasher.finalize());

        tracing::info!(
            "Prepared {} call on {} ({} stake, lending: {}): {}",
            call.function_name,
            self.config.contract_id(),
            submission.stake,
            submission.use_lending,
            reference
        );

        let details = serde_json::to_value(&call)?;

        Ok(SubmissionReceipt {
            reference,
            submitted_at: Utc::now(),
            details,
        })
    }
}
