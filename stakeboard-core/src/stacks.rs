use crate::config::ClientConfig;
use crate::error::{Result, StakeboardError};
use crate::types::{Amount, Balance};

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Where the create-game form gets the player's balance from
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance(&self, principal: &str) -> Result<Balance>;
}

/// Read-only client for the Stacks blockchain API
pub struct StacksApi {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct StxBalanceResponse {
    balance: String,
    #[serde(default)]
    locked: Option<String>,
}

impl StacksApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn balance_url(&self, principal: &str) -> Result<String> {
        let valid = !principal.is_empty()
            && principal
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
        if !valid {
            return Err(StakeboardError::api(format!(
                "Invalid principal: '{}'",
                principal
            )));
        }

        Ok(format!(
            "{}/extended/v1/address/{}/stx",
            self.api_url, principal
        ))
    }
}

#[async_trait]
impl BalanceSource for StacksApi {
    async fn balance(&self, principal: &str) -> Result<Balance> {
        let url = self.balance_url(principal)?;
        tracing::debug!("Fetching STX balance from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StakeboardError::api(format!(
                "Balance lookup for {} failed with {}: {}",
                principal, status, body
            )));
        }

        let balance = parse_balance(&body)?;
        tracing::info!(
            "Balance for {}: {} ({} locked)",
            principal,
            balance.total,
            balance.locked
        );
        Ok(balance)
    }
}

fn parse_micro(field: &str, value: &str) -> Result<Amount> {
    value
        .parse::<u64>()
        .map(Amount::from_micro)
        .map_err(|e| StakeboardError::api(format!("Bad {} value '{}': {}", field, value, e)))
}

/// Decodes the body of `/extended/v1/address/{principal}/stx`
pub fn parse_balance(body: &str) -> Result<Balance> {
    let response: StxBalanceResponse = serde_json::from_str(body)?;

    let total = parse_micro("balance", &response.balance)?;
    let locked = match response.locked.as_deref() {
        Some(locked) => parse_micro("locked", locked)?,
        None => Amount::ZERO,
    };

    Ok(Balance::new(total, locked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_balance() {
        let body = r#"{
            "balance": "160000000",
            "total_sent": "0",
            "total_received": "160000000",
            "locked": "10000000",
            "lock_height": 0
        }"#;

        let balance = parse_balance(body).unwrap();
        assert_eq!(balance.total.to_micro(), 160_000_000);
        assert_eq!(balance.locked.to_micro(), 10_000_000);
        assert_eq!(balance.spendable().to_micro(), 150_000_000);
    }

    #[test]
    fn test_parse_balance_without_locked() {
        let balance = parse_balance(r#"{"balance":"42"}"#).unwrap();
        assert_eq!(balance.spendable().to_micro(), 42);
    }

    #[test]
    fn test_parse_balance_rejects_garbage() {
        assert!(parse_balance(r#"{"balance":"-5"}"#).is_err());
        assert!(parse_balance("not json").is_err());
    }

    #[test]
    fn test_balance_url() {
        let api = StacksApi::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            api.balance_url("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap(),
            "https://api.testnet.hiro.so/extended/v1/address/ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM/stx"
        );
        assert!(api.balance_url("ST1/../admin").is_err());
        assert!(api.balance_url("").is_err());
    }
}
