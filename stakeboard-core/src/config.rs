use crate::error::{Result, StakeboardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    /// Leading characters of a standard principal on this network
    fn address_prefixes(&self) -> [&'static str; 2] {
        match self {
            Network::Mainnet => ["SP", "SM"],
            Network::Testnet | Network::Devnet => ["ST", "SN"],
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Devnet => write!(f, "devnet"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub network: Network,
    pub api_url: String,
    pub contract_address: String,
    pub contract_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            api_url: "https://api.testnet.hiro.so".to_string(),
            contract_address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
            contract_name: "tic-tac-toe".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(network: Network) -> Self {
        let mut config = Self::default();
        config.network = network;

        match network {
            Network::Mainnet => {
                config.api_url = "https://api.hiro.so".to_string();
            }
            Network::Testnet => {
                // keep defaults for testnet
            }
            Network::Devnet => {
                config.api_url = "http://localhost:3999".to_string();
            }
        }

        config
    }

    /// Reads a JSON config file and validates it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded {} config from {}", config.network, path.display());
        Ok(config)
    }

    /// Fully qualified `<address>.<name>` contract identifier
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.contract_address, self.contract_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(StakeboardError::config("API URL cannot be empty"));
        }

        if self.contract_name.is_empty() {
            return Err(StakeboardError::config("Contract name cannot be empty"));
        }

        if !self
            .network
            .address_prefixes()
            .iter()
            .any(|prefix| self.contract_address.starts_with(prefix))
        {
            return Err(StakeboardError::config(format!(
                "Contract address '{}' is not a {} principal",
                self.contract_address, self.network
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.api_url, "https://api.testnet.hiro.so");
        assert_eq!(
            config.contract_id(),
            "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.tic-tac-toe"
        );
    }

    #[test]
    fn test_network_urls() {
        assert_eq!(
            ClientConfig::new(Network::Testnet).api_url,
            "https://api.testnet.hiro.so"
        );
        assert_eq!(
            ClientConfig::new(Network::Devnet).api_url,
            "http://localhost:3999"
        );
        assert_eq!(
            ClientConfig::new(Network::Mainnet).api_url,
            "https://api.hiro.so"
        );
    }

    #[test]
    fn test_mainnet_rejects_testnet_principal() {
        let config = ClientConfig::new(Network::Mainnet);
        assert!(matches!(config.validate(), Err(StakeboardError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "network": "mainnet",
                "api_url": "https://api.hiro.so",
                "contract_address": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "contract_name": "tic-tac-toe-v2"
            }}"#
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.contract_name, "tic-tac-toe-v2");
    }

    #[test]
    fn test_load_rejects_empty_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"network":"devnet","api_url":"","contract_address":"ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM","contract_name":"tic-tac-toe"}}"#
        )
        .unwrap();

        assert!(ClientConfig::load(file.path()).is_err());
    }
}
