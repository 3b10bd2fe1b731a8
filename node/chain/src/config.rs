use contract_wrapper::SubmitConfig;
use ethereum_types::Address;
use ethers::signers::LocalWallet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable; set one of: {candidates}")]
    MissingEnv { candidates: String },
    #[error("environment variable {key} holds an invalid address: {value}")]
    InvalidAddress { key: String, value: String },
    #[error("PRIVATE_KEY is not a valid secp256k1 private key")]
    InvalidPrivateKey,
}

/// Everything the chain clients need, resolved and validated up front so a
/// misconfigured process fails at startup rather than on the first call.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub rpc_endpoint_url: String,
    /// Backend wallet that signs and pays gas for every submission.
    pub wallet: LocalWallet,
    pub anchor_address: Address,
    pub passport_address: Address,
    pub marketplace_address: Address,
    pub submit_config: SubmitConfig,
}

/// Returns the first set variable among `keys`.
fn env_any(keys: &[&str]) -> Result<String, ConfigError> {
    for key in keys {
        if let Ok(value) = std::env::var(key) {
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }
    Err(ConfigError::MissingEnv {
        candidates: keys.join(", "),
    })
}

fn env_address(keys: &[&str]) -> Result<Address, ConfigError> {
    let value = env_any(keys)?;
    value
        .trim_start_matches("0x")
        .parse::<Address>()
        .map_err(|_| ConfigError::InvalidAddress {
            key: keys[0].to_string(),
            value,
        })
}

impl ChainConfig {
    /// Resolves the configuration from the environment. Each setting has a
    /// short and a `MINTORA_`-prefixed variable name; the first one set
    /// wins.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rpc_endpoint_url = env_any(&["RPC_URL", "MINTORA_RPC_URL"])?;
        let wallet = env_any(&["PRIVATE_KEY", "MINTORA_PRIVATE_KEY"])?
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|_| ConfigError::InvalidPrivateKey)?;
        let anchor_address = env_address(&["ANCHOR_ADDRESS", "MINTORA_ANCHOR_ADDRESS"])?;
        let passport_address = env_address(&["PASSPORT_ADDRESS", "MINTORA_PASSPORT_ADDRESS"])?;
        let marketplace_address =
            env_address(&["MARKETPLACE_ADDRESS", "MINTORA_MARKETPLACE_ADDRESS"])?;

        Ok(Self {
            rpc_endpoint_url,
            wallet,
            anchor_address,
            passport_address,
            marketplace_address,
            submit_config: SubmitConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process global, so each test uses its own
    // variable names.

    #[test]
    fn env_any_prefers_first_set_candidate() {
        std::env::set_var("MINTORA_TEST_RPC_FALLBACK", "http://fallback:8545");
        let value = env_any(&["MINTORA_TEST_RPC_PRIMARY", "MINTORA_TEST_RPC_FALLBACK"]).unwrap();
        assert_eq!(value, "http://fallback:8545");

        std::env::set_var("MINTORA_TEST_RPC_PRIMARY", "http://primary:8545");
        let value = env_any(&["MINTORA_TEST_RPC_PRIMARY", "MINTORA_TEST_RPC_FALLBACK"]).unwrap();
        assert_eq!(value, "http://primary:8545");
    }

    #[test]
    fn missing_env_lists_all_candidates() {
        let err = env_any(&["MINTORA_TEST_UNSET_A", "MINTORA_TEST_UNSET_B"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("MINTORA_TEST_UNSET_A"));
        assert!(message.contains("MINTORA_TEST_UNSET_B"));
    }

    #[test]
    fn addresses_parse_with_and_without_prefix() {
        std::env::set_var(
            "MINTORA_TEST_ADDR_OK",
            "0x1111111111111111111111111111111111111111",
        );
        let address = env_address(&["MINTORA_TEST_ADDR_OK"]).unwrap();
        assert_eq!(address, Address::repeat_byte(0x11));

        std::env::set_var("MINTORA_TEST_ADDR_BAD", "not-an-address");
        assert!(matches!(
            env_address(&["MINTORA_TEST_ADDR_BAD"]),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }
}
