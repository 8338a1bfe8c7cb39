//! Token deployment parameters
//!
//! Passed once at construction and immutable afterwards.

use ctoken_core::{Address, ComplianceId, DEFAULT_DECIMALS};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TokenError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Display name (e.g. "Compliant Token")
    pub name: String,

    /// Ticker symbol (e.g. "CTT")
    pub symbol: String,

    /// Decimals used to display base units
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Reference to the external document registry holding the compliance terms
    pub document_registry: String,

    /// The only identity allowed to mint and open compliance rounds
    pub issuer: Address,

    /// Compliance version in force at construction
    #[serde(default)]
    pub initial_compliance_id: ComplianceId,
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

impl TokenConfig {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        document_registry: impl Into<String>,
        issuer: Address,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: default_decimals(),
            document_registry: document_registry.into(),
            issuer,
            initial_compliance_id: ComplianceId::default(),
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_initial_compliance_id(mut self, id: ComplianceId) -> Self {
        self.initial_compliance_id = id;
        self
    }

    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Write configuration as pretty JSON
    pub fn write_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    pub fn validate(&self) -> Result<(), TokenError> {
        if self.name.trim().is_empty() {
            return Err(TokenError::InvalidConfig("name cannot be empty".to_string()));
        }
        if self.symbol.trim().is_empty() {
            return Err(TokenError::InvalidConfig("symbol cannot be empty".to_string()));
        }
        if self.decimals > 28 {
            return Err(TokenError::InvalidConfig(format!(
                "decimals must be at most 28, got {}",
                self.decimals
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn issuer() -> Address {
        "0x2280c50ef73550b7ac71aacd1d6485b3120c2c46".parse().unwrap()
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "name": "Compliant Token",
            "symbol": "CTT",
            "document_registry": "0x2f156a641fb4cdbdc30232e6af96658301dbd203",
            "issuer": "0x2280c50ef73550b7ac71aacd1d6485b3120c2c46"
        }"#;
        let config: TokenConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.decimals, 18);
        assert_eq!(config.initial_compliance_id, ComplianceId::new(0));
        assert_eq!(config.issuer, issuer());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.json");
        let config = TokenConfig::new("Compliant Token", "CTT", "registry", issuer())
            .with_initial_compliance_id(ComplianceId::new(1));

        config.write_to(&path).unwrap();
        assert_eq!(TokenConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validate() {
        assert!(TokenConfig::new("Compliant Token", "CTT", "r", issuer()).validate().is_ok());
        assert!(TokenConfig::new(" ", "CTT", "r", issuer()).validate().is_err());
        assert!(TokenConfig::new("T", "", "r", issuer()).validate().is_err());
        assert!(TokenConfig::new("T", "T", "r", issuer())
            .with_decimals(29)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let err = TokenConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
