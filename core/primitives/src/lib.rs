// evmhost/core/primitives/src/lib.rs

// Core value types shared by the storage and execution crates
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

pub use primitive_types::U256;

/// Hash type for block identifiers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord,
)]
pub struct Hash([u8; 32]);

impl Hash {
    pub fn new(data: [u8; 32]) -> Self {
        Self(data)
    }

    /// The all-zero hash, used as the "unknown" sentinel
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..8])
    }
}

/// Account address (20 bytes, similar to Ethereum)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const fn zero() -> Self {
        Address([0u8; 20])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Build an address from exactly 20 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressParseError> {
        let raw: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
        Ok(Address(raw))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Address::from_slice(&bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),
}

/// Block header fields consulted by the execution environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub timestamp: u64,
    pub prev_block_hash: Hash,
    pub state_root: Hash,
    pub tx_root: Hash,
    pub coinbase: Address,
}

impl BlockHeader {
    /// Keccak-256 over the header fields in declaration order.
    ///
    /// Integers are hashed big-endian so the result does not depend on the
    /// host platform.
    pub fn hash(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.height.to_be_bytes());
        hasher.update(self.timestamp.to_be_bytes());
        hasher.update(self.prev_block_hash.as_bytes());
        hasher.update(self.state_root.as_bytes());
        hasher.update(self.tx_root.as_bytes());
        hasher.update(self.coinbase.as_bytes());
        Hash::new(hasher.finalize().into())
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}

/// Block as returned by the block store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    /// Hashes of the transactions included in this block
    #[serde(default)]
    pub transactions: Vec<Hash>,
}

impl Block {
    pub fn new(header: BlockHeader) -> Self {
        Self {
            header,
            transactions: Vec::new(),
        }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn height(&self) -> u64 {
        self.header.height
    }

    pub fn parent_hash(&self) -> Hash {
        self.header.prev_block_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(height: u64, prev: Hash) -> BlockHeader {
        BlockHeader {
            height,
            timestamp: 1_000_000 + height * 10,
            prev_block_hash: prev,
            state_root: Hash::default(),
            tx_root: Hash::default(),
            coinbase: Address::zero(),
        }
    }

    #[test]
    fn test_zero_sentinels() {
        assert!(Hash::zero().is_zero());
        assert_eq!(Hash::default(), Hash::zero());
        assert!(Address::zero().is_zero());
        assert!(!Address([1; 20]).is_zero());
    }

    #[test]
    fn test_address_parse_and_display() {
        let addr: Address = "0x8a8c58e424f4a6d2f0b2270860c96dfe34f10c78".parse().unwrap();
        assert_eq!(addr.0[0], 0x8a);
        assert_eq!(addr.0[19], 0x78);
        assert_eq!(
            addr.to_string(),
            "0x8a8c58e424f4a6d2f0b2270860c96dfe34f10c78"
        );

        // Prefix is optional
        let bare: Address = "8a8c58e424f4a6d2f0b2270860c96dfe34f10c78".parse().unwrap();
        assert_eq!(bare, addr);
    }

    #[test]
    fn test_address_parse_errors() {
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength(2))
        );
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(AddressParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_header_hash_depends_on_every_field() {
        let base = header(5, Hash::new([7; 32]));
        let mut other = base.clone();
        assert_eq!(base.hash(), other.hash());

        other.timestamp += 1;
        assert_ne!(base.hash(), other.hash());

        let mut other = base.clone();
        other.prev_block_hash = Hash::new([8; 32]);
        assert_ne!(base.hash(), other.hash());

        let mut other = base.clone();
        other.coinbase = Address([1; 20]);
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn test_block_delegates_to_header() {
        let block = Block::new(header(3, Hash::new([2; 32])));
        assert_eq!(block.height(), 3);
        assert_eq!(block.parent_hash(), Hash::new([2; 32]));
        assert_eq!(block.hash(), block.header.hash());
        assert!(!block.header.is_genesis());
        assert!(header(0, Hash::zero()).is_genesis());
    }

    #[test]
    fn test_block_serde_defaults_transactions() {
        let block = Block::new(header(1, Hash::zero()));
        let mut json = serde_json::to_value(&block).unwrap();
        json.as_object_mut().unwrap().remove("transactions");
        let decoded: Block = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, block);
    }
}
