//! Registry configuration with validation.

use super::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Virtual address space handed out to joining nodes
    pub address_space: AddressSpaceConfig,
}

impl RegistryConfig {
    /// Validate configuration
    pub fn validate(&self) -> RegistryResult<()> {
        AddressSpace::try_from(&self.address_space).map(|_| ())
    }
}

/// Virtual address space configuration.
///
/// ```toml
/// [registry.address_space]
/// network = "10.0.0.0"
/// prefix_len = 24
/// first_host_offset = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressSpaceConfig {
    /// Network address of the block (default: 10.0.0.0)
    pub network: Ipv4Addr,
    /// Prefix length of the block (default: 24)
    pub prefix_len: u8,
    /// Offset of the first handed-out host (default: 2, leaving .0 and .1)
    pub first_host_offset: u32,
}

impl Default for AddressSpaceConfig {
    fn default() -> Self {
        Self {
            network: Ipv4Addr::new(10, 0, 0, 0),
            prefix_len: 24,
            first_host_offset: 2,
        }
    }
}

/// A validated IPv4 block with a first and last assignable host.
///
/// The last assignable host is the one just below the broadcast address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSpace {
    network: Ipv4Addr,
    prefix_len: u8,
    first_host_offset: u32,
}

impl AddressSpace {
    /// Shortest accepted prefix.
    pub const MIN_PREFIX_LEN: u8 = 8;
    /// Longest accepted prefix (/30 still leaves two hosts).
    pub const MAX_PREFIX_LEN: u8 = 30;

    /// Build and validate an address space.
    pub fn new(network: Ipv4Addr, prefix_len: u8, first_host_offset: u32) -> RegistryResult<Self> {
        if !(Self::MIN_PREFIX_LEN..=Self::MAX_PREFIX_LEN).contains(&prefix_len) {
            return Err(RegistryError::InvalidAddressSpace(format!(
                "prefix_len must be within {}..={}, got {}",
                Self::MIN_PREFIX_LEN,
                Self::MAX_PREFIX_LEN,
                prefix_len
            )));
        }

        let host_bits = 32 - u32::from(prefix_len);
        let host_mask = (1u32 << host_bits) - 1;
        if u32::from(network) & host_mask != 0 {
            return Err(RegistryError::InvalidAddressSpace(format!(
                "{}/{} has host bits set",
                network, prefix_len
            )));
        }

        if first_host_offset == 0 {
            return Err(RegistryError::InvalidAddressSpace(
                "first_host_offset cannot be 0 (network address)".into(),
            ));
        }

        // Offsets up to host_mask - 1 are assignable; host_mask is broadcast.
        if first_host_offset >= host_mask {
            return Err(RegistryError::InvalidAddressSpace(format!(
                "first_host_offset {} leaves no assignable address in /{}",
                first_host_offset, prefix_len
            )));
        }

        Ok(Self {
            network,
            prefix_len,
            first_host_offset,
        })
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// First address handed out.
    pub fn first_host(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) + self.first_host_offset)
    }

    /// Last address handed out (broadcast minus one).
    pub fn last_host(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) + self.host_mask() - 1)
    }

    /// Number of addresses the allocator can hand out.
    pub fn capacity(&self) -> u32 {
        self.host_mask() - self.first_host_offset
    }

    /// Address at position `index` counted from the first host, if in range.
    pub fn nth(&self, index: u32) -> Option<Ipv4Addr> {
        if index < self.capacity() {
            Some(Ipv4Addr::from(
                u32::from(self.network) + self.first_host_offset + index,
            ))
        } else {
            None
        }
    }

    fn host_mask(&self) -> u32 {
        (1u32 << (32 - u32::from(self.prefix_len))) - 1
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self {
            network: Ipv4Addr::new(10, 0, 0, 0),
            prefix_len: 24,
            first_host_offset: 2,
        }
    }
}

impl TryFrom<&AddressSpaceConfig> for AddressSpace {
    type Error = RegistryError;

    fn try_from(config: &AddressSpaceConfig) -> RegistryResult<Self> {
        Self::new(config.network, config.prefix_len, config.first_host_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_space_matches_overlay_convention() {
        let space = AddressSpace::default();
        assert_eq!(space.first_host(), Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(space.last_host(), Ipv4Addr::new(10, 0, 0, 254));
        assert_eq!(space.capacity(), 253);
        assert_eq!(
            AddressSpace::try_from(&AddressSpaceConfig::default()).unwrap(),
            space
        );
    }

    #[test]
    fn test_nth_stays_inside_block() {
        let space = AddressSpace::default();
        assert_eq!(space.nth(0), Some(Ipv4Addr::new(10, 0, 0, 2)));
        assert_eq!(space.nth(252), Some(Ipv4Addr::new(10, 0, 0, 254)));
        assert_eq!(space.nth(253), None);
    }

    #[test]
    fn test_larger_block_crosses_octets() {
        let space = AddressSpace::new(Ipv4Addr::new(10, 8, 0, 0), 16, 2).unwrap();
        assert_eq!(space.nth(254), Some(Ipv4Addr::new(10, 8, 1, 0)));
        assert_eq!(space.last_host(), Ipv4Addr::new(10, 8, 255, 254));
    }

    #[test]
    fn test_rejects_misaligned_network() {
        let err = AddressSpace::new(Ipv4Addr::new(10, 0, 0, 1), 24, 2).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAddressSpace(_)));
    }

    #[test]
    fn test_rejects_bad_prefix_and_offset() {
        let net = Ipv4Addr::new(10, 0, 0, 0);
        assert!(AddressSpace::new(net, 31, 1).is_err());
        assert!(AddressSpace::new(net, 4, 1).is_err());
        assert!(AddressSpace::new(net, 24, 0).is_err());
        assert!(AddressSpace::new(net, 24, 255).is_err());
        assert!(AddressSpace::new(net, 24, 254).is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(RegistryConfig::default().validate().is_ok());

        let mut config = RegistryConfig::default();
        config.address_space.prefix_len = 32;
        assert!(config.validate().is_err());
    }
}
