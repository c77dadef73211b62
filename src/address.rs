use crate::Error;

/// IEEE 802.15.4 PAN identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanId(pub u16);

impl PanId {
    pub const BROADCAST: PanId = PanId(0xffff);

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

/// IEEE 802.15.4 short (16 bit) address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShortAddress(pub u16);

impl ShortAddress {
    pub const BROADCAST: ShortAddress = ShortAddress(0xffff);
    /// Assigned to devices that have no short address yet
    pub const UNASSIGNED: ShortAddress = ShortAddress(0xfffe);

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

/// IEEE 802.15.4 extended (64 bit) address, kept as raw bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtendedAddress([u8; 8]);

impl ExtendedAddress {
    pub const fn from_bytes(bytes: [u8; 8]) -> ExtendedAddress {
        ExtendedAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for ExtendedAddress {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidArgs)?;
        Ok(ExtendedAddress(bytes))
    }
}

/// Addresses the hardware uses to filter received frames
///
/// Each field is set independently and persists until overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressFilter {
    pub pan_id: PanId,
    pub extended_address: ExtendedAddress,
    pub short_address: ShortAddress,
}

impl Default for AddressFilter {
    fn default() -> Self {
        Self {
            pan_id: PanId::BROADCAST,
            extended_address: ExtendedAddress::default(),
            short_address: ShortAddress::BROADCAST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_address_from_slice() {
        let raw = [1, 2, 3, 4, 5, 6, 7, 8];
        let addr = ExtendedAddress::try_from(&raw[..]).unwrap();
        assert_eq!(addr.as_bytes(), &raw);
        assert_eq!(ExtendedAddress::try_from(&raw[..7]), Err(Error::InvalidArgs));
    }

    #[test]
    fn default_filter_is_broadcast() {
        let filter = AddressFilter::default();
        assert!(filter.pan_id.is_broadcast());
        assert!(filter.short_address.is_broadcast());
        assert!(!ShortAddress::UNASSIGNED.is_broadcast());
    }
}
