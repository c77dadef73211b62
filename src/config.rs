//! Configuration applied to the radio after init

use crate::address::AddressFilter;
use crate::{Channel, Error, ExtendedAddress, PanId, Phy, Radio, RadioHandler, ShortAddress};

/// Address filter and default transmit parameters
///
/// The default is the broadcast PAN ID and short address, an all-zero
/// extended address, channel 11 and 0 dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    pub filter: AddressFilter,
    /// Channel written into the transmit buffer
    pub channel: Channel,
    /// Transmit power in dBm written into the transmit buffer
    pub tx_power: i8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            filter: AddressFilter::default(),
            channel: Channel::MIN,
            tx_power: 0,
        }
    }
}

impl RadioConfig {
    pub fn with_pan_id(mut self, pan_id: PanId) -> Self {
        self.filter.pan_id = pan_id;
        self
    }

    pub fn with_short_address(mut self, address: ShortAddress) -> Self {
        self.filter.short_address = address;
        self
    }

    pub fn with_extended_address(mut self, address: ExtendedAddress) -> Self {
        self.filter.extended_address = address;
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_tx_power(mut self, tx_power: i8) -> Self {
        self.tx_power = tx_power;
        self
    }
}

/// Applies `config` to the radio
///
/// Sets all three filter addresses and seeds channel and power of the
/// transmit buffer. Fails while a transmit sequence owns the buffer.
pub fn apply<P, H>(radio: &mut Radio<P, H>, config: &RadioConfig) -> Result<(), Error>
where
    P: Phy,
    H: RadioHandler,
{
    radio.set_pan_id(config.filter.pan_id)?;
    radio.set_extended_address(config.filter.extended_address)?;
    radio.set_short_address(config.filter.short_address)?;

    let buffer = radio.transmit_buffer().ok_or(Error::Fail)?;
    buffer.channel = config.channel.number();
    buffer.power = config.tx_power;
    log::debug!(
        "Config applied: Pan {:#06x}; Short {:#06x}; Channel {}",
        config.filter.pan_id.0,
        config.filter.short_address.0,
        config.channel.number()
    );
    Ok(())
}
