//! IEEE 802.15.4 PHY constants for the 2.4 GHz O-QPSK band
//!
//! See IEEE 802.15.4-2006, chapter 6.5 "2450 MHz PHY specifications".

use crate::Error;

/// aMaxPHYPacketSize
pub const MAX_PHY_PACKET_SIZE: usize = 127;
/// Lowest channel of the 2.4 GHz band
pub const PHY_MIN_CHANNEL: u8 = 11;
/// Highest channel of the 2.4 GHz band
pub const PHY_MAX_CHANNEL: u8 = 26;
pub const PHY_SYMBOLS_PER_OCTET: u32 = 2;
/// Bit rate in bits per second
pub const PHY_BIT_RATE: u32 = 250_000;
pub const PHY_BITS_PER_OCTET: u32 = 8;
/// Duration of one symbol in microseconds (16)
pub const PHY_US_PER_SYMBOL: u32 = ((PHY_BITS_PER_OCTET / PHY_SYMBOLS_PER_OCTET) * 1_000_000) / PHY_BIT_RATE;
/// LQI measurement not supported
pub const PHY_NO_LQI: u8 = 0;
/// Noise floor value reported when no valid measurement exists
pub const NOISE_FLOOR_INVALID: i8 = 127;

/// Preamble (4), SFD (1) and PHR (1) octets sent ahead of every PSDU
const SHR_PHR_OCTETS: u32 = 6;

/// Converts a duration in symbols to microseconds
pub const fn symbols_to_us(symbols: u32) -> u32 {
    symbols * PHY_US_PER_SYMBOL
}

/// Time on air of a frame with the given PSDU length, in microseconds
///
/// Includes the synchronization header and the PHY header.
pub const fn airtime_us(psdu_len: u8) -> u32 {
    symbols_to_us((SHR_PHR_OCTETS + psdu_len as u32) * PHY_SYMBOLS_PER_OCTET)
}

/// A 2.4 GHz IEEE 802.15.4 channel, always within 11..=26
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    pub const MIN: Channel = Channel(PHY_MIN_CHANNEL);
    pub const MAX: Channel = Channel(PHY_MAX_CHANNEL);

    /// Returns the channel, or `None` if `channel` is outside 11..=26
    pub const fn new(channel: u8) -> Option<Channel> {
        if channel >= PHY_MIN_CHANNEL && channel <= PHY_MAX_CHANNEL {
            Some(Channel(channel))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Center frequency in MHz
    pub const fn frequency_mhz(self) -> u16 {
        2405 + 5 * (self.0 - PHY_MIN_CHANNEL) as u16
    }

    /// All channels of the band in ascending order
    pub fn all() -> impl Iterator<Item = Channel> {
        (PHY_MIN_CHANNEL..=PHY_MAX_CHANNEL).map(Channel)
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(channel: u8) -> Result<Self, Self::Error> {
        Channel::new(channel).ok_or(Error::InvalidArgs)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> u8 {
        channel.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_period_is_16_us() {
        assert_eq!(PHY_US_PER_SYMBOL, 16);
        assert_eq!(symbols_to_us(12), 192);
    }

    #[test]
    fn airtime_of_max_frame() {
        // (6 + 127) octets * 2 symbols * 16 us
        assert_eq!(airtime_us(127), 4256);
        assert_eq!(airtime_us(0), 192);
    }

    #[test]
    fn channel_bounds() {
        assert_eq!(Channel::new(10), None);
        assert_eq!(Channel::new(27), None);
        assert_eq!(Channel::new(11), Some(Channel::MIN));
        assert_eq!(Channel::new(26), Some(Channel::MAX));
        assert_eq!(Channel::try_from(0), Err(Error::InvalidArgs));
        assert_eq!(Channel::all().count(), 16);
    }

    #[test]
    fn channel_frequencies() {
        assert_eq!(Channel::MIN.frequency_mhz(), 2405);
        assert_eq!(Channel::MAX.frequency_mhz(), 2480);
        assert_eq!(Channel::new(15).map(Channel::frequency_mhz), Some(2425));
    }
}
