use crate::phy::{airtime_us, Channel, MAX_PHY_PACKET_SIZE, PHY_NO_LQI};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Length is zero
    Empty,
    /// Length exceeds `MAX_PHY_PACKET_SIZE`
    TooLong,
    /// Channel is outside 11..=26
    InvalidChannel,
}

/// IEEE 802.15.4 radio frame exchanged with the driver
///
/// The PSDU bytes are opaque to this crate. `length` counts the valid bytes
/// in `psdu` and is checked by [`Radio::transmit`](crate::Radio::transmit)
/// before the frame reaches the hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioFrame {
    pub psdu: [u8; MAX_PHY_PACKET_SIZE],
    /// Number of valid bytes in `psdu`
    pub length: u8,
    /// Channel used to transmit/receive the frame
    pub channel: u8,
    /// Transmit/receive power in dBm
    pub power: i8,
    /// Link quality indicator of received frames, `PHY_NO_LQI` if unsupported
    pub lqi: u8,
    /// Security was enabled and the frame passed the security checks
    pub security_valid: bool,
}

impl RadioFrame {
    pub const fn new() -> RadioFrame {
        RadioFrame {
            psdu: [0; MAX_PHY_PACKET_SIZE],
            length: 0,
            channel: 0,
            power: 0,
            lqi: PHY_NO_LQI,
            security_valid: false,
        }
    }

    /// Copies `data` into the PSDU and sets the length
    pub fn set_psdu(&mut self, data: &[u8]) -> Result<(), FrameError> {
        if data.len() > MAX_PHY_PACKET_SIZE {
            return Err(FrameError::TooLong);
        }
        self.psdu[..data.len()].copy_from_slice(data);
        self.length = data.len() as u8;
        Ok(())
    }

    /// The valid part of the PSDU
    ///
    /// A length beyond the buffer is clamped, such a frame fails [`validate`](Self::validate).
    pub fn psdu(&self) -> &[u8] {
        let len = usize::from(self.length).min(MAX_PHY_PACKET_SIZE);
        &self.psdu[..len]
    }

    /// Link quality, `None` if the hardware does not measure it
    pub fn link_quality(&self) -> Option<u8> {
        match self.lqi {
            PHY_NO_LQI => None,
            lqi => Some(lqi),
        }
    }

    /// Checks the fields the hardware depends on for transmission
    pub fn validate(&self) -> Result<Channel, FrameError> {
        if self.length == 0 {
            return Err(FrameError::Empty);
        }
        if usize::from(self.length) > MAX_PHY_PACKET_SIZE {
            return Err(FrameError::TooLong);
        }
        Channel::new(self.channel).ok_or(FrameError::InvalidChannel)
    }

    /// Time on air in microseconds
    pub fn airtime_us(&self) -> u32 {
        airtime_us(self.length.min(MAX_PHY_PACKET_SIZE as u8))
    }

    /// Resets the receive metadata before the hardware fills the frame
    pub(crate) fn clear(&mut self) {
        self.length = 0;
        self.power = 0;
        self.lqi = PHY_NO_LQI;
        self.security_valid = false;
    }
}

impl Default for RadioFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(len: u8, channel: u8) -> RadioFrame {
        let mut frame = RadioFrame::new();
        frame.length = len;
        frame.channel = channel;
        frame
    }

    #[test]
    fn set_psdu_copies_data() {
        let mut frame = RadioFrame::new();
        frame.set_psdu(&[0x41, 0x88, 0x01]).unwrap();
        assert_eq!(frame.length, 3);
        assert_eq!(frame.psdu(), &[0x41, 0x88, 0x01]);
    }

    #[test]
    fn set_psdu_rejects_oversized_data() {
        let mut frame = RadioFrame::new();
        assert_eq!(frame.set_psdu(&[0; 128]), Err(FrameError::TooLong));
        assert_eq!(frame.length, 0);
        assert!(frame.set_psdu(&[0; 127]).is_ok());
    }

    #[test]
    fn validate_checks_length_and_channel() {
        assert_eq!(frame(10, 15).validate(), Ok(Channel::new(15).unwrap()));
        assert_eq!(frame(0, 15).validate(), Err(FrameError::Empty));
        assert_eq!(frame(128, 15).validate(), Err(FrameError::TooLong));
        assert_eq!(frame(10, 10).validate(), Err(FrameError::InvalidChannel));
        assert_eq!(frame(10, 27).validate(), Err(FrameError::InvalidChannel));
    }

    #[test]
    fn psdu_is_clamped_for_bogus_length() {
        assert_eq!(frame(200, 11).psdu().len(), MAX_PHY_PACKET_SIZE);
    }

    #[test]
    fn airtime_includes_header_and_clamps_length() {
        // 6 octets of SHR and PHR, 2 symbols per octet
        assert_eq!(frame(10, 11).airtime_us(), 512);
        assert_eq!(frame(0, 11).airtime_us(), 192);
        assert_eq!(frame(200, 11).airtime_us(), frame(127, 11).airtime_us());
    }

    #[test]
    fn lqi_zero_means_unsupported() {
        let mut frame = RadioFrame::new();
        assert_eq!(frame.link_quality(), None);
        frame.lqi = 200;
        assert_eq!(frame.link_quality(), Some(200));
    }
}
