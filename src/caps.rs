bitflags::bitflags! {
    /// Radio capabilities, queried once after init
    ///
    /// The stack enables or disables functions based on these bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RadioCaps: u8 {
        /// Hardware waits for the ACK and reports `NoAck` on timeout by itself
        const ACK_TIMEOUT = 1;
    }
}

impl RadioCaps {
    pub const NONE: RadioCaps = RadioCaps::empty();
}

#[cfg(feature = "defmt")]
impl defmt::Format for RadioCaps {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RadioCaps({=u8:#x})", self.bits())
    }
}
