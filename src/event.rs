/// Hardware events reported by the platform's interrupt path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyEvent {
    /// A frame is ready to be read with `Phy::read_frame`
    FrameReceived,
    ReceiveAborted,
    /// Frame sent, and acknowledged if an ACK was requested
    TransmitComplete { frame_pending: bool },
    NoAck,
    /// CCA failed, the frame was not sent
    ChannelAccessFailure,
    TransmitAborted,
    /// Noise floor sample in dBm, 127 if the sample is invalid
    NoiseFloor(i8),
}
