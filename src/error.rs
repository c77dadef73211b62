use core::fmt;

use crate::frame::FrameError;

/// Error reported by radio commands and completion callbacks
///
/// `Fail` and `InvalidArgs` are returned synchronously by commands.
/// `Abort`, `NoAck` and `ChannelAccessFailure` only reach the caller through
/// [`RadioHandler`](crate::RadioHandler) callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The request could not be honored (wrong state, hardware refused)
    Fail,
    /// One or more parameters are malformed
    InvalidArgs,
    /// The receive or transmit sequence was aborted
    Abort,
    /// The frame was sent but the expected ACK never arrived
    NoAck,
    /// The channel was busy, the frame never went out
    ChannelAccessFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::Fail => "operation failed",
            Error::InvalidArgs => "invalid arguments",
            Error::Abort => "operation aborted",
            Error::NoAck => "no ack received",
            Error::ChannelAccessFailure => "channel access failure",
        };
        f.write_str(msg)
    }
}

/// Failure of the hardware layer behind [`Phy`](crate::Phy)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyError {
    /// Transceiver did not answer
    NotFound,
    /// Bus transfer (spi, uart, ...) failed
    Bus,
    Gpio,
    /// Hardware is still busy with a previous request
    Busy,
    /// Hardware rejected the request
    Rejected,
}

impl From<PhyError> for Error {
    fn from(_: PhyError) -> Self {
        Error::Fail
    }
}

impl From<FrameError> for Error {
    fn from(_: FrameError) -> Self {
        Error::InvalidArgs
    }
}
