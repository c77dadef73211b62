use crate::{Channel, Error, ExtendedAddress, PanId, PhyError, RadioCaps, RadioFrame, ShortAddress};

/// Transceiver hardware driven by [`Radio`](crate::Radio)
///
/// Implementations program the hardware and return as soon as the request is
/// accepted. Completion of receive and transmit sequences is reported later by
/// the platform's interrupt path through [`Radio::handle_event`](crate::Radio::handle_event).
///
/// When a receive or transmit sequence finishes, the hardware returns to
/// standby by itself before the completion event is reported. The driver does
/// not issue a command to get there.
pub trait Phy {
    /// Capabilities of the hardware, read once at init
    fn caps(&self) -> RadioCaps;

    fn set_pan_id(&mut self, pan_id: PanId) -> Result<(), PhyError>;
    fn set_extended_address(&mut self, address: &ExtendedAddress) -> Result<(), PhyError>;
    fn set_short_address(&mut self, address: ShortAddress) -> Result<(), PhyError>;

    /// Powers up the transceiver into its standby state
    fn power_up(&mut self) -> Result<(), PhyError>;
    fn power_down(&mut self) -> Result<(), PhyError>;
    /// Low power mode with the receiver turned off
    fn sleep(&mut self) -> Result<(), PhyError>;
    /// Standby, aborting any ongoing reception
    ///
    /// Completion events of the aborted reception that are still pending must
    /// be discarded, the same applies to `power_down`.
    fn idle(&mut self) -> Result<(), PhyError>;

    fn start_receive(&mut self, channel: Channel) -> Result<(), PhyError>;
    /// Starts sending the validated `frame` on its channel with its power
    fn start_transmit(&mut self, frame: &RadioFrame) -> Result<(), PhyError>;
    /// Copies the last received frame out of the hardware
    ///
    /// Called by the driver after a `PhyEvent::FrameReceived`. The driver
    /// stamps the receive channel afterwards.
    fn read_frame(&mut self, frame: &mut RadioFrame) -> Result<(), PhyError>;
}

/// Receives completion notifications from [`Radio`](crate::Radio)
///
/// Called from the context that delivers hardware events, which may run
/// concurrently with the context issuing commands. Implementations must not
/// block and must not issue new radio commands.
pub trait RadioHandler {
    /// A receive sequence concluded
    ///
    /// `Err(Error::Abort)` means no frame was received.
    fn receive_done(&mut self, result: Result<&RadioFrame, Error>);

    /// A transmit sequence concluded
    ///
    /// `Ok(frame_pending)` is true if an ACK was received with the frame
    /// pending bit set. Errors are `NoAck`, `ChannelAccessFailure` or `Abort`.
    fn transmit_done(&mut self, result: Result<bool, Error>);
}

impl<H: RadioHandler + ?Sized> RadioHandler for &mut H {
    fn receive_done(&mut self, result: Result<&RadioFrame, Error>) {
        (**self).receive_done(result)
    }

    fn transmit_done(&mut self, result: Result<bool, Error>) {
        (**self).transmit_done(result)
    }
}
