use crate::address::AddressFilter;
use crate::phy::{Channel, NOISE_FLOOR_INVALID};
use crate::{Error, ExtendedAddress, PanId, Phy, PhyError, PhyEvent, RadioCaps, RadioFrame, RadioHandler, ShortAddress};

/// Operating state of the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Powered down, initial state
    Disabled,
    /// Powered, receiver off in low power mode
    Sleep,
    /// Powered, ready for receive or transmit
    Idle,
    /// Listening on a channel until a frame arrives or reception is aborted
    Receive,
    /// Transmit sequence in progress, the driver owns the transmit buffer
    Transmit,
}

/// IEEE 802.15.4 radio driver
///
/// Owns the hardware, the single transmit buffer and the receive buffer.
/// Commands return as soon as the state transition was requested, the outcome
/// of receive and transmit sequences is pushed to the [`RadioHandler`] once the
/// platform reports the matching [`PhyEvent`] through [`Radio::handle_event`].
pub struct Radio<P, H> {
    phy: P,
    handler: H,

    /// Current cached state
    state: State,
    caps: RadioCaps,
    filter: AddressFilter,
    tx_frame: RadioFrame,
    rx_frame: RadioFrame,
    rx_channel: Option<Channel>,
    noise_floor: i8,
}

fn hw_error(op: &str, err: PhyError) -> Error {
    log::warn!("{} failed: {:?}", op, err);
    err.into()
}

impl<P, H> Radio<P, H>
where
    P: Phy,
    H: RadioHandler,
{
    /// Initializes the driver, the radio starts `Disabled`
    ///
    /// The hardware capabilities are read once here and cached for the
    /// lifetime of the driver.
    ///
    /// # Arguments
    ///
    /// * `phy` - The transceiver hardware
    /// * `handler` - Receives the completion notifications
    pub fn new(phy: P, handler: H) -> Self {
        let caps = phy.caps();
        log::debug!("Radio init, caps {:#04x}", caps.bits());
        Self {
            phy,
            handler,
            state: State::Disabled,
            caps,
            filter: AddressFilter::default(),
            tx_frame: RadioFrame::new(),
            rx_frame: RadioFrame::new(),
            rx_channel: None,
            noise_floor: NOISE_FLOOR_INVALID,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Capability bits read at init
    pub fn caps(&self) -> RadioCaps {
        self.caps
    }

    /// Most recent valid noise floor in dBm, `NOISE_FLOOR_INVALID` (127) if there is none
    pub fn noise_floor(&self) -> i8 {
        self.noise_floor
    }

    pub fn address_filter(&self) -> &AddressFilter {
        &self.filter
    }

    /// Channel of the ongoing receive sequence
    pub fn receive_channel(&self) -> Option<Channel> {
        self.rx_channel
    }

    pub fn phy(&self) -> &P {
        &self.phy
    }

    pub fn phy_mut(&mut self) -> &mut P {
        &mut self.phy
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Gives back the hardware and the handler
    pub fn release(self) -> (P, H) {
        (self.phy, self.handler)
    }

    /// Sets the PAN ID for address filtering
    ///
    /// While `Disabled` the value is kept and written to the hardware by [`enable`](Self::enable).
    pub fn set_pan_id(&mut self, pan_id: PanId) -> Result<(), Error> {
        if self.state != State::Disabled {
            self.phy.set_pan_id(pan_id).map_err(|e| hw_error("Set pan id", e))?;
        }
        self.filter.pan_id = pan_id;
        Ok(())
    }

    /// Sets the extended address for address filtering
    pub fn set_extended_address(&mut self, address: ExtendedAddress) -> Result<(), Error> {
        if self.state != State::Disabled {
            self.phy
                .set_extended_address(&address)
                .map_err(|e| hw_error("Set extended address", e))?;
        }
        self.filter.extended_address = address;
        Ok(())
    }

    /// Sets the short address for address filtering
    pub fn set_short_address(&mut self, address: ShortAddress) -> Result<(), Error> {
        if self.state != State::Disabled {
            self.phy
                .set_short_address(address)
                .map_err(|e| hw_error("Set short address", e))?;
        }
        self.filter.short_address = address;
        Ok(())
    }

    /// Powers up the radio, `Disabled` -> `Idle`
    ///
    /// The address filter is written to the hardware afterwards. On any
    /// failure the radio is powered down again and stays `Disabled`.
    pub fn enable(&mut self) -> Result<(), Error> {
        if self.state != State::Disabled {
            log::warn!("Enable refused in state {:?}", self.state);
            return Err(Error::Fail);
        }
        self.phy.power_up().map_err(|e| hw_error("Power up", e))?;
        if let Err(e) = self.write_filter() {
            if let Err(e) = self.phy.power_down() {
                log::warn!("Power down after failed enable: {:?}", e);
            }
            return Err(e);
        }
        self.set_state(State::Idle);
        Ok(())
    }

    /// Powers down the radio
    ///
    /// Allowed in every state except `Transmit`. A receive sequence in
    /// progress is first concluded like [`idle`](Self::idle) does: the radio
    /// returns to `Idle` and `Error::Abort` is reported, then it powers down.
    /// If powering down fails the radio stays `Idle`.
    pub fn disable(&mut self) -> Result<(), Error> {
        match self.state {
            State::Disabled => return Ok(()),
            State::Transmit => {
                log::warn!("Disable refused while transmitting");
                return Err(Error::Fail);
            }
            State::Receive => self.idle()?,
            State::Idle | State::Sleep => (),
        }
        self.phy.power_down().map_err(|e| hw_error("Power down", e))?;
        self.set_state(State::Disabled);
        Ok(())
    }

    /// `Idle` -> `Sleep`
    pub fn sleep(&mut self) -> Result<(), Error> {
        if self.state != State::Idle {
            log::warn!("Sleep refused in state {:?}", self.state);
            return Err(Error::Fail);
        }
        self.phy.sleep().map_err(|e| hw_error("Sleep", e))?;
        self.set_state(State::Sleep);
        Ok(())
    }

    /// Returns to `Idle`
    ///
    /// From `Receive` the ongoing reception is aborted and reported with
    /// `Error::Abort`. Fails while `Disabled` or during a transmit sequence.
    pub fn idle(&mut self) -> Result<(), Error> {
        match self.state {
            State::Idle => Ok(()),
            State::Sleep | State::Receive => {
                self.phy.idle().map_err(|e| hw_error("Idle", e))?;
                let receiving = self.state == State::Receive;
                self.set_state(State::Idle);
                if receiving {
                    self.abort_receive();
                }
                Ok(())
            }
            State::Disabled | State::Transmit => {
                log::warn!("Idle refused in state {:?}", self.state);
                Err(Error::Fail)
            }
        }
    }

    /// Begins the receive sequence on `channel`
    ///
    /// `Ok` means the radio is listening, the frame itself is delivered by
    /// `RadioHandler::receive_done`. An invalid channel is rejected with
    /// `InvalidArgs` in every state.
    pub fn receive(&mut self, channel: u8) -> Result<(), Error> {
        let channel = Channel::new(channel).ok_or_else(|| {
            log::warn!("Receive refused, invalid channel {}", channel);
            Error::InvalidArgs
        })?;
        if self.state != State::Idle {
            log::warn!("Receive refused in state {:?}", self.state);
            return Err(Error::Fail);
        }
        self.phy
            .start_receive(channel)
            .map_err(|e| hw_error("Start receive", e))?;
        self.rx_channel = Some(channel);
        self.set_state(State::Receive);
        Ok(())
    }

    /// The transmit buffer
    ///
    /// The caller forms the frame here, including channel and power, before
    /// calling [`transmit`](Self::transmit). Returns `None` while a transmit
    /// sequence owns the buffer, it is handed back once
    /// `RadioHandler::transmit_done` was called.
    pub fn transmit_buffer(&mut self) -> Option<&mut RadioFrame> {
        match self.state {
            State::Transmit => None,
            _ => Some(&mut self.tx_frame),
        }
    }

    /// Begins the transmit sequence for the frame in the transmit buffer
    ///
    /// `Ok` means the sequence started, the outcome is delivered by
    /// `RadioHandler::transmit_done`. Malformed frames are rejected with
    /// `InvalidArgs` and never reach the hardware.
    pub fn transmit(&mut self) -> Result<(), Error> {
        let channel = self.tx_frame.validate().map_err(|e| {
            log::warn!("Transmit refused, malformed frame: {:?}", e);
            Error::from(e)
        })?;
        if self.state != State::Idle {
            log::warn!("Transmit refused in state {:?}", self.state);
            return Err(Error::Fail);
        }
        self.phy
            .start_transmit(&self.tx_frame)
            .map_err(|e| hw_error("Start transmit", e))?;
        log::debug!(
            "Tx: Len {}; Channel {}; Power {}",
            self.tx_frame.length,
            channel.number(),
            self.tx_frame.power
        );
        self.set_state(State::Transmit);
        Ok(())
    }

    /// Processes an event reported by the hardware
    ///
    /// Completion events finish the matching sequence, return to `Idle` and
    /// notify the handler exactly once. Events that do not match the current
    /// state are dropped.
    ///
    /// Events carry no sequence tag. A completion of a receive aborted by
    /// [`idle`](Self::idle) or [`disable`](Self::disable) that is still in
    /// flight when the next `receive` starts would end that new sequence, so
    /// `Phy::idle` and `Phy::power_down` must discard pending events of the
    /// sequence they abort.
    pub fn handle_event(&mut self, event: PhyEvent) {
        match event {
            PhyEvent::NoiseFloor(value) => self.update_noise_floor(value),
            PhyEvent::FrameReceived => {
                if self.expect(State::Receive, event) {
                    let result = self.read_received();
                    self.finish_receive(result);
                }
            }
            PhyEvent::ReceiveAborted => {
                if self.expect(State::Receive, event) {
                    self.finish_receive(Err(Error::Abort));
                }
            }
            PhyEvent::TransmitComplete { frame_pending } => self.finish_transmit(event, Ok(frame_pending)),
            PhyEvent::NoAck => self.finish_transmit(event, Err(Error::NoAck)),
            PhyEvent::ChannelAccessFailure => self.finish_transmit(event, Err(Error::ChannelAccessFailure)),
            PhyEvent::TransmitAborted => self.finish_transmit(event, Err(Error::Abort)),
        }
    }

    fn set_state(&mut self, state: State) {
        log::debug!("State {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn expect(&self, state: State, event: PhyEvent) -> bool {
        if self.state != state {
            log::warn!("Dropping {:?} in state {:?}", event, self.state);
            return false;
        }
        true
    }

    fn write_filter(&mut self) -> Result<(), Error> {
        let filter = self.filter;
        self.phy
            .set_pan_id(filter.pan_id)
            .map_err(|e| hw_error("Set pan id", e))?;
        self.phy
            .set_extended_address(&filter.extended_address)
            .map_err(|e| hw_error("Set extended address", e))?;
        self.phy
            .set_short_address(filter.short_address)
            .map_err(|e| hw_error("Set short address", e))
    }

    fn read_received(&mut self) -> Result<(), Error> {
        self.rx_frame.clear();
        if let Err(e) = self.phy.read_frame(&mut self.rx_frame) {
            log::warn!("Reading received frame failed: {:?}", e);
            return Err(Error::Abort);
        }
        if self.rx_frame.length == 0 || usize::from(self.rx_frame.length) > self.rx_frame.psdu.len() {
            log::warn!("Received frame with bogus length {}", self.rx_frame.length);
            return Err(Error::Abort);
        }
        if let Some(channel) = self.rx_channel {
            self.rx_frame.channel = channel.number();
        }
        Ok(())
    }

    fn finish_receive(&mut self, result: Result<(), Error>) {
        self.rx_channel = None;
        self.set_state(State::Idle);
        match result {
            Ok(()) => {
                log::info!(
                    "Rx: Len {}; Power {}; Lqi {}",
                    self.rx_frame.length,
                    self.rx_frame.power,
                    self.rx_frame.lqi
                );
                self.handler.receive_done(Ok(&self.rx_frame));
            }
            Err(e) => {
                log::info!("Rx: {:?}", e);
                self.handler.receive_done(Err(e));
            }
        }
    }

    fn abort_receive(&mut self) {
        self.rx_channel = None;
        log::info!("Rx: aborted");
        self.handler.receive_done(Err(Error::Abort));
    }

    fn finish_transmit(&mut self, event: PhyEvent, result: Result<bool, Error>) {
        if !self.expect(State::Transmit, event) {
            return;
        }
        self.set_state(State::Idle);
        log::info!("Tx done: {:?}", result);
        self.handler.transmit_done(result);
    }

    fn update_noise_floor(&mut self, value: i8) {
        if value == NOISE_FLOOR_INVALID {
            log::debug!("Ignoring invalid noise floor sample");
            return;
        }
        self.noise_floor = value;
    }
}
