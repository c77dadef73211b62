//! In-memory transceiver for host tests and bring-up
//!
//! `SimPhy` accepts every command, tracks what the hardware would be doing and
//! hands out frames queued with [`SimPhy::push_frame`]. Completion is not
//! simulated: the test passes events through [`SimPhy::complete`], which puts
//! the hardware back into standby, and reports them to the driver like an
//! interrupt would.

use heapless::{Deque, Vec};

use crate::address::AddressFilter;
use crate::phy::MAX_PHY_PACKET_SIZE;
use crate::{Channel, ExtendedAddress, PanId, Phy, PhyError, PhyEvent, RadioCaps, RadioFrame, ShortAddress};

/// Frames that can be queued for reception
pub const SIM_INBOX_LEN: usize = 4;

/// What the simulated hardware is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimPower {
    Off,
    Sleep,
    Standby,
    Rx,
    Tx,
}

pub struct SimPhy {
    caps: RadioCaps,
    power: SimPower,
    channel: Option<Channel>,
    filter: AddressFilter,
    inbox: Deque<RadioFrame, SIM_INBOX_LEN>,
    last_psdu: Vec<u8, MAX_PHY_PACKET_SIZE>,
    last_power: i8,
    transmitted: usize,
    /// Fails the command after the given number of accepted commands
    fail_at: Option<(usize, PhyError)>,
}

impl SimPhy {
    pub fn new(caps: RadioCaps) -> Self {
        Self {
            caps,
            power: SimPower::Off,
            channel: None,
            filter: AddressFilter::default(),
            inbox: Deque::new(),
            last_psdu: Vec::new(),
            last_power: 0,
            transmitted: 0,
            fail_at: None,
        }
    }

    /// Fails the next hardware command with `err`
    pub fn fail_next(&mut self, err: PhyError) {
        self.fail_after(0, err);
    }

    /// Accepts `commands` more hardware commands, then fails one with `err`
    pub fn fail_after(&mut self, commands: usize, err: PhyError) {
        self.fail_at = Some((commands, err));
    }

    /// Queues a frame the next `read_frame` hands out
    ///
    /// Gives the frame back if the inbox is full.
    pub fn push_frame(&mut self, frame: RadioFrame) -> Result<(), RadioFrame> {
        self.inbox.push_back(frame)
    }

    /// Finishes the ongoing sequence with `event`, returned for `Radio::handle_event`
    ///
    /// Completion events bring the hardware back to standby, noise floor
    /// samples leave it untouched.
    pub fn complete(&mut self, event: PhyEvent) -> PhyEvent {
        match event {
            PhyEvent::NoiseFloor(_) => (),
            _ => {
                if matches!(self.power, SimPower::Rx | SimPower::Tx) {
                    self.power = SimPower::Standby;
                }
            }
        }
        event
    }

    pub fn power(&self) -> SimPower {
        self.power
    }

    /// Channel of the last receive or transmit
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    pub fn filter(&self) -> &AddressFilter {
        &self.filter
    }

    /// PSDU of the last transmitted frame
    pub fn last_psdu(&self) -> &[u8] {
        &self.last_psdu
    }

    /// Power in dBm of the last transmitted frame
    pub fn last_power(&self) -> i8 {
        self.last_power
    }

    /// Number of frames handed to the simulated air
    pub fn transmitted(&self) -> usize {
        self.transmitted
    }

    fn check(&mut self) -> Result<(), PhyError> {
        match self.fail_at {
            Some((0, err)) => {
                self.fail_at = None;
                Err(err)
            }
            Some((n, err)) => {
                self.fail_at = Some((n - 1, err));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Phy for SimPhy {
    fn caps(&self) -> RadioCaps {
        self.caps
    }

    fn set_pan_id(&mut self, pan_id: PanId) -> Result<(), PhyError> {
        self.check()?;
        self.filter.pan_id = pan_id;
        Ok(())
    }

    fn set_extended_address(&mut self, address: &ExtendedAddress) -> Result<(), PhyError> {
        self.check()?;
        self.filter.extended_address = *address;
        Ok(())
    }

    fn set_short_address(&mut self, address: ShortAddress) -> Result<(), PhyError> {
        self.check()?;
        self.filter.short_address = address;
        Ok(())
    }

    fn power_up(&mut self) -> Result<(), PhyError> {
        self.check()?;
        self.power = SimPower::Standby;
        Ok(())
    }

    fn power_down(&mut self) -> Result<(), PhyError> {
        self.check()?;
        self.power = SimPower::Off;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), PhyError> {
        self.check()?;
        self.power = SimPower::Sleep;
        Ok(())
    }

    fn idle(&mut self) -> Result<(), PhyError> {
        self.check()?;
        self.power = SimPower::Standby;
        Ok(())
    }

    fn start_receive(&mut self, channel: Channel) -> Result<(), PhyError> {
        self.check()?;
        self.channel = Some(channel);
        self.power = SimPower::Rx;
        Ok(())
    }

    fn start_transmit(&mut self, frame: &RadioFrame) -> Result<(), PhyError> {
        self.check()?;
        self.last_psdu = Vec::from_slice(frame.psdu()).map_err(|_| PhyError::Rejected)?;
        self.last_power = frame.power;
        self.channel = Channel::new(frame.channel);
        self.power = SimPower::Tx;
        self.transmitted += 1;
        Ok(())
    }

    fn read_frame(&mut self, frame: &mut RadioFrame) -> Result<(), PhyError> {
        self.check()?;
        let received = self.inbox.pop_front().ok_or(PhyError::Rejected)?;
        *frame = received;
        self.power = SimPower::Standby;
        Ok(())
    }
}
