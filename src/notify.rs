//! Completion notifications as messages
//!
//! [`ChannelHandler`] forwards every callback into an `embassy-sync` channel
//! owned by the caller, so a task can `receive().await` the outcome of a
//! sequence instead of reacting inside the event context.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender, TrySendError};

use crate::{Error, RadioFrame, RadioHandler};

/// Completion of a receive or transmit sequence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Copy of the received frame, or `Error::Abort`
    ReceiveDone(Result<RadioFrame, Error>),
    /// Frame pending flag of the ACK, or the transmit error
    TransmitDone(Result<bool, Error>),
}

/// [`RadioHandler`] that sends a [`Notification`] per callback
///
/// Notifications are dropped with a warning if the channel is full, size it
/// for the number of sequences the caller may leave unread.
pub struct ChannelHandler<'a, M: RawMutex, const N: usize> {
    sender: Sender<'a, M, Notification, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelHandler<'a, M, N> {
    pub fn new(channel: &'a Channel<M, Notification, N>) -> Self {
        Self {
            sender: channel.sender(),
        }
    }

    fn send(&self, notification: Notification) {
        if let Err(TrySendError::Full(dropped)) = self.sender.try_send(notification) {
            log::warn!("Notification channel full, dropping {:?}", dropped);
        }
    }
}

impl<M: RawMutex, const N: usize> RadioHandler for ChannelHandler<'_, M, N> {
    fn receive_done(&mut self, result: Result<&RadioFrame, Error>) {
        self.send(Notification::ReceiveDone(result.cloned()));
    }

    fn transmit_done(&mut self, result: Result<bool, Error>) {
        self.send(Notification::TransmitDone(result));
    }
}
