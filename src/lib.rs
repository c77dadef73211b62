#![cfg_attr(not(test), no_std)]

//! IEEE 802.15.4 radio state machine and frame exchange layer
//!
//! [`Radio`] sits between a transceiver ([`Phy`]) and a mesh networking
//! stack. The stack drives power states and receive/transmit sequences with
//! synchronous commands, the outcome of every sequence is pushed to a
//! [`RadioHandler`] once the platform reports the hardware event.

mod address;
mod caps;
pub mod config;
mod error;
mod event;
mod frame;
pub mod notify;
pub mod phy;
mod radio;
pub mod sim;
mod traits;

pub use address::{AddressFilter, ExtendedAddress, PanId, ShortAddress};
pub use caps::RadioCaps;
pub use config::RadioConfig;
pub use error::{Error, PhyError};
pub use event::PhyEvent;
pub use frame::{FrameError, RadioFrame};
pub use phy::Channel;
pub use radio::{Radio, State};
pub use traits::{Phy, RadioHandler};
