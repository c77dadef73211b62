#![allow(dead_code)]

use lrwpan_radio::sim::SimPhy;
use lrwpan_radio::{Error, Radio, RadioCaps, RadioFrame, RadioHandler};

/// Handler that keeps every notification
#[derive(Debug, Default)]
pub struct Recorder {
    pub received: Vec<Result<RadioFrame, Error>>,
    pub transmitted: Vec<Result<bool, Error>>,
}

impl RadioHandler for Recorder {
    fn receive_done(&mut self, result: Result<&RadioFrame, Error>) {
        self.received.push(result.cloned());
    }

    fn transmit_done(&mut self, result: Result<bool, Error>) {
        self.transmitted.push(result);
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn radio() -> Radio<SimPhy, Recorder> {
    init_logger();
    Radio::new(SimPhy::new(RadioCaps::NONE), Recorder::default())
}

pub fn enabled_radio() -> Radio<SimPhy, Recorder> {
    let mut radio = radio();
    radio.enable().expect("enable");
    radio
}

/// A frame as the hardware would hand it out
pub fn incoming(psdu: &[u8], power: i8, lqi: u8) -> RadioFrame {
    let mut frame = RadioFrame::new();
    frame.set_psdu(psdu).expect("psdu fits");
    frame.power = power;
    frame.lqi = lqi;
    frame
}
