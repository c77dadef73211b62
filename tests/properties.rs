mod common;

use common::{enabled_radio, incoming, radio};
use lrwpan_radio::phy::{MAX_PHY_PACKET_SIZE, PHY_MAX_CHANNEL, PHY_MIN_CHANNEL};
use lrwpan_radio::{Error, PhyEvent, State};
use proptest::prelude::*;

fn invalid_channel() -> impl Strategy<Value = u8> {
    prop_oneof![0..PHY_MIN_CHANNEL, (PHY_MAX_CHANNEL + 1)..=u8::MAX]
}

fn valid_channel() -> impl Strategy<Value = u8> {
    PHY_MIN_CHANNEL..=PHY_MAX_CHANNEL
}

fn transmit_outcome() -> impl Strategy<Value = PhyEvent> {
    prop_oneof![
        any::<bool>().prop_map(|frame_pending| PhyEvent::TransmitComplete { frame_pending }),
        Just(PhyEvent::NoAck),
        Just(PhyEvent::ChannelAccessFailure),
        Just(PhyEvent::TransmitAborted),
    ]
}

proptest! {
    #[test]
    fn invalid_channel_is_rejected_in_every_state(channel in invalid_channel(), enable in any::<bool>()) {
        let mut radio = radio();
        if enable {
            radio.enable().unwrap();
        }
        let before = radio.state();
        prop_assert_eq!(radio.receive(channel), Err(Error::InvalidArgs));
        prop_assert_eq!(radio.state(), before);
        prop_assert!(radio.handler().received.is_empty());
    }

    #[test]
    fn oversized_frame_never_transmits(length in (MAX_PHY_PACKET_SIZE as u8 + 1)..=u8::MAX, channel in valid_channel()) {
        let mut radio = enabled_radio();
        let buffer = radio.transmit_buffer().unwrap();
        buffer.length = length;
        buffer.channel = channel;

        prop_assert_eq!(radio.transmit(), Err(Error::InvalidArgs));
        prop_assert_eq!(radio.state(), State::Idle);
        prop_assert_eq!(radio.phy().transmitted(), 0);

        // a completion the hardware never had cause to send is ignored
        radio.handle_event(PhyEvent::TransmitComplete { frame_pending: false });
        prop_assert!(radio.handler().transmitted.is_empty());
    }

    #[test]
    fn every_receive_ends_with_one_notification(
        channel in valid_channel(),
        psdu in prop::collection::vec(any::<u8>(), 1..=MAX_PHY_PACKET_SIZE),
        abort in any::<bool>(),
    ) {
        let mut radio = enabled_radio();
        radio.receive(channel).unwrap();
        if abort {
            radio.handle_event(PhyEvent::ReceiveAborted);
        } else {
            radio.phy_mut().push_frame(incoming(&psdu, -50, 255)).unwrap();
            radio.handle_event(PhyEvent::FrameReceived);
        }
        radio.handle_event(PhyEvent::ReceiveAborted);

        prop_assert_eq!(radio.state(), State::Idle);
        let received = &radio.handler().received;
        prop_assert_eq!(received.len(), 1);
        match &received[0] {
            Ok(frame) => {
                prop_assert!(!abort);
                prop_assert_eq!(frame.psdu(), &psdu[..]);
                prop_assert_eq!(frame.channel, channel);
            }
            Err(e) => {
                prop_assert!(abort);
                prop_assert_eq!(*e, Error::Abort);
            }
        }
    }

    #[test]
    fn every_transmit_ends_with_one_notification(
        channel in valid_channel(),
        psdu in prop::collection::vec(any::<u8>(), 1..=MAX_PHY_PACKET_SIZE),
        outcome in transmit_outcome(),
    ) {
        let mut radio = enabled_radio();
        let buffer = radio.transmit_buffer().unwrap();
        buffer.set_psdu(&psdu).unwrap();
        buffer.channel = channel;
        radio.transmit().unwrap();
        prop_assert!(radio.transmit_buffer().is_none());

        radio.handle_event(outcome);
        radio.handle_event(outcome);

        prop_assert_eq!(radio.state(), State::Idle);
        prop_assert_eq!(radio.handler().transmitted.len(), 1);
        let expected = match outcome {
            PhyEvent::TransmitComplete { frame_pending } => Ok(frame_pending),
            PhyEvent::NoAck => Err(Error::NoAck),
            PhyEvent::ChannelAccessFailure => Err(Error::ChannelAccessFailure),
            _ => Err(Error::Abort),
        };
        prop_assert_eq!(radio.handler().transmitted[0], expected);
    }
}
