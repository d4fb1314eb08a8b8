//! Property-based tests for the playback controller
//!
//! Random sequences of play/stop/load must never leave more than one backend
//! handle playing, and a final stop always returns the controller to Idle.

mod common;

use common::*;
use proptest::prelude::*;
use soundstage_audio::pcm::PcmSamples;
use soundstage_playback::{PlaybackController, PlaybackState};

#[derive(Debug, Clone, Copy)]
enum Op {
    Play,
    Stop,
    Load,
    LoadPcm,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Play),
        2 => Just(Op::Stop),
        1 => Just(Op::Load),
        1 => Just(Op::LoadPcm),
    ]
}

fn live_handles(backend: &MockBackend) -> usize {
    backend.handles().iter().filter(|h| !h.was_stopped()).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: at most one live handle at any time, Idle after a final stop
    #[test]
    fn sessions_never_overlap(ops in prop::collection::vec(op_strategy(), 1..12)) {
        let backend = MockBackend::new(Mode::Forever);
        let mut controller = PlaybackController::with_config(backend.clone(), fast_config());

        for op in ops {
            match op {
                Op::Play => controller.play().unwrap(),
                Op::Stop => controller.stop(),
                Op::Load => controller.load(test_buffer()),
                Op::LoadPcm => controller
                    .load_pcm(PcmSamples::I16(vec![1_000; 882]), 44_100, 1)
                    .unwrap(),
            }
            prop_assert!(live_handles(&backend) <= 1);
            if matches!(op, Op::Stop | Op::Load | Op::LoadPcm) {
                prop_assert_eq!(controller.state(), PlaybackState::Idle);
                prop_assert_eq!(live_handles(&backend), 0);
            }
        }

        controller.stop();
        prop_assert_eq!(controller.state(), PlaybackState::Idle);
        prop_assert_eq!(live_handles(&backend), 0);
    }
}
