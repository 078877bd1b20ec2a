//! Property tests for the winding state machine and angle translation.

use proptest::prelude::*;

use unipolar_stepper::{angle_to_steps, Degrees, Direction, DriveMode, WindingState};

use crate::common::Bench;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn drive_mode() -> impl Strategy<Value = DriveMode> {
    prop_oneof![Just(DriveMode::FullStep), Just(DriveMode::HalfStep)]
}

/// Walk `path` from `Single(start)` and return the state reached.
fn walk(start: usize, n: usize, mode: DriveMode, path: &[Direction]) -> WindingState {
    path.iter().fold(WindingState::Single(start), |state, &dir| {
        state.advance(dir, n, mode).state
    })
}

proptest! {
    #[test]
    fn step_then_reverse_restores_state(
        n in 2usize..=8,
        start in 0usize..8,
        path in prop::collection::vec(direction(), 0..40),
        mode in drive_mode(),
        dir in direction(),
    ) {
        let state = walk(start % n, n, mode, &path);
        let there = state.advance(dir, n, mode).state;
        let back = there.advance(dir.reversed(), n, mode).state;
        prop_assert_eq!(back, state);
    }

    #[test]
    fn state_stays_on_the_ring(
        n in 2usize..=8,
        start in 0usize..8,
        path in prop::collection::vec(direction(), 0..64),
        mode in drive_mode(),
    ) {
        let mut state = WindingState::Single(start % n);
        for dir in path {
            state = state.advance(dir, n, mode).state;
            prop_assert!(state.is_valid(n));
            prop_assert!(state.index() < n);
        }
    }

    #[test]
    fn full_cycle_returns_to_start(
        n in 2usize..=8,
        start in 0usize..8,
        mode in drive_mode(),
        dir in direction(),
    ) {
        let steps = match mode {
            DriveMode::FullStep => n,
            DriveMode::HalfStep => 2 * n,
        };
        let path = vec![dir; steps];
        prop_assert_eq!(walk(start % n, n, mode, &path), WindingState::Single(start % n));
    }

    #[test]
    fn opposite_angles_give_opposite_steps(
        angle in -3600.0f32..3600.0,
        degrees_per_step in 0.001f32..10.0,
    ) {
        let forward = angle_to_steps(Degrees(angle), degrees_per_step).unwrap();
        let backward = angle_to_steps(Degrees(-angle), degrees_per_step).unwrap();
        prop_assert_eq!(forward, -backward);
    }

    #[test]
    fn pins_match_winding_state(
        n in 2u8..=8,
        path in prop::collection::vec(direction(), 0..32),
        mode in drive_mode(),
    ) {
        let bench = Bench::new();
        let mut motor = bench.builder(n).drive_mode(mode).build().unwrap();

        for dir in path {
            let state = motor.step(dir).unwrap();
            let (first, second) = state.coils();
            let mut expected: Vec<u8> = std::iter::once(first)
                .chain(second)
                .map(|coil| coil as u8)
                .collect();
            expected.sort_unstable();
            prop_assert_eq!(bench.energized(), expected);
        }
    }
}
