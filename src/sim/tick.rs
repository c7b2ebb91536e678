//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per running
//! tick the order is fixed: physics, pipes, bubbles, then collision and
//! scoring against the moved positions.

use super::state::{CrashKind, GameEvent, GamePhase, GameState};
use super::{autopilot, collision, effects, obstacles, physics};
use crate::highscores::ScoreStore;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed since the last tick (replayed input)
    pub jump: bool,
    /// Idle/demo mode - autopilot presses jump
    pub autopilot: bool,
}

/// The one input entry point: key, click and tap all land here.
///
/// Idle starts a run, Running flaps, Ended returns to the title screen.
pub fn jump(state: &mut GameState) {
    match state.phase {
        GamePhase::Idle => start_session(state),
        GamePhase::Running => {
            physics::apply_jump(&mut state.crab, state.tuning.jump_velocity);
            effects::spawn_jump_bubbles(state);
            state.events.push(GameEvent::Flapped);
        }
        GamePhase::Ended => reset_to_idle(state),
    }
}

fn start_session(state: &mut GameState) {
    state.phase = GamePhase::Running;
    state.crab.y = state.world.height / 2.0;
    physics::apply_jump(&mut state.crab, state.tuning.jump_velocity);
    state.pipes.clear();
    state.score = 0;
    state.run_ticks = 0;
    state.events.push(GameEvent::Started);
    log::info!("Run started (best {})", state.best_score);
}

fn reset_to_idle(state: &mut GameState) {
    state.phase = GamePhase::Idle;
    state.crab.y = state.world.height / 2.0;
    state.crab.vel = 0.0;
    state.events.push(GameEvent::Reset);
}

/// Latch the run as ended and persist a new best.
///
/// Only acts on the Running -> Ended transition.
pub fn end_session(state: &mut GameState, kind: CrashKind, store: &mut dyn ScoreStore) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.phase = GamePhase::Ended;
    state.events.push(GameEvent::Crashed(kind));
    log::info!("Run ended by {:?} with score {}", kind, state.score);

    if state.score > state.best_score {
        state.best_score = state.score;
        store.set(state.score);
        state.events.push(GameEvent::NewBest { score: state.score });
        log::info!("New best score: {}", state.score);
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, store: &mut dyn ScoreStore) {
    if input.autopilot && autopilot::wants_jump(state) {
        jump(state);
    }
    if input.jump {
        jump(state);
    }

    // Nothing moves outside a run
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.run_ticks += 1;

    physics::integrate(&mut state.crab, state.tuning.gravity);
    obstacles::update(state);

    effects::update_bubbles(&mut state.bubbles);
    let interval = state.tuning.ambient_bubble_interval;
    if interval > 0 && state.run_ticks % interval == 0 {
        effects::spawn_ambient_bubble(state);
    }

    if let Some(kind) = collision::score_and_collide(state) {
        end_session(state, kind, store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::StoredBestScore;
    use crate::persistence::MemoryStore;
    use crate::sim::state::{Pipe, World};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn store() -> StoredBestScore<MemoryStore> {
        StoredBestScore::new(MemoryStore::new())
    }

    /// Field tall enough that a single flap never reaches the floor in 60 ticks
    fn tall_state(seed: u64) -> GameState {
        let world = World {
            width: DEFAULT_WIDTH,
            height: 800.0,
        };
        GameState::with_world(seed, world, Tuning::default())
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = GameState::new(12345);
        let mut store = store();
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.crab.y, DEFAULT_HEIGHT / 2.0);
    }

    #[test]
    fn test_jump_starts_run() {
        let mut state = GameState::new(12345);
        state.score = 9;
        state.pipes.push(Pipe::new(99, 10.0, 100.0));
        state.crab.y = 17.0;

        jump(&mut state);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.crab.y, DEFAULT_HEIGHT / 2.0);
        assert_eq!(state.crab.vel, JUMP_VELOCITY);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_sixty_ticks_after_start() {
        let mut state = tall_state(1);
        let mut store = store();
        jump(&mut state);
        let start = state.crab.y;

        let mut expected = start;
        let mut v = JUMP_VELOCITY;
        for _ in 0..60 {
            expected += v;
            v += GRAVITY;
            tick(&mut state, &TickInput::default(), &mut store);
        }

        assert_eq!(state.phase, GamePhase::Running);
        assert!((state.crab.vel - 14.0).abs() < 1e-3);
        assert!((state.crab.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_velocity_grows_by_gravity_each_tick() {
        let mut state = tall_state(2);
        let mut store = store();
        jump(&mut state);
        for _ in 0..40 {
            let before = state.crab.vel;
            tick(&mut state, &TickInput::default(), &mut store);
            assert!((state.crab.vel - before - GRAVITY).abs() < 1e-5);
        }
    }

    #[test]
    fn test_flap_overrides_velocity_and_releases_bubbles() {
        let mut state = tall_state(3);
        let mut store = store();
        jump(&mut state);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &mut store);
        }
        assert!(state.crab.vel > 0.0);
        let bubbles_before = state.bubbles.len();
        state.drain_events();

        jump(&mut state);

        assert_eq!(state.crab.vel, JUMP_VELOCITY);
        assert_eq!(state.bubbles.len(), bubbles_before + JUMP_BUBBLES);
        assert_eq!(state.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_floor_crash_records_new_best() {
        let mut state = GameState::new(4);
        let mut store = store();
        store.set(2);
        state.best_score = store.get();

        jump(&mut state);
        state.score = 3;
        state.pipes.clear();
        state.crab.y = state.floor_y() - state.tuning.crab_size + 1.0;
        state.crab.vel = 0.0;
        state.drain_events();

        tick(&mut state, &TickInput::default(), &mut store);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.best_score, 3);
        assert_eq!(store.get(), 3);
        assert!(state.is_new_best());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Crashed(CrashKind::Floor)));
        assert!(events.contains(&GameEvent::NewBest { score: 3 }));
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let mut state = GameState::new(4);
        let mut store = store();
        store.set(10);
        state.best_score = store.get();

        jump(&mut state);
        state.score = 3;
        state.crab.y = -100.0;
        tick(&mut state, &TickInput::default(), &mut store);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.best_score, 10);
        assert_eq!(store.get(), 10);
        assert!(!state.is_new_best());
    }

    #[test]
    fn test_end_session_latches() {
        let mut state = GameState::new(4);
        let mut store = store();
        jump(&mut state);
        state.score = 1;
        end_session(&mut state, CrashKind::Ceiling, &mut store);
        state.score = 5;
        end_session(&mut state, CrashKind::Floor, &mut store);

        assert_eq!(state.best_score, 1);
        assert_eq!(store.get(), 1);
        let crashes = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Crashed(_)))
            .count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_ended_ignores_ticks_until_jump() {
        let mut state = GameState::new(5);
        let mut store = store();
        jump(&mut state);
        state.crab.y = -10.0;
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.phase, GamePhase::Ended);

        let frozen = (state.crab, state.pipes.clone(), state.time_ticks);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &mut store);
        }
        assert_eq!((state.crab, state.pipes.clone(), state.time_ticks), frozen);

        jump(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.crab.y, DEFAULT_HEIGHT / 2.0);
        assert_eq!(state.crab.vel, 0.0);

        jump(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_pipe_crash_ends_run() {
        let mut state = GameState::new(6);
        let mut store = store();
        jump(&mut state);
        state.crab.y = 100.0;
        state.crab.vel = 0.0;
        // Solid from 0 to 400 right on top of the crab
        state.pipes.push(Pipe::new(50, 70.0, 400.0));
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Crashed(CrashKind::Pipe { id: 50 }))
        );
    }

    #[test]
    fn test_point_scored_on_crash_tick_counts_toward_best() {
        let mut state = GameState::new(8);
        let mut store = store();
        jump(&mut state);
        state.pipes.clear();
        state.run_ticks = 5;
        state.crab.y = 200.0;
        state.crab.vel = 0.0;
        // Moves to 69 this tick: inset edge 79 passes the crab at 80, gap clear
        state.pipes.push(Pipe::new(100, 72.0, 150.0));
        // Moves to 100: solid span 110..170 overlaps the crab, gap far below
        state.pipes.push(Pipe::new(101, 103.0, 300.0));

        tick(&mut state, &TickInput::default(), &mut store);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 1);
        assert_eq!(state.best_score, 1);
        assert_eq!(store.get(), 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
        assert!(events.contains(&GameEvent::Crashed(CrashKind::Pipe { id: 101 })));
        assert!(events.contains(&GameEvent::NewBest { score: 1 }));
    }

    #[test]
    fn test_floor_crash_is_checked_before_scoring() {
        let mut state = GameState::new(8);
        let mut store = store();
        jump(&mut state);
        state.pipes.clear();
        state.run_ticks = 5;
        state.crab.y = state.floor_y() - state.tuning.crab_size;
        state.crab.vel = 5.0;
        // Would score this tick, but the crab has already left the field
        state.pipes.push(Pipe::new(100, 72.0, 150.0));

        tick(&mut state, &TickInput::default(), &mut store);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 0);
        assert!(!state.pipes[0].passed);
        assert_eq!(state.best_score, 0);
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_passing_a_pipe_scores_once() {
        let mut state = tall_state(7);
        let mut store = store();
        jump(&mut state);
        state.pipes.clear();
        // Gap wide open around the crab's path
        state.tuning.pipe_gap = 600.0;
        state.pipes.push(Pipe::new(77, 95.0, 50.0));

        let mut scored = 0;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), &mut store);
            scored += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count();
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 1);
        assert_eq!(scored, 1);
    }

    #[test]
    fn test_ambient_bubbles_every_half_second() {
        let mut state = tall_state(8);
        let mut store = store();
        jump(&mut state);
        state.bubbles.clear();
        for _ in 0..29 {
            tick(&mut state, &TickInput::default(), &mut store);
        }
        assert!(state.bubbles.is_empty());
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.bubbles.len(), 1);
    }

    #[test]
    fn test_replayed_jump_input() {
        let mut state = GameState::new(9);
        let mut store = store();
        let press = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &press, &mut store);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_autopilot_is_deterministic() {
        let run = |seed: u64| {
            let mut state = GameState::new(seed);
            let mut store = store();
            let input = TickInput {
                autopilot: true,
                ..Default::default()
            };
            for _ in 0..3000 {
                tick(&mut state, &input, &mut store);
                if state.phase == GamePhase::Ended {
                    break;
                }
            }
            (state.score, state.time_ticks, state.crab)
        };
        assert_eq!(run(2024), run(2024));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let mut store1 = store();
        let mut store2 = store();

        let inputs = [
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..20 {
            for input in &inputs {
                tick(&mut state1, input, &mut store1);
                tick(&mut state2, input, &mut store2);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.pipes, state2.pipes);
        assert_eq!(state1.crab, state2.crab);
        assert_eq!(state1.bubbles, state2.bubbles);
    }

    proptest! {
        #[test]
        fn prop_best_is_max_of_session_scores(scores in proptest::collection::vec(0u32..50, 1..12)) {
            let mut state = GameState::new(1);
            let mut store = store();
            let mut seen_max = 0;
            let mut prev_best = 0;

            for score in scores {
                jump(&mut state); // Idle -> Running
                state.score = score;
                end_session(&mut state, CrashKind::Floor, &mut store);
                seen_max = seen_max.max(score);

                prop_assert!(state.best_score >= prev_best);
                prop_assert_eq!(state.best_score, seen_max);
                prop_assert_eq!(store.get(), seen_max);
                prev_best = state.best_score;

                jump(&mut state); // Ended -> Idle
            }
        }

        #[test]
        fn prop_pipes_pass_at_most_once(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            let mut store = store();
            jump(&mut state);
            // No pipe can hit the crab with a gap this tall
            state.tuning.pipe_gap = 10_000.0;
            state.tuning.gravity = 0.0;
            state.crab.vel = 0.0;

            let mut passed_ids: Vec<u32> = Vec::new();
            for _ in 0..1500 {
                let score_before = state.score;
                tick(&mut state, &TickInput::default(), &mut store);
                let newly: Vec<u32> = state
                    .pipes
                    .iter()
                    .filter(|p| p.passed && !passed_ids.contains(&p.id))
                    .map(|p| p.id)
                    .collect();
                prop_assert_eq!(state.score - score_before, newly.len() as u32);
                passed_ids.extend(newly);
                for p in &state.pipes {
                    if passed_ids.contains(&p.id) {
                        prop_assert!(p.passed);
                    }
                }
            }
            prop_assert_eq!(state.phase, GamePhase::Running);
            prop_assert_eq!(state.score as usize, passed_ids.len());
        }
    }
}
