//! Integration tests for the real-time clock
//!
//! Tokio time is paused, so sleeps advance a virtual clock instantly and
//! tick counts are exact.

use std::time::Duration;

use global_dominion::core::calendar::SimulationSpeed;
use global_dominion::core::config::SimulationConfig;
use global_dominion::simulation::{ClockState, SharedSimulation, Simulation, SimulationClock, TurnPhase};
use tokio::time::sleep;

fn shared() -> SharedSimulation {
    SharedSimulation::new(Simulation::seeded(SimulationConfig::default(), 99).unwrap())
}

async fn turn(shared: &SharedSimulation) -> u32 {
    shared.read(|sim| sim.current_turn()).await
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_normal_speed_ticks_every_five_seconds() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Normal);
    assert_eq!(clock.state(), ClockState::Stopped);

    clock.start();
    assert_eq!(clock.state(), ClockState::Running);
    sleep(Duration::from_secs(12)).await;
    assert_eq!(turn(&shared).await, 2);

    clock.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_start_while_running_is_noop() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Normal);

    clock.start();
    clock.start();
    sleep(Duration::from_secs(12)).await;
    assert_eq!(turn(&shared).await, 2);

    clock.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_paused_clock_does_not_advance() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Normal);

    clock.start();
    sleep(Duration::from_secs(6)).await;
    assert_eq!(turn(&shared).await, 1);

    clock.pause();
    assert_eq!(clock.state(), ClockState::Paused);
    sleep(Duration::from_secs(30)).await;
    assert_eq!(turn(&shared).await, 1);

    // Resuming starts a fresh wait
    clock.resume();
    sleep(Duration::from_millis(5500)).await;
    assert_eq!(turn(&shared).await, 2);

    clock.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_start_resumes_a_paused_clock() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Fast);

    clock.start();
    clock.pause();
    clock.start();
    assert_eq!(clock.state(), ClockState::Running);
    sleep(Duration::from_secs(3)).await;
    assert_eq!(turn(&shared).await, 1);

    clock.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_leaves_simulation_idle() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Normal);

    clock.start();
    sleep(Duration::from_secs(6)).await;
    clock.stop().await;

    assert_eq!(clock.state(), ClockState::Stopped);
    assert_eq!(shared.read(|sim| sim.phase()).await, TurnPhase::Idle);
    assert_eq!(turn(&shared).await, 1);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(turn(&shared).await, 1);
}

// ============================================================================
// Speed
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_speed_change_applies_to_next_wait() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Normal);

    clock.start();
    sleep(Duration::from_secs(6)).await;
    assert_eq!(turn(&shared).await, 1);

    // The wait begun at 5s still lasts until 10s; then one tick per second
    clock.set_speed(SimulationSpeed::VeryFast);
    assert_eq!(clock.speed(), SimulationSpeed::VeryFast);
    sleep(Duration::from_millis(6500)).await;
    assert_eq!(turn(&shared).await, 4);

    clock.stop().await;
}

// ============================================================================
// Shared Dispatch
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_subscribers_receive_clock_reports() {
    let shared = shared();
    let mut reports = shared.subscribe();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::VeryFast);

    clock.start();
    let first = reports.recv().await.unwrap();
    let second = reports.recv().await.unwrap();
    assert_eq!(first.turn, 1);
    assert_eq!(second.turn, 2);

    clock.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_manual_commands_interleave_with_clock() {
    let shared = shared();
    let mut clock = SimulationClock::new(shared.clone(), SimulationSpeed::Normal);

    clock.start();
    let manual = shared.advance_turn().await;
    assert_eq!(manual.turn, 1);
    shared.decide(&"usa".into(), "stimulus").await.unwrap();

    sleep(Duration::from_secs(6)).await;
    assert_eq!(turn(&shared).await, 2);

    clock.stop().await;
}
