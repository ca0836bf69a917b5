//! SimulationClock - real-time driver that advances turns periodically
//!
//! The worker task sleeps for the current speed's interval, then advances
//! one turn through the shared dispatch point. Pause and stop cancel the
//! sleep through a watch channel; a turn in progress always completes.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::calendar::SimulationSpeed;
use crate::simulation::shared::SharedSimulation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

pub struct SimulationClock {
    sim: SharedSimulation,
    state: watch::Sender<ClockState>,
    speed: watch::Sender<SimulationSpeed>,
    worker: Option<JoinHandle<()>>,
}

impl SimulationClock {
    pub fn new(sim: SharedSimulation, speed: SimulationSpeed) -> Self {
        let (state, _) = watch::channel(ClockState::Stopped);
        let (speed, _) = watch::channel(speed);
        Self {
            sim,
            state,
            speed,
            worker: None,
        }
    }

    pub fn state(&self) -> ClockState {
        *self.state.borrow()
    }

    pub fn speed(&self) -> SimulationSpeed {
        *self.speed.borrow()
    }

    /// Takes effect from the next scheduled wait
    pub fn set_speed(&self, speed: SimulationSpeed) {
        self.speed.send_replace(speed);
        debug!(?speed, "Clock speed changed");
    }

    /// Start ticking. No-op while running; resumes a paused clock.
    /// Must be called within a tokio runtime.
    pub fn start(&mut self) {
        match self.state() {
            ClockState::Running => {}
            ClockState::Paused => self.resume(),
            ClockState::Stopped => {
                self.state.send_replace(ClockState::Running);
                let worker = tick_loop(
                    self.sim.clone(),
                    self.state.subscribe(),
                    self.speed.subscribe(),
                );
                self.worker = Some(tokio::spawn(worker));
                info!(speed = ?self.speed(), "Clock started");
            }
        }
    }

    pub fn pause(&self) {
        if self.state() == ClockState::Running {
            self.state.send_replace(ClockState::Paused);
            info!("Clock paused");
        }
    }

    pub fn resume(&self) {
        if self.state() == ClockState::Paused {
            self.state.send_replace(ClockState::Running);
            info!("Clock resumed");
        }
    }

    /// Stop ticking and wait for the worker to finish its current turn
    pub async fn stop(&mut self) {
        self.state.send_replace(ClockState::Stopped);
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
            info!("Clock stopped");
        }
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.state.send_replace(ClockState::Stopped);
    }
}

async fn tick_loop(
    sim: SharedSimulation,
    mut state: watch::Receiver<ClockState>,
    speed: watch::Receiver<SimulationSpeed>,
) {
    loop {
        let current = *state.borrow_and_update();
        match current {
            ClockState::Stopped => break,
            ClockState::Paused => {
                if state.changed().await.is_err() {
                    break;
                }
            }
            ClockState::Running => {
                let interval = speed.borrow().interval();
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        let report = sim.advance_turn().await;
                        debug!(turn = report.turn, "Clock tick");
                    }
                    changed = state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}
