//! SharedSimulation - the single dispatch point for every mutation
//!
//! Clock ticks and manual commands both lock the same mutex, so at most one
//! turn or decision runs at a time. Completed turns are broadcast to
//! subscribers.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::core::error::Result;
use crate::core::types::CountryId;
use crate::decisions::Decision;
use crate::simulation::engine::Simulation;
use crate::simulation::report::{DecisionOutcome, TurnReport};

/// Turn reports buffered per subscriber before it starts lagging
const REPORT_BUFFER: usize = 64;

#[derive(Clone)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
    reports: broadcast::Sender<TurnReport>,
}

impl SharedSimulation {
    pub fn new(simulation: Simulation) -> Self {
        let (reports, _) = broadcast::channel(REPORT_BUFFER);
        Self {
            inner: Arc::new(Mutex::new(simulation)),
            reports,
        }
    }

    /// Receiver of every subsequent turn report
    pub fn subscribe(&self) -> broadcast::Receiver<TurnReport> {
        self.reports.subscribe()
    }

    pub async fn advance_turn(&self) -> TurnReport {
        let report = {
            let mut sim = self.inner.lock().await;
            sim.advance_turn()
        };
        // No subscribers is not an error
        let _ = self.reports.send(report.clone());
        report
    }

    pub async fn execute_decision(&self, decision: &Decision, actor: &CountryId) -> Result<DecisionOutcome> {
        self.inner.lock().await.execute_decision(decision, actor)
    }

    pub async fn decide(&self, actor: &CountryId, decision_id: &str) -> Result<DecisionOutcome> {
        self.inner.lock().await.decide(actor, decision_id)
    }

    pub async fn available_decisions(&self, id: &CountryId) -> Vec<Decision> {
        self.inner.lock().await.available_decisions(id)
    }

    /// Run a read-only query under the lock
    pub async fn read<T>(&self, f: impl FnOnce(&Simulation) -> T) -> T {
        let sim = self.inner.lock().await;
        f(&sim)
    }

    /// Run an arbitrary mutation under the lock
    pub async fn write<T>(&self, f: impl FnOnce(&mut Simulation) -> T) -> T {
        let mut sim = self.inner.lock().await;
        f(&mut sim)
    }
}
