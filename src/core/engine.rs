//! Shared handle over [`DomainState`] and the periodic decay ticker.
//!
//! UI handlers and the ticker thread go through the same mutex, so every
//! operation sees a state no other writer is touching.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::services::PetService;
use crate::core::state::DomainState;
use crate::domain::PetEvent;

#[derive(Debug, Clone)]
pub struct Engine {
    state: Arc<Mutex<DomainState>>,
}

impl Engine {
    pub fn new(state: DomainState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Runs `op` with exclusive access to the state.
    pub fn with<R>(&self, op: impl FnOnce(&mut DomainState) -> R) -> R {
        let mut guard = lock(&self.state);
        op(&mut guard)
    }

    /// Interval configured for pet decay.
    pub fn tick_interval(&self) -> Duration {
        self.with(|state| Duration::from_secs(state.config().pet.tick_interval_secs))
    }

    /// Starts a background thread that fires every `period` of wall-clock
    /// time. Each firing advances the pet by one configured decay interval
    /// and hands emitted events to `listener`.
    pub fn start_ticker<F>(&self, period: Duration, mut listener: F) -> std::io::Result<TickerHandle>
    where
        F: FnMut(PetEvent) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let state = Arc::clone(&self.state);
        let join = thread::Builder::new()
            .name("cashpet-ticker".into())
            .spawn(move || {
                tracing::info!(period_ms = period.as_millis() as u64, "pet ticker started");
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {
                            let outcome = {
                                let mut guard = lock(&state);
                                let step =
                                    Duration::from_secs(guard.config().pet.tick_interval_secs);
                                PetService::tick(&mut guard, step)
                            };
                            for event in outcome.events {
                                listener(event);
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::info!("pet ticker stopped");
            })?;
        Ok(TickerHandle {
            stop: Some(stop_tx),
            join: Some(join),
        })
    }

    /// Ticker running in real time at the configured decay interval.
    pub fn start_realtime_ticker<F>(&self, listener: F) -> std::io::Result<TickerHandle>
    where
        F: FnMut(PetEvent) + Send + 'static,
    {
        let period = self.tick_interval();
        self.start_ticker(period, listener)
    }
}

/// Owns the ticker thread; stopping happens on `shutdown` or drop.
#[derive(Debug)]
pub struct TickerHandle {
    stop: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::warn!("pet ticker thread panicked");
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

// Operations check every input, including arithmetic overflow, before the
// first write, so a poisoned lock still guards a consistent value.
fn lock(state: &Mutex<DomainState>) -> MutexGuard<'_, DomainState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::core::clock::SystemClock;
    use crate::core::services::LedgerService;
    use rust_decimal_macros::dec;

    fn engine(energy: u8, interval_secs: u64) -> Engine {
        let mut config = EngineConfig::default().without_bonuses();
        config.pet.starting_energy = energy;
        config.pet.tick_interval_secs = interval_secs;
        Engine::new(DomainState::new(config, Arc::new(SystemClock)).expect("state"))
    }

    #[test]
    fn with_serializes_operations() {
        let engine = engine(80, 30);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                thread::spawn(move || {
                    engine.with(|state| {
                        LedgerService::record_income(state, dec!(1), "Tips").expect("income")
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker");
        }
        engine.with(|state| {
            assert_eq!(state.balance(), dec!(15008.50));
            assert_eq!(state.transactions().len(), 8);
        });
    }

    #[test]
    fn ticker_decays_and_reports_hunger() {
        let engine = engine(25, 30);
        let (tx, rx) = mpsc::channel();
        let ticker = engine
            .start_ticker(Duration::from_millis(5), move |event| {
                let _ = tx.send(event);
            })
            .expect("spawn ticker");
        let first = rx.recv_timeout(Duration::from_secs(5)).expect("hunger warning");
        assert_eq!(first, PetEvent::VeryHungry { energy: 20 });
        ticker.shutdown();

        let energy = engine.with(|state| state.pet().energy());
        assert!(energy <= 20);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(engine.with(|state| state.pet().energy()), energy);
    }
}
