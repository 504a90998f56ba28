//! Counter session: the tick engine behind one counter view
//!
//! A session owns a [`CounterRegistry`], one active counter, the value shown
//! for it and at most one [`TickHandle`]. Each tick nudges the shown value by
//! the counter's rate times a random factor in `[0.8, 1.2)`.
//!
//! Every armed ticker carries the generation number it was armed under. The
//! generation is bumped whenever a ticker is released, and a tick whose
//! generation is stale is discarded. Selecting a counter invalidates the
//! generation under the same lock that changes the value, so a tick from the
//! old ticker can never land on the new counter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use serde::Serialize;
use thiserror::Error;
use tickboard_types::CounterDescriptor;
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::constants::{
    FALLBACK_POPULATION, LAST_UPDATED_FORMAT, TICK_JITTER_MIN, TICK_JITTER_SPAN,
};
use crate::digits::required_digits;
use crate::registry::CounterRegistry;
use crate::rng::BoxedRandom;
use crate::seed::{resolve_seed, SeedContext};
use crate::ticker::{tick_period, TickHandle};

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("counter session must be started from within a Tokio runtime")]
    NoRuntime,
    #[error("counter {id}: speed {speed} is not a usable tick period")]
    InvalidSpeed { id: String, speed: f64 },
}

/// Whether a ticker is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
}

/// Everything a view needs to draw the active counter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterSnapshot {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub value: f64,
    pub required_digits: usize,
    pub last_updated: Option<String>,
    pub tick_count: u64,
    pub phase: SessionPhase,
}

/// Value after one tick.
///
/// `jitter` is a uniform sample in `[0, 1)`. Decreasing counters stop at zero.
pub fn next_value(current: f64, rate: f64, is_positive: bool, jitter: f64) -> f64 {
    let magnitude = (rate * (TICK_JITTER_MIN + jitter * TICK_JITTER_SPAN)).round();
    if is_positive {
        (current + magnitude).round()
    } else {
        (current - magnitude).round().max(0.0)
    }
}

type ChangeCallback = Arc<dyn Fn(&CounterSnapshot) + Send + Sync>;
type Observers = Arc<Mutex<HashMap<String, ChangeCallback>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct SessionState {
    registry: CounterRegistry,
    active_index: usize,
    observed_value: f64,
    generation: u64,
    tick_count: u64,
    last_updated: Option<String>,
    phase: SessionPhase,
    population: f64,
    rng: BoxedRandom,
}

impl SessionState {
    fn active(&self) -> &CounterDescriptor {
        // active_index is only ever set from registry lookups
        self.registry
            .get_index(self.active_index)
            .unwrap_or_else(|| self.registry.first())
    }

    fn snapshot(&self) -> CounterSnapshot {
        let counter = self.active();
        CounterSnapshot {
            id: counter.id.clone(),
            title: counter.title.clone(),
            subtitle: counter.subtitle.clone(),
            value: self.observed_value,
            required_digits: required_digits(self.observed_value),
            last_updated: self.last_updated.clone(),
            tick_count: self.tick_count,
            phase: self.phase,
        }
    }

    fn tick(&mut self) {
        let jitter = self.rng.next_f64();
        let (rate, is_positive) = {
            let counter = self.active();
            (counter.rate, counter.is_positive)
        };
        self.observed_value = next_value(self.observed_value, rate, is_positive, jitter);
        self.tick_count += 1;
    }

    /// Retire the armed generation; ticks carrying it become no-ops
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = SessionPhase::Idle;
    }

    /// Make `index` active, regenerating its value if it has a reseed rule
    fn activate(&mut self, index: usize) {
        self.active_index = index;
        let ctx = SeedContext::new(self.population);

        let rng = &mut self.rng;
        if let Some(counter) = self.registry.get_index_mut(index) {
            if let Some(seed) = counter.reseed.clone() {
                counter.value = resolve_seed(&seed, &mut **rng, &ctx);
                log::debug!("Reseeded counter '{}' to {}", counter.id, counter.value);
            }
        }

        self.observed_value = self.active().value;
    }

    fn switch(&mut self, index: usize) {
        self.invalidate();
        self.activate(index);
        self.last_updated = Some(chrono::Local::now().format(LAST_UPDATED_FORMAT).to_string());
        log::debug!("Switched to counter '{}'", self.active().id);
    }
}

/// Tick engine bound to one active counter at a time
pub struct CounterSession {
    state: Arc<Mutex<SessionState>>,
    observers: Observers,
    ticker: Option<TickHandle>,
}

impl CounterSession {
    /// Create an idle session showing the first counter of `registry`
    pub fn new(registry: CounterRegistry, rng: BoxedRandom) -> Self {
        let observed_value = registry.first().value;
        let state = SessionState {
            registry,
            active_index: 0,
            observed_value,
            generation: 0,
            tick_count: 0,
            last_updated: None,
            phase: SessionPhase::Idle,
            population: FALLBACK_POPULATION,
            rng,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            observers: Arc::new(Mutex::new(HashMap::new())),
            ticker: None,
        }
    }

    /// Population used when a population-seeded counter is regenerated
    pub fn with_population(self, population: f64) -> Self {
        lock(&self.state).population = population;
        self
    }

    /// Show counter `id` (or the first counter if `id` is unknown) and
    /// start ticking it.
    pub fn start(&mut self, id: &str) -> Result<(), SessionError> {
        {
            let mut state = lock(&self.state);
            let (index, counter) = state.registry.resolve(id);
            let value = counter.value;
            state.invalidate();
            state.active_index = index;
            state.observed_value = value;
        }
        self.arm()
    }

    /// Advance to the next counter in registry order and restart ticking
    pub fn switch_next(&mut self) -> Result<(), SessionError> {
        {
            let mut state = lock(&self.state);
            let next = state.registry.next_index(state.active_index);
            state.switch(next);
        }
        self.arm()
    }

    /// Jump to counter `id` (first counter if unknown) and restart ticking
    pub fn switch_to(&mut self, id: &str) -> Result<(), SessionError> {
        {
            let mut state = lock(&self.state);
            let (index, _) = state.registry.resolve(id);
            state.switch(index);
        }
        self.arm()
    }

    /// Release the ticker. Calling this on an idle session does nothing.
    pub fn stop(&mut self) {
        let had_ticker = self.release();
        if had_ticker {
            log::debug!("Counter session stopped");
        }
    }

    /// Cancel the current ticker (if any) and invalidate its generation
    fn release(&mut self) -> bool {
        let Some(mut ticker) = self.ticker.take() else {
            return false;
        };
        ticker.cancel();

        lock(&self.state).invalidate();
        true
    }

    fn arm(&mut self) -> Result<(), SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        self.release();

        let (generation, period, snapshot) = {
            let mut state = lock(&self.state);
            let counter = state.active();
            let period = tick_period(counter.speed).ok_or_else(|| SessionError::InvalidSpeed {
                id: counter.id.clone(),
                speed: counter.speed,
            })?;
            state.generation = state.generation.wrapping_add(1);
            state.phase = SessionPhase::Running;
            (state.generation, period, state.snapshot())
        };

        let state = Arc::clone(&self.state);
        let observers = Arc::clone(&self.observers);
        self.ticker = Some(TickHandle::spawn(&runtime, period, move || {
            apply_tick(&state, &observers, generation);
        }));

        log::debug!(
            "Ticking counter '{}' every {:?} (generation {})",
            snapshot.id,
            period,
            generation
        );
        notify(&self.observers, &snapshot);
        Ok(())
    }

    /// Apply one tick to the active counter immediately, outside the timer
    pub fn tick(&self) -> f64 {
        let snapshot = {
            let mut state = lock(&self.state);
            state.tick();
            state.snapshot()
        };
        notify(&self.observers, &snapshot);
        snapshot.value
    }

    pub fn observed_value(&self) -> f64 {
        lock(&self.state).observed_value
    }

    pub fn required_digits(&self) -> usize {
        required_digits(self.observed_value())
    }

    pub fn phase(&self) -> SessionPhase {
        lock(&self.state).phase
    }

    pub fn is_running(&self) -> bool {
        self.phase() == SessionPhase::Running
    }

    pub fn tick_count(&self) -> u64 {
        lock(&self.state).tick_count
    }

    pub fn last_updated(&self) -> Option<String> {
        lock(&self.state).last_updated.clone()
    }

    /// Copy of the active counter's descriptor
    pub fn active(&self) -> CounterDescriptor {
        lock(&self.state).active().clone()
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        lock(&self.state).snapshot()
    }

    /// Copy of the registry as it currently stands (reseeded values included)
    pub fn registry(&self) -> CounterRegistry {
        lock(&self.state).registry.clone()
    }

    /// Register a callback run after every tick, start and switch.
    /// Returns an id for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, callback: F) -> String
    where
        F: Fn(&CounterSnapshot) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4().to_string();
        lock(&self.observers).insert(id.clone(), Arc::new(callback));
        id
    }

    /// Returns true if a callback was removed
    pub fn unsubscribe(&self, id: &str) -> bool {
        lock(&self.observers).remove(id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }
}

impl Drop for CounterSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Callbacks run without the observer lock held, so they may subscribe or
/// unsubscribe.
fn notify(observers: &Observers, snapshot: &CounterSnapshot) {
    let callbacks: Vec<ChangeCallback> = lock(observers).values().cloned().collect();
    for callback in callbacks {
        callback(snapshot);
    }
}

fn apply_tick(state: &Mutex<SessionState>, observers: &Observers, generation: u64) {
    let snapshot = {
        let mut state = lock(state);
        if state.generation != generation || state.phase != SessionPhase::Running {
            log::trace!("Dropping stale tick from generation {}", generation);
            return;
        }
        state.tick();
        state.snapshot()
    };
    log::trace!("Tick '{}' -> {}", snapshot.id, snapshot.value);
    notify(observers, &snapshot);
}
