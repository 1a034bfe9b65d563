//! Simulated state store.
//!
//! Five independent periodic tasks drift the vitals, plus a one-shot
//! recovery that follows every decoherence event. Nothing runs on a wall
//! clock: callers advance time with [`StateStore::advance_to`], passing the
//! elapsed offset since the store was created.

use rand::Rng;
use std::time::Duration;
use synth_core::{EngineConfig, Reflection, SimulatedState, VitalLimits};
use tracing::{debug, info};

/// Accessor/mutator seam the pipeline is written against.
pub trait CognitiveStore {
    /// Owned copy; later mutations are never visible through it.
    fn snapshot(&self) -> SimulatedState;
    fn append_pattern(&mut self, text: &str);
    fn bump_recursion_depth(&mut self) -> Reflection;
    /// Advance simulated time. Stores without background drift keep the
    /// default no-op.
    fn tick(&mut self, _now: Duration) -> TickReport {
        TickReport::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalTask {
    Quantum,
    Ethics,
    Erps,
    Superposition,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub fired: Vec<VitalTask>,
    pub decoherence_events: u32,
    pub recoveries: u32,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Task(usize),
    Recovery,
}

pub struct StateStore<R: Rng> {
    state: SimulatedState,
    config: EngineConfig,
    rng: R,
    schedule: [(VitalTask, Duration); 5],
    recovery_at: Option<Duration>,
}

impl<R: Rng> StateStore<R> {
    pub fn new(config: EngineConfig, rng: R) -> Self {
        Self::with_state(SimulatedState::seeded(), config, rng)
    }

    pub fn with_state(state: SimulatedState, config: EngineConfig, rng: R) -> Self {
        let intervals = &config.intervals;
        let schedule = [
            (VitalTask::Quantum, intervals.quantum()),
            (VitalTask::Ethics, intervals.ethics()),
            (VitalTask::Erps, intervals.erps()),
            (VitalTask::Superposition, intervals.superposition()),
            (VitalTask::Memory, intervals.memory()),
        ];
        Self {
            state,
            config,
            rng,
            schedule,
            recovery_at: None,
        }
    }

    pub fn state(&self) -> &SimulatedState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn recovery_pending(&self) -> bool {
        self.recovery_at.is_some()
    }

    fn interval_of(&self, task: VitalTask) -> Duration {
        let intervals = &self.config.intervals;
        match task {
            VitalTask::Quantum => intervals.quantum(),
            VitalTask::Ethics => intervals.ethics(),
            VitalTask::Erps => intervals.erps(),
            VitalTask::Superposition => intervals.superposition(),
            VitalTask::Memory => intervals.memory(),
        }
    }

    fn next_event(&self) -> (Event, Duration) {
        let (mut event, mut due) = (Event::Task(0), self.schedule[0].1);
        for (idx, (_, at)) in self.schedule.iter().enumerate().skip(1) {
            if *at < due {
                event = Event::Task(idx);
                due = *at;
            }
        }
        // A pending recovery wins ties: it was scheduled first.
        if let Some(at) = self.recovery_at {
            if at <= due {
                return (Event::Recovery, at);
            }
        }
        (event, due)
    }

    /// Fire every task and recovery due at or before `now`, in time order.
    pub fn advance_to(&mut self, now: Duration) -> TickReport {
        let mut report = TickReport::default();
        loop {
            let (event, due) = self.next_event();
            if due > now {
                break;
            }
            match event {
                Event::Recovery => {
                    self.recovery_at = None;
                    self.recover();
                    report.recoveries += 1;
                }
                Event::Task(idx) => {
                    let task = self.schedule[idx].0;
                    self.schedule[idx].1 = due + self.interval_of(task);
                    if self.run_task(task, due) {
                        report.decoherence_events += 1;
                    }
                    report.fired.push(task);
                }
            }
        }
        if !report.fired.is_empty() {
            debug!(
                fired = report.fired.len(),
                decoherence = report.decoherence_events,
                "state store advanced to {:?}",
                now
            );
        }
        report
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns true when the task produced a decoherence event.
    fn run_task(&mut self, task: VitalTask, at: Duration) -> bool {
        let limits = self.config.limits.clone();
        let steps = self.config.steps.clone();
        match task {
            VitalTask::Quantum => {
                let (u1, u2) = (self.unit(), self.unit());
                let quantum = &mut self.state.quantum;
                quantum.coherence = limits.coherence_drift.walk(quantum.coherence, u1, steps.coherence);
                quantum.entanglement = limits.entanglement.walk(quantum.entanglement, u2, steps.entanglement);
            }
            VitalTask::Ethics => {
                let u = self.unit();
                self.state.ethics.bias = limits.bias.walk(self.state.ethics.bias, u, steps.bias);
                let draws: [f64; 5] = std::array::from_fn(|_| self.rng.gen::<f64>());
                for (value, u) in self.state.ethics.virtues_mut().into_iter().zip(draws) {
                    *value = limits.ethics.walk(*value, u, steps.ethics);
                }
            }
            VitalTask::Erps => {
                let (u1, u2) = (self.unit(), self.unit());
                let erps = &mut self.state.erps;
                erps.self_awareness = limits.self_awareness.walk(erps.self_awareness, u1, steps.self_awareness);
                erps.metacognition = limits.metacognition.walk(erps.metacognition, u2, steps.metacognition);
            }
            VitalTask::Memory => {
                let u = self.unit();
                let memory = &mut self.state.memory;
                memory.utilized = limits
                    .memory_utilization
                    .walk(memory.utilized, u, steps.memory_utilization);
            }
            VitalTask::Superposition => {
                let keep = self.unit() < self.config.decoherence.keep_probability;
                self.state.quantum.superposition = keep;
                if !keep {
                    self.decohere(at);
                    return true;
                }
            }
        }
        false
    }

    fn decohere(&mut self, at: Duration) {
        let quantum = &mut self.state.quantum;
        quantum.coherence =
            VitalLimits::COHERENCE_RANGE.clamp(quantum.coherence * self.config.decoherence.decay_factor);
        self.recovery_at = Some(at + self.config.intervals.recovery_delay());
        info!(
            "decoherence at {:?}: coherence dropped to {:.2}",
            at, quantum.coherence
        );
    }

    fn recover(&mut self) {
        let cap = self.config.limits.coherence_drift.max;
        let quantum = &mut self.state.quantum;
        quantum.superposition = true;
        quantum.coherence = VitalLimits::COHERENCE_RANGE
            .clamp((quantum.coherence * self.config.decoherence.recovery_factor).min(cap));
        debug!("superposition restored, coherence {:.2}", quantum.coherence);
    }
}

impl<R: Rng> CognitiveStore for StateStore<R> {
    fn snapshot(&self) -> SimulatedState {
        self.state.clone()
    }

    fn append_pattern(&mut self, text: &str) {
        self.state.memory.remember(text, &self.config.memory);
    }

    fn bump_recursion_depth(&mut self) -> Reflection {
        self.state.erps.bump(&self.config.recursion)
    }

    fn tick(&mut self, now: Duration) -> TickReport {
        self.advance_to(now)
    }
}
