//! Simulated Robot
//!
//! An in-memory stand-in for a robot's service registry. It keeps just enough state to
//! answer the facade's questions (installed and running behaviors, resting, posture),
//! records every call it receives, and lets callers fire memory events by hand. Useful
//! for dry runs of a show and for tests that need a whole robot rather than one mock.

use crate::{
    catalog::Dance,
    error::RobotError,
    services::{
        AnimatedSpeech, AudioPlayer, BehaviorManager, Connector, EventHandler, Memory, Motion,
        Posture, RemoteValue, RobotServices, SubscriptionId, System, TextToSpeech, names,
    },
};
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::time::{Instant, sleep};
use tracing::debug;

const BEHAVIOR_POLL: Duration = Duration::from_millis(10);

/// One call received by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub service: &'static str,
    pub method: &'static str,
    pub argument: Option<String>,
}

impl RecordedCall {
    fn new(service: &'static str, method: &'static str, argument: Option<&str>) -> Self {
        Self {
            service,
            method,
            argument: argument.map(str::to_string),
        }
    }
}

#[derive(Default)]
struct SimState {
    installed: HashSet<String>,
    running: HashSet<String>,
    resting: bool,
    posture: Option<String>,
    calls: Vec<RecordedCall>,
    subscribers: HashMap<String, Vec<EventHandler>>,
}

/// A robot that lives entirely in memory.
pub struct SimulatedRobot {
    name: String,
    latency: Duration,
    behavior_duration: Duration,
    state: Mutex<SimState>,
    next_subscription: AtomicU64,
}

impl SimulatedRobot {
    /// Creates a resting robot with the stock dances installed.
    pub fn new(name: impl Into<String>) -> Self {
        let state = SimState {
            installed: Dance::all().iter().map(|d| d.as_str().to_string()).collect(),
            resting: true,
            ..Default::default()
        };
        Self {
            name: name.into(),
            latency: Duration::ZERO,
            behavior_duration: Duration::from_millis(100),
            state: Mutex::new(state),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Replaces the set of installed behaviors.
    pub fn with_behaviors<I, S>(self, behaviors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().installed = behaviors.into_iter().map(Into::into).collect();
        self
    }

    /// Time every call takes before it completes.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Time a behavior runs unless it is stopped earlier.
    pub fn with_behavior_duration(mut self, duration: Duration) -> Self {
        self.behavior_duration = duration;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        // A poisoned lock only means a handler panicked mid-call; the state is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, service: &'static str, method: &'static str, argument: Option<&str>) {
        debug!(robot = %self.name, service, method, ?argument, "Simulated call");
        self.lock()
            .calls
            .push(RecordedCall::new(service, method, argument));
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Calls received for one method of one service.
    pub fn calls_to(&self, service: &str, method: &str) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.service == service && c.method == method)
            .cloned()
            .collect()
    }

    pub fn is_resting(&self) -> bool {
        self.lock().resting
    }

    pub fn posture(&self) -> Option<String> {
        self.lock().posture.clone()
    }

    pub fn is_running(&self, behavior: &str) -> bool {
        self.lock().running.contains(behavior)
    }

    /// Fires `event` with `value`, invoking every connected handler.
    ///
    /// Returns how many handlers were invoked.
    pub fn raise_event(&self, event: &str, value: RemoteValue) -> usize {
        let handlers = self
            .lock()
            .subscribers
            .get(event)
            .cloned()
            .unwrap_or_default();
        debug!(robot = %self.name, %event, handlers = handlers.len(), "Raising event");
        for handler in &handlers {
            handler(value.clone());
        }
        handlers.len()
    }
}

#[async_trait]
impl AudioPlayer for SimulatedRobot {
    async fn play_file(&self, path: &str) -> Result<RemoteValue, RobotError> {
        self.record(names::AUDIO_PLAYER, "playFile", Some(path));
        self.delay().await;
        Ok(RemoteValue::Null)
    }
}

#[async_trait]
impl BehaviorManager for SimulatedRobot {
    async fn is_behavior_installed(&self, name: &str) -> Result<bool, RobotError> {
        self.record(names::BEHAVIOR_MANAGER, "isBehaviorInstalled", Some(name));
        Ok(self.lock().installed.contains(name))
    }

    async fn is_behavior_running(&self, name: &str) -> Result<bool, RobotError> {
        self.record(names::BEHAVIOR_MANAGER, "isBehaviorRunning", Some(name));
        Ok(self.lock().running.contains(name))
    }

    async fn run_behavior(&self, name: &str) -> Result<RemoteValue, RobotError> {
        self.record(names::BEHAVIOR_MANAGER, "runBehavior", Some(name));
        {
            let mut state = self.lock();
            if !state.installed.contains(name) {
                return Err(RobotError::remote(
                    names::BEHAVIOR_MANAGER,
                    format!("Behavior {} is not installed", name),
                ));
            }
            state.running.insert(name.to_string());
        }

        let started = Instant::now();
        while started.elapsed() < self.behavior_duration {
            sleep(BEHAVIOR_POLL).await;
            if !self.is_running(name) {
                return Ok(RemoteValue::Null);
            }
        }
        self.lock().running.remove(name);
        Ok(RemoteValue::Null)
    }

    async fn stop_behavior(&self, name: &str) -> Result<RemoteValue, RobotError> {
        self.record(names::BEHAVIOR_MANAGER, "stopBehavior", Some(name));
        self.lock().running.remove(name);
        Ok(RemoteValue::Null)
    }
}

#[async_trait]
impl Memory for SimulatedRobot {
    async fn subscribe(
        &self,
        event: &str,
        handler: EventHandler,
    ) -> Result<SubscriptionId, RobotError> {
        self.record(names::MEMORY, "subscriber", Some(event));
        self.lock()
            .subscribers
            .entry(event.to_string())
            .or_default()
            .push(handler);
        Ok(self.next_subscription.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl Motion for SimulatedRobot {
    async fn wake_up(&self) -> Result<RemoteValue, RobotError> {
        self.record(names::MOTION, "wakeUp", None);
        self.delay().await;
        let mut state = self.lock();
        state.resting = false;
        state.posture = Some("Stand".to_string());
        Ok(RemoteValue::Null)
    }

    async fn rest(&self) -> Result<RemoteValue, RobotError> {
        self.record(names::MOTION, "rest", None);
        self.delay().await;
        let mut state = self.lock();
        state.resting = true;
        state.posture = Some("Crouch".to_string());
        Ok(RemoteValue::Null)
    }
}

#[async_trait]
impl Posture for SimulatedRobot {
    async fn go_to_posture(&self, name: &str, _speed: f32) -> Result<RemoteValue, RobotError> {
        self.record(names::POSTURE, "goToPosture", Some(name));
        self.delay().await;
        let mut state = self.lock();
        if state.resting {
            return Ok(RemoteValue::Bool(false));
        }
        state.posture = Some(name.to_string());
        Ok(RemoteValue::Bool(true))
    }
}

#[async_trait]
impl AnimatedSpeech for SimulatedRobot {
    async fn say(&self, text: &str) -> Result<RemoteValue, RobotError> {
        self.record(names::ANIMATED_SPEECH, "say", Some(text));
        self.delay().await;
        Ok(RemoteValue::Null)
    }
}

#[async_trait]
impl System for SimulatedRobot {
    async fn robot_name(&self) -> Result<String, RobotError> {
        self.record(names::SYSTEM, "robotName", None);
        Ok(self.name.clone())
    }
}

#[async_trait]
impl TextToSpeech for SimulatedRobot {
    async fn say(&self, text: &str) -> Result<RemoteValue, RobotError> {
        self.record(names::TEXT_TO_SPEECH, "say", Some(text));
        self.delay().await;
        Ok(RemoteValue::Null)
    }
}

/// Hands out the services of one [`SimulatedRobot`] to any address.
#[derive(Clone)]
pub struct SimulatedConnector {
    robot: Arc<SimulatedRobot>,
}

impl SimulatedConnector {
    pub fn new(robot: Arc<SimulatedRobot>) -> Self {
        Self { robot }
    }

    pub fn robot(&self) -> &Arc<SimulatedRobot> {
        &self.robot
    }
}

#[async_trait]
impl Connector for SimulatedConnector {
    async fn connect(&self, address: &str) -> Result<RobotServices, RobotError> {
        debug!(%address, "Connecting to simulated robot");
        Ok(RobotServices::from_backend(self.robot.clone()))
    }
}
