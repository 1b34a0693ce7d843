//! Remote Robot Services
//!
//! The robot runtime exposes its functionality as named remote services behind a
//! service registry. Each service the facade uses is modelled here as an async trait,
//! so any transport (or the in-memory simulator in [`crate::sim`]) can stand behind it.

use crate::error::RobotError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

/// A dynamically typed value returned by a remote call.
pub type RemoteValue = serde_json::Value;

/// A callback invoked with the payload of a memory event.
pub type EventHandler = Arc<dyn Fn(RemoteValue) + Send + Sync>;

/// Identifies one signal subscription made through the memory service.
pub type SubscriptionId = u64;

/// The port the service registry listens on.
pub const REGISTRY_PORT: u16 = 9559;

/// Registry names of the services held by [`RobotServices`].
pub mod names {
    pub const AUDIO_PLAYER: &str = "ALAudioPlayer";
    pub const BEHAVIOR_MANAGER: &str = "ALBehaviorManager";
    pub const MEMORY: &str = "ALMemory";
    pub const MOTION: &str = "ALMotion";
    pub const POSTURE: &str = "ALRobotPosture";
    pub const ANIMATED_SPEECH: &str = "ALAnimatedSpeech";
    pub const SYSTEM: &str = "ALSystem";
    pub const TEXT_TO_SPEECH: &str = "ALTextToSpeech";
}

/// Plays audio files stored on the robot.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play_file(&self, path: &str) -> Result<RemoteValue, RobotError>;
}

/// Installs, queries, runs and stops named behaviors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BehaviorManager: Send + Sync {
    async fn is_behavior_installed(&self, name: &str) -> Result<bool, RobotError>;
    async fn is_behavior_running(&self, name: &str) -> Result<bool, RobotError>;
    /// Runs the behavior, completing when the behavior finishes.
    async fn run_behavior(&self, name: &str) -> Result<RemoteValue, RobotError>;
    async fn stop_behavior(&self, name: &str) -> Result<RemoteValue, RobotError>;
}

/// The robot's event bus.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Memory: Send + Sync {
    /// Subscribes to `event` and connects `handler` to its signal.
    async fn subscribe(
        &self,
        event: &str,
        handler: EventHandler,
    ) -> Result<SubscriptionId, RobotError>;
}

/// Whole-body stiffness control.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Motion: Send + Sync {
    async fn wake_up(&self) -> Result<RemoteValue, RobotError>;
    async fn rest(&self) -> Result<RemoteValue, RobotError>;
}

/// Moves the robot into predefined postures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Posture: Send + Sync {
    /// Returns whether the posture was reached.
    async fn go_to_posture(&self, name: &str, speed: f32) -> Result<RemoteValue, RobotError>;
}

/// Speech accompanied by gestures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnimatedSpeech: Send + Sync {
    async fn say(&self, text: &str) -> Result<RemoteValue, RobotError>;
}

/// Information about the robot itself.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait System: Send + Sync {
    async fn robot_name(&self) -> Result<String, RobotError>;
}

/// Plain speech without gestures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn say(&self, text: &str) -> Result<RemoteValue, RobotError>;
}

/// The set of remote services one robot session works with.
#[derive(Clone)]
pub struct RobotServices {
    pub audio_player: Arc<dyn AudioPlayer>,
    pub behavior: Arc<dyn BehaviorManager>,
    pub memory: Arc<dyn Memory>,
    pub motion: Arc<dyn Motion>,
    pub posture: Arc<dyn Posture>,
    pub speech: Arc<dyn AnimatedSpeech>,
    pub system: Arc<dyn System>,
    pub tts: Arc<dyn TextToSpeech>,
}

impl RobotServices {
    /// Builds the service set from a single backend implementing every service.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: AudioPlayer
            + BehaviorManager
            + Memory
            + Motion
            + Posture
            + AnimatedSpeech
            + System
            + TextToSpeech
            + 'static,
    {
        Self {
            audio_player: backend.clone(),
            behavior: backend.clone(),
            memory: backend.clone(),
            motion: backend.clone(),
            posture: backend.clone(),
            speech: backend.clone(),
            system: backend.clone(),
            tts: backend,
        }
    }
}

/// Opens a session to a robot's service registry.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connects to `address` (e.g. `tcp://127.0.0.1:9559`) and resolves the services.
    async fn connect(&self, address: &str) -> Result<RobotServices, RobotError>;
}

/// Formats the registry address for a robot reachable at `ip`.
pub fn registry_address(ip: &str) -> String {
    format!("tcp://{}:{}", ip, REGISTRY_PORT)
}
