//! Robot Facade
//!
//! [`Robot`] wraps one session to the robot's remote services and exposes the handful of
//! commands a scripted show needs: postures, sounds, speech and behaviors. It also keeps
//! the little local state those commands depend on:
//!
//! * the behavior currently started through this facade (at most one at a time),
//! * whether the robot is resting and must be woken before it can move,
//! * the handles of calls issued without waiting, joined later by [`Robot::wait`].

use crate::{
    error::RobotError,
    pending::PendingCalls,
    services::{
        Connector, EventHandler, RemoteValue, RobotServices, SubscriptionId, registry_address,
    },
};
use futures::{FutureExt, future::BoxFuture};
use std::{
    collections::HashMap,
    fmt,
    future::Future,
    panic::AssertUnwindSafe,
    path::PathBuf,
    sync::Arc,
};
use tracing::{info, warn};

/// Fraction of maximum speed used for posture transitions.
pub const POSTURE_SPEED: f32 = 0.8;

const START_BEHAVIOUR: &str = "startBehaviour";

/// A handler connected to a memory event.
#[derive(Clone)]
pub struct EventRegistration {
    pub subscription: SubscriptionId,
    pub handler: EventHandler,
}

/// A connected robot.
pub struct Robot {
    name: String,
    sound_location: Option<PathBuf>,
    services: RobotServices,
    current_behaviour: Option<String>,
    events: HashMap<String, EventRegistration>,
    pending: PendingCalls,
    resting: bool,
    last_result: Option<RemoteValue>,
}

impl fmt::Debug for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Robot")
            .field("name", &self.name)
            .field("sound_location", &self.sound_location)
            .field("current_behaviour", &self.current_behaviour)
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("pending_calls", &self.pending.len())
            .field("resting", &self.resting)
            .finish_non_exhaustive()
    }
}

impl Robot {
    /// Connects to the robot at `ip` and reads its name.
    pub async fn connect(
        connector: &dyn Connector,
        ip: &str,
        sound_location: Option<PathBuf>,
    ) -> Result<Self, RobotError> {
        let address = registry_address(ip);
        info!(%address, "Connecting to robot");
        let services = connector.connect(&address).await?;
        let name = services.system.robot_name().await?;
        info!(robot = %name, "Connected");
        Ok(Self::new(services, name, sound_location))
    }

    /// Creates a facade over already resolved services. The robot starts out resting.
    pub fn new(
        services: RobotServices,
        name: impl Into<String>,
        sound_location: Option<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            sound_location,
            services,
            current_behaviour: None,
            events: HashMap::new(),
            pending: PendingCalls::new(),
            resting: true,
            last_result: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn current_behaviour(&self) -> Option<&str> {
        self.current_behaviour.as_deref()
    }

    /// Number of calls issued without waiting that have not been joined yet.
    pub fn pending_calls(&self) -> usize {
        self.pending.len()
    }

    /// Result of the last call joined by [`Robot::wait`].
    pub fn last_result(&self) -> Option<&RemoteValue> {
        self.last_result.as_ref()
    }

    pub fn registration(&self, event: &str) -> Option<&EventRegistration> {
        self.events.get(event)
    }

    /// Either awaits `call` or queues it for the next [`Robot::wait`].
    async fn issue<F>(&mut self, wait: bool, call: F) -> Result<(), RobotError>
    where
        F: Future<Output = Result<RemoteValue, RobotError>> + Send + 'static,
    {
        if wait {
            call.await?;
        } else {
            self.pending.spawn(call);
        }
        Ok(())
    }

    /// Wakes the robot if it is resting so it can move.
    async fn prepare(&mut self) -> Result<(), RobotError> {
        if self.resting {
            self.wake_up().await?;
        }
        Ok(())
    }

    /// Moves the robot to the named posture.
    pub async fn move_to_posture(
        &mut self,
        posture: impl AsRef<str>,
        wait: bool,
    ) -> Result<&mut Self, RobotError> {
        self.prepare().await?;
        let posture = posture.as_ref().to_string();
        info!(robot = %self.name, %posture, "Moving to posture");

        let service = self.services.posture.clone();
        self.issue(wait, async move { service.go_to_posture(&posture, POSTURE_SPEED).await })
            .await?;
        Ok(self)
    }

    /// Plays `<name>.wav`, looked up in the sound directory when one is configured.
    pub async fn play_sound(&mut self, name: &str, wait: bool) -> Result<&mut Self, RobotError> {
        let file = format!("{}.wav", name);
        let path = match &self.sound_location {
            Some(dir) => dir.join(file).to_string_lossy().into_owned(),
            None => file,
        };
        info!(robot = %self.name, %path, "Playing audio");

        let service = self.services.audio_player.clone();
        self.issue(wait, async move { service.play_file(&path).await })
            .await?;
        Ok(self)
    }

    /// Speaks `text`, with gestures when `animated` is set.
    pub async fn say(
        &mut self,
        text: impl Into<String>,
        wait: bool,
        animated: bool,
    ) -> Result<&mut Self, RobotError> {
        let text = text.into();
        info!(robot = %self.name, %text, animated, "Saying");

        if animated {
            let service = self.services.speech.clone();
            self.issue(wait, async move { service.say(&text).await }).await?;
        } else {
            let service = self.services.tts.clone();
            self.issue(wait, async move { service.say(&text).await }).await?;
        }
        Ok(self)
    }

    /// Starts a behavior.
    ///
    /// Unless `skip_check` is set, this fails when the previously started behavior is
    /// still running, when `behaviour` is not installed, or when it is already running.
    pub async fn start_behaviour(
        &mut self,
        behaviour: impl AsRef<str>,
        wait: bool,
        skip_check: bool,
    ) -> Result<&mut Self, RobotError> {
        let behaviour = behaviour.as_ref().to_string();

        if !skip_check {
            if let Some(current) = &self.current_behaviour {
                if self.services.behavior.is_behavior_running(current).await? {
                    return Err(RobotError::invalid_operation(
                        START_BEHAVIOUR,
                        "Another behaviour is running",
                    ));
                }
                self.current_behaviour = None;
            }

            info!(robot = %self.name, %behaviour, "Checking behaviour is installed");
            if !self.services.behavior.is_behavior_installed(&behaviour).await? {
                return Err(RobotError::invalid_operation(
                    START_BEHAVIOUR,
                    "Behaviour not found",
                ));
            }
            if self.services.behavior.is_behavior_running(&behaviour).await? {
                return Err(RobotError::invalid_operation(
                    START_BEHAVIOUR,
                    "Behaviour already running",
                ));
            }
        }

        info!(robot = %self.name, %behaviour, "Starting behaviour");
        self.current_behaviour = Some(behaviour.clone());
        let service = self.services.behavior.clone();
        self.issue(wait, async move { service.run_behavior(&behaviour).await })
            .await?;
        Ok(self)
    }

    /// Stops the behavior started through this facade if it is still running.
    pub async fn stop_current_behaviour(&mut self) -> Result<(), RobotError> {
        if let Some(current) = self.current_behaviour.take() {
            if self.services.behavior.is_behavior_running(&current).await? {
                info!(robot = %self.name, behaviour = %current, "Stopping behaviour");
                self.services.behavior.stop_behavior(&current).await?;
            }
        }
        Ok(())
    }

    /// Connects `handler` to a memory event, replacing any earlier handler for it.
    pub async fn register_event<F>(&mut self, event: &str, handler: F) -> Result<(), RobotError>
    where
        F: Fn(RemoteValue) + Send + Sync + 'static,
    {
        info!(robot = %self.name, %event, "Registering event handler");
        let handler: EventHandler = Arc::new(handler);
        let subscription = self.services.memory.subscribe(event, handler.clone()).await?;
        self.events.insert(
            event.to_string(),
            EventRegistration {
                subscription,
                handler,
            },
        );
        Ok(())
    }

    /// Joins every call issued without waiting, in the order they were issued.
    pub async fn wait(&mut self) -> Result<&mut Self, RobotError> {
        info!(robot = %self.name, pending = self.pending.len(), "Waiting");
        if let Some(result) = self.pending.join_all().await? {
            self.last_result = Some(result);
        }
        Ok(self)
    }

    pub async fn wake_up(&mut self) -> Result<&mut Self, RobotError> {
        info!(robot = %self.name, "Waking up");
        self.services.motion.wake_up().await?;
        self.resting = false;
        Ok(self)
    }

    /// Puts the robot into its resting posture.
    ///
    /// The robot is marked resting as soon as the call is issued, even when it is queued
    /// and the robot is still moving.
    pub async fn rest(&mut self, wait: bool) -> Result<&mut Self, RobotError> {
        info!(robot = %self.name, "Resting");
        let service = self.services.motion.clone();
        self.issue(wait, async move { service.rest().await }).await?;
        self.resting = true;
        Ok(self)
    }

    /// Runs `body` against the robot and rests it afterwards, however `body` exits.
    ///
    /// A failure to rest is returned only when `body` itself succeeded. Panics in `body`
    /// are resumed once the robot has been put to rest.
    pub async fn scoped<T, E, F>(mut self, body: F) -> Result<T, E>
    where
        F: for<'r> FnOnce(&'r mut Robot) -> BoxFuture<'r, Result<T, E>>,
        E: From<RobotError>,
    {
        let outcome = AssertUnwindSafe(body(&mut self)).catch_unwind().await;
        let rested = self.rest(true).await.map(|_| ());

        match outcome {
            Ok(Ok(value)) => {
                rested?;
                Ok(value)
            }
            Ok(Err(err)) => {
                if let Err(rest_err) = rested {
                    warn!(robot = %self.name, error = %rest_err, "Failed to rest after error");
                }
                Err(err)
            }
            Err(panic) => {
                if let Err(rest_err) = rested {
                    warn!(robot = %self.name, error = %rest_err, "Failed to rest after panic");
                }
                std::panic::resume_unwind(panic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Dance, StandardPosture};
    use crate::services::{
        MockAnimatedSpeech, MockAudioPlayer, MockBehaviorManager, MockMemory, MockMotion,
        MockPosture, MockSystem, MockTextToSpeech,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    #[derive(Default)]
    struct Mocks {
        audio: MockAudioPlayer,
        behavior: MockBehaviorManager,
        memory: MockMemory,
        motion: MockMotion,
        posture: MockPosture,
        speech: MockAnimatedSpeech,
        system: MockSystem,
        tts: MockTextToSpeech,
    }

    impl Mocks {
        fn services(self) -> RobotServices {
            RobotServices {
                audio_player: Arc::new(self.audio),
                behavior: Arc::new(self.behavior),
                memory: Arc::new(self.memory),
                motion: Arc::new(self.motion),
                posture: Arc::new(self.posture),
                speech: Arc::new(self.speech),
                system: Arc::new(self.system),
                tts: Arc::new(self.tts),
            }
        }

        fn robot(self) -> Robot {
            Robot::new(self.services(), "Nao", None)
        }
    }

    fn reason(err: RobotError) -> String {
        match err {
            RobotError::InvalidOperation { operation, reason } => {
                assert_eq!(operation, "startBehaviour");
                reason
            }
            other => panic!("Expected InvalidOperation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_behaviour_from_idle() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_is_behavior_installed()
            .withf(|name| name == "dance")
            .times(1)
            .returning(|_| Ok(true));
        mocks
            .behavior
            .expect_is_behavior_running()
            .withf(|name| name == "dance")
            .times(1)
            .returning(|_| Ok(false));
        mocks
            .behavior
            .expect_run_behavior()
            .withf(|name| name == "dance")
            .times(1)
            .returning(|_| Ok(RemoteValue::Null));

        let mut robot = mocks.robot();
        robot.start_behaviour("dance", true, false).await.unwrap();

        assert_eq!(robot.current_behaviour(), Some("dance"));
        assert_eq!(robot.pending_calls(), 0);
    }

    #[tokio::test]
    async fn test_start_behaviour_rejects_while_another_runs() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_run_behavior()
            .withf(|name| name == "first")
            .times(1)
            .returning(|_| Ok(RemoteValue::Null));
        mocks
            .behavior
            .expect_is_behavior_running()
            .withf(|name| name == "first")
            .times(1)
            .returning(|_| Ok(true));

        let mut robot = mocks.robot();
        robot.start_behaviour("first", true, true).await.unwrap();

        let err = robot.start_behaviour("second", true, false).await.unwrap_err();
        assert_eq!(reason(err), "Another behaviour is running");
        assert_eq!(robot.current_behaviour(), Some("first"));
    }

    #[tokio::test]
    async fn test_start_behaviour_not_installed() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_is_behavior_installed()
            .times(1)
            .returning(|_| Ok(false));

        let mut robot = mocks.robot();
        let err = robot
            .start_behaviour("missing", false, false)
            .await
            .unwrap_err();

        assert_eq!(reason(err), "Behaviour not found");
        assert_eq!(robot.current_behaviour(), None);
        assert_eq!(robot.pending_calls(), 0);
    }

    #[tokio::test]
    async fn test_start_behaviour_already_running() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_is_behavior_installed()
            .returning(|_| Ok(true));
        mocks
            .behavior
            .expect_is_behavior_running()
            .returning(|_| Ok(true));

        let mut robot = mocks.robot();
        let err = robot
            .start_behaviour(Dance::TaiChi, false, false)
            .await
            .unwrap_err();

        assert_eq!(reason(err), "Behaviour already running");
        assert_eq!(robot.current_behaviour(), None);
    }

    #[tokio::test]
    async fn test_start_behaviour_clears_finished_behaviour() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_run_behavior()
            .times(2)
            .returning(|_| Ok(RemoteValue::Null));
        // Neither the finished behaviour nor the new one is running.
        mocks
            .behavior
            .expect_is_behavior_running()
            .times(2)
            .returning(|_| Ok(false));
        mocks
            .behavior
            .expect_is_behavior_installed()
            .withf(|name| name == "second")
            .times(1)
            .returning(|_| Ok(true));

        let mut robot = mocks.robot();
        robot.start_behaviour("first", true, true).await.unwrap();
        robot.start_behaviour("second", true, false).await.unwrap();

        assert_eq!(robot.current_behaviour(), Some("second"));
    }

    #[tokio::test]
    async fn test_start_behaviour_skip_check_overrides_running() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_run_behavior()
            .times(2)
            .returning(|_| Ok(RemoteValue::Null));

        let mut robot = mocks.robot();
        robot.start_behaviour("first", true, true).await.unwrap();
        robot.start_behaviour("second", false, true).await.unwrap();
        robot.wait().await.unwrap();

        assert_eq!(robot.current_behaviour(), Some("second"));
    }

    #[tokio::test]
    async fn test_stop_without_current_behaviour_is_noop() {
        let mut robot = Mocks::default().robot();
        robot.stop_current_behaviour().await.unwrap();
        assert_eq!(robot.current_behaviour(), None);
    }

    #[tokio::test]
    async fn test_stop_running_behaviour() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_run_behavior()
            .returning(|_| Ok(RemoteValue::Null));
        mocks
            .behavior
            .expect_is_behavior_running()
            .withf(|name| name == "dance")
            .times(1)
            .returning(|_| Ok(true));
        mocks
            .behavior
            .expect_stop_behavior()
            .withf(|name| name == "dance")
            .times(1)
            .returning(|_| Ok(RemoteValue::Null));

        let mut robot = mocks.robot();
        robot.start_behaviour("dance", true, true).await.unwrap();
        robot.stop_current_behaviour().await.unwrap();

        assert_eq!(robot.current_behaviour(), None);
    }

    #[tokio::test]
    async fn test_stop_finished_behaviour_only_clears_marker() {
        let mut mocks = Mocks::default();
        mocks
            .behavior
            .expect_run_behavior()
            .returning(|_| Ok(RemoteValue::Null));
        mocks
            .behavior
            .expect_is_behavior_running()
            .returning(|_| Ok(false));
        mocks.behavior.expect_stop_behavior().times(0);

        let mut robot = mocks.robot();
        robot.start_behaviour("dance", true, true).await.unwrap();
        robot.stop_current_behaviour().await.unwrap();

        assert_eq!(robot.current_behaviour(), None);
    }

    #[tokio::test]
    async fn test_movement_wakes_resting_robot_once() {
        let mut mocks = Mocks::default();
        mocks
            .motion
            .expect_wake_up()
            .times(1)
            .returning(|| Ok(RemoteValue::Null));
        mocks
            .posture
            .expect_go_to_posture()
            .withf(|_, speed| *speed == POSTURE_SPEED)
            .times(2)
            .returning(|_, _| Ok(json!(true)));

        let mut robot = mocks.robot();
        assert!(robot.is_resting());

        robot
            .move_to_posture(StandardPosture::Stand, true)
            .await
            .unwrap()
            .move_to_posture(StandardPosture::Sit, true)
            .await
            .unwrap();

        assert!(!robot.is_resting());
    }

    #[tokio::test]
    async fn test_wait_joins_queued_calls() {
        let mut mocks = Mocks::default();
        mocks
            .audio
            .expect_play_file()
            .withf(|path| path == "greeting.wav")
            .times(1)
            .returning(|_| Ok(json!("played")));
        mocks
            .speech
            .expect_say()
            .withf(|text| text == "Hello")
            .times(1)
            .returning(|_| Ok(json!("animated")));
        mocks
            .tts
            .expect_say()
            .withf(|text| text == "Goodbye")
            .times(1)
            .returning(|_| Ok(json!("plain")));

        let mut robot = mocks.robot();
        robot
            .play_sound("greeting", false)
            .await
            .unwrap()
            .say("Hello", false, true)
            .await
            .unwrap()
            .say("Goodbye", false, false)
            .await
            .unwrap();
        assert_eq!(robot.pending_calls(), 3);

        robot.wait().await.unwrap();

        assert_eq!(robot.pending_calls(), 0);
        assert_eq!(robot.last_result(), Some(&json!("plain")));
    }

    #[tokio::test]
    async fn test_wait_with_nothing_pending_keeps_last_result() {
        let mut mocks = Mocks::default();
        mocks
            .tts
            .expect_say()
            .returning(|_| Ok(json!(1)));

        let mut robot = mocks.robot();
        robot.say("one", false, false).await.unwrap();
        robot.wait().await.unwrap().wait().await.unwrap();

        assert_eq!(robot.last_result(), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_play_sound_uses_sound_location() {
        let mut mocks = Mocks::default();
        mocks
            .audio
            .expect_play_file()
            .withf(|path| path == "/home/nao/sound/ouch.wav")
            .times(1)
            .returning(|_| Ok(RemoteValue::Null));

        let mut robot = Robot::new(
            mocks.services(),
            "Nao",
            Some(PathBuf::from("/home/nao/sound")),
        );
        robot.play_sound("ouch", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_rest_marks_resting_before_completion() {
        let mut mocks = Mocks::default();
        mocks
            .motion
            .expect_wake_up()
            .returning(|| Ok(RemoteValue::Null));
        mocks
            .motion
            .expect_rest()
            .times(1)
            .returning(|| Ok(RemoteValue::Null));

        let mut robot = mocks.robot();
        robot.wake_up().await.unwrap();
        assert!(!robot.is_resting());

        robot.rest(false).await.unwrap();
        assert!(robot.is_resting());
        assert_eq!(robot.pending_calls(), 1);

        robot.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_register_event_overwrites_previous_handler() {
        let counter = Arc::new(AtomicU64::new(0));
        let mut mocks = Mocks::default();
        let ids = counter.clone();
        mocks
            .memory
            .expect_subscribe()
            .withf(|event, _| event == "robotHasFallen")
            .times(2)
            .returning(move |_, _| Ok(ids.fetch_add(1, Ordering::SeqCst) + 1));

        let mut robot = mocks.robot();
        let first_called = Arc::new(AtomicBool::new(false));
        let second_called = Arc::new(AtomicBool::new(false));

        let flag = first_called.clone();
        robot
            .register_event("robotHasFallen", move |_| flag.store(true, Ordering::SeqCst))
            .await
            .unwrap();
        let flag = second_called.clone();
        robot
            .register_event("robotHasFallen", move |_| flag.store(true, Ordering::SeqCst))
            .await
            .unwrap();

        let registration = robot.registration("robotHasFallen").unwrap();
        assert_eq!(registration.subscription, 2);
        (registration.handler)(RemoteValue::Null);
        assert!(second_called.load(Ordering::SeqCst));
        assert!(!first_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_scoped_rests_after_error() {
        let mut mocks = Mocks::default();
        mocks
            .motion
            .expect_rest()
            .times(1)
            .returning(|| Ok(RemoteValue::Null));

        let robot = mocks.robot();
        let result: Result<(), RobotError> = robot
            .scoped(|_robot| {
                Box::pin(async move {
                    Err(RobotError::invalid_operation("startBehaviour", "Behaviour not found"))
                })
            })
            .await;

        assert!(matches!(result, Err(RobotError::InvalidOperation { .. })));
    }

    #[tokio::test]
    async fn test_scoped_returns_body_value() {
        let mut mocks = Mocks::default();
        mocks
            .motion
            .expect_wake_up()
            .returning(|| Ok(RemoteValue::Null));
        mocks
            .posture
            .expect_go_to_posture()
            .returning(|_, _| Ok(json!(true)));
        mocks
            .motion
            .expect_rest()
            .times(1)
            .returning(|| Ok(RemoteValue::Null));

        let robot = mocks.robot();
        let resting_inside = robot
            .scoped(|robot| {
                Box::pin(async move {
                    robot.move_to_posture("Stand", true).await?;
                    Ok::<_, RobotError>(robot.is_resting())
                })
            })
            .await
            .unwrap();

        assert!(!resting_inside);
    }

    #[tokio::test]
    async fn test_scoped_rests_after_panic() {
        let rested = Arc::new(AtomicBool::new(false));
        let mut mocks = Mocks::default();
        let flag = rested.clone();
        mocks.motion.expect_rest().returning(move || {
            flag.store(true, Ordering::SeqCst);
            Ok(RemoteValue::Null)
        });

        let robot = mocks.robot();
        let outcome = tokio::spawn(async move {
            robot
                .scoped(|_robot| {
                    Box::pin(async move {
                        if true {
                            panic!("body failed");
                        }
                        Ok::<(), RobotError>(())
                    })
                })
                .await
        })
        .await;

        assert!(outcome.unwrap_err().is_panic());
        assert!(rested.load(Ordering::SeqCst));
    }

    struct RecordingConnector {
        address: Mutex<Option<String>>,
    }

    #[async_trait]
    impl Connector for RecordingConnector {
        async fn connect(&self, address: &str) -> Result<RobotServices, RobotError> {
            *self.address.lock().unwrap() = Some(address.to_string());
            let mut mocks = Mocks::default();
            mocks
                .system
                .expect_robot_name()
                .times(1)
                .returning(|| Ok("Gadget".to_string()));
            Ok(mocks.services())
        }
    }

    #[tokio::test]
    async fn test_connect_reads_robot_name() {
        let connector = RecordingConnector {
            address: Mutex::new(None),
        };

        let robot = Robot::connect(&connector, "10.0.0.2", None).await.unwrap();

        assert_eq!(robot.name(), "Gadget");
        assert!(robot.is_resting());
        assert_eq!(
            connector.address.lock().unwrap().as_deref(),
            Some("tcp://10.0.0.2:9559")
        );
    }

    struct UnreachableConnector;

    #[async_trait]
    impl Connector for UnreachableConnector {
        async fn connect(&self, _address: &str) -> Result<RobotServices, RobotError> {
            Err(RobotError::remote("ServiceDirectory", "connection refused"))
        }
    }

    #[tokio::test]
    async fn test_connect_propagates_connector_failure() {
        let err = Robot::connect(&UnreachableConnector, "10.0.0.2", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RobotError::Remote { ref service, .. } if service == "ServiceDirectory"
        ));
        assert_eq!(
            err.to_string(),
            "Remote call to ServiceDirectory failed: connection refused"
        );
    }
}
