//! The scripted show: greet, stand, dance, sit.

use nao_core::{
    Dance, Robot, StandardPosture,
    download::SpeechGenerator,
    error::{DownloadError, RobotError},
    services::RemoteValue,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Memory event raised when the robot detects it has fallen over.
pub const FALL_EVENT: &str = "robotHasFallen";

/// Sound stems used by the show and the phrases they are generated from.
pub const PHRASES: [(&str, &str); 4] = [
    ("greetingGeneral", "Hello, it is a beautiful day."),
    ("ouch", "Oops, this is embarrassing"),
    ("timeToDance", "Now, it is time to dance"),
    ("timeToSit", "I am going to sit down now"),
];

/// How a show ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The show ran without the robot falling.
    Completed,
    /// The robot fell at least once; each fall stopped the running dance, if any.
    Fell,
    /// The show was interrupted before it finished.
    Interrupted,
}

/// Generates any speech files the show needs that are not on disk yet.
pub async fn prepare_speech(generator: &SpeechGenerator) -> Result<Vec<String>, DownloadError> {
    generator.generate_multiple(PHRASES).await
}

/// Falls reported by the robot, handled as the show goes on.
struct FallWatch {
    rx: mpsc::UnboundedReceiver<RemoteValue>,
    fell: bool,
}

impl FallWatch {
    /// Connects to the fall event of `robot`.
    async fn register(robot: &mut Robot) -> Result<Self, RobotError> {
        let (tx, rx) = mpsc::unbounded_channel();
        robot
            .register_event(FALL_EVENT, move |value| {
                let _ = tx.send(value);
            })
            .await?;
        Ok(Self { rx, fell: false })
    }

    /// Stops whatever the robot is dancing and apologises.
    async fn recover(&mut self, robot: &mut Robot) -> Result<(), RobotError> {
        self.fell = true;
        warn!(
            robot = %robot.name(),
            behaviour = ?robot.current_behaviour(),
            "Robot has fallen"
        );
        robot.stop_current_behaviour().await?;
        robot.play_sound("ouch", false).await?;
        Ok(())
    }

    /// Handles every fall reported since the last check.
    async fn check(&mut self, robot: &mut Robot) -> Result<(), RobotError> {
        while self.rx.try_recv().is_ok() {
            self.recover(robot).await?;
        }
        Ok(())
    }

    /// Joins the robot's pending calls, handling falls reported meanwhile.
    async fn wait(&mut self, robot: &mut Robot) -> Result<(), RobotError> {
        self.check(robot).await?;
        loop {
            let fallen = tokio::select! {
                joined = robot.wait() => {
                    joined?;
                    false
                }
                Some(_) = self.rx.recv() => true,
            };
            if !fallen {
                return Ok(());
            }
            self.recover(robot).await?;
        }
    }
}

/// Performs the show with `dance`.
///
/// Whenever the robot falls, the dance is stopped if it is still running and the robot
/// apologises; the show then carries on and ends with the robot sitting down.
pub async fn run_show(robot: &mut Robot, dance: Dance) -> Result<ShowOutcome, RobotError> {
    robot.play_sound("greetingGeneral", true).await?;
    let mut falls = FallWatch::register(robot).await?;

    robot.move_to_posture(StandardPosture::Stand, true).await?;
    falls.check(robot).await?;
    robot.play_sound("timeToDance", true).await?;
    falls.check(robot).await?;

    robot.start_behaviour(dance, false, false).await?;
    falls.wait(robot).await?;

    robot
        .play_sound("timeToSit", false)
        .await?
        .move_to_posture(StandardPosture::Sit, false)
        .await?;
    falls.wait(robot).await?;

    let outcome = if falls.fell {
        ShowOutcome::Fell
    } else {
        ShowOutcome::Completed
    };
    info!(robot = %robot.name(), %dance, ?outcome, "Show over");
    Ok(outcome)
}
