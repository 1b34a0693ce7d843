//! Convenience layer over a humanoid robot's remote services.
//!
//! [`robot::Robot`] drives the robot through the services declared in [`services`];
//! [`download`] fetches sound files and synthesised speech for it to play.

pub mod catalog;
pub mod download;
pub mod error;
pub mod pending;
pub mod robot;
pub mod services;
pub mod sim;

pub use catalog::{Dance, StandardPosture};
pub use error::{DownloadError, RobotError};
pub use robot::Robot;
