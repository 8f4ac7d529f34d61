//! Platform abstraction layer
//!
//! Interfaces to the collaborators the simulation does not own:
//! - Stroke sensor readings
//! - Rigid-body integration of the boat
//!
//! Each comes with a small reference implementation used by the headless
//! driver and the tests.

pub mod body;
pub mod sensor;

pub use body::{KinematicBody, RigidBody};
pub use sensor::{ScriptedSensor, SensorSource};
