//! Rigid-body integrator interface
//!
//! The simulation never moves the boat itself. It asks for impulses through
//! [`GameEvent`]s and reads back a [`BodyReport`] on the next tick.

use glam::Vec3;

use crate::sim::{BodyReport, GameEvent, ImpulseFrame};

/// Anything that can carry the boat
pub trait RigidBody {
    fn apply_impulse(&mut self, impulse: Vec3, frame: ImpulseFrame);

    /// Zero the linear velocity
    fn cancel_velocity(&mut self);

    /// Put the boat back at its starting pose
    fn respawn(&mut self);

    fn report(&self) -> BodyReport;

    /// Apply the body-related requests of one tick
    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Impulse { impulse, frame } => self.apply_impulse(impulse, frame),
                GameEvent::CancelVelocity => self.cancel_velocity(),
                GameEvent::WorldReloaded => self.respawn(),
                _ => {}
            }
        }
    }
}

/// Point-mass boat with linear drag
///
/// The boat never turns, so its local frame is the world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
    /// Half the hull length, used for contact with the danger zone
    pub half_length: f32,
    spawn: Vec3,
}

impl KinematicBody {
    pub fn new(spawn: Vec3, mass: f32, drag: f32) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            mass,
            drag,
            half_length: 4.0,
            spawn,
        }
    }

    /// Advance position by one timestep
    pub fn integrate(&mut self, dt: f32) {
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        self.position += self.velocity * dt;
    }

    /// Whether the stern has reached the boundary (which chases from +x)
    pub fn touches_boundary(&self, boundary_x: f32) -> bool {
        self.position.x + self.half_length >= boundary_x
    }
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 30.0, 0.3)
    }
}

impl RigidBody for KinematicBody {
    fn apply_impulse(&mut self, impulse: Vec3, _frame: ImpulseFrame) {
        self.velocity += impulse / self.mass;
    }

    fn cancel_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    fn respawn(&mut self) {
        self.position = self.spawn;
        self.velocity = Vec3::ZERO;
    }

    fn report(&self) -> BodyReport {
        BodyReport {
            position: self.position,
            velocity: self.velocity,
        }
    }
}
