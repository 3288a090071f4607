//! Circle collision detection and response
//!
//! Every entity is a circle for collision purposes. Ship/asteroid contacts get
//! an elastic impulse along the contact normal, shared out with radius as the
//! mass proxy, followed by positional de-penetration so bodies never stay
//! stuck inside each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Physical state shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Advance position by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Outcome of resolving one contact
#[derive(Debug, Clone, PartialEq)]
pub struct ContactResolution {
    /// Unit normal pointing from `b` toward `a`
    pub normal: Vec2,
    /// Impulse scalar applied along the normal (0 if the bodies were separating)
    pub impulse: f32,
    /// Penetration depth before correction (negative = gap)
    pub overlap: f32,
}

/// True when the circles touch or overlap
#[inline]
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Unit vector from `b` to `a`.
///
/// Coincident centres have no direction; `Vec2::X` is used instead.
#[inline]
pub fn collision_normal(a: &Body, b: &Body) -> Vec2 {
    (a.pos - b.pos).try_normalize().unwrap_or(Vec2::X)
}

/// Apply an elastic collision response to two touching bodies.
///
/// The impulse `-(1 + restitution) * dot(va - vb, n)` is split so each body
/// receives the share proportional to the OTHER body's radius. Bodies already
/// moving apart keep their velocities. Any overlap is removed by pushing each
/// body half the depth along the normal; with no overlap positions are left
/// alone, so calling this again on a resolved pair changes nothing.
pub fn resolve_elastic(a: &mut Body, b: &mut Body, restitution: f32) -> ContactResolution {
    let restitution = restitution.clamp(0.0, 1.0);
    let normal = collision_normal(a, b);
    let relative = a.vel - b.vel;
    let approach = relative.dot(normal);
    let total_radius = a.radius + b.radius;

    let mut impulse = 0.0;
    if approach < 0.0 && total_radius > 0.0 {
        impulse = -(1.0 + restitution) * approach;
        a.vel += normal * impulse * (b.radius / total_radius);
        b.vel -= normal * impulse * (a.radius / total_radius);
    }

    let overlap = total_radius - a.pos.distance(b.pos);
    if overlap > 0.0 {
        let push = normal * (overlap / 2.0);
        a.pos += push;
        b.pos -= push;
    }

    ContactResolution {
        normal,
        impulse,
        overlap,
    }
}
