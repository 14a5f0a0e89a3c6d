//! Cosmic dust for the home view.
//!
//! A fixed-size field of particles drifts upward one step per frame. A
//! particle that leaves the top edge re-enters at the bottom at a fresh
//! horizontal position, so the count never changes.
//!
//! Drawing goes through the [`Surface`] trait. The production surface,
//! [`SvgSurface`], records the circles of the latest frame and renders them
//! as an SVG layer; tests use a recording mock instead.
//!
//! ## Loop ownership
//!
//! [`ParticleAnimator`] holds at most one frame request and one resize
//! listener at a time:
//!
//! | Call | Registers | Releases |
//! |---|---|---|
//! | `start` | resize listener, frame | - |
//! | `on_frame` (own frame) | next frame | - |
//! | `stop` | - | pending frame, resize listener |
//!
//! `start` on a running animator does nothing, and an animator built without
//! a surface never registers anything.

use crate::config::ParticleConfig;
use crate::scheduler::{EventKind, FrameId, ListenerId, Scheduler};
use maud::{Markup, html};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Drawing target for the particle layer.
pub trait Surface {
    /// Wipe the surface and set its dimensions for the next frame.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, opacity: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_y: f64,
    pub opacity: f64,
}

/// Uniform draw from `[low, high)`, collapsing to `low` for an empty range.
fn sample(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    rng: StdRng,
}

impl ParticleField {
    pub fn spawn(config: &ParticleConfig, width: f64, height: f64) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = (0..config.count)
            .map(|_| Particle {
                x: sample(&mut rng, 0.0, width),
                y: sample(&mut rng, 0.0, height),
                size: sample(&mut rng, 0.0, config.size_max),
                speed_y: sample(&mut rng, config.speed_min, config.speed_max),
                opacity: sample(&mut rng, config.opacity_min, config.opacity_max),
            })
            .collect();
        Self {
            particles,
            width,
            height,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.y -= p.speed_y;
            if p.y < 0.0 {
                p.y = self.height;
                p.x = sample(&mut self.rng, 0.0, self.width);
            }
        }
    }

    /// Change the dimensions future steps use. Existing particles keep
    /// their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.size, p.opacity);
        }
    }
}

// =============================================================================
// SVG surface
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
}

/// Records the latest frame and renders it as an SVG layer.
#[derive(Debug, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    circles: Vec<Circle>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn to_markup(&self) -> Markup {
        html! {
            svg.particles xmlns="http://www.w3.org/2000/svg"
                width=(self.width) height=(self.height)
                viewBox=(format!("0 0 {} {}", self.width, self.height)) {
                @for c in &self.circles {
                    circle cx=(format!("{:.2}", c.x)) cy=(format!("{:.2}", c.y))
                        r=(format!("{:.2}", c.radius))
                        fill="#ffffff" fill-opacity=(format!("{:.2}", c.opacity)) {}
                }
            }
        }
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.circles.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, opacity: f64) {
        self.circles.push(Circle {
            x,
            y,
            radius,
            opacity,
        });
    }
}

// =============================================================================
// Animator
// =============================================================================

#[derive(Debug)]
pub struct ParticleAnimator<S: Surface> {
    field: ParticleField,
    surface: Option<S>,
    frame: Option<FrameId>,
    resize_listener: Option<ListenerId>,
    frames_drawn: u64,
}

impl<S: Surface> ParticleAnimator<S> {
    pub fn new(config: &ParticleConfig, surface: Option<S>, width: f64, height: f64) -> Self {
        Self {
            field: ParticleField::spawn(config, width, height),
            surface,
            frame: None,
            resize_listener: None,
            frames_drawn: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// Draw the first frame and start the loop.
    pub fn start(&mut self, scheduler: &mut Scheduler) {
        if self.surface.is_none() {
            debug!("particle animator has no surface, not starting");
            return;
        }
        if self.is_running() {
            return;
        }
        self.resize_listener = Some(scheduler.add_listener(EventKind::Resize));
        self.tick();
        self.frame = Some(scheduler.request_frame());
        debug!(particles = self.field.len(), "particle animator started");
    }

    fn tick(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.field.step();
            self.field.draw(surface);
            self.frames_drawn += 1;
        }
    }

    /// React to a fired frame. Frames owned by someone else are ignored.
    pub fn on_frame(&mut self, frame: FrameId, scheduler: &mut Scheduler) -> bool {
        if self.frame != Some(frame) {
            return false;
        }
        self.tick();
        self.frame = Some(scheduler.request_frame());
        true
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        if self.resize_listener.is_some() {
            self.field.resize(width, height);
        }
    }

    /// Cancel the pending frame and release the resize listener.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(frame) = self.frame.take() {
            scheduler.cancel_frame(frame);
            debug!(frames = self.frames_drawn, "particle animator stopped");
        }
        if let Some(listener) = self.resize_listener.take() {
            scheduler.remove_listener(listener);
        }
    }
}
