use glam::IVec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::body::{Body, BodyId};
use crate::core::Size;

/// Errors raised by the simulation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Simulation ticked before a viewport was set")]
    ViewportUnset,
}

/// Which collection a drawn body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Fully simulated body
    Active,
    /// Freshly spawned body still waiting for a free spot
    Pending,
}

/// Something the simulation can draw bodies onto
pub trait Canvas {
    /// Paint one body
    fn draw(&mut self, body: &Body, layer: Layer);
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub promoted: usize,
    pub body_collisions: usize,
    pub wall_bounces: usize,
}

impl std::ops::AddAssign for TickSummary {
    fn add_assign(&mut self, other: Self) {
        self.promoted += other.promoted;
        self.body_collisions += other.body_collisions;
        self.wall_bounces += other.wall_bounces;
    }
}

/// Bouncing-rectangle world
///
/// Owns every body. New bodies start out pending: they bounce off the
/// walls but are ignored by other bodies until they no longer overlap any
/// active body, at which point they become active.
pub struct Simulation {
    /// Current viewport, unset until the first resize
    viewport: Option<Size>,

    /// Bodies taking part in body-to-body collisions, in insertion order
    active: Vec<Body>,

    /// Spawned bodies not yet clear of the active ones, in insertion order
    pending: Vec<Body>,

    /// Size of every spawned body
    body_size: Size,

    /// Inclusive upper bound for each velocity component
    max_velocity: u32,

    /// Velocity source
    rng: StdRng,

    next_id: u64,
}

impl Simulation {
    /// Create an empty simulation seeded from the OS
    pub fn new(body_size: Size, max_velocity: u32) -> Self {
        Self::with_rng(body_size, max_velocity, StdRng::from_entropy())
    }

    /// Create an empty simulation with a fixed seed
    pub fn with_seed(body_size: Size, max_velocity: u32, seed: u64) -> Self {
        Self::with_rng(body_size, max_velocity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(body_size: Size, max_velocity: u32, rng: StdRng) -> Self {
        Self {
            viewport: None,
            active: Vec::new(),
            pending: Vec::new(),
            body_size,
            max_velocity: max_velocity.max(1),
            rng,
            next_id: 0,
        }
    }

    /// Advance the world by one step
    ///
    /// Pending bodies are promoted first so that they collide in the same
    /// tick. Each active body then either swaps velocity with the first
    /// body it would hit, or bounces off a wall, or moves; never more than
    /// one of these.
    pub fn tick(&mut self) -> Result<TickSummary, SimulationError> {
        let viewport = self.viewport.ok_or(SimulationError::ViewportUnset)?;
        let mut summary = TickSummary {
            promoted: self.promote_pending(),
            ..Default::default()
        };

        for i in 0..self.active.len() {
            if self.collide_with_first(i) {
                summary.body_collisions += 1;
                continue;
            }

            let body = &mut self.active[i];
            if body.handle_wall_collision(viewport) {
                summary.wall_bounces += 1;
                continue;
            }

            body.advance();
        }

        for ghost in &mut self.pending {
            if ghost.handle_wall_collision(viewport) {
                summary.wall_bounces += 1;
                continue;
            }

            ghost.advance();
        }

        Ok(summary)
    }

    /// Move every pending body that overlaps no active body into the active set
    ///
    /// Newest pending bodies are checked first. Each one is tested against
    /// the active set as it stands, including bodies promoted earlier in the
    /// same pass.
    fn promote_pending(&mut self) -> usize {
        let mut promoted = 0;

        for i in (0..self.pending.len()).rev() {
            let blocked = self
                .active
                .iter()
                .any(|other| self.pending[i].overlaps(other, None));

            if !blocked {
                let body = self.pending.remove(i);
                debug!("Body {} promoted at {}", body.id(), body.position);
                self.active.push(body);
                promoted += 1;
            }
        }

        promoted
    }

    /// Swap velocities between active body `index` and the first other
    /// active body its next step would overlap
    fn collide_with_first(&mut self, index: usize) -> bool {
        let body = &self.active[index];
        let future = body.future_position();

        let hit = self
            .active
            .iter()
            .enumerate()
            .find(|&(j, other)| j != index && body.overlaps(other, Some(future)))
            .map(|(j, _)| j);

        match hit {
            Some(j) => {
                let (a, b) = pair_mut(&mut self.active, index, j);
                a.swap_velocity(b);
                true
            }
            None => false,
        }
    }

    /// Spawn a new pending body with its top-left corner at `position`
    ///
    /// Each velocity component is drawn uniformly from `1..=max_velocity`.
    /// Positions outside the viewport are accepted.
    pub fn spawn(&mut self, position: IVec2) -> &Body {
        let max = i32::try_from(self.max_velocity).unwrap_or(i32::MAX);
        let velocity = IVec2::new(self.rng.gen_range(1..=max), self.rng.gen_range(1..=max));

        let id = BodyId(self.next_id);
        self.next_id += 1;

        debug!("Spawning body {id} at {position} with velocity {velocity}");
        self.pending
            .push(Body::new(id, self.body_size, position, velocity));
        &self.pending[self.pending.len() - 1]
    }

    /// Set a new viewport and drop every body no longer fully inside it
    ///
    /// Returns the number of bodies removed.
    pub fn resize(&mut self, viewport: Size) -> usize {
        self.viewport = Some(viewport);

        let before = self.body_count();
        self.active.retain(|body| !body.is_outside_borders(viewport));
        self.pending.retain(|body| !body.is_outside_borders(viewport));
        let removed = before - self.body_count();

        if removed > 0 {
            debug!("Resize to {viewport} removed {removed} bodies");
        }
        removed
    }

    /// Draw active bodies, then pending bodies on top
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        for body in &self.active {
            canvas.draw(body, Layer::Active);
        }
        for ghost in &self.pending {
            canvas.draw(ghost, Layer::Pending);
        }
    }

    /// Get the current viewport
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Get the active bodies
    pub fn active(&self) -> &[Body] {
        &self.active
    }

    /// Get the pending bodies
    pub fn pending(&self) -> &[Body] {
        &self.pending
    }

    /// Total number of bodies, active and pending
    pub fn body_count(&self) -> usize {
        self.active.len() + self.pending.len()
    }
}

/// Borrow two distinct elements of a slice mutably
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size::new(50, 50);

    fn sim(viewport: Size) -> Simulation {
        let mut sim = Simulation::with_seed(SIZE, 5, 7);
        sim.resize(viewport);
        sim
    }

    fn body(sim: &mut Simulation, x: i32, y: i32, vx: i32, vy: i32) -> Body {
        let id = BodyId(sim.next_id);
        sim.next_id += 1;
        Body::new(id, SIZE, IVec2::new(x, y), IVec2::new(vx, vy))
    }

    fn add_active(sim: &mut Simulation, x: i32, y: i32, vx: i32, vy: i32) -> BodyId {
        let b = body(sim, x, y, vx, vy);
        let id = b.id();
        sim.active.push(b);
        id
    }

    fn add_pending(sim: &mut Simulation, x: i32, y: i32, vx: i32, vy: i32) -> BodyId {
        let b = body(sim, x, y, vx, vy);
        let id = b.id();
        sim.pending.push(b);
        id
    }

    fn ids(bodies: &[Body]) -> Vec<BodyId> {
        bodies.iter().map(Body::id).collect()
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(BodyId, Layer)>,
    }

    impl Canvas for RecordingCanvas {
        fn draw(&mut self, body: &Body, layer: Layer) {
            self.calls.push((body.id(), layer));
        }
    }

    #[test]
    fn test_tick_without_viewport_fails() {
        let mut sim = Simulation::with_seed(SIZE, 5, 1);
        sim.spawn(IVec2::ZERO);

        assert_eq!(sim.tick(), Err(SimulationError::ViewportUnset));
        assert_eq!(sim.pending().len(), 1);
        assert_eq!(sim.pending()[0].position, IVec2::ZERO);
    }

    #[test]
    fn test_spawn_goes_to_pending() {
        let mut sim = sim(Size::new(400, 400));
        let id = sim.spawn(IVec2::new(10, 20)).id();

        assert!(sim.active().is_empty());
        assert_eq!(ids(sim.pending()), vec![id]);
        assert_eq!(sim.pending()[0].position, IVec2::new(10, 20));
        assert_eq!(sim.pending()[0].size(), SIZE);
    }

    #[test]
    fn test_spawn_velocity_range() {
        let mut sim = Simulation::with_seed(SIZE, 3, 42);
        for _ in 0..200 {
            let v = sim.spawn(IVec2::ZERO).velocity;
            assert!((1..=3).contains(&v.x), "vx = {}", v.x);
            assert!((1..=3).contains(&v.y), "vy = {}", v.y);
        }
    }

    #[test]
    fn test_spawn_ids_are_unique() {
        let mut sim = Simulation::with_seed(SIZE, 5, 42);
        let a = sim.spawn(IVec2::ZERO).id();
        let b = sim.spawn(IVec2::ZERO).id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_spawn_outside_viewport_is_accepted() {
        let mut sim = sim(Size::new(100, 100));
        sim.spawn(IVec2::new(500, 500));
        assert_eq!(sim.pending().len(), 1);
    }

    #[test]
    fn test_promotion_keeps_position_and_velocity() {
        let mut sim = sim(Size::new(400, 400));
        let ghost = add_pending(&mut sim, 100, 100, 3, 4);

        let summary = sim.tick().unwrap();

        assert_eq!(summary.promoted, 1);
        assert!(sim.pending().is_empty());
        assert_eq!(ids(sim.active()), vec![ghost]);
        // Promotion itself does not move the body; the active pass does
        assert_eq!(sim.active()[0].velocity, IVec2::new(3, 4));
        assert_eq!(sim.active()[0].position, IVec2::new(103, 104));
    }

    #[test]
    fn test_overlapping_ghost_stays_pending() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 100, 100, 0, 0);
        let ghost = add_pending(&mut sim, 120, 120, 1, 1);

        let summary = sim.tick().unwrap();

        assert_eq!(summary.promoted, 0);
        assert_eq!(ids(sim.pending()), vec![ghost]);
        // Ghosts keep moving
        assert_eq!(sim.pending()[0].position, IVec2::new(121, 121));
    }

    #[test]
    fn test_promotion_runs_newest_first() {
        let mut sim = sim(Size::new(400, 400));
        // Both ghosts are clear of the active set but overlap each other
        let older = add_pending(&mut sim, 100, 100, 0, 0);
        let newer = add_pending(&mut sim, 120, 100, 0, 0);

        let summary = sim.tick().unwrap();

        // The newer ghost goes first and then blocks the older one
        assert_eq!(summary.promoted, 1);
        assert_eq!(ids(sim.active()), vec![newer]);
        assert_eq!(ids(sim.pending()), vec![older]);
    }

    #[test]
    fn test_promotion_order_appends_newest_first() {
        let mut sim = sim(Size::new(400, 400));
        let a = add_pending(&mut sim, 0, 0, 0, 0);
        let b = add_pending(&mut sim, 100, 0, 0, 0);
        let c = add_pending(&mut sim, 200, 0, 0, 0);

        sim.tick().unwrap();

        assert_eq!(ids(sim.active()), vec![c, b, a]);
    }

    #[test]
    fn test_pending_bodies_ignore_each_other() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 0, 0, 0, 0);
        // Both ghosts overlap the active body and each other
        add_pending(&mut sim, 10, 10, 2, 0);
        add_pending(&mut sim, 20, 10, 1, 0);

        let summary = sim.tick().unwrap();

        assert_eq!(summary.body_collisions, 0);
        assert_eq!(sim.pending()[0].velocity, IVec2::new(2, 0));
        assert_eq!(sim.pending()[1].velocity, IVec2::new(1, 0));
        assert_eq!(sim.pending()[0].position, IVec2::new(12, 10));
        assert_eq!(sim.pending()[1].position, IVec2::new(21, 10));
    }

    #[test]
    fn test_pending_bodies_do_not_block_active() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 100, 100, 5, 0);
        add_pending(&mut sim, 110, 100, 0, 0);

        sim.tick().unwrap();

        assert_eq!(sim.active()[0].position, IVec2::new(105, 100));
        assert_eq!(sim.active()[0].velocity, IVec2::new(5, 0));
    }

    #[test]
    fn test_body_collision_swaps_and_holds() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 0, 100, 5, 0);
        add_active(&mut sim, 55, 100, -5, 0);

        let summary = sim.tick().unwrap();

        // First body would touch the second: swap, hold position.
        // Second body, now moving right, no longer hits the first and moves.
        assert_eq!(summary.body_collisions, 1);
        let active = sim.active();
        assert_eq!(active[0].position, IVec2::new(0, 100));
        assert_eq!(active[0].velocity, IVec2::new(-5, 0));
        assert_eq!(active[1].velocity, IVec2::new(5, 0));
        assert_eq!(active[1].position, IVec2::new(60, 100));
    }

    #[test]
    fn test_only_first_collider_swaps() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 100, 100, 1, 1);
        add_active(&mut sim, 151, 100, 0, 0);
        add_active(&mut sim, 100, 151, 0, 0);

        sim.tick().unwrap();

        let active = sim.active();
        assert_eq!(active[0].velocity, IVec2::new(0, 0));
        assert_eq!(active[1].velocity, IVec2::new(1, 1));
        assert_eq!(active[2].velocity, IVec2::new(0, 0));
    }

    #[test]
    fn test_collision_takes_precedence_over_wall() {
        let mut sim = sim(Size::new(200, 200));
        // Next step hits the right wall and the body below at once
        add_active(&mut sim, 148, 0, 5, 5);
        add_active(&mut sim, 150, 55, 0, 0);

        let summary = sim.tick().unwrap();

        // Only the swap is applied to the first body
        assert_eq!(summary.body_collisions, 1);
        assert_eq!(sim.active()[0].velocity, IVec2::new(0, 0));
        assert_eq!(sim.active()[0].position, IVec2::new(148, 0));
        // The second body inherits (5, 5) and bounces off the right wall
        assert_eq!(summary.wall_bounces, 1);
        assert_eq!(sim.active()[1].velocity, IVec2::new(-5, 5));
        assert_eq!(sim.active()[1].position, IVec2::new(150, 55));
    }

    #[test]
    fn test_ghost_bounces_off_walls() {
        let mut sim = sim(Size::new(200, 200));
        add_active(&mut sim, 0, 120, 0, 0);
        add_pending(&mut sim, 10, 148, 0, 5);

        let summary = sim.tick().unwrap();

        assert_eq!(summary.wall_bounces, 1);
        assert_eq!(sim.pending()[0].velocity, IVec2::new(0, -5));
        assert_eq!(sim.pending()[0].position, IVec2::new(10, 148));
    }

    #[test]
    fn test_resize_prunes_out_of_bounds_in_place() {
        let mut sim = sim(Size::new(400, 400));
        let a = add_active(&mut sim, 0, 0, 0, 0);
        add_active(&mut sim, 300, 0, 0, 0);
        let c = add_active(&mut sim, 100, 100, 0, 0);
        let g1 = add_pending(&mut sim, 10, 10, 0, 0);
        add_pending(&mut sim, 0, 300, 0, 0);

        let removed = sim.resize(Size::new(200, 200));

        assert_eq!(removed, 2);
        assert_eq!(sim.viewport(), Some(Size::new(200, 200)));
        assert_eq!(ids(sim.active()), vec![a, c]);
        assert_eq!(ids(sim.pending()), vec![g1]);
    }

    #[test]
    fn test_resize_to_zero_removes_everything() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 0, 0, 1, 1);
        add_active(&mut sim, 100, 100, 1, 1);
        add_pending(&mut sim, 50, 50, 1, 1);

        let removed = sim.resize(Size::new(0, 0));

        assert_eq!(removed, 3);
        assert_eq!(sim.body_count(), 0);
    }

    #[test]
    fn test_draw_order_active_then_pending() {
        let mut sim = sim(Size::new(400, 400));
        let a = add_active(&mut sim, 0, 0, 0, 0);
        let g = add_pending(&mut sim, 10, 10, 0, 0);
        let b = add_active(&mut sim, 200, 200, 0, 0);

        let mut canvas = RecordingCanvas::default();
        sim.draw(&mut canvas);

        assert_eq!(
            canvas.calls,
            vec![(a, Layer::Active), (b, Layer::Active), (g, Layer::Pending)]
        );
    }

    #[test]
    fn test_bounce_scenario() {
        let mut sim = sim(Size::new(200, 200));
        add_pending(&mut sim, 0, 0, 5, 5);

        // Promoted and moved on the first tick
        sim.tick().unwrap();
        assert_eq!(sim.active()[0].position, IVec2::new(5, 5));

        // Run until x reaches 145 (right edge at 195)
        while sim.active()[0].position.x < 145 {
            sim.tick().unwrap();
        }
        assert_eq!(sim.active()[0].position, IVec2::new(145, 145));

        // 145 + 5 lands exactly on the wall, which is still inside
        sim.tick().unwrap();
        assert_eq!(sim.active()[0].position, IVec2::new(150, 150));
        assert_eq!(sim.active()[0].velocity, IVec2::new(5, 5));

        // Next step would overshoot: reverse x and hold
        let summary = sim.tick().unwrap();
        assert_eq!(summary.wall_bounces, 1);
        assert_eq!(sim.active()[0].velocity, IVec2::new(-5, 5));
        assert_eq!(sim.active()[0].position, IVec2::new(150, 150));

        // y is still heading out: reverse y and hold
        sim.tick().unwrap();
        assert_eq!(sim.active()[0].velocity, IVec2::new(-5, -5));
        assert_eq!(sim.active()[0].position, IVec2::new(150, 150));

        // Then back to moving
        sim.tick().unwrap();
        assert_eq!(sim.active()[0].position, IVec2::new(145, 145));
    }

    #[test]
    fn test_x_only_bounce_from_145() {
        let mut sim = sim(Size::new(200, 200));
        add_active(&mut sim, 145, 0, 5, 0);

        // The bounce happens once the next step would pass the wall
        sim.tick().unwrap();
        assert_eq!(sim.active()[0].position, IVec2::new(150, 0));

        sim.tick().unwrap();
        assert_eq!(sim.active()[0].velocity, IVec2::new(-5, 0));
        assert_eq!(sim.active()[0].position, IVec2::new(150, 0));

        sim.tick().unwrap();
        assert_eq!(sim.active()[0].position, IVec2::new(145, 0));
    }

    #[test]
    fn test_promoted_body_collides_same_tick() {
        let mut sim = sim(Size::new(400, 400));
        let a = add_active(&mut sim, 0, 0, 0, 0);
        let g = add_pending(&mut sim, 52, 0, -5, 0);

        let summary = sim.tick().unwrap();

        assert_eq!(summary.promoted, 1);
        assert_eq!(summary.body_collisions, 1);
        assert_eq!(ids(sim.active()), vec![a, g]);
        assert_eq!(sim.active()[0].velocity, IVec2::new(-5, 0));
        assert_eq!(sim.active()[1].velocity, IVec2::ZERO);
        assert_eq!(sim.active()[1].position, IVec2::new(52, 0));
    }

    #[test]
    fn test_resize_ignores_future_position() {
        let mut sim = sim(Size::new(400, 400));
        add_active(&mut sim, 150, 0, 5, 0);
        add_pending(&mut sim, 0, 150, 0, 5);

        // Both touch the new edges now and would cross them next tick
        let removed = sim.resize(Size::new(200, 200));

        assert_eq!(removed, 0);
        assert_eq!(sim.body_count(), 2);
    }

    #[test]
    fn test_summaries_add_up() {
        let mut total = TickSummary::default();
        total += TickSummary {
            promoted: 1,
            body_collisions: 2,
            wall_bounces: 0,
        };
        total += TickSummary {
            promoted: 0,
            body_collisions: 1,
            wall_bounces: 3,
        };

        assert_eq!(
            total,
            TickSummary {
                promoted: 1,
                body_collisions: 3,
                wall_bounces: 3,
            }
        );
    }
}
