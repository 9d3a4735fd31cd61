/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-frame steering rule.
 * Each boid looks at its few nearest neighbors and picks one bearing:
 * 1. Cohesion: head for the neighbors' average position
 * 2. Separation: turn away from a neighbor that is too close
 * 3. Alignment: once near the flock, match the neighbors' average heading
 * Near the window edges (when not wrapping) an edge-avoidance bearing wins.
 *
 * Steering is split in two so the world can borrow the flock immutably while
 * planning and then mutate only the boid being updated:
 * - `steer` reads the flock and grid and returns a Steering plan
 * - `apply` integrates heading and position from that plan
 */

use nannou::prelude::*;
use rand::Rng;

use crate::heading::{average_heading, heading_vector, normalize_angle, polar_angle, signed_angle_diff};
use crate::params::{SteeringConstants, TuningParams};
use crate::spatial_grid::{CellKey, SpatialGrid};
use crate::world::WorldBounds;

/// Visual variant. Both kinds steer identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoidKind {
    #[default]
    Bird,
    Fish,
}

impl BoidKind {
    // Outline in local space, nose along +x
    pub fn outline(self) -> &'static [(f32, f32)] {
        const ARROW: [(f32, f32); 4] = [(7.0, 0.0), (-7.0, 6.0), (-4.0, 0.0), (-7.0, -6.0)];
        const FISH: [(f32, f32); 7] = [
            (7.0, 0.0),
            (2.0, 4.0),
            (-3.0, 3.0),
            (-7.0, 5.0),
            (-5.0, 0.0),
            (-7.0, -5.0),
            (-3.0, -3.0),
        ];
        match self {
            BoidKind::Bird => &ARROW,
            BoidKind::Fish => &FISH,
        }
    }
}

/// Read-only pose handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
}

/// Outcome of one steering decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    pub neighbor_count: usize,
    /// Point the boid steered relative to, if it had enough neighbors.
    pub target: Option<Vec2>,
    /// The nearest neighbor was inside the comfort radius.
    pub separating: bool,
    /// Signed heading error in degrees; only its sign is used. Zero holds course.
    pub turn_direction: f32,
    /// Turn rate in degrees per second.
    pub turn_rate: f32,
    pub avoiding_edge: bool,
}

#[derive(Clone, Debug)]
pub struct Boid {
    pub position: Vec2,
    pub heading: f32,
    pub hue: f32,
    pub kind: BoidKind,
    pub(crate) cell: CellKey,
}

impl Boid {
    pub fn new(position: Vec2, heading: f32, hue: f32, kind: BoidKind) -> Self {
        Self {
            position,
            heading: normalize_angle(heading),
            hue: normalize_angle(hue),
            kind,
            cell: CellKey::default(),
        }
    }

    /// A boid somewhere inside `bounds`, kept `margin` away from the edges
    /// when the area is large enough.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: WorldBounds, margin: f32, kind: BoidKind) -> Self {
        let x = spawn_coordinate(rng, bounds.width, margin);
        let y = spawn_coordinate(rng, bounds.height, margin);
        let heading = rng.gen_range(0.0..360.0);
        let hue = rng.gen_range(0.0..360.0);
        Self::new(vec2(x, y), heading, hue, kind)
    }

    pub fn cell(&self) -> CellKey {
        self.cell
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
        }
    }

    /// Up to `limit` neighbors from the 3x3 block, nearest first.
    ///
    /// The sort is stable, so equal distances keep the grid's order.
    pub fn nearest_neighbors(&self, index: usize, flock: &[Boid], grid: &SpatialGrid, limit: usize) -> Vec<usize> {
        let mut candidates: Vec<(usize, f32)> = grid
            .neighbors_of(index, self.cell)
            .into_iter()
            .filter_map(|i| flock.get(i).map(|other| (i, self.position.distance_squared(other.position))))
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        candidates.truncate(limit);
        candidates.into_iter().map(|(i, _)| i).collect()
    }

    /// Decide which way to turn this frame.
    ///
    /// `index` must be this boid's slot in `flock`, and the boid must already
    /// be registered under its current cell.
    pub fn steer(
        &self,
        index: usize,
        flock: &[Boid],
        grid: &SpatialGrid,
        tuning: &TuningParams,
        constants: &SteeringConstants,
        bounds: WorldBounds,
    ) -> Steering {
        let neighbors = self.nearest_neighbors(index, flock, grid, constants.max_neighbors);
        let mut steering = Steering {
            neighbor_count: neighbors.len(),
            target: None,
            separating: false,
            turn_direction: 0.0,
            turn_rate: constants.turn_rate,
            avoiding_edge: false,
        };

        if neighbors.len() > 1 {
            let count = neighbors.len() as f32;
            let nearest = flock[neighbors[0]].position;
            let center = neighbors
                .iter()
                .fold(Vec2::ZERO, |sum, &i| sum + flock[i].position)
                / count;
            let avg_heading = average_heading(neighbors.iter().map(|&i| flock[i].heading));

            let comfort_radius = constants.body_radius + tuning.avoidance;
            let separating = self.position.distance(nearest) < comfort_radius;
            let target = if separating { nearest } else { center };

            let offset = target - self.position;
            let distance = offset.length();
            let mut bearing = polar_angle(offset);
            // Close enough to the flock: fly with it rather than into it
            if distance < constants.body_radius * 5.0 + tuning.cohesion * 2.0 {
                bearing = avg_heading;
            }

            let diff = signed_angle_diff(bearing, self.heading);
            if diff.abs() > constants.deadband(tuning.adherence) {
                steering.turn_direction = if separating { -diff } else { diff };
            }
            steering.target = Some(target);
            steering.separating = separating;
        }

        if !tuning.wrap {
            if let Some((bearing, edge_distance)) = edge_bearing(self.position, bounds, constants.edge_margin) {
                let proximity = (1.0 - edge_distance / constants.edge_margin).clamp(0.0, 1.0);
                steering.turn_direction = signed_angle_diff(bearing, self.heading);
                steering.turn_rate =
                    constants.turn_rate + proximity * (constants.max_edge_turn_rate - constants.turn_rate);
                steering.avoiding_edge = true;
            }
        }

        steering
    }

    /// Integrate heading and position for one frame.
    pub fn apply(
        &mut self,
        steering: &Steering,
        dt: f32,
        tuning: &TuningParams,
        constants: &SteeringConstants,
        bounds: WorldBounds,
    ) {
        if steering.turn_direction != 0.0 {
            self.heading += steering.turn_rate * dt * steering.turn_direction.signum();
        }
        self.heading = normalize_angle(self.heading);

        // Lonely boids fly faster while they look for a flock
        let missing = constants.max_neighbors.saturating_sub(steering.neighbor_count) as f32;
        let speed = tuning.speed + missing * constants.speed_boost_per_missing_neighbor;
        self.position += heading_vector(self.heading) * dt * speed;

        if tuning.wrap {
            self.wrap_edges(bounds, constants.sprite_half_extent);
        } else {
            self.stay_inside(bounds);
        }
    }

    // Bouncing boids never leave the area, corners included
    fn stay_inside(&mut self, bounds: WorldBounds) {
        self.position.x = self.position.x.min(bounds.width).max(0.0);
        self.position.y = self.position.y.min(bounds.height).max(0.0);
    }

    // Teleport to the opposite side once the sprite has fully left the area
    fn wrap_edges(&mut self, bounds: WorldBounds, half_extent: f32) {
        if self.position.y + half_extent < 0.0 {
            self.position.y = bounds.height;
        } else if self.position.y - half_extent > bounds.height {
            self.position.y = 0.0;
        }

        if self.position.x + half_extent < 0.0 {
            self.position.x = bounds.width;
        } else if self.position.x - half_extent > bounds.width {
            self.position.x = 0.0;
        }
    }

    // Draw the boid
    pub fn draw(&self, draw: &Draw, bounds: WorldBounds) {
        let screen_pos = bounds.to_screen(self.position);
        // Screen y points up, plane y points down, so the rotation flips too
        let angle = -self.heading.to_radians();

        draw.polygon()
            .color(hsv(self.hue / 360.0, 0.9, 0.9))
            .points(self.kind.outline().iter().map(|&(x, y)| pt2(x, y)))
            .xy(screen_pos)
            .rotate(angle);
    }
}

fn spawn_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f32, margin: f32) -> f32 {
    if extent > margin * 2.0 {
        rng.gen_range(margin..extent - margin)
    } else if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

/// Bearing toward the interior and the distance to the nearest edge, if the
/// position lies inside the edge margin. Top and bottom win at corners.
fn edge_bearing(position: Vec2, bounds: WorldBounds, margin: f32) -> Option<(f32, f32)> {
    let (x, y) = (position.x, position.y);
    let edge_distance = x.min(y).min(bounds.width - x).min(bounds.height - y);
    if edge_distance >= margin {
        return None;
    }

    let mut bearing = None;
    if x < margin {
        bearing = Some(0.0);
    } else if x > bounds.width - margin {
        bearing = Some(180.0);
    }
    if y < margin {
        bearing = Some(90.0);
    } else if y > bounds.height - margin {
        bearing = Some(270.0);
    }
    bearing.map(|b| (b, edge_distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: WorldBounds = WorldBounds::new(1000.0, 1000.0);

    fn registered(boids: Vec<Boid>, cell_size: f32) -> (Vec<Boid>, SpatialGrid) {
        let mut grid = SpatialGrid::new(cell_size);
        let mut boids = boids;
        for (i, boid) in boids.iter_mut().enumerate() {
            boid.cell = grid.cell_of(boid.position);
            grid.add(i, boid.cell);
        }
        (boids, grid)
    }

    fn at(x: f32, y: f32, heading: f32) -> Boid {
        Boid::new(vec2(x, y), heading, 0.0, BoidKind::Bird)
    }

    #[test]
    fn lonely_boid_holds_course_and_gets_full_boost() {
        let (mut boids, grid) = registered(vec![at(500.0, 500.0, 0.0)], 100.0);
        let constants = SteeringConstants::default();
        let tuning = TuningParams::default();

        let steering = boids[0].steer(0, &boids, &grid, &tuning, &constants, BOUNDS);
        assert_eq!(steering.neighbor_count, 0);
        assert_eq!(steering.turn_direction, 0.0);
        assert!(steering.target.is_none());

        boids[0].apply(&steering, 0.5, &tuning, &constants, BOUNDS);
        let expected = 500.0 + 0.5 * (150.0 + 7.0 * 5.0);
        assert!((boids[0].position.x - expected).abs() < 1e-3);
        assert!((boids[0].position.y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn one_neighbor_is_not_enough_to_steer() {
        let (boids, grid) = registered(vec![at(500.0, 500.0, 0.0), at(510.0, 520.0, 90.0)], 100.0);
        let steering = boids[0].steer(
            0,
            &boids,
            &grid,
            &TuningParams::default(),
            &SteeringConstants::default(),
            BOUNDS,
        );
        assert_eq!(steering.neighbor_count, 1);
        assert_eq!(steering.turn_direction, 0.0);
    }

    #[test]
    fn distant_flock_pulls_toward_its_center() {
        let (boids, grid) = registered(
            vec![at(500.0, 500.0, 0.0), at(500.0, 600.0, 0.0), at(500.0, 690.0, 0.0)],
            100.0,
        );
        let steering = boids[0].steer(
            0,
            &boids,
            &grid,
            &TuningParams::default(),
            &SteeringConstants::default(),
            BOUNDS,
        );
        assert_eq!(steering.target, Some(vec2(500.0, 645.0)));
        assert!(!steering.separating);
        assert!((steering.turn_direction - 90.0).abs() < 1e-3);
    }

    #[test]
    fn nearby_flock_aligns_with_average_heading() {
        let (boids, grid) = registered(
            vec![at(500.0, 500.0, 0.0), at(540.0, 500.0, 300.0), at(540.0, 520.0, 320.0)],
            100.0,
        );
        let steering = boids[0].steer(
            0,
            &boids,
            &grid,
            &TuningParams::default(),
            &SteeringConstants::default(),
            BOUNDS,
        );
        // center is ~41 away, inside 5 * 17, so the average heading 310 wins
        assert!((steering.turn_direction + 50.0).abs() < 1e-2);
    }

    #[test]
    fn small_errors_fall_inside_the_deadband() {
        let (boids, grid) = registered(
            vec![at(500.0, 500.0, 0.3), at(540.0, 500.0, 0.0), at(540.0, 520.0, 0.0)],
            100.0,
        );
        let steering = boids[0].steer(
            0,
            &boids,
            &grid,
            &TuningParams::default(),
            &SteeringConstants::default(),
            BOUNDS,
        );
        assert_eq!(steering.turn_direction, 0.0);
    }

    #[test]
    fn nearest_neighbors_are_sorted_and_truncated() {
        let mut flock = vec![at(500.0, 500.0, 0.0)];
        for d in [9.0, 3.0, 7.0, 1.0, 10.0, 5.0, 2.0, 8.0, 6.0, 4.0] {
            flock.push(at(500.0 + d, 500.0 + d, 0.0));
        }
        let (boids, grid) = registered(flock, 100.0);
        let nearest = boids[0].nearest_neighbors(0, &boids, &grid, 7);
        let offsets: Vec<f32> = nearest.iter().map(|&i| boids[i].position.x - 500.0).collect();
        assert_eq!(offsets, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn edge_bearing_points_inward() {
        assert_eq!(edge_bearing(vec2(10.0, 500.0), BOUNDS, 42.0), Some((0.0, 10.0)));
        assert_eq!(edge_bearing(vec2(980.0, 500.0), BOUNDS, 42.0), Some((180.0, 20.0)));
        assert_eq!(edge_bearing(vec2(500.0, 5.0), BOUNDS, 42.0), Some((90.0, 5.0)));
        assert_eq!(edge_bearing(vec2(500.0, 990.0), BOUNDS, 42.0), Some((270.0, 10.0)));
        // corner: vertical edge takes precedence
        assert_eq!(edge_bearing(vec2(10.0, 20.0), BOUNDS, 42.0), Some((90.0, 10.0)));
        assert_eq!(edge_bearing(vec2(500.0, 500.0), BOUNDS, 42.0), None);
    }

    #[test]
    fn edge_turn_rate_grows_toward_the_wall() {
        let constants = SteeringConstants::default();
        let tuning = TuningParams::default();
        let rate_at = |x: f32| {
            let (boids, grid) = registered(vec![at(x, 500.0, 90.0)], 100.0);
            boids[0].steer(0, &boids, &grid, &tuning, &constants, BOUNDS).turn_rate
        };
        let far = rate_at(1000.0 - 40.0);
        let near = rate_at(1000.0 - 5.0);
        let outside = rate_at(1000.0 + 30.0);
        assert!(near > far);
        assert!(far >= constants.turn_rate);
        assert_eq!(outside, constants.max_edge_turn_rate);
    }

    #[test]
    fn bouncing_boid_is_pinned_inside_at_a_corner() {
        let constants = SteeringConstants::default();
        let tuning = TuningParams {
            speed: 600.0,
            ..TuningParams::default()
        };
        // heading straight into the top-right corner
        let (mut boids, grid) = registered(vec![at(990.0, 10.0, 315.0)], 100.0);
        for _ in 0..30 {
            let steering = boids[0].steer(0, &boids, &grid, &tuning, &constants, BOUNDS);
            boids[0].apply(&steering, 1.0 / 30.0, &tuning, &constants, BOUNDS);
            let p = boids[0].position;
            assert!((0.0..=1000.0).contains(&p.x) && (0.0..=1000.0).contains(&p.y), "escaped to {p:?}");
        }
    }

    #[test]
    fn wrapping_ignores_the_edge_margin() {
        let (boids, grid) = registered(vec![at(995.0, 500.0, 0.0)], 100.0);
        let tuning = TuningParams {
            wrap: true,
            ..TuningParams::default()
        };
        let steering = boids[0].steer(0, &boids, &grid, &tuning, &SteeringConstants::default(), BOUNDS);
        assert!(!steering.avoiding_edge);
        assert_eq!(steering.turn_direction, 0.0);
    }

    #[test]
    fn random_boids_spawn_inside_the_margin() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let boid = Boid::random(&mut rng, BOUNDS, 50.0, BoidKind::Fish);
            assert!((50.0..950.0).contains(&boid.position.x));
            assert!((50.0..950.0).contains(&boid.position.y));
            assert!((0.0..360.0).contains(&boid.heading));
            assert_eq!(boid.kind, BoidKind::Fish);
        }
        // too small for the margin: fall back to the whole area
        let tiny = Boid::random(&mut rng, WorldBounds::new(60.0, 60.0), 50.0, BoidKind::Bird);
        assert!((0.0..60.0).contains(&tiny.position.x));
    }
}
