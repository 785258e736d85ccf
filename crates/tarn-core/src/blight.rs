//! The blight: a probabilistically growing node/connector network
//!
//! Nodes live on the wave field's cell grid (snapped to a coarse sub-grid).
//! Each node radiates short-lived connectors whose endpoints crawl along the
//! wave field's gradient; when an endpoint settles on or near a coarse grid
//! intersection it may spawn a new node, which branches again with a budget
//! that shrinks by generation. Persistent node-node connections and the
//! fractal sub-branches exist for rendering only and never feed back into
//! growth state.

use glam::{IVec2, Vec2};
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tarn_wave::WaveField;

/// Stable handle to a blight node; survives removals of other nodes.
pub type BlightNodeId = NodeIndex;

/// Farthest (in cells) a connector endpoint may sit from its owning node
const MAX_DISTANCE_FROM_OWNER: f32 = 7.0;
/// |height| a connector endpoint needs before it starts gradient climbing
const HEIGHT_THRESHOLD: f32 = 0.2;
/// Spacing of the coarse sub-grid nodes snap to
const COARSE_GRID: i32 = 5;
/// Connectors radiated by the root node
const ROOT_CONNECTORS: usize = 8;
/// Connectors radiated by an externally placed node
const PLACED_CONNECTORS: usize = 3;
/// Cell length of freshly seeded connectors
const SEED_CONNECTOR_LENGTH: f32 = 2.0;
/// Minimum cell distance between a spawned node and any existing node
const MIN_NODE_SEPARATION: f32 = 2.0;
/// Stricter separation for externally placed nodes (user drops, prey seeds)
const PLACED_NODE_SEPARATION: f32 = 3.0;
/// Base connector lifetime in milliseconds; each gets a random surplus
const CONNECTOR_LIFESPAN_MS: f32 = 50_000.0;
const CONNECTOR_LIFESPAN_JITTER_MS: f32 = 5_000.0;
/// Wall-clock delta clamp so a stalled host cannot trigger a growth burst
const MAX_DELTA_MS: f32 = 100.0;
/// Chance a connector retires after spawning a node
const SPAWN_RETIRE_CHANCE: f64 = 0.3;
/// Golden-angle increment between sibling branches
const GOLDEN_ANGLE: f32 = std::f32::consts::PI * 0.618_034;
/// Branch budget at generation zero, decaying by generation with this floor
const BASE_BRANCHES: u32 = 6;
const MIN_BRANCHES: u32 = 2;
/// Recursion depth of the decorative fractal subdivision
const FRACTAL_MAX_DEPTH: u32 = 4;
/// Node pairs closer than this many cells get fractal filler
const FRACTAL_RANGE_CELLS: f32 = 15.0;

/// A settled point of the blight network, in cell coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlightNode {
    pub x: i32,
    pub y: i32,
    pub generation: u32,
}

impl BlightNode {
    fn distance_to(&self, x: i32, y: i32) -> f32 {
        Vec2::new(self.x as f32, self.y as f32).distance(Vec2::new(x as f32, y as f32))
    }
}

/// A growing edge reaching from a node toward an unclaimed cell.
#[derive(Debug, Clone)]
struct Connector {
    owner: BlightNodeId,
    end: IVec2,
    age_ms: f32,
    lifespan_ms: f32,
}

/// Decorative sub-branch produced by recursive bisection, world pixels.
#[derive(Debug, Clone, Copy)]
pub struct FractalBranch {
    pub start: Vec2,
    pub end: Vec2,
    pub depth: u32,
    angle: f32,
}

/// The growth network. See the module docs for the life cycle.
pub struct BlightNetwork {
    graph: StableUnGraph<BlightNode, ()>,
    connectors: Vec<Connector>,
    fractal_branches: Vec<FractalBranch>,
    cols: i32,
    rows: i32,
    cell_size: i32,
    spread_probability: f32,
    last_update: Instant,
}

impl BlightNetwork {
    /// Seed a network over the given field with a root node at grid center.
    pub fn new<R: Rng>(field: &WaveField, spread_probability: f32, rng: &mut R) -> Self {
        let mut network = Self {
            graph: StableUnGraph::default(),
            connectors: Vec::new(),
            fractal_branches: Vec::new(),
            cols: field.cols() as i32,
            rows: field.rows() as i32,
            cell_size: field.cell_size() as i32,
            spread_probability: spread_probability.clamp(0.0, 1.0),
            last_update: Instant::now(),
        };
        network.seed_root(rng);
        network
    }

    fn seed_root<R: Rng>(&mut self, rng: &mut R) {
        let x = (self.cols / 2 / COARSE_GRID) * COARSE_GRID;
        let y = (self.rows / 2 / COARSE_GRID) * COARSE_GRID;
        let root = self.graph.add_node(BlightNode {
            x,
            y,
            generation: 0,
        });
        for i in 0..ROOT_CONNECTORS {
            let angle = std::f32::consts::TAU * i as f32 / ROOT_CONNECTORS as f32;
            let end = IVec2::new(
                x + (angle.cos() * SEED_CONNECTOR_LENGTH) as i32,
                y + (angle.sin() * SEED_CONNECTOR_LENGTH) as i32,
            );
            if self.in_bounds(end) {
                self.connectors.push(Self::connector(root, end, rng));
            }
        }
    }

    fn connector<R: Rng>(owner: BlightNodeId, end: IVec2, rng: &mut R) -> Connector {
        Connector {
            owner,
            end,
            age_ms: 0.0,
            lifespan_ms: CONNECTOR_LIFESPAN_MS + rng.random::<f32>() * CONNECTOR_LIFESPAN_JITTER_MS,
        }
    }

    fn in_bounds(&self, p: IVec2) -> bool {
        p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows
    }

    /// Advance the network using the wall clock for pacing. The elapsed time
    /// is clamped so a scheduling stall cannot cause a growth explosion.
    pub fn update<R: Rng>(&mut self, field: &WaveField, rng: &mut R) {
        let now = Instant::now();
        let dt_ms = now.duration_since(self.last_update).as_secs_f32() * 1000.0;
        self.last_update = now;
        self.advance(field, dt_ms, rng);
    }

    /// Advance the network by an explicit time slice (milliseconds).
    pub fn advance<R: Rng>(&mut self, field: &WaveField, dt_ms: f32, rng: &mut R) {
        let dt = dt_ms.min(MAX_DELTA_MS);
        let spawn_chance = (self.spread_probability * (dt / 20.0).min(0.4)) as f64;

        let mut removed = vec![false; self.connectors.len()];
        let mut to_add: Vec<Connector> = Vec::new();

        for i in 0..self.connectors.len() {
            let owner = self.connectors[i].owner;
            let Some(owner_node) = self.graph.node_weight(owner) else {
                removed[i] = true;
                continue;
            };
            let owner_pos = IVec2::new(owner_node.x, owner_node.y);
            let owner_generation = owner_node.generation;

            {
                let c = &mut self.connectors[i];
                c.age_ms += dt;
                let strayed = cell_distance(owner_pos, c.end) > MAX_DISTANCE_FROM_OWNER;
                if strayed || c.age_ms >= c.lifespan_ms {
                    removed[i] = true;
                    continue;
                }
            }

            let end = self.connectors[i].end;
            let height = field.height_at(end.x, end.y);
            if height.abs() <= HEIGHT_THRESHOLD {
                continue;
            }

            // Climb toward the steepest height difference in the
            // 8-neighborhood, but never past the owner-distance cap
            if let Some(step) = self.steepest_neighbor(field, end, height) {
                let proposed = end + step;
                if cell_distance(owner_pos, proposed) <= MAX_DISTANCE_FROM_OWNER {
                    self.connectors[i].end = proposed;
                }
            }

            let end = self.connectors[i].end;
            if on_or_near_coarse_grid(end) && rng.random::<f64>() < spawn_chance {
                self.spawn_node(end, owner_pos, owner_generation, &mut to_add, rng);
                if rng.random_bool(SPAWN_RETIRE_CHANCE) {
                    removed[i] = true;
                }
            }
        }

        let mut keep = removed.iter();
        self.connectors.retain(|_| !keep.next().unwrap());
        self.connectors.append(&mut to_add);

        self.rebuild_fractal_branches();
        self.rebuild_connections();
    }

    fn steepest_neighbor(&self, field: &WaveField, end: IVec2, height: f32) -> Option<IVec2> {
        let mut best: Option<IVec2> = None;
        let mut best_diff = 0.0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = end + IVec2::new(dx, dy);
                if !self.in_bounds(n) {
                    continue;
                }
                let diff = (field.height_at(n.x, n.y) - height).abs();
                if diff > best_diff {
                    best_diff = diff;
                    best = Some(IVec2::new(dx, dy));
                }
            }
        }
        best
    }

    /// Spawn a node at a connector endpoint: generation = owner's + 1, with
    /// a generation-decaying fan of fresh connectors at golden-angle
    /// increments from a random phase.
    fn spawn_node<R: Rng>(
        &mut self,
        at: IVec2,
        parent_pos: IVec2,
        parent_generation: u32,
        to_add: &mut Vec<Connector>,
        rng: &mut R,
    ) {
        let too_close = self
            .graph
            .node_weights()
            .any(|n| n.distance_to(at.x, at.y) < MIN_NODE_SEPARATION);
        if too_close {
            return;
        }

        let generation = parent_generation + 1;
        let node = self.graph.add_node(BlightNode {
            x: at.x,
            y: at.y,
            generation,
        });

        let budget = BASE_BRANCHES.saturating_sub(generation / 2).max(MIN_BRANCHES);
        let branches = ((budget as f32 * self.spread_probability).ceil() as u32).max(MIN_BRANCHES);
        let phase = rng.random::<f32>() * std::f32::consts::TAU;
        let length = (3 - generation as i32 / 3).max(1) as f32;

        for i in 0..branches {
            let angle = phase + i as f32 * GOLDEN_ANGLE;
            let end = IVec2::new(
                at.x + (angle.cos() * length) as i32,
                at.y + (angle.sin() * length) as i32,
            );
            if self.in_bounds(end) && cell_distance(parent_pos, end) <= MAX_DISTANCE_FROM_OWNER {
                to_add.push(Self::connector(node, end, rng));
            }
        }
    }

    /// Place a node from a world-pixel position (user drop or an infected
    /// prey seeding the blight). Snapped to the coarse grid; rejected when
    /// out of bounds or within the placed-node separation of an existing
    /// node. Links to the closest node within the owner cap, or starts a
    /// fresh generation-0 root when none is close enough.
    pub fn place_node_at<R: Rng>(&mut self, position: Vec2, rng: &mut R) -> Option<BlightNodeId> {
        let gx = ((position.x / self.cell_size as f32) as i32 / COARSE_GRID) * COARSE_GRID;
        let gy = ((position.y / self.cell_size as f32) as i32 / COARSE_GRID) * COARSE_GRID;
        let at = IVec2::new(gx, gy);
        if !self.in_bounds(at) {
            return None;
        }

        let too_close = self
            .graph
            .node_weights()
            .any(|n| n.distance_to(gx, gy) < PLACED_NODE_SEPARATION);
        if too_close {
            return None;
        }

        let closest = self
            .graph
            .node_indices()
            .filter(|&idx| {
                let n = &self.graph[idx];
                n.x != gx || n.y != gy
            })
            .map(|idx| (idx, self.graph[idx].distance_to(gx, gy)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .filter(|(_, d)| *d <= MAX_DISTANCE_FROM_OWNER);

        let generation = match closest {
            Some((idx, _)) => self.graph[idx].generation + 1,
            None => 0,
        };
        let node = self.graph.add_node(BlightNode {
            x: gx,
            y: gy,
            generation,
        });

        if let Some((parent, _)) = closest {
            self.connectors.push(Self::connector(parent, at, rng));
            self.graph.add_edge(parent, node, ());
        }

        for i in 0..PLACED_CONNECTORS {
            let angle = std::f32::consts::TAU * i as f32 / PLACED_CONNECTORS as f32;
            let end = IVec2::new(
                gx + (angle.cos() * SEED_CONNECTOR_LENGTH) as i32,
                gy + (angle.sin() * SEED_CONNECTOR_LENGTH) as i32,
            );
            if self.in_bounds(end) {
                self.connectors.push(Self::connector(node, end, rng));
            }
        }

        log::debug!("blight node placed at cell ({gx}, {gy}), generation {generation}");
        Some(node)
    }

    /// Remove a node along with every connector and connection touching it.
    pub fn remove_node(&mut self, id: BlightNodeId) {
        if self.graph.node_weight(id).is_none() {
            return;
        }
        self.connectors.retain(|c| c.owner != id);
        self.graph.remove_node(id);
    }

    /// Visualization-only connectivity: every node without an outgoing
    /// connector gets an edge to its nearest neighbor. Rebuilt from scratch
    /// each tick.
    fn rebuild_connections(&mut self) {
        self.graph.clear_edges();
        let indices: Vec<_> = self.graph.node_indices().collect();
        for &idx in &indices {
            if self.connectors.iter().any(|c| c.owner == idx) {
                continue;
            }
            let here = &self.graph[idx];
            let nearest = indices
                .iter()
                .filter(|&&other| other != idx)
                .map(|&other| {
                    let n = &self.graph[other];
                    (other, here.distance_to(n.x, n.y))
                })
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            if let Some((other, _)) = nearest {
                self.graph.add_edge(idx, other, ());
            }
        }
    }

    /// Visualization-only fractal filler between nearby node pairs.
    fn rebuild_fractal_branches(&mut self) {
        self.fractal_branches.clear();
        if self.graph.node_count() < 3 {
            return;
        }
        let centers: Vec<Vec2> = self
            .graph
            .node_indices()
            .map(|idx| self.node_center(idx))
            .collect();
        let range = (self.cell_size as f32) * FRACTAL_RANGE_CELLS;

        for i in 0..centers.len() {
            for j in (i + 1)..(i + 4).min(centers.len()) {
                let (start, end) = (centers[i], centers[j]);
                if start.distance(end) >= range {
                    continue;
                }
                let delta = end - start;
                let root = FractalBranch {
                    start,
                    end,
                    depth: 0,
                    angle: delta.y.atan2(delta.x),
                };
                self.fractal_branches.push(root);
                self.subdivide(root, 1);
            }
        }
    }

    fn subdivide(&mut self, parent: FractalBranch, depth: u32) {
        if depth >= FRACTAL_MAX_DEPTH {
            return;
        }
        let mid = (parent.start + parent.end) / 2.0;
        let length = parent.start.distance(parent.end) * (0.6 - depth as f32 * 0.1);
        for sign in [0.6_f32, -0.6] {
            let angle = parent.angle + sign;
            let branch = FractalBranch {
                start: mid,
                end: mid + Vec2::from_angle(angle) * length,
                depth,
                angle,
            };
            self.fractal_branches.push(branch);
            self.subdivide(branch, depth + 1);
        }
    }

    /// World-pixel center of a node's cell.
    pub fn node_center(&self, id: BlightNodeId) -> Vec2 {
        let n = &self.graph[id];
        Vec2::new(
            (n.x * self.cell_size + self.cell_size / 2) as f32,
            (n.y * self.cell_size + self.cell_size / 2) as f32,
        )
    }

    /// All nodes as (id, world-pixel center, generation).
    pub fn nodes(&self) -> Vec<(BlightNodeId, Vec2, u32)> {
        self.graph
            .node_indices()
            .map(|idx| (idx, self.node_center(idx), self.graph[idx].generation))
            .collect()
    }

    /// Connector segments as (start px, end px, owner generation).
    pub fn connector_segments(&self) -> Vec<(Vec2, Vec2, u32)> {
        self.connectors
            .iter()
            .filter_map(|c| {
                let owner = self.graph.node_weight(c.owner)?;
                let start = Vec2::new(
                    (owner.x * self.cell_size + self.cell_size / 2) as f32,
                    (owner.y * self.cell_size + self.cell_size / 2) as f32,
                );
                let end = Vec2::new(
                    (c.end.x * self.cell_size + self.cell_size / 2) as f32,
                    (c.end.y * self.cell_size + self.cell_size / 2) as f32,
                );
                Some((start, end, owner.generation))
            })
            .collect()
    }

    /// Connection segments as world-pixel endpoint pairs.
    pub fn connection_segments(&self) -> Vec<(Vec2, Vec2)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.node_center(a), self.node_center(b)))
            .collect()
    }

    pub fn fractal_branches(&self) -> &[FractalBranch] {
        &self.fractal_branches
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn generation_of(&self, id: BlightNodeId) -> Option<u32> {
        self.graph.node_weight(id).map(|n| n.generation)
    }

    /// Spread probability tunable; values outside [0, 1] are rejected.
    pub fn set_spread_probability(&mut self, probability: f32) {
        if (0.0..=1.0).contains(&probability) {
            self.spread_probability = probability;
        } else {
            log::warn!("ignoring blight spread probability outside [0, 1]: {probability}");
        }
    }

    pub fn spread_probability(&self) -> f32 {
        self.spread_probability
    }

    /// Cell edge length in pixels, mirroring the wave field's.
    pub fn cell_size(&self) -> f32 {
        self.cell_size as f32
    }

    /// Maximum cell distance a connector endpoint may have from its owner,
    /// exposed for tests of the stray-cap property.
    pub fn owner_distance_cap() -> f32 {
        MAX_DISTANCE_FROM_OWNER
    }

    /// Largest endpoint-to-owner distance among live connectors, in cells.
    pub fn max_connector_stray(&self) -> f32 {
        self.connectors
            .iter()
            .filter_map(|c| {
                let owner = self.graph.node_weight(c.owner)?;
                Some(cell_distance(IVec2::new(owner.x, owner.y), c.end))
            })
            .fold(0.0, f32::max)
    }
}

fn cell_distance(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

/// On a coarse intersection, or within one cell of a coarse grid line.
fn on_or_near_coarse_grid(p: IVec2) -> bool {
    let (mx, my) = (p.x % COARSE_GRID, p.y % COARSE_GRID);
    (mx == 0 && my == 0) || mx <= 1 || mx >= COARSE_GRID - 1 || my <= 1 || my >= COARSE_GRID - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn setup() -> (WaveField, BlightNetwork, Xoshiro256StarStar) {
        let field = WaveField::new(700, 490, 7);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let blight = BlightNetwork::new(&field, 0.7, &mut rng);
        (field, blight, rng)
    }

    #[test]
    fn test_root_is_generation_zero_with_connectors() {
        let (_, blight, _) = setup();
        assert_eq!(blight.node_count(), 1);
        let (id, _, generation) = blight.nodes()[0];
        assert_eq!(generation, 0);
        assert_eq!(blight.generation_of(id), Some(0));
        assert_eq!(blight.connector_count(), ROOT_CONNECTORS);
    }

    #[test]
    fn test_placed_node_near_root_is_next_generation() {
        let (_, mut blight, mut rng) = setup();
        let root_center = blight.nodes()[0].1;
        // One coarse step to the right of the root
        let position = root_center + Vec2::new((COARSE_GRID * 7) as f32, 0.0);
        let id = blight.place_node_at(position, &mut rng).expect("in range");
        assert_eq!(blight.generation_of(id), Some(1));
        assert_eq!(blight.node_count(), 2);
    }

    #[test]
    fn test_placement_within_separation_is_rejected() {
        let (_, mut blight, mut rng) = setup();
        let root_center = blight.nodes()[0].1;
        let before = blight.node_count();
        assert!(blight.place_node_at(root_center, &mut rng).is_none());
        assert_eq!(blight.node_count(), before);
    }

    #[test]
    fn test_placement_out_of_bounds_is_rejected() {
        let (_, mut blight, mut rng) = setup();
        assert!(blight
            .place_node_at(Vec2::new(-50.0, -50.0), &mut rng)
            .is_none());
        assert!(blight
            .place_node_at(Vec2::new(10_000.0, 10.0), &mut rng)
            .is_none());
    }

    #[test]
    fn test_distant_placement_starts_new_root() {
        let (_, mut blight, mut rng) = setup();
        let id = blight
            .place_node_at(Vec2::new(70.0, 70.0), &mut rng)
            .expect("in bounds");
        // Far from the center root: no parent in range, generation restarts
        assert_eq!(blight.generation_of(id), Some(0));
    }

    #[test]
    fn test_remove_node_drops_its_connectors() {
        let (_, mut blight, _) = setup();
        let (root, _, _) = blight.nodes()[0];
        assert!(blight.connector_count() > 0);
        blight.remove_node(root);
        assert_eq!(blight.node_count(), 0);
        assert_eq!(blight.connector_count(), 0);
        // Removing again is a no-op
        blight.remove_node(root);
        assert_eq!(blight.node_count(), 0);
    }

    #[test]
    fn test_growth_under_sustained_disturbance() {
        let (mut field, mut blight, mut rng) = setup();
        blight.set_spread_probability(1.0);
        let center = blight.nodes()[0].1;
        for _ in 0..400 {
            field.disturb(center.x, center.y, 2);
            field.update();
            blight.advance(&field, 30.0, &mut rng);
        }
        assert!(
            blight.node_count() > 1,
            "blight never grew beyond the root"
        );
    }

    #[test]
    fn test_connectors_never_stray_past_cap() {
        let (mut field, mut blight, mut rng) = setup();
        blight.set_spread_probability(1.0);
        let center = blight.nodes()[0].1;
        for _ in 0..300 {
            field.disturb(center.x, center.y, 2);
            field.update();
            blight.advance(&field, 30.0, &mut rng);
            assert!(blight.max_connector_stray() <= BlightNetwork::owner_distance_cap());
        }
    }

    #[test]
    fn test_spawned_generations_increment_from_parent() {
        let (mut field, mut blight, mut rng) = setup();
        blight.set_spread_probability(1.0);
        let center = blight.nodes()[0].1;
        for _ in 0..400 {
            field.disturb(center.x, center.y, 2);
            field.update();
            blight.advance(&field, 30.0, &mut rng);
        }
        // Every non-root node must sit one generation above some neighbor
        // within the owner cap (its spawning parent)
        let nodes = blight.nodes();
        for &(id, _, generation) in &nodes {
            if generation == 0 {
                continue;
            }
            let center = blight.node_center(id);
            let has_parent = nodes.iter().any(|&(other, other_center, other_gen)| {
                other != id
                    && other_gen + 1 == generation
                    && center.distance(other_center)
                        <= BlightNetwork::owner_distance_cap() * 7.0 * 1.5
            });
            assert!(has_parent, "node {id:?} gen {generation} has no parent");
        }
    }

    #[test]
    fn test_stalled_clock_is_clamped() {
        let (mut field, mut blight, mut rng) = setup();
        blight.set_spread_probability(1.0);
        let center = blight.nodes()[0].1;
        field.disturb(center.x, center.y, 2);
        field.update();
        // A 10-second stall behaves like a single 100 ms step, not a burst
        blight.advance(&field, 10_000.0, &mut rng);
        assert!(blight.node_count() <= 1 + ROOT_CONNECTORS);
    }

    #[test]
    fn test_invalid_spread_probability_rejected() {
        let (_, mut blight, _) = setup();
        blight.set_spread_probability(1.4);
        assert!((blight.spread_probability() - 0.7).abs() < 1e-6);
        blight.set_spread_probability(-0.1);
        assert!((blight.spread_probability() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_fractal_branches_need_three_nodes() {
        let (mut field, mut blight, mut rng) = setup();
        let mut dummy = Xoshiro256StarStar::seed_from_u64(2);
        blight.advance(&field, 30.0, &mut dummy);
        assert!(blight.fractal_branches().is_empty());

        let root_center = blight.nodes()[0].1;
        blight.place_node_at(root_center + Vec2::new(35.0, 0.0), &mut rng);
        blight.place_node_at(root_center + Vec2::new(0.0, 35.0), &mut rng);
        field.update();
        blight.advance(&field, 30.0, &mut rng);
        assert!(!blight.fractal_branches().is_empty());
    }
}
