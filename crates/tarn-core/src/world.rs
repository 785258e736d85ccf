//! World orchestration: tick order, rosters, and the command surface
//!
//! The world exclusively owns the wave field, the blight network, and the
//! plant/prey rosters. One [`World::tick`] runs every subsystem to
//! completion in a strict order; removal is always collect-then-remove so
//! entities can die mid-tick without upsetting iteration.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::collections::HashSet;
use tarn_creature::prey::INFECTION_RADIUS;
use tarn_creature::{Bounds, EntityId, PeerView, Plant, PlantView, Prey};
use tarn_wave::WaveField;

use crate::blight::BlightNetwork;
use crate::config::SimConfig;
use crate::render::{self, Surface};

/// Pixel half-extent of the hit box used to delete blight nodes
const NODE_HIT_RADIUS: f32 = 15.0;
/// Runtime population caps accepted from the host
const POPULATION_LIMIT: usize = 20;

/// What an external spawn command creates. The entity set is closed; the
/// host never constructs entities itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Plant,
    Prey,
    Node,
}

/// The simulation. The host drives it through [`World::tick`] and
/// [`World::render`] plus the pointer/keyboard command methods.
pub struct World {
    config: SimConfig,
    bounds: Bounds,
    field: WaveField,
    blight: BlightNetwork,
    plants: Vec<Plant>,
    prey: Vec<Prey>,
    /// Entities placed by the user; never counted against backfill targets
    user_created: HashSet<EntityId>,
    rng: Xoshiro256StarStar,
    debug_overlay: bool,
    tick_count: u64,
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = match config.world.seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_os_rng(),
        };
        let mut field = WaveField::new(
            config.world.width as usize,
            config.world.height as usize,
            config.wave.cell_size,
        );
        field.set_damping(config.wave.damping);
        let blight = BlightNetwork::new(&field, config.blight.spread_probability, &mut rng);
        let bounds = Bounds::new(config.world.width, config.world.height, config.world.margin);

        let mut world = Self {
            config,
            bounds,
            field,
            blight,
            plants: Vec::new(),
            prey: Vec::new(),
            user_created: HashSet::new(),
            rng,
            debug_overlay: true,
            tick_count: 0,
        };
        world.backfill_plants();
        world.backfill_prey();
        log::info!(
            "world initialized: {} plants, {} prey, {}x{} cells",
            world.plants.len(),
            world.prey.len(),
            world.field.cols(),
            world.field.rows()
        );
        world
    }

    /// Advance the simulation one step. Strict order: wave field, blight,
    /// plants (and plant-vs-blight kills), plant compaction, prey (peer
    /// avoidance, predation, infection), then plant and prey compaction
    /// with population backfill.
    pub fn tick(&mut self) {
        self.tick_count += 1;

        self.field.update();
        self.blight.update(&self.field, &mut self.rng);

        self.advance_plants();
        self.compact_plants();

        let eaten = self.advance_prey();
        for id in &eaten {
            if let Some(plant) = self.plants.iter_mut().find(|p| p.body.id == *id) {
                plant.body.kill();
            }
        }
        self.compact_plants();
        self.compact_prey();
    }

    fn advance_plants(&mut self) {
        for i in 0..self.plants.len() {
            if self.plants[i].body.alive {
                self.plants[i].update(&mut self.field, &mut self.rng);
            }
        }

        // Plants disinfect: blight nodes in range of a live plant die
        let cleared: Vec<_> = self
            .blight
            .nodes()
            .into_iter()
            .filter(|(_, center, _)| {
                self.plants
                    .iter()
                    .any(|p| p.body.alive && p.clears_blight_at(*center))
            })
            .map(|(id, _, _)| id)
            .collect();
        for id in cleared {
            self.blight.remove_node(id);
        }
    }

    /// Returns the plants eaten this pass. Views are snapshots: each prey
    /// sees the live peers from the start of the pass and the live plants
    /// minus anything already eaten this tick.
    fn advance_prey(&mut self) -> Vec<EntityId> {
        let peer_views: Vec<PeerView> = self
            .prey
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| PeerView {
                id: p.id(),
                position: p.creature.body.position,
                size: p.creature.body.size,
            })
            .collect();
        let plant_views: Vec<PlantView> = self
            .plants
            .iter()
            .filter(|p| p.body.alive)
            .map(|p| PlantView {
                id: p.body.id,
                position: p.body.position,
                size: p.body.size,
                outline: p.outline(),
            })
            .collect();

        let mut eaten: Vec<EntityId> = Vec::new();
        for i in 0..self.prey.len() {
            if !self.prey[i].is_alive() {
                continue;
            }
            let views: Vec<PlantView> = plant_views
                .iter()
                .filter(|v| !eaten.contains(&v.id))
                .cloned()
                .collect();
            let actions =
                self.prey[i].update(&mut self.field, &self.bounds, &peer_views, &views, &mut self.rng);

            if let Some(id) = actions.ate_plant {
                eaten.push(id);
            }
            if let Some(position) = actions.spawn_node_at {
                self.blight.place_node_at(position, &mut self.rng);
            }

            if self.prey[i].is_alive() && !self.prey[i].creature.infected {
                let position = self.prey[i].creature.body.position;
                let near_node = self
                    .blight
                    .nodes()
                    .iter()
                    .any(|(_, center, _)| center.distance(position) < INFECTION_RADIUS);
                if near_node {
                    self.prey[i].infect(&mut self.rng);
                }
            }
        }
        eaten
    }

    fn compact_plants(&mut self) {
        let removed: Vec<EntityId> = self
            .plants
            .iter()
            .filter(|p| !p.body.alive)
            .map(|p| p.body.id)
            .collect();
        self.plants.retain(|p| p.body.alive);
        for id in &removed {
            self.user_created.remove(id);
        }
        self.backfill_plants();
    }

    fn compact_prey(&mut self) {
        let removed: Vec<EntityId> = self
            .prey
            .iter()
            .filter(|p| !p.is_alive())
            .map(|p| p.id())
            .collect();
        self.prey.retain(|p| p.is_alive());
        for id in &removed {
            self.user_created.remove(id);
        }
        self.backfill_prey();
    }

    fn backfill_plants(&mut self) {
        while self.non_user_plant_count() < self.config.population.max_plants {
            let position = self.random_position();
            let size = self.rng.random_range(20..30);
            let plant = Plant::new(position, size, &mut self.rng);
            log::debug!("plant {} respawned", plant.body.id);
            self.plants.push(plant);
        }
    }

    fn backfill_prey(&mut self) {
        while self.non_user_prey_count() < self.config.population.max_prey {
            let position = self.random_position();
            let size = self.rng.random_range(25..40);
            let speed = 2.0 + self.rng.random::<f32>();
            let prey = Prey::new(position, size, speed);
            log::debug!("prey {} respawned", prey.id());
            self.prey.push(prey);
        }
    }

    fn non_user_plant_count(&self) -> usize {
        self.plants
            .iter()
            .filter(|p| !self.user_created.contains(&p.body.id))
            .count()
    }

    fn non_user_prey_count(&self) -> usize {
        self.prey
            .iter()
            .filter(|p| !self.user_created.contains(&p.id()))
            .count()
    }

    fn random_position(&mut self) -> Vec2 {
        let margin = self.bounds.margin;
        Vec2::new(
            margin + self.rng.random::<f32>() * (self.bounds.width - 2.0 * margin),
            margin + self.rng.random::<f32>() * (self.bounds.height - 2.0 * margin),
        )
    }

    fn in_bounds(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.x < self.bounds.width
            && position.y >= 0.0
            && position.y < self.bounds.height
    }

    // ------------------------------------------------------------------
    // External command surface
    // ------------------------------------------------------------------

    /// Pointer press: inject a disturbance at the pointer position.
    pub fn disturb(&mut self, x: f32, y: f32) {
        self.field.disturb(x, y, self.config.wave.disturbance_radius);
    }

    /// Drop command: create a user-owned entity at a position. Returns
    /// false when the position is out of bounds or (for nodes) violates the
    /// separation rule; user entities are never backfilled against.
    pub fn spawn(&mut self, kind: SpawnKind, x: f32, y: f32) -> bool {
        let position = Vec2::new(x, y);
        if !self.in_bounds(position) {
            log::warn!("spawn rejected out of bounds: ({x:.0}, {y:.0})");
            return false;
        }
        match kind {
            SpawnKind::Plant => {
                let size = self.rng.random_range(20..30);
                let plant = Plant::new(position, size, &mut self.rng);
                log::info!("user plant {} placed at ({x:.0}, {y:.0})", plant.body.id);
                self.user_created.insert(plant.body.id);
                self.plants.push(plant);
                true
            }
            SpawnKind::Prey => {
                let size = self.rng.random_range(25..40);
                let speed = 2.0 + self.rng.random::<f32>();
                let prey = Prey::new(position, size, speed);
                log::info!("user prey {} placed at ({x:.0}, {y:.0})", prey.id());
                self.user_created.insert(prey.id());
                self.prey.push(prey);
                true
            }
            SpawnKind::Node => self.blight.place_node_at(position, &mut self.rng).is_some(),
        }
    }

    /// Right click: remove whatever occupies the point, preferring plants,
    /// then prey, then blight nodes. Returns false when nothing was hit.
    pub fn delete_at(&mut self, x: f32, y: f32) -> bool {
        let point = Vec2::new(x, y);

        if let Some(i) = self
            .plants
            .iter()
            .position(|p| p.body.alive && p.outline().contains(point))
        {
            let id = self.plants[i].body.id;
            self.plants.remove(i);
            self.user_created.remove(&id);
            log::info!("plant {id} deleted");
            return true;
        }

        if let Some(i) = self
            .prey
            .iter()
            .position(|p| p.is_alive() && p.outline().contains(point))
        {
            let id = self.prey[i].id();
            self.prey.remove(i);
            self.user_created.remove(&id);
            log::info!("prey {id} deleted");
            return true;
        }

        let hit = self.blight.nodes().into_iter().find(|(_, center, _)| {
            (center.x - x).abs() < NODE_HIT_RADIUS && (center.y - y).abs() < NODE_HIT_RADIUS
        });
        if let Some((id, _, _)) = hit {
            self.blight.remove_node(id);
            log::info!("blight node deleted at ({x:.0}, {y:.0})");
            return true;
        }

        false
    }

    /// Keypress: flip the per-entity stat overlay. Returns the new state.
    pub fn toggle_debug_overlay(&mut self) -> bool {
        self.debug_overlay = !self.debug_overlay;
        self.debug_overlay
    }

    /// Paint the whole scene. Pure read; safe to call at any cadence.
    pub fn render(&self, surface: &mut dyn Surface) {
        render::draw_field(&self.field, surface);
        render::draw_blight(&self.blight, surface);
        for plant in &self.plants {
            if plant.body.alive {
                render::draw_plant(plant, self.debug_overlay, surface);
            }
        }
        for prey in &self.prey {
            if prey.is_alive() {
                render::draw_prey(prey, self.debug_overlay, surface);
            }
        }
    }

    // ------------------------------------------------------------------
    // Runtime tunables
    // ------------------------------------------------------------------

    pub fn set_damping(&mut self, damping: f32) {
        self.field.set_damping(damping);
        self.config.wave.damping = self.field.damping();
    }

    pub fn set_disturbance_radius(&mut self, radius: i32) {
        if radius >= 0 {
            self.config.wave.disturbance_radius = radius;
        } else {
            log::warn!("ignoring negative disturbance radius: {radius}");
        }
    }

    pub fn set_max_plants(&mut self, count: usize) {
        if (1..=POPULATION_LIMIT).contains(&count) {
            self.config.population.max_plants = count;
        } else {
            log::warn!("ignoring max plants outside 1..={POPULATION_LIMIT}: {count}");
        }
    }

    pub fn set_max_prey(&mut self, count: usize) {
        if (1..=POPULATION_LIMIT).contains(&count) {
            self.config.population.max_prey = count;
        } else {
            log::warn!("ignoring max prey outside 1..={POPULATION_LIMIT}: {count}");
        }
    }

    pub fn set_spread_probability(&mut self, probability: f32) {
        self.blight.set_spread_probability(probability);
    }

    // ------------------------------------------------------------------
    // Read access for the host and tests
    // ------------------------------------------------------------------

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn blight(&self) -> &BlightNetwork {
        &self.blight
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn prey(&self) -> &[Prey] {
        &self.prey
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.world.seed = Some(1234);
        config
    }

    #[test]
    fn test_new_world_fills_populations() {
        let world = World::new(seeded_config());
        assert_eq!(world.plants().len(), 6);
        assert_eq!(world.prey().len(), 3);
        assert_eq!(world.blight().node_count(), 1);
    }

    #[test]
    fn test_populations_maintained_across_ticks() {
        let mut world = World::new(seeded_config());
        for _ in 0..300 {
            world.tick();
            assert_eq!(world.plants().len(), 6, "plants at tick {}", world.tick_count());
            assert_eq!(world.prey().len(), 3, "prey at tick {}", world.tick_count());
        }
    }

    #[test]
    fn test_spawn_out_of_bounds_rejected() {
        let mut world = World::new(seeded_config());
        assert!(!world.spawn(SpawnKind::Plant, -10.0, 20.0));
        assert!(!world.spawn(SpawnKind::Prey, 20.0, 9_999.0));
        assert_eq!(world.plants().len(), 6);
        assert_eq!(world.prey().len(), 3);
    }

    #[test]
    fn test_user_spawn_not_backfilled() {
        let mut world = World::new(seeded_config());
        // Clear the drop point so the deletes below hit the user plant
        while world.delete_at(200.0, 200.0) {}
        assert!(world.spawn(SpawnKind::Plant, 200.0, 200.0));
        assert!(world.delete_at(200.0, 200.0));
        world.tick();
        // Back to the non-user target, not 7
        assert_eq!(world.plants().len(), 6);
        assert_eq!(world.prey().len(), 3);
    }

    #[test]
    fn test_spawned_node_obeys_separation() {
        let mut world = World::new(seeded_config());
        let root = world.blight().nodes()[0].1;
        assert!(!world.spawn(SpawnKind::Node, root.x, root.y));
        assert_eq!(world.blight().node_count(), 1);

        assert!(world.spawn(SpawnKind::Node, root.x + 70.0, root.y));
        assert_eq!(world.blight().node_count(), 2);
    }

    #[test]
    fn test_delete_at_empty_point_is_noop() {
        let mut world = World::new(seeded_config());
        // Far corner away from the blight root; clear anything living there
        while world.delete_at(1.0, 1.0) {}
        let plants = world.plants().len();
        assert!(!world.delete_at(1.0, 1.0));
        assert_eq!(world.plants().len(), plants);
    }

    #[test]
    fn test_delete_prefers_plant_over_node() {
        let mut world = World::new(seeded_config());
        let root = world.blight().nodes()[0].1;
        assert!(world.spawn(SpawnKind::Plant, root.x, root.y));
        let nodes_before = world.blight().node_count();
        assert!(world.delete_at(root.x, root.y));
        // The plant went first; the node survives
        assert_eq!(world.blight().node_count(), nodes_before);
        assert_eq!(world.plants().len(), 6);
    }

    #[test]
    fn test_toggle_debug_overlay() {
        let mut world = World::new(seeded_config());
        let initial = world.debug_overlay();
        assert_eq!(world.toggle_debug_overlay(), !initial);
        assert_eq!(world.toggle_debug_overlay(), initial);
    }

    #[test]
    fn test_disturb_energizes_field() {
        let mut world = World::new(seeded_config());
        let before = world.field().total_energy();
        world.disturb(world.bounds().width / 2.0, world.bounds().height / 2.0);
        assert!(world.field().total_energy() > before);
    }

    #[test]
    fn test_tunable_setters_validate() {
        let mut world = World::new(seeded_config());
        world.set_max_plants(0);
        world.tick();
        assert_eq!(world.plants().len(), 6);

        // Raising the target backfills on the next tick; lowering it never
        // culls living plants
        world.set_max_plants(10);
        world.tick();
        assert_eq!(world.plants().len(), 10);
        world.set_max_plants(4);
        world.tick();
        assert!(world.plants().len() > 4);
    }
}
