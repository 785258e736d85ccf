//! Integration tests for the world orchestrator
//!
//! These run the full tick pipeline (wave field, blight, plants, prey,
//! compaction) and check the cross-component invariants the unit tests
//! cannot see.

use glam::Vec2;
use tarn_core::{Color, SimConfig, SpawnKind, Surface, World};

fn seeded_world(seed: u64) -> World {
    let mut config = SimConfig::default();
    config.world.seed = Some(seed);
    World::new(config)
}

/// Counts primitive draw calls; enough to verify the render pass shape.
#[derive(Default)]
struct CountingSurface {
    rects: usize,
    circles: usize,
    polygons: usize,
    lines: usize,
    texts: usize,
}

impl Surface for CountingSurface {
    fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _color: Color) {
        self.rects += 1;
    }
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.circles += 1;
    }
    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _width: f32, _color: Color) {
        self.circles += 1;
    }
    fn fill_polygon(&mut self, _points: &[Vec2], _color: Color) {
        self.polygons += 1;
    }
    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Color) {
        self.lines += 1;
    }
    fn draw_text(&mut self, _position: Vec2, _text: &str, _color: Color) {
        self.texts += 1;
    }
}

// ============================================================================
// Long-haul stability
// ============================================================================

#[test]
fn test_long_run_holds_invariants() {
    let mut world = seeded_world(7);
    for _ in 0..1_500 {
        world.tick();

        // Rosters are compacted and backfilled every tick
        assert_eq!(world.plants().len(), 6);
        assert_eq!(world.prey().len(), 3);
        assert!(world.plants().iter().all(|p| p.body.alive));
        assert!(world.prey().iter().all(|p| p.is_alive()));

        // Creature energy stays bounded
        for prey in world.prey() {
            assert!(prey.creature.energy >= 0.0);
            assert!(prey.creature.energy <= tarn_creature::MAX_ENERGY);
        }

        // Connectors never stray past the owner cap
        assert!(
            world.blight().max_connector_stray()
                <= tarn_core::BlightNetwork::owner_distance_cap()
        );

        // The wave field stays numerically sane under constant agitation
        let energy = world.field().total_energy();
        assert!(energy.is_finite());
    }
}

#[test]
fn test_field_energy_persists_while_entities_move() {
    let mut world = seeded_world(3);
    for _ in 0..50 {
        world.tick();
    }
    // Creatures keep disturbing the water, so the field never settles
    assert!(world.field().total_energy() > 0.0);
}

// ============================================================================
// Command surface
// ============================================================================

#[test]
fn test_spawned_entities_survive_the_next_tick() {
    let mut world = seeded_world(11);
    assert!(world.spawn(SpawnKind::Plant, 150.0, 150.0));
    assert!(world.spawn(SpawnKind::Prey, 500.0, 300.0));
    let plants = world.plants().len();
    let prey = world.prey().len();
    world.tick();
    // User entities persist on top of the backfilled populations
    assert_eq!(world.plants().len(), plants);
    assert_eq!(world.prey().len(), prey);
}

#[test]
fn test_node_spawn_and_delete_round_trip() {
    let mut world = seeded_world(13);
    let root = world.blight().nodes()[0].1;
    let position = root + Vec2::new(105.0, 0.0);
    assert!(world.spawn(SpawnKind::Node, position.x, position.y));
    assert_eq!(world.blight().node_count(), 2);

    let placed = world
        .blight()
        .nodes()
        .into_iter()
        .find(|(_, center, _)| center.distance(root) > 1.0)
        .expect("placed node present");
    // Delete prefers plants and prey over nodes; clear whatever sits on the
    // point until the node itself goes
    while world.blight().node_count() == 2 {
        assert!(
            world.delete_at(placed.1.x, placed.1.y),
            "nothing left to delete but the node persists"
        );
    }
    assert_eq!(world.blight().node_count(), 1);
}

// ============================================================================
// Render pass
// ============================================================================

#[test]
fn test_render_is_a_pure_read() {
    let mut world = seeded_world(17);
    world.tick();
    let ticks = world.tick_count();
    let plants = world.plants().len();

    let mut surface = CountingSurface::default();
    world.render(&mut surface);

    assert_eq!(world.tick_count(), ticks);
    assert_eq!(world.plants().len(), plants);
    // Every field cell plus entities got painted
    let cells = world.field().cols() * world.field().rows();
    assert_eq!(surface.rects, cells);
    assert!(surface.circles > 0);
    assert!(surface.polygons > 0);
}

#[test]
fn test_overlay_toggle_controls_stat_text() {
    let mut world = seeded_world(19);
    world.tick();

    // Overlay starts on: prey stat text present
    let mut with_overlay = CountingSurface::default();
    world.render(&mut with_overlay);
    assert!(with_overlay.texts > 0);

    world.toggle_debug_overlay();
    let mut without_overlay = CountingSurface::default();
    world.render(&mut without_overlay);
    assert_eq!(without_overlay.texts, 0);
}
