//! Prey creatures: behavior state machine, peer avoidance, infection

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tarn_wave::WaveField;

use crate::body::Bounds;
use crate::creature::{Creature, MAX_ENERGY};
use crate::feelers::Feelers;
use crate::outline::Outline;
use crate::types::EntityId;

/// Farthest a plant can be and still be picked as a hunting target
const PLANT_DETECTION_RADIUS: f32 = 150.0;
/// Distance to a blight node at which an uninfected prey is infected
pub const INFECTION_RADIUS: f32 = 3.0;
/// Scale of the inverse-distance repulsion between peers
const PEER_AVOIDANCE_FORCE: f32 = 1.5;
/// Decorative infection markers accumulate up to this cap; reaching it is fatal
pub const MAX_MARKERS: usize = 20;
/// Infected ticks between new markers
const MARKER_INTERVAL: u32 = 10;
/// Infected ticks between blight nodes seeded at the prey's position
const NODE_SPAWN_INTERVAL: u32 = 10;
/// Ticks between the prey's stronger wave emissions
const WAVE_INTERVAL: u32 = 10;
/// Half-range of the wander heading jitter per tick
const WANDER_JITTER: f32 = 0.5;
/// Magnitude of the wander steering force
const WANDER_FORCE: f32 = 0.5;
/// Per-tick chance that a wandering prey starts hunting anyway
const HUNT_CHANCE: f64 = 0.05;
/// Energy fraction under which hunting becomes mandatory
const HUNGER_FRACTION: f32 = 0.3;
/// Energy fraction of the maximum restored by eating a plant
const EAT_ENERGY_FRACTION: f32 = 0.2;
/// Fraction of the remaining angle difference applied per tick
const ROTATION_RATE: f32 = 0.05;
/// Speed multiplier while actively avoiding peers
const AVOIDANCE_SPEED_BOOST: f32 = 1.2;
/// Prey feelers reach farther than the creature default
const FEELER_LENGTH: f32 = 120.0;

/// Behavior states. Fleeing and Avoiding are reserved extension points that
/// currently fold straight back into Wandering; they are kept as documented
/// no-op states rather than given invented behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Wandering,
    Hunting,
    Fleeing,
    Avoiding,
}

/// Decorative infection marker, positioned relative to the body (unit-disc
/// offset, scaled by half the body size when drawn).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InfectionMarker {
    pub offset: Vec2,
    pub size: f32,
}

impl InfectionMarker {
    fn random<R: Rng>(rng: &mut R) -> Self {
        let r = rng.random::<f32>() * 0.9;
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        Self {
            offset: Vec2::new(r * theta.cos(), r * theta.sin()),
            size: 2.0 + rng.random::<f32>() * 4.0,
        }
    }
}

/// Read-only view of a live peer, rebuilt by the orchestrator every tick.
#[derive(Debug, Clone, Copy)]
pub struct PeerView {
    pub id: EntityId,
    pub position: Vec2,
    pub size: i32,
}

/// Read-only view of a live, not-yet-eaten plant for this tick.
#[derive(Debug, Clone)]
pub struct PlantView {
    pub id: EntityId,
    pub position: Vec2,
    pub size: i32,
    pub outline: Outline,
}

/// Side effects of one prey update that cross component boundaries and are
/// applied by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct PreyActions {
    /// Plant this prey ate; the orchestrator marks it dead and removes it.
    pub ate_plant: Option<EntityId>,
    /// Infected prey periodically seed the blight at their own position.
    pub spawn_node_at: Option<Vec2>,
}

/// A mobile grazer. Wanders, hunts plants when hungry, avoids its peers,
/// and couples back into the blight network when infected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    pub creature: Creature,
    pub behavior: Behavior,
    pub markers: Vec<InfectionMarker>,
    target: Option<EntityId>,
    wander_angle: f32,
    target_heading: f32,
    wave_timer: u32,
    infection_ticks: u32,
    node_spawn_countdown: u32,
}

impl Prey {
    pub fn new(position: Vec2, size: i32, speed: f32) -> Self {
        let mut creature = Creature::new(position, size, speed);
        creature.feelers = Feelers::new(FEELER_LENGTH, std::f32::consts::FRAC_PI_4);
        Self {
            creature,
            behavior: Behavior::Wandering,
            markers: Vec::new(),
            target: None,
            wander_angle: 0.0,
            target_heading: 0.0,
            wave_timer: 0,
            infection_ticks: 0,
            node_spawn_countdown: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.creature.body.id
    }

    pub fn is_alive(&self) -> bool {
        self.creature.body.alive
    }

    /// Current hunting target, if any. Re-validated against the live plant
    /// views on every update; never an owning reference.
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// One tick: infection effects, behavior dispatch, peer avoidance,
    /// periodic wave, base creature step, heading smoothing.
    pub fn update<R: Rng>(
        &mut self,
        field: &mut WaveField,
        bounds: &Bounds,
        peers: &[PeerView],
        plants: &[PlantView],
        rng: &mut R,
    ) -> PreyActions {
        let mut actions = PreyActions::default();
        if !self.is_alive() {
            return actions;
        }

        if self.creature.infected {
            self.update_infection(&mut actions, rng);
        }

        match self.behavior {
            Behavior::Wandering => self.wander(rng),
            Behavior::Hunting => self.hunt(plants, &mut actions),
            Behavior::Fleeing | Behavior::Avoiding => {
                // Reserved states: fold back into wandering
                self.behavior = Behavior::Wandering;
            }
        }

        self.avoid_peers(peers);

        self.wave_timer += 1;
        if self.wave_timer >= WAVE_INTERVAL {
            field.disturb(self.creature.body.position.x, self.creature.body.position.y, 2);
            self.wave_timer = 0;
        }

        let previous_heading = self.creature.heading;
        self.creature.update(field, bounds);
        self.creature.heading = smooth_heading(previous_heading, self.target_heading);

        actions
    }

    fn update_infection<R: Rng>(&mut self, actions: &mut PreyActions, rng: &mut R) {
        self.infection_ticks += 1;

        if self.infection_ticks % MARKER_INTERVAL == 0 && self.markers.len() < MAX_MARKERS {
            self.markers.push(InfectionMarker::random(rng));
        }
        if self.markers.len() >= MAX_MARKERS {
            // Fully overgrown: the sickness countdown is forced to zero and
            // the next countdown step is fatal
            self.creature.sick_countdown = 0;
        }

        self.node_spawn_countdown += 1;
        if self.node_spawn_countdown >= NODE_SPAWN_INTERVAL {
            actions.spawn_node_at = Some(self.creature.body.position);
            self.node_spawn_countdown = 0;
        }

        // An infected prey needs energy to outlast the infection
        if self.behavior != Behavior::Hunting && self.target.is_none() {
            self.behavior = Behavior::Hunting;
        }
    }

    fn wander<R: Rng>(&mut self, rng: &mut R) {
        self.wander_angle += (rng.random::<f32>() - 0.5) * WANDER_JITTER;
        let mut velocity =
            self.creature.body.velocity + Vec2::from_angle(self.wander_angle) * WANDER_FORCE;
        velocity = velocity.clamp_length_max(self.creature.speed);
        self.creature.body.velocity = velocity;
        self.target_heading = velocity.y.atan2(velocity.x);

        if rng.random_bool(HUNT_CHANCE) || self.creature.energy < MAX_ENERGY * HUNGER_FRACTION {
            self.behavior = Behavior::Hunting;
        }
    }

    fn hunt(&mut self, plants: &[PlantView], actions: &mut PreyActions) {
        if plants.is_empty() {
            self.target = None;
            self.behavior = Behavior::Wandering;
            return;
        }

        // Re-validate the weak target reference against this tick's views
        if let Some(id) = self.target {
            if !plants.iter().any(|p| p.id == id) {
                self.target = None;
            }
        }

        if self.target.is_none() {
            self.target = self.select_target(plants);
        }

        let Some(view) = self
            .target
            .and_then(|id| plants.iter().find(|p| p.id == id))
        else {
            self.target = None;
            self.behavior = Behavior::Wandering;
            return;
        };

        if self.outline().intersects(&view.outline) {
            self.eat(view.id, actions);
        } else {
            let direction =
                (view.position - self.creature.body.position).normalize_or_zero();
            self.creature.body.velocity = direction * self.creature.speed;
            self.target_heading = direction.y.atan2(direction.x);
        }
    }

    /// A feeler hit locks immediately; otherwise the nearest plant within
    /// the detection radius.
    fn select_target(&self, plants: &[PlantView]) -> Option<EntityId> {
        for plant in plants {
            if self.creature.detects(plant.position, plant.size) {
                return Some(plant.id);
            }
        }
        plants
            .iter()
            .map(|p| (p.id, self.creature.body.position.distance(p.position)))
            .filter(|(_, d)| *d < PLANT_DETECTION_RADIUS)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }

    fn eat(&mut self, plant: EntityId, actions: &mut PreyActions) {
        actions.ate_plant = Some(plant);
        if self.creature.infected {
            self.creature.heal();
            self.markers.clear();
            self.infection_ticks = 0;
        }
        self.creature.energy =
            (self.creature.energy + MAX_ENERGY * EAT_ENERGY_FRACTION).min(MAX_ENERGY);
        self.target = None;
        self.behavior = Behavior::Wandering;
        log::debug!("prey {} ate plant {}", self.id(), plant);
    }

    /// Inverse-distance repulsion from every feeler-detected peer. Any
    /// repulsion this tick also buys a temporary speed boost.
    fn avoid_peers(&mut self, peers: &[PeerView]) {
        let mut force = Vec2::ZERO;
        let mut repelled = false;

        for peer in peers {
            if peer.id == self.id() {
                continue;
            }
            if self.creature.detects(peer.position, peer.size) {
                let away = self.creature.body.position - peer.position;
                let distance = away.length().max(0.1);
                force += away.normalize_or_zero() * (PEER_AVOIDANCE_FORCE / distance);
                repelled = true;
            }
        }

        if repelled {
            let velocity = (self.creature.body.velocity + force)
                .clamp_length_max(self.creature.speed);
            self.creature.body.velocity = velocity;
            self.target_heading = velocity.y.atan2(velocity.x);
            self.creature.speed = self.creature.base_speed * AVOIDANCE_SPEED_BOOST;
        } else {
            self.creature.speed = self.creature.base_speed;
        }
    }

    /// Infection entry point, called by the orchestrator on blight-node
    /// proximity. Restarts the marker ring with a single marker.
    pub fn infect<R: Rng>(&mut self, rng: &mut R) {
        if self.creature.infected || !self.is_alive() {
            return;
        }
        self.creature.infect();
        self.infection_ticks = 0;
        self.node_spawn_countdown = 0;
        self.markers.clear();
        self.markers.push(InfectionMarker::random(rng));
        log::info!("prey {} infected by the blight", self.id());
    }

    /// Collision silhouette: a single body circle.
    pub fn outline(&self) -> Outline {
        let mut outline = Outline::new();
        outline.push_circle(
            self.creature.body.position,
            self.creature.body.size as f32 / 2.0,
        );
        outline
    }
}

/// Interpolate `current` toward `target` by a fixed fraction, normalizing
/// the difference into (-pi, pi] first so headings never spin the long way
/// around.
pub fn smooth_heading(current: f32, target: f32) -> f32 {
    use std::f32::consts::PI;
    let mut diff = target - current;
    while diff > PI {
        diff -= 2.0 * PI;
    }
    while diff < -PI {
        diff += 2.0 * PI;
    }
    if diff.abs() > 0.01 {
        current + diff * ROTATION_RATE
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn setup() -> (WaveField, Bounds, Xoshiro256StarStar) {
        (
            WaveField::new(700, 490, 7),
            Bounds::new(700.0, 490.0, 50.0),
            Xoshiro256StarStar::seed_from_u64(42),
        )
    }

    fn plant_view(position: Vec2, size: i32) -> PlantView {
        let mut outline = Outline::new();
        outline.push_circle(position, size as f32 / 3.0);
        PlantView {
            id: EntityId::new(),
            position,
            size,
            outline,
        }
    }

    #[test]
    fn test_hungry_prey_hunts_within_one_tick() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.creature.energy = MAX_ENERGY * 0.25;
        assert_eq!(prey.behavior, Behavior::Wandering);
        prey.update(&mut field, &bounds, &[], &[], &mut rng);
        assert_eq!(prey.behavior, Behavior::Hunting);
    }

    #[test]
    fn test_hunting_without_plants_reverts_to_wandering() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.behavior = Behavior::Hunting;
        prey.update(&mut field, &bounds, &[], &[], &mut rng);
        assert_eq!(prey.behavior, Behavior::Wandering);
    }

    #[test]
    fn test_eating_restores_energy_and_reports_the_meal() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.creature.energy = 50.0;
        prey.behavior = Behavior::Hunting;
        let view = plant_view(Vec2::new(352.0, 245.0), 24);
        let actions = prey.update(&mut field, &bounds, &[], &[view.clone()], &mut rng);
        assert_eq!(actions.ate_plant, Some(view.id));
        assert!(prey.creature.energy > 50.0);
        assert_eq!(prey.behavior, Behavior::Wandering);
        assert_eq!(prey.target(), None);
    }

    #[test]
    fn test_eating_heals_infection() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.infect(&mut rng);
        assert!(prey.creature.infected);
        prey.behavior = Behavior::Hunting;
        let view = plant_view(Vec2::new(352.0, 245.0), 24);
        prey.update(&mut field, &bounds, &[], &[view], &mut rng);
        assert!(!prey.creature.infected);
        assert!(prey.markers.is_empty());
    }

    #[test]
    fn test_hunting_steers_toward_distant_plant() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.behavior = Behavior::Hunting;
        let view = plant_view(Vec2::new(450.0, 245.0), 24);
        prey.update(&mut field, &bounds, &[], &[view.clone()], &mut rng);
        assert_eq!(prey.target(), Some(view.id));
        assert!(prey.creature.body.velocity.x > 0.0);
    }

    #[test]
    fn test_plants_out_of_detection_range_are_ignored() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(100.0, 245.0), 30, 2.0);
        prey.creature.body.velocity = Vec2::new(0.0, 1.0);
        prey.behavior = Behavior::Hunting;
        // Behind the prey and outside the 150 px radius
        let view = plant_view(Vec2::new(600.0, 245.0), 24);
        prey.update(&mut field, &bounds, &[], &[view], &mut rng);
        assert_eq!(prey.target(), None);
        assert_eq!(prey.behavior, Behavior::Wandering);
    }

    #[test]
    fn test_peer_avoidance_boosts_speed() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.creature.body.velocity = Vec2::new(2.0, 0.0);
        let peer = PeerView {
            id: EntityId::new(),
            position: Vec2::new(380.0, 245.0),
            size: 30,
        };
        prey.update(&mut field, &bounds, &[peer], &[], &mut rng);
        assert!((prey.creature.speed - 2.0 * AVOIDANCE_SPEED_BOOST).abs() < 1e-5);

        // No peers next tick: speed reverts to baseline
        prey.update(&mut field, &bounds, &[], &[], &mut rng);
        assert!((prey.creature.speed - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_infected_prey_seeds_nodes() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.infect(&mut rng);
        let mut seeded = 0;
        for _ in 0..NODE_SPAWN_INTERVAL * 3 {
            let actions = prey.update(&mut field, &bounds, &[], &[], &mut rng);
            if actions.spawn_node_at.is_some() {
                seeded += 1;
            }
        }
        assert_eq!(seeded, 3);
    }

    #[test]
    fn test_marker_cap_is_fatal() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.infect(&mut rng);
        while prey.markers.len() < MAX_MARKERS {
            prey.markers.push(InfectionMarker::random(&mut rng));
        }
        prey.update(&mut field, &bounds, &[], &[], &mut rng);
        assert_eq!(prey.creature.sick_countdown, 0);
        assert!(!prey.is_alive());
    }

    #[test]
    fn test_infection_is_idempotent() {
        let (mut field, bounds, mut rng) = setup();
        let mut prey = Prey::new(Vec2::new(350.0, 245.0), 30, 2.0);
        prey.infect(&mut rng);
        let countdown = prey.creature.sick_countdown;
        prey.update(&mut field, &bounds, &[], &[], &mut rng);
        prey.infect(&mut rng);
        // Re-infection does not reset the countdown or the marker ring
        assert!(prey.creature.sick_countdown < countdown);
    }

    #[test]
    fn test_smooth_heading_wraps_around_pi() {
        use std::f32::consts::PI;
        // Just past pi on either side: the short way crosses the seam
        let next = smooth_heading(PI - 0.1, -PI + 0.1);
        assert!(next > PI - 0.1);
        let next = smooth_heading(-PI + 0.1, PI - 0.1);
        assert!(next < -PI + 0.1);
    }

    #[test]
    fn test_smooth_heading_converges() {
        let mut heading = 0.0;
        for _ in 0..400 {
            heading = smooth_heading(heading, 1.0);
        }
        assert!((heading - 1.0).abs() < 0.02);
    }
}
