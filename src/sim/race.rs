//! Rolling-without-slipping race down a ramp
//!
//! For a rigid body with inertia ratio `k = I / (m r^2)` released from rest,
//! the rolling constraint gives `a = g sin(theta) / (1 + k)`. Mass and
//! radius cancel, so the finish order depends only on the shape type; each
//! participant's own `I = k m r^2` is computed purely for display.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_RACERS;

/// Canonical rigid-body shape types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    SolidSphere,
    SolidCylinder,
    HollowCylinder,
    HollowSphere,
}

impl BodyKind {
    /// Every kind, in the order new participants cycle through them
    pub const ALL: [BodyKind; 4] = [
        BodyKind::SolidSphere,
        BodyKind::SolidCylinder,
        BodyKind::HollowCylinder,
        BodyKind::HollowSphere,
    ];

    /// Inertia ratio k = I / (m r^2)
    pub fn inertia_ratio(&self) -> f64 {
        match self {
            BodyKind::SolidSphere => 2.0 / 5.0,
            BodyKind::SolidCylinder => 1.0 / 2.0,
            BodyKind::HollowCylinder => 1.0,
            BodyKind::HollowSphere => 2.0 / 3.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::SolidSphere => "Solid sphere",
            BodyKind::SolidCylinder => "Solid cylinder",
            BodyKind::HollowCylinder => "Hollow cylinder (hoop)",
            BodyKind::HollowSphere => "Hollow sphere",
        }
    }

    /// Identifier used as the `<select>` option value
    pub fn key(&self) -> &'static str {
        match self {
            BodyKind::SolidSphere => "solidSphere",
            BodyKind::SolidCylinder => "solidCylinder",
            BodyKind::HollowCylinder => "hollowCylinder",
            BodyKind::HollowSphere => "hollowSphere",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        BodyKind::ALL.into_iter().find(|k| k.key() == key)
    }
}

/// Ramp shared by every participant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampConfig {
    /// Ramp length along the slope (m)
    pub length: f64,
    /// Incline above horizontal (degrees)
    pub angle_degrees: f64,
    /// Gravitational acceleration (m/s^2)
    pub gravity: f64,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            length: 3.0,
            angle_degrees: 15.0,
            gravity: 9.81,
        }
    }
}

impl RampConfig {
    pub fn angle_radians(&self) -> f64 {
        self.angle_degrees.to_radians()
    }

    /// Height dropped over the full ramp length (display quantity)
    pub fn vertical_drop(&self) -> f64 {
        self.length * self.angle_radians().sin()
    }
}

/// One competing body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: u32,
    pub name: String,
    pub kind: BodyKind,
    /// Body radius (m); display only, cancels out of the race
    pub radius: f64,
    /// Body mass (kg); display only, cancels out of the race
    pub mass: f64,
}

impl Participant {
    /// Moment of inertia about the rolling axis, I = k m r^2 (kg m^2)
    pub fn moment_of_inertia(&self) -> f64 {
        self.kind.inertia_ratio() * self.mass * self.radius * self.radius
    }
}

/// Closed-form race result for one participant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceMetrics {
    pub participant_id: u32,
    /// Constant acceleration down the slope (m/s^2)
    pub acceleration: f64,
    /// Time to cover the full ramp from rest (s)
    pub finish_time: f64,
    /// Speed at the finish line (m/s)
    pub final_velocity: f64,
}

/// Kinematics for one body kind on the given ramp
///
/// `None` for a non-positive incline (sin(theta) <= 0) or when the
/// acceleration comes out non-finite or non-positive; the caller drops the
/// entry rather than failing the whole board.
pub fn race_metrics(participant: &Participant, ramp: &RampConfig) -> Option<RaceMetrics> {
    let sin_theta = ramp.angle_radians().sin();
    if sin_theta <= 0.0 {
        return None;
    }

    let acceleration = ramp.gravity * sin_theta / (1.0 + participant.kind.inertia_ratio());
    if !acceleration.is_finite() || acceleration <= 0.0 {
        return None;
    }

    let finish_time = (2.0 * ramp.length / acceleration).sqrt();
    Some(RaceMetrics {
        participant_id: participant.id,
        acceleration,
        finish_time,
        final_velocity: acceleration * finish_time,
    })
}

/// Fraction of the ramp covered after `elapsed` seconds, clamped at the finish
pub fn fraction_along_ramp(acceleration: f64, elapsed: f64, ramp_length: f64) -> f64 {
    let distance = 0.5 * acceleration * elapsed * elapsed;
    (distance / ramp_length).min(1.0)
}

/// The race board: ramp, participants, and derived standings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Race {
    pub ramp: RampConfig,
    pub participants: Vec<Participant>,
    next_id: u32,
}

impl Race {
    pub fn new() -> Self {
        Self {
            ramp: RampConfig::default(),
            participants: Vec::new(),
            next_id: 1,
        }
    }

    fn next_participant_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a participant, cycling the default shape type per slot
    pub fn add_participant(&mut self, name: Option<String>, kind: Option<BodyKind>) -> u32 {
        let id = self.next_participant_id();
        let kind = kind.unwrap_or(BodyKind::ALL[self.participants.len() % BodyKind::ALL.len()]);
        self.participants.push(Participant {
            id,
            name: name.unwrap_or_else(|| format!("Object {id}")),
            kind,
            radius: 0.12,
            mass: 1.5,
        });
        id
    }

    /// Remove by id; at least one participant always remains
    pub fn remove_participant(&mut self, id: u32) -> bool {
        if self.participants.len() <= 1 {
            return false;
        }
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    pub fn participant(&self, id: u32) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: u32) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Valid entries sorted ascending by finish time
    ///
    /// Participants with no result on the current ramp are dropped, not
    /// treated as errors.
    pub fn standings(&self) -> Vec<RaceMetrics> {
        let mut entries: Vec<RaceMetrics> = self
            .participants
            .iter()
            .filter_map(|p| race_metrics(p, &self.ramp))
            .collect();
        entries.sort_by(|a, b| a.finish_time.total_cmp(&b.finish_time));
        entries
    }

    /// Slowest finisher's time; the animation runs until then
    pub fn max_finish_time(&self) -> f64 {
        self.standings()
            .iter()
            .map(|m| m.finish_time)
            .fold(0.0, f64::max)
    }

    /// A race needs at least two bodies with valid metrics
    pub fn can_race(&self) -> bool {
        self.standings().len() >= MIN_RACERS
    }

    /// Participant furthest down the ramp at `elapsed` seconds
    pub fn leader_at(&self, elapsed: f64) -> Option<&Participant> {
        let mut best: Option<(f64, u32)> = None;
        for metrics in self.standings() {
            let frac = fraction_along_ramp(metrics.acceleration, elapsed, self.ramp.length);
            if best.is_none_or(|(f, _)| frac > f) {
                best = Some((frac, metrics.participant_id));
            }
        }
        best.and_then(|(_, id)| self.participant(id))
    }

    /// First across the line once everyone has finished
    pub fn winner(&self) -> Option<&Participant> {
        self.standings()
            .first()
            .and_then(|m| self.participant(m.participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn racer(id: u32, kind: BodyKind, radius: f64, mass: f64) -> Participant {
        Participant {
            id,
            name: kind.label().to_string(),
            kind,
            radius,
            mass,
        }
    }

    #[test]
    fn test_inertia_ratios() {
        assert_eq!(BodyKind::SolidSphere.inertia_ratio(), 0.4);
        assert_eq!(BodyKind::SolidCylinder.inertia_ratio(), 0.5);
        assert_eq!(BodyKind::HollowCylinder.inertia_ratio(), 1.0);
        assert!((BodyKind::HollowSphere.inertia_ratio() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_moment_of_inertia_display() {
        let p = racer(1, BodyKind::HollowCylinder, 0.1, 2.0);
        assert!((p.moment_of_inertia() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_beats_hoop() {
        let ramp = RampConfig::default();
        let sphere = race_metrics(&racer(1, BodyKind::SolidSphere, 0.12, 1.5), &ramp).unwrap();
        let hoop = race_metrics(&racer(2, BodyKind::HollowCylinder, 0.12, 1.5), &ramp).unwrap();
        assert!(sphere.acceleration > hoop.acceleration);
        assert!(sphere.finish_time < hoop.finish_time);
    }

    #[test]
    fn test_invalid_angle_yields_no_metrics() {
        let ramp = RampConfig {
            angle_degrees: 0.0,
            ..RampConfig::default()
        };
        assert!(race_metrics(&racer(1, BodyKind::SolidSphere, 0.12, 1.5), &ramp).is_none());

        let ramp = RampConfig {
            angle_degrees: -10.0,
            ..RampConfig::default()
        };
        assert!(race_metrics(&racer(1, BodyKind::SolidSphere, 0.12, 1.5), &ramp).is_none());
    }

    #[test]
    fn test_fraction_clamps_at_finish() {
        assert_eq!(fraction_along_ramp(2.0, 0.0, 3.0), 0.0);
        assert_eq!(fraction_along_ramp(2.0, 100.0, 3.0), 1.0);
        let frac = fraction_along_ramp(2.0, 1.0, 3.0);
        assert!((frac - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_standings_sorted_and_filtered() {
        let mut race = Race::new();
        race.add_participant(None, Some(BodyKind::HollowCylinder));
        race.add_participant(None, Some(BodyKind::SolidSphere));
        race.add_participant(None, Some(BodyKind::HollowSphere));

        let standings = race.standings();
        assert_eq!(standings.len(), 3);
        assert!(standings[0].finish_time <= standings[1].finish_time);
        assert!(standings[1].finish_time <= standings[2].finish_time);
        // Sphere first, hoop last
        assert_eq!(standings[0].participant_id, 2);
        assert_eq!(standings[2].participant_id, 1);
        assert_eq!(race.winner().unwrap().id, 2);

        // Flatten the ramp: every entry drops, nothing panics
        race.ramp.angle_degrees = 0.0;
        assert!(race.standings().is_empty());
        assert!(!race.can_race());
    }

    #[test]
    fn test_remove_keeps_at_least_one() {
        let mut race = Race::new();
        let a = race.add_participant(None, None);
        let b = race.add_participant(None, None);
        assert!(race.remove_participant(a));
        assert!(!race.remove_participant(b));
        assert_eq!(race.participants.len(), 1);
    }

    #[test]
    fn test_default_kinds_cycle() {
        let mut race = Race::new();
        for _ in 0..5 {
            race.add_participant(None, None);
        }
        assert_eq!(race.participants[0].kind, BodyKind::SolidSphere);
        assert_eq!(race.participants[3].kind, BodyKind::HollowSphere);
        assert_eq!(race.participants[4].kind, BodyKind::SolidSphere);
    }

    #[test]
    fn test_leader_tracks_fastest() {
        let mut race = Race::new();
        race.add_participant(Some("hoop".into()), Some(BodyKind::HollowCylinder));
        race.add_participant(Some("sphere".into()), Some(BodyKind::SolidSphere));
        let leader = race.leader_at(0.5).unwrap();
        assert_eq!(leader.name, "sphere");
    }

    proptest! {
        #[test]
        fn prop_race_outcome_ignores_mass_and_radius(
            mass_a in 0.1..50.0f64,
            mass_b in 0.1..50.0f64,
            radius_a in 0.05..0.16f64,
            radius_b in 0.05..0.16f64,
        ) {
            let ramp = RampConfig::default();
            let a = race_metrics(&racer(1, BodyKind::SolidCylinder, radius_a, mass_a), &ramp).unwrap();
            let b = race_metrics(&racer(2, BodyKind::SolidCylinder, radius_b, mass_b), &ramp).unwrap();
            prop_assert!((a.finish_time - b.finish_time).abs() < 1e-12);
            prop_assert!((a.final_velocity - b.final_velocity).abs() < 1e-12);
        }

        #[test]
        fn prop_acceleration_decreasing_in_inertia_ratio(
            angle in 5.0..60.0f64,
            gravity in 1.0..25.0f64,
        ) {
            let ramp = RampConfig { length: 3.0, angle_degrees: angle, gravity };
            let mut last = f64::INFINITY;
            // ALL ordered by ratio: 2/5, 1/2, 2/3, 1
            for kind in [
                BodyKind::SolidSphere,
                BodyKind::SolidCylinder,
                BodyKind::HollowSphere,
                BodyKind::HollowCylinder,
            ] {
                let m = race_metrics(&racer(1, kind, 0.12, 1.5), &ramp).unwrap();
                prop_assert!(m.acceleration < last);
                last = m.acceleration;
            }
        }
    }
}
