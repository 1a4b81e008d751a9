// --- File: agent.rs ---
use crate::config::Boundary;
use crate::geometry::{clamp_position, limit_speed, normalize_or, wrap_position};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

// --- Core Data Structures ---

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    /// Rock blunts Scissors, Scissors cut Paper, Paper wraps Rock.
    #[inline]
    pub fn beats(self, other: Kind) -> bool {
        self.prey() == other
    }

    /// The kind this one defeats.
    pub fn prey(self) -> Kind {
        match self {
            Kind::Rock => Kind::Scissors,
            Kind::Scissors => Kind::Paper,
            Kind::Paper => Kind::Rock,
        }
    }

    /// The kind that defeats this one.
    pub fn predator(self) -> Kind {
        match self {
            Kind::Rock => Kind::Paper,
            Kind::Paper => Kind::Scissors,
            Kind::Scissors => Kind::Rock,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Rock => "Rock",
            Kind::Paper => "Paper",
            Kind::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Kind {
    type Error = KindParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Kind::Rock),
            1 => Ok(Kind::Paper),
            2 => Ok(Kind::Scissors),
            other => Err(KindParseError::OutOfRange(other)),
        }
    }
}

impl FromStr for Kind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Kind::Rock),
            "paper" | "p" => Ok(Kind::Paper),
            "scissors" | "scissor" | "s" => Ok(Kind::Scissors),
            _ => Err(KindParseError::Unknown(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindParseError {
    OutOfRange(u8),
    Unknown(String),
}

impl fmt::Display for KindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(v) => write!(f, "kind index {v} is not one of 0, 1, 2"),
            Self::Unknown(s) => write!(f, "unknown kind {s:?}"),
        }
    }
}

impl std::error::Error for KindParseError {}

/// Outcome of judging one contact between two agents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Tie,
    FirstWins,
    SecondWins,
}

impl Verdict {
    pub fn judge(first: Kind, second: Kind) -> Self {
        if first.beats(second) {
            Verdict::FirstWins
        } else if second.beats(first) {
            Verdict::SecondWins
        } else {
            Verdict::Tie
        }
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub kind: Kind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub alive: bool,
    // Simulated time of the last resolved fight
    pub last_interaction: Option<f32>,
}

impl Agent {
    pub fn new(kind: Kind, position: Vec2, radius: f32) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            radius,
            alive: true,
            last_interaction: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn beats(&self, other: &Agent) -> bool {
        self.kind.beats(other.kind)
    }

    /// Random-walk step: a fresh uniform heading and a fixed step length.
    pub fn walk<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        arena: Vec2,
        step_size: f32,
        boundary: Boundary,
    ) {
        if !self.alive {
            return;
        }
        let angle = rng.gen_range(0.0..TAU);
        self.position += Vec2::from_angle(angle) * step_size;
        self.position = match boundary {
            Boundary::Wrap => wrap_position(self.position, arena),
            Boundary::Clamp => clamp_position(self.position, Vec2::ZERO, arena),
        };
    }

    /// Physical step: jittered persistent velocity, speed limits, then
    /// integration with wall bounces (or wrapping on a torus).
    #[allow(clippy::too_many_arguments)]
    pub fn drift<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        arena: Vec2,
        min_speed: f32,
        max_speed: f32,
        jitter: f32,
        boundary: Boundary,
        dt: f32,
    ) {
        if !self.alive {
            return;
        }
        if jitter > 0.0 {
            self.velocity.x += rng.gen_range(-jitter..=jitter) * dt;
            self.velocity.y += rng.gen_range(-jitter..=jitter) * dt;
        }
        if self.velocity.length_squared() == 0.0 {
            let angle = rng.gen_range(0.0..TAU);
            self.velocity = Vec2::from_angle(angle) * min_speed;
        } else {
            self.velocity = limit_speed(self.velocity, min_speed, max_speed);
        }

        self.position += self.velocity * dt;

        match boundary {
            Boundary::Wrap => self.position = wrap_position(self.position, arena),
            Boundary::Clamp => self.bounce(arena),
        }
    }

    // Inelastic axis flip against walls inset by the agent radius
    fn bounce(&mut self, arena: Vec2) {
        let min = Vec2::splat(self.radius);
        let max = (arena - Vec2::splat(self.radius)).max(min);
        if self.position.x < min.x {
            self.position.x = min.x;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > max.x {
            self.position.x = max.x;
            self.velocity.x = -self.velocity.x.abs();
        }
        if self.position.y < min.y {
            self.position.y = min.y;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > max.y {
            self.position.y = max.y;
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    /// Off cooldown: never fought, or more than `cooldown` seconds since the
    /// last fight. A non-positive cooldown never blocks.
    #[inline]
    pub fn is_ready(&self, now: f32, cooldown: f32) -> bool {
        if cooldown <= 0.0 {
            return true;
        }
        match self.last_interaction {
            None => true,
            Some(last) => now - last > cooldown,
        }
    }

    #[inline]
    pub fn stamp(&mut self, now: f32) {
        self.last_interaction = Some(now);
    }

    /// Pushes two overlapping agents apart along the line between their
    /// centres by half the overlap plus `padding` each. `delta` points from
    /// `a` to `b`.
    pub fn separate(a: &mut Agent, b: &mut Agent, delta: Vec2, reach: f32, padding: f32) {
        let distance = delta.length();
        let direction = normalize_or(delta, Vec2::X);
        let push = (reach - distance).max(0.0) * 0.5 + padding;
        a.position -= direction * push;
        b.position += direction * push;
    }

    /// Brings the agent back inside the arena after an external nudge.
    pub fn confine(&mut self, arena: Vec2, boundary: Boundary, inset: f32) {
        self.position = match boundary {
            Boundary::Wrap => wrap_position(self.position, arena),
            Boundary::Clamp => {
                let min = Vec2::splat(inset);
                let max = (arena - min).max(min);
                clamp_position(self.position, min, max)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn beats_is_cyclic_and_total() {
        for a in Kind::ALL {
            for b in Kind::ALL {
                let outcomes = [a.beats(b), b.beats(a), a == b];
                assert_eq!(
                    outcomes.iter().filter(|o| **o).count(),
                    1,
                    "{a} vs {b}: {outcomes:?}"
                );
            }
        }
        assert!(Kind::Rock.beats(Kind::Scissors));
        assert!(Kind::Scissors.beats(Kind::Paper));
        assert!(Kind::Paper.beats(Kind::Rock));
    }

    #[test]
    fn predator_and_prey_are_inverse() {
        for k in Kind::ALL {
            assert_eq!(k.prey().predator(), k);
            assert!(k.predator().beats(k));
        }
    }

    #[test]
    fn verdict_orders_participants() {
        assert_eq!(Verdict::judge(Kind::Rock, Kind::Scissors), Verdict::FirstWins);
        assert_eq!(Verdict::judge(Kind::Rock, Kind::Paper), Verdict::SecondWins);
        assert_eq!(Verdict::judge(Kind::Paper, Kind::Paper), Verdict::Tie);

        let rock = Agent::new(Kind::Rock, Vec2::ZERO, 1.0);
        let scissors = Agent::new(Kind::Scissors, Vec2::ZERO, 1.0);
        assert!(rock.beats(&scissors) && !scissors.beats(&rock));
    }

    #[test]
    fn malformed_kinds_are_errors() {
        assert_eq!(Kind::try_from(2), Ok(Kind::Scissors));
        assert_eq!(Kind::try_from(3), Err(KindParseError::OutOfRange(3)));
        assert_eq!("Paper".parse::<Kind>(), Ok(Kind::Paper));
        assert!(matches!(
            "lizard".parse::<Kind>(),
            Err(KindParseError::Unknown(_))
        ));
    }

    #[test]
    fn walk_moves_exactly_one_step() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut agent = Agent::new(Kind::Rock, Vec2::new(50.0, 50.0), 1.0);
        agent.walk(&mut rng, Vec2::splat(100.0), 2.0, Boundary::Clamp);
        assert_relative_eq!(agent.position.distance(Vec2::new(50.0, 50.0)), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn dead_agents_stay_put() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut agent = Agent::new(Kind::Paper, Vec2::new(5.0, 5.0), 1.0);
        agent.alive = false;
        agent.walk(&mut rng, Vec2::splat(10.0), 1.0, Boundary::Wrap);
        agent.drift(&mut rng, Vec2::splat(10.0), 1.0, 2.0, 1.0, Boundary::Clamp, 0.1);
        assert_eq!(agent.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn drift_restarts_a_stopped_agent_at_min_speed() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(Kind::Scissors, Vec2::new(50.0, 50.0), 2.0);
        agent.drift(&mut rng, Vec2::splat(100.0), 3.0, 9.0, 0.0, Boundary::Clamp, 0.0);
        assert_relative_eq!(agent.velocity.length(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn drift_bounces_off_walls() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut agent =
            Agent::new(Kind::Rock, Vec2::new(97.0, 50.0), 2.0).with_velocity(Vec2::new(10.0, 0.0));
        agent.drift(&mut rng, Vec2::splat(100.0), 5.0, 20.0, 0.0, Boundary::Clamp, 1.0);
        assert_eq!(agent.position.x, 98.0);
        assert!(agent.velocity.x < 0.0);
        assert_relative_eq!(agent.velocity.length(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn drift_speed_is_limited() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut agent =
            Agent::new(Kind::Rock, Vec2::new(50.0, 50.0), 2.0).with_velocity(Vec2::new(0.0, 100.0));
        agent.drift(&mut rng, Vec2::splat(1000.0), 5.0, 20.0, 0.0, Boundary::Clamp, 0.1);
        assert_relative_eq!(agent.velocity.length(), 20.0, epsilon = 1e-4);
        assert_relative_eq!(agent.position.y, 52.0, epsilon = 1e-4);
    }

    #[test]
    fn cooldown_gate() {
        let mut agent = Agent::new(Kind::Rock, Vec2::ZERO, 1.0);
        assert!(agent.is_ready(0.0, 0.35));
        agent.stamp(1.0);
        assert!(!agent.is_ready(1.2, 0.35));
        assert!(!agent.is_ready(1.3, 0.35));
        assert!(agent.is_ready(1.4, 0.35));
        assert!(agent.is_ready(1.0, 0.0));
    }

    #[test]
    fn separation_clears_overlap() {
        let mut a = Agent::new(Kind::Rock, Vec2::new(10.0, 10.0), 5.0);
        let mut b = Agent::new(Kind::Paper, Vec2::new(14.0, 10.0), 5.0);
        let delta = b.position - a.position;
        Agent::separate(&mut a, &mut b, delta, 10.0, 1.0);
        assert_relative_eq!(a.position.x, 6.0, epsilon = 1e-5);
        assert_relative_eq!(b.position.x, 18.0, epsilon = 1e-5);
        assert!(a.position.distance(b.position) > 10.0);
    }
}

// --- End of File: agent.rs ---
