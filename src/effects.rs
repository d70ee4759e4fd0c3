use egui::{Align2, Color32, FontId, Painter, Pos2, Rect};
use rand::Rng;

/// Seconds between flake spawns.
pub const SPAWN_INTERVAL: f32 = 0.2;
/// Every flake self-removes after this many seconds, whatever else happens.
pub const FLAKE_LIFETIME: f32 = 8.0;

#[derive(Debug, Clone)]
struct Snowflake {
    /// Horizontal position as a fraction of the view width.
    x: f32,
    size: f32,
    opacity: f32,
    /// Seconds to fall the full view height.
    fall_secs: f32,
    age: f32,
}

/// Ambient snow for the home and viewer screens. Spawns on a fixed interval
/// and runs independently of the editing session.
#[derive(Default)]
pub struct Snowfield {
    flakes: Vec<Snowflake>,
    since_spawn: f32,
}

impl Snowfield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, dt: f32) {
        let mut rng = rand::rng();
        self.since_spawn += dt;
        while self.since_spawn >= SPAWN_INTERVAL {
            self.since_spawn -= SPAWN_INTERVAL;
            self.flakes.push(Snowflake {
                x: rng.random_range(0.0..1.0),
                size: rng.random_range(10.0..20.0),
                opacity: rng.random_range(0.0..1.0),
                fall_secs: rng.random_range(5.0..8.0),
                age: 0.0,
            });
        }
        for flake in &mut self.flakes {
            flake.age += dt;
        }
        self.flakes.retain(|f| f.age < FLAKE_LIFETIME);
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) {
        for flake in &self.flakes {
            let progress = (flake.age / flake.fall_secs).min(1.0);
            let pos = Pos2::new(
                rect.min.x + flake.x * rect.width(),
                rect.min.y + progress * rect.height(),
            );
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                "❄",
                FontId::proportional(flake.size),
                Color32::WHITE.gamma_multiply(flake.opacity),
            );
        }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }
}
