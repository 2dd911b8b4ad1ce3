//! Line-clear particle burst.
//!
//! Purely cosmetic. Positions and velocities are in board pixels where one
//! cell is [`CELL_PX`] pixels square; the view scales them to terminal cells.
//! The field advances one step per rendered frame.

use crate::core::board::COLS;
use crate::core::{GameSnapshot, SimpleRng};

/// Board pixels per cell.
pub const CELL_PX: f32 = 30.0;

/// Particles spawned per cleared cell.
pub const PARTICLES_PER_CELL: usize = 10;

/// Downward acceleration per step.
pub const PARTICLE_GRAVITY: f32 = 0.2;

/// Starting life; a particle disappears once life reaches 0.
pub const PARTICLE_LIFE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: f32,
    pub decay: f32,
    /// Piece color index (`1..=7`).
    pub color: u8,
}

impl Particle {
    fn step(&mut self) {
        self.vy += PARTICLE_GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.life -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    rng: SimpleRng,
}

impl ParticleField {
    pub fn new(seed: u32) -> Self {
        Self {
            particles: Vec::new(),
            rng: SimpleRng::new(seed),
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

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Burst every filled cell of one board row. `0` entries are skipped.
    pub fn burst_row(&mut self, row: u8, colors: &[u8; COLS]) {
        let cy = row as f32 * CELL_PX + CELL_PX / 2.0;
        for (x, &color) in colors.iter().enumerate() {
            if color == 0 {
                continue;
            }
            let cx = x as f32 * CELL_PX + CELL_PX / 2.0;
            for _ in 0..PARTICLES_PER_CELL {
                let particle = Particle {
                    x: cx,
                    y: cy,
                    vx: self.rng.next_f32() * 6.0 - 3.0,
                    vy: -(self.rng.next_f32() * 15.0 + 5.0),
                    size: self.rng.next_f32() * 6.0 + 2.0,
                    life: PARTICLE_LIFE,
                    decay: self.rng.next_f32() * 0.5 + 0.5,
                    color,
                };
                self.particles.push(particle);
            }
        }
    }

    /// Burst the rows a lock just cleared.
    ///
    /// `before` is a snapshot taken before the input or tick that locked the
    /// piece: cleared cells are either locked cells in it, or belong to its
    /// active piece.
    pub fn burst_cleared(&mut self, before: &GameSnapshot, rows: &[u8]) {
        let active_color = before.active.map(|a| a.color_index()).unwrap_or(0);
        for &row in rows {
            let Some(locked) = before.board.get(row as usize) else {
                continue;
            };
            let mut colors = *locked;
            for c in colors.iter_mut().filter(|c| **c == 0) {
                *c = active_color;
            }
            self.burst_row(row, &colors);
        }
    }

    /// Advance every particle one frame and drop the dead ones.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.step();
        }
        self.particles.retain(Particle::is_alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_ten_per_filled_cell() {
        let mut field = ParticleField::new(1);
        let mut colors = [0u8; COLS];
        colors[0] = 1;
        colors[3] = 4;
        field.burst_row(19, &colors);
        assert_eq!(field.len(), 2 * PARTICLES_PER_CELL);
        assert!(field.particles().iter().all(|p| p.vy <= -5.0 && p.vy >= -20.0));
        assert!(field.particles().iter().all(|p| (2.0..=8.0).contains(&p.size)));
    }

    #[test]
    fn particles_fall_back_and_expire() {
        let mut field = ParticleField::new(3);
        field.burst_row(10, &[2u8; COLS]);
        let start_vy = field.particles()[0].vy;
        field.step();
        assert!((field.particles()[0].vy - (start_vy + PARTICLE_GRAVITY)).abs() < 1e-4);

        // Decay is at least 0.5 per step, so 200 steps exhaust any particle.
        for _ in 0..200 {
            field.step();
        }
        assert!(field.is_empty());
    }

    #[test]
    fn cleared_row_uses_active_piece_color_for_gaps() {
        use crate::core::ActiveSnapshot;
        use crate::core::Shape;
        use crate::types::PieceKind;

        let mut before = GameSnapshot::default();
        for x in 4..COLS {
            before.board[19][x] = 7;
        }
        before.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            shape: Shape::spawn(PieceKind::I),
            x: 0,
            y: 0,
        });

        let mut field = ParticleField::new(5);
        field.burst_cleared(&before, &[19]);
        assert_eq!(field.len(), COLS * PARTICLES_PER_CELL);
        let cyan = field.particles().iter().filter(|p| p.color == 1).count();
        assert_eq!(cyan, 4 * PARTICLES_PER_CELL);
    }
}
