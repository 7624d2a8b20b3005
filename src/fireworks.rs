//! Celebratory fireworks overlay. Purely cosmetic: the driver launches a
//! volley when the score crosses a multiple of ten, and the particles fade
//! out on their own.

use std::f64::consts::TAU;

use rand::Rng;

use crate::render::{PixelBuf, Rgb};

const BURSTS: usize = 20;
const PARTICLES_PER_BURST: usize = 30;
const PARTICLE_GRAVITY: f64 = 0.1;
const FADE_PER_TICK: f64 = 0.01;

const PALETTE: [Rgb; 5] = [
    Rgb(0xff, 0xd7, 0x00), // gold
    Rgb(0xff, 0x6b, 0x6b), // coral
    Rgb(0x4e, 0xcd, 0xc4), // teal
    Rgb(0x45, 0xb7, 0xd1), // sky
    Rgb(0xff, 0xa0, 0x7a), // salmon
];

struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    /// Remaining life in (0, 1]; doubles as draw alpha.
    life: f64,
    color: Rgb,
}

#[derive(Default)]
pub struct Fireworks {
    particles: Vec<Particle>,
}

impl Fireworks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Fire a full volley: ring bursts at random points over the given
    /// pixel area.
    pub fn launch(&mut self, w: f64, h: f64, rng: &mut impl Rng) {
        for _ in 0..BURSTS {
            let cx = rng.gen_range(0.0..w.max(1.0));
            let cy = rng.gen_range(0.0..h.max(1.0));
            for i in 0..PARTICLES_PER_BURST {
                let angle = TAU * i as f64 / PARTICLES_PER_BURST as f64;
                let speed = 2.0 + rng.gen_range(0.0..3.0);
                self.particles.push(Particle {
                    x: cx,
                    y: cy,
                    vx: angle.cos() * speed,
                    vy: angle.sin() * speed,
                    life: 1.0,
                    color: PALETTE[rng.gen_range(0..PALETTE.len())],
                });
            }
        }
    }

    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += PARTICLE_GRAVITY;
            p.life -= FADE_PER_TICK;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Alpha-blend the particles over an already-drawn frame.
    pub fn draw(&self, buf: &mut PixelBuf) {
        for p in &self.particles {
            let alpha = (p.life * 256.0) as u16;
            let x = p.x.round() as i32;
            let y = p.y.round() as i32;
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                buf.blend(x + dx, y + dy, p.color, alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn launch_spawns_a_full_volley() {
        let mut fw = Fireworks::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!fw.is_active());
        fw.launch(200.0, 100.0, &mut rng);
        assert_eq!(fw.particles.len(), BURSTS * PARTICLES_PER_BURST);
        assert!(fw.is_active());
    }

    #[test]
    fn particles_fall_and_fade() {
        let mut fw = Fireworks::new();
        let mut rng = StdRng::seed_from_u64(3);
        fw.launch(200.0, 100.0, &mut rng);
        let vy_before = fw.particles[0].vy;
        fw.update();
        let p = &fw.particles[0];
        assert!((p.vy - (vy_before + PARTICLE_GRAVITY)).abs() < 1e-9);
        assert!((p.life - (1.0 - FADE_PER_TICK)).abs() < 1e-9);
    }

    #[test]
    fn volley_burns_out() {
        let mut fw = Fireworks::new();
        let mut rng = StdRng::seed_from_u64(3);
        fw.launch(200.0, 100.0, &mut rng);
        for _ in 0..101 {
            fw.update();
        }
        assert!(!fw.is_active());
    }

    #[test]
    fn draw_clips_offscreen_particles() {
        let mut fw = Fireworks::new();
        let mut rng = StdRng::seed_from_u64(3);
        fw.launch(200.0, 100.0, &mut rng);
        for _ in 0..50 {
            fw.update();
        }
        let mut buf = PixelBuf::new(10, 10);
        fw.draw(&mut buf); // most particles are far outside the buffer
    }

    #[test]
    fn launch_with_zero_area_does_not_panic() {
        let mut fw = Fireworks::new();
        let mut rng = StdRng::seed_from_u64(3);
        fw.launch(0.0, 0.0, &mut rng);
        assert!(fw.is_active());
    }
}
