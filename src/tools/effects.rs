//! Transient visual effects with explicit millisecond lifetimes
//!
//! Particles, rings, floating texts, and cell flashes live in one arena per
//! owner. Each update integrates positions by the real `dt` and retains only
//! entries whose lifetime is still positive. No timers, no callbacks.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::renderer::{Color, Framebuffer, PxRect};
use crate::viewport::Viewport;

const DUST_COLOR: Color = [0xc8, 0xb4, 0x96, 0xff];
const IMPACT_COLOR: Color = [0x8b, 0x73, 0x55, 0xff];
const WARNING_COLOR: Color = [0xdc, 0x28, 0x28, 0xff];
const TEXT_COLOR: Color = [0xff, 0xe6, 0x96, 0xff];
const FLASH_COLOR: Color = [0xff, 0x32, 0x32, 0xff];

struct Particle {
    pos: Vec2,
    vel: Vec2,
    color: Color,
    life_ms: f32,
    max_life_ms: f32,
    size: f32,
}

struct Ring {
    center: Vec2,
    max_radius: f32,
    color: Color,
    /// Counts down before the ring starts expanding (staggered ripples).
    delay_ms: f32,
    life_ms: f32,
    max_life_ms: f32,
}

struct FloatingText {
    pos: Vec2,
    text: String,
    life_ms: f32,
    max_life_ms: f32,
}

struct CellFlash {
    cell: (i32, i32),
    life_ms: f32,
    max_life_ms: f32,
}

/// One owner's worth of transient effects.
pub struct EffectArena {
    particles: Vec<Particle>,
    rings: Vec<Ring>,
    texts: Vec<FloatingText>,
    flashes: Vec<CellFlash>,
    rng: Pcg32,
    max_particles: usize,
}

impl EffectArena {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            rings: Vec::new(),
            texts: Vec::new(),
            flashes: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_particles,
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.rings.clear();
        self.texts.clear();
        self.flashes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
            && self.rings.is_empty()
            && self.texts.is_empty()
            && self.flashes.is_empty()
    }

    /// Advance lifetimes and positions, dropping expired entries.
    pub fn update(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.life_ms -= dt_ms;
        }
        self.particles.retain(|p| p.life_ms > 0.0);

        for r in &mut self.rings {
            if r.delay_ms > 0.0 {
                r.delay_ms -= dt_ms;
            } else {
                r.life_ms -= dt_ms;
            }
        }
        self.rings.retain(|r| r.life_ms > 0.0);

        for t in &mut self.texts {
            // Floating text drifts upward as it fades.
            t.pos.y -= 22.0 * dt;
            t.life_ms -= dt_ms;
        }
        self.texts.retain(|t| t.life_ms > 0.0);

        for f in &mut self.flashes {
            f.life_ms -= dt_ms;
        }
        self.flashes.retain(|f| f.life_ms > 0.0);
    }

    fn push_particle(&mut self, p: Particle) {
        if self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }
        self.particles.push(p);
    }

    /// Radial burst, e.g. shovel impact debris.
    pub fn spawn_burst(&mut self, center: Vec2, count: usize, color: Color, base_life_ms: f32) {
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let speed = 120.0 + self.rng.random::<f32>() * 180.0;
            let life = base_life_ms + self.rng.random::<f32>() * base_life_ms;
            self.push_particle(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life_ms: life,
                max_life_ms: life,
                size: 2.0,
            });
        }
    }

    /// Scattered warning particles (random directions, slower).
    pub fn spawn_warning_burst(&mut self, center: Vec2, count: usize) {
        for _ in 0..count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 60.0 + self.rng.random::<f32>() * 150.0;
            let life = 280.0 + self.rng.random::<f32>() * 220.0;
            self.push_particle(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color: WARNING_COLOR,
                life_ms: life,
                max_life_ms: life,
                size: 2.0,
            });
        }
    }

    /// One mote of brush dust with probability `chance`.
    pub fn maybe_spawn_dust(&mut self, pos: Vec2, chance: f32) {
        if self.rng.random::<f32>() >= chance {
            return;
        }
        let life = 500.0 + self.rng.random::<f32>() * 500.0;
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 120.0,
            -60.0 - self.rng.random::<f32>() * 120.0,
        );
        self.push_particle(Particle {
            pos,
            vel,
            color: DUST_COLOR,
            life_ms: life,
            max_life_ms: life,
            size: 2.0,
        });
    }

    /// Expanding impact ring.
    pub fn spawn_ring(&mut self, center: Vec2, max_radius: f32, color: Color, life_ms: f32) {
        self.rings.push(Ring {
            center,
            max_radius,
            color,
            delay_ms: 0.0,
            life_ms,
            max_life_ms: life_ms,
        });
    }

    /// Three staggered ripples, detector style.
    pub fn spawn_ripples(&mut self, center: Vec2, max_radius: f32, color: Color) {
        for i in 0..3 {
            self.rings.push(Ring {
                center,
                max_radius,
                color,
                delay_ms: i as f32 * 80.0,
                life_ms: 700.0,
                max_life_ms: 700.0,
            });
        }
    }

    pub fn spawn_text(&mut self, pos: Vec2, text: impl Into<String>, life_ms: f32) {
        self.texts.push(FloatingText {
            pos,
            text: text.into(),
            life_ms,
            max_life_ms: life_ms,
        });
    }

    pub fn flash_cells(&mut self, cells: &[(i32, i32)], life_ms: f32) {
        for &cell in cells {
            self.flashes.push(CellFlash {
                cell,
                life_ms,
                max_life_ms: life_ms,
            });
        }
    }

    /// Draw everything over the finished scene.
    pub fn draw(&mut self, frame: &mut Framebuffer, vp: &Viewport) {
        for f in &self.flashes {
            let fade = (f.life_ms / f.max_life_ms).clamp(0.0, 1.0);
            let (x, y, w, h) = vp.cell_rect(f.cell.0, f.cell.1);
            let jx = self.rng.random_range(-1..=1);
            let jy = self.rng.random_range(-1..=1);
            frame.blend_rect(
                PxRect::new(x + jx, y + jy, w, h),
                FLASH_COLOR,
                (fade * 153.0) as u8,
            );
        }

        for r in &self.rings {
            if r.delay_ms > 0.0 {
                continue;
            }
            let progress = 1.0 - (r.life_ms / r.max_life_ms).clamp(0.0, 1.0);
            let alpha = ((1.0 - progress) * 230.0) as u8;
            frame.stroke_ring(r.center, r.max_radius * progress.max(0.05), r.color, alpha);
        }

        for p in &self.particles {
            let fade = (p.life_ms / p.max_life_ms).clamp(0.0, 1.0);
            frame.fill_disc(p.pos, p.size, p.color, (fade * 230.0) as u8);
        }

        for t in &self.texts {
            let fade = (t.life_ms / t.max_life_ms).clamp(0.0, 1.0);
            if fade <= 0.0 {
                continue;
            }
            // The block font has no alpha; fade by skipping the tail end.
            let color = if fade > 0.15 { TEXT_COLOR } else { [0x9b, 0x8a, 0x5a, 0xff] };
            frame.draw_text_centered(t.pos.x as i32, t.pos.y as i32, &t.text, color, 2);
        }
    }

    /// Impact debris color for plain digs.
    pub fn impact_color() -> Color {
        IMPACT_COLOR
    }
}
