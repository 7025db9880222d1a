use rand::Rng;

/// Explosion debris. Purely visual: particles never collide with anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// 1.0 when spawned, removed once it reaches 0. Also used as draw alpha.
    pub life: f64,
    pub color: &'static str,
}

/// Push `count` particles centred on (x, y) with velocity components drawn
/// uniformly from `[-spread/2, spread/2)`.
pub fn burst<R: Rng>(
    out: &mut Vec<Particle>,
    x: f64,
    y: f64,
    color: &'static str,
    count: usize,
    spread: f64,
    rng: &mut R,
) {
    out.reserve(count);
    for _ in 0..count {
        out.push(Particle {
            x,
            y,
            vx: (rng.random::<f64>() - 0.5) * spread,
            vy: (rng.random::<f64>() - 0.5) * spread,
            life: 1.0,
            color,
        });
    }
}

/// Move every particle one frame and drop the ones that burned out.
pub fn advance(particles: &mut Vec<Particle>, decay: f64) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.life -= decay;
    }
    particles.retain(|p| p.life > 0.0);
}
