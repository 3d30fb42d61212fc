use crate::Vec3f;

/// Nearest weld target to the torch tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub index: usize,
    pub distance_m: f32,
}

impl Proximity {
    pub fn distance_mm(&self) -> f32 {
        self.distance_m * 1000.0
    }
}

/// Linear scan for the closest target; `None` when there are no targets.
pub fn check_proximity_to_target(tip: Vec3f, targets: &[Vec3f]) -> Option<Proximity> {
    targets
        .iter()
        .enumerate()
        .map(|(index, t)| Proximity { index, distance_m: tip.distance(*t) })
        .fold(None, |best: Option<Proximity>, p| match best {
            Some(b) if b.distance_m <= p.distance_m => Some(b),
            _ => Some(p),
        })
}
