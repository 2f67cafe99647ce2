//! Kind and parameters for the next spawned object

use sandbox_core::{ObjectKind, SpawnParams};

/// A spawn parameter the user can adjust
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnParam {
    Size,
    Mass,
    Elasticity,
    Friction,
}

impl SpawnParam {
    /// (normal, coarse) step sizes
    fn steps(&self) -> (f32, f32) {
        match self {
            SpawnParam::Size => (5.0, 10.0),
            SpawnParam::Mass => (1.0, 5.0),
            SpawnParam::Elasticity => (0.1, 0.2),
            SpawnParam::Friction => (0.1, 0.2),
        }
    }
}

/// Current spawn selection, always within the allowed ranges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSettings {
    kind: ObjectKind,
    params: SpawnParams,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self::new(ObjectKind::Ball, SpawnParams::default())
    }
}

impl SpawnSettings {
    pub fn new(kind: ObjectKind, params: SpawnParams) -> Self {
        Self {
            kind,
            params: params.clamped(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn params(&self) -> SpawnParams {
        self.params
    }

    pub fn set_kind(&mut self, kind: ObjectKind) {
        self.kind = kind;
    }

    /// Nudge one parameter up (`direction > 0`) or down, clamping to its range
    ///
    /// `coarse` uses the larger step. Returns the new value.
    pub fn adjust(&mut self, param: SpawnParam, direction: f32, coarse: bool) -> f32 {
        let (fine, big) = param.steps();
        let delta = direction.signum() * if coarse { big } else { fine };
        let value = match param {
            SpawnParam::Size => &mut self.params.size,
            SpawnParam::Mass => &mut self.params.mass,
            SpawnParam::Elasticity => &mut self.params.elasticity,
            SpawnParam::Friction => &mut self.params.friction,
        };
        // Round away accumulated float error from the 0.1 steps
        *value = ((*value + delta) * 100.0).round() / 100.0;
        self.params = self.params.clamped();

        match param {
            SpawnParam::Size => self.params.size,
            SpawnParam::Mass => self.params.mass,
            SpawnParam::Elasticity => self.params.elasticity,
            SpawnParam::Friction => self.params.friction,
        }
    }
}
