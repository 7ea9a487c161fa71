use super::Rule;

impl Rule {
    /// Preset for Conway's classic Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::default()
    }

    /// HighLife variant (B36/S23) - has a self-replicating pattern
    pub fn high_life() -> Self {
        Self::new([2, 3], [3, 6])
    }

    /// Day & Night variant (B3678/S34678)
    pub fn day_and_night() -> Self {
        Self::new([3, 4, 6, 7, 8], [3, 6, 7, 8])
    }

    /// Seeds (B2/S) - every live cell dies each generation
    pub fn seeds() -> Self {
        Self::new([], [2])
    }

    /// Presets offered by the control panel.
    pub fn presets() -> [(&'static str, Self); 4] {
        [
            ("Conway's Classic", Self::conway()),
            ("HighLife", Self::high_life()),
            ("Day & Night", Self::day_and_night()),
            ("Seeds", Self::seeds()),
        ]
    }
}
