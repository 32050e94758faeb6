use thiserror::Error;

/// Rejected corridor configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("slot spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),

    #[error("wall clearance must be non-negative and finite, got {0}")]
    InvalidClearance(f32),

    #[error("first slot row at {start_depth} does not fit in front of {limit}")]
    DegenerateCorridor { start_depth: f32, limit: f32 },
}

/// More artworks than the layout has slots for. The generator never produces such a
/// layout, so seeing this means the two disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{artworks} artworks do not fit in a corridor of {slots} slots")]
pub struct CapacityError {
    pub artworks: usize,
    pub slots: usize,
}
