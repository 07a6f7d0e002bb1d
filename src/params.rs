//! Named generation parameters.
//!
//! Every numeric constant of the generator lives here as an overridable
//! field with the historical default, instead of being buried inline.

/// Parameters for the sandpile altitude smoothing.
#[derive(Clone, Copy, Debug)]
pub struct RelaxParams {
    /// Weight of the neighbour average in the blend
    /// `(altitude + weight * mean) / (1 + weight)`. Larger values pull a
    /// tile harder toward neighbour consensus.
    pub neighbour_weight: f64,
    /// Amplitude of the per-tile random perturbation. The perturbed value is
    /// kept only if it stays inside [-1, 1].
    pub jitter: f64,
    /// Number of full smoothing passes over the tile list.
    pub passes: usize,
}

impl Default for RelaxParams {
    fn default() -> Self {
        Self {
            neighbour_weight: 20.0,
            jitter: 0.01,
            passes: 5,
        }
    }
}

/// Parameters for map construction and river generation.
#[derive(Clone, Copy, Debug)]
pub struct MapParams {
    /// Side length of one hex tile in plane units.
    pub side_length: f64,
    /// Altitude smoothing parameters.
    pub relax: RelaxParams,
    /// River source probability factor: a tile spawns a source when a
    /// uniform draw falls below `river_source_rate * altitude`.
    pub river_source_rate: f64,
    /// Number of boundary layers generated per extension request.
    pub chunk_size: usize,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            side_length: 25.0,
            relax: RelaxParams::default(),
            river_source_rate: 0.1,
            chunk_size: 1,
        }
    }
}
