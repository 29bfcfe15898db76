// Selection tuning defaults

// Gesture settings
pub const BOX_SELECT_DRAG_THRESHOLD: f32 = 4.0; // Shorter rectangle drags are treated as clicks (pixels)
pub const LASSO_MIN_POINT_SPACING: f32 = 2.0;   // Lasso points closer than this to the last one are dropped (pixels)
pub const MIN_POLYGON_POINTS: usize = 3;

// Region query settings
pub const PARALLEL_QUERY_THRESHOLD: usize = 512; // Candidate count at which containment tests go to the rayon pool

// Geometry tolerances
pub const PERSPECTIVE_DIVIDE_EPSILON: f32 = 1e-6;
