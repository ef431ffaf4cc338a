//! Algorithm constants and runtime configuration defaults

// Safety limit on the cubic transient memory of the rescaled level stack
/// Maximum allowed diamond order
pub const MAX_DIAMOND_ORDER: usize = 512;

/// Default diamond order for the command-line driver
pub const DEFAULT_ORDER: usize = 64;

/// Default number of heat-bath sweeps after exact generation
pub const DEFAULT_SWEEPS: u64 = 0;

/// Default output path for the rendered tiling
pub const DEFAULT_OUTPUT: &str = "tiling.png";

// Rendering settings
/// Pixels per unit of the rotated diamond coordinate frame
pub const CELL_PIXELS: u32 = 4;

/// RGBA colour for horizontal dominoes at even row, even column
pub const RED_RGBA: [u8; 4] = [211, 47, 47, 255];
/// RGBA colour for horizontal dominoes at odd row, odd column
pub const GREEN_RGBA: [u8; 4] = [56, 142, 60, 255];
/// RGBA colour for vertical dominoes at odd row, even column
pub const BLUE_RGBA: [u8; 4] = [25, 118, 210, 255];
/// RGBA colour for vertical dominoes at even row, odd column
pub const YELLOW_RGBA: [u8; 4] = [251, 192, 45, 255];
