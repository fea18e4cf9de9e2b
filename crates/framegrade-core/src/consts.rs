/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Number of frames decoded simultaneously during streaming evaluation.
/// Balances memory usage vs. parallelism.
pub const STREAMING_BATCH_SIZE: usize = 8;
