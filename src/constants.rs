// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const WS_PATH: &str = "ws";

// Room defaults
pub const DEFAULT_ROOM_ID: &str = "default";
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Member colors, assigned by `member_count % COLOR_PALETTE.len()`
pub const COLOR_PALETTE: [&str; 10] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231",
    "#911eb4", "#46f0f0", "#f032e6", "#bcf60c", "#fabebe",
];

// Persistence defaults
pub const DEFAULT_STORAGE_DIR: &str = "storage";

// Inbound frame limit (a long stroke carries many points)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 1024 * 1024;
