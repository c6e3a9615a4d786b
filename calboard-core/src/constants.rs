/// Storage key holding the serialized event list.
pub const STORAGE_KEY: &str = "calendar-events";

/// Color used by views when an event has none of its own.
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Directory name used under the platform config dir.
pub const APP_DIR_NAME: &str = "calboard";

/// Default location of persisted data (tilde is expanded at load time).
pub const DEFAULT_DATA_DIR: &str = "~/.local/share/calboard";
