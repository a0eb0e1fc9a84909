// Adapters layer: concrete implementations of the domain ports that don't need configuration.
// The file-backed storage lives in config::cli next to the CLI settings that point at it.

pub mod clock;
pub mod storage;
