use roomfinder_common::settings::SettingsStore;

/// Per-invocation options shared by every command.
pub struct Config {
    /// Suppresses headers and decorations, results are still printed.
    pub quiet: bool,
    pub store: SettingsStore,
}
