//! Defaults shared by the configuration model and the engine

/// Name of the configuration file looked up by the CLI
pub const CONFIG_FILE_NAME: &str = "dummy.toml";

/// Maximum number of include expansions for one template
///
/// Mutually recursive templates are caught earlier by the include stack;
/// this bounds everything else.
pub const DEFAULT_MAX_INCLUDES: usize = 1024;
