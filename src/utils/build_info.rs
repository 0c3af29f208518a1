/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const UNKNOWN: &str = "unknown";

/// Returns the metadata embedded at compile time.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("RUPEEWISE_BUILD_HASH").unwrap_or(UNKNOWN),
        git_status: option_env!("RUPEEWISE_BUILD_STATUS").unwrap_or(UNKNOWN),
        timestamp: option_env!("RUPEEWISE_BUILD_TIMESTAMP").unwrap_or(UNKNOWN),
        target: option_env!("RUPEEWISE_BUILD_TARGET").unwrap_or(UNKNOWN),
        profile: option_env!("RUPEEWISE_BUILD_PROFILE").unwrap_or(UNKNOWN),
        rustc: option_env!("RUPEEWISE_BUILD_RUSTC").unwrap_or(UNKNOWN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_package() {
        let meta = current();
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!meta.git_hash.is_empty());
    }

    #[test]
    fn stamps_are_never_blank() {
        let meta = current();
        assert!(["clean", "dirty", "unknown"].contains(&meta.git_status));
        for stamp in [meta.timestamp, meta.target, meta.profile, meta.rustc] {
            assert!(!stamp.trim().is_empty());
        }
    }
}
