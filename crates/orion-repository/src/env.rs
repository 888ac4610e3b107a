/// Environment variable overrides for repository operations.
#[derive(Debug, Default)]
pub struct EnvOverrides {
    /// ORION_AUTHOR: default commit identity.
    pub author: Option<String>,
}

impl EnvOverrides {
    /// Read the orion environment variables.
    pub fn from_env() -> Self {
        Self {
            author: std::env::var("ORION_AUTHOR")
                .ok()
                .filter(|name| !name.trim().is_empty()),
        }
    }
}
