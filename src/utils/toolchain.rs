//! Advisory probe for the Vulkan SDK.
//!
//! The build that consumes the synchronized dependencies needs the Vulkan
//! SDK, advertised through the `VULKAN_SDK` environment variable. The probe
//! is purely informational: a missing SDK is logged so the operator finds
//! out before a long build fails, but it never blocks the bootstrap -
//! dependency sources can be fetched without it.

/// Environment variable the Vulkan SDK installer sets.
pub const VULKAN_SDK_ENV: &str = "VULKAN_SDK";

/// Log whether the Vulkan SDK is present and return its location if so.
pub fn probe_vulkan_sdk() -> Option<String> {
    match std::env::var(VULKAN_SDK_ENV) {
        Ok(path) if !path.is_empty() => {
            tracing::info!("Vulkan SDK is available: {VULKAN_SDK_ENV}={path}");
            Some(path)
        }
        _ => {
            tracing::info!("Vulkan SDK is not available");
            None
        }
    }
}
