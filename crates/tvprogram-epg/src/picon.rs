//! Channel logo (picon) path resolution.

use std::path::PathBuf;

use crate::channels::ChannelRegistry;

/// Resolves `{source_id}.png` picons with a shared placeholder fallback.
#[derive(Debug, Clone)]
pub struct PiconResolver {
    dir: PathBuf,
    placeholder: PathBuf,
}

impl PiconResolver {
    /// Creates a resolver over `dir` using `placeholder` as fallback.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, placeholder: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Creates a resolver whose placeholder is `{dir}/placeholder.png`.
    #[must_use]
    pub fn with_default_placeholder(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let placeholder = dir.join("placeholder.png");
        Self { dir, placeholder }
    }

    /// Returns the picon for a display name.
    ///
    /// `None` if the name is not registered, or if neither the channel's
    /// picon nor the placeholder exists.
    #[must_use]
    pub fn resolve(&self, registry: &ChannelRegistry, display_name: &str) -> Option<PathBuf> {
        let Some(source_id) = registry.lookup_source_id(display_name) else {
            tracing::debug!(channel = display_name, "No source id for channel");
            return None;
        };

        let picon = self.dir.join(format!("{source_id}.png"));
        if picon.is_file() {
            return Some(picon);
        }

        tracing::debug!(path = %picon.display(), "Picon not found, trying placeholder");
        if self.placeholder.is_file() {
            return Some(self.placeholder.clone());
        }

        tracing::warn!(path = %self.placeholder.display(), "Placeholder picon not found");
        None
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_existing_picon() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rts1.sr.png"), b"png").unwrap();
        std::fs::write(dir.path().join("placeholder.png"), b"png").unwrap();
        let resolver = PiconResolver::with_default_placeholder(dir.path());

        // Act
        let path = resolver.resolve(&ChannelRegistry::builtin(), "RTS1");

        // Assert
        assert_eq!(path, Some(dir.path().join("rts1.sr.png")));
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("placeholder.png"), b"png").unwrap();
        let resolver = PiconResolver::with_default_placeholder(dir.path());

        // Act
        let path = resolver.resolve(&ChannelRegistry::builtin(), "HBO");

        // Assert
        assert_eq!(path, Some(dir.path().join("placeholder.png")));
    }

    #[test]
    fn test_resolve_without_any_image() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let resolver = PiconResolver::new(dir.path(), dir.path().join("missing.png"));

        // Act & Assert
        assert_eq!(resolver.resolve(&ChannelRegistry::builtin(), "HBO"), None);
    }

    #[test]
    fn test_resolve_unknown_channel() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("placeholder.png"), b"png").unwrap();
        let resolver = PiconResolver::with_default_placeholder(dir.path());

        // Act & Assert
        assert_eq!(resolver.resolve(&ChannelRegistry::builtin(), "Nope"), None);
    }
}
