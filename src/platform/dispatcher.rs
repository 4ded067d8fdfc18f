//! One-shot implementation selection for a single operation.
//!
//! # Responsibilities
//! - Hold competing implementations keyed by platform identifier
//! - Select exactly one on first resolution and cache it
//! - Ignore registrations that arrive after resolution
//!
//! # Design Decisions
//! - Selection order: exact match, longest prefix match, default
//! - The cache is a `OnceLock`: concurrent first calls may both compute
//!   a selection, but exactly one is published and all callers observe
//!   it; selection is pure, so the race is benign
//! - Indices into the registration list stay valid because entries are
//!   only appended or replaced in place

use std::sync::OnceLock;

use crate::platform::error::PlatformError;

/// Registration key for the fallback implementation.
pub const DEFAULT_PLATFORM: &str = "default";

#[derive(Debug, Clone, Copy)]
enum Selection {
    Entry(usize),
    Default,
}

/// Dispatcher for one logical operation.
#[derive(Debug)]
pub struct Dispatcher<T> {
    name: String,
    entries: Vec<(String, T)>,
    default_impl: Option<T>,
    resolved: OnceLock<Selection>,
}

impl<T> Dispatcher<T> {
    /// Create an empty dispatcher for the named operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            default_impl: None,
            resolved: OnceLock::new(),
        }
    }

    /// The logical operation this dispatcher selects for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a selection has already been made.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Register an implementation for a platform key, or the fallback
    /// when the key is [`DEFAULT_PLATFORM`].
    ///
    /// The most recent registration for a key wins. Once the dispatcher
    /// has resolved, registrations are ignored; the selection never
    /// changes.
    pub fn register(&mut self, platform: &str, implementation: T) {
        if self.is_resolved() {
            tracing::warn!(
                operation = %self.name,
                platform,
                "registration ignored: dispatcher already resolved"
            );
            return;
        }

        if platform == DEFAULT_PLATFORM {
            self.default_impl = Some(implementation);
            return;
        }

        match self.entries.iter_mut().find(|(key, _)| key == platform) {
            Some(entry) => entry.1 = implementation,
            None => self.entries.push((platform.to_owned(), implementation)),
        }
    }

    /// Resolve the implementation for the given platform identifier.
    ///
    /// The first successful call decides for the dispatcher's lifetime;
    /// later calls return the cached choice without re-matching.
    pub fn resolve(&self, platform: &str) -> Result<&T, PlatformError> {
        if let Some(selection) = self.resolved.get() {
            return self.lookup(*selection, platform);
        }

        let selection = self.pick(platform).ok_or_else(|| PlatformError::Unimplemented {
            operation: self.name.clone(),
            platform: platform.to_owned(),
        })?;

        tracing::debug!(operation = %self.name, platform, "platform implementation selected");
        let published = *self.resolved.get_or_init(|| selection);
        self.lookup(published, platform)
    }

    fn pick(&self, platform: &str) -> Option<Selection> {
        if let Some(index) = self.entries.iter().position(|(key, _)| key == platform) {
            return Some(Selection::Entry(index));
        }

        // Longest registered prefix of the platform identifier wins.
        let mut best: Option<(usize, usize)> = None;
        for (index, (key, _)) in self.entries.iter().enumerate() {
            if platform.starts_with(key.as_str()) {
                match best {
                    Some((len, _)) if len >= key.len() => {}
                    _ => best = Some((key.len(), index)),
                }
            }
        }
        if let Some((_, index)) = best {
            return Some(Selection::Entry(index));
        }

        if self.default_impl.is_some() {
            return Some(Selection::Default);
        }
        None
    }

    fn lookup(&self, selection: Selection, platform: &str) -> Result<&T, PlatformError> {
        match selection {
            Selection::Entry(index) => self
                .entries
                .get(index)
                .map(|(_, implementation)| implementation)
                .ok_or_else(|| self.unimplemented(platform)),
            Selection::Default => self
                .default_impl
                .as_ref()
                .ok_or_else(|| self.unimplemented(platform)),
        }
    }

    fn unimplemented(&self, platform: &str) -> PlatformError {
        PlatformError::Unimplemented {
            operation: self.name.clone(),
            platform: platform.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_beats_prefix() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("linux", "prefix");
        dispatcher.register("linux-musl", "exact");
        assert_eq!(dispatcher.resolve("linux-musl").unwrap(), &"exact");
    }

    #[test]
    fn test_prefix_match() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("linux", "linux impl");
        dispatcher.register(DEFAULT_PLATFORM, "fallback");
        assert_eq!(dispatcher.resolve("linux2").unwrap(), &"linux impl");
    }

    #[test]
    fn test_default_fallback() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("linux", "linux impl");
        dispatcher.register(DEFAULT_PLATFORM, "fallback");
        assert_eq!(dispatcher.resolve("freebsd").unwrap(), &"fallback");
    }

    #[test]
    fn test_longest_prefix_wins_either_order() {
        let mut first = Dispatcher::new("openSettings");
        first.register("linux", "short");
        first.register("linux-musl", "long");
        assert_eq!(first.resolve("linux-musl-x86").unwrap(), &"long");

        let mut second = Dispatcher::new("openSettings");
        second.register("linux-musl", "long");
        second.register("linux", "short");
        assert_eq!(second.resolve("linux-musl-x86").unwrap(), &"long");
    }

    #[test]
    fn test_unimplemented_without_match_or_default() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("windows", "win impl");
        let err = dispatcher.resolve("macos").unwrap_err();
        let PlatformError::Unimplemented {
            operation,
            platform,
        } = err;
        assert_eq!(operation, "openSettings");
        assert_eq!(platform, "macos");
    }

    #[test]
    fn test_last_registration_wins_before_resolution() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("linux", "old");
        dispatcher.register("linux", "new");
        assert_eq!(dispatcher.resolve("linux").unwrap(), &"new");
    }

    #[test]
    fn test_resolution_is_cached() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("linux", "chosen");
        assert_eq!(dispatcher.resolve("linux").unwrap(), &"chosen");
        assert!(dispatcher.is_resolved());

        // Too late; the selection is already made.
        dispatcher.register("linux", "usurper");
        dispatcher.register(DEFAULT_PLATFORM, "usurper");
        assert_eq!(dispatcher.resolve("linux").unwrap(), &"chosen");
    }

    #[test]
    fn test_cached_selection_sticks_across_platform_ids() {
        let mut dispatcher = Dispatcher::new("openSettings");
        dispatcher.register("linux", "linux impl");
        dispatcher.register("windows", "win impl");
        assert_eq!(dispatcher.resolve("linux").unwrap(), &"linux impl");
        // The apparent platform cannot really change; if it did, the
        // cached choice still holds.
        assert_eq!(dispatcher.resolve("windows").unwrap(), &"linux impl");
    }

    #[test]
    fn test_failed_resolution_is_not_cached() {
        let mut dispatcher = Dispatcher::new("openSettings");
        assert!(dispatcher.resolve("linux").is_err());
        assert!(!dispatcher.is_resolved());

        dispatcher.register("linux", "late but before first success");
        assert_eq!(
            dispatcher.resolve("linux").unwrap(),
            &"late but before first success"
        );
    }
}
