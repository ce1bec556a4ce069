use crate::debug_if_enabled;
use crate::events::WindowHandle;
use crate::services::window_registry::WindowRegistry;
use std::sync::Arc;

use super::binding::Binding;

/// Finds the live window for a binding.
///
/// The cached handle is trusted only after the registry confirms it is still valid;
/// otherwise the registry is searched by process name and title pattern.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<dyn WindowRegistry>,
}

impl Resolver {
    pub fn new(registry: Arc<dyn WindowRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &dyn WindowRegistry {
        self.registry.as_ref()
    }

    pub fn resolve(&self, binding: &Binding) -> Option<WindowHandle> {
        if let Some(handle) = binding.window_handle {
            if self.registry.is_valid(handle) {
                return Some(handle);
            }
            debug_if_enabled!("Cached handle {} for slot {} is stale", handle, binding.slot);
        }

        let found = self
            .registry
            .find_by_process_and_title(&binding.process_name, &binding.title_pattern);

        match found {
            Some(handle) => debug_if_enabled!("Slot {} re-resolved to {}", binding.slot, handle),
            None => debug_if_enabled!("No window matches {}", binding),
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowInfo;
    use crate::marks::Slot;
    use crate::test_support::MockRegistry;

    fn binding() -> Binding {
        Binding::new(Slot::new(1).unwrap(), "code", "main.rs")
    }

    #[test]
    fn test_valid_cached_handle_skips_enumeration() {
        let registry = Arc::new(
            MockRegistry::new()
                .with_window(WindowInfo::new(WindowHandle(5), "main.rs - code".into()).with_process("code")),
        );
        let resolver = Resolver::new(registry.clone());

        let resolved = resolver.resolve(&binding().with_handle(WindowHandle(5)));

        assert_eq!(resolved, Some(WindowHandle(5)));
        assert_eq!(registry.enumerate_calls(), 0);
    }

    #[test]
    fn test_stale_handle_falls_back_to_search() {
        let registry = Arc::new(
            MockRegistry::new()
                .with_window(WindowInfo::new(WindowHandle(8), "main.rs - code".into()).with_process("Code")),
        );
        let resolver = Resolver::new(registry.clone());

        let resolved = resolver.resolve(&binding().with_handle(WindowHandle(5)));

        assert_eq!(resolved, Some(WindowHandle(8)));
        assert_eq!(registry.enumerate_calls(), 1);
    }

    #[test]
    fn test_missing_handle_and_no_match() {
        let registry = Arc::new(
            MockRegistry::new()
                .with_window(WindowInfo::new(WindowHandle(8), "lib.rs - code".into()).with_process("code")),
        );
        let resolver = Resolver::new(registry.clone());

        assert_eq!(resolver.resolve(&binding()), None);
        assert_eq!(registry.enumerate_calls(), 1);
    }
}
