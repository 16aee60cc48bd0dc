use std::collections::HashMap;

/// Live widget state for one drawing surface
struct Slot<H> {
    generation: u64,
    handle: Option<H>,
}

impl<H> Default for Slot<H> {
    fn default() -> Self {
        Self {
            generation: 0,
            handle: None,
        }
    }
}

/// Tracks the current widget handle and request generation per surface id.
///
/// Each load calls [`WidgetRegistry::begin`] and keeps the returned generation;
/// when the response arrives it is applied only if [`WidgetRegistry::is_current`]
/// still holds. Installing a new handle hands back the previous one so the
/// caller can dispose of it before drawing over the same surface.
pub struct WidgetRegistry<H> {
    slots: HashMap<&'static str, Slot<H>>,
}

impl<H> WidgetRegistry<H> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Start a new request for `surface`, superseding any in flight
    pub fn begin(&mut self, surface: &'static str) -> u64 {
        let slot = self.slots.entry(surface).or_default();
        slot.generation += 1;
        slot.generation
    }

    pub fn is_current(&self, surface: &str, generation: u64) -> bool {
        self.slots
            .get(surface)
            .map(|slot| slot.generation == generation)
            .unwrap_or(false)
    }

    /// Install `handle` for `surface`, returning the one it replaces
    pub fn replace(&mut self, surface: &'static str, handle: H) -> Option<H> {
        self.slots.entry(surface).or_default().handle.replace(handle)
    }

    /// Remove the handle for `surface` without installing a new one
    pub fn take(&mut self, surface: &str) -> Option<H> {
        self.slots.get_mut(surface).and_then(|slot| slot.handle.take())
    }

    #[cfg(test)]
    pub fn has_widget(&self, surface: &str) -> bool {
        self.slots
            .get(surface)
            .map(|slot| slot.handle.is_some())
            .unwrap_or(false)
    }
}

impl<H> Default for WidgetRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
