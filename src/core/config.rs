//! # Launcher configuration.
//!
//! Provides [`Config`], the settings a [`Launcher`](crate::Launcher) is built with.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by the bus

/// Settings for a [`Launcher`](crate::Launcher).
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1)
/// - `catch_panics`: Turn panics inside a unit of work into a `WorkError::Panicked` failure
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events skip the oldest ones.
    pub bus_capacity: usize,

    /// Capture panics raised by a unit of work.
    ///
    /// - `true`: the signal fails with `WorkError::Panicked { reason }` and a
    ///   `WorkPanicked` event is published
    /// - `false`: the panic unwinds the spawned task; the signal fails with
    ///   `WorkError::Abandoned` and no terminal event is published
    pub catch_panics: bool,
}

impl Config {
    /// Returns the bus capacity clamped to at least 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    /// - `bus_capacity = 1024`
    /// - `catch_panics = true`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            catch_panics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.bus_capacity, 1024);
        assert!(cfg.catch_panics);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
