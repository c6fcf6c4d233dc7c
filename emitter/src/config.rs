use crate::Priority;

/// Channel used by the `*_global` convenience methods unless configured otherwise.
pub const GLOBAL_CHANNEL: &str = "global";

/// Configuration for an [`Emitter`](crate::Emitter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Channel targeted by [`on_global`](crate::Emitter::on_global) and
    /// [`emit_global`](crate::Emitter::emit_global).
    pub default_channel: String,
    /// Priority given to handlers registered without an explicit one.
    pub default_priority: Priority,
}

impl Config {
    /// Set the channel used by the `*_global` methods.
    pub fn with_default_channel(mut self, channel: impl Into<String>) -> Self {
        self.default_channel = channel.into();
        self
    }

    /// Set the priority used when none is given.
    pub fn with_default_priority(mut self, priority: Priority) -> Self {
        self.default_priority = priority;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_channel: GLOBAL_CHANNEL.into(),
            default_priority: Priority::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_global_at_low() {
        let config = Config::default();

        assert_eq!(config.default_channel, "global");
        assert_eq!(config.default_priority, Priority::Low);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::default()
            .with_default_channel("broadcast")
            .with_default_priority(Priority::Medium);

        assert_eq!(config.default_channel, "broadcast");
        assert_eq!(config.default_priority, Priority::Medium);
    }
}
