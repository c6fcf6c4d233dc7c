use std::{cmp::Ordering, fmt};

/// Invocation order of a handler within a channel.
///
/// Higher priorities run first: `Top > High > Medium > Low`. Handlers sharing a priority run in
/// the order they were registered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Reserved for handlers that must see an event before anything else.
    Top,
    /// High level handlers.
    High,
    /// Handlers that should run before the defaults.
    Medium,
    /// The default, runs last.
    #[default]
    Low,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 4] = [Priority::Top, Priority::High, Priority::Medium, Priority::Low];

    /// The integer rank used for ordering.
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            Priority::Top => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Priority::Top => "TOP",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        f.write_str(name)
    }
}
