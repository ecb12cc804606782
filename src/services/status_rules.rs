use std::{fmt, str::FromStr};

/// The order statuses every store is seeded with. Reports and transition checks
/// refer to statuses through this enum and resolve the row by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatusKind {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatusKind {
    pub const ALL: [OrderStatusKind; 5] = [
        OrderStatusKind::Pending,
        OrderStatusKind::Processing,
        OrderStatusKind::Shipped,
        OrderStatusKind::Delivered,
        OrderStatusKind::Cancelled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrderStatusKind::Pending => "Pending",
            OrderStatusKind::Processing => "Processing",
            OrderStatusKind::Shipped => "Shipped",
            OrderStatusKind::Delivered => "Delivered",
            OrderStatusKind::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive lookup; `None` for custom statuses.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn allowed_next(self) -> &'static [OrderStatusKind] {
        match self {
            OrderStatusKind::Pending => &[OrderStatusKind::Processing, OrderStatusKind::Cancelled],
            OrderStatusKind::Processing => &[OrderStatusKind::Shipped, OrderStatusKind::Cancelled],
            OrderStatusKind::Shipped => &[OrderStatusKind::Delivered],
            OrderStatusKind::Delivered | OrderStatusKind::Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl fmt::Display for OrderStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How strictly status changes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Canonical statuses must follow the transition table.
    #[default]
    Strict,
    /// Any status may replace any other.
    Legacy,
}

impl FromStr for StatusPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(StatusPolicy::Strict),
            "legacy" => Ok(StatusPolicy::Legacy),
            other => Err(anyhow::anyhow!(
                "unknown order status policy `{other}`, expected `strict` or `legacy`"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionCheck {
    /// Same status as before; nothing to write.
    Unchanged,
    Allowed,
    Rejected { from: String, to: String },
}

/// Decide whether an order may move from status `from` to status `to`.
/// Statuses outside the canonical set are never constrained.
pub fn check_transition(policy: StatusPolicy, from: &str, to: &str) -> TransitionCheck {
    if from == to {
        return TransitionCheck::Unchanged;
    }
    if policy == StatusPolicy::Legacy {
        return TransitionCheck::Allowed;
    }
    match (OrderStatusKind::from_name(from), OrderStatusKind::from_name(to)) {
        (Some(current), Some(next)) if !current.allowed_next().contains(&next) => {
            TransitionCheck::Rejected {
                from: from.to_string(),
                to: to.to_string(),
            }
        }
        _ => TransitionCheck::Allowed,
    }
}
