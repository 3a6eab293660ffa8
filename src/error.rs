use thiserror::Error;

/// Convenient result alias for the planner.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Why a destination could not be reached.
#[derive(Debug, Clone, PartialEq)]
pub enum InfeasibleReason {
    /// No available station that makes progress lies within the remaining range.
    NoReachableStop {
        stops_planned: usize,
        remaining_distance_km: f64,
        range_km: f64,
    },
    /// The stop-insertion loop hit its iteration bound.
    StopLimitReached { limit: usize },
}

impl std::fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoReachableStop {
                stops_planned,
                remaining_distance_km,
                range_km,
            } => write!(
                f,
                "no charging stop reachable within {range_km:.1} km after {stops_planned} stop(s); \
                 {remaining_distance_km:.1} km still to go"
            ),
            Self::StopLimitReached { limit } => {
                write!(f, "charging stop limit of {limit} reached")
            }
        }
    }
}

/// Top-level planner error type.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Raised when the destination cannot be reached with the given stations.
    #[error("route infeasible: {reason}")]
    RouteInfeasible { reason: InfeasibleReason },

    /// Raised when a coordinate, vehicle profile, station or trip condition fails validation.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl PlannerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Prefix the message of an `InvalidInput` error with what was being validated.
    pub(crate) fn with_context(self, context: &str) -> Self {
        match self {
            Self::InvalidInput { message } => Self::InvalidInput {
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }

    /// Whether the inputs were valid but no route exists.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::RouteInfeasible { .. })
    }
}
