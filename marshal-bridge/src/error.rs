use std::fmt;

/// Which half of a strategy was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Param,
    Return,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Param => write!(f, "bind a parameter"),
            Operation::Return => write!(f, "convert a return value"),
        }
    }
}

/// Failures raised while consulting the argument type registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    #[error("no argument type registered for '{0}'")]
    UnknownType(String),

    #[error("{strategy} argument cannot {operation} (type '{descriptor}')")]
    Unsupported {
        strategy: &'static str,
        operation: Operation,
        descriptor: String,
    },
}

impl MarshalError {
    pub fn unsupported(strategy: &'static str, operation: Operation, descriptor: &str) -> Self {
        MarshalError::Unsupported {
            strategy,
            operation,
            descriptor: descriptor.to_string(),
        }
    }
}
