use std::fmt;
use thiserror::Error;

/// Collection-style operations a `BoundedQueue` refuses to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddAll,
    Contains,
    ContainsAll,
    Iter,
    RemoveItem,
    RemoveAll,
    RetainAll,
    CopyToSlice,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::AddAll      => "add_all",
            Operation::Contains    => "contains",
            Operation::ContainsAll => "contains_all",
            Operation::Iter        => "iter",
            Operation::RemoveItem  => "remove_item",
            Operation::RemoveAll   => "remove_all",
            Operation::RetainAll   => "retain_all",
            Operation::CopyToSlice => "copy_to_slice",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue capacity must be positive, got {0}")]
    InvalidCapacity(i64),
    #[error("queue is full (capacity {capacity})")]
    Full { capacity: usize },
    #[error("queue is empty")]
    Empty,
    #[error("`{0}` is not supported")]
    Unsupported(Operation),
}

impl QueueError {
    /// Short tag for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            QueueError::InvalidCapacity(_) => "invalid_capacity",
            QueueError::Full { .. }        => "full",
            QueueError::Empty              => "empty",
            QueueError::Unsupported(_)     => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_condition() {
        assert_eq!(QueueError::Empty.to_string(), "queue is empty");
        assert_eq!(
            QueueError::Full { capacity: 3 }.to_string(),
            "queue is full (capacity 3)"
        );
        assert_eq!(
            QueueError::Unsupported(Operation::RetainAll).to_string(),
            "`retain_all` is not supported"
        );
        assert_eq!(
            QueueError::InvalidCapacity(-2).to_string(),
            "queue capacity must be positive, got -2"
        );
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            QueueError::InvalidCapacity(0).kind(),
            QueueError::Full { capacity: 1 }.kind(),
            QueueError::Empty.kind(),
            QueueError::Unsupported(Operation::Iter).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
