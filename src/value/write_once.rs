//! Write-once property cells.

use once_cell::unsync::OnceCell;

use super::Value;

/// WriteOnce holds a seed value and accepts exactly one later assignment.
///
/// Reads return the committed value once there is one, the seed before that.
/// Every commit after the first is rejected without touching the stored value.
#[derive(Debug, Clone)]
pub struct WriteOnce {
    seed: Value,
    cell: OnceCell<Value>,
}

impl WriteOnce {
    /// Creates a cell that reads as `seed` until its first commit.
    pub fn new(seed: Value) -> Self {
        WriteOnce {
            seed,
            cell: OnceCell::new(),
        }
    }

    /// Returns the committed value, or the seed if nothing was committed yet.
    pub fn get(&self) -> &Value {
        self.cell.get().unwrap_or(&self.seed)
    }

    /// Stores `value` if this is the first commit. Returns whether it was stored.
    pub fn commit(&self, value: Value) -> bool {
        self.cell.set(value).is_ok()
    }

    /// Returns true once a commit has been accepted.
    pub fn is_committed(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Consumes the cell and returns what `get` would have returned.
    pub fn into_value(self) -> Value {
        self.cell.into_inner().unwrap_or(self.seed)
    }

    pub(crate) fn map(self, mut f: impl FnMut(Value) -> Value) -> WriteOnce {
        let mapped = WriteOnce::new(f(self.seed));
        if let Some(value) = self.cell.into_inner() {
            let _ = mapped.cell.set(f(value));
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_seed_until_committed() {
        let cell = WriteOnce::new(Value::Int(1));
        assert_eq!(cell.get(), &Value::Int(1));
        assert!(!cell.is_committed());
    }

    #[test]
    fn test_first_commit_wins() {
        let cell = WriteOnce::new(Value::Undefined);
        assert!(cell.commit(Value::from("first")));
        assert!(!cell.commit(Value::from("second")));
        assert_eq!(cell.get(), &Value::from("first"));
        assert_eq!(cell.into_value(), Value::from("first"));
    }

    #[test]
    fn test_map_keeps_commit_state() {
        let cell = WriteOnce::new(Value::Int(1));
        cell.commit(Value::Int(2));
        let mapped = cell.map(|v| match v {
            Value::Int(i) => Value::Int(i * 10),
            other => other,
        });
        assert!(mapped.is_committed());
        assert_eq!(mapped.get(), &Value::Int(20));
        assert!(!mapped.commit(Value::Int(3)));
    }
}
