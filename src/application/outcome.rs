use serde::Serialize;
use serde_json::Value;

/// Result of a single engine operation.
///
/// Store failures are logged where they happen and carry no detail here.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// The requested record does not exist.
    NotFound,
    /// The arguments could not be used, e.g. an update without an id.
    Invalid,
    /// The record store reported an error.
    Failed,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Invalid => Outcome::Invalid,
            Outcome::Failed => Outcome::Failed,
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Renders the result the way the API gateway expects it: the payload on
    /// success, `null` otherwise.
    pub fn into_json(self) -> Value {
        match self {
            Outcome::Success(value) => serde_json::to_value(value).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_success_renders_payload() {
        assert_eq!(Outcome::Success("abc").into_json(), json!("abc"));
        assert_eq!(Outcome::<String>::NotFound.into_json(), Value::Null);
        assert_eq!(Outcome::<String>::Invalid.into_json(), Value::Null);
        assert_eq!(Outcome::<String>::Failed.into_json(), Value::Null);
    }

    #[test]
    fn test_map_keeps_non_success_variants() {
        assert_eq!(Outcome::Success(2).map(|v| v * 2), Outcome::Success(4));
        assert_eq!(Outcome::<i32>::Failed.map(|v| v * 2), Outcome::Failed);
        assert_eq!(Outcome::<i32>::NotFound.success(), None);
    }
}
