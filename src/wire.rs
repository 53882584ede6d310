//! Result Marshaling
//!
//! Converts a handler's typed return value into its JSON wire form. Each
//! value type carries its own serialization contract; the router and
//! transport never hold per-type knowledge of result shapes.

use serde::Serialize;
use serde_json::Value;

use crate::error::ServerResult;

/// Marshal a handler result into a JSON-safe value.
///
/// An ordered list maps element-wise (recursively) into a JSON array,
/// absence (`None`, `()`) maps to `null`, and any other value maps to a
/// string-keyed object through its own `Serialize` contract.
pub fn marshal<T: Serialize>(value: &T) -> ServerResult<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompletionItem, Hover, Location, Position, Range};

    #[test]
    fn test_marshal_object_uses_own_contract() {
        let location = Location::new("file:///a.rs", Range::point(Position::new(2, 1)));
        let value = marshal(&location).unwrap();
        assert_eq!(value["uri"], "file:///a.rs");
        assert_eq!(value["range"]["end"]["character"], 1);
    }

    #[test]
    fn test_marshal_list_maps_elementwise() {
        let items = vec![CompletionItem::new("foo"), CompletionItem::new("bar")];
        let value = marshal(&items).unwrap();
        assert_eq!(value, serde_json::json!([{"label":"foo"},{"label":"bar"}]));
    }

    #[test]
    fn test_marshal_nested_list_recurses() {
        let groups = vec![vec![CompletionItem::new("a")], vec![]];
        let value = marshal(&groups).unwrap();
        assert_eq!(value, serde_json::json!([[{"label":"a"}],[]]));
    }

    #[test]
    fn test_marshal_absence_is_null() {
        assert_eq!(marshal(&None::<Hover>).unwrap(), Value::Null);
        assert_eq!(marshal(&()).unwrap(), Value::Null);
    }

    #[test]
    fn test_marshal_present_option_unwraps() {
        let value = marshal(&Some(Hover::new("doc"))).unwrap();
        assert_eq!(value, serde_json::json!({"contents":"doc","range":null}));
    }
}
