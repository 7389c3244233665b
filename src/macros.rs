/// Builds a [`HostValue`](crate::HostValue) from a JSON-like literal.
///
/// Objects become ordered maps (keys keep the order they are written in),
/// arrays become sequences, and any other expression is converted with
/// [`to_host_value`](crate::to_host_value).
///
/// ```rust
/// use tomlconv::{host, HostValue};
///
/// let value = host!({
///     "name": "Alice",
///     "tags": ["admin", "ops"],
///     "limits": { "cpu": 2 }
/// });
/// assert_eq!(value.get("name").and_then(HostValue::as_str), Some("Alice"));
/// ```
#[macro_export]
macro_rules! host {
    (null) => {
        $crate::HostValue::Null
    };

    (true) => {
        $crate::HostValue::from(true)
    };

    (false) => {
        $crate::HostValue::from(false)
    };

    ([]) => {
        $crate::HostValue::Seq(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::HostValue::Seq(vec![$($crate::host!($elem)),*])
    };

    ({}) => {
        $crate::HostValue::Map($crate::HostMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::HostMap::new();
        $(
            object.insert($key.to_string(), $crate::host!($value));
        )*
        $crate::HostValue::Map(object)
    }};

    // Scalars, variables and nested expressions go through serde.
    ($s:expr) => {{
        $crate::to_host_value(&$s).unwrap_or($crate::HostValue::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{HostMap, HostValue, Scalar};

    #[test]
    fn test_host_macro_primitives() {
        assert_eq!(host!(null), HostValue::Null);
        assert_eq!(host!(true), HostValue::from(true));
        assert_eq!(host!(false), HostValue::from(false));
        assert_eq!(host!(42), HostValue::Scalar(Scalar::I32(42)));
        assert_eq!(host!(2.5), HostValue::Scalar(Scalar::F64(2.5)));
        assert_eq!(host!("hello"), HostValue::from("hello"));
    }

    #[test]
    fn test_host_macro_arrays() {
        assert_eq!(host!([]), HostValue::Seq(vec![]));
        assert_eq!(
            host!([1, "two", null]),
            HostValue::Seq(vec![
                HostValue::from(1),
                HostValue::from("two"),
                HostValue::Null,
            ])
        );
    }

    #[test]
    fn test_host_macro_objects_keep_order() {
        assert_eq!(host!({}), HostValue::Map(HostMap::new()));

        let value = host!({ "c": 1, "a": 2, "b": 3 });
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_host_macro_nested() {
        let value = host!({
            "server": { "port": 80, "hosts": ["a", "b"] }
        });
        let server = value.get("server").unwrap();
        assert_eq!(server.get("port").and_then(HostValue::as_i64), Some(80));
        assert_eq!(server.get("hosts").and_then(HostValue::as_seq).map(Vec::len), Some(2));
    }

    #[test]
    fn test_host_macro_expressions() {
        let port: u64 = 8080;
        assert_eq!(host!(port), HostValue::from(8080u64));
    }
}
