// Structural built-ins
use super::expect_args;
use crate::pipeline::{FnResult, Kwargs};
use serde_json::Value;

pub fn identity(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("identity", &args, 1)?;
    Ok(args.into_iter().next().unwrap_or(Value::Null))
}

/// Collect all arguments into one array
pub fn pack(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    Ok(Value::Array(args))
}

/// Join arguments as text; strings are used verbatim, other values as JSON
pub fn concat(args: Vec<Value>, kwargs: Option<&Kwargs>) -> FnResult {
    let separator = match kwargs.and_then(|kw| kw.get("sep")) {
        Some(Value::String(sep)) => sep.as_str(),
        Some(other) => return Err(format!("concat: 'sep' must be a string, got {other}").into()),
        None => "",
    };

    let parts: Vec<String> = args
        .iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Ok(Value::String(parts.join(separator)))
}

pub fn len(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("len", &args, 1)?;
    let count = match &args[0] {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(format!("len: {other} has no length").into()),
    };
    Ok(Value::from(count))
}

/// Index into an array (negative counts from the end) or look up an object key
pub fn get(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("get", &args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Array(items), Value::Number(n)) => {
            let index = n
                .as_i64()
                .ok_or_else(|| format!("get: index {n} is not an integer"))?;
            let len = items.len() as i64;
            let position = if index < 0 { len + index } else { index };
            if position < 0 || position >= len {
                return Err(format!("get: index {index} is out of range for {len} values").into());
            }
            Ok(items[position as usize].clone())
        }
        (Value::Object(map), Value::String(key)) => map
            .get(key)
            .cloned()
            .ok_or_else(|| format!("get: key '{key}' not found").into()),
        (container, key) => Err(format!("get: cannot index {container} with {key}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_concat_with_separator() {
        let kwargs = json!({ "sep": "-" }).as_object().cloned().unwrap();
        let joined = concat(vec![json!("a"), json!(1), json!("b")], Some(&kwargs)).unwrap();
        assert_eq!(joined, json!("a-1-b"));
    }

    #[test]
    fn test_get() {
        assert_eq!(get(vec![json!([1, 2, 3]), json!(-1)], None).unwrap(), json!(3));
        assert_eq!(get(vec![json!({"k": "v"}), json!("k")], None).unwrap(), json!("v"));
        assert!(get(vec![json!([1]), json!(3)], None).is_err());
    }

    #[test]
    fn test_len() {
        assert_eq!(len(vec![json!("äbc")], None).unwrap(), json!(3));
        assert!(len(vec![json!(4)], None).is_err());
    }
}
