//! HTTP-POST adapter 的編碼：請求攤平成 `prefix.a.b=value`，回應是 query string。

use crate::utils::error::{PalError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use url::form_urlencoded;

/// 把請求攤平成以點分隔的欄位名稱，例如 `paymentRequest.card.billingAddress.city`
pub fn flatten<T: Serialize>(prefix: &str, request: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(request)?;
    let mut fields = Vec::new();
    flatten_value(prefix, &value, &mut fields)?;
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fields)
}

fn flatten_value(key: &str, value: &Value, out: &mut Vec<(String, String)>) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key.to_string(), b.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Object(map) => {
            for (child, child_value) in map {
                let child_key = if key.is_empty() {
                    child.clone()
                } else {
                    format!("{}.{}", key, child)
                };
                flatten_value(&child_key, child_value, out)?;
            }
        }
        Value::Array(_) => {
            return Err(PalError::ValidationError {
                message: format!("field '{}' is a list, not supported by the HTTP-POST adapter", key),
            })
        }
    }
    Ok(())
}

/// 解析 `a=1&b=2` 形式的回應；空值與缺少 `=` 的片段都視為空字串
pub fn parse_query_string(body: &str) -> HashMap<String, String> {
    form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect()
}

/// 取出 `prefix.*` 欄位組成 JSON 物件。
/// 只切第一層，`paymentResult.additionalData.card.summary` 會變成 `additionalData["card.summary"]`。
pub fn unflatten_prefixed(fields: &HashMap<String, String>, prefix: &str) -> Value {
    let head = format!("{}.", prefix);
    let mut root = Map::new();

    for (key, value) in fields {
        let Some(rest) = key.strip_prefix(&head) else {
            continue;
        };

        match rest.split_once('.') {
            None => {
                // 已有巢狀欄位時，同名的空值不能蓋掉它
                if value.is_empty() && root.get(rest).is_some_and(Value::is_object) {
                    continue;
                }
                root.insert(rest.to_string(), Value::String(value.clone()));
            }
            Some((parent, child)) => {
                let entry = root
                    .entry(parent.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                if let Value::Object(map) = entry {
                    map.insert(child.to_string(), Value::String(value.clone()));
                }
            }
        }
    }

    Value::Object(root)
}
