use anyhow::{Context, Result, bail};
use mlua::{Lua, Table, Value};
use serde_json::{Map, Number, Value as JsonValue};

/// Deep enough for any sane outcome, shallow enough to stop on self-referencing tables.
const MAX_DEPTH: usize = 64;

pub fn json_to_lua(lua: &Lua, value: &JsonValue) -> Result<Value> {
    let converted = match value {
        JsonValue::Null => Value::Nil,
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Number(n.as_f64().unwrap_or_default()),
        },
        JsonValue::String(s) => Value::String(lua.create_string(s)?),
        JsonValue::Array(items) => {
            let table = lua.create_table()?;
            for (i, item) in items.iter().enumerate() {
                table.raw_set(i + 1, json_to_lua(lua, item)?)?;
            }
            Value::Table(table)
        }
        JsonValue::Object(entries) => {
            let table = lua.create_table()?;
            for (key, item) in entries {
                table.raw_set(key.as_str(), json_to_lua(lua, item)?)?;
            }
            Value::Table(table)
        }
    };

    Ok(converted)
}

/// Converts a script's return value to JSON.
///
/// Tables whose keys are exactly `1..=n` become arrays, an empty table becomes an empty array,
/// any other table must be keyed by strings. Functions, userdata and threads are rejected.
pub fn lua_to_json(value: &Value) -> Result<JsonValue> {
    convert(value, 0)
}

fn convert(value: &Value, depth: usize) -> Result<JsonValue> {
    if depth > MAX_DEPTH {
        bail!("Value nested deeper than {} levels", MAX_DEPTH);
    }

    let converted = match value {
        Value::Nil => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::Number((*i).into()),
        Value::Number(n) => JsonValue::Number(
            Number::from_f64(*n).with_context(|| format!("Cannot represent number {}", n))?,
        ),
        Value::String(s) => JsonValue::String(s.to_str()?.to_string()),
        Value::Table(table) => convert_table(table, depth)?,
        other => bail!("Unsupported value of type '{}'", other.type_name()),
    };

    Ok(converted)
}

fn convert_table(table: &Table, depth: usize) -> Result<JsonValue> {
    let len = table.raw_len();
    let mut entries = Vec::new();
    for pair in table.pairs::<Value, Value>() {
        entries.push(pair.context("Error reading table entry")?);
    }

    if entries.len() == len {
        let mut items = Vec::with_capacity(len);
        for i in 1..=len {
            let item: Value = table.raw_get(i)?;
            items.push(convert(&item, depth + 1)?);
        }
        return Ok(JsonValue::Array(items));
    }

    let mut object = Map::new();
    for (key, item) in entries {
        let Value::String(key) = key else {
            bail!("Table keys must be strings, found '{}'", key.type_name());
        };
        object.insert(key.to_str()?.to_string(), convert(&item, depth + 1)?);
    }

    Ok(JsonValue::Object(object))
}
