//! Document loaders.
//!
//! YAML, JSON and TOML documents are converted into the format-neutral
//! [`Value`] tree. String scalars keep their text in every format, so a
//! quoted `'2020-01-01'` still satisfies `str()` and `enum('2020-01-01')`;
//! `day` and `timestamp` read such strings on demand. Only TOML's native
//! date and date-time literals load as [`Value::Date`] and
//! [`Value::Timestamp`].

use crate::schema::{join, yaml_kind};
use crate::{ParserError, Result};
use docschema_core::{Mapping, Value, parse_date, parse_timestamp};
use serde::Deserialize;
use serde_yaml_ng::Value as Yaml;

/// Interprets a string as a date or timestamp, if it is shaped like one.
/// Date-times carrying an offset are normalized to UTC.
pub fn parse_temporal(s: &str) -> Option<Value> {
    parse_date(s)
        .map(Value::Date)
        .or_else(|| parse_timestamp(s).map(Value::Timestamp))
}

/// Loads every document of a YAML stream.
///
/// # Example
///
/// ```rust
/// use docschema_parser::load_yaml;
/// use docschema_core::Value;
///
/// let docs = load_yaml("name: x\nborn: 2001-02-03\n---\nname: y\n").unwrap();
/// assert_eq!(docs.len(), 2);
/// assert_eq!(docs[0].as_map().unwrap()["born"], Value::from("2001-02-03"));
/// ```
pub fn load_yaml(content: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for document in serde_yaml_ng::Deserializer::from_str(content) {
        let yaml = Yaml::deserialize(document)?;
        documents.push(from_yaml(yaml, "")?);
    }
    Ok(documents)
}

/// Loads a JSON document.
pub fn load_json(content: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    Ok(from_json(json))
}

/// Loads a TOML document.
pub fn load_toml(content: &str) -> Result<Value> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(from_toml(toml::Value::Table(table)))
}

fn from_yaml(yaml: Yaml, path: &str) -> Result<Value> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::List(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| from_yaml(item, &join(path, &index.to_string())))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Mapping::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(ParserError::InvalidDocument {
                            path: path.to_string(),
                            message: format!("keys must be scalars, found {}", yaml_kind(&other)),
                        });
                    }
                };
                let value = from_yaml(value, &join(path, &key))?;
                map.insert(key, value);
            }
            Value::Map(map)
        }
        Yaml::Tagged(tagged) => from_yaml(tagged.value, path)?,
    })
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(object) => object
            .into_iter()
            .map(|(k, v)| (k, from_json(v)))
            .collect(),
    }
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        // local times have no date part and stay strings
        toml::Value::Datetime(dt) => {
            let text = dt.to_string();
            parse_temporal(&text).unwrap_or(Value::String(text))
        }
        toml::Value::Array(items) => Value::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => table
            .into_iter()
            .map(|(k, v)| (k, from_toml(v)))
            .collect(),
    }
}
