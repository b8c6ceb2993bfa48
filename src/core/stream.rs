//! Stream driver
//!
//! Drives a streaming JSON parse over a byte reader, invoking the
//! replacement engine synchronously for each object key as its value's
//! subtree completes, in document order. The raw input text is never
//! buffered whole; only the reconstructed value tree is, since the run's
//! result is the fully anonymized document.
//!
//! A parse failure aborts the remaining stream and surfaces as a single
//! error carrying the raw trailing fragment of input consumed before the
//! failure. A generator failure takes the same channel but keeps its own
//! error, not a parse error.

use crate::core::engine::ReplacementEngine;
use crate::domain::errors::JsonymizeError;
use crate::domain::result::Result;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::fmt;
use std::io::Read;

/// How much consumed input to retain for parse-error reporting
const FRAGMENT_BYTES: usize = 64;

/// Read wrapper retaining the tail of consumed input
struct TailReader<R> {
    inner: R,
    tail: Vec<u8>,
}

impl<R: Read> TailReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            tail: Vec::with_capacity(FRAGMENT_BYTES),
        }
    }

    fn fragment(&self) -> String {
        String::from_utf8_lossy(&self.tail).into_owned()
    }
}

impl<R: Read> Read for TailReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.tail.extend_from_slice(&buf[..n]);
        if self.tail.len() > FRAGMENT_BYTES {
            let excess = self.tail.len() - FRAGMENT_BYTES;
            self.tail.drain(..excess);
        }
        Ok(n)
    }
}

/// Drives one anonymization run over a JSON byte stream
pub struct StreamDriver<'e> {
    engine: &'e ReplacementEngine,
    // engine failures must survive the trip through the parser's error
    // type, which only carries a message
    failure: RefCell<Option<JsonymizeError>>,
}

impl<'e> StreamDriver<'e> {
    pub fn new(engine: &'e ReplacementEngine) -> Self {
        Self {
            engine,
            failure: RefCell::new(None),
        }
    }

    /// Consume the reader and produce the fully anonymized document
    ///
    /// # Errors
    ///
    /// Returns [`JsonymizeError::Parse`] when the input cannot be tokenized
    /// (including trailing garbage after the document), or the underlying
    /// [`JsonymizeError::Generator`] when a generator invocation fails
    /// mid-stream. No partial output is produced either way.
    pub fn run<R: Read>(&self, reader: R) -> Result<Value> {
        let mut reader = TailReader::new(reader);
        let outcome = {
            let mut de = serde_json::Deserializer::from_reader(&mut reader);
            NodeSeed { driver: self }
                .deserialize(&mut de)
                .and_then(|value| de.end().map(|()| value))
        };

        outcome.map_err(|err| {
            self.failure
                .borrow_mut()
                .take()
                .unwrap_or_else(|| JsonymizeError::Parse {
                    fragment: reader.fragment(),
                    message: err.to_string(),
                })
        })
    }

    fn replace<E: de::Error>(&self, field: &str, value: Value) -> std::result::Result<Value, E> {
        self.engine.replace(field, value).map_err(|err| {
            let message = err.to_string();
            *self.failure.borrow_mut() = Some(err);
            E::custom(message)
        })
    }
}

/// Seed rebuilding one JSON node, replacing values at targeted object keys
#[derive(Clone, Copy)]
struct NodeSeed<'a, 'e> {
    driver: &'a StreamDriver<'e>,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_, '_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_, '_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut elements = Vec::new();
        while let Some(element) = access.next_element_seed(self)? {
            elements.push(element);
        }
        Ok(Value::Array(elements))
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            // the value's whole subtree is rebuilt before the key is
            // considered for replacement, matching document order
            let value = access.next_value_seed(self)?;
            let value = self.driver.replace(&key, value)?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}
