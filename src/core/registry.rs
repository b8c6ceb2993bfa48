//! Generator registry
//!
//! A named collection of value-generator functions, built once per run by
//! folding extension sources onto the builtin library. Later extensions
//! shadow earlier ones and any builtin of the same name. After construction
//! the registry is read-only; no generator is invoked while it is built.
//!
//! The registry owns the run's randomness source. Runs are single-threaded
//! (the stream driver invokes generators synchronously, one node at a
//! time), so the RNG sits behind a `RefCell` rather than a lock.

use crate::domain::errors::JsonymizeError;
use crate::domain::result::Result;
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// Parameter object passed to a generator on invocation
///
/// Holds the per-field fixed parameters merged with the original value
/// under the `value` key (`value` is applied last and always wins).
pub type Params = Map<String, Value>;

/// A value-generator function
///
/// Generators are synchronous and side-effect-free with respect to the
/// document: they draw from the RNG and produce a replacement value,
/// nothing else. A generator fails only when its parameters cannot be
/// satisfied; the failure aborts the whole run.
pub type GeneratorFn = Box<dyn Fn(&mut StdRng, &Params) -> Result<Value> + Send + Sync>;

/// An extension source: named generators folded onto the registry in order
pub type Extension = Vec<(String, GeneratorFn)>;

/// Named collection of value generators with a shared randomness source
pub struct GeneratorRegistry {
    generators: HashMap<String, GeneratorFn>,
    rng: RefCell<StdRng>,
}

impl GeneratorRegistry {
    /// Create a registry with only the builtin generator library
    pub fn new() -> Self {
        Self::with_extensions(Vec::new())
    }

    /// Create a registry by folding extensions onto the builtin library
    ///
    /// Extensions apply in order: a name defined by a later extension
    /// shadows the same name from an earlier extension or a builtin.
    pub fn with_extensions(extensions: Vec<Extension>) -> Self {
        let mut generators = builtin_library();
        for extension in extensions {
            for (name, generator) in extension {
                generators.insert(name, generator);
            }
        }
        Self {
            generators,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Replace the randomness source with a seeded one, for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Whether a generator with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Invoke a generator by name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown (callers are expected to
    /// check [`contains`](Self::contains) first) or if the generator cannot
    /// satisfy its parameters.
    pub fn invoke(&self, name: &str, params: &Params) -> Result<Value> {
        let generator = self
            .generators
            .get(name)
            .ok_or_else(|| JsonymizeError::Generator(format!("unknown generator '{name}'")))?;
        let mut rng = self.rng.borrow_mut();
        generator(&mut rng, params)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// --- parameter helpers ---

fn int_param(params: &Params, key: &str, default: i64) -> Result<i64> {
    match params.get(key) {
        None => Ok(default),
        Some(value) => value.as_i64().ok_or_else(|| {
            JsonymizeError::Generator(format!("parameter '{key}' must be an integer"))
        }),
    }
}

fn str_param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn int_range(rng: &mut StdRng, min: i64, max: i64) -> Result<i64> {
    if min > max {
        return Err(JsonymizeError::Generator(format!(
            "min ({min}) must not exceed max ({max})"
        )));
    }
    Ok(rng.gen_range(min..=max))
}

// --- builtin generators ---

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'r', 's', 't', 'v', 'w', 'z',
];
const TLDS: &[&str] = &["com", "net", "org", "io", "edu"];
const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Donald", "Edsger", "Frances", "Grace", "John",
    "Katherine", "Ken", "Leslie", "Margaret", "Niklaus", "Tony",
];
const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Hamilton", "Hoare", "Hopper", "Johnson", "Kay", "Knuth", "Lamport",
    "Liskov", "Lovelace", "McCarthy", "Ritchie", "Shannon", "Thompson", "Wirth",
];

fn syllable(rng: &mut StdRng) -> String {
    let c = CONSONANTS[rng.gen_range(0..CONSONANTS.len())];
    let v = VOWELS[rng.gen_range(0..VOWELS.len())];
    let mut s = String::new();
    s.push(c);
    s.push(v);
    // roughly a third of syllables get a closing consonant
    if rng.gen_range(0..3) == 0 {
        s.push(CONSONANTS[rng.gen_range(0..CONSONANTS.len())]);
    }
    s
}

fn word(rng: &mut StdRng, syllables: usize) -> String {
    (0..syllables).map(|_| syllable(rng)).collect()
}

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn builtin_library() -> HashMap<String, GeneratorFn> {
    let mut lib: HashMap<String, GeneratorFn> = HashMap::new();

    lib.insert(
        "natural".to_string(),
        Box::new(|rng, params| {
            let min = int_param(params, "min", 0)?;
            let max = int_param(params, "max", 1_000_000_000)?;
            Ok(Value::from(int_range(rng, min, max)?))
        }),
    );

    lib.insert(
        "integer".to_string(),
        Box::new(|rng, params| {
            let min = int_param(params, "min", -1_000_000_000)?;
            let max = int_param(params, "max", 1_000_000_000)?;
            Ok(Value::from(int_range(rng, min, max)?))
        }),
    );

    lib.insert(
        "bool".to_string(),
        Box::new(|rng, params| {
            let likelihood = int_param(params, "likelihood", 50)?;
            if !(0..=100).contains(&likelihood) {
                return Err(JsonymizeError::Generator(format!(
                    "likelihood ({likelihood}) must be between 0 and 100"
                )));
            }
            Ok(Value::Bool(rng.gen_range(0..100) < likelihood))
        }),
    );

    lib.insert(
        "date".to_string(),
        Box::new(|rng, _params| {
            let secs = int_range(rng, 0, Utc::now().timestamp())?;
            // in-range seconds always form a valid timestamp
            let date = Utc
                .timestamp_opt(secs, 0)
                .single()
                .ok_or_else(|| JsonymizeError::Generator("invalid timestamp".to_string()))?;
            Ok(Value::String(date.to_rfc3339()))
        }),
    );

    lib.insert(
        "email".to_string(),
        Box::new(|rng, params| {
            let local = word(rng, 3);
            let domain = match str_param(params, "domain") {
                Some(domain) => domain.to_string(),
                None => format!("{}.{}", word(rng, 2), pick(rng, TLDS)),
            };
            Ok(Value::String(format!("{local}@{domain}")))
        }),
    );

    lib.insert(
        "ip".to_string(),
        Box::new(|rng, _params| {
            let octets: Vec<String> = (0..4).map(|_| rng.gen_range(0..=255u8).to_string()).collect();
            Ok(Value::String(octets.join(".")))
        }),
    );

    lib.insert(
        "timestamp".to_string(),
        Box::new(|rng, _params| Ok(Value::from(int_range(rng, 1, Utc::now().timestamp())?))),
    );

    lib.insert(
        "guid".to_string(),
        Box::new(|_rng, _params| Ok(Value::String(uuid::Uuid::new_v4().to_string()))),
    );

    lib.insert(
        "hash".to_string(),
        Box::new(|rng, params| {
            let length = int_param(params, "length", 40)?;
            if length < 1 {
                return Err(JsonymizeError::Generator(format!(
                    "length ({length}) must be positive"
                )));
            }
            let upper = str_param(params, "casing") == Some("upper");
            let digits: String = (0..length)
                .map(|_| {
                    let d = std::char::from_digit(rng.gen_range(0..16), 16).unwrap();
                    if upper {
                        d.to_ascii_uppercase()
                    } else {
                        d
                    }
                })
                .collect();
            Ok(Value::String(digits))
        }),
    );

    lib.insert(
        "sentence".to_string(),
        Box::new(|rng, params| {
            let count = match params.get("words") {
                Some(_) => int_param(params, "words", 0)?,
                None => int_range(rng, 12, 18)?,
            };
            if count < 1 {
                return Err(JsonymizeError::Generator(format!(
                    "words ({count}) must be positive"
                )));
            }
            let words: Vec<String> = (0..count)
                .map(|_| {
                    let syllables = rng.gen_range(1..=3);
                    word(rng, syllables)
                })
                .collect();
            let mut sentence = words.join(" ");
            sentence[..1].make_ascii_uppercase();
            sentence.push('.');
            Ok(Value::String(sentence))
        }),
    );

    lib.insert(
        "word".to_string(),
        Box::new(|rng, params| {
            let syllables = match params.get("syllables") {
                Some(_) => int_param(params, "syllables", 0)?,
                None => int_range(rng, 1, 3)?,
            };
            if syllables < 1 {
                return Err(JsonymizeError::Generator(format!(
                    "syllables ({syllables}) must be positive"
                )));
            }
            Ok(Value::String(word(rng, syllables as usize)))
        }),
    );

    lib.insert(
        "string".to_string(),
        Box::new(|rng, params| {
            let length = match params.get("length") {
                Some(_) => int_param(params, "length", 0)?,
                None => int_range(rng, 5, 20)?,
            };
            if length < 1 {
                return Err(JsonymizeError::Generator(format!(
                    "length ({length}) must be positive"
                )));
            }
            let default_pool = "abcdefghijklmnopqrstuvwxyz0123456789";
            let pool: Vec<char> = str_param(params, "pool")
                .unwrap_or(default_pool)
                .chars()
                .collect();
            if pool.is_empty() {
                return Err(JsonymizeError::Generator("pool must not be empty".to_string()));
            }
            let s: String = (0..length).map(|_| pool[rng.gen_range(0..pool.len())]).collect();
            Ok(Value::String(s))
        }),
    );

    lib.insert(
        "first".to_string(),
        Box::new(|rng, _params| Ok(Value::String(pick(rng, FIRST_NAMES).to_string()))),
    );

    lib.insert(
        "last".to_string(),
        Box::new(|rng, _params| Ok(Value::String(pick(rng, LAST_NAMES).to_string()))),
    );

    lib.insert(
        "name".to_string(),
        Box::new(|rng, _params| {
            let name = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));
            Ok(Value::String(name))
        }),
    );

    lib
}
