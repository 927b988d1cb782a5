//! Capability gating for theme keys
//!
//! Any region name or attribute key may carry a suffix `name[req1,!req2]`.
//! The entry applies only when every plain requirement is in the capability
//! set and no negated one is.
//!
//! Gated keys do not outrank bare ones. Entries that survive gating merge in
//! document order, so put the bare default first and the gated variant after
//! it: `{"text[wide]": "b", "text": "a"}` yields `"a"` on every device.

use super::error::{Result, ThemeError};
use super::value::{merge, ThemeMap, ThemeValue};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\[\]]*)\[(?P<reqs>[^\[\]]*)\]$").expect("static regex")
});

/// Read-only set of device/platform tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    tokens: BTreeSet<String>,
}

impl CapabilitySet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    pub fn has(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
    }

    /// Tokens describing the machine we are running on
    pub fn detect() -> Self {
        let mut caps = Self::new([std::env::consts::OS, std::env::consts::ARCH]);
        if std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some() {
            caps.extend(["desktop"]);
        }
        caps
    }
}

/// One token of a requirement suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub token: String,
    pub negated: bool,
}

impl Requirement {
    pub fn satisfied_by(&self, caps: &CapabilitySet) -> bool {
        caps.has(&self.token) != self.negated
    }
}

/// Split `name[a,!b]` into `name` and its requirements
pub fn split_requirements(key: &str) -> Result<(&str, Vec<Requirement>)> {
    if !key.contains('[') && !key.contains(']') {
        return Ok((key, Vec::new()));
    }

    let caps = SUFFIX
        .captures(key)
        .ok_or_else(|| ThemeError::MalformedRequirement(key.to_string()))?;
    let name = caps.name("name").map_or("", |m| m.as_str());
    let reqs = caps.name("reqs").map_or("", |m| m.as_str());

    let mut requirements = Vec::new();
    for token in reqs.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (negated, token) = match token.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, token),
        };
        if token.is_empty() {
            return Err(ThemeError::MalformedRequirement(key.to_string()));
        }
        requirements.push(Requirement {
            token: token.to_string(),
            negated,
        });
    }
    Ok((name, requirements))
}

pub fn satisfied(requirements: &[Requirement], caps: &CapabilitySet) -> bool {
    requirements.iter().all(|r| r.satisfied_by(caps))
}

/// Strip requirement suffixes from every map key, dropping unmet entries
///
/// When a gated key and its bare form both survive, the later one in document
/// order is merged over the earlier, whichever of the two carries the suffix.
pub fn gate(value: &ThemeValue, caps: &CapabilitySet) -> Result<ThemeValue> {
    match value {
        ThemeValue::Map(map) => Ok(ThemeValue::Map(gate_map(map, caps)?)),
        ThemeValue::List(items) => Ok(ThemeValue::List(
            items
                .iter()
                .map(|item| gate(item, caps))
                .collect::<Result<Vec<_>>>()?,
        )),
        scalar => Ok(scalar.clone()),
    }
}

pub fn gate_map(map: &ThemeMap, caps: &CapabilitySet) -> Result<ThemeMap> {
    let mut out = ThemeMap::new();
    for (key, value) in map {
        let (name, requirements) = split_requirements(key)?;
        if !satisfied(&requirements, caps) {
            continue;
        }
        let value = gate(value, caps)?;
        let merged = match out.get(name) {
            Some(existing) => merge(existing, &value),
            None => value,
        };
        out.insert(name.to_string(), merged);
    }
    Ok(out)
}
