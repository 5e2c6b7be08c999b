//! Typed, prefixed resource identifiers.
//!
//! Every entity gets a permanent primary key of the form `<type>-<suffix>`,
//! e.g. `user-k3mzqa`. The suffix is a pure function of a monotonic counter
//! and a process salt, so retries that reuse a counter value produce the
//! same identifier.
//!
//! The encoding is a bijection on `[0, 31^6)`: the counter is scaled and
//! salted modulo the suffix space, split into base-31 digits, each digit is
//! shifted by the units digit, and the digits are permuted. Distinct
//! counters below `31^6` therefore never collide for a fixed salt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::IdConfig;
use crate::error::AppError;

/// Salt used when none is configured.
pub const DEFAULT_SALT: &str = "miniblog";

/// Separator between the type prefix and the suffix.
pub const SEPARATOR: char = '-';

/// Fixed suffix length.
pub const SUFFIX_LEN: usize = 6;

/// Lowercase alphanumerics without `0 o 1 l i`.
const ALPHABET: &[u8; 31] = b"abcdefghjkmnpqrstuvwxyz23456789";

const BASE: u64 = ALPHABET.len() as u64;

/// `BASE ^ SUFFIX_LEN`.
const SPACE: u64 = BASE * BASE * BASE * BASE * BASE * BASE;

/// Coprime with `SPACE`, spreads consecutive counters apart.
const MULTIPLIER: u64 = 17;

/// Coprime with `SUFFIX_LEN`, so `i * STRIDE % SUFFIX_LEN` is a permutation.
const STRIDE: usize = 5;

/// The closed set of entity kinds that carry resource identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A registered user.
    User,
    /// A blog post.
    Post,
}

impl ResourceType {
    /// Every resource type.
    pub const ALL: [ResourceType; 2] = [ResourceType::User, ResourceType::Post];

    /// The lowercase prefix used in identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
        }
    }

    /// Generates an identifier with the default salt.
    pub fn new_id(self, counter: u64) -> ResourceId {
        IdGenerator::default().generate(self, counter)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("unknown resource type: {s}")))
    }
}

/// Produces identifiers for a fixed salt.
///
/// Immutable after construction; share it freely across tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdGenerator {
    salt: u64,
}

impl IdGenerator {
    /// Creates a generator whose salt is derived from `salt`.
    pub fn new(salt: &str) -> Self {
        let digest = Sha256::digest(salt.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self {
            salt: u64::from_be_bytes(bytes),
        }
    }

    /// Creates a generator from configuration.
    pub fn from_config(config: &IdConfig) -> Self {
        Self::new(&config.salt)
    }

    /// Builds the identifier for `(resource_type, counter)`.
    pub fn generate(&self, resource_type: ResourceType, counter: u64) -> ResourceId {
        ResourceId {
            value: format!("{}{}{}", resource_type.as_str(), SEPARATOR, self.encode(counter)),
            kind: resource_type,
        }
    }

    fn encode(&self, counter: u64) -> String {
        let mut n = ((counter % SPACE) * MULTIPLIER + self.salt % SPACE) % SPACE;

        let mut digits = [0u64; SUFFIX_LEN];
        for digit in digits.iter_mut() {
            *digit = n % BASE;
            n /= BASE;
        }

        let units = digits[0];
        for (i, digit) in digits.iter_mut().enumerate().skip(1) {
            *digit = (*digit + i as u64 * units) % BASE;
        }

        (0..SUFFIX_LEN)
            .map(|i| ALPHABET[digits[(i * STRIDE) % SUFFIX_LEN] as usize] as char)
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SALT)
    }
}

/// A permanent `<type>-<suffix>` primary key.
///
/// Serialized as the plain string; deserialization goes through [`ResourceId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    value: String,
    kind: ResourceType,
}

impl ResourceId {
    /// Parses and validates an identifier string.
    ///
    /// Accepts any lowercase alphanumeric suffix of the fixed length so that
    /// identifiers minted before the alphabet was narrowed still parse.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let (prefix, suffix) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| AppError::validation(format!("malformed resource id: {s}")))?;

        let kind = prefix.parse::<ResourceType>()?;

        if suffix.len() != SUFFIX_LEN
            || !suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(AppError::validation(format!(
                "malformed resource id suffix: {s}"
            )));
        }

        Ok(Self {
            value: s.to_string(),
            kind,
        })
    }

    /// Parses and additionally checks the type prefix.
    pub fn parse_as(s: &str, expected: ResourceType) -> Result<Self, AppError> {
        let id = Self::parse(s)?;
        if id.resource_type() != expected {
            return Err(AppError::validation(format!(
                "expected a {expected} id, got {s}"
            )));
        }
        Ok(id)
    }

    /// The type prefix.
    pub fn resource_type(&self) -> ResourceType {
        self.kind
    }

    /// The suffix after the first separator.
    pub fn suffix(&self) -> &str {
        self.value
            .split_once(SEPARATOR)
            .map(|(_, s)| s)
            .unwrap_or_default()
    }

    /// Borrow the full identifier.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for ResourceId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for ResourceId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> String {
        id.value
    }
}
