//! Answer-pattern groups and the response → group encoding.

use std::collections::HashSet;
use std::fmt;

use crate::domain::identifiers::validation::validate_identifier;
use crate::domain::{AppError, ResponseVector};

/// Largest supported response count. Keeps the table size reasonable.
pub const MAX_RESPONSE_COUNT: u32 = 16;

/// Names used when no table is configured.
pub const DEFAULT_GROUP_NAMES: [&str; 8] =
    ["Nova", "Echo", "Serenity", "Mirage", "Helios", "Anubis", "Saturn", "Flora"];

/// One named cohort, carrying the bit value it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupIdentity {
    name: String,
    index: usize,
    width: u32,
}

impl GroupIdentity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Answer pattern as bits, first response first (e.g. `"101"`).
    pub fn pattern(&self) -> String {
        format!("{:0width$b}", self.index, width = self.width as usize)
    }
}

impl fmt::Display for GroupIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validated name table of exactly `2^N` unique entries.
///
/// Construction is the startup check; `classify` never re-validates the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTable {
    response_count: u32,
    names: Vec<String>,
}

impl GroupTable {
    pub fn new(response_count: u32, names: Vec<String>) -> Result<Self, AppError> {
        if response_count == 0 || response_count > MAX_RESPONSE_COUNT {
            return Err(AppError::InvalidConfig(format!(
                "response_count must be between 1 and {}, got {}",
                MAX_RESPONSE_COUNT, response_count
            )));
        }

        let expected = 1_usize << response_count;
        if names.len() != expected {
            return Err(AppError::InvalidConfig(format!(
                "group table must hold 2^{} = {} names, got {}",
                response_count,
                expected,
                names.len()
            )));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !validate_identifier(name) {
                return Err(AppError::InvalidConfig(format!("invalid group name '{}'", name)));
            }
            if !seen.insert(name.as_str()) {
                return Err(AppError::InvalidConfig(format!("duplicate group name '{}'", name)));
            }
        }

        Ok(Self { response_count, names })
    }

    pub fn response_count(&self) -> u32 {
        self.response_count
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Map a response vector to its group.
    ///
    /// AFFIRM is bit 1, DENY is bit 0, first response is the most significant
    /// bit. The resulting value indexes the name table.
    pub fn classify(&self, responses: &ResponseVector) -> Result<GroupIdentity, AppError> {
        if responses.len() != self.response_count as usize {
            return Err(AppError::InvalidResponseVector(format!(
                "expected {} answers, got {}",
                self.response_count,
                responses.len()
            )));
        }

        let index = responses
            .as_slice()
            .iter()
            .fold(0_usize, |acc, response| (acc << 1) | response.bit() as usize);

        Ok(self.identity_at(index))
    }

    /// Look up a group by its configured name.
    pub fn find(&self, name: &str) -> Result<GroupIdentity, AppError> {
        self.names.iter().position(|n| n == name).map(|index| self.identity_at(index)).ok_or_else(
            || AppError::UnknownGroup { name: name.to_string(), available: self.names.join(", ") },
        )
    }

    /// Every group in table order.
    pub fn identities(&self) -> impl Iterator<Item = GroupIdentity> + '_ {
        (0..self.names.len()).map(|index| self.identity_at(index))
    }

    fn identity_at(&self, index: usize) -> GroupIdentity {
        GroupIdentity { name: self.names[index].clone(), index, width: self.response_count }
    }
}

impl Default for GroupTable {
    fn default() -> Self {
        Self { response_count: 3, names: DEFAULT_GROUP_NAMES.iter().map(|n| n.to_string()).collect() }
    }
}
