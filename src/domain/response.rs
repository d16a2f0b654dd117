//! Binary survey answers.

use std::fmt;

use crate::domain::AppError;

/// One answer to a daily question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Response {
    Affirm,
    Deny,
}

impl Response {
    /// Parse an answer token as recorded by clients.
    ///
    /// Accepts `yes`/`no` (web client), `agree`/`disagree`, their one-letter
    /// forms, `true`/`false` and `1`/`0`. Matching is case-insensitive.
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "agree" | "true" | "1" => Ok(Response::Affirm),
            "no" | "n" | "disagree" | "false" | "0" => Ok(Response::Deny),
            _ => Err(AppError::InvalidResponseVector(format!("unrecognised answer '{}'", token))),
        }
    }

    pub fn bit(self) -> u32 {
        match self {
            Response::Affirm => 1,
            Response::Deny => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Response::Affirm => "yes",
            Response::Deny => "no",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered answers from one user. Position is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseVector(Vec<Response>);

impl ResponseVector {
    pub fn new(responses: Vec<Response>) -> Self {
        Self(responses)
    }

    /// Parse every token, failing on the first unrecognised one.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, AppError> {
        tokens.iter().map(|t| Response::parse(t.as_ref())).collect::<Result<Vec<_>, _>>().map(Self)
    }

    /// All `2^len` vectors of the given length, in ascending bit order.
    pub fn enumerate(len: u32) -> impl Iterator<Item = ResponseVector> {
        (0..(1_u64 << len)).map(move |value| {
            Self(
                (0..len)
                    .rev()
                    .map(|shift| {
                        if (value >> shift) & 1 == 1 { Response::Affirm } else { Response::Deny }
                    })
                    .collect(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Response] {
        &self.0
    }
}

impl From<Vec<Response>> for ResponseVector {
    fn from(value: Vec<Response>) -> Self {
        Self(value)
    }
}
