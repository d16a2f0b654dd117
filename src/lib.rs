//! brillianse: daily yes/no questions and answer-pattern group assignment.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    GenerateOutcome, GenerateRequest, assign, classify, generate, groups, members,
};
pub use domain::{AppError, GroupIdentity, GroupTable, Response, ResponseVector, UserId};
