//! Shared DTOs between the picking backend and its clients.

pub mod domain;
pub mod enums;
pub mod usecases;
