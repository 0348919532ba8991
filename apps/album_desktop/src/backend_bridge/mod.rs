//! Backend worker: owns the album workflow and talks to the record store.

pub mod commands;
pub mod runtime;
