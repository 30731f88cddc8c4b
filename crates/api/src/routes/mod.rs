//! Route handlers

pub mod activities;
pub mod evaluate;
pub mod health;
pub mod sessions;
