//! fwms: Food Wastage Management
//!
//! A command-line dashboard over a SQLite database of food providers,
//! receivers, donated food listings and claims.

pub mod cli;
pub mod core;
pub mod entities;
