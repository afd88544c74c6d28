//! Game rule sets.
//!
//! Each game lives in its own module and exposes plain functions over its
//! state types. Chess, Doudizhu and Linkup also implement
//! [`RulesEngine`](crate::rules::RulesEngine).

pub mod chess;
pub mod doudizhu;
pub mod linkup;
pub mod points24;
