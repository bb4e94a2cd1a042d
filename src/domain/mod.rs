//! Domain logic and core data structures
//!
//! This module contains pure logic that is independent of any browser
//! engine, identity provider, or platform API.

pub mod allow_list;
pub mod navigation;
pub mod session;
