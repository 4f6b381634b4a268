//! Tests for template engine
//!
//! Organized into focused submodules, one per engine stage.

use super::*;

// Test helper functions
mod helpers;


mod loops;
