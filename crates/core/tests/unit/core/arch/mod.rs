//! # Architectural State Tests
