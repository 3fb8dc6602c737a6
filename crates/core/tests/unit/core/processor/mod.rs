//! # Processor Tests
//!
//! These tests drive [`Processor::tick`](mlogvm_core::core::Processor::tick)
//! directly against hand-built programs, without the frame driver.
