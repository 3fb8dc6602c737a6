//! # Mocks
//!
//! `mockall` doubles for the emulator's trait seams.
