//! Integration tests for Layer 2: the legs game
//!
//! Tests for match setup, scoring, strikes, turn order, and complete matches.
