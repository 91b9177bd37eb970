//! Wire contract tests.
//!
//! These pin the exact strings that cross the binary boundary: envelope
//! field names, target types, method names, parameter keys, and the fault
//! vocabulary. A failure here means a breaking protocol change.
