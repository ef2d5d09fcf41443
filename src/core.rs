//! Core logic - what gets created, in which order, and how each call is judged.
//!
//! Nothing here touches stdin or process setup; the binaries own that.

/// Shared state threaded through every phase
pub mod context;
/// Phase sequencing for the two binaries
pub mod driver;
/// Canned text and randomized values for payloads
pub mod pools;
/// Outcome bookkeeping and status lines
pub mod report;
/// Entity-creation phases
pub mod seed;
/// Read/update/delete pass over a small fixture set
pub mod verify;
