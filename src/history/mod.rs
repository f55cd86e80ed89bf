//! Transaction history reconstruction.
//!
//! # Data Flow
//! ```text
//! HistoryRequest (addresses, after?, untilBlock, limit?)
//!     → reference.rs (after block/tx → afterHeight, untilBlock → untilHeight)
//!     → confirmed.rs (fan-out per address, dedup, window, cut, sort, truncate)
//!     → pending.rs (only if budget remains: fan-out, dedup, sort by arrival)
//!     → assembler.rs (projection, confirmed prefix + pending suffix)
//! ```
//!
//! # Invariants
//! - Each transaction id appears at most once in a response
//! - Confirmed entries are strictly ordered by (height, ordinal)
//! - Pending entries follow all confirmed entries, ordered by arrival time
//! - A response never exceeds the requested limit

pub mod assembler;
pub mod confirmed;
pub mod pending;
pub mod reference;
pub mod types;

pub use assembler::HistoryAssembler;
pub use types::{
    HeightWindow, HistoryEntry, HistoryError, HistoryRequest, ReferencePoint, TxState,
    GENESIS_HEIGHT,
};
