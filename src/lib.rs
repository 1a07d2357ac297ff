//! Connectivity for stripboard-style prototyping boards.
//!
//! A circuit description names a board layout, the cuts made in its
//! copper strips, and the wires and parts soldered onto it. Loading it
//! yields a [`Board`] that maps every hole to its strip, to the uncut
//! span of that strip it sits on, and to the net of spans joined by wires.
//!
//! ```
//! use stripboard::{Board, Ref};
//!
//! let board = Board::from_json(
//!     r#"{
//!         "dimensions": { "width": 1.0, "height": 0.3 },
//!         "cuts": ["B5"],
//!         "wires": [{ "from": "A2", "to": "C2" }]
//!     }"#,
//! )
//! .unwrap();
//!
//! let a: Ref = "A7".parse().unwrap();
//! let c: Ref = "C0".parse().unwrap();
//! assert_eq!(board.net_at(a), board.net_at(c));
//! assert!(board.net_at("B9".parse().unwrap()).is_none());
//! ```

mod board;
mod component;
mod error;
mod net;
mod parse;
pub mod raw;
mod refs;
pub mod rows;
mod spans;
mod strips;

pub use board::{Board, Point};
pub use component::{
    Component, ComponentId, ComponentKind, Facing, Layer, Leads, Wire, WireId,
};
pub use error::{Item, LoadError, ParseError};
pub use net::{Net, NetId, Nets};
pub use refs::{row_index, row_name, Ref, MAX_HOLES, MAX_ROWS};
pub use rows::{Row, PITCH};
pub use spans::{Span, SpanId, Spans};
pub use strips::{Layout, Orientation, Strip, StripId, Strips};
