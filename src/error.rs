use std::fmt::Display;

use thiserror::Error;

use crate::Ref;

/// Errors from reading a hole reference or one of the small enumerated
/// fields of an entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed ref {0:?}")]
    MalformedRef(String),
    #[error("Row {0} outside the supported row range")]
    InvalidRow(isize),
    #[error("Hole {0} outside the supported hole range")]
    InvalidHole(isize),
    #[error("Unknown layer {0}")]
    UnknownLayer(String),
    #[error("Unknown orientation {0}")]
    UnknownOrientation(String),
}

/// The circuit description entry a load diagnostic refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Cut(usize),
    Wire(usize),
    Component(usize),
    NetName(String),
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Cut(i) => write!(f, "cut #{}", i),
            Item::Wire(i) => write!(f, "wire #{}", i),
            Item::Component(i) => write!(f, "component #{}", i),
            Item::NetName(r) => write!(f, "net name for {}", r),
        }
    }
}

/// Circuit load errors
///
/// Everything but `Json` is reported per item: the item is skipped and the
/// rest of the board still loads.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{item}: {source}")]
    Ref {
        item: Item,
        #[source]
        source: ParseError,
    },
    #[error("{item}: {at} does not lie on any span")]
    DanglingReference { item: Item, at: Ref },
    #[error("{item}: Unknown component type {typ}")]
    UnknownComponentType { item: Item, typ: String },
    #[error("Unknown layout {0}")]
    UnknownLayout(String),
    #[error("{item}: {reason}")]
    InvalidComponent { item: Item, reason: String },
    #[error("Invalid circuit description: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    pub(crate) fn bad_ref(item: Item) -> impl FnOnce(ParseError) -> LoadError {
        move |source| LoadError::Ref { item, source }
    }
}
