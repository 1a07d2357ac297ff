use crate::{error::ParseError, rows::pitch_units, spans::SpanId, Ref};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

/// Which side of the board a part is drawn on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Front,
    Back,
}

impl TryFrom<&str> for Layer {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            s => Err(ParseError::UnknownLayer(s.to_owned())),
        }
    }
}

/// Direction a transistor's flat face points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    N,
    S,
    E,
    W,
}

impl TryFrom<&str> for Facing {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "N" => Ok(Self::N),
            "S" => Ok(Self::S),
            "E" => Ok(Self::E),
            "W" => Ok(Self::W),
            s => Err(ParseError::UnknownOrientation(s.to_owned())),
        }
    }
}

/// A point-to-point link between two holes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub id: WireId,
    pub from: Ref,
    pub to: Ref,
    pub layer: Layer,
    pub from_span: SpanId,
    pub to_span: SpanId,
}

impl Wire {
    /// The span at the far end of the wire, seen from `span`
    pub fn other_span(&self, span: SpanId) -> SpanId {
        if span == self.from_span {
            self.to_span
        } else {
            self.from_span
        }
    }
}

/// Two endpoints of a part mounted between holes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leads {
    pub from: Ref,
    pub to: Ref,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Resistor(Leads),
    Capacitor(Leads),
    Diode(Leads),
    Led(Leads),
    /// A pin on every hole of the straight line between the leads
    Header(Leads),
    /// Dual in-line package; pin 1 at `at`
    Ic { at: Ref, pins: usize, width: f64 },
    /// Three legs centred on `at`
    Transistor { at: Ref, facing: Facing },
    /// Ornamental mounting hole
    Hole {
        at: Option<Ref>,
        x: Option<f64>,
        y: Option<f64>,
        radius: f64,
    },
}

impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Resistor(_) => "resistor",
            ComponentKind::Capacitor(_) => "capacitor",
            ComponentKind::Diode(_) => "diode",
            ComponentKind::Led(_) => "led",
            ComponentKind::Header(_) => "header",
            ComponentKind::Ic { .. } => "ic",
            ComponentKind::Transistor { .. } => "transistor",
            ComponentKind::Hole { .. } => "hole",
        }
    }

    /// Holes occupied by the pins, in pin order
    pub fn pins(&self) -> Result<Vec<Ref>, ParseError> {
        match self {
            ComponentKind::Resistor(leads)
            | ComponentKind::Capacitor(leads)
            | ComponentKind::Diode(leads)
            | ComponentKind::Led(leads) => Ok(vec![leads.from, leads.to]),
            ComponentKind::Header(Leads { from, to }) => {
                let (rows, holes) = (
                    to.row() as isize - from.row() as isize,
                    to.hole() as isize - from.hole() as isize,
                );
                let count = rows.abs().max(holes.abs());
                (0..=count)
                    .map(|i| from.offset(i * rows.signum(), i * holes.signum()))
                    .collect()
            }
            ComponentKind::Ic { at, pins, width } => {
                let half =
                    isize::try_from(*pins / 2).map_err(|_| ParseError::InvalidRow(isize::MAX))?;
                let across = isize::try_from(pitch_units(*width))
                    .map_err(|_| ParseError::InvalidHole(isize::MAX))?;
                let down = (0..half).map(|k| at.offset(k, 0));
                let up = (0..half).map(|k| at.offset(half - 1 - k, across));
                down.chain(up).collect()
            }
            ComponentKind::Transistor { at, facing } => {
                let (rows, holes) = match facing {
                    Facing::N => (0, 1),
                    Facing::S => (0, -1),
                    Facing::E => (1, 0),
                    Facing::W => (-1, 0),
                };
                [-1, 0, 1]
                    .into_iter()
                    .map(|k| at.offset(k * rows, k * holes))
                    .collect()
            }
            ComponentKind::Hole { .. } => Ok(vec![]),
        }
    }
}

/// A placed part. It only records which spans its pins sit on.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub label: Option<String>,
    pub layer: Layer,
    pub pins: Vec<Ref>,
    /// Span of each pin, parallel to `pins`
    pub spans: Vec<SpanId>,
}
