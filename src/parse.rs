use crate::{
    component::{ComponentKind, Facing, Layer, Leads},
    error::{Item, LoadError, ParseError},
    raw,
    rows::pitch_units,
    Ref, MAX_HOLES,
};

/// Why a single raw entry could not be turned into a typed one
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EntryError {
    Ref(ParseError),
    UnknownType(String),
    Invalid(String),
}

impl From<ParseError> for EntryError {
    fn from(value: ParseError) -> Self {
        EntryError::Ref(value)
    }
}

impl EntryError {
    pub(crate) fn at(self, item: Item) -> LoadError {
        match self {
            EntryError::Ref(source) => LoadError::Ref { item, source },
            EntryError::UnknownType(typ) => LoadError::UnknownComponentType { item, typ },
            EntryError::Invalid(reason) => LoadError::InvalidComponent { item, reason },
        }
    }
}

fn layer(value: Option<&str>) -> Result<Layer, EntryError> {
    value
        .map(Layer::try_from)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(EntryError::Ref)
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, EntryError> {
    value
        .as_deref()
        .ok_or_else(|| EntryError::Invalid(format!("missing {field}")))
}

fn required_ref(value: &Option<String>, field: &str) -> Result<Ref, EntryError> {
    Ok(required(value, field)?.parse::<Ref>()?)
}

/// A wire with its refs parsed, not yet tied to spans
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireEnds {
    pub(crate) from: Ref,
    pub(crate) to: Ref,
    pub(crate) layer: Layer,
}

impl TryFrom<&raw::Wire> for WireEnds {
    type Error = EntryError;

    fn try_from(value: &raw::Wire) -> Result<Self, Self::Error> {
        let raw::Wire { from, to, layer: l } = value;
        Ok(WireEnds {
            from: from.parse::<Ref>()?,
            to: to.parse::<Ref>()?,
            layer: layer(l.as_deref())?,
        })
    }
}

/// A component with its refs parsed, not yet tied to spans
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placement {
    pub(crate) kind: ComponentKind,
    pub(crate) label: Option<String>,
    pub(crate) layer: Layer,
}

impl TryFrom<&raw::Component> for Placement {
    type Error = EntryError;

    fn try_from(value: &raw::Component) -> Result<Self, Self::Error> {
        let leads = || -> Result<Leads, EntryError> {
            Ok(Leads {
                from: required_ref(&value.from, "from")?,
                to: required_ref(&value.to, "to")?,
            })
        };

        let kind = match value.typ.as_str() {
            "resistor" => ComponentKind::Resistor(leads()?),
            "capacitor" => ComponentKind::Capacitor(leads()?),
            "diode" => ComponentKind::Diode(leads()?),
            "led" => ComponentKind::Led(leads()?),
            "header" => {
                let leads = leads()?;
                if leads.from.row() != leads.to.row() && leads.from.hole() != leads.to.hole() {
                    return Err(EntryError::Invalid(format!(
                        "header {} to {} is not along a row or column",
                        leads.from, leads.to
                    )));
                }
                ComponentKind::Header(leads)
            }
            "ic" => {
                let at = required_ref(&value.at, "at")?;
                let pins = value
                    .pins
                    .ok_or_else(|| EntryError::Invalid("missing pins".to_owned()))?;
                if pins < 2 || pins % 2 != 0 {
                    return Err(EntryError::Invalid(format!(
                        "ic needs an even number of pins, got {pins}"
                    )));
                }
                let width = value
                    .width
                    .ok_or_else(|| EntryError::Invalid("missing width".to_owned()))?;
                match pitch_units(width) {
                    0 => {
                        return Err(EntryError::Invalid(format!("ic width {width} is too narrow")))
                    }
                    n if n >= MAX_HOLES => {
                        return Err(EntryError::Invalid(format!("ic width {width} is too wide")))
                    }
                    _ => {}
                }
                ComponentKind::Ic { at, pins, width }
            }
            "transistor" => ComponentKind::Transistor {
                at: required_ref(&value.at, "at")?,
                facing: value
                    .orientation
                    .as_deref()
                    .map(Facing::try_from)
                    .transpose()?
                    .unwrap_or_default(),
            },
            "hole" => ComponentKind::Hole {
                at: value.hole_ref.as_deref().map(str::parse::<Ref>).transpose()?,
                x: value.x,
                y: value.y,
                radius: value
                    .radius
                    .ok_or_else(|| EntryError::Invalid("missing radius".to_owned()))?,
            },
            typ => return Err(EntryError::UnknownType(typ.to_owned())),
        };

        Ok(Placement {
            kind,
            label: value.label.clone(),
            layer: layer(value.layer.as_deref())?,
        })
    }
}
