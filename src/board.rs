use crate::{
    component::{Component, ComponentId, Wire, WireId},
    error::{Item, LoadError},
    net::{Net, Nets},
    parse::{Placement, WireEnds},
    raw,
    rows::{self, Row, PITCH},
    spans::{Span, Spans},
    strips::{Layout, Strip, Strips},
    Ref,
};

/// A position on the board in inches, measured from the top left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One loaded circuit: its strips, spans, parts and nets.
///
/// A board is built once by [`Board::load`] and never changes afterwards.
/// Each board owns its own lookup tables, so any number can coexist.
#[derive(Debug)]
pub struct Board {
    layout: Layout,
    rows: Vec<Row>,
    holes: usize,
    strips: Strips,
    spans: Spans,
    wires: Vec<Wire>,
    components: Vec<Component>,
    nets: Nets,
    diagnostics: Vec<LoadError>,
}

fn report(diagnostics: &mut Vec<LoadError>, err: LoadError) {
    log::warn!("Skipping {err}");
    diagnostics.push(err);
}

impl Board {
    /// Decode a JSON circuit description and load it
    pub fn from_json(input: &str) -> Result<Self, LoadError> {
        let circuit = raw::Circuit::try_from(input)?;
        Ok(Self::load(&circuit))
    }

    /// Build the board for a circuit.
    ///
    /// Entries that cannot be placed are skipped and listed in
    /// [`Board::diagnostics`]; everything else still loads.
    pub fn load(circuit: &raw::Circuit) -> Self {
        let mut diagnostics = vec![];

        let layout = match circuit.layout.as_deref().map(str::parse::<Layout>) {
            None => Layout::default(),
            Some(Ok(layout)) => layout,
            Some(Err(err)) => {
                report(&mut diagnostics, err);
                Layout::default()
            }
        };
        let dimensions = circuit.dimensions.clone().unwrap_or_default();
        let (row_count, holes) = layout.board_size(dimensions.width, dimensions.height);
        let rows = rows::with_count(row_count);
        let mut strips = Strips::build(layout, &rows, holes);

        for (i, text) in circuit.cuts.iter().enumerate() {
            let item = Item::Cut(i);
            let at = match text.parse::<Ref>() {
                Ok(at) => at,
                Err(err) => {
                    report(&mut diagnostics, LoadError::bad_ref(item)(err));
                    continue;
                }
            };
            match strips.at(at).map(|strip| strip.id) {
                Some(id) => strips.get_mut(id).add_cut(at),
                None => report(&mut diagnostics, LoadError::DanglingReference { item, at }),
            }
        }

        let mut spans = Spans::build(&strips);

        let mut wires = vec![];
        for (i, entry) in circuit.wires.iter().enumerate() {
            let item = Item::Wire(i);
            let ends = match WireEnds::try_from(entry) {
                Ok(ends) => ends,
                Err(err) => {
                    report(&mut diagnostics, err.at(item));
                    continue;
                }
            };
            let span_of = |at: Ref| {
                spans
                    .at(at)
                    .map(|span| span.id)
                    .ok_or_else(|| LoadError::DanglingReference {
                        item: item.clone(),
                        at,
                    })
            };
            let (from_span, to_span) = match (span_of(ends.from), span_of(ends.to)) {
                (Ok(from), Ok(to)) => (from, to),
                (Err(err), _) | (_, Err(err)) => {
                    report(&mut diagnostics, err);
                    continue;
                }
            };
            let id = WireId(wires.len());
            spans.attach_wire(from_span, id);
            spans.attach_wire(to_span, id);
            wires.push(Wire {
                id,
                from: ends.from,
                to: ends.to,
                layer: ends.layer,
                from_span,
                to_span,
            });
        }

        let mut components = vec![];
        for (i, entry) in circuit.components.iter().enumerate() {
            let item = Item::Component(i);
            let placement = match Placement::try_from(entry) {
                Ok(placement) => placement,
                Err(err) => {
                    report(&mut diagnostics, err.at(item));
                    continue;
                }
            };
            let pins = match placement.kind.pins() {
                Ok(pins) => pins,
                Err(err) => {
                    report(&mut diagnostics, LoadError::bad_ref(item)(err));
                    continue;
                }
            };
            let pin_spans: Result<Vec<_>, _> = pins
                .iter()
                .map(|&at| {
                    spans
                        .at(at)
                        .map(|span| span.id)
                        .ok_or_else(|| LoadError::DanglingReference {
                            item: item.clone(),
                            at,
                        })
                })
                .collect();
            let pin_spans = match pin_spans {
                Ok(pin_spans) => pin_spans,
                Err(err) => {
                    report(&mut diagnostics, err);
                    continue;
                }
            };
            let id = ComponentId(components.len());
            for span in &pin_spans {
                spans.attach_component(*span, id);
            }
            components.push(Component {
                id,
                kind: placement.kind,
                label: placement.label,
                layer: placement.layer,
                pins,
                spans: pin_spans,
            });
        }

        let mut nets = Nets::resolve(&spans, &wires);

        for (text, name) in &circuit.nets {
            let item = Item::NetName(text.clone());
            let at = match text.parse::<Ref>() {
                Ok(at) => at,
                Err(err) => {
                    report(&mut diagnostics, LoadError::bad_ref(item)(err));
                    continue;
                }
            };
            let Some(span) = spans.at(at) else {
                report(&mut diagnostics, LoadError::DanglingReference { item, at });
                continue;
            };
            match nets.of(span.id).map(|net| net.id) {
                Some(id) => nets.rename(id, name.clone()),
                None => log::debug!("{at} is on no net, not naming it {name}"),
            }
        }

        log::debug!(
            "Loaded {} wires, {} components, {} nets with {} problems",
            wires.len(),
            components.len(),
            nets.len(),
            diagnostics.len()
        );

        Board {
            layout,
            rows,
            holes,
            strips,
            spans,
            wires,
            components,
            nets,
            diagnostics,
        }
    }

    fn on_board(&self, r: Ref) -> bool {
        r.row() < self.rows.len() && r.hole() < self.holes
    }

    /// Centre of the hole at `r`
    pub fn point_at(&self, r: Ref) -> Option<Point> {
        if !self.on_board(r) {
            return None;
        }
        Some(Point {
            x: r.hole() as f64 * PITCH + PITCH / 2.0,
            y: self.rows[r.row()].y + PITCH / 2.0,
        })
    }

    /// The hole whose pitch square contains the point, if it is on the board
    pub fn ref_at_position(&self, x: f64, y: f64) -> Option<Ref> {
        if x.is_nan() || y.is_nan() || x < 0.0 || y < 0.0 {
            return None;
        }
        let hole = (x / PITCH).floor() as usize;
        let row = (y / PITCH).floor() as usize;
        let r = Ref::new(row, hole).ok()?;
        self.on_board(r).then_some(r)
    }

    pub fn strip_at(&self, r: Ref) -> Option<&Strip> {
        self.strips.at(r)
    }

    pub fn span_at(&self, r: Ref) -> Option<&Span> {
        self.spans.at(r)
    }

    pub fn net_at(&self, r: Ref) -> Option<&Net> {
        self.spans.at(r).and_then(|span| self.nets.of(span.id))
    }

    /// One line about the hole at `r`, for showing under the pointer
    pub fn describe(&self, r: Ref) -> String {
        if !self.on_board(r) {
            return format!("{r}: off board");
        }
        let Some(strip) = self.strip_at(r) else {
            return format!("{r}: no strip");
        };
        let Some(span) = self.span_at(r) else {
            return format!("{r}: cut in strip {strip}");
        };
        match self.nets.of(span.id) {
            Some(net) => format!("{r}: strip {strip}, span {span}, net {}", net.name),
            None => format!("{r}: strip {strip}, span {span}, unconnected"),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Holes per row
    pub fn holes(&self) -> usize {
        self.holes
    }

    pub fn strips(&self) -> &Strips {
        &self.strips
    }

    pub fn spans(&self) -> &Spans {
        &self.spans
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn nets(&self) -> &Nets {
        &self.nets
    }

    /// Problems with skipped entries, in load order
    pub fn diagnostics(&self) -> &[LoadError] {
        &self.diagnostics
    }
}
