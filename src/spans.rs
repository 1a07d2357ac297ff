use std::{collections::HashMap, fmt::Display};

use crate::{
    component::{ComponentId, WireId},
    strips::{StripId, Strips},
    Ref, Strip,
};

/// Index of a span within its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanId(pub usize);

/// An uncut stretch of a strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub id: SpanId,
    pub strip: StripId,
    pub start: Ref,
    pub end: Ref,
    /// Number of holes
    pub len: usize,
    pub wires: Vec<WireId>,
    pub components: Vec<ComponentId>,
}

impl Span {
    /// Whether anything is attached, which makes the span part of a net
    pub fn is_live(&self) -> bool {
        !self.wires.is_empty() || !self.components.is_empty()
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// The spans of all strips, with an index from each uncut hole
#[derive(Debug, Clone, Default)]
pub struct Spans {
    spans: Vec<Span>,
    index: HashMap<Ref, SpanId>,
}

impl Spans {
    /// Split every strip at its cuts. Cut holes belong to no span.
    pub fn build(strips: &Strips) -> Self {
        let mut spans = Spans::default();
        for strip in strips.iter() {
            spans.split(strip);
        }
        log::debug!("{} strips split into {} spans", strips.len(), spans.len());
        spans
    }

    fn split(&mut self, strip: &Strip) {
        if strip.cuts().next().is_none() {
            self.push(strip, strip.start, strip.end(), strip.len);
            return;
        }

        let mut open: Option<(Ref, Ref, usize)> = None;
        for r in strip.refs() {
            if strip.is_cut(r) {
                if let Some((start, end, len)) = open.take() {
                    self.push(strip, start, end, len);
                }
            } else {
                open = match open {
                    Some((start, _, len)) => Some((start, r, len + 1)),
                    None => Some((r, r, 1)),
                };
            }
        }
        if let Some((start, end, len)) = open {
            self.push(strip, start, end, len);
        }
    }

    fn push(&mut self, strip: &Strip, start: Ref, end: Ref, len: usize) {
        let id = SpanId(self.spans.len());
        let span = Span {
            id,
            strip: strip.id,
            start,
            end,
            len,
            wires: vec![],
            components: vec![],
        };
        let mut r = Some(start);
        while let Some(at) = r {
            self.index.insert(at, id);
            r = if at == end { None } else { strip.next_ref(at) };
        }
        self.spans.push(span);
    }

    pub fn get(&self, id: SpanId) -> &Span {
        &self.spans[id.0]
    }

    /// The span holding `r`; `None` for cut holes and holes on no strip
    pub fn at(&self, r: Ref) -> Option<&Span> {
        self.index.get(&r).map(|id| self.get(*id))
    }

    pub(crate) fn attach_wire(&mut self, id: SpanId, wire: WireId) {
        let wires = &mut self.spans[id.0].wires;
        if wires.last() != Some(&wire) {
            wires.push(wire);
        }
    }

    pub(crate) fn attach_component(&mut self, id: SpanId, component: ComponentId) {
        let components = &mut self.spans[id.0].components;
        if components.last() != Some(&component) {
            components.push(component);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
