use std::collections::VecDeque;

use crate::{
    component::Wire,
    spans::{SpanId, Spans},
};

/// Index of a net within its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(pub usize);

/// Spans joined together by wires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Net {
    pub id: NetId,
    pub name: String,
    /// In the order the traversal reached them
    pub spans: Vec<SpanId>,
}

#[derive(Debug, Clone, Default)]
pub struct Nets {
    nets: Vec<Net>,
    of_span: Vec<Option<NetId>>,
}

impl Nets {
    /// Group live spans into nets.
    ///
    /// Only wires join spans. A component with pins on several spans
    /// makes each of them live, but does not merge them: an isolated
    /// header still yields one net per span it touches.
    pub fn resolve(spans: &Spans, wires: &[Wire]) -> Self {
        let mut nets = Nets {
            nets: vec![],
            of_span: vec![None; spans.len()],
        };

        for span in spans.iter() {
            if !span.is_live() || nets.of_span[span.id.0].is_some() {
                continue;
            }

            let id = NetId(nets.nets.len());
            let mut members = vec![];
            let mut queue = VecDeque::from([span.id]);
            nets.of_span[span.id.0] = Some(id);

            while let Some(current) = queue.pop_front() {
                members.push(current);
                for wire in &spans.get(current).wires {
                    let next = wires[wire.0].other_span(current);
                    if nets.of_span[next.0].is_none() {
                        nets.of_span[next.0] = Some(id);
                        queue.push_back(next);
                    }
                }
            }

            nets.nets.push(Net {
                id,
                name: format!("N{}", id.0),
                spans: members,
            });
        }

        log::debug!(
            "{} live spans form {} nets",
            spans.iter().filter(|s| s.is_live()).count(),
            nets.len()
        );
        nets
    }

    pub fn get(&self, id: NetId) -> &Net {
        &self.nets[id.0]
    }

    /// The net a span belongs to, if it joined one
    pub fn of(&self, span: SpanId) -> Option<&Net> {
        self.of_span
            .get(span.0)
            .copied()
            .flatten()
            .map(|id| self.get(id))
    }

    pub(crate) fn rename(&mut self, id: NetId, name: String) {
        self.nets[id.0].name = name;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Net> {
        self.nets.iter()
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }
}
