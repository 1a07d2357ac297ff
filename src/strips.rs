use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
    str::FromStr,
};

use crate::{
    error::LoadError,
    rows::{hole_count, pitch_units},
    Ref, Row,
};

/// Index of a strip within its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StripId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Runs along a row, hole by hole
    Horizontal,
    /// Runs down a hole column, row by row
    Vertical,
}

/// A run of connected holes before any cuts are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub id: StripId,
    pub orientation: Orientation,
    pub start: Ref,
    pub len: usize,
    cuts: BTreeSet<Ref>,
}

impl Strip {
    pub fn end(&self) -> Ref {
        self.step(self.start, self.len - 1)
            .expect("strip end lies on the board")
    }

    fn step(&self, r: Ref, n: usize) -> Option<Ref> {
        let n = n as isize;
        match self.orientation {
            Orientation::Horizontal => r.offset(0, n).ok(),
            Orientation::Vertical => r.offset(n, 0).ok(),
        }
    }

    /// The hole after `r` in strip order, or `None` past the end
    pub fn next_ref(&self, r: Ref) -> Option<Ref> {
        if r == self.end() {
            return None;
        }
        self.step(r, 1)
    }

    pub fn contains(&self, r: Ref) -> bool {
        let (along, across, start_along, start_across) = match self.orientation {
            Orientation::Horizontal => (r.hole(), r.row(), self.start.hole(), self.start.row()),
            Orientation::Vertical => (r.row(), r.hole(), self.start.row(), self.start.hole()),
        };
        across == start_across && along >= start_along && along < start_along + self.len
    }

    /// All holes, in strip order
    pub fn refs(&self) -> impl Iterator<Item = Ref> + '_ {
        std::iter::successors(Some(self.start), move |r| self.next_ref(*r))
    }

    pub fn cuts(&self) -> impl Iterator<Item = Ref> + '_ {
        self.cuts.iter().copied()
    }

    pub fn is_cut(&self, r: Ref) -> bool {
        self.cuts.contains(&r)
    }

    pub(crate) fn add_cut(&mut self, r: Ref) {
        debug_assert!(self.contains(r));
        self.cuts.insert(r);
    }
}

impl Display for Strip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start, self.end())
    }
}

/// Board families, each with its own strip geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    Stripboard,
    Protoboard,
    Breadboard,
    Sb4,
    Sb4half,
    Sb4Horiz,
}

const BREADBOARD_HOLES: usize = 16;
const BREADBOARD_ROWS: usize = 30;
const BREADBOARD_BUSSES: [usize; 4] = [0, 1, 14, 15];
const BREADBOARD_STRIPS: [(usize, usize); 2] = [(2, 5), (9, 5)];

const SB4_SIZE: usize = 24;
const SB4_HALF_LENGTH: usize = 20;
const SB4_BUSSES: [usize; 4] = [0, 11, 12, 23];
const SB4_STRIPS: [(usize, usize); 8] = [
    (1, 4),
    (5, 2),
    (7, 4),
    (13, 2),
    (15, 2),
    (17, 2),
    (19, 2),
    (21, 2),
];

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Stripboard => "stripboard",
            Layout::Protoboard => "protoboard",
            Layout::Breadboard => "breadboard",
            Layout::Sb4 => "sb4",
            Layout::Sb4half => "sb4half",
            Layout::Sb4Horiz => "sb4-horiz",
        }
    }

    /// Rows and holes for a board, given its dimensions in inches.
    ///
    /// Fixed-size boards ignore the dimension the template pins down and
    /// fall back to their usual size for one that is missing. Widths past
    /// [`MAX_HOLES`](crate::MAX_HOLES) holes are capped.
    pub fn board_size(&self, width: Option<f64>, height: Option<f64>) -> (usize, usize) {
        let rows = |default: usize| height.map(pitch_units).unwrap_or(default);
        let holes = |default: usize| hole_count(width.map(pitch_units).unwrap_or(default));
        match self {
            Layout::Stripboard | Layout::Protoboard => (rows(0), holes(0)),
            Layout::Breadboard => (rows(BREADBOARD_ROWS), BREADBOARD_HOLES),
            Layout::Sb4half => (rows(SB4_HALF_LENGTH), SB4_SIZE),
            Layout::Sb4 => (rows(2 * SB4_HALF_LENGTH), SB4_SIZE),
            Layout::Sb4Horiz => (SB4_SIZE, holes(SB4_HALF_LENGTH)),
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stripboard" => Ok(Layout::Stripboard),
            "protoboard" => Ok(Layout::Protoboard),
            "breadboard" => Ok(Layout::Breadboard),
            "sb4" => Ok(Layout::Sb4),
            "sb4half" => Ok(Layout::Sb4half),
            "sb4-horiz" => Ok(Layout::Sb4Horiz),
            s => Err(LoadError::UnknownLayout(s.to_owned())),
        }
    }
}

/// All strips of a board plus the hole index over them
#[derive(Debug, Clone, Default)]
pub struct Strips {
    layout: Layout,
    rows: usize,
    holes: usize,
    strips: Vec<Strip>,
    index: HashMap<Ref, StripId>,
}

impl Strips {
    /// Lay out the strips of `layout` over `rows` and `holes` holes.
    ///
    /// Template pieces running past the board are clipped. Busses come
    /// first, then the per-row (or per-column) strips in order.
    pub fn build(layout: Layout, rows: &[Row], holes: usize) -> Self {
        let holes = hole_count(holes);
        let mut strips = Strips {
            layout,
            rows: rows.len(),
            holes,
            ..Default::default()
        };
        let row_count = rows.len();
        if row_count == 0 || holes == 0 {
            return strips;
        }

        match layout {
            Layout::Stripboard => {
                for row in rows {
                    strips.horizontal(row.index, 0, holes);
                }
            }
            Layout::Protoboard => {
                strips.vertical(0, 0, row_count);
                if holes > 1 {
                    strips.vertical(0, holes - 1, row_count);
                }
                if holes > 2 {
                    for row in rows {
                        strips.horizontal(row.index, 1, holes - 2);
                    }
                }
            }
            Layout::Breadboard => {
                for hole in BREADBOARD_BUSSES {
                    strips.vertical(0, hole, row_count);
                }
                for row in rows {
                    for (hole, len) in BREADBOARD_STRIPS {
                        strips.horizontal(row.index, hole, len);
                    }
                }
            }
            Layout::Sb4half => {
                for hole in SB4_BUSSES {
                    strips.vertical(0, hole, row_count);
                }
                strips.sb4_row_strips(rows);
            }
            Layout::Sb4 => {
                let half = row_count / 2;
                for (start, len) in [(0, half), (half, row_count - half)] {
                    for hole in SB4_BUSSES {
                        strips.vertical(start, hole, len);
                    }
                }
                strips.sb4_row_strips(rows);
            }
            Layout::Sb4Horiz => {
                for row in SB4_BUSSES {
                    strips.horizontal(row, 0, holes);
                }
                for hole in 0..holes {
                    for (row, len) in SB4_STRIPS {
                        strips.vertical(row, hole, len);
                    }
                }
            }
        }

        log::debug!(
            "{} board {}x{}: {} strips",
            layout,
            row_count,
            holes,
            strips.strips.len()
        );
        strips
    }

    fn sb4_row_strips(&mut self, rows: &[Row]) {
        for row in rows {
            for (hole, len) in SB4_STRIPS {
                self.horizontal(row.index, hole, len);
            }
        }
    }

    fn horizontal(&mut self, row: usize, hole: usize, len: usize) {
        if row >= self.rows || hole >= self.holes {
            return;
        }
        let len = len.min(self.holes - hole);
        self.push(Orientation::Horizontal, row, hole, len);
    }

    fn vertical(&mut self, row: usize, hole: usize, len: usize) {
        if row >= self.rows || hole >= self.holes {
            return;
        }
        let len = len.min(self.rows - row);
        self.push(Orientation::Vertical, row, hole, len);
    }

    fn push(&mut self, orientation: Orientation, row: usize, hole: usize, len: usize) {
        if len == 0 {
            return;
        }
        let id = StripId(self.strips.len());
        let start = Ref::new(row, hole).expect("board rows stay within the named range");
        let strip = Strip {
            id,
            orientation,
            start,
            len,
            cuts: BTreeSet::new(),
        };
        for r in strip.refs() {
            let previous = self.index.insert(r, id);
            assert!(
                previous.is_none(),
                "{} template puts {} on two strips",
                self.layout,
                r
            );
        }
        self.strips.push(strip);
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn get(&self, id: StripId) -> &Strip {
        &self.strips[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: StripId) -> &mut Strip {
        &mut self.strips[id.0]
    }

    /// The strip holding `r`, if any
    pub fn at(&self, r: Ref) -> Option<&Strip> {
        self.index.get(&r).map(|id| self.get(*id))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Strip> {
        self.strips.iter()
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows;
    use rstest::*;

    fn r(s: &str) -> Ref {
        s.parse().unwrap()
    }

    fn build(layout: Layout, width: Option<f64>, height: Option<f64>) -> Strips {
        let (row_count, holes) = layout.board_size(width, height);
        Strips::build(layout, &rows::with_count(row_count), holes)
    }

    #[test]
    fn stripboard_has_one_strip_per_row() {
        let strips = build(Layout::Stripboard, Some(1.0), Some(0.3));
        assert_eq!(strips.len(), 3);
        let b = strips.at(r("B7")).unwrap();
        assert_eq!(b.orientation, Orientation::Horizontal);
        assert_eq!(b.to_string(), "B0:B9");
        assert!(strips.at(r("B10")).is_none());
        assert!(strips.at(r("D0")).is_none());
    }

    #[test]
    fn protoboard_has_side_busses() {
        let strips = build(Layout::Protoboard, Some(1.0), Some(0.5));
        assert_eq!(strips.len(), 2 + 5);
        assert_eq!(strips.at(r("C0")).unwrap().to_string(), "A0:E0");
        assert_eq!(strips.at(r("E9")).unwrap().to_string(), "A9:E9");
        let interior = strips.at(r("C5")).unwrap();
        assert_eq!(interior.to_string(), "C1:C8");
        assert_eq!(interior.len, 8);
    }

    #[test]
    fn breadboard_leaves_a_centre_channel() {
        let strips = build(Layout::Breadboard, None, Some(1.0));
        assert_eq!(strips.len(), 4 + 2 * 10);
        assert_eq!(strips.at(r("A1")).unwrap().to_string(), "A1:J1");
        assert_eq!(strips.at(r("D4")).unwrap().to_string(), "D2:D6");
        assert_eq!(strips.at(r("D13")).unwrap().to_string(), "D9:D13");
        assert!(strips.at(r("D7")).is_none());
        assert!(strips.at(r("D8")).is_none());
    }

    #[test]
    fn sb4_splits_busses_into_halves() {
        let strips = build(Layout::Sb4, None, None);
        let busses: Vec<_> = strips
            .iter()
            .filter(|s| s.orientation == Orientation::Vertical)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(busses.len(), 8);
        assert_eq!(busses[1], "A11:T11");
        assert_eq!(busses[5], "U11:AN11");
    }

    #[test]
    fn sb4_horiz_is_rotated() {
        let strips = build(Layout::Sb4Horiz, Some(1.0), None);
        assert_eq!(strips.at(r("L4")).unwrap().to_string(), "L0:L9");
        assert_eq!(strips.at(r("C6")).unwrap().to_string(), "B6:E6");
        assert_eq!(strips.at(r("W6")).unwrap().to_string(), "V6:W6");
    }

    #[rstest]
    #[case(Layout::Stripboard, Some(1e21), Some(0.2))]
    #[case(Layout::Protoboard, Some(f64::MAX), Some(0.2))]
    #[case(Layout::Sb4Horiz, Some(1e6), None)]
    fn caps_wide_boards(
        #[case] layout: Layout,
        #[case] width: Option<f64>,
        #[case] height: Option<f64>,
    ) {
        let (_, holes) = layout.board_size(width, height);
        assert_eq!(holes, crate::MAX_HOLES);
        let strips = build(layout, width, height);
        assert!(strips.at(r("B999")).is_some());
        assert!(strips.iter().all(|s| s.end().hole() < crate::MAX_HOLES));
    }

    #[test]
    fn infinite_width_is_an_empty_board() {
        let strips = build(Layout::Stripboard, Some(f64::INFINITY), Some(0.2));
        assert!(strips.is_empty());
    }

    #[test]
    fn build_caps_hole_count() {
        let strips = Strips::build(Layout::Stripboard, &rows::with_count(1), usize::MAX);
        assert_eq!(strips.len(), 1);
        assert_eq!(strips.at(r("A999")).unwrap().to_string(), "A0:A999");
    }

    #[rstest]
    #[case(Layout::Stripboard, Some(1.3), Some(0.7))]
    #[case(Layout::Protoboard, Some(0.1), Some(0.4))]
    #[case(Layout::Protoboard, Some(0.2), Some(0.4))]
    #[case(Layout::Protoboard, Some(2.4), Some(1.2))]
    #[case(Layout::Breadboard, None, Some(3.0))]
    #[case(Layout::Breadboard, None, Some(0.1))]
    #[case(Layout::Sb4, None, Some(0.5))]
    #[case(Layout::Sb4, None, None)]
    #[case(Layout::Sb4half, None, None)]
    #[case(Layout::Sb4Horiz, None, None)]
    #[case(Layout::Sb4Horiz, Some(0.3), None)]
    fn every_hole_is_on_exactly_one_strip(
        #[case] layout: Layout,
        #[case] width: Option<f64>,
        #[case] height: Option<f64>,
    ) {
        let strips = build(layout, width, height);
        let (row_count, holes) = layout.board_size(width, height);
        let mut covered = 0;
        for row in 0..row_count {
            for hole in 0..holes {
                let at = Ref::new(row, hole).unwrap();
                let expect_gap = layout == Layout::Breadboard && (hole == 7 || hole == 8);
                let found: Vec<_> = strips.iter().filter(|s| s.contains(at)).collect();
                assert_eq!(found.len(), usize::from(!expect_gap), "{layout} {at}");
                assert_eq!(strips.at(at).map(|s| s.id), found.first().map(|s| s.id));
                covered += found.len();
            }
        }
        assert_eq!(covered, strips.iter().map(|s| s.len).sum::<usize>());
    }

    #[test]
    fn next_ref_walks_in_strip_order() {
        let strips = build(Layout::Protoboard, Some(0.5), Some(0.3));
        let bus = strips.at(r("A0")).unwrap();
        let walk: Vec<_> = bus.refs().map(|r| r.to_string()).collect();
        assert_eq!(walk, vec!["A0", "B0", "C0"]);
        assert_eq!(bus.next_ref(r("C0")), None);
    }

    #[rstest]
    #[case("sb4-horiz", Layout::Sb4Horiz)]
    #[case("sb4half", Layout::Sb4half)]
    #[case("breadboard", Layout::Breadboard)]
    fn layout_names_round_trip(#[case] name: &str, #[case] layout: Layout) {
        assert_eq!(name.parse::<Layout>().unwrap(), layout);
        assert_eq!(layout.to_string(), name);
    }

    #[test]
    fn unknown_layout() {
        assert!(matches!(
            "veroboard".parse::<Layout>(),
            Err(LoadError::UnknownLayout(_))
        ));
    }
}
