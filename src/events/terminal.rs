use crate::model::types::{EventClass, NodeId};
use crate::types::Direction;

use super::{EventMaker, EventTable};

impl EventMaker {
    /// Alternative first exons: two non-overlapping exons with nothing
    /// upstream of them, both splicing into the same `exon3`.
    pub fn alt_first_exon(&self) -> EventTable {
        self.alt_terminal_exon(EventClass::AltFirstExon, Direction::Upstream)
    }

    /// Alternative last exons: `exon1` splicing into two non-overlapping
    /// exons with nothing downstream of them.
    pub fn alt_last_exon(&self) -> EventTable {
        self.alt_terminal_exon(EventClass::AltLastExon, Direction::Downstream)
    }

    fn alt_terminal_exon(&self, class: EventClass, side: Direction) -> EventTable {
        self.scan(class, |anchor, out| {
            let strand = self.strand(anchor);
            let terminal: Vec<(NodeId, NodeId)> = self
                .flanking(anchor, side)
                .into_iter()
                .filter(|&(_, exon)| self.adjacent_exons(exon, side).is_empty())
                .collect();

            for (i, &a) in terminal.iter().enumerate() {
                for &b in &terminal[i + 1..] {
                    if a.1 == b.1 || self.span(a.1).overlaps(self.span(b.1)) {
                        continue;
                    }

                    let ((ja, va), (jb, vb)) = self.in_transcript_order(strand, a, b);
                    match side {
                        Direction::Upstream => out.emit(&[va, vb, anchor], &[ja, jb], strand),
                        Direction::Downstream => out.emit(&[anchor, va, vb], &[ja, jb], strand),
                    }
                }
            }
        })
    }
}
