use crate::model::types::EventClass;
use crate::types::Direction;

use super::{EventMaker, EventTable};

impl EventMaker {
    /// Mutually exclusive exons: `exon1` continues into either `exon2` or
    /// `exon3`, both rejoin at `exon4`, and no transcript ever splices
    /// `exon2` and `exon3` together.
    ///
    /// Every exon is tried as `exon1`. Candidates for the middle pair must
    /// not overlap each other.
    pub fn mutually_exclusive_exon(&self) -> EventTable {
        self.scan(EventClass::MutuallyExclusiveExons, |exon1, out| {
            let strand = self.strand(exon1);
            let middle = self.flanking(exon1, Direction::Downstream);

            for (i, &a) in middle.iter().enumerate() {
                for &b in &middle[i + 1..] {
                    let (exon_a, exon_b) = (a.1, b.1);
                    if exon_a == exon_b
                        || self.span(exon_a).overlaps(self.span(exon_b))
                        || self.connected(exon_a, exon_b)
                    {
                        continue;
                    }

                    let ((j12, exon2), (j13, exon3)) = self.in_transcript_order(strand, a, b);

                    let after3 = self.flanking(exon3, Direction::Downstream);
                    for (j24, exon4) in self.flanking(exon2, Direction::Downstream) {
                        if exon4 == exon3 {
                            continue;
                        }
                        for &(j34, _) in after3.iter().filter(|&&(_, e)| e == exon4) {
                            out.emit(&[exon1, exon2, exon3, exon4], &[j12, j13, j24, j34], strand);
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::events::EventMaker;
    use crate::model::chain::ExonChain;
    use crate::types::Strand;

    fn maker(strand: Strand, transcripts: &[&[(u32, u32)]]) -> EventMaker {
        let chains: Vec<ExonChain> = transcripts
            .iter()
            .enumerate()
            .map(|(i, spans)| {
                ExonChain::from_spans(format!("T{i}"), "chr1", strand, spans).unwrap()
            })
            .collect();
        EventMaker::from_chains(&chains).unwrap()
    }

    #[test]
    fn two_alternative_middles_form_one_event() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (200, 250), (400, 450)], &[(100, 150), (300, 350), (400, 450)]],
        );
        let mxe = maker.mutually_exclusive_exon();

        assert_eq!(mxe.len(), 1);
        let rec = &mxe.records[0];
        assert_eq!(
            rec.exons,
            vec![
                "exon:chr1:100-150:+",
                "exon:chr1:200-250:+",
                "exon:chr1:300-350:+",
                "exon:chr1:400-450:+"
            ]
        );
        assert_eq!(
            rec.junctions,
            vec![
                "junction:chr1:151-199:+",
                "junction:chr1:151-299:+",
                "junction:chr1:251-399:+",
                "junction:chr1:351-399:+"
            ]
        );
    }

    #[test]
    fn minus_strand_mirrors_the_event() {
        let maker = maker(
            Strand::Minus,
            &[&[(100, 150), (200, 250), (400, 450)], &[(100, 150), (300, 350), (400, 450)]],
        );
        let mxe = maker.mutually_exclusive_exon();

        assert_eq!(mxe.len(), 1);
        assert_eq!(
            mxe.records[0].exons,
            vec![
                "exon:chr1:400-450:-",
                "exon:chr1:300-350:-",
                "exon:chr1:200-250:-",
                "exon:chr1:100-150:-"
            ]
        );
        assert_eq!(
            mxe.records[0].junctions,
            vec![
                "junction:chr1:351-399:-",
                "junction:chr1:251-399:-",
                "junction:chr1:151-299:-",
                "junction:chr1:151-199:-"
            ]
        );
    }

    #[test]
    fn overlapping_middles_are_not_exclusive() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (200, 250), (400, 450)], &[(100, 150), (240, 350), (400, 450)]],
        );
        assert!(maker.mutually_exclusive_exon().is_empty());
    }

    #[test]
    fn co_spliced_middles_are_not_exclusive() {
        let maker = maker(
            Strand::Plus,
            &[
                &[(100, 150), (200, 250), (400, 450)],
                &[(100, 150), (300, 350), (400, 450)],
                &[(100, 150), (200, 250), (300, 350), (400, 450)],
            ],
        );
        assert!(maker.mutually_exclusive_exon().is_empty());
    }

    #[test]
    fn middles_must_rejoin_at_the_same_exon() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (200, 250), (400, 450)], &[(100, 150), (300, 350), (500, 550)]],
        );
        assert!(maker.mutually_exclusive_exon().is_empty());
    }
}
