use crate::model::types::EventClass;
use crate::types::{Direction, Span, Strand};

use super::{EventMaker, EventTable};

impl EventMaker {
    /// Alternative 5' splice sites: two overlapping variants of `exon1`
    /// share their 5' boundary, end at different donor sites and both
    /// splice into the same `exon3`.
    ///
    /// Records are `[variant, variant, exon3]` with `[junction13, junction23]`.
    pub fn alt_5prime_splice_site(&self) -> EventTable {
        self.alt_splice_site(EventClass::Alt5PrimeSpliceSite, Direction::Upstream)
    }

    /// Alternative 3' splice sites: `exon1` splices into two overlapping
    /// variants that share their 3' boundary and start at different
    /// acceptor sites.
    ///
    /// Records are `[exon1, variant, variant]` with `[junction12, junction13]`.
    pub fn alt_3prime_splice_site(&self) -> EventTable {
        self.alt_splice_site(EventClass::Alt3PrimeSpliceSite, Direction::Downstream)
    }

    // The anchor is the shared exon; variants are looked for on `side` of it.
    // The boundary facing the anchor is the one that differs.
    fn alt_splice_site(&self, class: EventClass, side: Direction) -> EventTable {
        self.scan(class, |anchor, out| {
            let strand = self.strand(anchor);
            let (far, near): (fn(Strand, Span) -> u32, fn(Strand, Span) -> u32) = match side {
                Direction::Upstream => (Strand::five_prime, Strand::three_prime),
                Direction::Downstream => (Strand::three_prime, Strand::five_prime),
            };

            let variants = self.flanking(anchor, side);
            for (i, &a) in variants.iter().enumerate() {
                for &b in &variants[i + 1..] {
                    let (sa, sb) = (self.span(a.1), self.span(b.1));
                    if a.1 == b.1 || a.0 == b.0 || !sa.overlaps(sb) {
                        continue;
                    }
                    if far(strand, sa) != far(strand, sb) || near(strand, sa) == near(strand, sb) {
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
    fn donor_variants_are_a5ss_on_plus() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (300, 350)], &[(100, 200), (300, 350)]],
        );

        let a5ss = maker.alt_5prime_splice_site();
        assert_eq!(a5ss.len(), 1);
        assert_eq!(
            a5ss.records[0].exons,
            vec!["exon:chr1:100-150:+", "exon:chr1:100-200:+", "exon:chr1:300-350:+"]
        );
        assert_eq!(
            a5ss.records[0].junctions,
            vec!["junction:chr1:151-299:+", "junction:chr1:201-299:+"]
        );
        assert!(maker.alt_3prime_splice_site().is_empty());
    }

    #[test]
    fn acceptor_variants_are_a3ss_on_plus() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (200, 250)], &[(100, 150), (225, 250)]],
        );

        let a3ss = maker.alt_3prime_splice_site();
        assert_eq!(a3ss.len(), 1);
        assert_eq!(
            a3ss.records[0].exons,
            vec!["exon:chr1:100-150:+", "exon:chr1:200-250:+", "exon:chr1:225-250:+"]
        );
        assert_eq!(
            a3ss.records[0].junctions,
            vec!["junction:chr1:151-199:+", "junction:chr1:151-224:+"]
        );
        assert!(maker.alt_5prime_splice_site().is_empty());
    }

    #[test]
    fn strand_decides_which_boundary_is_the_donor() {
        // same coordinates as the plus-strand a3ss case, read 3' -> 5'
        let maker = maker(
            Strand::Minus,
            &[&[(100, 150), (200, 250)], &[(100, 150), (225, 250)]],
        );

        assert!(maker.alt_3prime_splice_site().is_empty());
        let a5ss = maker.alt_5prime_splice_site();
        assert_eq!(a5ss.len(), 1);
        assert_eq!(
            a5ss.records[0].exons,
            vec!["exon:chr1:225-250:-", "exon:chr1:200-250:-", "exon:chr1:100-150:-"]
        );
        assert_eq!(
            a5ss.records[0].junctions,
            vec!["junction:chr1:151-224:-", "junction:chr1:151-199:-"]
        );
    }

    #[test]
    fn variants_differing_at_both_ends_are_ignored() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (200, 250)], &[(100, 150), (225, 275)]],
        );
        assert!(maker.alt_3prime_splice_site().is_empty());
        assert!(maker.alt_5prime_splice_site().is_empty());
    }
}
