use crate::model::types::EventClass;
use crate::types::Direction;

use super::{EventMaker, EventTable};

impl EventMaker {
    /// Skipped exons: `exon1 -> exon2 -> exon3` in one transcript and a
    /// junction straight from `exon1` to `exon3` in another.
    ///
    /// Every exon is tried as the middle exon.
    pub fn skipped_exon(&self) -> EventTable {
        self.scan(EventClass::SkippedExon, |exon2, out| {
            let strand = self.strand(exon2);
            let upstream = self.flanking(exon2, Direction::Upstream);
            if upstream.is_empty() {
                return;
            }
            let downstream = self.flanking(exon2, Direction::Downstream);

            for &(j12, exon1) in &upstream {
                for &(j23, exon3) in &downstream {
                    if exon1 == exon3 {
                        continue;
                    }
                    for j13 in self.linking_junctions(exon1, exon3) {
                        out.emit(&[exon1, exon2, exon3], &[j12, j23, j13], strand);
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
    fn inclusion_plus_skip_is_one_event() {
        let maker = maker(
            Strand::Plus,
            &[&[(100, 150), (200, 250), (300, 350)], &[(100, 150), (300, 350)]],
        );
        let se = maker.skipped_exon();

        assert_eq!(se.len(), 1);
        let rec = &se.records[0];
        assert_eq!(
            rec.exons,
            vec!["exon:chr1:100-150:+", "exon:chr1:200-250:+", "exon:chr1:300-350:+"]
        );
        assert_eq!(
            rec.junctions,
            vec![
                "junction:chr1:151-199:+",
                "junction:chr1:251-299:+",
                "junction:chr1:151-299:+"
            ]
        );
        assert_eq!(rec.strand, Strand::Plus);
    }

    #[test]
    fn minus_strand_lists_exons_in_transcript_order() {
        let maker = maker(
            Strand::Minus,
            &[&[(100, 150), (200, 250), (300, 350)], &[(100, 150), (300, 350)]],
        );
        let se = maker.skipped_exon();

        assert_eq!(se.len(), 1);
        assert_eq!(
            se.records[0].exons,
            vec!["exon:chr1:300-350:-", "exon:chr1:200-250:-", "exon:chr1:100-150:-"]
        );
        assert_eq!(se.records[0].junctions[2], "junction:chr1:151-299:-");
    }

    #[test]
    fn no_skipping_junction_no_event() {
        let maker = maker(Strand::Plus, &[&[(100, 150), (200, 250), (300, 350)]]);
        assert!(maker.skipped_exon().is_empty());
    }

    #[test]
    fn repeated_transcripts_do_not_duplicate_events() {
        let inclusion: &[(u32, u32)] = &[(100, 150), (200, 250), (300, 350)];
        let skipping: &[(u32, u32)] = &[(100, 150), (300, 350)];
        let maker = maker(Strand::Plus, &[inclusion, skipping, inclusion, skipping]);
        assert_eq!(maker.skipped_exon().len(), 1);
    }

    #[test]
    fn each_skipped_exon_of_a_cassette_pair_is_reported() {
        // 200-250 and 300-350 are skipped together and one at a time
        let maker = maker(
            Strand::Plus,
            &[
                &[(100, 150), (200, 250), (300, 350), (400, 450)],
                &[(100, 150), (300, 350), (400, 450)],
                &[(100, 150), (200, 250), (400, 450)],
                &[(100, 150), (400, 450)],
            ],
        );
        let se = maker.skipped_exon().sorted();

        assert!(se.contains(&[
            "exon:chr1:100-150:+",
            "exon:chr1:200-250:+",
            "exon:chr1:300-350:+"
        ]));
        assert!(se.contains(&[
            "exon:chr1:200-250:+",
            "exon:chr1:300-350:+",
            "exon:chr1:400-450:+"
        ]));
        assert!(se.contains(&[
            "exon:chr1:100-150:+",
            "exon:chr1:200-250:+",
            "exon:chr1:400-450:+"
        ]));
        assert!(se.contains(&[
            "exon:chr1:100-150:+",
            "exon:chr1:300-350:+",
            "exon:chr1:400-450:+"
        ]));
        assert_eq!(se.len(), 4);
    }
}
