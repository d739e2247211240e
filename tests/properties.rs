use proptest::prelude::*;
use syncmer_core::hoco::HocoSeq;
use syncmer_core::sync::scan;
use syncmer_core::{HashConfig, Params};

fn base_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T'), Just(b'N')]
}

fn reads_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(base_strategy(), 20..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn anchors_fit_inside_the_hoco_window(bases in reads_strategy()) {
        let params = Params::new(5, 9).unwrap();
        let hcfg = HashConfig::default();
        let read = scan(0, "r".to_string(), &bases, &params, &hcfg);
        for a in &read.anchors {
            prop_assert!(a.hoco_pos() + 9 <= read.hoco.hoco_l);
        }
    }

    #[test]
    fn anchor_positions_on_one_read_are_strictly_increasing(bases in reads_strategy()) {
        let params = Params::new(5, 9).unwrap();
        let hcfg = HashConfig::default();
        let read = scan(0, "r".to_string(), &bases, &params, &hcfg);
        for pair in read.anchors.windows(2) {
            prop_assert!(pair[0].hoco_pos() < pair[1].hoco_pos());
        }
    }

    #[test]
    fn equal_hash_implies_equal_s_mer_within_a_read(bases in reads_strategy()) {
        let params = Params::new(5, 9).unwrap();
        let hcfg = HashConfig::default();
        let read = scan(0, "r".to_string(), &bases, &params, &hcfg);
        for i in 0..read.anchors.len() {
            for j in (i + 1)..read.anchors.len() {
                if read.anchors[i].k_mer_h == read.anchors[j].k_mer_h {
                    prop_assert_eq!(read.anchors[i].s_mer, read.anchors[j].s_mer);
                }
            }
        }
    }

    #[test]
    fn hoco_round_trips_the_acgt_only_portion(bases in reads_strategy()) {
        let h = HocoSeq::compress(&bases);
        let expected: Vec<u8> = bases
            .iter()
            .filter(|&&b| matches!(b, b'A' | b'C' | b'G' | b'T'))
            .cloned()
            .collect();
        prop_assert_eq!(h.decompress(), expected);
    }

    #[test]
    fn scanning_is_deterministic_for_repeated_calls(bases in reads_strategy()) {
        let params = Params::new(5, 9).unwrap();
        let hcfg = HashConfig::default();
        let a = scan(0, "r".to_string(), &bases, &params, &hcfg);
        let b = scan(0, "r".to_string(), &bases, &params, &hcfg);
        prop_assert_eq!(a.anchors, b.anchors);
    }
}
