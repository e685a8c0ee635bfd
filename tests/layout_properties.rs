use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zkp_layout::{
    assemble, decode, FieldSelection, LayoutError, ProofConfig, Selection, SelectionSpec,
};

const CASES: usize = 200;

fn random_config(rng: &mut StdRng) -> ProofConfig {
    let sections = rng.gen_range(1..8);
    let mut builder = ProofConfig::builder();
    for i in 0..sections {
        let width = *[1i64, 8, 16, 32, 48].get(rng.gen_range(0..5)).unwrap_or(&32);
        // Roughly one section in four is empty.
        let count = if rng.gen_bool(0.25) { 0 } else { rng.gen_range(1..6) };
        builder = builder.section(format!("s{}", i), width, count);
    }
    builder.build().unwrap()
}

fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

#[test]
fn length_is_conserved() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..CASES {
        let config = random_config(&mut rng);
        let trailer_len = rng.gen_range(0..64);
        let buf = random_bytes(&mut rng, config.fixed_len() + trailer_len);

        let decoded = decode(&buf, &config).unwrap();
        let consumed: usize = decoded.sections().iter().map(|s| s.byte_len()).sum();
        assert_eq!(consumed, buf.len() - trailer_len);
        assert_eq!(decoded.trailer_offset(), consumed);
        assert_eq!(decoded.trailer().len(), trailer_len);
    }
}

#[test]
fn sections_partition_the_buffer() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..CASES {
        let config = random_config(&mut rng);
        let buf = random_bytes(&mut rng, config.fixed_len() + 5);
        let decoded = decode(&buf, &config).unwrap();

        for (section, layout) in decoded.sections().iter().zip(config.sections()) {
            assert_eq!(section.name(), layout.name());
            assert_eq!(section.len(), layout.element_count());
            assert!(section
                .iter()
                .all(|e| e.len() == layout.element_byte_width()));
            let joined: Vec<u8> = section.iter().flatten().copied().collect();
            assert_eq!(joined, &buf[section.offset()..section.offset() + section.byte_len()]);
        }
    }
}

#[test]
fn one_byte_short_is_truncated() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut checked = 0;
    while checked < CASES {
        let config = random_config(&mut rng);
        if config.fixed_len() == 0 {
            continue;
        }
        let buf = random_bytes(&mut rng, config.fixed_len() - 1);
        assert!(matches!(
            decode(&buf, &config),
            Err(LayoutError::TruncatedBuffer { .. })
        ));
        checked += 1;
    }
}

#[test]
fn empty_sections_do_not_move_the_cursor() {
    let config = ProofConfig::builder()
        .section("before", 8, 2)
        .section("empty", 32, 0)
        .section("after", 4, 3)
        .build()
        .unwrap();
    let buf: Vec<u8> = (0u8..40).collect();
    let decoded = decode(&buf, &config).unwrap();

    let empty = decoded.section("empty").unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.offset(), 16);

    let after = decoded.section("after").unwrap();
    assert_eq!(after.offset(), 16);
    assert_eq!(after.get(0), Some(&buf[16..20]));
    assert_eq!(decoded.trailer(), &buf[28..]);
}

#[test]
fn selection_bounds_follow_element_count() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..CASES {
        let config = random_config(&mut rng);
        let buf = random_bytes(&mut rng, config.fixed_len());
        let decoded = decode(&buf, &config).unwrap();

        for layout in config.sections() {
            let count = layout.element_count();
            let past = SelectionSpec::new(vec![FieldSelection::new(
                "f",
                layout.name(),
                Selection::Element(count),
            )])
            .unwrap();
            assert!(matches!(
                assemble(&decoded, decoded.trailer(), &past),
                Err(LayoutError::SelectionOutOfRange { .. })
            ));

            if count >= 1 {
                let last = SelectionSpec::new(vec![FieldSelection::new(
                    "f",
                    layout.name(),
                    Selection::Element(count - 1),
                )])
                .unwrap();
                assert!(assemble(&decoded, decoded.trailer(), &last).is_ok());
            }
        }
    }
}
