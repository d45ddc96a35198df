use casemk_core::config::{CaseConfig, LabelDirection};
use casemk_core::error::CaseMkError;
use casemk_core::layout::{compute_grid_layout, compute_mixed_layout};
use casemk_core::model::{Item, Rect, SlotLayout};
use rand::{Rng, SeedableRng};

fn random_items(rng: &mut rand::rngs::StdRng, labeled: bool) -> Vec<Item> {
    let kinds = rng.gen_range(1..=8);
    (0..kinds)
        .map(|i| {
            let mut it = Item::new(
                rng.gen_range(5.0..40.0),
                rng.gen_range(5.0..40.0),
                rng.gen_range(2.0..30.0),
            )
            .with_count(rng.gen_range(1..=3));
            if labeled && rng.gen_bool(0.5) {
                it = it.with_label(format!("K{}", i));
            }
            it
        })
        .collect()
}

fn occupied<L: SlotLayout>(layout: &L, cfg: &CaseConfig) -> Vec<Rect> {
    let mut rects = Vec::new();
    for s in layout.slots() {
        rects.push(s.rect());
        if let Some(r) = s.label_rect(cfg.label_direction, cfg.divider_thickness) {
            rects.push(r);
        }
    }
    rects
}

fn check_invariants<L: SlotLayout>(layout: &L, cfg: &CaseConfig) {
    let rects = occupied(layout, cfg);
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            assert!(
                !rects[i].overlaps(&rects[j]),
                "overlap between {:?} and {:?}",
                rects[i],
                rects[j]
            );
        }
    }
    let (ux, uy) = cfg.usable_area();
    let usable = Rect::new(0.0, 0.0, ux, uy);
    assert!(rects.iter().all(|r| usable.contains(r, 1e-9)));

    let (w, l) = layout.extent();
    let max_x = rects.iter().map(|r| r.right()).fold(0.0, f64::max);
    let max_y = rects.iter().map(|r| r.bottom()).fold(0.0, f64::max);
    assert!((w - max_x).abs() < 1e-9);
    assert!((l - max_y).abs() < 1e-9);
}

#[test]
fn mixed_layout_repeatable_disjoint_and_contained() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for round in 0..60 {
        let direction = if round % 2 == 0 {
            LabelDirection::Right
        } else {
            LabelDirection::Below
        };
        let cfg = CaseConfig::builder()
            .corner_radius(if round % 3 == 0 { 4.0 } else { 0.0 })
            .label_size(Some((10.0, 12.0)))
            .label_direction(direction)
            .build();
        let items = random_items(&mut rng, true);

        let first = match compute_mixed_layout(&items, &cfg) {
            Ok(m) => m,
            Err(CaseMkError::DoesNotFit { .. }) => continue,
            Err(e) => panic!("unexpected error: {}", e),
        };
        let second = compute_mixed_layout(&items, &cfg).unwrap();
        assert_eq!(first.slots, second.slots);
        assert_eq!(first.total_width, second.total_width);
        assert_eq!(first.total_length, second.total_length);

        let expected: usize = items.iter().map(|it| it.count).sum();
        assert_eq!(first.slots.len(), expected);
        check_invariants(&first, &cfg);
    }
}

#[test]
fn mixed_layout_places_in_descending_area_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let cfg = CaseConfig::default();
    for _ in 0..30 {
        let items = random_items(&mut rng, false);
        let Ok(m) = compute_mixed_layout(&items, &cfg) else {
            continue;
        };
        for pair in m.slots.windows(2) {
            assert!(pair[0].width * pair[0].length >= pair[1].width * pair[1].length);
        }
    }
}

#[test]
fn grid_layout_repeatable_disjoint_and_contained() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
    for _ in 0..40 {
        let cfg = CaseConfig::builder()
            .max_footprint(rng.gen_range(80.0..400.0), rng.gen_range(80.0..400.0))
            .corner_radius(rng.gen_range(0.0..6.0))
            .build();
        let dims = (
            rng.gen_range(5.0..60.0),
            rng.gen_range(5.0..60.0),
            rng.gen_range(2.0..40.0),
        );
        let count = if rng.gen_bool(0.5) {
            Some(rng.gen_range(1..40))
        } else {
            None
        };
        let Ok(a) = compute_grid_layout(dims, &cfg, count) else {
            continue;
        };
        let b = compute_grid_layout(dims, &cfg, count).unwrap();
        assert_eq!(a.slots, b.slots);
        assert_eq!((a.cols, a.rows, a.rotated), (b.cols, b.rows, b.rotated));
        if let Some(n) = count {
            assert!(a.slots.len() <= n);
            assert_eq!(a.rows, a.slots.len().div_ceil(a.cols));
        }
        check_invariants(&a, &cfg);
    }
}
