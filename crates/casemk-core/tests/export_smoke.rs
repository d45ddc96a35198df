use casemk_core::prelude::*;

#[test]
fn grid_layout_json_smoke() {
    let cfg = CaseConfig::default();
    let layout: CaseLayout = compute_grid_layout((30.0, 20.0, 15.0), &cfg, Some(12))
        .unwrap()
        .into();
    let v = layout_to_json(&layout, &cfg);
    let obj = v.as_object().expect("object");
    assert_eq!(obj["kind"], "grid");
    assert_eq!(obj["slots"].as_array().unwrap().len(), 12);
    assert!(obj.contains_key("extent"));
    assert!(obj.contains_key("stats"));
    assert!(obj.contains_key("config"));
    assert_eq!(obj["grid"]["rotated"], true);
    assert!(obj["slots"][0]["label"].is_null());
}

#[test]
fn mixed_layout_json_resolves_labels() {
    let cfg = CaseConfig::builder().label_size(Some((10.0, 30.0))).build();
    let items = vec![Item::new(30.0, 20.0, 15.0).with_label("A")];
    let layout = compute_layout(&LayoutRequest::Mixed(items), &cfg).unwrap();
    let v = layout_to_json(&layout, &cfg);
    assert_eq!(v["kind"], "mixed");
    assert_eq!(v["rows"], 1);
    let label = &v["slots"][0]["label"];
    assert_eq!(label["text"], "A");
    assert_eq!(label["x"], 33.0);
    assert_eq!(label["w"], 10.0);
}

#[test]
fn case_layout_serde_is_tagged() {
    let cfg = CaseConfig::default();
    let layout = compute_layout(
        &LayoutRequest::Single {
            dims: (20.0, 20.0, 20.0),
            count: Some(2),
        },
        &cfg,
    )
    .unwrap();
    let s = serde_json::to_string(&layout).unwrap();
    assert!(s.contains(r#""kind":"grid""#));
    let back: CaseLayout = serde_json::from_str(&s).unwrap();
    assert_eq!(back.slots().len(), 2);
}
