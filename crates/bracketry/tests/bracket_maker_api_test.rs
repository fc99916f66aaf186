//! Integration tests for the BracketMaker API
//!
//! These tests drive the public API end to end on an in-memory canvas.

use bracketry::{
    BracketError, BracketMaker,
    builder::BracketVariant,
    canvas::{Canvas, GridCanvas, MiddleLabel},
    config::AppConfig,
    structure::MatchRole,
};

fn teams(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Team {i}")).collect()
}

#[test]
fn test_maker_api_exists() {
    let _maker = BracketMaker::default();
    let _maker = BracketMaker::new(AppConfig::default());
}

#[test]
fn test_smallest_bracket_on_canvas() {
    let maker = BracketMaker::default();
    let mut canvas = GridCanvas::new();

    let tree = maker
        .build_bracket(&mut canvas, &["Ann", "Bob", "Cy"], 1, BracketVariant::Standard)
        .expect("Failed to build bracket");

    assert_eq!(tree.plan().preliminary_matches(), 1);
    assert_eq!(tree.match_count(), 3);

    // The bye is written straight into the final.
    let final_match = tree.final_match().expect("standard bracket has a final");
    let top = final_match.top();
    let cell = canvas.cell(top.column(), top.row()).expect("final top cell");
    assert_eq!(cell.content().map(|c| c.as_str()), Some("Ann"));

    let winner = final_match.advance_slot().offset_rows(1);
    assert_eq!(canvas.label_at(winner.column(), winner.row()), Some(MiddleLabel::Winner));

    let third = tree.third_place().expect("standard bracket has a third-place match");
    let bronze = third.advance_slot().offset_rows(1);
    assert_eq!(canvas.label_at(bronze.column(), bronze.row()), Some(MiddleLabel::Bronze));

    let regions = canvas.named_regions("BracketRange");
    let mut names: Vec<_> = regions.iter().map(|r| r.name().to_string()).collect();
    names.sort();
    assert_eq!(names, ["BracketRange1", "BracketRange2", "BracketRange3"]);
}

#[test]
fn test_qualification_bracket_on_canvas() {
    let maker = BracketMaker::default();
    let mut canvas = GridCanvas::new();

    let tree = maker
        .build_bracket(
            &mut canvas,
            &teams(16),
            1,
            BracketVariant::Qualification { qualified: 4 },
        )
        .expect("Failed to build qualification bracket");

    assert_eq!(tree.registry().columns(), vec![1, 2]);
    assert!(tree.final_match().is_none());
    assert!(tree.matches().all(|m| m.role() != MatchRole::ThirdPlace));

    let qualified = canvas
        .labels()
        .iter()
        .filter(|label| label.label() == MiddleLabel::Qualified)
        .count();
    assert_eq!(qualified, 4);
}

#[test]
fn test_custom_prefix_and_layout() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        slot_span = 3
        match_gap = 0
        region_prefix = "Cup"
        "#,
    )
    .expect("valid config");
    let maker = BracketMaker::new(config);
    let mut canvas = GridCanvas::new();

    let tree = maker
        .build_bracket(&mut canvas, &teams(4), 1, BracketVariant::Standard)
        .expect("Failed to build bracket");

    let first = tree.registry().get(1, 2).expect("second first-round match");
    assert_eq!(first.top().row(), 4);
    assert_eq!(canvas.named_regions("Cup").len(), 4);
    assert!(canvas.named_regions("BracketRange").is_empty());
    assert_eq!(maker.read_bracket(&canvas).expect("readable").len(), 4);
}

#[test]
fn test_state_file_roundtrip() {
    let maker = BracketMaker::default();
    let mut canvas = GridCanvas::new();
    maker
        .build_bracket(&mut canvas, &teams(9), 1, BracketVariant::Standard)
        .expect("Failed to build bracket");

    let restored = GridCanvas::from_toml(&canvas.to_toml().expect("serializable"))
        .expect("deserializable");
    assert_eq!(restored, canvas);

    let before = maker.read_bracket(&canvas).expect("readable");
    let after = maker.read_bracket(&restored).expect("readable");
    assert_eq!(before.len(), after.len());
}

#[test]
fn test_render_svg() {
    let maker = BracketMaker::default();
    let mut canvas = GridCanvas::new();
    maker
        .build_bracket(&mut canvas, &teams(6), 1, BracketVariant::Standard)
        .expect("Failed to build bracket");

    let svg = maker.render_svg(&canvas).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("WINNER"));
    assert!(svg.contains("BRONZE"));
}

#[test]
fn test_render_empty_canvas_fails() {
    let maker = BracketMaker::default();
    let err = maker.render_svg(&GridCanvas::new()).unwrap_err();
    assert!(matches!(err, BracketError::Export(_)));
}

#[test]
fn test_both_sides_is_unsupported() {
    let maker = BracketMaker::default();
    let mut canvas = GridCanvas::new();

    let err = maker
        .build_bracket(&mut canvas, &teams(8), 1, BracketVariant::BothSides)
        .unwrap_err();
    assert!(matches!(err, BracketError::UnsupportedVariant(_)));
    assert!(err.is_input_error());
    assert!(canvas.is_blank());
}
