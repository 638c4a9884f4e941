//! End-to-end properties of rendered identicons.

use nineblock::{
    export, layout, FieldLayout, IdentityCode, NineBlockRenderer, RenderingBuffer, Rgba8,
};

const BOUNDARY_CODES: [u32; 8] = [
    0,
    1,
    u32::MAX,
    0x8000_0000,
    0x7FFF_FFFF,
    0x0001_0000,
    0x0400_0000,
    0xAAAA_5555,
];

/// Largest channel difference between `img` and itself turned a quarter
/// turn clockwise.
fn quarter_turn_diff(img: &RenderingBuffer) -> u8 {
    let n = img.width();
    assert_eq!(n, img.height());
    let mut max = 0;
    for y in 0..n {
        for x in 0..n {
            let a = img.pixel(x, y).unwrap();
            let b = img.pixel(n - 1 - y, x).unwrap();
            for (p, q) in [(a.r, b.r), (a.g, b.g), (a.b, b.b), (a.a, b.a)] {
                max = max.max(p.abs_diff(q));
            }
        }
    }
    max
}

fn mean_channel_diff(a: &RenderingBuffer, b: &RenderingBuffer) -> f64 {
    let bytes = a.as_bytes().len();
    let sum: u64 = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(p, q)| p.abs_diff(*q) as u64)
        .sum();
    sum as f64 / bytes as f64
}

#[test]
fn test_render_is_deterministic() {
    let a = NineBlockRenderer::new();
    let b = NineBlockRenderer::new();
    for code in [0u32, 42, 0x1234_5678, u32::MAX] {
        let first = a.render(code, 48).unwrap();
        assert_eq!(first, a.render(code, 48).unwrap());
        assert_eq!(first, b.render(code, 48).unwrap());
    }
}

#[test]
fn test_int_and_bytes_agree() {
    let r = NineBlockRenderer::new();
    for code in BOUNDARY_CODES {
        assert_eq!(
            r.render(code, 32).unwrap(),
            r.render_bytes(&code.to_be_bytes(), 32).unwrap(),
            "code {:#x}",
            code
        );
    }
}

#[test]
fn test_high_bits_are_ignored() {
    let r = NineBlockRenderer::new();
    let expected = r.render(0x1234_5678u32, 30).unwrap();
    assert_eq!(
        r.render_bytes(&[0xDE, 0xAD, 0x12, 0x34, 0x56, 0x78], 30).unwrap(),
        expected
    );
    assert_eq!(r.render(0x7_1234_5678u64, 30).unwrap(), expected);

    let all_ones = r.render(u32::MAX, 30).unwrap();
    assert_eq!(r.render(-1i64, 30).unwrap(), all_ones);
    assert_eq!(r.render_bytes(&[0xFF], 30).unwrap(), all_ones);
}

#[test]
fn test_boundary_codes_render() {
    let r = NineBlockRenderer::new();
    for code in BOUNDARY_CODES {
        for size in [1, 7, 60, 64] {
            let img = r.render(code, size).unwrap();
            assert_eq!((img.width(), img.height()), (size, size));
        }
    }
    for bit in 0..32 {
        assert_eq!(r.render(1u32 << bit, 16).unwrap().width(), 16);
    }
}

#[test]
fn test_zero_code_is_black_on_white() {
    let r = NineBlockRenderer::new();
    assert_eq!(r.background(), Rgba8::WHITE);
    let img = r.render_source(0u32).unwrap();
    // Every patch of code 0 is the full square in black.
    assert!(img.pixels().all(|p| p == Rgba8::BLACK));
    assert_eq!(r.colors(&r.decode(0u32)).guard, None);

    let scaled = r.render(0u32, 48).unwrap();
    assert!(scaled.pixels().any(|p| p != Rgba8::WHITE));
}

#[test]
fn test_guard_appears_when_fill_matches_background() {
    let mut r = NineBlockRenderer::new();
    r.set_background(Rgba8::BLACK);

    let colors = r.colors(&r.decode(0u32));
    assert_eq!(colors.fill, Rgba8::BLACK);
    assert_eq!(colors.guard, Some(Rgba8::WHITE));
    let guarded = r.render_source(0u32).unwrap();

    r.set_guard_threshold(0.0).unwrap();
    let plain = r.render_source(0u32).unwrap();
    assert!(plain.pixels().all(|p| p == Rgba8::BLACK));

    assert_ne!(guarded, plain);
    // The top-left corner's outline spills half a pixel into the next cell.
    let edge = guarded.pixel(20, 5).unwrap();
    assert!(edge.r > 64 && edge.r < 192, "edge pixel {}", edge);
}

#[test]
fn test_image_has_quarter_turn_symmetry() {
    let r = NineBlockRenderer::new();
    // side types 0, 4 and 8 are symmetric; the last two codes are not
    for code in [0x0000_1000u32, 0x0000_2000, 0x1234_5678, 0x2468_ACE0] {
        let img = r.render_source(code).unwrap();
        assert!(
            quarter_turn_diff(&img) <= 8,
            "code {:#x} is not symmetric under a quarter turn",
            code
        );
    }
}

#[test]
fn test_side_cells_match_up_to_rotation() {
    let r = NineBlockRenderer::new();
    let img = r.render_source(0x0000_1000u32).unwrap();
    // top side cell (20..40, 0..20) turned clockwise lands on the right side cell
    for y in 0..20 {
        for x in 0..20 {
            let top = img.pixel(20 + x, y).unwrap();
            let right = img.pixel(40 + (19 - y), 20 + x).unwrap();
            assert!(top.r.abs_diff(right.r) <= 8, "({}, {})", x, y);
        }
    }
}

#[test]
fn test_placements_scale_with_patch_size() {
    let spec = nineblock::decode(0x1234_5678u32);
    let small = layout(&spec, 20);
    let large = layout(&spec, 40);
    for (s, l) in small.iter().zip(large.iter()) {
        assert_eq!((l.x, l.y), (s.x * 2, s.y * 2));
        assert_eq!((l.patch, l.turn, l.invert, l.role), (s.patch, s.turn, s.invert, s.role));
    }
}

#[test]
fn test_output_size_independent_of_patch_size() {
    let small = NineBlockRenderer::new();
    let mut large = NineBlockRenderer::new();
    large.set_patch_size(40).unwrap();

    let code = 0x1234_5678u32;
    let a = small.render(code, 60).unwrap();
    let b = large.render(code, 60).unwrap();
    assert_eq!((b.width(), b.height()), (60, 60));
    assert!(mean_channel_diff(&a, &b) < 10.0);
}

#[test]
fn test_field_layouts() {
    let mut r = NineBlockRenderer::new();
    // Bit 16 is shared by side turn and blue in the reference layout only.
    let code = 0x0001_0000u32;
    let reference = r.decode(code);
    let reference_img = r.render(code, 30).unwrap();
    r.set_field_layout(FieldLayout::Disjoint);
    let disjoint = r.decode(code);
    assert_eq!(reference.side_turn, disjoint.side_turn);
    assert_eq!((reference.blue, disjoint.blue), (1, 0));
    assert_ne!(r.render(code, 30).unwrap(), reference_img);

    // Codes without color bits decode the same way in both layouts.
    let low = 0x0000_7FFFu32;
    let disjoint_img = r.render(low, 30).unwrap();
    r.set_field_layout(FieldLayout::Reference);
    assert_eq!(r.render(low, 30).unwrap(), disjoint_img);
}

#[test]
fn test_config_matches_setters() {
    let config = nineblock::RendererConfig::from_json_str(
        r##"{ "patch_size": 24, "background": "#336699", "field_layout": "disjoint" }"##,
    )
    .unwrap();
    let from_config = NineBlockRenderer::with_config(config).unwrap();

    let mut by_hand = NineBlockRenderer::new();
    by_hand.set_patch_size(24).unwrap();
    by_hand.set_background(Rgba8::new_opaque(0x33, 0x66, 0x99));
    by_hand.set_field_layout(FieldLayout::Disjoint);

    let code = IdentityCode::new(0xCAFE_F00D);
    assert_eq!(from_config.render(code, 40).unwrap(), by_hand.render(code, 40).unwrap());
}

#[test]
fn test_png_export_round_trip() {
    let r = NineBlockRenderer::new();
    let img = r.render(0x1234_5678u32, 40).unwrap();
    let path = std::env::temp_dir().join(format!("nineblock-props-{}.png", std::process::id()));
    export::save_png(&img, &path).unwrap();
    let back = export::load_png(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(back, img);
}
