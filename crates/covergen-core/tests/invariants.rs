use covergen_core::engine::Stage;
use covergen_core::stage::{blur, flow, gradient, vibrancy};
use covergen_core::{CoverError, CoverParams, Engine, PixelBuffer, Rgb};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn in_range(buf: &PixelBuffer) -> bool {
    buf.as_slice().iter().all(|&v| (0.0..=255.0).contains(&v))
}

#[test]
fn every_stage_stays_in_channel_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let palette = covergen_core::color::generate_palette(&mut rng, 6, None, true);

    let (_, g) = gradient::render_gradient(&mut rng, 96, 64, &palette, 9).unwrap();
    assert!(in_range(&g));

    let f = flow::flow_distort(&g, 0.2).unwrap();
    assert!(in_range(&f));

    let b = blur::multi_scale_blur(&f, 4.0, 3).unwrap();
    assert!(in_range(&b));

    let v = vibrancy::enhance_vibrancy(
        &b,
        vibrancy::VibrancyParams {
            saturation: 3.0,
            contrast: 3.0,
        },
    )
    .unwrap();
    assert!(in_range(&v));
}

#[test]
fn engine_reports_each_stage() {
    let p = CoverParams {
        width: 40,
        height: 30,
        blur_sigma: 2.0,
        seed: Some(9),
        ..CoverParams::default()
    };
    let r = Engine::new(p).unwrap().render().unwrap();
    let stages: Vec<Stage> = r.stats.iter().map(|s| s.stage).collect();
    assert_eq!(
        stages,
        [Stage::Gradient, Stage::Flow, Stage::Blur, Stage::Vibrancy]
    );
    for s in &r.stats {
        assert!(s.min >= 0.0 && s.max <= 255.0);
    }
}

#[test]
fn zero_distortion_skips_flow_stage() {
    let p = CoverParams {
        width: 20,
        height: 10,
        distortion: 0.0,
        blur_sigma: 1.0,
        seed: Some(3),
        ..CoverParams::default()
    };
    let r = Engine::new(p).unwrap().render().unwrap();
    assert!(r.stats.iter().all(|s| s.stage != Stage::Flow));
}

#[test]
fn white_only_palette_renders_white_field() {
    let p = CoverParams {
        width: 16,
        height: 16,
        num_colors: 0,
        include_white: true,
        blur_sigma: 1.0,
        seed: Some(11),
        ..CoverParams::default()
    };
    let r = Engine::new(p).unwrap().render().unwrap();
    assert_eq!(r.palette, vec![Rgb::WHITE]);
    for px in r.buffer.as_slice().chunks_exact(3) {
        assert!(px[0] == px[1] && px[1] == px[2], "tinted pixel {px:?}");
        assert!(px[0] >= 250.0, "dim pixel {px:?}");
    }
}

#[test]
fn empty_palette_is_refused_up_front() {
    let p = CoverParams {
        num_colors: 0,
        include_white: false,
        ..CoverParams::default()
    };
    assert!(matches!(Engine::new(p), Err(CoverError::Validation(_))));
}

#[test]
fn theme_hue_drives_the_first_generated_color() {
    let p = CoverParams {
        theme: Some("#0000FF".into()),
        num_colors: 2,
        include_white: false,
        seed: Some(0),
        ..CoverParams::default()
    };
    let (_, palette) = Engine::new(p).unwrap().palette();
    let c = palette[0];
    assert!(c.b > c.r && c.b > c.g, "expected blue base, got {c}");
}

#[test]
fn oversized_blur_is_refused_not_allocated() {
    let p = CoverParams {
        width: 8,
        height: 8,
        blur_sigma: 1e12,
        blur_scales: 1,
        distortion: 0.0,
        seed: Some(1),
        ..CoverParams::default()
    };
    match Engine::new(p).and_then(|mut e| e.render()) {
        Err(CoverError::Validation(_)) | Err(CoverError::Alloc { .. }) => {}
        other => panic!("expected a reported error, got {:?}", other.map(|r| r.seed)),
    }

    let p = CoverParams {
        width: 8,
        height: 8,
        blur_scales: 80,
        seed: Some(1),
        ..CoverParams::default()
    };
    assert!(matches!(Engine::new(p), Err(CoverError::Validation(_))));
}

#[test]
fn widest_accepted_blur_finishes_on_small_canvas() {
    use covergen_core::params::defaults::{MAX_BLUR_SCALES, MAX_BLUR_SIGMA};

    let p = CoverParams {
        width: 8,
        height: 8,
        blur_sigma: MAX_BLUR_SIGMA,
        blur_scales: MAX_BLUR_SCALES,
        seed: Some(1),
        ..CoverParams::default()
    };
    let r = Engine::new(p).unwrap().render().unwrap();
    assert_eq!((r.buffer.width(), r.buffer.height()), (8, 8));
    assert!(in_range(&r.buffer));
}
