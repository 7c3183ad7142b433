use std::path::PathBuf;

use super::*;
use crate::foundation::core::Rgba16;
use crate::raster::source::Solid;

#[test]
fn defaults_are_valid_and_documented() {
    let o = RenderOpts::default();
    assert_eq!((o.canvas.width, o.canvas.height), (800, 800));
    assert_eq!(o.zoom, 2.0);
    assert_eq!(o.interpolation, Interpolation::Bilinear);
    assert_eq!(o.fetch_zoom, 2);
    assert_eq!(o.jpeg_quality, 75);
    o.validate().unwrap();
}

#[test]
fn validate_rejects_bad_values() {
    let bad = [
        RenderOpts {
            zoom: 0.0,
            ..RenderOpts::default()
        },
        RenderOpts {
            zoom: f64::INFINITY,
            ..RenderOpts::default()
        },
        RenderOpts {
            jpeg_quality: 0,
            ..RenderOpts::default()
        },
        RenderOpts {
            max_in_flight: 0,
            ..RenderOpts::default()
        },
        RenderOpts {
            threads: Some(0),
            ..RenderOpts::default()
        },
        RenderOpts {
            canvas: Canvas {
                width: 0,
                height: 10,
            },
            ..RenderOpts::default()
        },
    ];
    for o in bad {
        assert!(o.validate().is_err(), "{o:?}");
    }
}

#[test]
fn partial_json_fills_defaults_and_unknown_fields_fail() {
    let dir = PathBuf::from("target").join("pipeline_opts");
    std::fs::create_dir_all(&dir).unwrap();

    let ok = dir.join("ok.json");
    std::fs::write(
        &ok,
        br#"{"zoom": 3.5, "interpolation": "nearest", "edge": "wrap", "canvas": {"width": 64, "height": 32}}"#,
    )
    .unwrap();
    let o = RenderOpts::from_path(&ok).unwrap();
    assert_eq!(o.zoom, 3.5);
    assert_eq!(o.interpolation, Interpolation::Nearest);
    assert_eq!(o.edge, EdgePolicy::Wrap);
    assert_eq!((o.canvas.width, o.canvas.height), (64, 32));
    assert_eq!(o.fetch_zoom, 2);

    let bad = dir.join("bad.json");
    std::fs::write(&bad, br#"{"zoom": 2.0, "colour": "red"}"#).unwrap();
    assert!(matches!(
        RenderOpts::from_path(&bad),
        Err(PlanetError::Validation(_))
    ));

    assert!(RenderOpts::from_path(dir.join("missing.json")).is_err());
}

#[test]
fn solid_surface_renders_solid_planet() {
    let color = Rgba16::opaque(12000, 34000, 56000);
    let source = Solid {
        width: 256,
        height: 128,
        color,
    };
    for parallel in [true, false] {
        let opts = RenderOpts {
            canvas: Canvas {
                width: 40,
                height: 30,
            },
            parallel,
            threads: Some(2),
            ..RenderOpts::default()
        };
        let out = render_surface(&source, &opts).unwrap();
        assert_eq!((out.width(), out.height()), (40, 30));
        assert!(out.pixels().iter().all(|&c| c == color));
    }
}

#[test]
fn render_image_decodes_then_warps() {
    let img = image::RgbaImage::from_pixel(32, 16, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let opts = RenderOpts {
        canvas: Canvas {
            width: 9,
            height: 9,
        },
        ..RenderOpts::default()
    };
    let out = render_image(&buf, &opts).unwrap();
    assert!(
        out.pixels()
            .iter()
            .all(|&c| c == Rgba16::from_rgba8([10, 20, 30, 255]))
    );
    assert!(render_image(b"nope", &opts).is_err());
}
