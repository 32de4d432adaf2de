use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use plate_locator::detection::{crop_region, Contour};
use plate_locator::{BoundingBox, LocatorParams, PlateError, PlateProcessor};
use imageproc::point::Point;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct BoxResponse {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct StepResponse {
    name: String,
    time_ms: u64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ReadingResponse {
    recognition: Option<serde_json::Value>,
    bbox: BoxResponse,
    candidate_rank: usize,
    contours_found: usize,
    processing_time_ms: u64,
    steps: Vec<StepResponse>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

/// Flat dark background with bright axis-aligned rectangles
fn scene(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let inside = rects
            .iter()
            .any(|&(rx, ry, rw, rh)| x >= rx && x < rx + rw && y >= ry && y < ry + rh);
        if inside {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn plate_scene() -> GrayImage {
    scene(512, 300, &[(50, 60, 120, 40)])
}

fn locator() -> PlateProcessor {
    PlateProcessor::new(LocatorParams::default(), None).unwrap()
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plate-locator"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run plate-locator")
}

fn write_png(dir: &Path, name: &str, image: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture");
    path
}

#[test]
fn test_synthetic_plate_is_cropped_exactly() {
    let localization = locator()
        .locate(DynamicImage::ImageLuma8(plate_scene()))
        .unwrap();

    assert_eq!(
        localization.region.bbox,
        BoundingBox {
            x: 50,
            y: 60,
            width: 120,
            height: 40
        }
    );
    assert_eq!(localization.region.image.dimensions(), (120, 40));
    assert_eq!(localization.candidate.polygon.len(), 4);
    assert!(localization.candidate.rank < 15);
}

#[test]
fn test_uniform_image_reports_no_candidate() {
    let flat = GrayImage::from_pixel(512, 300, Luma([128]));
    let result = locator().locate(DynamicImage::ImageLuma8(flat));

    match result {
        Err(PlateError::NoCandidateFound { examined }) => assert_eq!(examined, 0),
        other => panic!("expected NoCandidateFound, got {:?}", other.map(|l| l.region.bbox)),
    }
}

#[test]
fn test_selection_is_deterministic() {
    let image = DynamicImage::ImageLuma8(scene(
        512,
        400,
        &[(40, 40, 150, 50), (260, 200, 180, 60), (60, 250, 40, 40)],
    ));

    let first = locator().locate(image.clone()).unwrap();
    let second = locator().locate(image).unwrap();

    assert_eq!(first.region.bbox, second.region.bbox);
    assert_eq!(first.candidate.contour, second.candidate.contour);
    assert_eq!(first.candidate.polygon, second.candidate.polygon);
}

#[test]
fn test_larger_quadrilateral_wins_over_plate() {
    // A large rectangular object (e.g. a window) outranks the plate
    let image = scene(512, 400, &[(50, 60, 120, 40), (200, 150, 280, 200)]);
    let localization = locator().locate(DynamicImage::ImageLuma8(image)).unwrap();

    assert_eq!(
        localization.region.bbox,
        BoundingBox {
            x: 200,
            y: 150,
            width: 280,
            height: 200
        }
    );
}

#[test]
fn test_upscaled_input_selects_same_region() {
    // Same scene at twice the resolution, as a color photo
    let large = scene(1024, 600, &[(100, 120, 240, 80)]);
    let color = RgbImage::from_fn(1024, 600, |x, y| {
        let v = large.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    });

    let localization = locator().locate(DynamicImage::ImageRgb8(color)).unwrap();
    let bbox = localization.region.bbox;

    assert_eq!(localization.color.dimensions(), (512, 300));
    assert!(bbox.x.abs_diff(50) <= 2, "x = {}", bbox.x);
    assert!(bbox.y.abs_diff(60) <= 2, "y = {}", bbox.y);
    assert!(bbox.width.abs_diff(120) <= 3, "width = {}", bbox.width);
    assert!(bbox.height.abs_diff(40) <= 3, "height = {}", bbox.height);
}

#[test]
fn test_border_touching_contour_is_clipped() {
    let image = plate_scene();
    let contour = Contour::new(vec![
        Point::new(400, 250),
        Point::new(520, 250),
        Point::new(520, 310),
        Point::new(400, 310),
    ]);

    let region = crop_region(&image, &contour).unwrap();
    assert_eq!(
        region.bbox,
        BoundingBox {
            x: 400,
            y: 250,
            width: 112,
            height: 50
        }
    );
    assert_eq!(region.image.dimensions(), (112, 50));
}

#[test]
fn test_contour_cap_limits_examined_candidates() {
    let params = LocatorParams {
        max_candidates: 1,
        ..Default::default()
    };
    let processor = PlateProcessor::new(params, None).unwrap();
    let localization = processor
        .locate(DynamicImage::ImageLuma8(plate_scene()))
        .unwrap();
    assert_eq!(localization.candidate.rank, 0);
}

#[test]
fn test_cli_prints_plate_box_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "plate.png", &plate_scene());

    let output = run_cli(&[input.to_str().unwrap(), "--skip-ocr", "--json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let reading: ReadingResponse = serde_json::from_slice(&output.stdout).unwrap();
    assert!(reading.recognition.is_none());
    assert_eq!(
        (reading.bbox.x, reading.bbox.y, reading.bbox.width, reading.bbox.height),
        (50, 60, 120, 40)
    );
    assert!(reading.steps.iter().any(|s| s.name == "edges"));
}

#[test]
fn test_cli_writes_annotated_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "plate.png", &plate_scene());
    let annotated = dir.path().join("annotated.png");

    let output = run_cli(&[
        input.to_str().unwrap(),
        "--skip-ocr",
        "--output",
        annotated.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("x=50 y=60 width=120 height=40"), "stdout: {}", stdout);

    let written = image::open(&annotated).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (512, 300));
    assert_eq!(*written.get_pixel(50, 60), Rgb([0, 255, 0]));
}

#[test]
fn test_cli_reports_missing_plate_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "flat.png", &GrayImage::from_pixel(512, 300, Luma([40])));

    let output = run_cli(&[input.to_str().unwrap(), "--skip-ocr", "--json"]);
    assert_eq!(output.status.code(), Some(2));

    let error: ErrorResponse = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(error.code, "NO_CANDIDATE");
}

#[test]
fn test_cli_rejects_undecodable_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("garbage.jpg");
    std::fs::write(&input, b"definitely not a jpeg").unwrap();

    let output = run_cli(&[input.to_str().unwrap(), "--skip-ocr", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let error: ErrorResponse = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(error.code, "INPUT_DECODE_ERROR");
    assert!(!error.error.is_empty());
}
