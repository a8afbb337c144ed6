//! Batch runs: one bad logo must not take the others down.

mod common;

use common::{mark_and_text_logo, write_png};
use image::RgbaImage;
use logo_icon::batch::{ItemStatus, expand_inputs, run_batch};
use logo_icon::config::{GapThreshold, IconConfig};
use logo_icon::error::Stage;

fn batch_config() -> IconConfig {
    IconConfig {
        canvas_size: 128,
        merge_gap: GapThreshold::Pixels(20),
        ..IconConfig::default()
    }
}

#[test]
fn failing_image_is_isolated_from_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_png(dir.path(), "good.png", &mark_and_text_logo());
    let blank = write_png(dir.path(), "blank.png", &RgbaImage::new(64, 32));
    let out_dir = dir.path().join("icons");

    let summary = run_batch(&[good.clone(), blank.clone()], &out_dir, &batch_config()).unwrap();

    assert_eq!((summary.total, summary.succeeded, summary.failed), (2, 1, 1));
    assert_eq!(summary.items[0].input, good);
    assert_eq!(summary.items[1].input, blank);

    match &summary.items[0].status {
        ItemStatus::Ok {
            output,
            symbol_width,
            symbol_height,
        } => {
            assert_eq!(output, &out_dir.join("good.png"));
            assert_eq!((*symbol_width, *symbol_height), (160, 100));
            let icon = image::open(output).unwrap();
            assert_eq!((icon.width(), icon.height()), (128, 128));
        }
        other => panic!("expected success, got {:?}", other),
    }
    match &summary.items[1].status {
        ItemStatus::Failed { stage, .. } => assert_eq!(*stage, Stage::Scan),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!out_dir.join("blank.png").exists());
}

#[test]
fn directory_input_feeds_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let logos = dir.path().join("logos");
    std::fs::create_dir(&logos).unwrap();
    write_png(&logos, "one.png", &mark_and_text_logo());
    write_png(&logos, "two.png", &mark_and_text_logo());

    let inputs = expand_inputs(&[logos.display().to_string()]).unwrap();
    assert_eq!(inputs.len(), 2);

    let out_dir = dir.path().join("icons");
    let summary = run_batch(&inputs, &out_dir, &batch_config()).unwrap();
    assert_eq!(summary.failed, 0);
    assert!(out_dir.join("one.png").is_file());
    assert!(out_dir.join("two.png").is_file());

    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"][0]["status"], "ok");
    assert_eq!(json["items"][0]["symbol_width"], 160);
}

#[test]
fn invalid_config_fails_the_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let config = IconConfig {
        occupied_fraction: 1.5,
        ..batch_config()
    };
    let err = run_batch(&[], dir.path(), &config).unwrap_err();
    assert_eq!(err.stage(), Stage::Config);
}

#[test]
fn same_stem_inputs_do_not_overwrite_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "brand.png", &mark_and_text_logo());
    let jpg = dir.path().join("brand.jpg");
    image::DynamicImage::ImageRgba8(mark_and_text_logo())
        .to_rgb8()
        .save(&jpg)
        .unwrap();
    let out_dir = dir.path().join("icons");

    let summary = run_batch(&[png, jpg], &out_dir, &batch_config()).unwrap();
    assert_eq!(summary.succeeded, 2);

    let outputs: Vec<_> = summary
        .items
        .iter()
        .map(|item| match &item.status {
            ItemStatus::Ok { output, .. } => output.clone(),
            other => panic!("expected success, got {:?}", other),
        })
        .collect();
    assert_eq!(outputs, vec![out_dir.join("brand.png"), out_dir.join("brand-jpg.png")]);
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 2);
}
