use crate::{full_manifest, Workdir, ICON_COLOR};
use dev_icon::{
    badge::{BadgeGeometry, BadgeStyle},
    font::FontChain,
    generate::{run, Config},
    manifest::{Manifest, DEFAULT_FOLDER},
    ICON_SIZES,
};

fn config(workdir: &Workdir) -> Config {
    Config {
        source_dir: workdir.source_dir(),
        dest_dir: workdir.dest_dir(),
        folder: DEFAULT_FOLDER.to_owned(),
        style: BadgeStyle::default(),
        fonts: FontChain::builtin(),
    }
}

fn run_quiet(config: &Config) -> eyre::Result<dev_icon::generate::Report> {
    run(config, &mut Vec::<u8>::new())
}

#[test]
fn should_generate_every_size() {
    let workdir = Workdir::new()
        .with_icons(&ICON_SIZES)
        .with_manifest(&full_manifest());

    let report = run_quiet(&config(&workdir)).unwrap();

    assert_eq!(report.skipped, Vec::<u32>::new());
    assert_eq!(
        report.generated.iter().map(|(s, _)| *s).collect::<Vec<_>>(),
        ICON_SIZES.to_vec()
    );
    for size in ICON_SIZES {
        let icon = workdir.dest_icon(size);
        assert_eq!(icon.dimensions(), (size, size));

        let geometry = BadgeGeometry::for_icon(size);
        for (x, y, pixel) in icon.enumerate_pixels() {
            if !geometry.contains(x as i32, y as i32) {
                assert_eq!(*pixel, ICON_COLOR, "size {size} at ({x}, {y})");
            }
        }
        let cx = (geometry.x + geometry.width as i32 / 2) as u32;
        let cy = (geometry.y + geometry.height as i32 / 2) as u32;
        assert_ne!(*icon.get_pixel(cx, cy), ICON_COLOR);
    }
}

#[test]
fn should_skip_missing_sizes() {
    let workdir = Workdir::new()
        .with_icons(&[16, 32, 64, 128, 256, 1024])
        .with_manifest(&full_manifest());
    let mut out = Vec::new();

    let report = run(&config(&workdir), &mut out).unwrap();

    assert_eq!(report.skipped, vec![512]);
    assert!(!workdir.dest_dir().join("512.png").exists());
    for size in [16, 32, 64, 128, 256, 1024] {
        assert!(workdir.dest_dir().join(format!("{}.png", size)).is_file());
    }
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("  [skip] 512.png not found\n"));
}

#[test]
fn should_succeed_with_no_icons_at_all() {
    let workdir = Workdir::new().with_manifest(r#"{"images":[]}"#);

    let report = run_quiet(&config(&workdir)).unwrap();

    assert_eq!(report.skipped, ICON_SIZES.to_vec());
    assert!(report.generated.is_empty());
    assert!(workdir.dest_dir().join("Contents.json").is_file());
}

#[test]
fn should_derive_manifest_for_single_icon() {
    let workdir = Workdir::new()
        .with_icon(16)
        .with_manifest(r#"{"images":[{"size":"16x16","scale":"1x","filename":"16.png"}]}"#);

    run_quiet(&config(&workdir)).unwrap();

    let written = String::from_utf8(workdir.read_dest("Contents.json")).unwrap();
    assert!(written.ends_with("}\n"));
    let derived: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        derived,
        serde_json::json!({"images":[{"size":"16x16","scale":"1x","filename":"16.png","folder":"Assets.xcassets/AppIcon-Dev.appiconset/"}]})
    );
    assert_eq!(workdir.dest_icon(16).dimensions(), (16, 16));
}

#[test]
fn should_keep_descriptors_for_skipped_sizes() {
    let workdir = Workdir::new()
        .with_icon(16)
        .with_manifest(&full_manifest());

    run_quiet(&config(&workdir)).unwrap();

    let source = Manifest::read(workdir.source_dir().join("Contents.json")).unwrap();
    let derived = Manifest::read(workdir.dest_dir().join("Contents.json")).unwrap();
    assert_eq!(derived.images.len(), source.images.len());
    assert_eq!(derived.metadata, source.metadata);
}

#[test]
fn should_produce_identical_output_when_run_twice() {
    let workdir = Workdir::new()
        .with_icons(&ICON_SIZES)
        .with_manifest(&full_manifest());
    let config = config(&workdir);

    run_quiet(&config).unwrap();
    let first: Vec<_> = ICON_SIZES
        .iter()
        .map(|size| workdir.read_dest(&format!("{}.png", size)))
        .collect();
    let first_manifest = workdir.read_dest("Contents.json");

    run_quiet(&config).unwrap();
    let second: Vec<_> = ICON_SIZES
        .iter()
        .map(|size| workdir.read_dest(&format!("{}.png", size)))
        .collect();

    assert_eq!(first, second);
    assert_eq!(first_manifest, workdir.read_dest("Contents.json"));
}

#[test]
fn should_create_nested_output_directory() {
    let workdir = Workdir::new()
        .with_icon(32)
        .with_manifest(r#"{"images":[]}"#);
    let mut config = config(&workdir);
    config.dest_dir = workdir.path().join("a").join("b").join("Dev.appiconset");

    run_quiet(&config).unwrap();

    assert!(config.dest_dir.join("32.png").is_file());
}

#[test]
fn should_fail_without_manifest() {
    let workdir = Workdir::new().with_icon(16);

    let err = run_quiet(&config(&workdir)).unwrap_err();

    assert!(err.to_string().starts_with("failed to read manifest"));
}

#[test]
fn should_fail_with_malformed_manifest() {
    let workdir = Workdir::new()
        .with_icon(16)
        .with_manifest(r#"{"images":{"filename":"16.png"}}"#);

    let err = run_quiet(&config(&workdir)).unwrap_err();

    assert!(err.to_string().starts_with("failed to parse manifest"));
}

#[test]
fn should_print_status_lines() {
    let workdir = Workdir::new()
        .with_icons(&[16, 32])
        .with_manifest(r#"{"images":[]}"#);
    let mut out = Vec::new();

    run(&config(&workdir), &mut out).unwrap();

    let dest = workdir.dest_dir();
    let expected = format!(
        "  [ok]   16x16 -> {}\n\
         \x20 [ok]   32x32 -> {}\n\
         \x20 [skip] 64.png not found\n\
         \x20 [skip] 128.png not found\n\
         \x20 [skip] 256.png not found\n\
         \x20 [skip] 512.png not found\n\
         \x20 [skip] 1024.png not found\n\
         \x20 [ok]   Contents.json -> {}\n\
         \n\
         Done! DEV icons generated in AppIcon-Dev.appiconset/\n",
        dest.join("16.png").display(),
        dest.join("32.png").display(),
        dest.join("Contents.json").display(),
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
