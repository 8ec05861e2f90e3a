use std::fs;
use std::path::Path;

use shipsheet::{Renderer, ResourceSet, Settings, render_ship_sheet, render_tile_batch};
use tile_core::{Face, Icon, Metrics, System, TextStyle, TileGeometry, TileLayoutEngine};

fn write_icons(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    let arrow = tile_core::encode_rgba_to_png_bytes(5, 2, &[0u8; 5 * 2 * 4]).unwrap();
    let square = tile_core::encode_rgba_to_png_bytes(2, 2, &[255u8; 2 * 2 * 4]).unwrap();
    for icon in Icon::ALL {
        let bytes = if icon == Icon::Arrow { &arrow } else { &square };
        fs::write(dir.join(icon.file_name()), bytes).unwrap();
    }
}

fn settings_in(root: &Path) -> Settings {
    write_icons(&root.join("resources"));
    Settings {
        ship: root.join("ship.json"),
        systems: root.join("systems.json"),
        cores: root.join("cores.json"),
        mess_halls: root.join("mess.json"),
        tile_dir: root.join("systems"),
        sheet_dir: root.to_path_buf(),
        font_dir: root.join("fonts"),
        icon_dir: root.join("resources"),
        ..Settings::default()
    }
}

fn write_batch_inputs(settings: &Settings, core_rules: &str) {
    fs::write(
        &settings.systems,
        r#"{"systems": [{"name": "Laser Battery", "rules": "Weapon",
            "areas": [{"cost": {"energy": 2, "crew": 1}, "shoot": {"damage": 3, "range": 4},
                       "description": "Fire at a ship in the front arc"}],
            "hull": true}]}"#,
    )
    .unwrap();
    fs::write(
        &settings.cores,
        format!(r#"{{"cores": [{{"name": "Reactor", "rules": "{core_rules}", "circles": 2}}]}}"#),
    )
    .unwrap();
    fs::write(
        &settings.mess_halls,
        r#"{"mess_halls": [{"name": "Mess", "rules": "Galley: Standard", "med_bay": 1}]}"#,
    )
    .unwrap();
}

fn is_jpeg(path: &Path) -> bool {
    fs::read(path).unwrap().starts_with(&[0xFF, 0xD8, 0xFF])
}

#[test]
fn tile_batch_writes_one_jpeg_per_system() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    write_batch_inputs(&settings, "Core: Alpha");

    let resources = ResourceSet::load(&settings).unwrap();
    let renderer = Renderer::new(&resources);
    let written = render_tile_batch(&settings, &renderer).unwrap();

    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["laser_battery.jpg", "core_2_alpha.jpg", "mess_standard.jpg"]
    );
    for path in &written {
        assert!(path.starts_with(&settings.tile_dir));
        assert!(is_jpeg(path), "{} is not a JPEG", path.display());
    }

    let tile = image::open(&written[1]).unwrap();
    assert_eq!(tile.width(), 945);
}

#[test]
fn bad_core_rules_abort_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    write_batch_inputs(&settings, "no separator");

    let resources = ResourceSet::load(&settings).unwrap();
    let renderer = Renderer::new(&resources);
    let err = render_tile_batch(&settings, &renderer).unwrap_err();
    assert!(err.to_string().contains("Reactor"));
    assert!(!settings.tile_dir.exists());
}

#[test]
fn ship_sheet_is_a5() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    fs::write(
        &settings.ship,
        r#"{
            "title": "Iron Gull",
            "subtitle": "Corvette",
            "command": 2,
            "control": 1,
            "shields": {"front": [1, 0, 1], "rear": [2, 0]},
            "sections": {
                "left": [{"name": "Thrusters", "areas": [{"cost": {"energy": 1}, "description": "Move 1"}]}],
                "core": [{"name": "Bridge", "electronics": true}],
                "right": [{"name": "Cargo"}]
            },
            "reactor": {"name": "Reactor", "rules": "Core: Beta", "circles": 3},
            "mess": {"name": "Mess", "med_bay": 2}
        }"#,
    )
    .unwrap();

    let resources = ResourceSet::load(&settings).unwrap();
    let renderer = Renderer::new(&resources);
    let path = render_ship_sheet(&settings, &renderer).unwrap();
    assert_eq!(path, dir.path().join("iron_gull_sheet.jpg"));
    let sheet = image::open(&path).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (2480, 1748));
}

#[test]
fn missing_ship_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let resources = ResourceSet::load(&settings).unwrap();
    let renderer = Renderer::new(&resources);
    let err = render_ship_sheet(&settings, &renderer).unwrap_err();
    assert!(err.to_string().contains("ship.json"));
}

#[test]
fn fallback_font_still_measures_and_draws_text() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let resources = ResourceSet::load(&settings).unwrap();
    assert!(resources.fonts.resolve(Face::EurostileExtendedBold).fallback);
    if resources.fonts.database().len() == 0 {
        // No system fonts on this machine, nothing to fall back to.
        return;
    }

    let extent = resources
        .text_extent("LASER", TextStyle::new(Face::EurostileExtendedBold, 56))
        .unwrap();
    assert!(extent.width > 0 && extent.height > 0, "{extent:?}");

    let system = generic_system("Laser Battery", "Weapon: fires forward");
    let geometry = TileGeometry::default();
    let scene = TileLayoutEngine::new(&geometry, &resources)
        .layout(&system)
        .unwrap();
    // margin, spacing twice and the 100px minimum, plus the title and rules
    assert!(scene.height > 9 + 4 + 4 + 100, "height {}", scene.height);
}

fn generic_system(name: &str, rules: &str) -> System {
    System {
        name: name.to_string(),
        kind: tile_core::SystemKind::Generic,
        rules: Some(rules.to_string()),
        areas: Vec::new(),
        hull: false,
        electronics: false,
        life_support: false,
        circles: None,
        med_bay: None,
    }
}
