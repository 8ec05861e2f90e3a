use tile_core::{
    Element, Icon, MonospaceMetrics, Point, SheetComposer, SheetGeometry, SheetLayout, Ship,
    TileGeometry,
};

const SHIP: &str = r#"{
    "title": "Dauntless",
    "subtitle": "Light cruiser",
    "command": 4,
    "control": 3,
    "shields": {"front": [1, 0, 2], "rear": [0, 1]},
    "sections": {
        "left": [{"name": "Cargo"}, {"name": "Hold"}],
        "core": [{"name": "Bridge"}],
        "right": []
    },
    "reactor": {"name": "Reactor", "circles": 2},
    "mess": {"name": "Mess", "med_bay": 1}
}"#;

fn compose(json: &str) -> SheetLayout {
    let ship: Ship = serde_json::from_str(json).unwrap();
    let sheet = SheetGeometry::default();
    let tile = TileGeometry::default();
    let metrics = MonospaceMetrics::default();
    SheetComposer::new(&sheet, &tile, &metrics)
        .compose(&ship)
        .unwrap()
}

fn tiles(layout: &SheetLayout) -> Vec<(usize, Point, u32, u32)> {
    layout
        .scene
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Tile {
                index,
                at,
                width,
                height,
            } => Some((*index, *at, *width, *height)),
            _ => None,
        })
        .collect()
}

#[test]
fn sheet_is_a5_at_300_dpi() {
    let layout = compose(SHIP);
    assert_eq!((layout.scene.width, layout.scene.height), (2480, 1748));
}

#[test]
fn shield_rows_draw_slots_then_energy_per_group() {
    let layout = compose(SHIP);
    let shields: Vec<_> = layout
        .scene
        .icons()
        .filter(|(i, _)| matches!(i, Icon::ShieldSlot | Icon::ShieldEnergy))
        .collect();
    // sum(front) + len(front) plus sum(rear) + len(rear)
    assert_eq!(shields.len(), 6 + 3);
    let front: Vec<_> = shields.iter().take(6).map(|(i, _)| *i).collect();
    use Icon::{ShieldEnergy as E, ShieldSlot as S};
    assert_eq!(front, vec![S, E, E, S, S, E]);

    assert_eq!(shields[0].1, Point::new(1807, 1488));
    assert_eq!(shields[1].1, Point::new(1891, 1488));
    assert_eq!(shields[6].1, Point::new(1933, 1628));
}

#[test]
fn reactor_and_mess_stack_in_bottom_left() {
    let layout = compose(SHIP);
    let placed = tiles(&layout);
    let (_, mess_at, _, mess_h) = placed[0];
    let (_, reactor_at, reactor_w, reactor_h) = placed[1];
    assert_eq!(placed[0].0, 1);
    assert_eq!(placed[1].0, 0);
    assert_eq!(reactor_at.x, 20);
    assert_eq!(mess_at.x, 20);
    assert_eq!(reactor_at.y + reactor_h as i32, 1748 - 20);
    assert_eq!(mess_at.y + mess_h as i32 + 20, reactor_at.y);
    assert!(reactor_w <= 766);
}

#[test]
fn columns_stack_independently() {
    let layout = compose(SHIP);
    let placed = tiles(&layout);
    // reactor, mess, two left, one core
    assert_eq!(placed.len(), 5);
    assert_eq!(layout.tiles.len(), 5);

    let left: Vec<_> = placed.iter().filter(|t| t.1.x == 17).collect();
    let core: Vec<_> = placed.iter().filter(|t| t.1.x == 835).collect();
    assert_eq!(left.len(), 2);
    assert_eq!(core.len(), 1);
    assert!(placed.iter().all(|t| t.1.x != 1653));

    // 152px tiles scaled to the 810px column
    assert_eq!((left[0].1.y, left[0].2, left[0].3), (214, 810, 130));
    assert_eq!(left[1].1.y, 214 + 130 + 8);
    assert_eq!(core[0].1.y, 214);
}

#[test]
fn header_texts() {
    let layout = compose(SHIP);
    let texts: Vec<_> = layout.scene.texts().collect();
    assert!(texts.iter().any(|(t, _)| *t == "DAUNTLESS"));
    assert!(texts.contains(&("COMMAND 4", Point::new(20, 50))));
    assert!(texts.contains(&("CONTROL 3", Point::new(2266, 50))));
    for label in ["LEFT", "CENTER", "RIGHT", "FRONT SHIELDS", "REAR SHIELDS"] {
        assert!(texts.iter().any(|(t, _)| *t == label), "missing {label}");
    }
}
