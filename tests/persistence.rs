// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use atom_builder::persistence::store_to_json;
use atom_builder::{
    Color, ColorChannel, Document, Particle, ParticleId, ParticleKind, ParticleStore,
    PersistenceError, Pose,
};
use glam::f64::DVec3;

#[test]
fn save_and_load_through_a_file() {
    let mut original = Document::with_seed(4);
    original.load_element_preset(2, 2, 2);
    original.select_all();
    original.recolor(Color::from_rgb_u32(0xabcdef), ColorChannel::Base);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("helium.json");
    original.save_to_path(&path).unwrap();

    let mut loaded = Document::with_seed(5);
    loaded.set_count(ParticleKind::Arrow, 3);
    loaded.load_from_path(&path).unwrap();

    assert_eq!(loaded.store(), original.store());
    assert!(loaded.selection().is_empty());
    assert!(!loaded.history().can_undo());
}

#[test]
fn a_rejected_load_changes_nothing() {
    let mut document = Document::with_seed(8);
    document.set_count(ParticleKind::Neutron, 2);
    let proton = document.store().collection(ParticleKind::Proton)[0].id.clone();
    document.toggle_select(&proton, false);
    let before = document.store().clone();

    let truncated = r#"{"protons": [{"id": "p1", "position": [0.0, 0.0"#;
    assert!(matches!(
        document.load_json(truncated),
        Err(PersistenceError::Json(_))
    ));

    assert_eq!(document.store(), &before);
    assert!(document.selection().contains(&proton));
    assert!(document.history().can_undo());
}

#[test]
fn missing_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut document = Document::new();
    let result = document.load_from_path(&dir.path().join("nowhere.json"));
    assert!(matches!(result, Err(PersistenceError::Io { .. })));
}

#[test]
fn ids_survive_and_new_ones_do_not_collide() {
    let json = r##"{
        "protons": [{
            "id": "kept",
            "position": [0.5, 0.0, 0.0],
            "rotation": [0.0, 1.0, 0.0],
            "scale": [1.0, 1.0, 1.0],
            "color": "#ff3333",
            "emissive": "#ff0000"
        }]
    }"##;

    let mut document = Document::with_seed(6);
    document.load_json(json).unwrap();
    let kept = ParticleId::from("kept");
    assert_eq!(document.particle(&kept).unwrap().rotation, DVec3::Y);

    document.toggle_select(&kept, false);
    document.duplicate_selected();
    assert_eq!(document.store().count(ParticleKind::Proton), 2);
    assert!(document.particle(&kept).is_some());
}

#[test]
fn json_layout() {
    let mut store = ParticleStore::new();
    store
        .insert(Particle::new(
            ParticleId::from("proton-1"),
            ParticleKind::Proton,
            Pose::default(),
        ))
        .unwrap();
    store
        .insert(Particle::new(
            ParticleId::from("arrow-1"),
            ParticleKind::Arrow,
            Pose::at(DVec3::new(0.0, 1.5, 0.0)),
        ))
        .unwrap();

    insta::assert_snapshot!(store_to_json(&store).unwrap(), @r##"
    {
      "protons": [
        {
          "id": "proton-1",
          "position": [
            0.0,
            0.0,
            0.0
          ],
          "rotation": [
            0.0,
            0.0,
            0.0
          ],
          "scale": [
            1.0,
            1.0,
            1.0
          ],
          "color": "#ff3333",
          "emissive": "#ff0000"
        }
      ],
      "neutrons": [],
      "electrons": [],
      "arrows": [
        {
          "id": "arrow-1",
          "position": [
            0.0,
            1.5,
            0.0
          ],
          "rotation": [
            0.0,
            0.0,
            0.0
          ],
          "scale": [
            1.0,
            1.0,
            1.0
          ],
          "color": "#00ccff",
          "emissive": "#000000"
        }
      ]
    }
    "##);
}

// End of File
