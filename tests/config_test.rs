use std::io::Write;

use terrascape::{
    config::{Config, InteractionConfig},
    context::{Context, init_logging},
    data_structures::prefab::Category,
};

#[test]
fn should_use_defaults_for_empty_document() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.interaction.duplicate_surface_distance, 0.05);
    assert_eq!(config.interaction.rotation_dead_zone_deg, 1.0);
    assert_eq!(config.storage.save_file_name, "terraScapeSaveData.json");
    assert!(config.prefabs.is_empty());
}

#[test]
fn should_override_only_given_fields() {
    let config = Config::from_toml_str(
        r#"
        [interaction]
        rotation_dead_zone_deg = 2.5

        [storage]
        save_file_name = "garden.json"

        [[prefabs]]
        key = "Tree_A"
        name = "Oak"
        category = "plants"

        [[prefabs]]
        key = "Moss"
        category = "ground_cover"
        "#,
    )
    .unwrap();

    assert_eq!(config.interaction.rotation_dead_zone_deg, 2.5);
    assert_eq!(
        config.interaction.duplicate_surface_distance,
        InteractionConfig::default().duplicate_surface_distance
    );
    assert_eq!(config.storage.save_file_name, "garden.json");
    assert_eq!(config.prefabs.len(), 2);
    assert_eq!(config.prefabs[1].category, Category::GroundCover);
    // a missing name deserializes empty
    assert_eq!(config.prefabs[1].name, "");

    let ctx = Context::new(config);
    assert!(ctx.registry.contains("Moss"));
}

#[test]
fn should_reject_unknown_category() {
    let result = Config::from_toml_str(
        r#"
        [[prefabs]]
        key = "Robot"
        category = "androids"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn should_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[interaction]\nmarker_highlight_scale = 2.0").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.interaction.marker_highlight_scale, 2.0);
}

#[test]
fn should_name_missing_config_file_in_error() {
    let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(format!("{:#}", err).contains("/definitely/not/here.toml"));
}

#[test]
fn should_tolerate_repeated_logger_init() {
    init_logging();
    init_logging();
}
