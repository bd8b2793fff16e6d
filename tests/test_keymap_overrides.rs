use crossterm::event::{KeyCode, KeyModifiers};
use barbershop::config::Config;
use barbershop::keymap::{Action, KeyBinding, KeymapPreset};
use tempfile::TempDir;

#[test]
fn test_keymap_override_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    // 'x' cancels appointments instead of deleting characters
    config
        .keymap
        .overrides
        .push(KeyBinding::new("x", Action::Delete));
    config
        .keymap
        .overrides
        .push(KeyBinding::new("w", Action::MoveUp));
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(loaded.keymap.overrides.len(), 2);

    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('x'), KeyModifiers::NONE),
        Some(Action::Delete)
    );
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('w'), KeyModifiers::NONE),
        Some(Action::MoveUp)
    );

    // Overriding an action removes its preset keys
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('d'), KeyModifiers::NONE),
        None
    );
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('k'), KeyModifiers::NONE),
        None
    );

    // Untouched bindings keep working
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveDown)
    );
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('s'), KeyModifiers::NONE),
        Some(Action::ChangeStage)
    );
}

#[test]
fn test_keymap_override_shadows_preset() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    config
        .keymap
        .overrides
        .push(KeyBinding::new("j", Action::MoveUp));
    config.save(&config_path).unwrap();
    let loaded = Config::load_or_create(&config_path).unwrap();

    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveUp)
    );
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('k'), KeyModifiers::NONE),
        None
    );
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('h'), KeyModifiers::NONE),
        Some(Action::MoveLeft)
    );
}

#[test]
fn test_keymap_override_with_modifiers() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Standard;
    config
        .keymap
        .overrides
        .push(KeyBinding::new("ctrl+b", Action::Restart));
    config.save(&config_path).unwrap();
    let loaded = Config::load_or_create(&config_path).unwrap();

    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('b'), KeyModifiers::CONTROL),
        Some(Action::Restart)
    );
    // The preset's Ctrl+N no longer restarts
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('n'), KeyModifiers::CONTROL),
        None
    );
    // Plain 'n' still answers "no" in prompts
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('n'), KeyModifiers::NONE),
        Some(Action::No)
    );
}

#[test]
fn test_keymap_override_serialization_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Emacs;
    config
        .keymap
        .overrides
        .push(KeyBinding::new("f5", Action::Refresh));
    config
        .keymap
        .overrides
        .push(KeyBinding::new("ctrl+k", Action::Delete));
    config.save(&config_path).unwrap();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[keymap]"));
    assert!(content.contains("preset = \"emacs\""));
    assert!(content.contains("overrides"));

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Emacs);
    assert_eq!(loaded.keymap.overrides.len(), 2);
    assert_eq!(
        loaded.keymap.get_action(KeyCode::F(5), KeyModifiers::NONE),
        Some(Action::Refresh)
    );
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('k'), KeyModifiers::CONTROL),
        Some(Action::Delete)
    );
}
