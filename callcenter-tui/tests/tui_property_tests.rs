use callcenter_core::{CallStatus, StatusTone};
use callcenter_tui::config::{ConfigError, ThemeConfig, TuiConfig};
use callcenter_tui::keys::{map_key, Action, InputMode};
use callcenter_tui::nav::Route;
use callcenter_tui::theme::{status_tone_color, ConsoleTheme};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;
use std::io::Write;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:8000".to_string(),
        recent_calls_limit: 10,
        history_limit: 100,
        tick_interval_ms: 250,
        persistence_path: "tmp/callcenter-tui.json".into(),
        log_path: "tmp/callcenter-tui.log".into(),
        export_dir: "tmp/exports".into(),
        theme: ThemeConfig {
            name: "dark".to_string(),
        },
    }
}

const VALID_TOML: &str = r#"
api_base_url = "http://localhost:8000"
recent_calls_limit = 10
history_limit = 100
tick_interval_ms = 250
persistence_path = "state/ui.json"
log_path = "logs/console.log"
export_dir = "exports"

[theme]
name = "light"
"#;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[test]
fn base_config_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_requires_known_theme() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "synthwave".to_string(),
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "theme.name", .. })
    ));
}

#[test]
fn config_requires_http_base_url() {
    let mut config = base_config();
    config.api_base_url = "localhost:8000".to_string();
    assert!(config.validate().is_err());
    config.api_base_url = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_zero_limits() {
    let mut config = base_config();
    config.history_limit = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "history_limit", .. })
    ));
    let mut config = base_config();
    config.recent_calls_limit = 0;
    assert!(config.validate().is_err());
    let mut config = base_config();
    config.tick_interval_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn config_loads_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VALID_TOML.as_bytes()).unwrap();
    let config = TuiConfig::from_path(file.path()).unwrap();
    assert_eq!(config.recent_calls_limit, 10);
    assert_eq!(config.history_limit, 100);
    assert_eq!(config.theme.name, "light");
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_unknown_fields() {
    let contents = format!("{}\nrequest_timeout_ms = 5000\n", VALID_TOML.trim_end());
    // The extra key lands inside [theme], which also denies unknown keys.
    assert!(matches!(
        TuiConfig::from_toml(&contents),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn config_requires_every_field() {
    let contents = VALID_TOML.replace("export_dir = \"exports\"\n", "");
    assert!(matches!(
        TuiConfig::from_toml(&contents),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TuiConfig::from_path(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

proptest! {
    #[test]
    fn keybinding_digit_switches_route(digit in 1u8..=3u8) {
        let c = char::from(b'0' + digit);
        let action = map_key(key(KeyCode::Char(c)), InputMode::Normal);
        let expected = (digit - 1) as usize;
        prop_assert_eq!(action, Some(Action::SwitchView(expected)));
        prop_assert!(Route::from_index(expected).is_some());
    }

    #[test]
    fn navigation_keys_consistent(use_vim in prop::bool::ANY) {
        let (up, down) = if use_vim {
            (KeyCode::Char('k'), KeyCode::Char('j'))
        } else {
            (KeyCode::Up, KeyCode::Down)
        };
        prop_assert_eq!(map_key(key(up), InputMode::Normal), Some(Action::MoveUp));
        prop_assert_eq!(map_key(key(down), InputMode::Normal), Some(Action::MoveDown));
    }

    #[test]
    fn printable_keys_are_text_while_editing(c in "[a-z0-9+ ]") {
        let ch = c.chars().next().unwrap();
        let event = key(KeyCode::Char(ch));
        prop_assert_eq!(map_key(event, InputMode::Editing), Some(Action::Input(event)));
    }

    #[test]
    fn all_action_keys_mapped(key_char in "[qnedisrfacux?/]") {
        let ch = key_char.chars().next().unwrap();
        prop_assert!(map_key(key(KeyCode::Char(ch)), InputMode::Normal).is_some());
    }

    #[test]
    fn route_cycle_returns_home(start in 0usize..3, steps in 0usize..12) {
        let origin = Route::from_index(start).unwrap();
        let mut route = origin;
        for _ in 0..steps {
            route = route.next();
        }
        for _ in 0..steps {
            route = route.previous();
        }
        prop_assert_eq!(route, origin);
    }

    #[test]
    fn route_paths_resolve_to_themselves(idx in 0usize..3) {
        let route = Route::from_index(idx).unwrap();
        prop_assert_eq!(Route::resolve(route.path()), Some(route));
        let trailing = format!("{}/", route.path());
        prop_assert_eq!(Route::resolve(&trailing), Some(route));
    }

    #[test]
    fn unknown_statuses_render_neutral(tag in "[a-z]{3,10}") {
        prop_assume!(!["completed", "failed", "answered", "initiating", "initiated"].contains(&tag.as_str()));
        let theme = ConsoleTheme::dark();
        let status = CallStatus::new(tag);
        prop_assert_eq!(status.tone(), StatusTone::Neutral);
        prop_assert_eq!(status_tone_color(status.tone(), &theme), theme.text_dim);
    }
}

#[test]
fn digits_beyond_the_route_table_do_nothing() {
    for c in ['0', '4', '9'] {
        assert_eq!(map_key(key(KeyCode::Char(c)), InputMode::Normal), None);
    }
}

#[test]
fn tab_switches_routes() {
    assert_eq!(map_key(key(KeyCode::Tab), InputMode::Normal), Some(Action::NextView));
    assert_eq!(Route::Agents.next(), Route::Call);
    assert_eq!(Route::History.next(), Route::Agents);
    assert_eq!(Route::Agents.previous(), Route::History);
}

#[test]
fn known_statuses_use_fixed_colors() {
    let theme = ConsoleTheme::light();
    let color = |tag: &str| status_tone_color(CallStatus::from(tag).tone(), &theme);
    assert_eq!(color("completed"), theme.success);
    assert_eq!(color("failed"), theme.error);
    assert_eq!(color("answered"), theme.info);
    assert_eq!(color("initiating"), theme.warning);
    assert_eq!(color("initiated"), theme.warning);
}

#[test]
fn theme_names_are_case_insensitive() {
    assert_eq!(ConsoleTheme::from_name("LIGHT").bg, ConsoleTheme::light().bg);
    assert_eq!(ConsoleTheme::from_name("dark").bg, ConsoleTheme::dark().bg);
}
