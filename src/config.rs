//! User configuration: keybindings, theme, and page settings.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevSection,
    NextSection,
    Top,
    Bottom,
    OpenSearch,
    OpenMenu,
    EditContact,
    ToggleTheme,
    OpenHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevSection,
        Action::NextSection,
        Action::Top,
        Action::Bottom,
        Action::OpenSearch,
        Action::OpenMenu,
        Action::EditContact,
        Action::ToggleTheme,
        Action::OpenHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::PrevSection => "Previous Section",
            Action::NextSection => "Next Section",
            Action::Top => "Back to Top",
            Action::Bottom => "Jump to Bottom",
            Action::OpenSearch => "Search",
            Action::OpenMenu => "Section Menu",
            Action::EditContact => "Write a Message",
            Action::ToggleTheme => "Toggle Theme",
            Action::OpenHelp => "Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::OpenSearch => "search",
            Action::OpenMenu => "menu",
            Action::EditContact => "edit_contact",
            Action::ToggleTheme => "toggle_theme",
            Action::OpenHelp => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding (key code plus modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT modifiers are
    /// compared; SHIFT is already folded into the character for `Char` keys.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match event.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"PgDn"`, `"/"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::BackTab => "Shift+Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+c"`, `"PageDown"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            other => key_name(other),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let n: u8 = lower[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case (`G` differs from `g`).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── theme mode ────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

// ───────────────────────────────────────── config ────────────

const DEFAULT_PX_PER_ROW: u16 = 16;
const DEFAULT_SCROLL_STEP: u16 = 3;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub theme: ThemeMode,
    /// Pixel height of one terminal row when measuring the page.
    pub px_per_row: u16,
    /// Play reveal animations (`false` shows regions as soon as they reveal).
    pub animations: bool,
    /// Rows moved per scroll step.
    pub scroll_step: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            theme: ThemeMode::default(),
            px_per_row: DEFAULT_PX_PER_ROW,
            animations: true,
            scroll_step: DEFAULT_SCROLL_STEP,
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char('u'), ctrl)]);
        m.insert(
            Action::PageDown,
            vec![
                KeyBind::new(KeyCode::PageDown, n),
                KeyBind::new(Char(' '), n),
                KeyBind::new(Char('d'), ctrl),
            ],
        );
        m.insert(PrevSection, vec![KeyBind::new(BackTab, n), KeyBind::new(Char('['), n)]);
        m.insert(NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char(']'), n)]);
        m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(OpenSearch, vec![KeyBind::new(Char('/'), n)]);
        m.insert(OpenMenu, vec![KeyBind::new(Char('m'), n)]);
        m.insert(EditContact, vec![KeyBind::new(Char('c'), n)]);
        m.insert(ToggleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(OpenHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for &action in Action::ALL {
            let Some(binds) = self.bindings.get(&action) else {
                continue;
            };
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | 1-5: jump | {}: search | {}: message | {}: theme | {}: help",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::OpenSearch),
            self.short_binding(Action::EditContact),
            self.short_binding(Action::ToggleTheme),
            self.short_binding(Action::OpenHelp),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "theme" => {
                    if let Some(mode) = ThemeMode::parse(value) {
                        config.theme = mode;
                    }
                    continue;
                }
                "px_per_row" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.px_per_row = v.clamp(8, 64);
                    }
                    continue;
                }
                "animations" => {
                    if let Ok(v) = value.parse::<bool>() {
                        config.animations = v;
                    }
                    continue;
                }
                "scroll_step" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.scroll_step = v.clamp(1, 10);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Page settings".to_string(),
            format!("theme = {}", self.theme.label()),
            format!("px_per_row = {}", self.px_per_row),
            format!("animations = {}", self.animations),
            format!("scroll_step = {}", self.scroll_step),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let bindings = AppConfig::default_bindings();
        for action in Action::ALL {
            assert!(bindings.contains_key(action), "{action:?} unbound");
        }
    }

    #[test]
    fn paging_actions_bind_the_paging_keys() {
        let bindings = AppConfig::default_bindings();
        assert!(bindings[&Action::PageDown].contains(&KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE)));
        assert!(bindings[&Action::PageUp].contains(&KeyBind::new(KeyCode::PageUp, KeyModifiers::NONE)));

        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::PageDown)), Some(Action::PageDown));
        assert_eq!(config.match_key(key(KeyCode::PageUp)), Some(Action::PageUp));
    }

    #[test]
    fn match_key_uses_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(config.match_key(key(KeyCode::Char('/'))), Some(Action::OpenSearch));
        assert_eq!(config.match_key(key(KeyCode::Tab)), Some(Action::NextSection));
        assert_eq!(config.match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn shifted_characters_match_without_shift_in_binding() {
        let config = AppConfig::default();
        let ev = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(ev), Some(Action::Bottom));
        let ev = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(ev), Some(Action::OpenHelp));
    }

    #[test]
    fn ctrl_binding_does_not_fire_on_plain_key() {
        let config = AppConfig::default();
        let plain_d = key(KeyCode::Char('d'));
        assert_eq!(config.match_key(plain_d), None);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(config.match_key(ctrl_d), Some(Action::PageDown));
    }

    #[test]
    fn parse_reads_settings_and_bindings() {
        let config = AppConfig::parse_config(
            "# comment\n\
             theme = dark\n\
             px_per_row = 200\n\
             animations = false\n\
             scroll_step = 0\n\
             search = Ctrl+f, s\n\
             bogus = x\n",
        );
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.px_per_row, 64);
        assert!(!config.animations);
        assert_eq!(config.scroll_step, 1);
        assert_eq!(
            config.bindings.get(&Action::OpenSearch),
            Some(&vec![
                KeyBind::new(KeyCode::Char('f'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Char('s'), KeyModifiers::NONE),
            ])
        );
        // Untouched actions keep their defaults.
        assert_eq!(
            config.bindings.get(&Action::Quit),
            AppConfig::default_bindings().get(&Action::Quit)
        );
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = AppConfig::parse_config("theme = sepia\npx_per_row = lots\nquit = Hyper+q\n");
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.px_per_row, DEFAULT_PX_PER_ROW);
        assert_eq!(
            config.bindings.get(&Action::Quit),
            AppConfig::default_bindings().get(&Action::Quit)
        );
    }

    #[test]
    fn animations_ignore_values_that_are_not_booleans() {
        for value in ["False", "no", "0", "off"] {
            let text = format!("animations = false\nanimations = {value}\n");
            assert!(!AppConfig::parse_config(&text).animations, "{value} changed the setting");
        }
        assert!(AppConfig::parse_config("animations = true\n").animations);
        assert!(!AppConfig::parse_config("animations = false\n").animations);
    }

    #[test]
    fn key_parse_handles_special_keys() {
        assert_eq!(
            KeyBind::parse("Alt+PageDown"),
            Some(KeyBind::new(KeyCode::PageDown, KeyModifiers::ALT))
        );
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("G"), Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Space"), Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("nonsense"), None);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.theme = ThemeMode::Dark;
        config.px_per_row = 20;
        config.animations = false;
        config.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.theme, ThemeMode::Dark);
        assert_eq!(loaded.px_per_row, 20);
        assert!(!loaded.animations);
        for action in Action::ALL {
            assert_eq!(loaded.bindings.get(action), config.bindings.get(action), "{action:?}");
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(loaded.theme, ThemeMode::Light);
        assert_eq!(loaded.scroll_step, DEFAULT_SCROLL_STEP);
    }

    #[test]
    fn theme_toggles_both_ways() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }
}
