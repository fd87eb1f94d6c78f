// src/theme.rs
use cosmwasm_std::{Event, StdResult, Storage};
use schemars::JsonSchema;
use secret_toolkit_storage::Item;
use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Light
    }
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

pub static THEME_MODE: Item<ThemeMode> = Item::new(b"themeMode");

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub struct ColorSet {
    pub main: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub struct Palette {
    pub mode: ThemeMode,
    pub primary: ColorSet,
    pub secondary: ColorSet,
    pub background_default: &'static str,
    pub background_paper: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub border_radius: u8,
    pub spacing: u8,
}

pub const LIGHT_PALETTE: Palette = Palette {
    mode: ThemeMode::Light,
    primary: ColorSet { main: "#1976d2", light: "#42a5f5", dark: "#1565c0" },
    secondary: ColorSet { main: "#dc004e", light: "#ff5983", dark: "#9a0036" },
    background_default: "#fafafa",
    background_paper: "#ffffff",
    text_primary: "#212121",
    text_secondary: "#757575",
    border_radius: 8,
    spacing: 8,
};

pub const DARK_PALETTE: Palette = Palette {
    mode: ThemeMode::Dark,
    primary: ColorSet { main: "#90caf9", light: "#e3f2fd", dark: "#42a5f5" },
    secondary: ColorSet { main: "#f48fb1", light: "#fce4ec", dark: "#e91e63" },
    background_default: "#121212",
    background_paper: "#1e1e1e",
    text_primary: "#ffffff",
    text_secondary: "#b3b3b3",
    border_radius: 8,
    spacing: 8,
};

/// Display-mode preference. Starts light and only touches storage once
/// `hydrate` has run, so a first render never depends on stored state.
#[derive(Debug, Default)]
pub struct ThemeService {
    mode: ThemeMode,
    hydrated: bool,
}

impl ThemeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Loads the saved mode. Unreadable data keeps the current mode.
    pub fn hydrate(&mut self, storage: &mut dyn Storage, feedback: &mut Feedback) {
        self.hydrated = true;
        match THEME_MODE.may_load(storage) {
            Ok(Some(saved)) => self.mode = saved,
            Ok(None) => {}
            Err(err) => feedback.log(
                Event::new("theme")
                    .add_attribute("mode", self.mode.as_str())
                    .add_attribute("error", err.to_string()),
            ),
        }
        self.persist(storage, feedback);
    }

    pub fn toggle(&mut self, storage: &mut dyn Storage, feedback: &mut Feedback) -> ThemeMode {
        self.mode = self.mode.toggled();
        if self.hydrated {
            self.persist(storage, feedback);
        }
        self.mode
    }

    fn persist(&self, storage: &mut dyn Storage, feedback: &mut Feedback) {
        let saved: StdResult<()> = THEME_MODE.save(storage, &self.mode);
        let mut event = Event::new("theme").add_attribute("mode", self.mode.as_str());
        if let Err(err) = saved {
            event = event.add_attribute("error", err.to_string());
        }
        feedback.log(event);
    }

    pub fn palette(&self) -> &'static Palette {
        match self.mode {
            ThemeMode::Light => &LIGHT_PALETTE,
            ThemeMode::Dark => &DARK_PALETTE,
        }
    }
}
