//! Typed, observable settings bound to the persisted mapping.
//!
//! [`BuilderState`] owns the raw [`SettingsMap`] loaded at startup and one
//! typed cell per recognised key. Reading a cell never touches the
//! mapping; writing one stores the encoded value back into it, so
//! [`BuilderState::write_state`] always flushes the latest values.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::location::settings_file;
use super::observable::{Observable, SubscriptionId};
use super::store::{SettingsMap, load_settings, save_settings};
use super::value::{SettingValue, WindowPlacement, ensure_storable};
use crate::error::SettingsError;
use crate::paths::ProjectPaths;

/// Keys of every recognised setting, as written to the settings file.
pub mod keys {
    /// Path of the `storyteller-sdk-kotlin` checkout.
    pub const STORYTELLER_SDK_KOTLIN: &str = "STORYTELLER_SDK_KOTLIN";
    /// Path of the `storyteller-showcase-android` checkout.
    pub const SHOWCASE: &str = "SHOWCASE";
    /// Path of the `nba-nextgen-android` checkout.
    pub const NBA: &str = "NBA";
    /// Show the bytecode panel.
    pub const SHOW_BYTE_CODE: &str = "SHOW_BYTE_CODE";
    /// Show the DEX panel.
    pub const SHOW_DEX: &str = "SHOW_DEX";
    /// Show the OAT panel.
    pub const SHOW_OAT: &str = "SHOW_OAT";
    /// Keep line selection in sync across panels.
    pub const SYNC_LINES: &str = "SYNC_LINES";
    /// Indentation width.
    pub const INDENT: &str = "INDENT";
    /// Decompile instructions from hidden ISA sections.
    pub const DECOMPILE_HIDDEN_ISA: &str = "DECOMPILE_HIDDEN_ISA";
    /// Width of the line-number gutter.
    pub const LINE_NUMBER_WIDTH: &str = "LINE_NUMBER_WIDTH";
    /// Window left edge.
    pub const WINDOW_X: &str = "WINDOW_X";
    /// Window top edge.
    pub const WINDOW_Y: &str = "WINDOW_Y";
    /// Window width.
    pub const WINDOW_WIDTH: &str = "WINDOW_WIDTH";
    /// Window height.
    pub const WINDOW_HEIGHT: &str = "WINDOW_HEIGHT";
    /// Window placement (`Floating`, `Maximized`, `Fullscreen`).
    pub const WINDOW_PLACEMENT: &str = "WINDOW_PLACEMENT";
}

/// One typed setting bound to a key of the mapping.
#[derive(Debug)]
struct Setting<T> {
    key: &'static str,
    default: T,
    cell: Observable<T>,
}

impl<T: SettingValue> Setting<T> {
    /// Read `key` from `entries`, falling back to `default` when it is absent
    /// or decodes to nothing.
    fn bind(key: &'static str, default: T, entries: &SettingsMap) -> Result<Self, SettingsError> {
        let value = match entries.get(key) {
            Some(raw) => T::decode(raw)?.unwrap_or_else(|| default.clone()),
            None => default.clone(),
        };
        Ok(Self {
            key,
            default,
            cell: Observable::new(value),
        })
    }

    const fn get(&self) -> &T {
        self.cell.get()
    }

    fn set(&mut self, entries: &mut SettingsMap, value: T) {
        entries.insert(self.key, value.encode());
        self.cell.set(value);
    }

    fn reset(&mut self, entries: &mut SettingsMap) {
        entries.remove(self.key);
        self.cell.set(self.default.clone());
    }
}

/// A recognised setting as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingView {
    /// Stored key.
    pub key: &'static str,
    /// Current value in its stored form.
    pub value: String,
    /// `false` when the value is the default and nothing is stored yet.
    pub stored: bool,
}

/// Where the window opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum WindowPosition {
    /// Centered on screen.
    Centered,
    /// At an explicit top-left corner.
    Absolute {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
    },
}

/// Persisted window size, position and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowGeometry {
    /// Width in density-independent pixels.
    pub width: i32,
    /// Height in density-independent pixels.
    pub height: i32,
    /// Left edge; non-positive means "not set".
    pub x: i32,
    /// Top edge; non-positive means "not set".
    pub y: i32,
    /// Floating, maximized or fullscreen.
    pub placement: WindowPlacement,
}

impl WindowGeometry {
    /// The window is centered unless both coordinates are positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use project_builder::settings::state::{WindowGeometry, WindowPosition};
    /// use project_builder::settings::value::WindowPlacement;
    ///
    /// let mut geometry = WindowGeometry {
    ///     width: 1900,
    ///     height: 1600,
    ///     x: -1,
    ///     y: -1,
    ///     placement: WindowPlacement::Floating,
    /// };
    /// assert_eq!(geometry.position(), WindowPosition::Centered);
    ///
    /// geometry.x = 40;
    /// geometry.y = 30;
    /// assert_eq!(geometry.position(), WindowPosition::Absolute { x: 40, y: 30 });
    /// ```
    #[must_use]
    pub const fn position(&self) -> WindowPosition {
        if self.x > 0 && self.y > 0 {
            WindowPosition::Absolute {
                x: self.x,
                y: self.y,
            }
        } else {
            WindowPosition::Centered
        }
    }
}

/// Declare the recognised settings once and generate the typed cells, the
/// key-based dispatch used by the CLI, and the accessors on [`BuilderState`].
macro_rules! builder_settings {
    ($(
        $(#[$doc:meta])*
        $field:ident, $setter:ident, $watch:ident: $ty:ty = $key:path => $default:expr;
    )+) => {
        #[derive(Debug)]
        struct Cells {
            $( $field: Setting<$ty>, )+
        }

        impl Cells {
            fn bind(entries: &SettingsMap) -> Result<Self, SettingsError> {
                Ok(Self {
                    $( $field: Setting::bind($key, $default, entries)?, )+
                })
            }

            /// Parse and store `raw`; `Ok(false)` if `key` is not recognised.
            fn assign(
                &mut self,
                entries: &mut SettingsMap,
                key: &str,
                raw: &str,
            ) -> Result<bool, SettingsError> {
                $(
                    if key == $key {
                        let value = <$ty as SettingValue>::parse_input($key, raw)?;
                        self.$field.set(entries, value);
                        return Ok(true);
                    }
                )+
                Ok(false)
            }

            fn reset(&mut self, entries: &mut SettingsMap, key: &str) -> bool {
                $(
                    if key == $key {
                        self.$field.reset(entries);
                        return true;
                    }
                )+
                false
            }

            fn unsubscribe(&mut self, key: &str, id: SubscriptionId) -> bool {
                $(
                    if key == $key {
                        return self.$field.cell.unsubscribe(id);
                    }
                )+
                false
            }

            fn encoded(&self, key: &str) -> Option<String> {
                $(
                    if key == $key {
                        return Some(self.$field.get().encode());
                    }
                )+
                None
            }

            fn views(&self, entries: &SettingsMap) -> Vec<SettingView> {
                vec![
                    $(
                        SettingView {
                            key: $key,
                            value: self.$field.get().encode(),
                            stored: entries.contains_key($key),
                        },
                    )+
                ]
            }
        }

        /// Every recognised key, in declaration order.
        pub const KNOWN_KEYS: &[&str] = &[ $( $key, )+ ];

        impl BuilderState {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $field(&self) -> $ty {
                    self.cells.$field.get().clone()
                }

                #[doc = concat!(
                    "Set [`Self::", stringify!($field), "`] and record it in the mapping."
                )]
                pub fn $setter(&mut self, value: $ty) {
                    self.cells.$field.set(&mut self.entries, value);
                }

                #[doc = concat!(
                    "Run `callback` whenever [`Self::", stringify!($field), "`] is set."
                )]
                pub fn $watch(&mut self, callback: impl Fn(&$ty) + 'static) -> SubscriptionId {
                    self.cells.$field.cell.subscribe(callback)
                }
            )+
        }
    };
}

builder_settings! {
    /// Configured `storyteller-sdk-kotlin` path.
    storyteller_sdk_kotlin, set_storyteller_sdk_kotlin, watch_storyteller_sdk_kotlin:
        String = keys::STORYTELLER_SDK_KOTLIN => String::new();
    /// Configured `storyteller-showcase-android` path.
    showcase, set_showcase, watch_showcase:
        String = keys::SHOWCASE => String::new();
    /// Configured `nba-nextgen-android` path.
    nba, set_nba, watch_nba:
        String = keys::NBA => String::new();
    /// Whether the bytecode panel is shown.
    show_byte_code, set_show_byte_code, watch_show_byte_code:
        bool = keys::SHOW_BYTE_CODE => false;
    /// Whether the DEX panel is shown.
    show_dex, set_show_dex, watch_show_dex:
        bool = keys::SHOW_DEX => true;
    /// Whether the OAT panel is shown.
    show_oat, set_show_oat, watch_show_oat:
        bool = keys::SHOW_OAT => true;
    /// Whether line selection is synced across panels.
    sync_lines, set_sync_lines, watch_sync_lines:
        bool = keys::SYNC_LINES => true;
    /// Whether hidden ISA sections are decompiled.
    decompile_hidden_isa, set_decompile_hidden_isa, watch_decompile_hidden_isa:
        bool = keys::DECOMPILE_HIDDEN_ISA => true;
    /// Indentation width.
    indent, set_indent, watch_indent:
        i32 = keys::INDENT => 4;
    /// Width of the line-number gutter.
    line_number_width, set_line_number_width, watch_line_number_width:
        i32 = keys::LINE_NUMBER_WIDTH => 4;
    /// Window width.
    window_width, set_window_width, watch_window_width:
        i32 = keys::WINDOW_WIDTH => 1900;
    /// Window height.
    window_height, set_window_height, watch_window_height:
        i32 = keys::WINDOW_HEIGHT => 1600;
    /// Window left edge.
    window_x, set_window_x, watch_window_x:
        i32 = keys::WINDOW_X => -1;
    /// Window top edge.
    window_y, set_window_y, watch_window_y:
        i32 = keys::WINDOW_Y => -1;
    /// Window placement.
    window_placement, set_window_placement, watch_window_placement:
        WindowPlacement = keys::WINDOW_PLACEMENT => WindowPlacement::Floating;
}

/// The application's settings: raw mapping, typed cells and the derived
/// project-path snapshot.
#[derive(Debug)]
pub struct BuilderState {
    directory: PathBuf,
    file: PathBuf,
    entries: SettingsMap,
    cells: Cells,
    project_paths: ProjectPaths,
}

impl BuilderState {
    /// Create `directory` if needed and load its settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the directory cannot be created or
    /// the file cannot be read, and [`SettingsError::InvalidPlacement`] if
    /// the stored window placement is not a known name.
    pub fn open(directory: &Path) -> Result<Self, SettingsError> {
        fs::create_dir_all(directory).map_err(|source| SettingsError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
        let entries = load_settings(&settings_file(directory))?;
        Self::from_entries(directory, entries)
    }

    /// Bind already-loaded `entries` to a state rooted at `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidPlacement`] if the stored window
    /// placement is not a known name.
    pub fn from_entries(directory: &Path, entries: SettingsMap) -> Result<Self, SettingsError> {
        let cells = Cells::bind(&entries)?;
        let project_paths = ProjectPaths::new(
            directory,
            cells.storyteller_sdk_kotlin.get(),
            cells.showcase.get(),
            cells.nba.get(),
        );
        Ok(Self {
            directory: directory.to_path_buf(),
            file: settings_file(directory),
            entries,
            cells,
            project_paths,
        })
    }

    /// Settings directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Settings file written by [`write_state`](Self::write_state).
    #[must_use]
    pub fn settings_file(&self) -> &Path {
        &self.file
    }

    /// Raw mapping, including keys this version does not recognise.
    #[must_use]
    pub const fn entries(&self) -> &SettingsMap {
        &self.entries
    }

    /// Project-path snapshot as of the last reload.
    #[must_use]
    pub const fn project_paths(&self) -> &ProjectPaths {
        &self.project_paths
    }

    /// Recompute [`project_paths`](Self::project_paths) from the current
    /// path settings.
    pub fn reload_project_paths(&mut self) {
        self.project_paths = ProjectPaths::new(
            &self.directory,
            self.cells.storyteller_sdk_kotlin.get(),
            self.cells.showcase.get(),
            self.cells.nba.get(),
        );
    }

    /// Store all three project paths and refresh the snapshot.
    ///
    /// Nothing is stored unless all three can be written to the settings
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] if a path ends in `\` or
    /// contains `\r`.
    pub fn save_project_paths(
        &mut self,
        storyteller_sdk_kotlin: &str,
        showcase: &str,
        nba: &str,
    ) -> Result<(), SettingsError> {
        ensure_storable(keys::STORYTELLER_SDK_KOTLIN, storyteller_sdk_kotlin)?;
        ensure_storable(keys::SHOWCASE, showcase)?;
        ensure_storable(keys::NBA, nba)?;
        self.set_storyteller_sdk_kotlin(storyteller_sdk_kotlin.to_string());
        self.set_showcase(showcase.to_string());
        self.set_nba(nba.to_string());
        self.reload_project_paths();
        Ok(())
    }

    /// Current window geometry.
    #[must_use]
    pub fn window_geometry(&self) -> WindowGeometry {
        WindowGeometry {
            width: self.window_width(),
            height: self.window_height(),
            x: self.window_x(),
            y: self.window_y(),
            placement: self.window_placement(),
        }
    }

    /// Where the window opens: centered unless both stored coordinates are
    /// positive.
    #[must_use]
    pub fn window_position(&self) -> WindowPosition {
        self.window_geometry().position()
    }

    /// Record the window's geometry, typically just before exit.
    pub fn set_window_geometry(&mut self, geometry: WindowGeometry) {
        self.set_window_width(geometry.width);
        self.set_window_height(geometry.height);
        self.set_window_x(geometry.x);
        self.set_window_y(geometry.y);
        self.set_window_placement(geometry.placement);
    }

    /// Assign a recognised setting from its textual form.
    ///
    /// Path settings refresh the project-path snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownKey`] for unrecognised keys and a
    /// value error if `raw` does not parse as the setting's type.
    pub fn set_raw(&mut self, key: &str, raw: &str) -> Result<(), SettingsError> {
        if !self.cells.assign(&mut self.entries, key, raw)? {
            return Err(SettingsError::UnknownKey(key.to_string()));
        }
        if is_path_key(key) {
            self.reload_project_paths();
        }
        Ok(())
    }

    /// Current value of `key` in stored form.
    ///
    /// Recognised keys report their typed value (the default when unset);
    /// other keys report whatever the file contained.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.cells
            .encoded(key)
            .or_else(|| self.entries.get(key).map(ToString::to_string))
    }

    /// Remove `key` from the mapping; recognised settings return to their
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownKey`] if `key` is neither recognised
    /// nor stored.
    pub fn unset(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.cells.reset(&mut self.entries, key) {
            if is_path_key(key) {
                self.reload_project_paths();
            }
            return Ok(());
        }
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))
    }

    /// Cancel a subscription made through one of the `watch_*` methods.
    pub fn unwatch(&mut self, key: &str, id: SubscriptionId) -> bool {
        self.cells.unsubscribe(key, id)
    }

    /// Every recognised setting with its current value.
    #[must_use]
    pub fn settings(&self) -> Vec<SettingView> {
        self.cells.views(&self.entries)
    }

    /// Stored entries whose keys this version does not recognise.
    pub fn unrecognised_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(key))
    }

    /// Flush the whole mapping to the settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be written.
    pub fn write_state(&self) -> Result<(), SettingsError> {
        save_settings(&self.file, &self.entries)
    }
}

fn is_path_key(key: &str) -> bool {
    [keys::STORYTELLER_SDK_KOTLIN, keys::SHOWCASE, keys::NBA].contains(&key)
}
