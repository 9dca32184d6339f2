//! Style document compiler: a token-driven state machine.
//!
//! The parser walks the [`DocToken`] stream produced by the scanner with two
//! pieces of state: where it is in the document (document, main block, style
//! definition, subskin definition) and whether the next scalar is a key or a
//! value. Scalars in key position are remembered; scalars in value position
//! are dispatched against whichever skin is active.

use std::path::PathBuf;

use crate::style::image::ImageResolver;
use crate::style::scanner::{self, DocToken, ScanError};
use crate::style::state::WidgetState;
use crate::style::styler::StyleTable;

/// Errors from loading a style document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open style sheet {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed style sheet: {0}")]
    Scan(#[from] ScanError),
}

/// Position in the document structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocState {
    InDocument,
    InMainBlock,
    InStyleDefinition,
    InSubskinDefinition,
}

/// Whether the next scalar is a key or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    InKey,
    InValue,
}

/// Compiles document tokens into a [`StyleTable`].
pub struct StyleParser<'a> {
    table: &'a mut StyleTable,
    images: &'a mut dyn ImageResolver,
    state: DocState,
    key_state: KeyState,
    key: String,
    style: Option<String>,
    subskin: Option<WidgetState>,
    /// Mappings opened inside a subskin, which carry no meaning and are skipped.
    ignored_depth: usize,
}

impl<'a> StyleParser<'a> {
    pub fn new(table: &'a mut StyleTable, images: &'a mut dyn ImageResolver) -> Self {
        Self {
            table,
            images,
            state: DocState::InDocument,
            key_state: KeyState::InKey,
            key: String::new(),
            style: None,
            subskin: None,
            ignored_depth: 0,
        }
    }

    pub fn state(&self) -> DocState {
        self.state
    }

    pub fn key_state(&self) -> KeyState {
        self.key_state
    }

    /// Feed every token in order.
    pub fn feed_all(&mut self, tokens: impl IntoIterator<Item = DocToken>) {
        for token in tokens {
            self.feed(token);
        }
    }

    /// Advance the state machine by one token.
    pub fn feed(&mut self, token: DocToken) {
        match token {
            DocToken::Key => self.key_state = KeyState::InKey,
            DocToken::Value => self.key_state = KeyState::InValue,
            DocToken::MappingStart => match self.state {
                DocState::InDocument => self.state = DocState::InMainBlock,
                DocState::InMainBlock => {
                    let name = self.key.clone();
                    self.start_style(&name);
                }
                DocState::InStyleDefinition => {
                    let name = self.key.clone();
                    self.start_subskin(&name);
                }
                DocState::InSubskinDefinition => self.ignored_depth += 1,
            },
            DocToken::MappingEnd => match self.state {
                _ if self.ignored_depth > 0 => self.ignored_depth -= 1,
                DocState::InStyleDefinition => {
                    self.state = DocState::InMainBlock;
                    self.style = None;
                }
                DocState::InSubskinDefinition => {
                    self.state = DocState::InStyleDefinition;
                    self.subskin = None;
                }
                DocState::InDocument | DocState::InMainBlock => {}
            },
            DocToken::Scalar(text) => match self.key_state {
                KeyState::InKey => self.key = text,
                KeyState::InValue if self.ignored_depth > 0 => {}
                KeyState::InValue => {
                    let key = std::mem::take(&mut self.key);
                    self.parse_value(&key, &text);
                    self.key = key;
                }
            },
            DocToken::StreamStart | DocToken::StreamEnd => {}
        }
    }

    fn start_style(&mut self, name: &str) {
        self.state = DocState::InStyleDefinition;
        self.style = Some(name.to_owned());
        let style = self.table.styledef(name);
        style.touch();
        style.skin_mut().empty = false;
        tracing::trace!(style = name, updated = style.updated(), "style definition");
    }

    fn start_subskin(&mut self, name: &str) {
        self.state = DocState::InSubskinDefinition;
        let state = WidgetState::parse(name);
        self.subskin = Some(state);
        if let Some(style) = self.style.as_deref() {
            self.table.styledef(style).decline_mut(state);
        }
    }

    /// Dispatch one `key: value` pair against the active style.
    fn parse_value(&mut self, key: &str, raw: &str) {
        let Some(style_name) = self.style.clone() else {
            tracing::trace!(key, "value outside a style definition ignored");
            return;
        };
        let value: String = match key {
            "font" | "text_font" => raw.trim().to_owned(),
            _ => raw.chars().filter(|c| *c != ' ').collect(),
        };

        match key {
            "copy_skin" => {
                if !self.table.copy_skin(&style_name, &value) {
                    tracing::debug!(style = %style_name, source = %value, "copy_skin source not defined");
                }
            }
            "reset_skin" => self.table.styledef(&style_name).reset_skin(),
            "decline_image" => self.decline_image(&style_name, &value),
            "decline_image_skin" => self.decline_image_skin(&style_name, &value),
            _ => {
                let style = self.table.styledef(&style_name);
                if style.layout_mut().assign(key, &value) {
                    return;
                }
                let skin = match self.subskin {
                    Some(state) => style.decline_mut(state),
                    None => style.skin_mut(),
                };
                if !skin.assign(key, &value, self.images) {
                    tracing::trace!(key, "unknown style key ignored");
                }
            }
        }
    }

    /// Name of the active skin's image, if it has one.
    fn active_image_name(&mut self, style_name: &str) -> Option<String> {
        let style = self.table.styledef(style_name);
        let skin = match self.subskin {
            Some(state) => style.decline_mut(state),
            None => style.skin_mut(),
        };
        skin.image.as_ref().map(|image| image.name.clone())
    }

    /// For each listed state, derive the decline's image by suffixing the active image.
    fn decline_image(&mut self, style_name: &str, states: &str) {
        let Some(base) = self.active_image_name(style_name) else {
            tracing::debug!(style = style_name, "decline_image without a base image");
            return;
        };
        for tokens in states.split(',').filter(|s| !s.is_empty()) {
            let state = WidgetState::parse(tokens);
            let image = self
                .images
                .find_image(&format!("{base}{}", WidgetState::image_suffix(tokens)));
            self.table.styledef(style_name).decline_mut(state).image = Some(image);
        }
    }

    /// Like [`decline_image`](Self::decline_image), for the nine-patch image skin.
    fn decline_image_skin(&mut self, style_name: &str, states: &str) {
        let style = self.table.styledef(style_name);
        let active = match self.subskin {
            Some(state) => style.decline_mut(state),
            None => style.skin_mut(),
        };
        let Some(base) = active.image_skin.clone() else {
            tracing::debug!(style = style_name, "decline_image_skin without a base image skin");
            return;
        };
        for tokens in states.split(',').filter(|s| !s.is_empty()) {
            let state = WidgetState::parse(tokens);
            let mut image_skin = base.clone();
            image_skin.image = self
                .images
                .find_image(&format!("{}{}", base.image.name, WidgetState::image_suffix(tokens)));
            self.table.styledef(style_name).decline_mut(state).image_skin = Some(image_skin);
        }
    }
}

/// Scan `source` and compile it into `table`.
///
/// The table is untouched when the document fails to scan.
pub fn compile(
    source: &str,
    table: &mut StyleTable,
    images: &mut dyn ImageResolver,
) -> Result<(), ScanError> {
    let tokens = scanner::scan(source)?;
    StyleParser::new(table, images).feed_all(tokens);
    Ok(())
}
