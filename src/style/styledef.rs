//! StyleDef: a named base skin, its layout record and its state declines.

use std::collections::BTreeMap;

use crate::style::skin::Skin;
use crate::style::state::WidgetState;
use crate::style::values::LayoutStyle;

/// Style definition for one widget type.
///
/// Declines are keyed by the exact interaction-state bitmask. A decline is
/// created as a copy of the base skin at the time it is first declared, so it
/// only needs to spell out the attributes that differ.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDef {
    name: String,
    skin: Skin,
    layout: LayoutStyle,
    declines: BTreeMap<WidgetState, Skin>,
    inherited: Option<String>,
    updated: u64,
}

impl StyleDef {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skin: Skin::default(),
            layout: LayoutStyle::default(),
            declines: BTreeMap::new(),
            inherited: None,
            updated: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base skin.
    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    pub fn skin_mut(&mut self) -> &mut Skin {
        &mut self.skin
    }

    pub fn layout(&self) -> &LayoutStyle {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutStyle {
        &mut self.layout
    }

    /// Name of the style whose base skin was last copied into this one.
    pub fn inherited(&self) -> Option<&str> {
        self.inherited.as_deref()
    }

    /// How many times this definition has been (re)parsed.
    pub fn updated(&self) -> u64 {
        self.updated
    }

    /// Mark the definition as reparsed.
    pub fn touch(&mut self) {
        self.updated += 1;
    }

    /// The decline registered for exactly `state`, if any.
    pub fn decline(&self, state: WidgetState) -> Option<&Skin> {
        self.declines.get(&state)
    }

    /// The decline for exactly `state`, created from the base skin if missing.
    pub fn decline_mut(&mut self, state: WidgetState) -> &mut Skin {
        let base = &self.skin;
        self.declines.entry(state).or_insert_with(|| base.clone())
    }

    /// All declines in bitmask order.
    pub fn declines(&self) -> impl Iterator<Item = (WidgetState, &Skin)> {
        self.declines.iter().map(|(state, skin)| (*state, skin))
    }

    /// The skin to draw for `state`: the exact decline, or the base skin.
    pub fn resolve(&self, state: WidgetState) -> &Skin {
        self.declines.get(&state).unwrap_or(&self.skin)
    }

    /// Replace the base skin with a copy of `source`'s base skin.
    ///
    /// The copy is by value; later edits to `source` do not reach this style.
    pub fn copy_skin(&mut self, source: &StyleDef) {
        self.skin = source.skin.clone();
        self.inherited = Some(source.name.clone());
    }

    /// Drop any inherited skin, returning the base skin to its default.
    ///
    /// Whether the style draws at all is kept as it was.
    pub fn reset_skin(&mut self) {
        let empty = self.skin.empty;
        self.skin = Skin {
            empty,
            ..Skin::default()
        };
        self.inherited = None;
    }

    /// Forget every attribute while keeping the name and update counter.
    pub fn clear(&mut self) {
        self.skin = Skin::default();
        self.layout = LayoutStyle::default();
        self.declines.clear();
        self.inherited = None;
    }
}
