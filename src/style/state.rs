//! Interaction-state bitmask shared by widgets, style declines and controllers.

use bitflags::bitflags;

bitflags! {
    /// Combinable interaction flags describing a widget's input condition.
    ///
    /// Style declines are keyed by the exact combination of these bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct WidgetState: u32 {
        const HOVERED = 1 << 0;
        const TRIGGERED = 1 << 1;
        const ACTIVATED = 1 << 2;
        const FOCUSED = 1 << 3;
        const DISABLED = 1 << 4;
        const PRESSED = 1 << 5;
        const DRAGGED = 1 << 6;
        const MODAL = 1 << 7;
        const CONTROL = 1 << 8;
    }
}

/// Document token for each state bit, in bit order.
const STATE_NAMES: [(&str, WidgetState); 9] = [
    ("hovered", WidgetState::HOVERED),
    ("triggered", WidgetState::TRIGGERED),
    ("activated", WidgetState::ACTIVATED),
    ("focused", WidgetState::FOCUSED),
    ("disabled", WidgetState::DISABLED),
    ("pressed", WidgetState::PRESSED),
    ("dragged", WidgetState::DRAGGED),
    ("modal", WidgetState::MODAL),
    ("control", WidgetState::CONTROL),
];

impl Default for WidgetState {
    fn default() -> Self {
        WidgetState::empty()
    }
}

impl WidgetState {
    /// Parse a `|` separated list of state tokens, e.g. `"hovered|pressed"`.
    ///
    /// Whitespace around tokens is ignored. Unknown tokens contribute no bits.
    pub fn parse(value: &str) -> WidgetState {
        value
            .split('|')
            .map(str::trim)
            .filter_map(|token| {
                STATE_NAMES
                    .iter()
                    .find(|(name, _)| *name == token)
                    .map(|(_, bit)| *bit)
            })
            .fold(WidgetState::empty(), |acc, bit| acc | bit)
    }

    /// Suffix appended to an image identifier to name this state's variant.
    ///
    /// `"hovered|pressed"` becomes `"_hovered_pressed"`.
    pub fn image_suffix(tokens: &str) -> String {
        let cleaned: String = tokens.chars().filter(|c| !c.is_whitespace()).collect();
        format!("_{}", cleaned.replace('|', "_"))
    }

    /// Token names of the set bits, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        STATE_NAMES
            .iter()
            .filter(|(_, bit)| self.contains(*bit))
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single() {
        assert_eq!(WidgetState::parse("hovered"), WidgetState::HOVERED);
    }

    #[test]
    fn parse_combined() {
        assert_eq!(
            WidgetState::parse("hovered|pressed"),
            WidgetState::HOVERED | WidgetState::PRESSED
        );
    }

    #[test]
    fn parse_with_spaces() {
        assert_eq!(
            WidgetState::parse(" focused | disabled "),
            WidgetState::FOCUSED | WidgetState::DISABLED
        );
    }

    #[test]
    fn parse_unknown_ignored() {
        assert_eq!(WidgetState::parse("hovered|sparkly"), WidgetState::HOVERED);
        assert!(WidgetState::parse("nothing").is_empty());
    }

    #[test]
    fn every_name_round_trips() {
        for (name, bit) in STATE_NAMES {
            assert_eq!(WidgetState::parse(name), bit);
        }
    }

    #[test]
    fn image_suffix_joins_tokens() {
        assert_eq!(WidgetState::image_suffix("hovered"), "_hovered");
        assert_eq!(WidgetState::image_suffix("hovered | pressed"), "_hovered_pressed");
    }

    #[test]
    fn names_in_bit_order() {
        let state = WidgetState::MODAL | WidgetState::HOVERED;
        assert_eq!(state.names(), vec!["hovered", "modal"]);
    }

    #[test]
    fn default_is_empty() {
        assert!(WidgetState::default().is_empty());
    }
}
