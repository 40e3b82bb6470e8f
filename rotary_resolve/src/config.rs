// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pattern dictionaries for the resolver.
//!
//! Every list here is data: supporting a new dialer variant means adding an
//! entry, not a code path. Digit templates use `{d}` for the numeral and `{w}`
//! for the word form.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use crate::target::Digit;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Pattern and threshold configuration for [`Resolver`](crate::Resolver).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternConfig {
    /// Traversal depth bound; the root is at depth 0.
    pub max_depth: usize,
    /// Resource-id templates matched as case-insensitive substrings.
    pub digit_id_contains: Vec<String>,
    /// Resource-id templates matched as case-insensitive suffixes.
    pub digit_id_suffixes: Vec<String>,
    /// Class-name fragments that mark a node as a button.
    pub button_classes: Vec<String>,
    /// Minimum child count of a key grid.
    pub grid_min_children: usize,
    /// Minimum number of button-class children of a key grid.
    pub grid_min_buttons: usize,
    /// Class-name fragment counted for `grid_min_buttons`.
    pub grid_button_marker: String,
    /// Resource-id fragments of the number field, in priority order.
    pub field_id_fragments: Vec<String>,
    /// Class-name fragments of text-input widgets.
    pub text_input_classes: Vec<String>,
    /// Keywords identifying the delete key.
    pub delete_keywords: Vec<String>,
    /// Resource-id suffixes of the call button.
    pub call_id_suffixes: Vec<String>,
    /// Call-button class fragments, most preferred first.
    pub call_class_preference: Vec<String>,
    /// Class-name fragments that open a contact-list zone.
    pub contact_list_classes: Vec<String>,
    /// Resource-id fragments that open a contact-list zone.
    pub contact_list_ids: Vec<String>,
    /// Label keyword of the call button.
    pub call_keyword: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            max_depth: rotary_tree::search::DEFAULT_MAX_DEPTH,
            digit_id_contains: strings(&[
                "{w}",
                "dialpad_{w}",
                "digit_{d}",
                "key_{d}",
                "button_{d}",
                "btn_{d}",
                "num_{d}",
                "pad_key_{d}",
                "dialpad_key_{d}",
                "dialkey_{d}",
                "keypad_{d}",
                "dialer_key_{d}",
                "phone_key_{d}",
                "number_{d}",
                "{d}_key",
                "{d}_button",
                "{d}",
            ]),
            digit_id_suffixes: strings(&["_{d}", "{d}", "_{w}", "/{w}"]),
            button_classes: strings(&["Button", "ImageButton"]),
            grid_min_children: 12,
            grid_min_buttons: 10,
            grid_button_marker: "Button".to_owned(),
            field_id_fragments: strings(&[
                "digits",
                "digit",
                "phone_number",
                "phoneNumber",
                "number_field",
            ]),
            text_input_classes: strings(&["EditText"]),
            delete_keywords: strings(&["delete", "backspace", "erase", "clear"]),
            call_id_suffixes: strings(&[
                "id/dialpad_floating_action_button",
                "id/floating_action_button",
                "id/dialpad_fab",
                "id/call_fab",
                "id/call_button",
            ]),
            call_class_preference: strings(&["FloatingActionButton", "ImageButton", "Button"]),
            contact_list_classes: strings(&["RecyclerView", "ListView", "ListItem"]),
            contact_list_ids: strings(&["suggested", "contacts", "contact_list"]),
            call_keyword: "call".to_owned(),
        }
    }
}

/// Substitute `{d}` and `{w}` in a digit template.
pub(crate) fn expand(template: &str, digit: Digit) -> String {
    let mut glyph = [0_u8; 4];
    template
        .replace("{d}", digit.glyph().encode_utf8(&mut glyph))
        .replace("{w}", digit.word())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_expand_both_forms() {
        let zero = Digit::new(0).unwrap();
        assert_eq!(expand("dialpad_{w}", zero), "dialpad_zero");
        assert_eq!(expand("key_{d}", zero), "key_0");
        assert_eq!(expand("{d}_button", Digit::new(4).unwrap()), "4_button");
    }

    #[test]
    fn defaults_carry_documented_thresholds() {
        let config = PatternConfig::default();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.grid_min_children, 12);
        assert_eq!(config.grid_min_buttons, 10);
        assert_eq!(config.call_class_preference[0], "FloatingActionButton");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config: PatternConfig =
            serde_json::from_str(r#"{ "delete_keywords": ["delete", "löschen"] }"#).unwrap();
        assert_eq!(config.delete_keywords, ["delete", "löschen"]);
        assert_eq!(config, PatternConfig {
            delete_keywords: config.delete_keywords.clone(),
            ..PatternConfig::default()
        });
    }
}
