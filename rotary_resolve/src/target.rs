// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query keys and results.

use core::fmt;

use rotary_tree::NodeId;

const WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// A decimal digit `0..=9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// Digit with the given value, or `None` above 9.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    /// Digit for an ASCII numeral.
    pub fn from_char(glyph: char) -> Option<Self> {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "to_digit(10) is at most 9."
        )]
        glyph.to_digit(10).map(|v| Self(v as u8))
    }

    /// Numeric value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII numeral.
    pub const fn glyph(self) -> char {
        (b'0' + self.0) as char
    }

    /// English word form, as some dialers use in resource ids (`"zero"`, `"one"`, …).
    pub const fn word(self) -> &'static str {
        WORDS[self.0 as usize]
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Semantically named element to locate in the foreign tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SemanticTarget {
    /// The key for one digit.
    Digit(Digit),
    /// The backspace key.
    Delete,
    /// The button that places the call.
    Call,
    /// The text field holding the number being dialed.
    NumberField,
    /// The container grouping the twelve keys.
    DialPadContainer,
}

impl fmt::Display for SemanticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "digit {d}"),
            Self::Delete => f.write_str("delete key"),
            Self::Call => f.write_str("call button"),
            Self::NumberField => f.write_str("number field"),
            Self::DialPadContainer => f.write_str("dial pad"),
        }
    }
}

/// Which strategy produced a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Text or description equal to the digit glyph.
    ExactLabel,
    /// Resource id matched the digit dictionary.
    ResourceIdPattern,
    /// Button-class node whose label contains the digit glyph.
    ButtonClassLabel,
    /// Node with enough button children to be a key grid.
    ButtonGrid,
    /// Resource id matched a known number-field fragment.
    FieldResourceId,
    /// First editable text-input node.
    EditableClass,
    /// Resource id, description, or text contained a delete keyword.
    DeleteKeyword,
    /// Resource id ended with a known call-button id.
    CallResourceId,
    /// Button outside any contact list whose label mentions calling.
    CallLabel,
}

/// A resolved target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Found {
    /// Matched node, valid only for the snapshot it was resolved against.
    pub node: NodeId,
    /// Strategy that matched.
    pub strategy: Strategy,
}

/// Outcome of one resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The target is present.
    Found {
        /// Matched node, valid only for the snapshot it was resolved against.
        node: NodeId,
        /// Strategy that matched.
        strategy: Strategy,
    },
    /// No strategy matched. This is an expected outcome, not a failure.
    NotFound,
}

impl Resolution {
    /// The matched node, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Found { node, .. } => Some(*node),
            Self::NotFound => None,
        }
    }

    /// The matching strategy, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Self::Found { strategy, .. } => Some(*strategy),
            Self::NotFound => None,
        }
    }
}

impl From<Found> for Resolution {
    fn from(found: Found) -> Self {
        Self::Found {
            node: found.node,
            strategy: found.strategy,
        }
    }
}

/// Why a checked resolution produced nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The target is not exposed by the current foreign tree.
    #[error("{0} not found in the foreign tree")]
    NotFound(SemanticTarget),
    /// Nothing matched and part of the tree lay below the depth bound.
    #[error("{target} not found; search stopped at depth {max_depth}")]
    MalformedTree {
        /// The target being searched for.
        target: SemanticTarget,
        /// Depth bound that cut the search.
        max_depth: usize,
    },
}

impl ResolveError {
    /// The target being searched for.
    pub fn target(&self) -> SemanticTarget {
        match self {
            Self::NotFound(target) | Self::MalformedTree { target, .. } => *target,
        }
    }
}
