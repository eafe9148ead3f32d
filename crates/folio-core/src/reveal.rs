//! One-shot reveal of elements entering the viewport.
//!
//! The browser reports intersections; [`RevealTracker`] decides which of
//! them reveal an element. An element is revealed at most once and is never
//! hidden again, no matter how often it leaves and re-enters the viewport.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, verify},
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Default visible fraction that reveals an element.
pub const DEFAULT_THRESHOLD: f64 = 0.15;

/// Section ids that are never observed.
pub const EXCLUDED_SECTION_IDS: &[&str] = &["home"];

/// A single CSS length in a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the root box.
    Percent(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Offsets that grow (positive) or shrink (negative) the viewport box used
/// for intersection, in CSS `top right bottom left` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    /// Top edge offset.
    pub top: Length,
    /// Right edge offset.
    pub right: Length,
    /// Bottom edge offset.
    pub bottom: Length,
    /// Left edge offset.
    pub left: Length,
}

impl RootMargin {
    /// Margin that trims `px` pixels off the bottom of the viewport.
    pub fn bottom_inset(px: f64) -> Self {
        Self {
            top: Length::Px(0.0),
            right: Length::Px(0.0),
            bottom: Length::Px(-px),
            left: Length::Px(0.0),
        }
    }

    /// Parse CSS margin shorthand with one to four `px`/`%` lengths.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| FolioError::InvalidRootMargin {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (_, lengths) = all_consuming(margin_list)(input)
            .map_err(|_| invalid("expected lengths in px or %"))?;

        match lengths.as_slice() {
            [all] => Ok(Self::from_edges(*all, *all, *all, *all)),
            [vertical, horizontal] => {
                Ok(Self::from_edges(*vertical, *horizontal, *vertical, *horizontal))
            }
            [top, horizontal, bottom] => {
                Ok(Self::from_edges(*top, *horizontal, *bottom, *horizontal))
            }
            [top, right, bottom, left] => Ok(Self::from_edges(*top, *right, *bottom, *left)),
            _ => Err(invalid("expected at most four lengths")),
        }
    }

    fn from_edges(top: Length, right: Length, bottom: Length, left: Length) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::bottom_inset(100.0)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

fn length(input: &str) -> IResult<&str, Length> {
    let (rest, value) = verify(double, |v: &f64| v.is_finite())(input)?;
    alt((
        map(tag("px"), move |_| Length::Px(value)),
        map(char('%'), move |_| Length::Percent(value)),
    ))(rest)
}

fn margin_list(input: &str) -> IResult<&str, Vec<Length>> {
    delimited(multispace0, separated_list1(multispace1, length), multispace0)(input)
}

/// Observer options for the reveal controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Visible fraction in `[0, 1]` that reveals an element.
    pub threshold: f64,
    /// Adjustment of the viewport box used for intersection.
    pub root_margin: RootMargin,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
        }
    }
}

impl RevealOptions {
    /// Check the threshold is a usable fraction.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FolioError::Config(format!(
                "reveal threshold {} is outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Tracks which observed elements have been revealed.
///
/// The threshold only tells the browser when to report; any report that
/// says the element intersects reveals it. An element taller than the root
/// box may never reach the threshold ratio and must still be shown.
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    observed: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash + Clone> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            observed: HashSet::new(),
            revealed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an element with this section id should be observed at all.
    pub fn is_excluded(id: Option<&str>) -> bool {
        id.is_some_and(|id| EXCLUDED_SECTION_IDS.contains(&id))
    }

    /// Start tracking `key`.
    ///
    /// Returns `false` if it is already tracked or was revealed before.
    pub fn register(&mut self, key: K) -> bool {
        if self.revealed.contains(&key) {
            return false;
        }
        self.observed.insert(key)
    }

    /// Feed an intersection report.
    ///
    /// Returns `true` exactly once per registered element: the first time it
    /// is reported as intersecting. The element is no longer observed
    /// afterwards.
    pub fn on_intersection(&mut self, key: &K, is_intersecting: bool) -> bool {
        if !is_intersecting || !self.observed.remove(key) {
            return false;
        }
        self.revealed.insert(key.clone());
        true
    }

    /// Whether `key` has been revealed.
    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    /// Number of elements still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}
