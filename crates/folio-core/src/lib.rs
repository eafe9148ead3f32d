//! DOM-free controllers for a single-page portfolio.
//!
//! Every behaviour of the page lives here as plain Rust state machines and
//! pure functions. The browser glue (`folio-wasm`) only reads DOM geometry,
//! forwards events and writes the derived classes and styles back.
//!
//! # Modules
//!
//! - [`easing`] - cubic ease-in-out and linear interpolation
//! - [`scroll`] - token-guarded smooth scroll animation
//! - [`frame`] - frame-coalescing scheduler shared by the scroll reactors
//! - [`reactors`] - navbar style, active link and scroll-to-top state
//! - [`reveal`] - one-shot viewport reveal tracking
//! - [`parallax`] - pointer parallax for the hero avatar
//! - [`nav`] - mobile navigation menu state
//! - [`form`] - contact form validation and submission
//! - [`relay`] - email relay capability and configuration
//! - [`config`] - page configuration
//!
//! # Example
//!
//! ```
//! use folio_core::form::{validate, FormValues};
//!
//! let values = FormValues::new("Ann", "ann@example.com", "This is long enough.");
//! assert!(validate(&values).is_valid());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod easing;
mod error;
pub mod form;
pub mod frame;
pub mod nav;
pub mod parallax;
pub mod reactors;
pub mod relay;
pub mod reveal;
pub mod scroll;

pub use config::{PageConfig, ScrollConfig};
pub use easing::{ease_in_out_cubic, lerp};
pub use error::{FolioError, Result};
pub use form::{
    ContactForm, Field, FormValues, FormView, StatusKind, SubmissionStatus, SubmitOutcome,
};
pub use frame::FrameCoalescer;
pub use nav::NavMenu;
pub use parallax::{Capabilities, LayerTransforms, ParallaxMode, ParallaxState, Viewport};
pub use reactors::{SectionBounds, ThresholdToggle};
pub use relay::{EmailRelay, RelayConfig, RelayError, RelayResponse, TemplateParams};
pub use reveal::{RevealOptions, RevealTracker, RootMargin};
pub use scroll::{ScrollAnimator, ScrollFrame, ScrollRun};

// ============================================================================
// Page constants
// ============================================================================

/// Navbar height assumed when the navbar element is missing.
pub const DEFAULT_NAVBAR_HEIGHT: f64 = 80.0;

/// Class toggled on the navbar once the page is scrolled.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Class marking the active nav link and the open mobile menu.
pub const ACTIVE_CLASS: &str = "active";

/// Class marking revealed elements and the shown scroll-to-top button.
pub const VISIBLE_CLASS: &str = "visible";
