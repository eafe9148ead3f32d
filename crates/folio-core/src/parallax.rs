//! Pointer parallax for the hero avatar.
//!
//! The controller runs in one of three modes picked once at start-up from the
//! environment [`Capabilities`]:
//!
//! - [`ParallaxMode::Disabled`] when the reader prefers reduced motion. A
//!   single entrance animation is applied and no frames run.
//! - [`ParallaxMode::TouchAutoRotate`] on touch devices. A timer walks the
//!   target around a circle centred on the viewport.
//! - [`ParallaxMode::PointerTracking`] everywhere else. The target follows
//!   the pointer and returns to the centre when it leaves the card.
//!
//! Every frame the smoothed position eases towards the target and is turned
//! into a tilt, which drives the card rotation and three increasingly
//! amplified decorative layers.

use bitflags::bitflags;

use crate::easing::lerp;

/// Smoothing factor applied per frame.
pub const SMOOTHING: f64 = 0.1;

/// Largest tilt on either axis, in degrees.
pub const MAX_TILT_DEG: f64 = 15.0;

/// Share of the tilt turned into layer displacement.
pub const PARALLAX_FACTOR: f64 = 0.3;

/// Auto-rotate timer period in milliseconds.
pub const AUTO_ROTATE_INTERVAL_MS: i32 = 50;

/// Angle advanced per auto-rotate tick, in degrees.
pub const AUTO_ROTATE_STEP_DEG: f64 = 0.5;

/// Radius of the auto-rotate circle in pixels.
pub const AUTO_ROTATE_RADIUS: f64 = 100.0;

/// Animation applied to the card when motion is reduced.
pub const ENTRANCE_ANIMATION: &str = "fadeInUp 1s ease";

/// Media query for the reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

const CONTAINER_DEPTH: f64 = 2.0;
const RIM_DEPTH: f64 = 3.0;
const GLOW_DEPTH: f64 = 4.0;

bitflags! {
    /// Environment capabilities that select the parallax mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        /// The device accepts touch input.
        const TOUCH = 1 << 0;
        /// The reader asked for reduced motion.
        const REDUCED_MOTION = 1 << 1;
    }
}

/// Operating mode of the parallax controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallaxMode {
    /// Static entrance animation only.
    Disabled,
    /// Synthetic circular motion for devices without a hovering pointer.
    TouchAutoRotate,
    /// Follow the real pointer.
    PointerTracking,
}

impl ParallaxMode {
    /// Pick the mode for an environment. Reduced motion wins over touch.
    pub fn select(capabilities: Capabilities) -> Self {
        if capabilities.contains(Capabilities::REDUCED_MOTION) {
            ParallaxMode::Disabled
        } else if capabilities.contains(Capabilities::TOUCH) {
            ParallaxMode::TouchAutoRotate
        } else {
            ParallaxMode::PointerTracking
        }
    }

    /// Whether the per-frame loop runs in this mode.
    pub fn is_animated(self) -> bool {
        self != ParallaxMode::Disabled
    }
}

/// Inner size of the browser viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Viewport of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre point.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Animation state owned by the parallax controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxState {
    mode: ParallaxMode,
    target: (f64, f64),
    current: (f64, f64),
    auto_angle_deg: f64,
    pointer_seen: bool,
}

impl ParallaxState {
    /// Fresh state aiming at the viewport centre.
    pub fn new(mode: ParallaxMode, viewport: Viewport) -> Self {
        Self {
            mode,
            target: viewport.center(),
            current: (0.0, 0.0),
            auto_angle_deg: 0.0,
            pointer_seen: false,
        }
    }

    /// Mode this state was created for.
    pub fn mode(&self) -> ParallaxMode {
        self.mode
    }

    /// Position the smoothing is heading for.
    pub fn target(&self) -> (f64, f64) {
        self.target
    }

    /// Smoothed position after the last frame.
    pub fn current(&self) -> (f64, f64) {
        self.current
    }

    /// Pointer moved to client coordinates `(x, y)`.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer_seen = true;
        self.target = (x, y);
    }

    /// Pointer left the card.
    pub fn on_pointer_leave(&mut self, viewport: Viewport) {
        self.target = viewport.center();
    }

    /// Advance the synthetic motion by one timer tick.
    ///
    /// Only moves the target in touch mode and only while no real pointer
    /// input has arrived. Returns whether the target moved.
    pub fn auto_rotate_tick(&mut self, viewport: Viewport) -> bool {
        if self.mode != ParallaxMode::TouchAutoRotate || self.pointer_seen {
            return false;
        }
        self.auto_angle_deg += AUTO_ROTATE_STEP_DEG;
        let radians = self.auto_angle_deg.to_radians();
        let (cx, cy) = viewport.center();
        self.target = (
            cx + radians.cos() * AUTO_ROTATE_RADIUS,
            cy + radians.sin() * AUTO_ROTATE_RADIUS,
        );
        true
    }

    /// Run one animation frame and return the styles to apply.
    pub fn frame(&mut self, viewport: Viewport) -> LayerTransforms {
        self.current = (
            lerp(self.current.0, self.target.0, SMOOTHING),
            lerp(self.current.1, self.target.1, SMOOTHING),
        );
        // Each tilt reads the other axis's position against its own extent,
        // so a centred pointer still leaves the card slightly turned.
        LayerTransforms {
            tilt_x: tilt(self.current.1, viewport.width),
            tilt_y: tilt(self.current.0, viewport.height),
        }
    }
}

/// Map a position along an axis of length `extent` to a tilt in degrees.
fn tilt(position: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    ((position / extent) * MAX_TILT_DEG * 2.0 - MAX_TILT_DEG).clamp(-MAX_TILT_DEG, MAX_TILT_DEG)
}

/// Styles for the card and its three decorative layers for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTransforms {
    /// Rotation around the vertical axis, degrees.
    pub tilt_x: f64,
    /// Rotation around the horizontal axis, degrees.
    pub tilt_y: f64,
}

impl LayerTransforms {
    fn parallax(&self) -> (f64, f64) {
        (self.tilt_x * PARALLAX_FACTOR, self.tilt_y * PARALLAX_FACTOR)
    }

    fn combined(&self) -> f64 {
        (self.tilt_x + self.tilt_y).abs()
    }

    fn translate(&self, depth: f64) -> String {
        let (px, py) = self.parallax();
        format!("translate3d({}px, {}px, 0)", px * depth, py * depth)
    }

    /// Card transform.
    pub fn card_transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateZ(0)",
            -self.tilt_y, self.tilt_x
        )
    }

    /// Avatar container transform (shallowest layer).
    pub fn container_transform(&self) -> String {
        format!("{} scale(1.02)", self.translate(CONTAINER_DEPTH))
    }

    /// Rim light transform.
    pub fn rim_transform(&self) -> String {
        format!(
            "{} rotate({}deg)",
            self.translate(RIM_DEPTH),
            (self.tilt_x + self.tilt_y) * 2.0
        )
    }

    /// Rim light opacity.
    pub fn rim_opacity(&self) -> f64 {
        (0.6 + self.combined() * 0.3).clamp(0.0, 1.0)
    }

    /// Glow transform (deepest layer).
    pub fn glow_transform(&self) -> String {
        format!(
            "{} scale({})",
            self.translate(GLOW_DEPTH),
            1.0 + self.combined() * 0.1
        )
    }

    /// Glow opacity.
    pub fn glow_opacity(&self) -> f64 {
        (0.6 + self.combined() * 0.2).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const VIEWPORT: Viewport = Viewport {
        width: 1200.0,
        height: 800.0,
    };

    #[test]
    fn mode_selection() {
        assert_eq!(ParallaxMode::select(Capabilities::empty()), ParallaxMode::PointerTracking);
        assert_eq!(ParallaxMode::select(Capabilities::TOUCH), ParallaxMode::TouchAutoRotate);
        assert_eq!(
            ParallaxMode::select(Capabilities::TOUCH | Capabilities::REDUCED_MOTION),
            ParallaxMode::Disabled
        );
        assert!(!ParallaxMode::Disabled.is_animated());
    }

    #[test]
    fn targets_start_centred_and_reset_on_leave() {
        let mut state = ParallaxState::new(ParallaxMode::PointerTracking, VIEWPORT);
        assert_eq!(state.target(), (600.0, 400.0));
        state.on_pointer_move(10.0, 20.0);
        assert_eq!(state.target(), (10.0, 20.0));
        state.on_pointer_leave(VIEWPORT);
        assert_eq!(state.target(), (600.0, 400.0));
    }

    #[test]
    fn frame_smooths_towards_target() {
        let mut state = ParallaxState::new(ParallaxMode::PointerTracking, VIEWPORT);
        state.frame(VIEWPORT);
        assert_relative_eq!(state.current().0, 60.0);
        assert_relative_eq!(state.current().1, 40.0);

        for _ in 0..400 {
            state.frame(VIEWPORT);
        }
        let settled = state.frame(VIEWPORT);
        assert_relative_eq!(settled.tilt_x, -5.0, epsilon = 1e-6);
        assert_relative_eq!(settled.tilt_y, 7.5, epsilon = 1e-6);
    }

    #[test]
    fn tilt_is_bounded() {
        let mut state = ParallaxState::new(ParallaxMode::PointerTracking, VIEWPORT);
        state.on_pointer_move(1.0e6, -1.0e6);
        for _ in 0..200 {
            let layers = state.frame(VIEWPORT);
            assert!(layers.tilt_x.abs() <= MAX_TILT_DEG);
            assert!(layers.tilt_y.abs() <= MAX_TILT_DEG);
        }
        let layers = state.frame(VIEWPORT);
        assert_eq!(layers.tilt_x, -MAX_TILT_DEG);
        assert_eq!(layers.tilt_y, MAX_TILT_DEG);
    }

    #[test]
    fn vertical_pointer_drives_horizontal_tilt() {
        let mut state = ParallaxState::new(ParallaxMode::PointerTracking, VIEWPORT);
        state.on_pointer_move(600.0, 0.0);
        let mut layers = state.frame(VIEWPORT);
        for _ in 0..500 {
            layers = state.frame(VIEWPORT);
        }
        assert_relative_eq!(layers.tilt_x, -MAX_TILT_DEG, epsilon = 1e-6);
        assert_relative_eq!(layers.tilt_y, 7.5, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_viewport_gives_no_tilt() {
        let mut state = ParallaxState::new(ParallaxMode::PointerTracking, Viewport::new(0.0, 0.0));
        let layers = state.frame(Viewport::new(0.0, 0.0));
        assert_eq!(layers.tilt_x, 0.0);
        assert_eq!(layers.tilt_y, 0.0);
    }

    #[test]
    fn auto_rotate_walks_a_circle() {
        let mut state = ParallaxState::new(ParallaxMode::TouchAutoRotate, VIEWPORT);
        for _ in 0..180 {
            assert!(state.auto_rotate_tick(VIEWPORT));
            let (x, y) = state.target();
            let radius = ((x - 600.0).powi(2) + (y - 400.0).powi(2)).sqrt();
            assert_relative_eq!(radius, AUTO_ROTATE_RADIUS, epsilon = 1e-9);
        }
        let (x, y) = state.target();
        assert_relative_eq!(x, 600.0, epsilon = 1e-9);
        assert_relative_eq!(y, 400.0 + AUTO_ROTATE_RADIUS, epsilon = 1e-9);
    }

    #[test]
    fn auto_rotate_stops_after_real_pointer_input() {
        let mut state = ParallaxState::new(ParallaxMode::TouchAutoRotate, VIEWPORT);
        state.on_pointer_move(5.0, 5.0);
        assert!(!state.auto_rotate_tick(VIEWPORT));
        assert_eq!(state.target(), (5.0, 5.0));

        let mut desktop = ParallaxState::new(ParallaxMode::PointerTracking, VIEWPORT);
        assert!(!desktop.auto_rotate_tick(VIEWPORT));
    }

    #[test]
    fn layers_amplify_with_depth() {
        let layers = LayerTransforms {
            tilt_x: 10.0,
            tilt_y: -5.0,
        };
        assert_eq!(
            layers.card_transform(),
            "perspective(1000px) rotateX(5deg) rotateY(10deg) translateZ(0)"
        );
        assert_eq!(layers.container_transform(), "translate3d(6px, -3px, 0) scale(1.02)");
        assert_eq!(layers.rim_transform(), "translate3d(9px, -4.5px, 0) rotate(10deg)");
        assert_eq!(layers.glow_transform(), "translate3d(12px, -6px, 0) scale(1.5)");
        assert_eq!(layers.rim_opacity(), 1.0);
        assert_relative_eq!(layers.glow_opacity(), 1.0);

        let calm = LayerTransforms {
            tilt_x: 0.5,
            tilt_y: 0.0,
        };
        assert_relative_eq!(calm.rim_opacity(), 0.75);
        assert_relative_eq!(calm.glow_opacity(), 0.7);
    }
}
