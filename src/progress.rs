//! Animated progress bar component.
//!
//! The bar keeps two percentages: the one currently shown and the target it
//! is easing toward. Raising the target starts (or retargets) a spring-based
//! animation that advances the shown fill a fraction per frame at 60 FPS,
//! so increments land smoothly instead of jumping.
//!
//! # Basic Usage
//!
//! ```rust
//! use tickbar::progress;
//!
//! let mut bar = progress::new(&[progress::with_width(50)]);
//! let _cmd = bar.set_target(0.25);
//! assert_eq!(bar.percent(), 0.25);
//! assert!(bar.is_animating());
//! ```
//!
//! Targets are recorded as given and may drift slightly above 1.0 when a
//! caller keeps incrementing past full; the animation itself never shows
//! more than a full bar, and converges to exactly 1.0 in that case.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::lipgloss::{self, blending::blend_1d, Color, Style};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for progress instances.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;
const DEFAULT_WIDTH: i32 = 40;
const DEFAULT_FREQUENCY: f64 = 18.0;
const DEFAULT_DAMPING: f64 = 1.0;

/// Default gradient endpoints, purple to pink.
const DEFAULT_RAMP_START: &str = "#5A56E0";
const DEFAULT_RAMP_END: &str = "#EE6FF8";

/// Equilibrium thresholds: once the shown fill is this close to the target
/// and this slow, the animation snaps to the target and stops.
const REST_DISTANCE: f64 = 0.001;
const REST_VELOCITY: f64 = 0.01;

/// Configuration options for the progress bar.
pub enum ProgressOption {
    /// Custom gradient between two colors (hex codes or named colors).
    WithGradient(String, String),
    /// Solid color fill instead of a gradient.
    WithSolidFill(String),
    /// Total width of the bar in columns, percentage readout included.
    WithWidth(i32),
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithGradient(color_a, color_b) => {
                m.use_ramp = true;
                m.ramp_color_a = color_a.clone();
                m.ramp_color_b = color_b.clone();
            }
            ProgressOption::WithSolidFill(color) => {
                m.full_color = color.clone();
                m.use_ramp = false;
            }
            ProgressOption::WithWidth(width) => {
                m.width = *width;
            }
        }
    }
}

/// Blends the fill between two custom colors.
pub fn with_gradient(color_a: String, color_b: String) -> ProgressOption {
    ProgressOption::WithGradient(color_a, color_b)
}

/// Fills the bar with a single solid color.
pub fn with_solid_fill(color: String) -> ProgressOption {
    ProgressOption::WithSolidFill(color)
}

/// Sets the total width of the bar in columns.
pub fn with_width(w: i32) -> ProgressOption {
    ProgressOption::WithWidth(w)
}

/// Message emitted by the animator's own scheduler to advance the eased
/// fill one step toward its target.
///
/// Frames carry the identity of the bar and of the animation run that
/// scheduled them, so frames addressed to another bar, or left over from a
/// superseded run, are dropped instead of advancing the fill twice.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    id: i64,
    tag: i64,
}

/// Damped spring stepping the shown percentage toward the target, one frame
/// at a time.
#[derive(Debug, Clone)]
struct Spring {
    frequency: f64,
    damping: f64,
    fps: f64,
}

impl Spring {
    fn new(fps: f64, frequency: f64, damping: f64) -> Self {
        Self {
            frequency,
            damping,
            fps,
        }
    }

    fn update(&self, position: f64, velocity: f64, target: f64) -> (f64, f64) {
        let dt = 1.0 / self.fps;
        let spring_force = -self.frequency * (position - target);
        let damping_force = -self.damping * velocity;
        let acceleration = spring_force + damping_force;

        let new_velocity = velocity + acceleration * dt;
        let new_position = position + new_velocity * dt;

        (new_position, new_velocity)
    }
}

/// Progress bar state: styling plus the animated target/shown pair.
#[derive(Debug, Clone)]
pub struct Model {
    /// Keeps us from consuming frames intended for other bars.
    id: i64,

    /// Animation run counter; bumped on every retarget so frames from a
    /// superseded run are rejected.
    tag: i64,

    /// Total width of the bar, percentage readout included.
    pub width: i32,

    /// Character for filled sections.
    pub full: char,
    /// Color of the filled portion when no gradient is in use.
    pub full_color: String,

    /// Character for empty sections.
    pub empty: char,
    /// Color of the empty portion.
    pub empty_color: String,

    /// Whether to render the numeric percentage after the bar.
    pub show_percentage: bool,

    spring: Spring,
    shown: f64,
    target: f64,
    velocity: f64,

    use_ramp: bool,
    ramp_color_a: String,
    ramp_color_b: String,
}

/// Creates a progress bar at 0%, with the default gradient fill.
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        width: DEFAULT_WIDTH,
        full: '█',
        full_color: "#7571F9".to_string(),
        empty: '░',
        empty_color: "#606060".to_string(),
        show_percentage: true,
        spring: Spring::new(FPS as f64, DEFAULT_FREQUENCY, DEFAULT_DAMPING),
        shown: 0.0,
        target: 0.0,
        velocity: 0.0,
        use_ramp: true,
        ramp_color_a: DEFAULT_RAMP_START.to_string(),
        ramp_color_b: DEFAULT_RAMP_END.to_string(),
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl Model {
    /// The target percentage the bar is easing toward.
    ///
    /// Recorded as given by the caller; repeated increments can leave it a
    /// little above 1.0.
    pub fn percent(&self) -> f64 {
        self.target
    }

    /// The percentage currently shown, in `[0.0, 1.0]`.
    ///
    /// Lags the target while an animation is in flight, and equals exactly
    /// `min(target, 1.0)` once the animation has converged.
    pub fn shown_percent(&self) -> f64 {
        self.shown
    }

    /// Records a new target and returns the command scheduling the next
    /// animation frame.
    ///
    /// Calling this again before the previous animation converges simply
    /// retargets it in place; there is never more than one animation run.
    pub fn set_target(&mut self, p: f64) -> Cmd {
        self.target = p;
        self.tag += 1;
        self.next_frame()
    }

    /// Raises the target by `v` and returns the animation command.
    pub fn incr_target(&mut self, v: f64) -> Cmd {
        self.set_target(self.target + v)
    }

    /// Whether the shown fill still has ground to cover.
    pub fn is_animating(&self) -> bool {
        let dist = (self.shown - self.effective_target()).abs();
        dist >= REST_DISTANCE || self.velocity.abs() >= REST_VELOCITY
    }

    /// The value the animation actually converges to: the target, capped at
    /// a full bar.
    fn effective_target(&self) -> f64 {
        self.target.min(1.0)
    }

    /// Consumes one animation frame, advancing the shown fill one spring
    /// step toward the target.
    ///
    /// Returns the command for the following frame while the animation is
    /// still converging, or `None` once the shown fill has snapped onto the
    /// target (or the frame was foreign or stale).
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame_msg) = msg.downcast_ref::<FrameMsg>() {
            if frame_msg.id != self.id || frame_msg.tag != self.tag {
                return None;
            }

            let target = self.effective_target();

            if !self.is_animating() {
                // A retarget finer than the rest thresholds never wakes the
                // spring; settle it directly so the fill still lands.
                self.shown = target.clamp(0.0, 1.0);
                self.velocity = 0.0;
                return None;
            }

            let (new_shown, new_velocity) = self.spring.update(self.shown, self.velocity, target);
            self.shown = new_shown.clamp(0.0, 1.0);
            self.velocity = new_velocity;

            if !self.is_animating() {
                // At equilibrium; land exactly on the target so callers can
                // compare against it without a tolerance.
                self.shown = target.clamp(0.0, 1.0);
                self.velocity = 0.0;
                return None;
            }

            return Some(self.next_frame());
        }

        None
    }

    /// Renders the bar at its current animated fill.
    pub fn view(&self) -> String {
        self.view_as(self.shown)
    }

    /// Renders the bar at an explicit fill percentage, bypassing the
    /// animation state. Pure; identical inputs yield identical output.
    pub fn view_as(&self, percent: f64) -> String {
        let percent_view = self.percentage_view(percent);
        let percent_width = lipgloss::width_visible(&percent_view) as i32;
        let bar_view = self.bar_view(percent, percent_width);

        format!("{}{}", bar_view, percent_view)
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

        bubbletea_tick(duration, move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }

    fn bar_view(&self, percent: f64, text_width: i32) -> String {
        let tw = std::cmp::max(0, self.width - text_width); // total bar width
        let fw = ((tw as f64) * percent).round() as i32;
        let fw = fw.clamp(0, tw); // filled width

        let mut result = String::new();

        if self.use_ramp {
            let grad_len = std::cmp::max(2, tw) as usize;
            let start = Color::from(self.ramp_color_a.as_str());
            let end = Color::from(self.ramp_color_b.as_str());
            let gradient = blend_1d(grad_len, vec![start, end]);

            for i in 0..fw as usize {
                let idx = std::cmp::min(i, grad_len - 1);
                let styled = Style::new()
                    .foreground(gradient[idx].clone())
                    .render(&self.full.to_string());
                result.push_str(&styled);
            }
        } else {
            let styled = Style::new()
                .foreground(Color::from(self.full_color.as_str()))
                .render(&self.full.to_string());
            result.push_str(&styled.repeat(fw as usize));
        }

        let empty_styled = Style::new()
            .foreground(Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());
        let n = std::cmp::max(0, tw - fw);
        result.push_str(&empty_styled.repeat(n as usize));

        result
    }

    fn percentage_view(&self, percent: f64) -> String {
        if !self.show_percentage {
            return String::new();
        }

        let percent = percent.clamp(0.0, 1.0);
        format!(" {:3.0}%", percent * 100.0)
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
