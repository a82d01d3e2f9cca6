//! The application: a countdown paired with a progress bar that fills as
//! the session elapses.
//!
//! A once-per-second render tick raises the bar's target by a fixed
//! increment; the bar animates toward it on its own frame cadence. The
//! program ends when the bar has visibly reached full, not when the clock
//! reaches zero, so the closing animation always plays out.

use crate::{config, countdown, progress};
use bubbletea_rs::{
    batch, quit, tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg,
    WindowSizeMsg,
};
use lipgloss_extras::lipgloss::{Color, Style};
use std::time::Duration;

const PADDING: usize = 2;
const MAX_WIDTH: i32 = 160;

const RENDER_INTERVAL: Duration = Duration::from_secs(1);

const HELP_COLOR: &str = "#626262";

/// Once-per-second heartbeat that drives the bar's target upward.
#[derive(Debug, Clone)]
pub struct RenderTickMsg;

fn render_tick() -> Cmd {
    bubbletea_tick(RENDER_INTERVAL, |_| Box::new(RenderTickMsg) as Msg)
}

/// How far each render tick pushes the bar's target.
///
/// Chosen so the bar fills slightly ahead of the clock: over a session of
/// `minutes`, sixty ticks per minute at `0.01 / minutes` would land exactly
/// on full, and the 1.6 factor puts the target past it.
fn increment_per_tick(minutes: u64) -> f64 {
    0.01 / minutes as f64 * 1.6
}

/// Top-level program state.
pub struct App {
    countdown: countdown::Model,
    progress: progress::Model,
    minutes: u64,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let minutes = config::configured_minutes();
        let app = App {
            countdown: countdown::new(Duration::from_secs(minutes.saturating_mul(60))),
            progress: progress::new(&[]),
            minutes,
        };

        let cmd = batch(vec![app.countdown.init(), render_tick()]);
        (app, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<KeyMsg>().is_some() {
            // Any key ends the session.
            return Some(quit());
        }

        if let Some(size_msg) = msg.downcast_ref::<WindowSizeMsg>() {
            let w = size_msg.width as i32 - PADDING as i32 * 2 - 4;
            self.progress.width = w.clamp(0, MAX_WIDTH);
            return None;
        }

        if msg.downcast_ref::<RenderTickMsg>().is_some() {
            if self.progress.shown_percent() == 1.0 {
                return Some(quit());
            }

            let frame_cmd = self.progress.incr_target(increment_per_tick(self.minutes));
            self.countdown.update(msg);

            return Some(batch(vec![render_tick(), frame_cmd]));
        }

        if msg.downcast_ref::<countdown::TickMsg>().is_some() {
            return self.countdown.update(msg);
        }

        if msg.downcast_ref::<progress::FrameMsg>().is_some() {
            return self.progress.update(msg);
        }

        None
    }

    fn view(&self) -> String {
        let pad = " ".repeat(PADDING);
        let help = Style::new()
            .foreground(Color::from(HELP_COLOR))
            .render("Press any key to quit");

        format!(
            "\n{pad}{}\n\n{pad}{}\n\n{pad}{}",
            self.countdown.view(),
            self.progress.view(),
            help,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::QuitMsg;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn test_app(minutes: u64) -> App {
        App {
            countdown: countdown::new(Duration::from_secs(minutes.saturating_mul(60))),
            progress: progress::new(&[]),
            minutes,
        }
    }

    #[test]
    fn test_increment_per_tick() {
        assert!((increment_per_tick(1) - 0.016).abs() < 1e-12);
        assert!((increment_per_tick(4) - 0.004).abs() < 1e-12);
    }

    #[test]
    fn test_init_starts_both_cadences() {
        let (app, cmd) = App::init();
        assert!(cmd.is_some());
        assert_eq!(app.minutes, config::DEFAULT_MINUTES);
        assert_eq!(
            app.countdown.remaining(),
            Duration::from_secs(config::DEFAULT_MINUTES * 60)
        );
        assert_eq!(app.progress.percent(), 0.0);
    }

    #[tokio::test]
    async fn test_any_key_quits_without_touching_state() {
        let mut app = test_app(2);
        let remaining_before = app.countdown.remaining();
        let percent_before = app.progress.percent();

        let key = Box::new(KeyMsg {
            key: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
        }) as Msg;
        let cmd = app.update(key).unwrap();

        let msg = cmd.await.unwrap();
        assert!(msg.downcast_ref::<QuitMsg>().is_some());
        assert_eq!(app.countdown.remaining(), remaining_before);
        assert_eq!(app.progress.percent(), percent_before);
    }

    #[test]
    fn test_absurd_minutes_saturate_instead_of_overflowing() {
        let app = test_app(u64::MAX);
        assert_eq!(app.countdown.remaining(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_resize_clamps_width() {
        let mut app = test_app(1);

        let wide = Box::new(WindowSizeMsg {
            width: 200,
            height: 50,
        }) as Msg;
        assert!(app.update(wide).is_none());
        assert_eq!(app.progress.width, MAX_WIDTH);

        let narrow = Box::new(WindowSizeMsg {
            width: 50,
            height: 50,
        }) as Msg;
        app.update(narrow);
        assert_eq!(app.progress.width, 42);

        let tiny = Box::new(WindowSizeMsg {
            width: 5,
            height: 50,
        }) as Msg;
        app.update(tiny);
        assert_eq!(app.progress.width, 0);
    }

    #[test]
    fn test_render_tick_raises_target() {
        let mut app = test_app(1);
        let cmd = app.update(Box::new(RenderTickMsg) as Msg);
        assert!(cmd.is_some());
        assert!((app.progress.percent() - 0.016).abs() < 1e-12);

        app.update(Box::new(RenderTickMsg) as Msg);
        assert!((app.progress.percent() - 0.032).abs() < 1e-12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_tick_decrements_clock() {
        let mut app = test_app(1);

        let tick_cmd = app.countdown.init();
        let msg = tick_cmd.await.unwrap();
        app.update(msg);

        assert_eq!(app.countdown.remaining(), Duration::from_secs(59));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quits_once_bar_reaches_full() {
        let mut app = test_app(1);

        // Push the target past full and let the animation run to rest.
        let mut cmd = Some(app.progress.set_target(1.008));
        while let Some(c) = cmd {
            let msg = c.await.unwrap();
            cmd = app.update(msg);
        }
        assert_eq!(app.progress.shown_percent(), 1.0);

        let quit_cmd = app.update(Box::new(RenderTickMsg) as Msg).unwrap();
        let msg = quit_cmd.await.unwrap();
        assert!(msg.downcast_ref::<QuitMsg>().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_minute_session_runs_to_completion() {
        let mut app = test_app(1);

        // At 0.016 per tick the target crosses full on the 63rd second.
        for _ in 0..63 {
            app.update(Box::new(RenderTickMsg) as Msg);
        }
        assert!(app.progress.percent() >= 1.0);

        let mut cmd = Some(app.progress.incr_target(0.0));
        while let Some(c) = cmd {
            let msg = c.await.unwrap();
            cmd = app.update(msg);
        }
        assert_eq!(app.progress.shown_percent(), 1.0);

        let quit_cmd = app.update(Box::new(RenderTickMsg) as Msg).unwrap();
        let msg = quit_cmd.await.unwrap();
        assert!(msg.downcast_ref::<QuitMsg>().is_some());
    }

    #[test]
    fn test_unrecognized_message_is_ignored() {
        let mut app = test_app(1);
        let remaining_before = app.countdown.remaining();

        assert!(app.update(Box::new(42u32) as Msg).is_none());
        assert_eq!(app.countdown.remaining(), remaining_before);
        assert_eq!(app.progress.percent(), 0.0);
    }

    #[test]
    fn test_view_layout() {
        let app = test_app(1);
        let view = app.view();

        assert!(view.starts_with('\n'));
        assert!(view.contains("01:00"));
        assert!(view.contains("Press any key to quit"));

        let lines: Vec<&str> = view.split('\n').collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("  "));
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("  "));
        assert_eq!(lines[4], "");
        assert!(lines[5].starts_with("  "));
    }

    #[test]
    fn test_view_is_idempotent() {
        let app = test_app(3);
        assert_eq!(app.view(), app.view());
    }
}
