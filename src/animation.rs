//! Count-up numbers and staggered entrances.
//!
//! Each animation lives inside a Yew effect. The effect owns the pending
//! animation frame or timer, so a new target value (or unmounting) drops the
//! handle and cancels the in-flight animation before the next one starts.

use std::{cell::RefCell, rc::Rc};

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

pub const COUNT_UP_DURATION_MS: f64 = 1500.0;
/// Gap between the hidden and shown states so the browser paints the
/// starting styles before transitioning.
const REVEAL_DELAY_MS: u32 = 20;
pub const ROW_STAGGER_MS: u32 = 50;
pub const BAR_STAGGER_MS: u32 = 100;

pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountUp {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
}

impl CountUp {
    pub fn new(to: f64) -> Self {
        Self {
            from: 0.0,
            to,
            duration_ms: COUNT_UP_DURATION_MS,
        }
    }

    /// Value to show `elapsed_ms` after the start and whether the animation
    /// is over. Intermediate values are whole numbers; the last one is exact.
    pub fn sample(&self, elapsed_ms: f64) -> (f64, bool) {
        let progress = if self.duration_ms > 0.0 {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            return (self.to, true);
        }

        let eased = ease_out_quart(progress);
        ((eased * (self.to - self.from) + self.from).floor(), false)
    }
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

fn schedule_frame(
    slot: FrameSlot,
    animation: CountUp,
    started_at: Option<f64>,
    shown: UseStateHandle<f64>,
) {
    let next_slot = slot.clone();
    let frame = request_animation_frame(move |timestamp| {
        let started_at = started_at.unwrap_or(timestamp);
        let (value, finished) = animation.sample(timestamp - started_at);
        shown.set(value);
        if !finished {
            schedule_frame(next_slot, animation, Some(started_at), shown);
        }
    });
    *slot.borrow_mut() = Some(frame);
}

/// Animate from zero up to `target` whenever `target` changes.
#[hook]
pub fn use_count_up(target: f64) -> f64 {
    let shown = use_state(|| 0.0);

    {
        let shown = shown.clone();
        use_effect_with_deps(
            move |target| {
                let slot: FrameSlot = Rc::new(RefCell::new(None));
                schedule_frame(slot.clone(), CountUp::new(*target), None, shown);
                move || {
                    slot.borrow_mut().take();
                }
            },
            target,
        );
    }

    *shown
}

/// Starts `false` and flips to `true` shortly after each change of `deps`,
/// so elements can transition from their hidden styles.
#[hook]
pub fn use_reveal<D>(deps: D) -> bool
where
    D: PartialEq + 'static,
{
    let revealed = use_state(|| false);

    {
        let revealed = revealed.clone();
        use_effect_with_deps(
            move |_| {
                revealed.set(false);
                let timeout = Timeout::new(REVEAL_DELAY_MS, move || revealed.set(true));
                move || drop(timeout)
            },
            deps,
        );
    }

    *revealed
}

/// Inline style for the `index`th element of a fade and slide-in sequence.
pub fn slide_in_style(revealed: bool, index: usize, stagger_ms: u32) -> String {
    if revealed {
        let delay = index as u32 * stagger_ms;
        format!(
            "opacity: 1; transform: translateY(0); transition: opacity 0.3s ease {delay}ms, transform 0.3s ease {delay}ms;"
        )
    } else {
        "opacity: 0; transform: translateY(10px);".to_string()
    }
}

/// Inline style for a chart bar growing to `height_percent`.
pub fn bar_style(revealed: bool, index: usize, height_percent: f64) -> String {
    let delay = index as u32 * BAR_STAGGER_MS;
    let height = if revealed { height_percent } else { 0.0 };
    format!(
        "height: {height}%; transition: height 0.8s cubic-bezier(0.4, 0, 0.2, 1) {delay}ms;"
    )
}

#[cfg(test)]
mod tests {
    use super::{bar_style, ease_out_quart, slide_in_style, CountUp};

    #[test]
    fn easing_starts_at_zero_and_ends_at_one() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(0.5), 0.9375);
    }

    #[test]
    fn count_up_floors_until_the_last_frame() {
        let animation = CountUp::new(60.5);

        assert_eq!(animation.sample(0.0), (0.0, false));
        assert_eq!(animation.sample(750.0), (56.0, false));
        assert_eq!(animation.sample(1500.0), (60.5, true));
        assert_eq!(animation.sample(9000.0), (60.5, true));
    }

    #[test]
    fn count_up_handles_negative_targets() {
        let animation = CountUp::new(-100.0);

        let (value, finished) = animation.sample(750.0);

        assert!(!finished);
        assert!((-100.0..=0.0).contains(&value));
        assert_eq!(animation.sample(1500.0), (-100.0, true));
    }

    #[test]
    fn staggered_styles() {
        assert_eq!(
            slide_in_style(false, 3, 50),
            "opacity: 0; transform: translateY(10px);"
        );
        assert!(slide_in_style(true, 3, 50).contains("opacity 0.3s ease 150ms"));
        assert!(bar_style(false, 2, 80.0).starts_with("height: 0%;"));
        assert!(bar_style(true, 2, 80.0).starts_with("height: 80%;"));
        assert!(bar_style(true, 2, 80.0).contains("200ms"));
    }
}
