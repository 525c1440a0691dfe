use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use slidekit_core::scheduler::ManualScheduler;
use slidekit_core::slider::{
    FixedViewport, NavKey, RecordingView, SliderController, SliderFrame, SliderInput,
};
use slidekit_core::{AppConfig, Deck};

type HeadlessSlider = SliderController<RecordingView, FixedViewport, ManualScheduler>;

/// Slider to drive in a headless session
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    Projects,
    Testimonials,
    Categories,
}

/// One scripted step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Input(SliderInput),
    /// Press, move by `dx` and release in one go
    Drag(f64),
    /// Change the viewport width, then resize
    Resize(f64),
    /// Fire the live autoplay timer, if any
    Tick,
    StartAutoplay,
    StopAutoplay,
    ResetAutoplay,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };
        let number = |arg: Option<&str>| -> Result<f64> {
            let arg = arg.ok_or_else(|| anyhow!("Step '{}' needs a value", name))?;
            arg.parse()
                .map_err(|_| anyhow!("Step '{}': '{}' is not a number", name, arg))
        };

        let step = match name {
            "next" => Step::Input(SliderInput::Next),
            "prev" => Step::Input(SliderInput::Prev),
            "goto" => {
                let page = number(arg)?;
                if page < 0.0 {
                    bail!("Step 'goto' needs a non-negative page");
                }
                Step::Input(SliderInput::GoToPage(page as usize))
            }
            "down" => Step::Input(SliderInput::PointerDown(number(arg)?)),
            "move" => Step::Input(SliderInput::PointerMove(number(arg)?)),
            "up" => Step::Input(SliderInput::PointerUp),
            "cancel" => Step::Input(SliderInput::PointerCancel),
            "hover" => Step::Input(SliderInput::PointerEnter),
            "leave" => Step::Input(SliderInput::PointerLeave),
            "left" => Step::Input(SliderInput::Key(NavKey::Left)),
            "right" => Step::Input(SliderInput::Key(NavKey::Right)),
            "category" => match arg {
                Some(category) if !category.is_empty() => {
                    Step::Input(SliderInput::CategoryChanged(category.to_string()))
                }
                _ => bail!("Step 'category' needs a name"),
            },
            "drag" => Step::Drag(number(arg)?),
            "resize" => Step::Resize(number(arg)?),
            "tick" => Step::Tick,
            "play" => Step::StartAutoplay,
            "stop" => Step::StopAutoplay,
            "reset" => Step::ResetAutoplay,
            other => bail!("Unknown step '{}'", other),
        };
        Ok(step)
    }
}

/// Parse a comma-separated script
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<Step>)
        .collect()
}

/// Output line for one step
#[derive(Debug, Serialize)]
struct Report<'a> {
    step: &'a str,
    index: usize,
    page: usize,
    pages: usize,
    page_size: usize,
    category: Option<&'a str>,
    autoplay: bool,
    dragging: bool,
    frame: &'a SliderFrame,
}

pub fn run(config: &AppConfig, deck: &Deck, variant: Variant, width: f64, script: &str) -> Result<()> {
    let steps = parse_script(script)?;
    let labels: Vec<&str> = script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut slider = build(config, deck, variant, width);
    info!(?variant, width, steps = steps.len(), "Starting headless session");

    print_report(&slider, "init")?;
    for (step, label) in steps.into_iter().zip(labels) {
        apply(&mut slider, step);
        print_report(&slider, label)?;
    }

    slider.teardown();
    Ok(())
}

fn build(config: &AppConfig, deck: &Deck, variant: Variant, width: f64) -> HeadlessSlider {
    let (slides, slider_config, name) = match variant {
        Variant::Projects => (deck.project_slides(), config.sliders.projects.clone(), "projects"),
        Variant::Testimonials => (
            deck.testimonial_slides(),
            config.sliders.testimonials.clone(),
            "testimonials",
        ),
        Variant::Categories => (
            deck.project_slides(),
            config.sliders.categories.clone(),
            "categories",
        ),
    };

    SliderController::new(
        slides,
        slider_config,
        RecordingView::new(),
        FixedViewport::new(width),
        ManualScheduler::new(),
    )
    .with_name(name)
}

fn apply(slider: &mut HeadlessSlider, step: Step) {
    match step {
        Step::Input(input) => slider.dispatch(input),
        Step::Drag(dx) => {
            let origin = slider.viewport().width / 2.0;
            slider.start_drag(origin);
            slider.drag(origin + dx);
            slider.end_drag();
        }
        Step::Resize(width) => {
            slider.viewport_mut().width = width;
            slider.on_resize();
        }
        Step::Tick => {
            if let Some(token) = slider.scheduler().live_token() {
                slider.on_autoplay_tick(token);
            }
        }
        Step::StartAutoplay => slider.start_autoplay(),
        Step::StopAutoplay => slider.stop_autoplay(),
        Step::ResetAutoplay => slider.reset_autoplay(),
    }
}

fn print_report(slider: &HeadlessSlider, step: &str) -> Result<()> {
    let frame = match slider.view().last_frame() {
        Some(frame) => frame.clone(),
        None => slider.frame(),
    };
    let report = Report {
        step,
        index: slider.current_index(),
        page: slider.current_page(),
        pages: slider.page_count(),
        page_size: slider.page_size(),
        category: slider.active_category(),
        autoplay: slider.is_autoplaying(),
        dragging: slider.is_dragging(),
        frame: &frame,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let steps = parse_script("next, goto:2,drag:-300 ,category:commercial,tick").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Input(SliderInput::Next),
                Step::Input(SliderInput::GoToPage(2)),
                Step::Drag(-300.0),
                Step::Input(SliderInput::CategoryChanged("commercial".to_string())),
                Step::Tick,
            ]
        );
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_script("jump").is_err());
        assert!(parse_script("goto").is_err());
        assert!(parse_script("goto:x").is_err());
        assert!(parse_script("goto:-1").is_err());
        assert!(parse_script("category:").is_err());
    }

    #[test]
    fn test_scripted_session() {
        let config = AppConfig::default();
        let mut slider = build(&config, &Deck::sample(), Variant::Projects, 1280.0);

        for step in parse_script("goto:2,drag:300,resize:800").unwrap() {
            apply(&mut slider, step);
        }
        assert_eq!(slider.page_size(), 2);
        assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn test_tick_advances_category_slider() {
        let config = AppConfig::default();
        let mut slider = build(&config, &Deck::sample(), Variant::Categories, 1280.0);

        for step in parse_script("tick,tick,hover,tick").unwrap() {
            apply(&mut slider, step);
        }
        assert_eq!(slider.current_index(), 2);
        assert!(!slider.is_autoplaying());
    }
}
