//! Everything the window shows, without the window: the simulation, the view,
//! the observable model and the playback timer, wired together.

use crate::config::Config;
use crate::error::Result;
use crate::grid::Grid;
use crate::input::{Pointer, BUTTON_ZOOM_STEP};
use crate::lif::{self, LifPattern};
use crate::model::{Change, Model, Origin};
use crate::simulation::{Generation, Simulation};
use crate::timer::{Timer, TimerConfig};
use crate::ui::Action;
use crate::view::ViewTransform;
use anyhow::Context as _;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Extra zoom-out applied once after the first seed is fitted.
const STARTUP_ZOOM: f32 = -0.4;

/// What the simulation observer reports after each change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimulationEvent {
    generation: Generation,
    processed: Generation,
    population: usize,
}

pub struct App {
    pub simulation: Simulation,
    pub view: ViewTransform,
    pub model: Model,
    pub timer: Timer,
    pub pointer: Pointer,
    /// Viewport size in logical points.
    pub viewport: [f32; 2],
    pub population: usize,
    /// Last seed load failure, shown in the control panel.
    pub last_error: Option<String>,

    simulation_events: Receiver<SimulationEvent>,
    generation_changes: Receiver<Change<u64>>,
    running_changes: Receiver<Change<bool>>,
    interval_changes: Receiver<Change<u64>>,
}

impl App {
    pub fn new(seed: LifPattern, config: &Config, viewport: [f32; 2], now: Instant) -> Self {
        let rule = config.rule.unwrap_or(seed.rule);
        let mut simulation = Simulation::new(seed.cells, rule);
        log::info!("Starting with {} live cells, rule {}", simulation.grid().len(), rule);

        let (sender, simulation_events) = mpsc::channel();
        simulation.set_observer(move |generation, processed, grid: &Grid| {
            // The receiver lives as long as the app, a failed send only happens on shutdown.
            let _ = sender.send(SimulationEvent { generation, processed, population: grid.len() });
        });

        let interval_ms = config.timer.interval.as_millis() as u64;
        let mut model = Model::new(interval_ms, false);
        let generation_changes = model.generation.subscribe();
        let running_changes = model.running.subscribe();
        let interval_changes = model.interval_ms.subscribe();

        let mut app = Self {
            simulation,
            view: ViewTransform::new(config.view),
            model,
            timer: Timer::new(TimerConfig { running: false, ..config.timer }, now),
            pointer: Pointer::default(),
            viewport,
            population: 0,
            last_error: None,
            simulation_events,
            generation_changes,
            running_changes,
            interval_changes,
        };
        app.recenter();
        app.view.zoom(STARTUP_ZOOM, viewport[0], viewport[1]);
        if config.timer.running {
            app.model.running.set(true, Origin::Host);
        }
        app.sync(now);
        app
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        log::debug!("Action: {:?}", action);
        match action {
            Action::StepForward => self.simulation.step(),
            Action::StepBack => {
                let generation = *self.model.generation.get();
                if generation > 0 {
                    self.model.generation.set(generation - 1, Origin::Ui);
                }
            }
            Action::Play => self.model.running.set(true, Origin::Ui),
            Action::Pause => self.model.running.set(false, Origin::Ui),
            Action::Restart => self.model.generation.set(0, Origin::Ui),
            Action::SetGeneration(generation) => self.model.generation.set(generation, Origin::Ui),
            Action::SetInterval(ms) => self.model.interval_ms.set(ms, Origin::Ui),
            Action::ZoomIn => {
                self.view.zoom(BUTTON_ZOOM_STEP, self.viewport[0], self.viewport[1]);
            }
            Action::ZoomOut => {
                self.view.zoom(-BUTTON_ZOOM_STEP, self.viewport[0], self.viewport[1]);
            }
            Action::Recenter => self.recenter(),
            Action::SetRule(rule) => self.simulation.set_rule(rule),
            Action::LoadPattern(pattern) => self.load_seed(pattern.to_grid(0, 0)),
            Action::LoadText(content) => {
                if let Err(e) = self.load_pattern_text(&content) {
                    log::warn!("{}", e);
                }
            }
            Action::LoadFile(path) => {
                if let Err(e) = self.load_pattern_file(&path) {
                    log::warn!("{:#}", e);
                }
            }
        }
        self.sync(now);
    }

    /// Replaces the seed with parsed Life 1.05 content and adopts its rule.
    /// On failure nothing changes except `last_error`.
    pub fn load_pattern_text(&mut self, content: &str) -> Result<()> {
        match lif::parse(content) {
            Ok(pattern) => {
                self.simulation.set_rule(pattern.rule);
                self.load_seed(pattern.cells);
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn load_pattern_file(&mut self, path: &Path) -> anyhow::Result<()> {
        log::info!("Loading pattern file {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pattern file {}", path.display()));
        let content = match content {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("{:#}", e));
                return Err(e);
            }
        };
        self.load_pattern_text(&content)
            .with_context(|| format!("failed to load pattern file {}", path.display()))
    }

    /// Starts a new history from `seed` with the current rule.
    pub fn load_seed(&mut self, seed: Grid) {
        self.simulation.initialize(seed);
        self.last_error = None;
        self.recenter();
    }

    pub fn recenter(&mut self) {
        self.view.fit_to_content(self.simulation.grid(), self.viewport[0], self.viewport[1]);
    }

    /// The window changed size. Only the viewport changes, never the simulation.
    pub fn resize(&mut self, viewport: [f32; 2]) {
        self.viewport = viewport;
    }

    /// Advances playback if a tick is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.simulation.step();
        self.sync(now);
        true
    }

    /// Delivers pending model changes to the simulation and timer, then
    /// publishes the simulation's state back into the model.
    pub fn sync(&mut self, now: Instant) {
        for change in self.running_changes.try_iter() {
            log::debug!("Running {} -> {} ({:?})", change.old, change.new, change.origin);
            if change.new {
                self.timer.start(now);
            } else {
                self.timer.stop();
            }
        }

        for change in self.interval_changes.try_iter() {
            self.timer.set_interval(Duration::from_millis(change.new), now);
            log::debug!("Playback interval is now {:?}", self.timer.interval());
        }

        for change in self.generation_changes.try_iter() {
            if change.origin == Origin::Simulation {
                continue;
            }
            let target = i64::try_from(change.new).unwrap_or(i64::MAX);
            if let Err(e) = self.simulation.set_generation(target) {
                log::warn!("{}", e);
            }
        }

        for event in self.simulation_events.try_iter() {
            self.model.generation.set(event.generation, Origin::Simulation);
            self.model.processed_generations.set(event.processed, Origin::Simulation);
            self.population = event.population;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rules::{Pattern, Rule};

    pub(crate) fn test_app() -> App {
        let seed = lif::parse(lif::DEFAULT_PATTERN).unwrap();
        App::new(seed, &Config::default(), [800.0, 600.0], Instant::now())
    }

    #[test]
    fn starts_at_generation_zero_with_model_in_sync() {
        let app = test_app();
        assert_eq!(*app.model.generation.get(), 0);
        assert_eq!(*app.model.processed_generations.get(), 0);
        assert_eq!(app.population, 11);
        assert!(!app.timer.is_running());
    }

    #[test]
    fn step_forward_updates_model() {
        let mut app = test_app();
        let now = Instant::now();
        app.apply(Action::StepForward, now);
        app.apply(Action::StepForward, now);
        assert_eq!(*app.model.generation.get(), 2);
        assert_eq!(*app.model.processed_generations.get(), 2);
    }

    #[test]
    fn generation_edits_drive_the_simulation() {
        let mut app = test_app();
        let now = Instant::now();
        app.apply(Action::SetGeneration(12), now);
        assert_eq!(app.simulation.current_generation(), 12);
        assert_eq!(*app.model.processed_generations.get(), 12);

        app.apply(Action::StepBack, now);
        assert_eq!(app.simulation.current_generation(), 11);

        app.apply(Action::Restart, now);
        assert_eq!(app.simulation.current_generation(), 0);
        assert_eq!(*app.model.generation.get(), 0);
        assert_eq!(app.simulation.processed_generations(), 12);
    }

    #[test]
    fn step_back_at_generation_zero_does_nothing() {
        let mut app = test_app();
        app.apply(Action::StepBack, Instant::now());
        assert_eq!(app.simulation.current_generation(), 0);
    }

    #[test]
    fn simulation_echo_does_not_loop_back() {
        let mut app = test_app();
        let now = Instant::now();
        app.apply(Action::SetGeneration(5), now);
        app.apply(Action::SetGeneration(2), now);
        // Drains the Origin::Simulation echoes; nothing may move the simulation.
        app.sync(now);
        app.sync(now);
        assert_eq!(app.simulation.current_generation(), 2);
        assert_eq!(*app.model.generation.get(), 2);
    }

    #[test]
    fn playback_steps_on_timer_ticks() {
        let mut app = test_app();
        let start = Instant::now();
        app.apply(Action::SetInterval(50), start);
        app.apply(Action::Play, start);
        assert!(app.timer.is_running());

        assert!(!app.tick(start + Duration::from_millis(10)));
        assert!(app.tick(start + Duration::from_millis(50)));
        assert!(app.tick(start + Duration::from_millis(100)));
        assert_eq!(*app.model.generation.get(), 2);

        app.apply(Action::Pause, start + Duration::from_millis(120));
        assert!(!app.tick(start + Duration::from_millis(1_000)));
        assert_eq!(app.simulation.current_generation(), 2);
    }

    #[test]
    fn configured_playback_starts_running() {
        let config = Config {
            timer: TimerConfig { interval: Duration::from_millis(20), running: true },
            ..Config::default()
        };
        let start = Instant::now();
        let mut app = App::new(lif::parse(lif::DEFAULT_PATTERN).unwrap(), &config, [800.0, 600.0], start);
        assert!(*app.model.running.get());
        assert!(app.tick(start + Duration::from_millis(20)));
    }

    #[test]
    fn loading_text_replaces_history_and_rule() {
        let mut app = test_app();
        let now = Instant::now();
        app.apply(Action::SetGeneration(8), now);

        app.apply(Action::LoadText("#Life 1.05\n#R 23/36\n#P 0 0\n***".into()), now);
        assert_eq!(app.simulation.rule(), Rule::high_life());
        assert_eq!(*app.model.generation.get(), 0);
        assert_eq!(*app.model.processed_generations.get(), 0);
        assert_eq!(app.population, 3);
        assert!(app.last_error.is_none());
    }

    #[test]
    fn failed_load_leaves_simulation_untouched() {
        let mut app = test_app();
        let now = Instant::now();
        app.apply(Action::SetGeneration(3), now);
        let grid = app.simulation.grid().clone();

        assert!(app.load_pattern_text("#Life 1.0\n#P 0 0\n*").is_err());
        app.apply(Action::LoadText("#Life 1.05\n#P 0 0\n*x".into()), now);

        assert_eq!(app.simulation.current_generation(), 3);
        assert_eq!(app.simulation.processed_generations(), 3);
        assert_eq!(app.simulation.grid(), &grid);
        assert_eq!(app.simulation.rule(), Rule::conway());
        assert!(app.last_error.as_deref().unwrap().contains("illegal character"));
    }

    #[test]
    fn seed_at_the_integer_limit_is_rejected_without_panicking() {
        let mut app = test_app();
        let grid = app.simulation.grid().clone();

        app.apply(Action::LoadText("#Life 1.05\n#P 9223372036854775807 0\n**".into()), Instant::now());

        assert_eq!(app.simulation.grid(), &grid);
        assert!(app.last_error.as_deref().unwrap().contains("outside the supported plane"));
        app.apply(Action::StepForward, Instant::now());
        assert_eq!(app.simulation.current_generation(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let mut app = test_app();
        let result = app.load_pattern_file(Path::new("/definitely/not/here.lif"));
        assert!(result.is_err());
        assert!(app.last_error.is_some());
        assert_eq!(app.population, 11);
    }

    #[test]
    fn pattern_seed_keeps_rule() {
        let mut app = test_app();
        let now = Instant::now();
        app.apply(Action::SetRule(Rule::high_life()), now);
        app.apply(Action::LoadPattern(Pattern::Glider), now);
        assert_eq!(app.simulation.rule(), Rule::high_life());
        assert_eq!(app.population, 5);
    }

    #[test]
    fn resize_changes_only_the_viewport() {
        let mut app = test_app();
        let view = app.view;
        let grid = app.simulation.grid().clone();
        app.resize([1200.0, 900.0]);
        assert_eq!(app.view, view);
        assert_eq!(app.simulation.grid(), &grid);
        assert_eq!(app.viewport, [1200.0, 900.0]);
    }

    #[test]
    fn zoom_buttons_zoom_around_viewport_centre() {
        let mut app = test_app();
        let centre = app.view.to_grid(400.0, 300.0);
        let scale = app.view.scale;
        app.apply(Action::ZoomIn, Instant::now());
        assert!(app.view.scale > scale);
        let after = app.view.to_grid(400.0, 300.0);
        assert!((after[0] - centre[0]).abs() < 1e-3 && (after[1] - centre[1]).abs() < 1e-3);
    }
}
