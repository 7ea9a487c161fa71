//! Control panel drawn with egui. The panel never touches the simulation
//! directly: it returns [`Action`]s that the application applies afterwards.

use crate::app::App;
use crate::lif;
use crate::rules::{Pattern, Rule};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StepForward,
    StepBack,
    Play,
    Pause,
    Restart,
    SetGeneration(u64),
    SetInterval(u64),
    ZoomIn,
    ZoomOut,
    Recenter,
    SetRule(Rule),
    LoadPattern(Pattern),
    LoadText(String),
    LoadFile(PathBuf),
}

/// Text field holding a number that is only applied once it parses and is
/// not below `min`. Anything else is dropped and the old value kept.
#[derive(Debug, Clone)]
pub struct NumberInput {
    pub text: String,
    min: u64,
}

impl NumberInput {
    pub fn new(value: u64, min: u64) -> Self {
        Self { text: value.to_string(), min }
    }

    pub fn value(&self) -> Option<u64> {
        let value: f64 = self.text.trim().parse().ok()?;
        (value.is_finite() && value >= self.min as f64).then(|| value.round() as u64)
    }
}

/// Widget state that lives across frames.
pub struct Panel {
    pub open: bool,
    pub lif_text: String,
    pub file_path: String,
    pub interval: NumberInput,
}

impl Panel {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            open: true,
            lif_text: lif::DEFAULT_PATTERN.to_string(),
            file_path: String::new(),
            interval: NumberInput::new(interval_ms, 0),
        }
    }
}

pub fn show(ctx: &egui::Context, app: &App, panel: &mut Panel) -> Vec<Action> {
    let mut actions = Vec::new();

    egui::Area::new(egui::Id::new("menu_button_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .show(ctx, |ui| {
            if ui.button("☰").clicked() {
                panel.open = !panel.open;
            }
        });

    if !panel.open {
        return actions;
    }

    let panel_frame = egui::Frame {
        fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 200),
        ..egui::Frame::side_top_panel(&ctx.style())
    };

    egui::SidePanel::left("side_panel")
        .frame(panel_frame)
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(24.0);
            playback_controls(ui, app, panel, &mut actions);
            ui.separator();
            view_controls(ui, app, &mut actions);
            ui.separator();
            rule_controls(ui, app, &mut actions);
            ui.separator();
            seed_controls(ui, app, panel, &mut actions);
        });

    actions
}

fn playback_controls(ui: &mut egui::Ui, app: &App, panel: &mut Panel, actions: &mut Vec<Action>) {
    let running = *app.model.running.get();
    let generation = *app.model.generation.get();

    ui.heading("Playback");
    ui.horizontal(|ui| {
        if ui.add_enabled(!running && generation > 0, egui::Button::new("< Step")).clicked() {
            actions.push(Action::StepBack);
        }
        if ui.add_enabled(!running, egui::Button::new("Step >")).clicked() {
            actions.push(Action::StepForward);
        }
        if ui.add_enabled(!running, egui::Button::new("Play")).clicked() {
            actions.push(Action::Play);
        }
        if ui.add_enabled(running, egui::Button::new("Pause")).clicked() {
            actions.push(Action::Pause);
        }
        if ui.button("Restart").clicked() {
            actions.push(Action::Restart);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Generation:");
        let mut value = generation;
        let response = ui.add_enabled(
            !running,
            egui::DragValue::new(&mut value).clamp_range(0..=u64::MAX).speed(0.25),
        );
        if response.changed() && value != generation {
            actions.push(Action::SetGeneration(value));
        }
    });
    ui.label(format!("Processed: {}", app.model.processed_generations.get()));

    ui.horizontal(|ui| {
        ui.label("Interval (ms):");
        let response = ui.add(egui::TextEdit::singleline(&mut panel.interval.text).desired_width(60.0));
        if response.lost_focus() {
            if let Some(ms) = panel.interval.value() {
                actions.push(Action::SetInterval(ms));
            }
        } else if !response.has_focus() {
            panel.interval.text = app.model.interval_ms.get().to_string();
        }
    });
}

fn view_controls(ui: &mut egui::Ui, app: &App, actions: &mut Vec<Action>) {
    ui.heading("View");
    ui.horizontal(|ui| {
        // Held buttons keep zooming every frame.
        if ui.button("Zoom +").is_pointer_button_down_on() {
            actions.push(Action::ZoomIn);
        }
        if ui.button("Zoom -").is_pointer_button_down_on() {
            actions.push(Action::ZoomOut);
        }
        if ui.button("Recenter").clicked() {
            actions.push(Action::Recenter);
        }
    });
    ui.label(format!("Zoom: {:.2}", app.view.scale));
    if let Some(position) = app.pointer.position {
        let (x, y) = app.view.cell_at(position.x, position.y);
        ui.label(format!("Cursor: ({}, {})", x, y));
    }
    ui.label(format!("Live cells: {}", app.population));
}

fn rule_controls(ui: &mut egui::Ui, app: &App, actions: &mut Vec<Action>) {
    ui.heading("Rule");
    ui.label(format!("Current: {}", app.simulation.rule()));
    for (name, rule) in Rule::presets() {
        if ui.selectable_label(app.simulation.rule() == rule, format!("{} ({})", name, rule)).clicked() {
            actions.push(Action::SetRule(rule));
        }
    }
}

fn seed_controls(ui: &mut egui::Ui, app: &App, panel: &mut Panel, actions: &mut Vec<Action>) {
    ui.heading("Seed");
    ui.horizontal_wrapped(|ui| {
        for pattern in Pattern::ALL {
            if ui.small_button(pattern.name()).clicked() {
                actions.push(Action::LoadPattern(pattern));
            }
        }
    });

    ui.label("Life 1.05 content:");
    egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
        ui.add(egui::TextEdit::multiline(&mut panel.lif_text).code_editor().desired_rows(6));
    });
    if ui.button("Load").clicked() {
        actions.push(Action::LoadText(panel.lif_text.clone()));
    }

    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut panel.file_path).hint_text("path/to/pattern.lif"));
        if ui.button("Open").clicked() && !panel.file_path.trim().is_empty() {
            actions.push(Action::LoadFile(PathBuf::from(panel.file_path.trim())));
        }
    });
    ui.label("Files dropped on the window are loaded too.");

    if let Some(error) = &app.last_error {
        ui.colored_label(egui::Color32::from_rgb(255, 110, 110), error.as_str());
    }
}
