//! Carousel controls drawn with egui on top of the viewport.
//!
//! The UI never mutates the controller; it reads a [`CarouselView`] snapshot
//! and returns the actions the user triggered this frame.

use crate::session::ViewerAction;

const THUMBNAIL_SIZE: egui::Vec2 = egui::vec2(104.0, 56.0);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(74, 158, 255);
const ERROR: egui::Color32 = egui::Color32::from_rgb(235, 87, 87);

/// Per-frame snapshot of the controller for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub names: Vec<String>,
    pub active_index: usize,
    pub loading: bool,
    pub failure: Option<String>,
    pub fps: Option<f32>,
}

impl CarouselView {
    pub fn active_name(&self) -> &str {
        self.names
            .get(self.active_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Controls are disabled while a load is in flight
    pub fn can_navigate(&self) -> bool {
        !self.loading
    }

    /// "2 / 5"
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.active_index + 1, self.names.len())
    }
}

/// Draw the overlay; `show_controls` hides the navigation panel but keeps
/// the loading and failure indicators.
pub fn show(ctx: &egui::Context, view: &CarouselView, show_controls: bool) -> Vec<ViewerAction> {
    let mut actions = Vec::new();

    if show_controls {
        carousel_panel(ctx, view, &mut actions);
    }
    if view.loading {
        loading_indicator(ctx, view);
    }
    if let Some(reason) = &view.failure {
        failure_banner(ctx, view, reason, &mut actions);
    }
    if let Some(fps) = view.fps {
        fps_overlay(ctx, fps);
    }

    actions
}

fn carousel_panel(ctx: &egui::Context, view: &CarouselView, actions: &mut Vec<ViewerAction>) {
    let enabled = view.can_navigate();

    egui::TopBottomPanel::bottom("carousel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(enabled, egui::Button::new("◀"))
                    .on_hover_text("Previous model")
                    .clicked()
                {
                    actions.push(ViewerAction::Previous);
                }
                ui.label(egui::RichText::new(view.active_name()).size(20.0).strong());
                ui.label(egui::RichText::new(view.position_label()).color(egui::Color32::GRAY));
                if ui
                    .add_enabled(enabled, egui::Button::new("▶"))
                    .on_hover_text("Next model")
                    .clicked()
                {
                    actions.push(ViewerAction::Next);
                }
            });

            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for (index, name) in view.names.iter().enumerate() {
                    let selected = index == view.active_index;
                    let tile = egui::Button::new(format!("{}\n{}", index + 1, name))
                        .selected(selected)
                        .min_size(THUMBNAIL_SIZE);
                    if ui.add_enabled(enabled, tile).clicked() && !selected {
                        actions.push(ViewerAction::Select(index));
                    }
                }
            });
            ui.add_space(6.0);
        });
}

fn loading_indicator(ctx: &egui::Context, view: &CarouselView) {
    egui::Area::new(egui::Id::new("loading"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(40.0).color(ACCENT));
                ui.label(format!("Loading {}…", view.active_name()));
            });
        });
}

fn failure_banner(
    ctx: &egui::Context,
    view: &CarouselView,
    reason: &str,
    actions: &mut Vec<ViewerAction>,
) {
    egui::Area::new(egui::Id::new("failure"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(420.0);
                ui.label(
                    egui::RichText::new(format!("Could not load {}", view.active_name()))
                        .size(16.0)
                        .color(ERROR),
                );
                ui.label(egui::RichText::new(reason).small());
                if ui.button("Retry").clicked() {
                    actions.push(ViewerAction::Retry);
                }
            });
        });
}

fn fps_overlay(ctx: &egui::Context, fps: f32) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", fps))
                    .size(32.0)
                    .color(ACCENT),
            );
            ui.label(
                egui::RichText::new("FPS")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });
}
