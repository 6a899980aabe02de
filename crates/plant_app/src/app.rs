use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use plant_core::{CareGuide, ExportError, Field, Schedule};
use tracing::{debug, info, warn};

use crate::carousel::{Carousel, Direction, CARD_GAP, CARD_HEIGHT, CARD_WIDTH};
use crate::notice::{ClipboardSink, Notice, SystemClipboard};

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub(crate) catalog_path: Option<PathBuf>,
    pub(crate) export_dir: Option<PathBuf>,
    pub(crate) only_non_toxic: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("PLANT_CATALOG") {
            if !path.trim().is_empty() {
                info!(path = %path, "using catalog override");
                config.catalog_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(dir) = std::env::var("PLANT_EXPORT_DIR") {
            let dir = PathBuf::from(dir);
            if dir.is_dir() {
                config.export_dir = Some(dir);
            } else {
                warn!(path = %dir.display(), "export directory does not exist, using current directory");
            }
        }
        if let Ok(flag) = std::env::var("PLANT_ONLY_NON_TOXIC") {
            match parse_flag(&flag) {
                Some(value) => config.only_non_toxic = value,
                None => warn!(value = %flag, "ignoring unrecognised PLANT_ONLY_NON_TOXIC"),
            }
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Holds interaction state and turns user events into core calls. Knows nothing about widgets.
pub struct PlantCareController {
    guide: CareGuide,
    clipboard: Box<dyn ClipboardSink>,
    input: String,
    only_non_toxic: bool,
    names: Vec<String>,
    selection: Option<Schedule>,
    notice: Option<Notice>,
}

impl PlantCareController {
    pub fn new(config: &AppConfig, clipboard: Box<dyn ClipboardSink>) -> Result<Self> {
        let mut builder = CareGuide::builder();
        if let Some(path) = &config.catalog_path {
            builder = builder.catalog_path(path);
        }
        if let Some(dir) = &config.export_dir {
            builder = builder.export_dir(dir);
        }
        let guide = builder.build().context("failed to initialize care guide")?;
        Ok(Self::from_guide(guide, config.only_non_toxic, clipboard))
    }

    pub fn from_guide(guide: CareGuide, only_non_toxic: bool, clipboard: Box<dyn ClipboardSink>) -> Self {
        let mut controller = Self {
            guide,
            clipboard,
            input: String::new(),
            only_non_toxic,
            names: Vec::new(),
            selection: None,
            notice: None,
        };
        controller.refresh_names();
        controller
    }

    pub fn guide(&self) -> &CareGuide {
        &self.guide
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn only_non_toxic(&self) -> bool {
        self.only_non_toxic
    }

    pub fn selection(&self) -> Option<&Schedule> {
        self.selection.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_only_non_toxic(&mut self, only_non_toxic: bool) {
        self.only_non_toxic = only_non_toxic;
        self.refresh_names();
    }

    fn refresh_names(&mut self) {
        self.names = self.guide.list_names(self.only_non_toxic);
        debug!(
            only_non_toxic = self.only_non_toxic,
            count = self.names.len(),
            "name list refreshed"
        );
    }

    /// Names from the current list containing the typed text, ignoring case.
    pub fn suggestions(&self) -> Vec<String> {
        let query = self.input.to_lowercase();
        self.names
            .iter()
            .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Runs the lookup for whatever is in the input. A miss hides the schedule.
    pub fn commit_input(&mut self) {
        self.selection = self.guide.schedule(&self.input);
        match &self.selection {
            Some(schedule) => info!(plant = %schedule.plant, "schedule shown"),
            None => debug!(input = %self.input, "no schedule for input"),
        }
    }

    /// Same as typing `name` and committing it.
    pub fn select(&mut self, name: &str) {
        self.input = name.to_string();
        self.commit_input();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.selection = None;
    }

    pub fn copy_selection(&mut self) {
        let Some(schedule) = &self.selection else {
            self.notice = Some(Notice::info("Select a plant first."));
            return;
        };
        let text = schedule.clipboard_text();
        self.notice = Some(match self.clipboard.set_text(text) {
            Ok(()) => Notice::info("Plant care info copied!"),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "clipboard write failed");
                Notice::error(format!("Failed to copy: {err:#}"))
            }
        });
    }

    pub fn export_selection(&mut self) -> Option<PathBuf> {
        match self.guide.export_pdf(&self.input) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!("Saved {}", path.display())));
                Some(path)
            }
            Err(ExportError::NoValidSelection) => {
                self.notice = Some(Notice::error(ExportError::NoValidSelection.to_string()));
                None
            }
            Err(err) => {
                warn!(%err, "export failed");
                self.notice = Some(Notice::error(format!("Export failed: {err}")));
                None
            }
        }
    }

    pub fn export_dir(&self) -> &Path {
        self.guide.export_dir()
    }

    pub fn set_export_dir(&mut self, dir: PathBuf) {
        self.guide.set_export_dir(dir);
    }
}

struct Card {
    name: String,
    summary: String,
}

struct PlantCareApp {
    controller: PlantCareController,
    carousel: Carousel,
    cards: Vec<Card>,
}

impl PlantCareApp {
    fn new(controller: PlantCareController) -> Self {
        let cards = controller
            .guide()
            .list_names(false)
            .into_iter()
            .map(|name| {
                let summary = controller
                    .guide()
                    .schedule(&name)
                    .and_then(|schedule| schedule.line(Field::Water).map(str::to_string))
                    .unwrap_or_default();
                Card { name, summary }
            })
            .collect();
        Self {
            controller,
            carousel: Carousel::default(),
            cards,
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(self.controller.input_mut())
                    .hint_text("Type a plant name…")
                    .desired_width(260.0),
            );
            if response.lost_focus() {
                self.controller.commit_input();
            }
            if ui.button("Clear").clicked() {
                self.controller.clear();
            }
            let mut only_non_toxic = self.controller.only_non_toxic();
            if ui
                .checkbox(&mut only_non_toxic, "Non-toxic only")
                .changed()
            {
                self.controller.set_only_non_toxic(only_non_toxic);
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Copy").clicked() {
                self.controller.copy_selection();
            }
            if ui.button("Download PDF").clicked() {
                self.controller.export_selection();
            }
            if ui.button("Export folder…").clicked() {
                let current = self.controller.export_dir().to_path_buf();
                if let Some(dir) = rfd::FileDialog::new()
                    .set_directory(current)
                    .pick_folder()
                {
                    self.controller.set_export_dir(dir);
                }
            }
            ui.weak(self.controller.export_dir().display().to_string());
        });

        let suggestions = self.controller.suggestions();
        egui::ScrollArea::vertical()
            .id_salt("plant_suggestions")
            .max_height(140.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if suggestions.is_empty() {
                    ui.weak("No matching plants");
                }
                for name in &suggestions {
                    let selected = self
                        .controller
                        .selection()
                        .is_some_and(|schedule| &schedule.plant == name);
                    if ui.selectable_label(selected, name.as_str()).clicked() {
                        self.controller.select(name);
                    }
                }
            });
        ui.add_space(6.0);
    }

    fn schedule_ui(&mut self, ui: &mut egui::Ui) {
        let Some(schedule) = self.controller.selection().cloned() else {
            ui.weak("Pick a plant to see its care schedule.");
            return;
        };

        ui.heading(schedule.plant.as_str());
        ui.add_space(8.0);
        for field in Field::ALL {
            if let Some(text) = schedule.line(field).filter(|text| !text.is_empty()) {
                ui.label(text);
            }
        }
    }

    fn carousel_ui(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        let mut clicked: Option<String> = None;
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.carousel.scroll(Direction::Previous);
                ui.ctx().request_repaint();
            }

            let mut area = egui::ScrollArea::horizontal()
                .id_salt("plant_carousel")
                .max_width((ui.available_width() - 32.0).max(CARD_WIDTH))
                .auto_shrink([false, true]);
            if let Some(offset) = self.carousel.take_pending() {
                area = area.horizontal_scroll_offset(offset);
            }

            let mut card_width = None;
            let output = area.show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = CARD_GAP;
                    for card in &self.cards {
                        let response = egui::Frame::group(ui.style())
                            .show(ui, |ui| {
                                ui.set_min_size(egui::vec2(CARD_WIDTH, CARD_HEIGHT));
                                ui.set_max_width(CARD_WIDTH);
                                ui.strong(card.name.as_str());
                                ui.small(card.summary.as_str());
                            })
                            .response
                            .interact(egui::Sense::click());
                        card_width.get_or_insert(response.rect.width());
                        if response.clicked() {
                            clicked = Some(card.name.clone());
                        }
                    }
                });
            });
            self.carousel.observe(
                output.state.offset.x,
                output.content_size.x,
                output.inner_rect.width(),
                card_width,
            );

            if ui.button("▶").clicked() {
                self.carousel.scroll(Direction::Next);
                ui.ctx().request_repaint();
            }
        });
        ui.add_space(6.0);

        if let Some(name) = clicked {
            self.controller.select(&name);
        }
    }

    fn notice_ui(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.notice().cloned() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.controller.dismiss_notice();
        }
    }
}

impl eframe::App for PlantCareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("plant_controls").show(ctx, |ui| self.controls_ui(ui));
        egui::TopBottomPanel::bottom("plant_cards").show(ctx, |ui| self.carousel_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.schedule_ui(ui));
        self.notice_ui(ctx);
    }
}

pub fn run(config: AppConfig) -> Result<()> {
    info!("starting eframe runtime");
    let controller = PlantCareController::new(&config, Box::new(SystemClipboard))?;
    let app = PlantCareApp::new(controller);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Plant Care Schedule")
            .with_inner_size([760.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Plant Care Schedule",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow!("UI runtime terminated: {err}"))
}
