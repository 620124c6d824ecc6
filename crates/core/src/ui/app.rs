//! Main analyzer window.
//!
//! Owns the [`AnalysisSession`], runs each submission on a background thread,
//! and applies the single outcome that thread sends back.

use super::results;
use super::state::AnalysisEvent;
use crate::clipboard::{ClipboardSink, CopyFeedback, SystemClipboard};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::gemini::GeminiClient;
use crate::metadata::{ContentNiche, VideoMetadata};
use crate::session::{AnalysisSession, AnalysisState, Submission, run_analysis};
use crate::view::ResultView;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

const ACCENT_RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
const MUTED: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);

/// The analyzer window.
pub struct ViralTubeApp {
    config: Config,
    session: AnalysisSession,
    rx: Receiver<AnalysisEvent>,
    tx: Sender<AnalysisEvent>,

    // Results panel
    view: Option<ResultView>,
    feedback: CopyFeedback,
    clipboard: Option<Box<dyn ClipboardSink>>,

    // Attachment picker
    attachment_input: String,
    attachment_warning: Option<String>,
}

impl ViralTubeApp {
    pub fn new(config: Config) -> Self {
        let (tx, rx) = channel();

        let clipboard = match SystemClipboard::new() {
            Ok(c) => Some(Box::new(c) as Box<dyn ClipboardSink>),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable, copy buttons disabled");
                None
            }
        };

        Self {
            config,
            session: AnalysisSession::new(),
            rx,
            tx,
            view: None,
            feedback: CopyFeedback::default(),
            clipboard,
            attachment_input: String::new(),
            attachment_warning: None,
        }
    }

    /// Validates the form and, if it passes, starts the request in the background.
    fn submit(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.session.submit() else {
            return;
        };

        self.view = None;
        self.feedback.clear();

        let tx = self.tx.clone();
        let config = self.config.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let ticket = submission.ticket;
            let outcome = analyze_blocking(&config, submission);
            let _ = tx.send(AnalysisEvent { ticket, outcome });
            ctx.request_repaint();
        });
    }

    /// Applies finished submissions to the session.
    fn process_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            if !self.session.complete(event.ticket, event.outcome) {
                continue;
            }
            self.view = self.session.state().result().map(ResultView::from_metadata);
        }
    }

    fn select_attachment(&mut self, path: PathBuf) {
        self.attachment_input = path.display().to_string();
        self.attachment_warning = if self.session.select_attachment(path) {
            None
        } else {
            Some("This file is not an image or video; it will be sent anyway.".to_string())
        };
    }

    fn render_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("▶").color(ACCENT_RED).size(22.0));
                ui.label(egui::RichText::new("ViralTube").strong().size(20.0));
                ui.label(
                    egui::RichText::new("Android")
                        .strong()
                        .size(20.0)
                        .color(egui::Color32::from_rgb(34, 197, 94)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.config.model_name).small().color(MUTED));
                });
            });
            ui.add_space(6.0);
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let analyzing = self.session.state().is_analyzing();

        ui.label(egui::RichText::new("VIDEO CONCEPT OR SCRIPT").small().strong().color(MUTED));
        ui.add(
            egui::TextEdit::multiline(&mut self.session.prompt)
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text(
                    "e.g., A review of the new Samsung Galaxy S25 Ultra focusing on battery life and gaming performance.",
                ),
        );
        ui.add_space(10.0);

        ui.label(egui::RichText::new("CONTENT NICHE").small().strong().color(MUTED));
        egui::ComboBox::from_id_salt("content_niche")
            .selected_text(self.session.niche.label())
            .width(280.0)
            .show_ui(ui, |ui| {
                for niche in ContentNiche::ALL {
                    ui.selectable_value(&mut self.session.niche, niche, niche.label());
                }
            });
        ui.add_space(10.0);

        ui.label(egui::RichText::new("ANALYSIS REF (OPTIONAL)").small().strong().color(MUTED));
        let mut picked = None;
        let mut cleared = false;
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.attachment_input)
                    .desired_width(360.0)
                    .hint_text("Path to a screenshot or clip, or drop a file here"),
            );
            let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Attach").clicked() || enter) && !self.attachment_input.trim().is_empty() {
                picked = Some(PathBuf::from(self.attachment_input.trim()));
            }
            if self.session.attachment_path().is_some() && ui.button("Clear").clicked() {
                cleared = true;
            }
        });
        if let Some(path) = picked {
            self.select_attachment(path);
        }
        if cleared {
            self.session.clear_attachment();
            self.attachment_input.clear();
            self.attachment_warning = None;
        }

        match self.session.attachment_path() {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(egui::RichText::new(format!("✔ {}", name)).color(egui::Color32::from_rgb(34, 197, 94)));
            }
            None => {
                ui.label(egui::RichText::new("Upload screenshot or clip").small().color(MUTED));
            }
        }
        if let Some(warning) = &self.attachment_warning {
            ui.label(egui::RichText::new(warning).small().color(egui::Color32::YELLOW));
        }
        ui.add_space(14.0);

        let label = if analyzing {
            "Analyzing Insights..."
        } else {
            "⚡ Generate Viral Metadata"
        };
        let button = egui::Button::new(egui::RichText::new(label).strong().size(17.0))
            .fill(ACCENT_RED)
            .min_size(egui::vec2((ui.available_width() - 32.0).max(160.0), 44.0));

        ui.horizontal(|ui| {
            if ui.add_enabled(!analyzing, button).clicked() {
                self.submit(ui.ctx());
            }
            if analyzing {
                ui.spinner();
            }
        });

        if let Some(error) = self.session.state().error() {
            ui.add_space(8.0);
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(239, 68, 68, 26))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(239, 68, 68, 51)))
                .corner_radius(8.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(format!("✖ {}", error)).color(ERROR_RED));
                });
        }
    }
}

impl eframe::App for ViralTubeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Enforce dark mode
        ctx.set_visuals(egui::Visuals::dark());

        self.process_events();

        // Accept one dropped file as the attachment
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.select_attachment(path);
        }

        let now = Instant::now();
        self.feedback.prune(now);

        self.render_header(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new("Go Viral on Android Tech").size(30.0).strong());
                    ui.label(
                        egui::RichText::new(
                            "Analyze a video frame or concept to generate high-converting titles, tags, and SEO metadata for the tech audience.",
                        )
                        .color(MUTED),
                    );
                });
                ui.add_space(16.0);

                egui::Frame::group(ui.style())
                    .corner_radius(16.0)
                    .inner_margin(16.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        self.render_form(ui);
                    });
                ui.add_space(16.0);

                if let (AnalysisState::Success(_), Some(view)) = (self.session.state(), &self.view) {
                    results::show(ui, view, &mut self.feedback, &mut self.clipboard);
                }
            });
        });

        // Wake up exactly when the next "Copied!" mark should disappear
        if let Some(remaining) = self.feedback.next_expiry(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

/// Runs one submission to completion on a private current-thread runtime.
fn analyze_blocking(config: &Config, submission: Submission) -> Result<VideoMetadata> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::ui(format!("Failed to create async runtime: {}", e)))?;

    runtime.block_on(async {
        let client = GeminiClient::new(config)?;
        run_analysis(
            &client,
            submission.prompt,
            submission.niche,
            submission.attachment_path.as_deref(),
        )
        .await
    })
}

/// Opens the analyzer window and blocks until it is closed.
pub fn run(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ViralTube Android")
            .with_inner_size([980.0, 860.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    info!(model = %config.model_name, "opening analyzer window");

    eframe::run_native(
        "ViralTube Android",
        options,
        Box::new(move |_cc| Ok(Box::new(ViralTubeApp::new(config)) as Box<dyn eframe::App>)),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))
}
