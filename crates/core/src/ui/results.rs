//! Paints a [`ResultView`] with copy buttons.

use crate::clipboard::{ClipboardSink, CopyFeedback, CopyTarget};
use crate::view::{Item, ResultView, SectionBody, SectionKind};
use eframe::egui;
use std::time::Instant;
use tracing::warn;

const SUCCESS_GREEN: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(15, 23, 42);
const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);

/// Accent colour of each section's heading.
fn accent(kind: SectionKind) -> egui::Color32 {
    match kind {
        SectionKind::Titles => egui::Color32::from_rgb(96, 165, 250),
        SectionKind::BestTime => SUCCESS_GREEN,
        SectionKind::TargetAudience => egui::Color32::from_rgb(192, 132, 252),
        SectionKind::EngagementTips => egui::Color32::GRAY,
        SectionKind::Description => egui::Color32::from_rgb(250, 204, 21),
        SectionKind::Hashtags => egui::Color32::from_rgb(244, 114, 182),
        SectionKind::Keywords => egui::Color32::from_rgb(45, 212, 191),
    }
}

/// Draws every section. A click on a copyable field goes through `feedback`.
pub(crate) fn show(
    ui: &mut egui::Ui,
    view: &ResultView,
    feedback: &mut CopyFeedback,
    clipboard: &mut Option<Box<dyn ClipboardSink>>,
) {
    let now = Instant::now();
    let mut clicked: Option<(CopyTarget, String)> = None;

    for section in &view.sections {
        egui::Frame::group(ui.style())
            .fill(CARD_FILL)
            .stroke(egui::Stroke::new(1.0, CARD_STROKE))
            .corner_radius(12.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(section.heading())
                            .strong()
                            .size(17.0)
                            .color(accent(section.kind)),
                    );

                    // The description gets a single "Copy All" button in its header
                    if let SectionBody::Paragraph(Item { text, copy: Some(target) }) = &section.body {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if copy_button(ui, feedback.is_copied(*target, now), "Copy All") {
                                clicked = Some((*target, text.clone()));
                            }
                        });
                    }
                });
                ui.add_space(6.0);

                match &section.body {
                    SectionBody::CopyableList(items) => {
                        for item in items {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(egui::RichText::new(item.text.as_str()).size(15.0));
                                if let Some(target) = item.copy {
                                    if copy_button(ui, feedback.is_copied(target, now), "Copy") {
                                        clicked = Some((target, item.text.clone()));
                                    }
                                }
                            });
                            ui.add_space(2.0);
                        }
                    }
                    SectionBody::Highlight { value, caption } => {
                        ui.vertical_centered(|ui| {
                            ui.label(egui::RichText::new(value).size(22.0).strong().color(SUCCESS_GREEN));
                            ui.label(egui::RichText::new(*caption).small().color(SUCCESS_GREEN));
                        });
                    }
                    SectionBody::Paragraph(item) => {
                        egui::ScrollArea::vertical()
                            .id_salt(section.heading())
                            .max_height(240.0)
                            .show(ui, |ui| {
                                ui.label(item.text.as_str());
                            });
                    }
                    SectionBody::Bullets(entries) => {
                        for entry in entries {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(egui::RichText::new("•").color(SUCCESS_GREEN));
                                ui.label(entry.as_str());
                            });
                        }
                    }
                    SectionBody::Chips(items) => {
                        ui.horizontal_wrapped(|ui| {
                            for item in items {
                                let copied = item.copy.is_some_and(|t| feedback.is_copied(t, now));
                                let text = if copied {
                                    egui::RichText::new(item.text.as_str()).color(SUCCESS_GREEN)
                                } else {
                                    egui::RichText::new(item.text.as_str())
                                };
                                let button = egui::Button::new(text).corner_radius(12.0).selected(copied);
                                if ui.add(button).clicked() {
                                    if let Some(target) = item.copy {
                                        clicked = Some((target, item.text.clone()));
                                    }
                                }
                            }
                        });
                    }
                }
            });
        ui.add_space(10.0);
    }

    if let Some((target, text)) = clicked {
        match clipboard {
            Some(sink) => {
                if let Err(e) = feedback.copy(sink.as_mut(), target, &text, Instant::now()) {
                    warn!(error = %e, "copy failed");
                }
            }
            None => warn!("no clipboard available"),
        }
    }
}

/// A small button that reads "Copied!" while its field is marked.
///
/// It stays clickable so a second copy re-arms the mark.
fn copy_button(ui: &mut egui::Ui, copied: bool, label: &str) -> bool {
    let text = if copied {
        egui::RichText::new("Copied!").strong().color(SUCCESS_GREEN)
    } else {
        egui::RichText::new(label)
    };
    ui.small_button(text).clicked()
}
