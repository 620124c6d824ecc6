//! Pure presentation model of a [`VideoMetadata`] result.
//!
//! [`ResultView::from_metadata`] turns the data into an ordered list of
//! sections. Front ends only draw it: the desktop window paints it with egui
//! and the terminal prints [`ResultView::to_markdown`].

use crate::clipboard::CopyTarget;
use crate::metadata::VideoMetadata;

/// Caption shown under the suggested upload time.
pub const BEST_TIME_CAPTION: &str = "Optimized for Android Active Hours";

/// Which part of the metadata a section presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Titles,
    BestTime,
    TargetAudience,
    EngagementTips,
    Description,
    Hashtags,
    Keywords,
}

impl SectionKind {
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Titles => "Viral Title Suggestions",
            SectionKind::BestTime => "Best Upload Time",
            SectionKind::TargetAudience => "Target Audience",
            SectionKind::EngagementTips => "Engagement Strategy",
            SectionKind::Description => "SEO-Optimized Description",
            SectionKind::Hashtags => "Trending Hashtags",
            SectionKind::Keywords => "SEO Keywords",
        }
    }
}

/// A piece of text, optionally copyable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub copy: Option<CopyTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// One copyable line per entry (titles).
    CopyableList(Vec<Item>),
    /// A highlighted value with a caption (upload time).
    Highlight { value: String, caption: &'static str },
    /// Free text, optionally copyable as a whole.
    Paragraph(Item),
    /// Bulleted entries.
    Bullets(Vec<String>),
    /// Pill-shaped entries, each copyable (hashtags).
    Chips(Vec<Item>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub sections: Vec<Section>,
}

impl ResultView {
    pub fn from_metadata(data: &VideoMetadata) -> Self {
        let titles = data
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| Item {
                text: title.clone(),
                copy: Some(CopyTarget::Title(i)),
            })
            .collect();

        let hashtags = data
            .hashtags
            .iter()
            .enumerate()
            .map(|(i, tag)| Item {
                text: tag.clone(),
                copy: Some(CopyTarget::Hashtag(i)),
            })
            .collect();

        let sections = vec![
            Section {
                kind: SectionKind::Titles,
                body: SectionBody::CopyableList(titles),
            },
            Section {
                kind: SectionKind::BestTime,
                body: SectionBody::Highlight {
                    value: data.best_time.clone(),
                    caption: BEST_TIME_CAPTION,
                },
            },
            Section {
                kind: SectionKind::TargetAudience,
                body: SectionBody::Paragraph(Item {
                    text: data.target_audience.clone(),
                    copy: None,
                }),
            },
            Section {
                kind: SectionKind::EngagementTips,
                body: SectionBody::Bullets(data.engagement_tips.clone()),
            },
            Section {
                kind: SectionKind::Description,
                body: SectionBody::Paragraph(Item {
                    text: data.description.clone(),
                    copy: Some(CopyTarget::Description),
                }),
            },
            Section {
                kind: SectionKind::Hashtags,
                body: SectionBody::Chips(hashtags),
            },
            Section {
                kind: SectionKind::Keywords,
                body: SectionBody::Bullets(data.keywords.clone()),
            },
        ];

        Self { sections }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Renders the view as markdown for terminal output.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        for section in &self.sections {
            out.push_str(&format!("## {}\n\n", section.heading()));
            match &section.body {
                SectionBody::CopyableList(items) => {
                    for (i, item) in items.iter().enumerate() {
                        out.push_str(&format!("{}. {}\n", i + 1, item.text));
                    }
                }
                SectionBody::Highlight { value, caption } => {
                    out.push_str(&format!("**{}**\n*{}*\n", value, caption));
                }
                SectionBody::Paragraph(item) => {
                    out.push_str(&item.text);
                    out.push('\n');
                }
                SectionBody::Bullets(entries) => {
                    for entry in entries {
                        out.push_str(&format!("* {}\n", entry));
                    }
                }
                SectionBody::Chips(items) => {
                    let tags: Vec<_> = items.iter().map(|i| format!("`{}`", i.text)).collect();
                    out.push_str(&tags.join(" "));
                    out.push('\n');
                }
            }
            out.push('\n');
        }

        out
    }
}
