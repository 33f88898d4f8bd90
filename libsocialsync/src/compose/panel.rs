//! Side-panel projections
//!
//! Pure, read-only views of composer state, one per tab.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

use super::Composer;
use crate::types::ScheduleMode;

pub const PREVIEW_PLACEHOLDER: &str = "Start typing to see preview...";

pub const TOOLS: &[&str] = &[
    "Hashtag Generator",
    "Link Shortener",
    "Character Counter",
    "Analytics",
];

pub const AI_ACTIONS: &[&str] = &[
    "Improve Writing",
    "Generate Hashtags",
    "Suggest Caption",
    "Translate",
    "Summarize",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidePanelTab {
    #[default]
    Preview,
    Schedule,
    Tools,
    AiAssistant,
}

impl SidePanelTab {
    pub const ALL: [SidePanelTab; 4] = [
        SidePanelTab::Preview,
        SidePanelTab::Schedule,
        SidePanelTab::Tools,
        SidePanelTab::AiAssistant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Schedule => "schedule",
            Self::Tools => "tools",
            Self::AiAssistant => "ai-assistant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Schedule => "Schedule",
            Self::Tools => "Tools",
            Self::AiAssistant => "AI Assistant",
        }
    }
}

impl FromStr for SidePanelTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preview" => Ok(Self::Preview),
            "schedule" => Ok(Self::Schedule),
            "tools" => Ok(Self::Tools),
            "ai-assistant" | "ai" => Ok(Self::AiAssistant),
            _ => Err(format!(
                "Invalid panel: '{}'. Valid options: preview, schedule, tools, ai-assistant",
                s
            )),
        }
    }
}

impl std::fmt::Display for SidePanelTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tab", rename_all = "kebab-case")]
pub enum PanelView {
    Preview {
        /// `None` while the draft is empty
        text: Option<String>,
        /// Thumb URLs in attachment order
        thumbnails: Vec<String>,
    },
    Schedule {
        mode: ScheduleMode,
        /// Confirmed schedule, e.g. "Wed, Jan 1, 2025 at 10:00 AM"
        summary: Option<String>,
        submit_label: &'static str,
    },
    Tools {
        tools: &'static [&'static str],
        char_count: usize,
    },
    AiAssistant {
        actions: &'static [&'static str],
    },
}

impl PanelView {
    pub fn tab(&self) -> SidePanelTab {
        match self {
            PanelView::Preview { .. } => SidePanelTab::Preview,
            PanelView::Schedule { .. } => SidePanelTab::Schedule,
            PanelView::Tools { .. } => SidePanelTab::Tools,
            PanelView::AiAssistant { .. } => SidePanelTab::AiAssistant,
        }
    }

    /// Plain-text rendering for terminal front ends
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.tab().label());

        match self {
            PanelView::Preview { text, thumbnails } => {
                let _ = writeln!(out, "{}", text.as_deref().unwrap_or(PREVIEW_PLACEHOLDER));
                for url in thumbnails {
                    let _ = writeln!(out, "[image] {}", url);
                }
            }
            PanelView::Schedule {
                mode,
                summary,
                submit_label,
            } => {
                match (mode, summary) {
                    (ScheduleMode::Scheduled, Some(summary)) => {
                        let _ = writeln!(out, "Scheduled for {}", summary);
                    }
                    _ => {
                        let _ = writeln!(out, "Posting immediately");
                    }
                }
                let _ = writeln!(out, "Action: {}", submit_label);
            }
            PanelView::Tools { tools, char_count } => {
                for tool in tools.iter() {
                    let _ = writeln!(out, "- {}", tool);
                }
                let _ = writeln!(out, "Characters: {}", char_count);
            }
            PanelView::AiAssistant { actions } => {
                for action in actions.iter() {
                    let _ = writeln!(out, "- {}", action);
                }
            }
        }

        out
    }
}

/// Build the view for the composer's active tab
pub fn project(composer: &Composer) -> PanelView {
    match composer.active_tab() {
        SidePanelTab::Preview => PanelView::Preview {
            text: (!composer.text().is_empty()).then(|| composer.text().to_string()),
            thumbnails: composer
                .images()
                .iter()
                .map(|image| image.urls.thumb.clone())
                .collect(),
        },
        SidePanelTab::Schedule => PanelView::Schedule {
            mode: composer.mode(),
            summary: composer.schedule().map(|s| s.summary()),
            submit_label: composer.submit_label(),
        },
        SidePanelTab::Tools => PanelView::Tools {
            tools: TOOLS,
            char_count: composer.char_count(),
        },
        SidePanelTab::AiAssistant => PanelView::AiAssistant { actions: AI_ACTIONS },
    }
}
