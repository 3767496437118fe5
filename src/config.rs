// config.rs - Load-time constants for the reveal sequence and background
//
// Defaults reproduce the published page. A host may override any subset
// once at start-up via JSON; nothing is reconfigurable afterwards.

use serde::Deserialize;

/// Milliseconds on the sequencer clock.
pub type Millis = u64;

const PROMPT: &str = "Create a comprehensive syllabus for a course exploring the relationship \
between artificial intelligence and art, examining how technology shapes the future of \
artistic expression.";

const LOADING_MESSAGES: [&str; 7] = [
    "Initializing AI model...",
    "Analyzing art history data...",
    "Processing creative algorithms...",
    "Generating module content...",
    "Compiling resources...",
    "Formatting syllabus structure...",
    "Finalizing response...",
];

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Text typed into the prompt box on load.
    pub prompt: String,

    // Typing speeds (per character)
    pub prompt_typing_speed: Millis,
    pub content_typing_speed: Millis,
    pub prompt_lead_in: Millis,

    // Loading stage
    pub loading_messages: Vec<String>,
    pub loading_message_interval: Millis,
    pub loading_duration: Millis,
    pub loading_overlay_delay: Millis,

    // Content stage
    pub main_content_delay: Millis,
    pub header_delay: Millis,
    /// Base unit the section table's stagger is expressed in.
    pub element_delay_unit: Millis,
    /// Slack after the last scheduled element before the stage completes.
    pub reveal_buffer: Millis,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            prompt_typing_speed: 30,
            content_typing_speed: 5,
            prompt_lead_in: 500,
            loading_messages: LOADING_MESSAGES.iter().map(|m| m.to_string()).collect(),
            loading_message_interval: 600,
            loading_duration: 4000,
            loading_overlay_delay: 300,
            main_content_delay: 500,
            header_delay: 300,
            element_delay_unit: 50,
            reveal_buffer: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,
    /// Connection threshold in CSS pixels.
    pub link_distance: f32,
    /// Per-axis velocity range is [-max_speed, max_speed).
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub line_width: f64,
    pub node_color: String,
    /// "r, g, b" of the link stroke; each link's opacity is set through
    /// the canvas global alpha.
    pub link_rgb: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 300,
            link_distance: 150.0,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            line_width: 0.5,
            node_color: "#6366f1".to_string(),
            link_rgb: "99, 102, 241".to_string(),
        }
    }
}

/// Both halves of the page configuration, read at start-up from the
/// optional `#reveal-config` JSON block.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub reveal: RevealConfig,
    pub field: FieldConfig,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
