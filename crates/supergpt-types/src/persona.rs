//! Fixed personas for the four conversational surfaces.
//!
//! Each surface of the assistant (general chat, image library, floor-plan
//! viewer, 3D render viewer) talks to the model with its own instruction
//! prefix. The persona is passed explicitly into every orchestrator call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CHAT_ASSISTANT_PROMPT: &str = "You are SuperGPT, the AI assistant of a furniture company. \
You help staff with product questions, interior design advice, client follow-ups, scheduling \
and everyday business tasks. Be friendly, professional and concise.";

const IMAGE_ASSISTANT_PROMPT: &str = "You are SuperGPT's image creation assistant for a furniture \
company. You help users describe furniture and interior scenes for image generation: styles, \
materials, colors, lighting and composition. Suggest concrete prompt improvements when useful.";

const FLOOR_PLAN_ASSISTANT_PROMPT: &str = "You are SuperGPT's floor plan assistant for a furniture \
company. You help users read and adjust floor plans, propose furniture layouts that fit the room \
dimensions, and keep circulation paths and clearances practical.";

const RENDER_ASSISTANT_PROMPT: &str = "You are SuperGPT's 3D render assistant for a furniture \
company. You help users review 3D renders of furniture and interiors and advise on materials, \
finishes, lighting, camera angles and presentation.";

/// Which surface is asking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[default]
    ChatAssistant,
    ImageAssistant,
    FloorPlanAssistant,
    RenderAssistant,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::ChatAssistant,
        Persona::ImageAssistant,
        Persona::FloorPlanAssistant,
        Persona::RenderAssistant,
    ];

    /// The fixed instruction prefix sent to the text provider.
    pub fn instruction(&self) -> &'static str {
        match self {
            Persona::ChatAssistant => CHAT_ASSISTANT_PROMPT,
            Persona::ImageAssistant => IMAGE_ASSISTANT_PROMPT,
            Persona::FloorPlanAssistant => FLOOR_PLAN_ASSISTANT_PROMPT,
            Persona::RenderAssistant => RENDER_ASSISTANT_PROMPT,
        }
    }

    /// Session key of the surface this persona belongs to.
    pub fn default_session_key(&self) -> &'static str {
        match self {
            Persona::ChatAssistant => "main",
            Persona::ImageAssistant => "library",
            Persona::FloorPlanAssistant => "floorplan",
            Persona::RenderAssistant => "render",
        }
    }

    /// Short label for prompts and banners.
    pub fn label(&self) -> &'static str {
        match self {
            Persona::ChatAssistant => "SuperGPT",
            Persona::ImageAssistant => "Image Studio",
            Persona::FloorPlanAssistant => "Floor Plans",
            Persona::RenderAssistant => "3D Renders",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::ChatAssistant => write!(f, "chat"),
            Persona::ImageAssistant => write!(f, "image"),
            Persona::FloorPlanAssistant => write!(f, "floorplan"),
            Persona::RenderAssistant => write!(f, "render"),
        }
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" | "main" | "chat_assistant" => Ok(Persona::ChatAssistant),
            "image" | "library" | "image_assistant" => Ok(Persona::ImageAssistant),
            "floorplan" | "floor-plan" | "floor_plan_assistant" => {
                Ok(Persona::FloorPlanAssistant)
            }
            "render" | "3d" | "render_assistant" => Ok(Persona::RenderAssistant),
            other => Err(format!("invalid persona: '{other}'")),
        }
    }
}
