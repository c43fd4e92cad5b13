//! Task presets choosing the instruction placed before the user's text.

/// Instruction used for task names without a preset.
const FALLBACK: &str = "What do you think about";

/// Join an instruction and the user's text.
///
/// A blank instruction leaves the text untouched; otherwise the result is
/// `"{prefix}: {body}"`.
pub fn prompt_text(prefix: &str, body: &str) -> String {
    if prefix.trim().is_empty() {
        body.to_owned()
    } else {
        format!("{prefix}: {body}")
    }
}

/// Text-only tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTask {
    Summary,
    Speech,
    Story,
    Code,
    Slogan,
    Promote,
    Joke,
    /// No instruction, the text is sent as typed.
    #[default]
    Free,
    /// Unknown task name.
    Other,
}

impl TextTask {
    /// Every task with a preset, in menu order.
    pub const ALL: [TextTask; 8] = [
        Self::Summary,
        Self::Speech,
        Self::Story,
        Self::Code,
        Self::Slogan,
        Self::Promote,
        Self::Joke,
        Self::Free,
    ];

    /// Look a task up by name; unknown names map to [`TextTask::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "summary" => Self::Summary,
            "speech" => Self::Speech,
            "story" => Self::Story,
            "code" => Self::Code,
            "slogan" => Self::Slogan,
            "promote" => Self::Promote,
            "joke" => Self::Joke,
            "free" => Self::Free,
            _ => Self::Other,
        }
    }

    /// The task name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Speech => "speech",
            Self::Story => "story",
            Self::Code => "code",
            Self::Slogan => "slogan",
            Self::Promote => "promote",
            Self::Joke => "joke",
            Self::Free => "free",
            Self::Other => "other",
        }
    }

    /// The instruction placed before the user's text.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Summary => "Summarize the following text for me",
            Self::Speech => "Convey a thought effectively about the following subject",
            Self::Story => "Generate a story from the following subject",
            Self::Code => "Write a simple application code to do the following",
            Self::Slogan => "Create an appealing slogan for the following business",
            Self::Promote => "Create a promotion text for the following product, service or brand",
            Self::Joke => "Write a funny joke to tell my friends about the following subject",
            Self::Free => "",
            Self::Other => FALLBACK,
        }
    }
}

/// Image tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageTask {
    #[default]
    Reason,
    Caption,
    Info,
    /// No instruction, the question is sent as typed.
    Task,
    /// Unknown task name.
    Other,
}

impl ImageTask {
    /// Every task with a preset, in menu order.
    pub const ALL: [ImageTask; 4] = [Self::Reason, Self::Caption, Self::Info, Self::Task];

    /// Look a task up by name; unknown names map to [`ImageTask::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "reason" => Self::Reason,
            "caption" => Self::Caption,
            "info" => Self::Info,
            "task" => Self::Task,
            _ => Self::Other,
        }
    }

    /// The task name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reason => "reason",
            Self::Caption => "caption",
            Self::Info => "info",
            Self::Task => "task",
            Self::Other => "other",
        }
    }

    /// The instruction placed before the user's question.
    pub fn preamble(&self) -> &'static str {
        match self {
            Self::Reason => "Look at the image(s), and then answer the following question",
            Self::Caption => {
                "Look at the image(s), and then write a short description with the following task"
            }
            Self::Info => {
                "Look at the image(s), and then get information or explanation with the following task"
            }
            Self::Task => "",
            Self::Other => FALLBACK,
        }
    }
}
