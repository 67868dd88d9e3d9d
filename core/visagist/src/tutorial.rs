use log::warn;
use regex::Regex;

use crate::chat::{ChatClient, ChatRequest};
use crate::error::VisagistError;
use crate::video::{Video, VideoSearch};

const TUTORIAL_SYSTEM_PROMPT: &str =
    "You are a professional makeup artist providing tailored tutorials.";

/// One numbered section of a generated tutorial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialSection {
    /// Section heading, e.g. "Skin Preparation".
    pub title: String,
    /// Section body with the search marker removed.
    pub body: String,
    /// Search query extracted from the section's bracketed marker, if any.
    pub search_query: Option<String>,
    /// Video found for the search query, once resolved.
    pub video: Option<Video>,
}

/// Build the tutorial prompt for the given skin and occasion inputs.
fn tutorial_prompt(skin_tone: &str, skin_condition: &str, occasion: &str) -> String {
    format!(
        "Generate a detailed makeup tutorial for someone with the following characteristics:\n\
         - Skin tone: {skin_tone}\n\
         - Skin condition: {skin_condition}\n\
         - Occasion: {occasion}\n\
         \n\
         Please include the following sections, with a YouTube search query for each:\n\
         1. Skin Preparation\n\
         2. Foundation and Concealer\n\
         3. Eyes\n\
         4. Cheeks\n\
         5. Lips\n\
         6. Final Touches\n\
         \n\
         For each section, provide a brief explanation followed by a YouTube search query \
         in the format:\n\
         [YouTube Search: your search query here]\n\
         \n\
         Ensure that each search query is specific to the step, skin tone, and occasion."
    )
}

/// Split generated tutorial text into numbered sections.
///
/// Sections are delimited by a digit run followed by a period; the text
/// before the first delimiter is discarded. Within each section the first
/// line is the title, the rest the body, and the first
/// `[YouTube Search: ...]` marker is extracted and removed from the body.
pub fn parse_tutorial(text: &str) -> Vec<TutorialSection> {
    let delimiter = Regex::new(r"\d+\.").unwrap();
    let marker = Regex::new(r"\[YouTube Search: (.*?)\]").unwrap();

    delimiter
        .split(text)
        .skip(1)
        .map(|section| {
            let section = section.trim();
            let (title, body) = match section.split_once('\n') {
                Some((first, rest)) => (first.trim().to_string(), rest.to_string()),
                None => (section.to_string(), String::new()),
            };

            let search_query = marker
                .captures(&body)
                .map(|captures| captures[1].to_string());
            let body = marker.replace_all(&body, "").trim().to_string();

            TutorialSection {
                title,
                body,
                search_query,
                video: None,
            }
        })
        .collect()
}

/// Look up one video per section that carries a search query.
///
/// A failed lookup leaves that section's video as `None` rather than
/// aborting the remaining sections.
pub fn attach_videos(sections: &mut [TutorialSection], search: &dyn VideoSearch) {
    for section in sections.iter_mut() {
        let Some(query) = section.search_query.as_deref() else {
            continue;
        };
        match search.search(query) {
            Ok(video) => section.video = video,
            Err(e) => warn!("video lookup failed for {query:?}: {e}"),
        }
    }
}

/// Tutorial generator: skin traits and occasion in, parsed sections out.
pub struct TutorialGenerator<'a> {
    chat: &'a dyn ChatClient,
}

impl<'a> TutorialGenerator<'a> {
    /// Create a generator over the given language-model client.
    pub fn new(chat: &'a dyn ChatClient) -> Self {
        Self { chat }
    }

    /// Generate a tutorial and parse it into sections.
    pub fn generate(
        &self,
        skin_tone: &str,
        skin_condition: &str,
        occasion: &str,
    ) -> Result<Vec<TutorialSection>, VisagistError> {
        let text = self.chat.complete(&ChatRequest {
            model: "gpt-3.5-turbo".into(),
            system: TUTORIAL_SYSTEM_PROMPT.into(),
            user: tutorial_prompt(skin_tone, skin_condition, occasion),
            temperature: None,
            max_tokens: None,
        })?;
        Ok(parse_tutorial(&text))
    }
}
