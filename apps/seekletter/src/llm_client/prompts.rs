// Prompt constants shared by everything that calls the chat model.

/// Role instruction sent as the system message for every cover letter.
pub const COVER_LETTER_SYSTEM: &str =
    "You are a helpful assistant that writes professional cover letters.";
