use thiserror::Error;

#[derive(Error, Debug)]
pub enum LetterError {
    #[error("Failed to encode page content: {0}")]
    Encode(String),

    #[error("Failed to write PDF: {0}")]
    Write(String),

    #[error("Unsupported or corrupt attachment image: {0}")]
    Image(String),
}
