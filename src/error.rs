use thiserror::Error;

use crate::host::AnchorId;
use crate::tooltip::TooltipId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid anchor: {0} is missing or not mounted")]
    InvalidAnchor(AnchorId),

    #[error("Tooltip {0} has been destroyed")]
    DestroyedInstance(TooltipId),

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Invalid trigger: {0}")]
    InvalidTrigger(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
