//! Error types
//!
//! Nothing in the simulation is fatal; these are the recoverable
//! rejections a caller surfaces as UI feedback.

use thiserror::Error;

/// Reasons a puzzle submission is rejected without changing state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// No puzzle is waiting for an answer.
    #[error("no puzzle is open")]
    NoPuzzle,

    /// The open puzzle was already answered and is showing feedback.
    #[error("puzzle already answered")]
    AlreadyAnswered,

    /// The submitted text does not start with an integer.
    #[error("not a number: {0:?}")]
    NotANumber(String),
}

/// GPU setup failures. The game keeps running without a canvas renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("no game canvas in the page")]
    NoCanvas,

    #[error("surface reports no texture formats")]
    NoSurfaceFormat,
}
