#![warn(clippy::all, rust_2018_idioms)]

pub mod brush;
pub mod client;
pub mod command;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod ink_module;
pub mod input;
pub mod message;
pub mod renderer;
pub mod settings;
pub mod stroke;
pub mod tool;

pub use brush::{Brush, BrushType, RgbColor};
pub use client::InkModuleClient;
pub use command::{Commands, DiscardedDrawCommands, UndoRedoModel};
pub use engine::StrokeEngine;
pub use error::{MessageError, SettingsError};
pub use geometry::{Affine, PageOrientation};
pub use id_generator::{StrokeId, StrokeIdGenerator};
pub use ink_module::{InkModule, PageStrokePositions};
pub use input::InputEvent;
pub use message::{Message, ToolSelection};
pub use renderer::{PolylineEngine, PolylineShape};
pub use settings::{BrushSettings, InkSettings};
pub use stroke::{FinishedStroke, StrokeInput};
pub use tool::ToolState;
