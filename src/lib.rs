// Library surface for the binary, headless integration tests and reuse.
// Nothing here touches the terminal; rendering lives in the binary.
pub mod analysis;
pub mod app_dirs;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod impact;
pub mod logging;
pub mod login;
pub mod notify;
pub mod report;
pub mod runtime;
pub mod scanner;
pub mod scoreboard;
pub mod session;
pub mod sorting;
pub mod util;

pub use catalog::{Catalog, CategoryTag, WasteItem};
pub use classifier::{Classifier, DetectionResult, DrawSource, ScriptedDraws};
pub use error::SimError;
pub use session::{Session, SessionConfig};
