pub mod history;
pub mod scene;
pub mod selection;
pub mod session;

pub use history::{ObjectRecord, SceneSnapshot, UndoStack};
pub use scene::{SceneGraph, SceneObject};
pub use selection::{Outline, SelectionController};
pub use session::EditorSession;
