//! # TUI Components
//!
//! Every panel of the chat screen lives here.
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as fields and are rebuilt every frame:
//! - `Header`: product name, status message, theme badge
//! - `ModelSelector`: sidebar card for the active model
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local state in `TuiState` and emit events for the loop to turn into
//! actions:
//! - `PromptEditor`: multi-line prompt input
//! - `ParametersPanelState` / `ParametersPanel`: generation knobs
//! - `TranscriptState` / `Transcript`: scrollable conversation
//! - `PickerState<T>` with `ModelPicker` / `TemplatePicker`: overlays
//!
//! Components never touch `App` directly. The loop passes props in and maps
//! emitted events to `Action`s.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── header.rs            (top bar)
//! ├── model_picker.rs      (sidebar card + model overlay)
//! ├── parameters_panel.rs  (knob sliders)
//! ├── picker.rs            (shared overlay list state)
//! ├── prompt_editor.rs     (prompt input)
//! ├── template_picker.rs   (template overlay)
//! └── transcript.rs        (conversation view)
//! ```

pub mod header;
pub mod model_picker;
pub mod parameters_panel;
pub mod picker;
pub mod prompt_editor;
pub mod template_picker;
pub mod transcript;

pub use header::Header;
pub use model_picker::{ModelPicker, ModelSelector};
pub use parameters_panel::{ParametersPanel, ParametersPanelState};
pub use picker::{PickerEvent, PickerState};
pub use prompt_editor::{PromptEditor, PromptEvent};
pub use template_picker::TemplatePicker;
pub use transcript::{Transcript, TranscriptEvent, TranscriptState};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner glyph for an animation frame counter.
pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
