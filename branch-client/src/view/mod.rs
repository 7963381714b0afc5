//! View state machines for the client application
//!
//! - [`gate`] - login gate
//! - [`management`] - branch grid, dialog, import / export

pub mod gate;
pub mod management;

pub use gate::{GateEvent, GateState, GateTransition};
pub use management::{
    BranchForm, DEFAULT_PAGE_SIZE, Effect, FormField, ManagementEvent, ManagementState,
    PAGE_SIZE_OPTIONS, ViewMode,
};
