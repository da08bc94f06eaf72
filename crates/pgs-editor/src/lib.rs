//! Editor state tree and serialized update channel for Polygon Studio.
//!
//! This crate is the single owner of the editable-feature state: which
//! polygon features exist, which are drafts vs. persisted, which are
//! pending deletion, which layers have been fetched, what is selected,
//! and whether a save cycle is in flight.
//!
//! # Architecture
//!
//! Collaborators never touch the state directly. They construct
//! [`Message`] values (user intents and async completions) and hand them
//! to [`Editor::apply`], which produces the next immutable snapshot plus
//! a list of [`Effect`] values describing network work for the remote
//! layer to execute. Completions come back as further messages through
//! the same channel, so no two mutations ever race.
//!
//! Snapshots use copy-on-write: only the touched path is cloned, and
//! untouched features stay pointer-identical across snapshots so a
//! rendering host can detect change by reference.

pub mod message;
pub mod selection;
pub mod state;
pub mod store;
pub mod update;
pub mod visibility;

pub use message::{Effect, Message, SaveFailure, SaveReport};
pub use state::{EditorState, FeatureList, Selection, SyncStatus};
pub use update::{Editor, Transition, update};
