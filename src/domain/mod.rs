//! Domain Layer
//!
//! Entities and the pure state containers. No I/O lives here; the board and
//! table builder mutate in memory and the store layer persists the rest.

mod board;
mod dashboard;
mod entity;
mod member;
mod note;
mod project;
mod table;
mod user;

pub use board::{Board, Column, DragPayload};
pub use dashboard::{BoardDirectory, RetroBoard};
pub use entity::{DomainError, DomainResult, Entity};
pub use member::{Member, MemberDetails};
pub use note::{Note, NoteColor};
pub use project::{NewProject, Project};
pub use table::{CellAddr, CellKind, CellState, Table, TableBuilder, TableTool, ToolTarget};
pub use user::User;
