//! Shared building blocks for the tasklink library and binary.
//!
//! ## Features
//!
//! - **Error Taxonomy**: Typed storage errors and the partial-failure aggregate
//! - **Name Rules**: Validation and canonical formatting of user and label names
//! - **Task Model**: The task value and the outcome of a task write
//! - **Driver Support**: Configuration, console messages and table views
//!
//! ## Usage
//!
//! ```rust
//! use tasklink::libs::name::normalize_user_name;
//!
//! assert_eq!(normalize_user_name("алексей   сидОРов ").unwrap(), "Алексей Сидоров");
//! ```

pub mod config;
pub mod error;
pub mod messages;
pub mod name;
pub mod task;
pub mod view;
