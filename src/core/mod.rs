//! Core functionality for vidgrab

pub mod clipboard;
pub mod controller;
pub mod session;
pub mod video_info;
pub mod view;

pub use self::clipboard::*;
pub use self::controller::*;
pub use self::session::*;
pub use self::video_info::*;
pub use self::view::*;
