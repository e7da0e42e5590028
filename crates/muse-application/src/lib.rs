//! Application layer of the Muse studio engine.
//!
//! Builds async orchestration on top of `muse-core`: the studio use case
//! (generation jobs, variant navigation, edit lifecycle) and the hover
//! menu scheduler with its cancellable close timers.

pub mod hover_menu;
pub mod studio_usecase;

pub use hover_menu::HoverMenuService;
pub use studio_usecase::StudioUseCase;
