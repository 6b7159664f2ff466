//! Screen implementations, one per [`ScreenId`].

pub mod directory;
pub mod failure;
pub mod loading;

use crate::component::Component;
use crate::screen::ScreenId;

/// Build every screen. The app shows whichever one the store's phase picks.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Loading, Box::new(loading::LoadingScreen::new())),
        (ScreenId::Failure, Box::new(failure::FailureScreen::new())),
        (ScreenId::Directory, Box::new(directory::DirectoryScreen::new())),
    ]
}
