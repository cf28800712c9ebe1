//! Page furniture shared by the server-rendered pages: picking the active
//! navigation link and timing out flash messages.

use std::time::Duration;

/// How long a flash message stays fully visible.
pub const FLASH_VISIBLE_FOR: Duration = Duration::from_secs(5);
/// Time between the fade-out starting and the message being removed, matching
/// the CSS opacity transition.
pub const FLASH_FADE_FOR: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// The link to mark "live" for `path`: the first one whose href is exactly the
/// path. At most one link is marked.
pub fn active_nav_link<'a>(path: &str, links: &'a [NavLink]) -> Option<&'a NavLink> {
    links.iter().find(|link| link.href == path)
}

pub trait FlashMessage {
    fn fade_out(&mut self);
    fn remove(self);
}

/// Fades the flash message out after [`FLASH_VISIBLE_FOR`], then removes it
/// [`FLASH_FADE_FOR`] later. Does nothing if there is no message.
pub async fn dismiss_flash<F: FlashMessage>(flash: Option<F>) {
    let Some(mut flash) = flash else {
        return;
    };

    tokio::time::sleep(FLASH_VISIBLE_FOR).await;
    flash.fade_out();

    tokio::time::sleep(FLASH_FADE_FOR).await;
    flash.remove();
}
