//! Share panel actions.

use estate_core::share::ShareLinks;

use crate::clipboard::Clipboard;
use crate::notice::Notice;

fn copy(clipboard: &dyn Clipboard, text: &str, done: Notice) -> Notice {
    match clipboard.write_text(text) {
        Ok(()) => done,
        Err(e) => {
            tracing::warn!(error = %e, "Share copy failed");
            Notice::error("Failed to copy", "Please copy the link manually.")
        }
    }
}

/// "Copy Link": the full public form URL.
pub fn copy_link(clipboard: &dyn Clipboard, links: &ShareLinks) -> Notice {
    copy(
        clipboard,
        &links.url,
        Notice::success(
            "Link copied!",
            "The waitlist link has been copied to your clipboard.",
        ),
    )
}

/// "Copy Code": the iframe snippet.
pub fn copy_embed_code(clipboard: &dyn Clipboard, links: &ShareLinks) -> Notice {
    copy(
        clipboard,
        &links.embed_code,
        Notice::success("Embed code copied!", "Paste this code into your website."),
    )
}
