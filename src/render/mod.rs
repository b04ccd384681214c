//! Render backend abstraction
//!
//! The crawler never talks to a browser directly; it drives these two traits.
//! [`RenderBackend`] opens one page session per section crawl, and
//! [`PageSession`] exposes the four operations the crawler needs: navigate,
//! bounded element wait, text extraction by tag, and link enumeration.
//!
//! The production implementation speaks the WebDriver wire protocol against a
//! running chromedriver; tests substitute scripted fakes.

mod webdriver;

pub use webdriver::{WebDriverBackend, WebDriverPage};

use crate::RenderResult;
use std::time::Duration;

/// A backend capable of opening rendered page sessions
pub trait RenderBackend {
    type Page: PageSession;

    /// Opens a fresh page session
    ///
    /// A failure here is fatal for the section about to be crawled: the
    /// backend itself could not be started.
    async fn open_page(&self) -> RenderResult<Self::Page>;
}

/// One live rendered page, navigated in place
///
/// The session is the page handle: navigation replaces the current document,
/// queries operate on whatever is currently loaded.
pub trait PageSession {
    /// Navigates the session to a URL
    async fn navigate(&mut self, url: &str) -> RenderResult<()>;

    /// Waits until an element matching `selector` exists, up to `timeout`
    ///
    /// Returns [`crate::RenderError::WaitTimeout`] when the deadline passes;
    /// this wait is bounded and never hangs.
    async fn wait_for_element(&mut self, selector: &str, timeout: Duration) -> RenderResult<()>;

    /// Returns the rendered text of every element with the given tag name,
    /// in document order
    async fn element_texts(&mut self, tag: &str) -> RenderResult<Vec<String>>;

    /// Returns the href of every anchor element on the current page, in
    /// document order
    async fn link_hrefs(&mut self) -> RenderResult<Vec<String>>;

    /// Closes the session, releasing the underlying browser resources
    async fn close(self) -> RenderResult<()>;
}
