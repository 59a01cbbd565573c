use crate::api::FetchSource;
use crate::dom::{capture_page, DomApplier};
use blog_core::{RenderStatus, Renderer};

/// One page load: capture the page, render whichever mode it supports,
/// apply the result.
pub async fn run() {
    let document = gloo_utils::document();
    let location = gloo_utils::window().location();

    let page = match capture_page(&document, &location) {
        Ok(page) => page,
        Err(e) => {
            log::error!("Failed to read the page: {:?}", e);
            return;
        }
    };

    let renderer = Renderer::default();
    let source = FetchSource::new(renderer.config().posts_url.as_str());

    let (mode, output) = renderer.render_page(&page, &source).await;
    match &output.status {
        RenderStatus::Failed(_) => return,
        status => log::debug!("{:?} page: {:?}, {} commands", mode, status, output.commands.len()),
    }

    DomApplier::new(document).apply_all(&output.commands);
}
