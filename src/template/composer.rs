//! Layout composer

use super::HostDocument;
use crate::config::SiteConfig;
use crate::network::{Fetch, resolve};
use crate::renderer::HtmlParser;
use crate::utils::error::CompositionError;
use crate::utils::{BlogError, Result};

/// Grafts a page's content element into the shared layout
#[derive(Clone)]
pub struct LayoutComposer {
    layout_path: String,
    content_id: String,
    slot_id: String,
    site_name: Option<String>,
    parser: HtmlParser,
}

impl LayoutComposer {
    /// Composer for `layout_path`, moving `#content` into `#main`
    pub fn new(layout_path: impl Into<String>) -> Self {
        Self {
            layout_path: layout_path.into(),
            content_id: "content".to_string(),
            slot_id: "main".to_string(),
            site_name: None,
            parser: HtmlParser::new(),
        }
    }

    /// Composer configured from site settings
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            layout_path: config.layout_path.clone(),
            content_id: config.content_id.clone(),
            slot_id: config.slot_id.clone(),
            site_name: config.site_name.clone(),
            parser: HtmlParser::new(),
        }
    }

    /// Prefix the composed `<title>` with a site name
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Compose and report. Failures are written to the host's console and
    /// never propagate; returns whether the body was replaced.
    pub async fn compose<H, F>(&self, host: &mut H, fetcher: &F) -> bool
    where
        H: HostDocument,
        F: Fetch,
    {
        match self.try_compose(host, fetcher).await {
            Ok(()) => {
                host.console()
                    .debug(format!("composed page with {}", self.layout_path));
                true
            }
            Err(e) => {
                host.console().error(format!(
                    "Error loading {} while {}: {}",
                    self.layout_path,
                    failing_step(&e),
                    e
                ));
                false
            }
        }
    }

    /// Fetch the layout, graft the content element into its slot and replace
    /// the displayed body with the layout's root element.
    ///
    /// The displayed document is only touched once every lookup has
    /// succeeded: on error it is exactly as it was.
    pub async fn try_compose<H, F>(&self, host: &mut H, fetcher: &F) -> Result<()>
    where
        H: HostDocument,
        F: Fetch,
    {
        let url = resolve(host.url(), &self.layout_path)?;
        let response = fetcher.fetch(&url).await?;

        // Ids in the displayed document stop resolving once the body is
        // replaced, so everything is captured here.
        let content = host
            .element_by_id(&self.content_id)
            .ok_or_else(|| CompositionError::MissingContent(self.content_id.clone()))?;
        if host.count_by_id(&self.content_id) > 1 {
            return Err(CompositionError::DuplicateContent(self.content_id.clone()).into());
        }
        let body = host.body().ok_or(CompositionError::MissingBody)?;
        if content.is_inclusive_ancestor_of(&body) {
            return Err(CompositionError::ContentContainsBody(self.content_id.clone()).into());
        }
        let page_title = host.title();

        let layout = self.parser.parse_bytes(response.body())?;
        let slot = layout
            .get_element_by_id(&self.slot_id)
            .ok_or_else(|| CompositionError::MissingSlot(self.slot_id.clone()))?;
        if layout.count_elements_by_id(&self.slot_id) > 1 {
            return Err(CompositionError::DuplicateSlot(self.slot_id.clone()).into());
        }
        let root = layout
            .document_element()
            .ok_or(CompositionError::MissingRoot)?;

        if let (Some(site), Some(title)) = (&self.site_name, page_title) {
            layout.set_title(&format!("{site} - {title}"))?;
        }

        slot.append_child(&content)?;
        host.replace_body(root)?;
        log::debug!(
            "grafted #{} into #{} of {}",
            self.content_id,
            self.slot_id,
            url
        );
        Ok(())
    }
}

fn failing_step(error: &BlogError) -> &'static str {
    match error {
        BlogError::Fetch(_) => "fetching the layout",
        BlogError::Parse(_) => "parsing the layout",
        BlogError::Composition(_) | BlogError::Render(_) => "grafting the content",
        BlogError::Config(_) | BlogError::Io(_) => "preparing the composition",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devtools::Console;
    use crate::network::Response;
    use crate::renderer::{Document, NodeRef};
    use crate::utils::error::{FetchError, ParseError, RenderError};
    use url::Url;

    const LAYOUT: &str = r#"<html><head><title>Layout</title></head><body><nav>nav</nav><div id="main"></div><footer>f</footer></body></html>"#;
    const PAGE: &str = r#"<html><head><title>Home</title></head><body><div id="content"><p>hi</p></div></body></html>"#;

    struct StaticFetch(std::result::Result<&'static str, u16>);

    impl Fetch for StaticFetch {
        async fn fetch(&self, url: &Url) -> Result<Response> {
            match self.0 {
                Ok(body) => Ok(Response::new(200, body)),
                Err(status) => Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                }
                .into()),
            }
        }
    }

    /// Host backed by a parsed document, counting body replacements
    struct StubHost {
        url: Url,
        document: Document,
        console: Console,
        replacements: usize,
        forget_ids_after_replace: bool,
    }

    impl StubHost {
        fn new(html: &str) -> Self {
            Self {
                url: Url::parse("https://blog.example/index.html").unwrap(),
                document: HtmlParser::new().parse(html).unwrap(),
                console: Console::new(),
                replacements: 0,
                forget_ids_after_replace: false,
            }
        }
    }

    impl HostDocument for StubHost {
        fn url(&self) -> &Url {
            &self.url
        }

        fn element_by_id(&self, id: &str) -> Option<NodeRef> {
            if self.forget_ids_after_replace && self.replacements > 0 {
                return None;
            }
            self.document.get_element_by_id(id)
        }

        fn count_by_id(&self, id: &str) -> usize {
            if self.forget_ids_after_replace && self.replacements > 0 {
                return 0;
            }
            self.document.count_elements_by_id(id)
        }

        fn body(&self) -> Option<NodeRef> {
            self.document.body()
        }

        fn replace_body(&mut self, root: NodeRef) -> std::result::Result<(), RenderError> {
            self.replacements += 1;
            self.document.body().unwrap().replace_children([root])
        }

        fn title(&self) -> Option<String> {
            self.document.title()
        }

        fn console(&mut self) -> &mut Console {
            &mut self.console
        }
    }

    #[tokio::test]
    async fn test_compose_grafts_content_into_slot() {
        let mut host = StubHost::new(PAGE);
        let composer = LayoutComposer::new("/layout.html");
        assert!(composer.compose(&mut host, &StaticFetch(Ok(LAYOUT))).await);

        let body = host.document.body().unwrap();
        assert_eq!(body.child_count(), 1);
        let main = host.document.get_element_by_id("main").unwrap();
        let content = host.document.get_element_by_id("content").unwrap();
        assert!(content.parent().unwrap().ptr_eq(&main));
        assert!(body.find_by_tag("nav").is_some());
        assert!(body.find_by_tag("footer").is_some());
        assert!(!host.console.has_errors());
    }

    #[tokio::test]
    async fn test_missing_content_never_replaces() {
        let mut host = StubHost::new("<html><body><p>no content here</p></body></html>");
        let before = host.document.to_html();
        let composer = LayoutComposer::new("/layout.html");

        let err = composer
            .try_compose(&mut host, &StaticFetch(Ok(LAYOUT)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogError::Composition(CompositionError::MissingContent(ref id)) if id == "content"
        ));
        assert_eq!(host.replacements, 0);
        assert_eq!(host.document.to_html(), before);
    }

    #[tokio::test]
    async fn test_missing_slot_never_replaces() {
        let mut host = StubHost::new(PAGE);
        let before = host.document.to_html();
        let composer = LayoutComposer::new("/layout.html");

        let err = composer
            .try_compose(&mut host, &StaticFetch(Ok("<html><body><nav></nav></body></html>")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogError::Composition(CompositionError::MissingSlot(ref id)) if id == "main"
        ));
        assert_eq!(host.replacements, 0);
        assert_eq!(host.document.to_html(), before);
        assert!(host.document.get_element_by_id("content").is_some());
    }

    #[tokio::test]
    async fn test_duplicate_content_never_replaces() {
        let mut host = StubHost::new(
            r#"<html><body><div id="content">one</div><div id="content">two</div></body></html>"#,
        );
        let before = host.document.to_html();
        let composer = LayoutComposer::new("/layout.html");

        let err = composer
            .try_compose(&mut host, &StaticFetch(Ok(LAYOUT)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogError::Composition(CompositionError::DuplicateContent(ref id)) if id == "content"
        ));
        assert_eq!(host.replacements, 0);
        assert_eq!(host.document.to_html(), before);
    }

    #[tokio::test]
    async fn test_duplicate_slot_never_replaces() {
        let mut host = StubHost::new(PAGE);
        let before = host.document.to_html();
        let composer = LayoutComposer::new("/layout.html");
        let layout = r#"<html><body><div id="main"></div><div id="main"></div></body></html>"#;

        assert!(!composer.compose(&mut host, &StaticFetch(Ok(layout))).await);
        assert_eq!(host.replacements, 0);
        assert_eq!(host.document.to_html(), before);

        let message = &host.console.messages().last().unwrap().message;
        assert!(message.contains("more than one element with id `main`"), "{message}");
    }

    #[tokio::test]
    async fn test_capture_happens_before_replacement() {
        let mut host = StubHost::new(PAGE);
        host.forget_ids_after_replace = true;
        let composer = LayoutComposer::new("/layout.html");

        composer
            .try_compose(&mut host, &StaticFetch(Ok(LAYOUT)))
            .await
            .unwrap();
        assert_eq!(host.replacements, 1);
        assert!(host.document.root.find_by_id("content").is_some());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_not_raised() {
        let mut host = StubHost::new(PAGE);
        let before = host.document.to_html();
        let composer = LayoutComposer::new("/layout.html");

        assert!(!composer.compose(&mut host, &StaticFetch(Err(404))).await);
        assert_eq!(host.replacements, 0);
        assert_eq!(host.document.to_html(), before);

        let message = &host.console.messages().last().unwrap().message;
        assert!(message.contains("fetching the layout"), "{message}");
        assert!(message.contains("404"), "{message}");
    }

    #[tokio::test]
    async fn test_empty_layout_is_parse_error() {
        let mut host = StubHost::new(PAGE);
        let composer = LayoutComposer::new("/layout.html");
        let err = composer
            .try_compose(&mut host, &StaticFetch(Ok("  ")))
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::Parse(ParseError::Empty)));
        assert_eq!(host.replacements, 0);
    }

    #[tokio::test]
    async fn test_content_enclosing_body_is_rejected() {
        let mut host = StubHost::new(r#"<html id="content"><body><p>x</p></body></html>"#);
        let before = host.document.to_html();
        let composer = LayoutComposer::new("/layout.html");

        let err = composer
            .try_compose(&mut host, &StaticFetch(Ok(LAYOUT)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogError::Composition(CompositionError::ContentContainsBody(_))
        ));
        assert_eq!(host.document.to_html(), before);
    }

    #[tokio::test]
    async fn test_site_name_prefixes_title() {
        let mut host = StubHost::new(PAGE);
        let composer = LayoutComposer::new("/layout.html").with_site_name("jubelogs");
        composer
            .try_compose(&mut host, &StaticFetch(Ok(LAYOUT)))
            .await
            .unwrap();

        let body = host.document.body().unwrap();
        let title = body.find_by_tag("title").unwrap();
        assert_eq!(title.text_content(), "jubelogs - Home");
    }
}
