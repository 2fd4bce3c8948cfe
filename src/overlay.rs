use fnv::FnvHashMap;
use wasm_bindgen::JsCast;
use web_sys as web;

use overlay_core::{CustomContent, Indicator, OverlayConfig, RenderHandle, Renderer, Size, SurfaceId};

use crate::constants::*;
use crate::dom;

struct LiveOverlay {
    root: web::HtmlElement,
    surface: SurfaceId,
    size: Size,
    fade_out_ms: u64,
    indicator: Option<web::HtmlElement>,
    content: Option<ContentNode>,
}

enum ContentNode {
    Text(web::HtmlElement),
    Progress {
        track: web::HtmlElement,
        bar: web::HtmlElement,
    },
}

impl ContentNode {
    fn root(&self) -> &web::HtmlElement {
        match self {
            ContentNode::Text(el) => el,
            ContentNode::Progress { track, .. } => track,
        }
    }
}

/// Draws overlays as absolutely positioned `<div>`s appended to `<body>`.
pub struct DomRenderer {
    document: web::Document,
    next_id: u64,
    live: FnvHashMap<RenderHandle, LiveOverlay>,
}

impl DomRenderer {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            next_id: 1,
            live: FnvHashMap::default(),
        }
    }

    fn create_div(&self, class: &str) -> anyhow::Result<web::HtmlElement> {
        let el = self
            .document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_class_name(class);
        el.dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }

    fn build(&self, surface: &SurfaceId, config: &OverlayConfig) -> anyhow::Result<LiveOverlay> {
        let body = self
            .document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?;
        let root = self.create_div(OVERLAY_CLASS)?;
        let style = root.style();
        let set = |k: &str, v: &str| style.set_property(k, v).map_err(|e| anyhow::anyhow!("{:?}", e));
        set("background-color", &config.color.to_css())?;
        set("display", "flex")?;
        set("flex-direction", "column")?;
        set("align-items", "center")?;
        set("justify-content", "center")?;
        set("z-index", &config.z_index.to_string())?;
        set("opacity", "0")?;
        set("transition", &format!("opacity {}ms", config.fade.in_ms))?;

        let indicator = match config.indicator() {
            Indicator::Spinner => Some(self.create_div(SPINNER_CLASS)?),
            Indicator::Icon(class) => {
                let icon = self
                    .document
                    .create_element("i")
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                icon.set_class_name(class);
                Some(
                    icon.dyn_into::<web::HtmlElement>()
                        .map_err(|e| anyhow::anyhow!("{:?}", e))?,
                )
            }
            Indicator::Nothing => None,
        };
        if let Some(ind) = &indicator {
            root.append_child(ind).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }

        let content = match &config.custom {
            Some(custom) => {
                let node = self.build_content(custom)?;
                root.append_child(node.root())
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                Some(node)
            }
            None => None,
        };

        body.append_child(&root).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let live = LiveOverlay {
            root,
            surface: surface.clone(),
            size: config.size,
            fade_out_ms: config.fade.out_ms,
            indicator,
            content,
        };
        place(&self.document, &live);

        // Opacity has to change after the node is in the tree for the fade-in to run.
        let fade_in = live.root.clone();
        dom::set_timeout(0, move || {
            _ = fade_in.style().set_property("opacity", "1");
        });
        Ok(live)
    }

    fn build_content(&self, custom: &CustomContent) -> anyhow::Result<ContentNode> {
        match custom {
            CustomContent::Text { text, font_size_px } => {
                let el = self.create_div(TEXT_CLASS)?;
                _ = el.style().set_property("font-size", &format!("{}px", font_size_px));
                el.set_text_content(Some(text));
                Ok(ContentNode::Text(el))
            }
            CustomContent::Progress { percent } => {
                let track = self.create_div(PROGRESS_CLASS)?;
                let bar = self.create_div(PROGRESS_BAR_CLASS)?;
                _ = bar
                    .style()
                    .set_property("height", &format!("{}px", PROGRESS_BAR_HEIGHT_PX));
                _ = bar.style().set_property("width", &format!("{}%", percent));
                track
                    .append_child(&bar)
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                Ok(ContentNode::Progress { track, bar })
            }
        }
    }
}

/// Position the overlay over its surface and size the indicator.
fn place(document: &web::Document, live: &LiveOverlay) {
    let style = live.root.style();
    let (left, top, w, h) = match &live.surface {
        SurfaceId::Viewport => {
            _ = style.set_property("position", "fixed");
            let (w, h) = dom::viewport_size();
            (0.0, 0.0, w, h)
        }
        SurfaceId::Element(id) => {
            _ = style.set_property("position", "absolute");
            match document.get_element_by_id(id) {
                Some(el) => dom::page_rect(&el),
                None => {
                    log::warn!("[overlay] surface #{} left the page", id);
                    return;
                }
            }
        }
    };
    _ = style.set_property("left", &format!("{}px", left));
    _ = style.set_property("top", &format!("{}px", top));
    _ = style.set_property("width", &format!("{}px", w));
    _ = style.set_property("height", &format!("{}px", h));

    let side = live.size.resolve(w as f32, h as f32);
    if let Some(ind) = &live.indicator {
        let s = ind.style();
        _ = s.set_property("width", &format!("{}px", side));
        _ = s.set_property("height", &format!("{}px", side));
        _ = s.set_property("font-size", &format!("{}px", side));
    }
    if let Some(ContentNode::Progress { track, .. }) = &live.content {
        let width = w.min(h) * PROGRESS_BAR_WIDTH_FRAC;
        _ = track.style().set_property("width", &format!("{}px", width));
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, surface: &SurfaceId, config: &OverlayConfig) -> RenderHandle {
        let handle = RenderHandle::from_raw(self.next_id);
        self.next_id += 1;
        match self.build(surface, config) {
            Ok(live) => {
                self.live.insert(handle, live);
            }
            // The session still exists; there is just nothing on screen for it.
            Err(e) => log::error!("[overlay] render on {} failed: {:?}", surface, e),
        }
        handle
    }

    fn unrender(&mut self, handle: RenderHandle, immediate: bool) {
        let Some(live) = self.live.remove(&handle) else {
            return;
        };
        if immediate || live.fade_out_ms == 0 {
            live.root.remove();
            return;
        }
        let style = live.root.style();
        _ = style.set_property("transition", &format!("opacity {}ms", live.fade_out_ms));
        _ = style.set_property("opacity", "0");
        let root = live.root.clone();
        dom::set_timeout(live.fade_out_ms, move || root.remove());
    }

    fn refresh(&mut self, handle: RenderHandle, content: &CustomContent) {
        let Some(live) = self.live.get(&handle) else {
            return;
        };
        match (&live.content, content) {
            (Some(ContentNode::Text(el)), CustomContent::Text { text, .. }) => {
                el.set_text_content(Some(text));
                return;
            }
            (Some(ContentNode::Progress { bar, .. }), CustomContent::Progress { percent }) => {
                _ = bar.style().set_property("width", &format!("{}%", percent));
                return;
            }
            _ => {}
        }

        // No node yet, or the content kind changed: swap the node.
        let node = match self.build_content(content) {
            Ok(node) => node,
            Err(e) => {
                log::error!("[overlay] content node failed: {:?}", e);
                return;
            }
        };
        if let Some(live) = self.live.get_mut(&handle) {
            if let Some(old) = live.content.take() {
                old.root().remove();
            }
            _ = live.root.append_child(node.root());
            live.content = Some(node);
        }
    }

    fn relayout(&mut self, handle: RenderHandle) {
        if let Some(live) = self.live.get(&handle) {
            place(&self.document, live);
        }
    }
}

