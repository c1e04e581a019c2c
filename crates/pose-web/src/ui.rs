use crate::dom;
use pose_core::ScreenRect;
use web_sys as web;

#[derive(Clone, Copy, Debug)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// Handles to the host page. The canvas, the floating joint label and the two
/// indicator rectangles are required; every other control is optional so a
/// host can embed a reduced widget.
#[derive(Clone)]
pub struct UiHandles {
    pub container: web::HtmlElement,
    pub canvas: web::HtmlCanvasElement,
    pub notation: web::HtmlElement,
    pub indicator_selection: web::HtmlElement,
    pub indicator_hover: web::HtmlElement,
    pub notifications: Option<web::HtmlElement>,
    pub all_reset: Option<web::HtmlElement>,
    pub reset_camera: Option<web::HtmlElement>,
    pub reset_pose: Option<web::HtmlElement>,
    pub add_body: Option<web::HtmlElement>,
    pub remove_body: Option<web::HtmlElement>,
    pub canvas_width: Option<web::HtmlInputElement>,
    pub canvas_height: Option<web::HtmlInputElement>,
    pub bg_file: Option<web::HtmlInputElement>,
    pub reset_bg: Option<web::HtmlElement>,
    pub fixed_roll: Option<web::HtmlInputElement>,
    pub elliptic_limbs: Option<web::HtmlInputElement>,
    pub limb_width: Option<web::HtmlInputElement>,
    pub low_fps: Option<web::HtmlInputElement>,
    pub save_button: Option<web::HtmlElement>,
    pub copy_button: Option<web::HtmlElement>,
    pub save_pose: Option<web::HtmlElement>,
}

impl UiHandles {
    pub fn from_document(document: &web::Document) -> anyhow::Result<Self> {
        Ok(Self {
            container: dom::required(document, "cont")?,
            canvas: dom::required(document, "main_canvas")?,
            notation: dom::required(document, "notation")?,
            indicator_selection: dom::required(document, "body_indicator1")?,
            indicator_hover: dom::required(document, "body_indicator2")?,
            notifications: dom::optional(document, "notifications"),
            all_reset: dom::optional(document, "all_reset"),
            reset_camera: dom::optional(document, "reset_camera"),
            reset_pose: dom::optional(document, "reset_pose"),
            add_body: dom::optional(document, "add_body"),
            remove_body: dom::optional(document, "remove_body"),
            canvas_width: dom::optional(document, "canvas_width"),
            canvas_height: dom::optional(document, "canvas_height"),
            bg_file: dom::optional(document, "bg_file"),
            reset_bg: dom::optional(document, "reset_bg"),
            fixed_roll: dom::optional(document, "fixed_roll"),
            elliptic_limbs: dom::optional(document, "elliptic_limbs"),
            limb_width: dom::optional(document, "limb_width"),
            low_fps: dom::optional(document, "low_fps"),
            save_button: dom::optional(document, "save_button"),
            copy_button: dom::optional(document, "copy_button"),
            save_pose: dom::optional(document, "save_pose"),
        })
    }

    /// Append a line to the notification feed and mirror it to the console.
    pub fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::error!("[ui] {message}"),
            _ => log::info!("[ui] {message}"),
        }
        let Some(feed) = &self.notifications else {
            return;
        };
        let Some(document) = dom::window_document() else {
            return;
        };
        if let Ok(p) = document.create_element("p") {
            let _ = p.set_attribute("class", severity.class());
            p.set_text_content(Some(message));
            let _ = feed.append_child(&p);
        }
    }

    /// Position an indicator rectangle over a body, or hide it.
    pub fn place_indicator(&self, el: &web::HtmlElement, rect: Option<ScreenRect>) {
        match rect {
            Some(rect) => {
                let left = self.canvas.offset_left() as f32 + rect.min.x;
                let top = self.canvas.offset_top() as f32 + rect.min.y;
                let style = format!(
                    "display:block;position:absolute;pointer-events:none;left:{left:.0}px;top:{top:.0}px;width:{:.0}px;height:{:.0}px;",
                    rect.max.x - rect.min.x,
                    rect.max.y - rect.min.y
                );
                let _ = el.set_attribute("style", &style);
            }
            None => {
                let _ = el.set_attribute("style", "display:none;");
            }
        }
    }

    /// Float the joint-name label next to the pointer, or hide it.
    pub fn place_notation(&self, label: Option<(f32, f32, &str)>) {
        match label {
            Some((x, y, text)) => {
                let left = self.canvas.offset_left() as f32 + x;
                let top = self.canvas.offset_top() as f32 + y;
                self.notation.set_text_content(Some(text));
                let style = format!(
                    "display:block;position:absolute;pointer-events:none;left:{left:.0}px;top:{top:.0}px;"
                );
                let _ = self.notation.set_attribute("style", &style);
            }
            None => {
                self.notation.set_text_content(None);
                let _ = self.notation.set_attribute("style", "display:none;");
            }
        }
    }
}

/// Parse a numeric text input, if the control exists and holds a number.
pub fn input_number(input: &Option<web::HtmlInputElement>) -> Option<f64> {
    input.as_ref().and_then(|el| el.value().parse().ok())
}
