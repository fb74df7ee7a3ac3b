//! PDF export of the rendered comic.
//!
//! SYSTEM CONTEXT
//! ==============
//! The comic container is rasterized with the page-global `html2canvas`,
//! then written into an A4 portrait `jsPDF` document. Both libraries are
//! loaded by `<script>` tags in the app shell and reached through
//! `js_sys::Reflect`. The image is scaled to the page width and, when taller
//! than one page, drawn once per page at a negative vertical offset so each
//! page shows the next slice.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

pub const PDF_FILE_NAME: &str = "ai-comic.pdf";
pub const CAPTURE_SCALE: f64 = 2.0;
pub const CAPTURE_BACKGROUND: &str = "#111827";
pub const EXPORT_FAILED_MESSAGE: &str = "Oops! Something went wrong while creating the PDF. Please try again.";

/// The captured image placed at full page width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PdfLayout {
    pub image_width: f64,
    pub image_height: f64,
    pub page_height: f64,
}

impl PdfLayout {
    /// Scale a `canvas_width × canvas_height` capture to the page width.
    /// Returns `None` for an empty capture or page.
    pub fn fit_width(page_width: f64, page_height: f64, canvas_width: f64, canvas_height: f64) -> Option<Self> {
        if page_width <= 0.0 || page_height <= 0.0 || canvas_width <= 0.0 || canvas_height <= 0.0 {
            return None;
        }
        let ratio = canvas_width / page_width;
        Some(Self { image_width: page_width, image_height: canvas_height / ratio, page_height })
    }

    /// Vertical offset of the image on each PDF page, first page first.
    pub fn page_offsets(&self) -> Vec<f64> {
        let mut offsets = vec![0.0];
        let mut height_left = self.image_height - self.page_height;
        while height_left > 0.0 {
            offsets.push(height_left - self.image_height);
            height_left -= self.page_height;
        }
        offsets
    }
}

/// Capture the element with id `element_id` and save it as [`PDF_FILE_NAME`].
///
/// # Errors
///
/// Returns a description of the failure; the caller decides how to tell the user.
pub async fn export_to_pdf(element_id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let element = window
            .document()
            .and_then(|doc| doc.get_element_by_id(element_id))
            .ok_or_else(|| format!("element #{element_id} not found"))?;
        render_pdf(&window, &element).await.map_err(|e| format!("{e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = element_id;
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
async fn render_pdf(window: &web_sys::Window, element: &web_sys::Element) -> Result<(), wasm_bindgen::JsValue> {
    use js_sys::Reflect;
    use wasm_bindgen::{JsCast as _, JsValue};

    let global: &JsValue = window.as_ref();

    let html2canvas: js_sys::Function = Reflect::get(global, &"html2canvas".into())?.dyn_into()?;
    let capture_options = js_sys::Object::new();
    Reflect::set(&capture_options, &"useCORS".into(), &JsValue::TRUE)?;
    Reflect::set(&capture_options, &"scale".into(), &JsValue::from_f64(CAPTURE_SCALE))?;
    Reflect::set(&capture_options, &"backgroundColor".into(), &CAPTURE_BACKGROUND.into())?;
    let promise: js_sys::Promise = html2canvas.call2(&JsValue::NULL, element, &capture_options)?.dyn_into()?;
    let canvas: web_sys::HtmlCanvasElement = wasm_bindgen_futures::JsFuture::from(promise).await?.dyn_into()?;
    let image_data = canvas.to_data_url_with_type("image/png")?;

    let jspdf = Reflect::get(global, &"jspdf".into())?;
    let constructor: js_sys::Function = Reflect::get(&jspdf, &"jsPDF".into())?.dyn_into()?;
    let pdf_options = js_sys::Object::new();
    Reflect::set(&pdf_options, &"orientation".into(), &"p".into())?;
    Reflect::set(&pdf_options, &"unit".into(), &"mm".into())?;
    Reflect::set(&pdf_options, &"format".into(), &"a4".into())?;
    let pdf: JsValue = Reflect::construct(&constructor, &js_sys::Array::of1(&pdf_options))?.into();

    let page_size = Reflect::get(&Reflect::get(&pdf, &"internal".into())?, &"pageSize".into())?;
    let page_width = call_method(&page_size, "getWidth", &[])?.as_f64().unwrap_or(0.0);
    let page_height = call_method(&page_size, "getHeight", &[])?.as_f64().unwrap_or(0.0);

    let layout = PdfLayout::fit_width(
        page_width,
        page_height,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    )
    .ok_or_else(|| JsValue::from_str("empty capture"))?;

    for (index, offset) in layout.page_offsets().into_iter().enumerate() {
        if index > 0 {
            call_method(&pdf, "addPage", &[])?;
        }
        call_method(
            &pdf,
            "addImage",
            &[
                JsValue::from_str(&image_data),
                JsValue::from_str("PNG"),
                JsValue::from_f64(0.0),
                JsValue::from_f64(offset),
                JsValue::from_f64(layout.image_width),
                JsValue::from_f64(layout.image_height),
            ],
        )?;
    }
    call_method(&pdf, "save", &[JsValue::from_str(PDF_FILE_NAME)])?;
    Ok(())
}

#[cfg(feature = "hydrate")]
fn call_method(
    target: &wasm_bindgen::JsValue,
    name: &str,
    args: &[wasm_bindgen::JsValue],
) -> Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast as _;

    let method: js_sys::Function = js_sys::Reflect::get(target, &name.into())?.dyn_into()?;
    let args: js_sys::Array = args.iter().collect();
    js_sys::Reflect::apply(&method, target, &args)
}
