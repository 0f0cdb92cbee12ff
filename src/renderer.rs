//! Bindings to the page's diagram renderer and the pan/zoom plugin.
//!
//! Both are plain globals loaded by `<script>` tags ahead of the wasm
//! bundle: `renderer` lays out a DOT string into `#graph`, `svgPanZoom`
//! decorates the produced `<svg>`.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::constants::DOT_DATA_URI_PREFIX;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = renderer, js_name = init)]
    fn renderer_init(selector: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = renderer, js_name = render)]
    fn renderer_render(dot: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = renderer, js_name = renderHandler)]
    fn renderer_render_handler(callback: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["renderer", "stage"], js_name = getImage)]
    fn stage_get_image(transparent: bool) -> Result<HtmlImageElement, JsValue>;

    /// Handle returned by `svgPanZoom`.
    pub type PanZoom;

    #[wasm_bindgen(catch, js_name = svgPanZoom)]
    fn svg_pan_zoom(selector: &str, options: &JsValue) -> Result<PanZoom, JsValue>;
}

/// Options handed to `svgPanZoom`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PanZoomConfig {
    pub zoom_enabled: bool,
    pub control_icons_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevent_mouse_events_default: Option<bool>,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            control_icons_enabled: true,
            // clicks on nodes must still reach the selection handlers
            prevent_mouse_events_default: Some(false),
        }
    }
}

impl PanZoomConfig {
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self).map_err(JsValue::from)
    }
}

/// The global renderer bound to one container.
pub struct DiagramRenderer {
    selector: String,
}

impl DiagramRenderer {
    pub fn init(selector: &str) -> Result<Self, JsValue> {
        renderer_init(selector)?;
        Ok(Self {
            selector: selector.to_string(),
        })
    }

    pub fn render(&self, dot: &str) -> Result<(), JsValue> {
        renderer_render(dot)
    }

    /// Run `callback` once the renderer has finished drawing.
    pub fn on_rendered<F>(&self, callback: F) -> Result<(), JsValue>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        renderer_render_handler(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Rasterise the current stage; the image loads asynchronously.
    pub fn snapshot(&self) -> Result<HtmlImageElement, JsValue> {
        stage_get_image(false)
    }

    pub fn attach_pan_zoom(&self, config: &PanZoomConfig) -> Result<PanZoom, JsValue> {
        svg_pan_zoom(&format!("{} svg", self.selector), &config.to_js()?)
    }
}

/// `data:` URI that downloads `dot` as a text file.
pub fn dot_data_uri(dot: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(dot).into();
    format!("{}{}", DOT_DATA_URI_PREFIX, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_zoom_config_serialises_camel_case() {
        let json = serde_json::to_value(PanZoomConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "zoomEnabled": true,
                "controlIconsEnabled": true,
                "preventMouseEventsDefault": false,
            })
        );

        let plain = PanZoomConfig {
            prevent_mouse_events_default: None,
            ..PanZoomConfig::default()
        };
        let json = serde_json::to_value(plain).unwrap();
        assert!(json.get("preventMouseEventsDefault").is_none());
    }
}
