// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A canvas-element implementation of the `DisplaySurface` trait.

use lyra_core::platform::DisplaySurface;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

/// A `DisplaySurface` backed by a page canvas element.
///
/// The displayed size is the canvas's CSS layout size; the backing size is
/// the canvas raster buffer. Reveal toggles the page's loading placeholder
/// and the canvas between hidden and visible.
pub struct WebSurface {
    document: Document,
    canvas: HtmlCanvasElement,
    progress_id: String,
}

impl WebSurface {
    /// Wraps a canvas element.
    ///
    /// The canvas is made focusable (negative tab index) so it can receive
    /// keyboard events once revealed. `progress_id` names the loading
    /// placeholder element hidden by [`DisplaySurface::reveal`].
    pub fn new(
        document: Document,
        canvas: HtmlCanvasElement,
        progress_id: impl Into<String>,
    ) -> Self {
        canvas.set_tab_index(-1);
        Self {
            document,
            canvas,
            progress_id: progress_id.into(),
        }
    }

    /// The wrapped canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_display(element: &HtmlElement, value: &str) {
        if let Err(err) = element.style().set_property("display", value) {
            log::debug!("Could not set display on element: {err:?}");
        }
    }
}

impl DisplaySurface for WebSurface {
    fn client_size(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.client_width()),
            f64::from(self.canvas.client_height()),
        )
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn reveal(&self) {
        match self
            .document
            .get_element_by_id(&self.progress_id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            Some(progress) => Self::set_display(&progress, "none"),
            None => log::debug!(
                "Loading placeholder '#{}' not found; nothing to hide.",
                self.progress_id
            ),
        }
        Self::set_display(&self.canvas, "block");
    }
}
