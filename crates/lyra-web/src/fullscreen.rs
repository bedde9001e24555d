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

//! Fullscreen capability variants: the standard API and the vendor-prefixed
//! ones.
//!
//! The prefixed variants are probed by duck typing through `js-sys`
//! reflection, since `web-sys` only binds the standard names. Probe order
//! matches the host-side precedence: standard first, then ms, moz, webkit.

use js_sys::{Function, Reflect};
use lyra_core::platform::{FullscreenCapability, HostCapability, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

fn lookup(target: &JsValue, name: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

fn call_method(target: &JsValue, name: &'static str) -> Result<(), PlatformError> {
    let value = lookup(target, name);
    let Some(function) = value.dyn_ref::<Function>() else {
        return Err(PlatformError::CapabilityUnavailable { api: name });
    };
    function
        .call0(target)
        .map(|_| ())
        .map_err(|err| PlatformError::HostRejected {
            api: name,
            details: format!("{err:?}"),
        })
}

/// The standard (unprefixed) fullscreen API.
pub struct StandardFullscreen {
    document: Document,
    element: Element,
}

impl StandardFullscreen {
    /// Creates the variant for the given document and target element.
    pub fn new(document: Document, element: Element) -> Self {
        Self { document, element }
    }
}

impl HostCapability for StandardFullscreen {
    fn api_name(&self) -> &'static str {
        "requestFullscreen"
    }

    fn is_supported(&self) -> bool {
        lookup(self.element.as_ref(), "requestFullscreen").is_function()
    }
}

impl FullscreenCapability for StandardFullscreen {
    fn is_active(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request(&self) -> Result<(), PlatformError> {
        self.element
            .request_fullscreen()
            .map_err(|err| PlatformError::HostRejected {
                api: "requestFullscreen",
                details: format!("{err:?}"),
            })
    }

    fn cancel(&self) -> Result<(), PlatformError> {
        self.document.exit_fullscreen();
        Ok(())
    }
}

/// Accessor names of one vendor-prefixed fullscreen variant.
pub struct VendorNames {
    /// Variant name for logging, e.g. `"webkitRequestFullscreen"`.
    pub api: &'static str,
    /// The document property holding the fullscreen element.
    pub state_flag: &'static str,
    /// The element method that enters fullscreen.
    pub request: &'static str,
    /// The document method that leaves fullscreen.
    pub cancel: &'static str,
}

/// A vendor-prefixed fullscreen API, probed through reflection.
pub struct PrefixedFullscreen {
    document: Document,
    element: Element,
    names: VendorNames,
}

impl PrefixedFullscreen {
    /// Creates the variant for the given accessor names.
    pub fn new(document: Document, element: Element, names: VendorNames) -> Self {
        Self {
            document,
            element,
            names,
        }
    }
}

impl HostCapability for PrefixedFullscreen {
    fn api_name(&self) -> &'static str {
        self.names.api
    }

    fn is_supported(&self) -> bool {
        lookup(self.element.as_ref(), self.names.request).is_function()
    }
}

impl FullscreenCapability for PrefixedFullscreen {
    fn is_active(&self) -> bool {
        let flag = lookup(self.document.as_ref(), self.names.state_flag);
        !flag.is_null() && !flag.is_undefined()
    }

    fn request(&self) -> Result<(), PlatformError> {
        call_method(self.element.as_ref(), self.names.request)
    }

    fn cancel(&self) -> Result<(), PlatformError> {
        call_method(self.document.as_ref(), self.names.cancel)
    }
}

/// The fullscreen probe list for a surface element, most-preferred first.
pub fn fullscreen_probes(
    document: &Document,
    element: &Element,
) -> Vec<Box<dyn FullscreenCapability>> {
    vec![
        Box::new(StandardFullscreen::new(document.clone(), element.clone())),
        Box::new(PrefixedFullscreen::new(
            document.clone(),
            element.clone(),
            VendorNames {
                api: "msRequestFullscreen",
                state_flag: "msFullscreenElement",
                request: "msRequestFullscreen",
                cancel: "msExitFullscreen",
            },
        )),
        Box::new(PrefixedFullscreen::new(
            document.clone(),
            element.clone(),
            VendorNames {
                api: "mozRequestFullScreen",
                state_flag: "mozFullScreenElement",
                request: "mozRequestFullScreen",
                cancel: "mozCancelFullScreen",
            },
        )),
        Box::new(PrefixedFullscreen::new(
            document.clone(),
            element.clone(),
            VendorNames {
                api: "webkitRequestFullscreen",
                state_flag: "webkitFullscreenElement",
                request: "webkitRequestFullscreen",
                cancel: "webkitCancelFullScreen",
            },
        )),
    ]
}
