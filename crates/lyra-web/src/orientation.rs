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

//! Orientation-lock capability variants.
//!
//! Three legacy prefixed accessor pairs on `screen`, probed through
//! reflection, plus the modern promise-based `screen.orientation` API. The
//! modern variant's lock promise is given a no-op rejection handler; a host
//! that refuses the lock must not surface anything to the pump.

use js_sys::{Function, Reflect};
use lyra_core::platform::{HostCapability, Orientation, OrientationCapability, PlatformError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{OrientationLockType, Screen, ScreenOrientation};

fn lookup(target: &JsValue, name: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

fn call_on(
    target: &JsValue,
    name: &'static str,
    argument: Option<&JsValue>,
) -> Result<(), PlatformError> {
    let value = lookup(target, name);
    let Some(function) = value.dyn_ref::<Function>() else {
        return Err(PlatformError::CapabilityUnavailable { api: name });
    };
    let outcome = match argument {
        Some(argument) => function.call1(target, argument),
        None => function.call0(target),
    };
    outcome.map(|_| ()).map_err(|err| PlatformError::HostRejected {
        api: name,
        details: format!("{err:?}"),
    })
}

/// A legacy prefixed orientation-lock API on `screen`.
pub struct LegacyOrientation {
    screen: Screen,
    api: &'static str,
    lock_name: &'static str,
    unlock_name: &'static str,
}

impl LegacyOrientation {
    /// Creates the variant for one prefixed lock/unlock accessor pair.
    pub fn new(
        screen: Screen,
        api: &'static str,
        lock_name: &'static str,
        unlock_name: &'static str,
    ) -> Self {
        Self {
            screen,
            api,
            lock_name,
            unlock_name,
        }
    }
}

impl HostCapability for LegacyOrientation {
    fn api_name(&self) -> &'static str {
        self.api
    }

    fn is_supported(&self) -> bool {
        lookup(self.screen.as_ref(), self.lock_name).is_function()
    }
}

impl OrientationCapability for LegacyOrientation {
    fn lock(&self, orientation: Orientation) -> Result<(), PlatformError> {
        call_on(
            self.screen.as_ref(),
            self.lock_name,
            Some(&JsValue::from_str(orientation.as_str())),
        )
    }

    fn unlock(&self) -> Result<(), PlatformError> {
        call_on(self.screen.as_ref(), self.unlock_name, None)
    }
}

/// The modern `screen.orientation` lock API.
pub struct ModernOrientation {
    screen: Screen,
    orientation: ScreenOrientation,
    swallow: Closure<dyn FnMut(JsValue)>,
}

impl ModernOrientation {
    /// Creates the variant over the screen's orientation object.
    pub fn new(screen: Screen) -> Self {
        let orientation = screen.orientation();
        Self {
            screen,
            orientation,
            swallow: Closure::new(|_: JsValue| {}),
        }
    }
}

impl HostCapability for ModernOrientation {
    fn api_name(&self) -> &'static str {
        "screen.orientation.lock"
    }

    fn is_supported(&self) -> bool {
        let orientation = lookup(self.screen.as_ref(), "orientation");
        orientation.is_object() && lookup(&orientation, "lock").is_function()
    }
}

impl OrientationCapability for ModernOrientation {
    fn lock(&self, orientation: Orientation) -> Result<(), PlatformError> {
        let kind = match orientation {
            Orientation::Landscape => OrientationLockType::Landscape,
            Orientation::Portrait => OrientationLockType::Portrait,
        };
        match self.orientation.lock(kind) {
            Ok(promise) => {
                // The host answers asynchronously; rejections end here.
                let _ = promise.catch(self.swallow.as_ref().unchecked_ref());
                Ok(())
            }
            Err(err) => Err(PlatformError::HostRejected {
                api: "screen.orientation.lock",
                details: format!("{err:?}"),
            }),
        }
    }

    fn unlock(&self) -> Result<(), PlatformError> {
        self.orientation
            .unlock()
            .map_err(|err| PlatformError::HostRejected {
                api: "screen.orientation.unlock",
                details: format!("{err:?}"),
            })
    }
}

/// The orientation probe list, legacy accessors first, then the modern API.
pub fn orientation_probes(screen: &Screen) -> Vec<Box<dyn OrientationCapability>> {
    vec![
        Box::new(LegacyOrientation::new(
            screen.clone(),
            "lockOrientation",
            "lockOrientation",
            "unlockOrientation",
        )),
        Box::new(LegacyOrientation::new(
            screen.clone(),
            "mozLockOrientation",
            "mozLockOrientation",
            "mozUnlockOrientation",
        )),
        Box::new(LegacyOrientation::new(
            screen.clone(),
            "msLockOrientation",
            "msLockOrientation",
            "msUnlockOrientation",
        )),
        Box::new(ModernOrientation::new(screen.clone())),
    ]
}
